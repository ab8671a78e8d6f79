//! The operand and instruction model of the DCPU-16.
//!
//! Every instruction is one word, optionally followed by one trailing
//! word per operand. Basic instructions take two operands:
//!
//! ```text
//! bbbbbbaaaaaaoooo
//! ```
//!
//! where `o` is the 4-bit opcode and `a`/`b` are 6-bit operand fields.
//! Non-basic instructions take one operand; their low nibble is zero and
//! their opcode sits in bits 4-9:
//!
//! ```text
//! aaaaaaoooooo0000
//! ```
//!
//! Operand fields:
//!
//! ```text
//! 0x00-0x07  register
//! 0x08-0x0f  [register]
//! 0x10-0x17  [next word + register]
//! 0x18       POP
//! 0x19       PEEK
//! 0x1a       PUSH
//! 0x1b       SP
//! 0x1c       PC
//! 0x1d       O
//! 0x1e       [next word]
//! 0x1f       next word (literal)
//! 0x20-0x3f  literal 0x00-0x1f
//! ```
use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;

use super::codegen::Label;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Register {
    A,
    B,
    C,
    X,
    Y,
    Z,
    I,
    J,
}

impl Register {
    pub const ALL: [Register; 8] = [
        Register::A,
        Register::B,
        Register::C,
        Register::X,
        Register::Y,
        Register::Z,
        Register::I,
        Register::J,
    ];

    /// Convert the register to its 3-bit identity.
    pub fn to_u16(&self) -> u16 {
        use Register::*;
        match self {
            A => 0b000,
            B => 0b001,
            C => 0b010,
            X => 0b011,
            Y => 0b100,
            Z => 0b101,
            I => 0b110,
            J => 0b111,
        }
    }

    pub fn name(&self) -> &'static str {
        use Register::*;
        match self {
            A => "a",
            B => "b",
            C => "c",
            X => "x",
            Y => "y",
            Z => "z",
            I => "i",
            J => "j",
        }
    }

    /// Looks a register up by name, ignoring case.
    pub fn from_name(name: &str) -> Option<Register> {
        REGISTERS.get(name.to_ascii_lowercase().as_str()).copied()
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name().to_ascii_uppercase())
    }
}

impl std::convert::TryFrom<u16> for Register {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Register::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| "registers may only have values from 0-7 inclusive".to_owned())
    }
}

/// An opcode. Whether it is basic or not is read off the code itself:
/// basic opcodes live in the low nibble, non-basic ones in bits 4-9.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct OpCode(u16);

impl OpCode {
    pub const SET: OpCode = OpCode(0x1);
    pub const ADD: OpCode = OpCode(0x2);
    pub const SUB: OpCode = OpCode(0x3);
    pub const MUL: OpCode = OpCode(0x4);
    pub const DIV: OpCode = OpCode(0x5);
    pub const MOD: OpCode = OpCode(0x6);
    pub const SHL: OpCode = OpCode(0x7);
    pub const SHR: OpCode = OpCode(0x8);
    pub const AND: OpCode = OpCode(0x9);
    pub const BOR: OpCode = OpCode(0xA);
    pub const XOR: OpCode = OpCode(0xB);
    pub const IFE: OpCode = OpCode(0xC);
    pub const IFN: OpCode = OpCode(0xD);
    pub const IFG: OpCode = OpCode(0xE);
    pub const IFB: OpCode = OpCode(0xF);

    pub const JSR: OpCode = OpCode(0x010);

    pub const ALL: [(&'static str, OpCode); 16] = [
        ("set", OpCode::SET),
        ("add", OpCode::ADD),
        ("sub", OpCode::SUB),
        ("mul", OpCode::MUL),
        ("div", OpCode::DIV),
        ("mod", OpCode::MOD),
        ("shl", OpCode::SHL),
        ("shr", OpCode::SHR),
        ("and", OpCode::AND),
        ("bor", OpCode::BOR),
        ("xor", OpCode::XOR),
        ("ife", OpCode::IFE),
        ("ifn", OpCode::IFN),
        ("ifg", OpCode::IFG),
        ("ifb", OpCode::IFB),
        ("jsr", OpCode::JSR),
    ];

    /// Builds an opcode from a raw code. A nonzero low nibble makes it
    /// basic and everything above is dropped; otherwise only bits 4-9
    /// are kept.
    pub fn new(code: u16) -> Self {
        if code & 0x000F != 0 {
            OpCode(code & 0x000F)
        } else {
            OpCode(code & 0x03F0)
        }
    }

    pub fn code(&self) -> u16 {
        self.0
    }

    pub fn is_basic(&self) -> bool {
        self.0 & 0x000F != 0
    }

    /// Looks an opcode up by mnemonic, ignoring case.
    pub fn from_name(name: &str) -> Option<OpCode> {
        OPCODES.get(name.to_ascii_lowercase().as_str()).copied()
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match OpCode::ALL.iter().find(|(_, op)| op == self) {
            Some((name, _)) => write!(f, "{}", name.to_ascii_uppercase()),
            None => write!(f, "0x{:03X}", self.0),
        }
    }
}

static OPCODES: Lazy<HashMap<&'static str, OpCode>> =
    Lazy::new(|| OpCode::ALL.iter().copied().collect());

static REGISTERS: Lazy<HashMap<&'static str, Register>> =
    Lazy::new(|| Register::ALL.iter().map(|r| (r.name(), *r)).collect());

/// An encoded operand: its 6-bit field, the trailing word it needs (if
/// any) and the label whose address gets added to that word at patch time.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Argument {
    field: u8,
    next_word: Option<u16>,
    label: Option<Label>,
}

impl Argument {
    pub const POP: Argument = Argument::simple(0x18);
    pub const PEEK: Argument = Argument::simple(0x19);
    pub const PUSH: Argument = Argument::simple(0x1A);
    pub const SP: Argument = Argument::simple(0x1B);
    pub const PC: Argument = Argument::simple(0x1C);
    pub const O: Argument = Argument::simple(0x1D);

    const fn simple(field: u8) -> Self {
        Argument { field, next_word: None, label: None }
    }

    /// `A`
    pub fn register(reg: Register) -> Self {
        Argument::simple(reg.to_u16() as u8)
    }

    /// `[A]`
    pub fn indirect(reg: Register) -> Self {
        Argument::simple(0x08 + reg.to_u16() as u8)
    }

    /// `[offset + label + A]`. The trailing word is emitted even when
    /// the offset is zero.
    pub fn indirect_offset(reg: Register, offset: u16, label: Option<Label>) -> Self {
        Argument { field: 0x10 + reg.to_u16() as u8, next_word: Some(offset), label }
    }

    /// `[offset + label]`
    pub fn absolute(offset: u16, label: Option<Label>) -> Self {
        Argument { field: 0x1E, next_word: Some(offset), label }
    }

    /// A literal. Values up to 0x1f that don't depend on a label are
    /// packed into the field itself.
    pub fn literal(value: u16, label: Option<Label>) -> Self {
        match label {
            None if value <= 0x1F => Argument::simple(0x20 + value as u8),
            _ => Argument { field: 0x1F, next_word: Some(value), label },
        }
    }

    /// The address of `label` as a literal; always the long form.
    pub fn label(label: Label) -> Self {
        Argument::literal(0, Some(label))
    }

    pub fn field(&self) -> u8 {
        self.field
    }

    pub fn next_word(&self) -> Option<u16> {
        self.next_word
    }

    pub fn label_ref(&self) -> Option<Label> {
        self.label
    }
}

impl From<Register> for Argument {
    fn from(reg: Register) -> Self {
        Argument::register(reg)
    }
}

impl From<Label> for Argument {
    fn from(label: Label) -> Self {
        Argument::label(label)
    }
}
