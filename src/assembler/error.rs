//! Error types for the assembler.
//!
//! `SyntaxError` covers anything that goes wrong while reading a single
//! line and is always turned into exactly one diagnostic for that line.
//! `GenerationError` is raised by the code generator.
use std::fmt;

use thiserror::Error;

use super::lexer::TokenKind;

#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum SyntaxError {
    #[error("Unexpected end of line.")]
    UnexpectedEol,

    #[error("Unexpected escaped character '\\{0}'.")]
    BadEscape(char),

    #[error("Invalid numeric literal '{0}'.")]
    InvalidNumber(String),

    #[error("End of character literal (') expected.")]
    UnterminatedChar,

    #[error("End of string literal (\") expected.")]
    UnterminatedString,

    #[error("Unexpected character '{0}'.")]
    UnexpectedChar(char),

    #[error("Character '{0}' doesn't fit in a word.")]
    CharOutOfRange(char),

    #[error("Unexpected token '{found}', expected {expected}.")]
    UnexpectedToken { found: TokenKind, expected: Expected },

    #[error("Label '{0}' already marked another position.")]
    LabelAlreadyMarked(String),

    #[error("Unknown command '{0}'.")]
    UnknownCommand(String),

    #[error("Arguments to data directive must be constant.")]
    NonConstantData,

    #[error("Indirect value supports only one register in expression.")]
    DuplicateRegister,

    #[error("Indirect value supports only one label in expression.")]
    DuplicateLabel,

    #[error("'{0}' can't be used in an indirect expression.")]
    PseudoInIndirect(String),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl SyntaxError {
    pub fn unexpected(found: TokenKind, expected: &'static [TokenKind]) -> Self {
        SyntaxError::UnexpectedToken { found, expected: Expected(expected) }
    }
}

/// The set of tokens a parser position would have accepted.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Expected(pub &'static [TokenKind]);

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kinds = self.0;
        for (idx, kind) in kinds.iter().enumerate() {
            if idx > 0 {
                if idx == kinds.len() - 1 {
                    write!(f, " or ")?;
                } else {
                    write!(f, ", ")?;
                }
            }
            write!(f, "'{}'", kind)?;
        }
        Ok(())
    }
}

#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum GenerationError {
    #[error("Code generation was finished.")]
    Finished,

    #[error("Label already marked another position.")]
    AlreadyMarked,

    #[error("Label must be defined in this generator.")]
    ForeignLabel,

    #[error("Basic opcodes take exactly 2 arguments.")]
    BasicArity,

    #[error("Non-basic opcodes take exactly 1 argument.")]
    ExtendedArity,

    #[error("Word address 0x{0:X} doesn't fit in 16 bits.")]
    AddressOverflow(usize),

    #[error("{count} label(s) didn't mark any position.")]
    UnmarkedLabels { count: usize },
}
