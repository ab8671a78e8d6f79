//! The Parser module reads source lines through the lexer and drives
//! the code generator directly; there is no intermediate tree.
//!
//! ```text
//! Program  ::= Line { NEWLINE Line }
//! Line     ::= { ':' ID } [ Command ]
//! Command  ::= ID Args
//! Args     ::= Arg { ',' Arg }
//! Arg      ::= '[' Expr ']' | Simple | STRING
//! Expr     ::= Simple { '+' Simple }
//! Simple   ::= ID | NUMBER | CHAR
//! ```
//!
//! Each line is parsed on its own. A line that fails yields exactly one
//! error and emits nothing, then parsing resumes on the next line.
use std::collections::HashMap;

use super::ast::{Argument, OpCode, Register};
use super::codegen::{CodeGenerator, Label};
use super::error::{GenerationError, SyntaxError};
use super::issue::CodeIssue;
use super::lexer::{Lexer, Token, TokenKind};

/// Receives `(line index, source text, (start byte offset, bytes))` for
/// every source line once the image is final.
pub type ListingHandler<'a> = dyn FnMut(usize, &str, (usize, &[u8])) + 'a;

/// The outcome of one `compile` call.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Compilation {
    issues: Vec<CodeIssue>,
    image: Option<Vec<u8>>,
}

impl Compilation {
    /// Every error and warning, in the order they were found.
    pub fn issues(&self) -> &[CodeIssue] {
        &self.issues
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(CodeIssue::is_error)
    }

    /// The memory image, present only when there were no errors.
    pub fn image(&self) -> Option<&[u8]> {
        self.image.as_deref()
    }

    pub fn into_image(self) -> Option<Vec<u8>> {
        self.image
    }

    /// The image as 16-bit words.
    pub fn words(&self) -> Option<Vec<u16>> {
        self.image.as_ref().map(|bytes| {
            bytes.chunks(2).map(|w| u16::from_be_bytes([w[0], w[1]])).collect()
        })
    }
}

/// Assembles `source` into a memory image.
///
/// Only a misuse of the code generator escapes as `Err`; everything
/// wrong with the source itself is reported through the returned
/// `Compilation`.
pub fn compile(source: &str) -> Result<Compilation, GenerationError> {
    Compiler::new().run(source, None)
}

/// Like `compile`, additionally replaying every line to `listing`.
pub fn compile_with_listing<F>(source: &str, mut listing: F) -> Result<Compilation, GenerationError>
where
    F: FnMut(usize, &str, (usize, &[u8])),
{
    let handler: &mut ListingHandler = &mut listing;
    Compiler::new().run(source, Some(handler))
}

struct Symbol {
    name: String,
    label: Label,
    /// Line the label was marked on.
    line: Option<usize>,
}

/// State for a single compilation. It is built by `compile` and dropped
/// with it, so nothing carries over between calls.
struct Compiler {
    gen: CodeGenerator,
    symbols: Vec<Symbol>,
    by_name: HashMap<String, usize>,
    issues: Vec<CodeIssue>,
}

impl Compiler {
    fn new() -> Self {
        Compiler {
            gen: CodeGenerator::new(),
            symbols: Vec::new(),
            by_name: HashMap::new(),
            issues: Vec::new(),
        }
    }

    fn run(mut self, source: &str, listing: Option<&mut ListingHandler>) -> Result<Compilation, GenerationError> {
        let lines: Vec<&str> = source.lines().collect();
        let mut offsets = Vec::with_capacity(lines.len());

        for (index, line) in lines.iter().enumerate() {
            offsets.push(self.gen.byte_position());
            if let Err(e) = self.compile_line(index, line) {
                debug!("line {}: {}", index + 1, e);
                self.issues.push(CodeIssue::error(index, e.to_string()));
            }
        }

        self.check_labels()?;
        match self.gen.finish() {
            // Already reported by check_labels.
            Ok(()) | Err(GenerationError::UnmarkedLabels { .. }) => {},
            Err(e) => return Err(e),
        }

        let Compiler { gen, issues, .. } = self;
        let output = gen.into_output();

        if let Some(listing) = listing {
            for (index, line) in lines.iter().enumerate() {
                let start = offsets[index];
                let end = offsets.get(index + 1).copied().unwrap_or_else(|| output.len());
                listing(index, line, (start, &output[start..end]));
            }
        }

        let errors = issues.iter().filter(|i| i.is_error()).count();
        debug!(
            "assembled {} line(s) into {} word(s): {} error(s), {} warning(s)",
            lines.len(), output.len() / 2, errors, issues.len() - errors
        );

        Ok(Compilation {
            image: if errors == 0 { Some(output) } else { None },
            issues,
        })
    }

    fn compile_line(&mut self, index: usize, line: &str) -> Result<(), SyntaxError> {
        let mut lexer = Lexer::new(line);

        let mut token = lexer.read()?;
        while token == Token::Colon {
            let name = expect_id(&mut lexer)?;
            self.mark(&name, index)?;
            token = lexer.read()?;
        }

        match token {
            Token::Eol => Ok(()),
            Token::Id(command) => self.command(&mut lexer, &command),
            other => Err(SyntaxError::unexpected(other.kind(), &[TokenKind::Id, TokenKind::Eol])),
        }
    }

    fn mark(&mut self, name: &str, line: usize) -> Result<(), SyntaxError> {
        let idx = self.symbol(name)?;
        let label = self.symbols[idx].label;

        if self.gen.label_position(label)?.is_some() {
            return Err(SyntaxError::LabelAlreadyMarked(name.to_owned()));
        }
        self.gen.mark_label(label)?;
        self.symbols[idx].line = Some(line);
        Ok(())
    }

    fn command(&mut self, lexer: &mut Lexer, command: &str) -> Result<(), SyntaxError> {
        let command = command.to_ascii_lowercase();
        if command == "dat" {
            return self.data(lexer);
        }

        let op = OpCode::from_name(&command).ok_or(SyntaxError::UnknownCommand(command))?;
        let a = self.argument(lexer)?;

        if op.is_basic() {
            expect(lexer, TokenKind::Comma)?;
            let b = self.argument(lexer)?;
            expect(lexer, TokenKind::Eol)?;
            self.gen.emit(op, a, b)?;
        } else {
            expect(lexer, TokenKind::Eol)?;
            self.gen.emit_extended(op, a)?;
        }
        Ok(())
    }

    /// Parses the whole `dat` list before writing any of it.
    fn data(&mut self, lexer: &mut Lexer) -> Result<(), SyntaxError> {
        enum Item {
            Word(u16),
            Address(Label),
        }
        let mut items = Vec::new();

        let mut token = lexer.read()?;
        while token != Token::Eol {
            match token {
                Token::Number(val) | Token::Char(val) => items.push(Item::Word(val)),
                Token::Str(text) => items.extend(text.encode_utf16().map(Item::Word)),
                // Register and stack operand names are not label references
                // here, so `dat a` is an error rather than the address of a label `a`.
                Token::Id(name) if !is_reserved(&name) => items.push(Item::Address(self.label(&name)?)),
                _ => return Err(SyntaxError::NonConstantData),
            }

            match lexer.read()? {
                Token::Eol => break,
                Token::Comma => {},
                other => return Err(SyntaxError::unexpected(other.kind(), &[TokenKind::Comma, TokenKind::Eol])),
            }
            token = lexer.read()?;
        }

        for item in items {
            match item {
                Item::Word(word) => self.gen.emit_word(word)?,
                Item::Address(label) => self.gen.emit_data(label)?,
            }
        }
        Ok(())
    }

    fn argument(&mut self, lexer: &mut Lexer) -> Result<Argument, SyntaxError> {
        match lexer.read()? {
            Token::Number(val) | Token::Char(val) => Ok(Argument::literal(val, None)),
            Token::Id(name) => {
                if let Some(reg) = Register::from_name(&name) {
                    Ok(Argument::register(reg))
                } else if let Some(arg) = pseudo_operand(&name) {
                    Ok(arg)
                } else {
                    Ok(Argument::label(self.label(&name)?))
                }
            },
            Token::OpenBracket => self.indirect(lexer),
            other => Err(SyntaxError::unexpected(
                other.kind(),
                &[TokenKind::Number, TokenKind::Char, TokenKind::Id, TokenKind::OpenBracket],
            )),
        }
    }

    /// Parses the inside of `[...]`, the opening bracket already consumed.
    fn indirect(&mut self, lexer: &mut Lexer) -> Result<Argument, SyntaxError> {
        let mut register: Option<Register> = None;
        let mut label: Option<Label> = None;
        let mut offset: u16 = 0;

        loop {
            match lexer.read()? {
                Token::Number(val) | Token::Char(val) => offset = offset.wrapping_add(val),
                Token::Id(name) => {
                    if let Some(reg) = Register::from_name(&name) {
                        if register.is_some() {
                            return Err(SyntaxError::DuplicateRegister);
                        }
                        register = Some(reg);
                    } else if pseudo_operand(&name).is_some() {
                        // Rejected outright; `[sp]` must not turn into a label named `sp`.
                        return Err(SyntaxError::PseudoInIndirect(name));
                    } else if label.is_some() {
                        return Err(SyntaxError::DuplicateLabel);
                    } else {
                        label = Some(self.label(&name)?);
                    }
                },
                other => return Err(SyntaxError::unexpected(
                    other.kind(),
                    &[TokenKind::Number, TokenKind::Char, TokenKind::Id],
                )),
            }

            match lexer.read()? {
                Token::Plus => {},
                Token::CloseBracket => break,
                other => return Err(SyntaxError::unexpected(
                    other.kind(),
                    &[TokenKind::Plus, TokenKind::CloseBracket],
                )),
            }
        }

        Ok(match register {
            Some(reg) if offset == 0 && label.is_none() => Argument::indirect(reg),
            Some(reg) => Argument::indirect_offset(reg, offset, label),
            None => Argument::absolute(offset, label),
        })
    }

    /// Returns the label called `name`, defining it on first use.
    fn label(&mut self, name: &str) -> Result<Label, SyntaxError> {
        let idx = self.symbol(name)?;
        Ok(self.symbols[idx].label)
    }

    fn symbol(&mut self, name: &str) -> Result<usize, SyntaxError> {
        if let Some(&idx) = self.by_name.get(name) {
            return Ok(idx);
        }

        let label = self.gen.define_label()?;
        self.symbols.push(Symbol { name: name.to_owned(), label, line: None });
        self.by_name.insert(name.to_owned(), self.symbols.len() - 1);
        Ok(self.symbols.len() - 1)
    }

    /// Reports labels that were never marked, and marked labels nothing
    /// refers to.
    fn check_labels(&mut self) -> Result<(), GenerationError> {
        for symbol in &self.symbols {
            if self.gen.label_position(symbol.label)?.is_none() {
                self.issues.push(CodeIssue::error(
                    0,
                    format!("Label '{}' didn't mark any position.", symbol.name),
                ));
            } else if self.gen.reference_count(symbol.label)? == 0 {
                self.issues.push(CodeIssue::warning(
                    symbol.line.unwrap_or(0),
                    format!("Label '{}' doesn't have any references.", symbol.name),
                ));
            }
        }
        Ok(())
    }
}

fn pseudo_operand(name: &str) -> Option<Argument> {
    match name.to_ascii_lowercase().as_str() {
        "pc"   => Some(Argument::PC),
        "sp"   => Some(Argument::SP),
        "o"    => Some(Argument::O),
        "push" => Some(Argument::PUSH),
        "peek" => Some(Argument::PEEK),
        "pop"  => Some(Argument::POP),
        _ => None,
    }
}

fn is_reserved(name: &str) -> bool {
    Register::from_name(name).is_some() || pseudo_operand(name).is_some()
}

fn expect(lexer: &mut Lexer, kind: TokenKind) -> Result<Token, SyntaxError> {
    let token = lexer.read()?;
    if token.kind() != kind {
        let expected: &'static [TokenKind] = match kind {
            TokenKind::Comma => &[TokenKind::Comma],
            TokenKind::Eol => &[TokenKind::Eol],
            _ => &[TokenKind::Id],
        };
        return Err(SyntaxError::unexpected(token.kind(), expected));
    }
    Ok(token)
}

fn expect_id(lexer: &mut Lexer) -> Result<String, SyntaxError> {
    match expect(lexer, TokenKind::Id)? {
        Token::Id(name) => Ok(name),
        other => Err(SyntaxError::unexpected(other.kind(), &[TokenKind::Id])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::issue::Severity;

    fn words(source: &str) -> Vec<u16> {
        let result = compile(source).unwrap();
        assert!(result.issues().is_empty(), "unexpected issues for {:?}: {:?}", source, result.issues());
        result.words().unwrap()
    }

    fn errors(result: &Compilation) -> Vec<&CodeIssue> {
        result.issues().iter().filter(|i| i.is_error()).collect()
    }

    const NOTCH_TEST: &str = r"; Try some basic stuff
                SET A, 0x30              ; 7c01 0030
                SET [0x1000], 0x20       ; 7de1 1000 0020
                SUB A, [0x1000]          ; 7803 1000
                IFN A, 0x10              ; c00d
                    SET PC, crash         ; 7dc1 001a

; Do a loopy thing
                SET I, 10                ; a861
                SET A, 0x2000            ; 7c01 2000
:loop           SET [0x2000+I], [A]      ; 2161 2000
                SUB I, 1                 ; 8463
                IFN I, 0                 ; 806d
                    SET PC, loop          ; 7dc1 000d

; Call a subroutine
                SET X, 0x4               ; 9031
                JSR testsub              ; 7c10 0018
                SET PC, crash            ; 7dc1 001a

:testsub        SHL X, 4                 ; 9037
                SET PC, POP              ; 61c1

; Hang forever. X should now be 0x40 if everything went right.
:crash          SET PC, crash            ; 7dc1 001a
";

    const HELLO_WORLD: &str = "; Assembler test for DCPU
; by Markus Persson

:start
\tset i, 0
\tset j, 0
\tset b, 0xf100

:nextchar
\tset a, [data+i]
\tife a, 0
\t    set PC, end
\tifg a, 0xff
\t    set PC, setcolor
\tbor a, b
\tset [0x8000+j], a
\tadd i, 1
\tadd j, 1
\tset PC, nextchar

:setcolor
\tset b, a
\tand b, 0xff
\tshl b, 8
\tifg a, 0x1ff
\t    add b, 0x80
\tadd i, 1
\tset PC, nextchar

:end
\tset PC, end

:data
\tdat 0x170, \"Hello \", 0x2e1, \"world\", 0x170, \", how are you?\"";

    #[test]
    fn test_reference_program() {
        assert_eq!(
            words(NOTCH_TEST),
            vec![
                0x7C01, 0x0030, 0x7DE1, 0x1000, 0x0020, 0x7803, 0x1000, 0xC00D,
                0x7DC1, 0x001A, 0xA861, 0x7C01, 0x2000, 0x2161, 0x2000, 0x8463,
                0x806D, 0x7DC1, 0x000D, 0x9031, 0x7C10, 0x0018, 0x7DC1, 0x001A,
                0x9037, 0x61C1, 0x7DC1, 0x001A,
            ]
        );
    }

    #[test]
    fn test_hello_world_only_warns_about_start() {
        let result = compile(HELLO_WORLD).unwrap();
        assert_eq!(
            result.issues(),
            &[CodeIssue::warning(3, "Label 'start' doesn't have any references.")]
        );

        let words = result.words().unwrap();
        // set a, [data+i]
        assert_eq!(words[4], 0x1 | 0x16 << 10);
        assert_eq!(words[5], 33);
        // dat 0x170, "Hello ", ...
        assert_eq!(&words[33..41], &[0x0170, 'H' as u16, 'e' as u16, 'l' as u16, 'l' as u16, 'o' as u16, ' ' as u16, 0x02E1]);
        assert_eq!(words.len(), 33 + 1 + 6 + 1 + 5 + 1 + 14);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(compile(HELLO_WORLD).unwrap(), compile(HELLO_WORLD).unwrap());
        let broken = "foo a\n:x\n:x\nset pc, y";
        assert_eq!(compile(broken).unwrap(), compile(broken).unwrap());
    }

    #[test]
    fn test_forward_and_backward_references_agree() {
        let forward = words("set pc, target\n:target set a, 1");
        let backward = words("set a, 1\n:target set pc, target");
        assert_eq!(forward, vec![0x7DC1, 0x0002, 0x8401]);
        assert_eq!(backward, vec![0x8401, 0x7DC1, 0x0001]);
    }

    #[test]
    fn test_literal_forms() {
        assert_eq!(words("SET A, 0x30"), vec![0x7C01, 0x0030]);
        assert_eq!(words("SET A, 0x1f"), vec![0xFC01]);
        assert_eq!(words("SET A, 0x20"), vec![0x7C01, 0x0020]);
        assert_eq!(words("SET A, 'A'"), vec![0x7C01, 0x0041]);
        assert_eq!(words("SET A, 65535"), vec![0x7C01, 0xFFFF]);
    }

    #[test]
    fn test_dat() {
        assert_eq!(words("dat 0x41, \"BC\""), vec![0x0041, 0x0042, 0x0043]);
        assert_eq!(words("dat 'x', \"\", 7"), vec![0x0078, 0x0007]);
        assert_eq!(words("dat"), Vec::<u16>::new());
        assert_eq!(words(":here dat here, 1, here"), vec![0x0000, 0x0001, 0x0000]);
        assert_eq!(words("dat 1, 2\n:end dat end"), vec![0x0001, 0x0002, 0x0002]);
        assert_eq!(words("dat 1,"), vec![0x0001]);
    }

    #[test]
    fn test_dat_rejects_non_constants() {
        for source in &["dat a", "dat [1]", "dat pc", "dat 1 2"] {
            let result = compile(source).unwrap();
            assert_eq!(errors(&result).len(), 1, "{}", source);
            assert!(result.image().is_none());
        }
        let result = compile("dat PUSH").unwrap();
        assert_eq!(result.issues()[0].message(), "Arguments to data directive must be constant.");
    }

    #[test]
    fn test_failed_dat_emits_nothing() {
        let mut lines = Vec::new();
        let result = compile_with_listing("dat 1, 2, pop\ndat 3", |_, _, (offset, bytes)| {
            lines.push((offset, bytes.to_vec()));
        }).unwrap();

        assert!(result.has_errors());
        assert_eq!(lines, vec![(0, vec![]), (0, vec![0x00, 0x03])]);
    }

    #[test]
    fn test_operands() {
        assert_eq!(words("set push, pop"), vec![0x1 | 0x1A << 4 | 0x18 << 10]);
        assert_eq!(words("SET PEEK, SP"), vec![0x1 | 0x19 << 4 | 0x1B << 10]);
        assert_eq!(words("set o, pc"), vec![0x1 | 0x1D << 4 | 0x1C << 10]);
        assert_eq!(words("set [B], [0x10 + 'a' + j]"), vec![0x1 | 0x09 << 4 | 0x17 << 10, 0x0071]);
        assert_eq!(words("set [0 + x], 0"), vec![0x1 | 0x0B << 4 | 0x20 << 10]);
        assert_eq!(words("set [0xffff + 2], 0"), vec![0x1 | 0x1E << 4 | 0x20 << 10, 0x0001]);
    }

    #[test]
    fn test_indirect_with_label() {
        assert_eq!(
            words("set a, [tbl + 1 + i]\nset a, [tbl]\n:tbl dat 5"),
            vec![0x1 | 0x16 << 10, 0x0005, 0x1 | 0x1E << 10, 0x0004, 0x0005]
        );
    }

    #[test]
    fn test_case_insensitive_names() {
        assert_eq!(words("sEt a, B"), words("SET A, b"));
        assert_eq!(words("JSR Pc"), vec![0x10 | 0x1C << 10]);
        assert_eq!(words("DaT 1"), vec![0x0001]);
    }

    #[test]
    fn test_labels_are_case_sensitive() {
        let result = compile(":Loop\nset pc, loop").unwrap();
        assert_eq!(
            result.issues(),
            &[
                CodeIssue::warning(0, "Label 'Loop' doesn't have any references."),
                CodeIssue::error(0, "Label 'loop' didn't mark any position."),
            ]
        );
    }

    #[test]
    fn test_several_labels_on_one_line() {
        assert_eq!(words("set a, 0\n:one :two set pc, one\nset pc, two"), vec![0x8001, 0x7DC1, 0x0001, 0x7DC1, 0x0001]);
    }

    #[test]
    fn test_mark_twice() {
        let result = compile(":twice\nset pc, twice\n:twice").unwrap();
        assert_eq!(result.issues(), &[CodeIssue::error(2, "Label 'twice' already marked another position.")]);
        assert!(result.image().is_none());
    }

    #[test]
    fn test_unreferenced_label_warns() {
        let result = compile("set a, 1\n:unused set b, 2").unwrap();
        assert_eq!(result.issues().len(), 1);
        assert_eq!(result.issues()[0].severity(), Severity::Warning);
        assert_eq!(result.issues()[0].line(), 1);
        assert!(result.issues()[0].message().contains("'unused'"));
        assert_eq!(result.words(), Some(vec![0x8401, 0x8811]));
    }

    #[test]
    fn test_unmarked_label_errors() {
        let result = compile("set a, 1\nset pc, nowhere").unwrap();
        assert_eq!(result.issues(), &[CodeIssue::error(0, "Label 'nowhere' didn't mark any position.")]);
        assert!(result.image().is_none());
    }

    #[test]
    fn test_unknown_command() {
        let result = compile("FOO A, B").unwrap();
        assert_eq!(result.issues(), &[CodeIssue::error(0, "Unknown command 'foo'.")]);
        assert!(result.image().is_none());
    }

    #[test]
    fn test_syntax_errors() {
        let cases = &[
            ("set a", "Unexpected token 'Eol', expected 'Comma'."),
            ("jsr a, b", "Unexpected token 'Comma', expected 'Eol'."),
            ("set a, b c", "Unexpected token 'ID', expected 'Eol'."),
            ("1 set a, b", "Unexpected token 'Number', expected 'ID' or 'Eol'."),
            (": 1", "Unexpected token 'Number', expected 'ID'."),
            ("set \"s\", a", "Unexpected token 'String', expected 'Number', 'Char', 'ID' or 'OpenBracket'."),
            ("set [a b], 0", "Unexpected token 'ID', expected 'Plus' or 'CloseBracket'."),
            ("set [], 0", "Unexpected token 'CloseBracket', expected 'Number', 'Char' or 'ID'."),
            ("set [a + b], 0", "Indirect value supports only one register in expression."),
            ("set [x + y], 0", "Indirect value supports only one register in expression."),
            ("set [foo + 1 + bar], 0\n:foo\n:bar", "Indirect value supports only one label in expression."),
            ("set [sp], 0", "'sp' can't be used in an indirect expression."),
            ("set a, 0x1g", "Unexpected token 'ID', expected 'Eol'."),
            ("set a, 99999", "Invalid numeric literal '99999'."),
            ("set a, 'ab'", "End of character literal (') expected."),
            ("dat \"abc", "End of string literal (\") expected."),
            ("set a, $", "Unexpected character '$'."),
        ];

        for (source, message) in cases.iter() {
            let result = compile(source).unwrap();
            let errs = errors(&result);
            assert_eq!(errs.len(), 1, "{}", source);
            assert_eq!(errs[0].message(), *message, "{}", source);
            assert_eq!(errs[0].line(), 0);
            assert!(result.image().is_none());
        }
    }

    #[test]
    fn test_errors_are_reported_per_line() {
        let result = compile("set a, 1\nbogus\nset a\n:l set pc, l\n:l").unwrap();
        let lines: Vec<usize> = result.issues().iter().map(|i| i.line()).collect();
        assert_eq!(lines, vec![1, 2, 4]);
        assert!(result.issues().iter().all(CodeIssue::is_error));
        assert!(result.image().is_none());
    }

    #[test]
    fn test_listing_sees_patched_bytes() {
        let mut seen = Vec::new();
        let result = compile_with_listing("  set pc, end ; go\n\n:end set pc, end", |index, text, (offset, bytes)| {
            seen.push((index, text.to_owned(), offset, bytes.to_vec()));
        }).unwrap();

        assert!(result.issues().is_empty());
        assert_eq!(
            seen,
            vec![
                (0, "  set pc, end ; go".to_owned(), 0, vec![0x7D, 0xC1, 0x00, 0x02]),
                (1, String::new(), 4, vec![]),
                (2, ":end set pc, end".to_owned(), 4, vec![0x7D, 0xC1, 0x00, 0x02]),
            ]
        );
    }

    #[test]
    fn test_listing_runs_even_with_errors() {
        let mut count = 0;
        let result = compile_with_listing("set a, 1\nnope", |_, _, _| count += 1).unwrap();
        assert_eq!(count, 2);
        assert!(result.has_errors());
    }

    #[test]
    fn test_empty_source() {
        let result = compile("").unwrap();
        assert!(result.issues().is_empty());
        assert_eq!(result.words(), Some(vec![]));
    }

    #[test]
    fn test_label_only_and_blank_lines() {
        assert_eq!(words("\n   \n; nothing\n:top\nset pc, top"), vec![0x7DC1, 0x0000]);
    }
}
