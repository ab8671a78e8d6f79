//! This lexer tokenizes DCPU-16 assembly, one line at a time.
//!
//! A fresh `Lexer` is built for every source line, so no token ever
//! spans two lines. The end of the line and a `;` comment both read
//! as `Token::Eol`, and keep doing so on every further call.
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use super::error::SyntaxError;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Token {
    Number(u16),
    /// Identifier with its case preserved.
    Id(String),
    /// Character literal, already narrowed to a word.
    Char(u16),
    Str(String),
    Comma,
    Colon,
    Plus,
    OpenBracket,
    CloseBracket,
    Eol,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Number(_)    => TokenKind::Number,
            Token::Id(_)        => TokenKind::Id,
            Token::Char(_)      => TokenKind::Char,
            Token::Str(_)       => TokenKind::Str,
            Token::Comma        => TokenKind::Comma,
            Token::Colon        => TokenKind::Colon,
            Token::Plus         => TokenKind::Plus,
            Token::OpenBracket  => TokenKind::OpenBracket,
            Token::CloseBracket => TokenKind::CloseBracket,
            Token::Eol          => TokenKind::Eol,
        }
    }
}

/// Value-less token tags, used in diagnostics.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TokenKind {
    Number,
    Id,
    Char,
    Str,
    Comma,
    Colon,
    Plus,
    OpenBracket,
    CloseBracket,
    Eol,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TokenKind::Number       => "Number",
            TokenKind::Id           => "ID",
            TokenKind::Char         => "Char",
            TokenKind::Str          => "String",
            TokenKind::Comma        => "Comma",
            TokenKind::Colon        => "Colon",
            TokenKind::Plus         => "Plus",
            TokenKind::OpenBracket  => "OpenBracket",
            TokenKind::CloseBracket => "CloseBracket",
            TokenKind::Eol          => "Eol",
        };
        f.write_str(name)
    }
}

pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(line: &'a str) -> Self {
        Lexer { chars: line.chars().peekable() }
    }

    /// Reads the next token off the line.
    pub fn read(&mut self) -> Result<Token, SyntaxError> {
        self.skip_spaces();

        let c = match self.chars.next() {
            Some(c) => c,
            None => return Ok(Token::Eol),
        };

        match c {
            ';' => {
                // The rest of the line is a comment.
                while self.chars.next().is_some() {}
                Ok(Token::Eol)
            },
            '0'..='9' => self.number(c),
            c if is_ident_start(c) => Ok(self.identifier(c)),
            '\'' => self.character(),
            '"' => self.string(),
            ',' => Ok(Token::Comma),
            ':' => Ok(Token::Colon),
            '+' => Ok(Token::Plus),
            '[' => Ok(Token::OpenBracket),
            ']' => Ok(Token::CloseBracket),
            _ => Err(SyntaxError::UnexpectedChar(c)),
        }
    }

    fn skip_spaces(&mut self) {
        while self.chars.next_if(|c| c.is_whitespace()).is_some() {}
    }

    fn number(&mut self, first: char) -> Result<Token, SyntaxError> {
        let hex = first == '0' && self.chars.next_if_eq(&'x').is_some();

        let mut digits = String::new();
        if !hex {
            digits.push(first);
        }
        // Hex letters are swallowed in decimal mode as well so that
        // `12ab` is rejected instead of splitting into `12` and `ab`.
        while let Some(c) = self.chars.next_if(|c| c.is_ascii_hexdigit()) {
            digits.push(c);
        }

        let radix = if hex { 16 } else { 10 };
        match u16::from_str_radix(&digits, radix) {
            Ok(val) => Ok(Token::Number(val)),
            Err(_) => Err(SyntaxError::InvalidNumber(
                if hex { format!("0x{}", digits) } else { digits }
            )),
        }
    }

    fn identifier(&mut self, first: char) -> Token {
        let mut id = String::new();
        id.push(first);
        while let Some(c) = self.chars.next_if(|&c| is_ident_start(c) || c.is_ascii_digit()) {
            id.push(c);
        }
        Token::Id(id)
    }

    fn character(&mut self) -> Result<Token, SyntaxError> {
        let c = self.escaped_char()?;
        if self.chars.next_if_eq(&'\'').is_none() {
            return Err(SyntaxError::UnterminatedChar);
        }

        let code = c as u32;
        if code > u16::MAX as u32 {
            return Err(SyntaxError::CharOutOfRange(c));
        }
        Ok(Token::Char(code as u16))
    }

    fn string(&mut self) -> Result<Token, SyntaxError> {
        let mut s = String::new();
        while let Some(&c) = self.chars.peek() {
            if c == '"' {
                break;
            }
            s.push(self.escaped_char()?);
        }

        if self.chars.next_if_eq(&'"').is_none() {
            return Err(SyntaxError::UnterminatedString);
        }
        Ok(Token::Str(s))
    }

    /// Reads one character of a char or string literal, resolving escapes.
    fn escaped_char(&mut self) -> Result<char, SyntaxError> {
        let c = self.chars.next().ok_or(SyntaxError::UnexpectedEol)?;
        if c != '\\' {
            return Ok(c);
        }

        match self.chars.next().ok_or(SyntaxError::UnexpectedEol)? {
            'n'  => Ok('\n'),
            'r'  => Ok('\r'),
            't'  => Ok('\t'),
            'v'  => Ok('\x0B'),
            '\\' => Ok('\\'),
            '\'' => Ok('\''),
            '"'  => Ok('"'),
            other => Err(SyntaxError::BadEscape(other)),
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}
