//! Tokenizer for Go model sources.
//!
//! Produces just enough structure for the declaration parser: identifiers,
//! literals, single-character punctuation and significant newlines. Comments
//! are dropped; a block comment spanning lines still yields a newline.

use crate::error::ParseError;
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

/// Token kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier or keyword.
    Ident(String),
    /// Single punctuation character.
    Punct(char),
    /// Interpreted string literal, quotes included.
    Str(String),
    /// Raw string literal, backticks included.
    RawStr(String),
    /// Rune literal, quotes included.
    Rune(String),
    /// Numeric literal.
    Number(String),
    /// End of line (statement separator).
    Newline,
}

/// Token with its source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token kind and text.
    pub kind: TokenKind,
    /// 1-based source line.
    pub line: usize,
}

impl Token {
    /// Returns the identifier text, if this is an identifier.
    #[must_use]
    pub fn ident(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Ident(name) => Some(name),
            _ => None,
        }
    }

    /// Returns true if this is the given punctuation character.
    #[must_use]
    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct(c)
    }

    /// Returns true if this is the given keyword or identifier.
    #[must_use]
    pub fn is_ident(&self, name: &str) -> bool {
        self.ident() == Some(name)
    }

    /// Returns true for a newline or `;` separator.
    #[must_use]
    pub fn is_separator(&self) -> bool {
        matches!(self.kind, TokenKind::Newline | TokenKind::Punct(';'))
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(s) | Self::Str(s) | Self::RawStr(s) | Self::Rune(s) | Self::Number(s) => {
                f.write_str(s)
            }
            Self::Punct(c) => write!(f, "{c}"),
            Self::Newline => f.write_str("newline"),
        }
    }
}

/// Splits Go source text into tokens.
///
/// # Errors
/// Returns `ParseError` for unterminated string literals or block comments.
pub fn tokenize(src: &str) -> Result<Vec<Token>, ParseError> {
    Lexer::new(src).run()
}

const BYTE_ORDER_MARK: char = '\u{feff}';

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        let mut chars = src.chars().peekable();
        chars.next_if_eq(&BYTE_ORDER_MARK);
        Self {
            chars,
            line: 1,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>, ParseError> {
        while let Some(c) = self.chars.next() {
            match c {
                '\n' => {
                    self.push(TokenKind::Newline, self.line);
                    self.line += 1;
                }
                c if c.is_whitespace() => {}
                '/' if self.chars.peek() == Some(&'/') => self.skip_line_comment(),
                '/' if self.chars.peek() == Some(&'*') => self.skip_block_comment()?,
                '"' => self.lex_string()?,
                '`' => self.lex_raw_string()?,
                '\'' => self.lex_rune()?,
                c if c.is_alphabetic() || c == '_' => {
                    let text = self.take_while(c, |c| c.is_alphanumeric() || c == '_');
                    self.push(TokenKind::Ident(text), self.line);
                }
                c if c.is_ascii_digit() => {
                    let text = self.take_while(c, |c| c.is_alphanumeric() || c == '.' || c == '_');
                    self.push(TokenKind::Number(text), self.line);
                }
                c => self.push(TokenKind::Punct(c), self.line),
            }
        }
        Ok(self.tokens)
    }

    fn push(&mut self, kind: TokenKind, line: usize) {
        self.tokens.push(Token { kind, line });
    }

    fn take_while(&mut self, first: char, pred: impl Fn(char) -> bool) -> String {
        let mut text = String::from(first);
        while let Some(&c) = self.chars.peek() {
            if !pred(c) {
                break;
            }
            text.push(c);
            self.chars.next();
        }
        text
    }

    fn skip_line_comment(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if c == '\n' {
                break;
            }
            self.chars.next();
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), ParseError> {
        let start = self.line;
        self.chars.next();
        let mut spans_lines = false;
        let mut prev = '\0';
        loop {
            let Some(c) = self.chars.next() else {
                return Err(ParseError::UnterminatedComment { line: start });
            };
            if c == '\n' {
                self.line += 1;
                spans_lines = true;
            }
            if prev == '*' && c == '/' {
                break;
            }
            prev = c;
        }
        if spans_lines {
            self.push(TokenKind::Newline, self.line);
        }
        Ok(())
    }

    fn lex_quoted(&mut self, quote: char) -> Result<String, ParseError> {
        let start = self.line;
        let mut text = String::from(quote);
        loop {
            match self.chars.next() {
                None | Some('\n') => return Err(ParseError::UnterminatedString { line: start }),
                Some('\\') => {
                    text.push('\\');
                    match self.chars.next() {
                        None | Some('\n') => {
                            return Err(ParseError::UnterminatedString { line: start });
                        }
                        Some(escaped) => text.push(escaped),
                    }
                }
                Some(c) => {
                    text.push(c);
                    if c == quote {
                        return Ok(text);
                    }
                }
            }
        }
    }

    fn lex_string(&mut self) -> Result<(), ParseError> {
        let line = self.line;
        let text = self.lex_quoted('"')?;
        self.push(TokenKind::Str(text), line);
        Ok(())
    }

    fn lex_rune(&mut self) -> Result<(), ParseError> {
        let line = self.line;
        let text = self.lex_quoted('\'')?;
        self.push(TokenKind::Rune(text), line);
        Ok(())
    }

    fn lex_raw_string(&mut self) -> Result<(), ParseError> {
        let start = self.line;
        let mut text = String::from('`');
        loop {
            match self.chars.next() {
                None => return Err(ParseError::UnterminatedString { line: start }),
                Some('`') => {
                    text.push('`');
                    break;
                }
                Some(c) => {
                    if c == '\n' {
                        self.line += 1;
                    }
                    text.push(c);
                }
            }
        }
        self.push(TokenKind::RawStr(text), start);
        Ok(())
    }
}
