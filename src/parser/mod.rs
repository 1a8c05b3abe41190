//! Parser coordination and shared state.
//!
//! [`Parser`] drives a two-stage front end: the whole input is tokenized
//! first, then a single left-to-right recursive-descent pass builds the
//! tree. Lexical diagnostics are folded into the parser's error list ahead
//! of the syntactic ones, and a tree is returned only when the combined
//! list stays empty.
//!
//! Grammar methods are split across `impl Parser` blocks:
//! - `declarations`: top-level declarations, types, parameter lists
//! - `statements`: statement forms and blocks
//! - `expressions`: precedence-climbing expression parsing
//!
//! On a syntax error the parser reports a diagnostic, then synchronizes by
//! discarding tokens to a statement boundary and resumes with the next
//! construct, so a single run reports several independent problems instead
//! of stopping at the first one.

mod declarations;
mod expressions;
mod statements;

use thiserror::Error;

use crate::ast::TranslationUnit;
use crate::lexer::{Lexer, Token, TokenKind};

/// A syntactic diagnostic, anchored to the file and line that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{filename}:{line}: {message}")]
pub struct ParseError {
    pub filename: String,
    pub line: usize,
    pub message: String,
}

pub(crate) type ParseResult<T> = Result<T, ParseError>;

/// Recursive-descent parser over a buffered token stream.
///
/// All state is owned by the value: the token buffer, the cursor, and the
/// accumulated diagnostics. A `Parser` is reusable; every [`Parser::parse`]
/// call resets it.
#[derive(Debug, Default)]
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    filename: String,
    last_line: usize,
    errors: Vec<ParseError>,
}

/// Parse a whole source string, returning the tree (only when the input is
/// clean) and every diagnostic: lexical first, then syntactic.
pub fn parse(source: &str, filename: &str) -> (Option<TranslationUnit>, Vec<ParseError>) {
    let mut parser = Parser::new();
    let unit = parser.parse(source, filename);
    let errors = std::mem::take(&mut parser.errors);
    (unit, errors)
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize and parse one source file.
    ///
    /// Lexical diagnostics are converted into [`ParseError`]s (same file,
    /// line, and message) before any syntactic ones, and parsing runs over
    /// the token stream even when lexing already failed, so everything wrong
    /// with the input is reported in one pass. Returns the tree iff no
    /// diagnostic of either kind was recorded; a failed parse never yields a
    /// partial tree.
    pub fn parse(&mut self, source: &str, filename: &str) -> Option<TranslationUnit> {
        let mut lexer = Lexer::new(source, filename);
        self.tokens = lexer.tokenize();
        self.errors.clear();
        for err in lexer.errors() {
            self.errors.push(ParseError {
                filename: err.filename.clone(),
                line: err.line,
                message: err.message.clone(),
            });
        }
        self.position = 0;
        self.last_line = 1;
        self.filename = filename.to_string();

        let unit = self.translation_unit();

        if self.errors.is_empty() {
            Some(unit)
        } else {
            None
        }
    }

    /// Diagnostics accumulated by the last [`Parser::parse`] call.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Parse the top-level declaration list, recovering after each failed
    /// declaration.
    fn translation_unit(&mut self) -> TranslationUnit {
        let mut decls = Vec::new();

        while !self.is_at_end() {
            match self.parse_top_level_declaration() {
                Ok(decl) => decls.push(decl),
                Err(err) => {
                    self.errors.push(err);
                    self.synchronize();
                }
            }
        }

        TranslationUnit { decls, line: 1 }
    }

    // ===== Cursor helpers =====

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    /// Consume and return the current token. The EOF token is never
    /// consumed, so the cursor always stays on a valid token.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.tokens[self.position].clone();
        if !matches!(token.kind, TokenKind::Eof) {
            self.last_line = token.line;
            self.position += 1;
        }
        token
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    pub(crate) fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn is_type_keyword(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::KwInt
                | TokenKind::KwFloat
                | TokenKind::KwChar
                | TokenKind::KwVoid
                | TokenKind::KwStruct
        )
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind, message: &str) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_here(format!("{}, found {}", message, self.peek())))
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> ParseResult<String> {
        if matches!(self.peek().kind, TokenKind::Identifier) {
            Ok(self.advance().lexeme)
        } else {
            Err(self.error_here(format!("expected identifier, found {}", self.peek())))
        }
    }

    /// Build a diagnostic at the current token, or at the last consumed
    /// token's line when the failure is at end of input.
    pub(crate) fn error_here(&self, message: String) -> ParseError {
        let line = if self.is_at_end() {
            self.last_line
        } else {
            self.peek().line
        };
        ParseError {
            filename: self.filename.clone(),
            line,
            message,
        }
    }

    /// Panic-mode recovery: drop the offending token, then everything up to
    /// a statement boundary. A `;` is consumed with the broken construct; a
    /// `}` is left in place so the enclosing block can still close.
    pub(crate) fn synchronize(&mut self) {
        if matches!(self.advance().kind, TokenKind::Semicolon) {
            return;
        }

        while !self.is_at_end() {
            match self.peek().kind {
                TokenKind::Semicolon => {
                    self.advance();
                    return;
                }
                TokenKind::RBrace => return,
                _ => {
                    self.advance();
                }
            }
        }
    }
}
