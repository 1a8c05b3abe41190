//! Lexical analysis for the C-like source language.
//!
//! [`Lexer`] turns raw source text into a flat [`Token`] stream. It never
//! stops early: malformed input produces a diagnostic (and, for characters
//! matching no rule, a [`TokenKind::Invalid`] token) and scanning carries on,
//! so a single run reports every lexical problem in the file. The stream
//! always ends with exactly one [`TokenKind::Eof`] token stamped with the
//! last line of the input.

use std::fmt;

use thiserror::Error;

/// Token kinds for the C-like language.
///
/// Literal kinds carry their decoded payload in the variant; the raw source
/// text always rides on [`Token::lexeme`].
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Keywords
    KwInt,
    KwFloat,
    KwChar,
    KwVoid,
    KwStruct,
    KwIf,
    KwElse,
    KwWhile,
    KwFor,
    KwReturn,

    // Literals
    IntLiteral(i64),
    FloatLiteral(f64),
    CharLiteral(u8),
    StringLiteral,

    // Identifiers
    Identifier,

    // Arithmetic
    Plus,    // +
    Minus,   // -
    Star,    // *
    Slash,   // /
    Percent, // %

    // Comparison
    EqEq,  // ==
    NotEq, // !=
    Lt,    // <
    Le,    // <=
    Gt,    // >
    Ge,    // >=

    // Logical
    AndAnd, // &&
    OrOr,   // ||
    Not,    // !

    // Assignment
    Assign,      // =
    PlusAssign,  // +=
    MinusAssign, // -=
    StarAssign,  // *=
    SlashAssign, // /=

    // Member access and address-of
    Dot,   // .
    Arrow, // ->
    Amp,   // &

    // Punctuation
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    LBracket,  // [
    RBracket,  // ]
    Semicolon, // ;
    Comma,     // ,

    /// End of input. Exactly one per token stream, always last.
    Eof,

    /// A character that matched no lexical rule. The parser treats it as an
    /// immediate syntax error wherever it shows up.
    Invalid,
}

/// A single lexed token: kind, raw text, and 1-based source line.
///
/// The lexeme is the token's source text, with two exceptions: a string
/// literal's lexeme is its decoded contents without the quotes, and the EOF
/// token's lexeme is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TokenKind::IntLiteral(n) => write!(f, "int literal {}", n),
            TokenKind::FloatLiteral(x) => write!(f, "float literal {}", x),
            TokenKind::CharLiteral(c) => {
                if c.is_ascii_graphic() || *c == b' ' {
                    write!(f, "char literal '{}'", *c as char)
                } else {
                    write!(f, "char literal '\\x{:02x}'", c)
                }
            }
            TokenKind::StringLiteral => write!(f, "string literal \"{}\"", self.lexeme),
            TokenKind::Identifier => write!(f, "identifier '{}'", self.lexeme),
            TokenKind::Eof => write!(f, "end of file"),
            TokenKind::Invalid => write!(f, "invalid token '{}'", self.lexeme),
            _ => write!(f, "'{}'", self.lexeme),
        }
    }
}

/// A lexical diagnostic, anchored to the file and line that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{filename}:{line}: {message}")]
pub struct LexError {
    pub filename: String,
    pub line: usize,
    pub message: String,
}

/// Hand-written scanner over a character buffer.
///
/// All state lives in the value itself; there are no globals, and a `Lexer`
/// can be rerun (each [`Lexer::tokenize`] call resets position, line, and
/// diagnostics).
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    filename: String,
    errors: Vec<LexError>,
}

/// Tokenize a whole source string, returning the token stream and the
/// lexical diagnostics in source order.
pub fn tokenize(source: &str, filename: &str) -> (Vec<Token>, Vec<LexError>) {
    let mut lexer = Lexer::new(source, filename);
    let tokens = lexer.tokenize();
    let errors = std::mem::take(&mut lexer.errors);
    (tokens, errors)
}

impl Lexer {
    /// Create a lexer for the given source text. The filename is only used
    /// to stamp diagnostics.
    pub fn new(source: &str, filename: &str) -> Self {
        Self {
            input: source.chars().collect(),
            position: 0,
            line: 1,
            filename: filename.to_string(),
            errors: Vec::new(),
        }
    }

    /// Scan the entire input into a token stream.
    ///
    /// The returned stream always ends with a single [`TokenKind::Eof`]
    /// token carrying the last line value reached. Diagnostics from the run
    /// are available through [`Lexer::errors`].
    pub fn tokenize(&mut self) -> Vec<Token> {
        self.position = 0;
        self.line = 1;
        self.errors.clear();

        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments();

            if self.is_at_end() {
                break;
            }

            if let Some(token) = self.next_token() {
                tokens.push(token);
            }
        }

        tokens.push(Token::new(TokenKind::Eof, "", self.line));
        tokens
    }

    /// Diagnostics accumulated by the last [`Lexer::tokenize`] run.
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    /// Scan one token. Returns `None` only for a broken string literal,
    /// which produces a diagnostic but no token.
    fn next_token(&mut self) -> Option<Token> {
        let line = self.line;
        let ch = self.advance()?;

        match ch {
            '"' => self.string_literal(line),
            '\'' => Some(self.char_literal(line)),
            '0'..='9' => Some(self.number_literal(ch, line)),
            'a'..='z' | 'A'..='Z' | '_' => Some(self.identifier_or_keyword(ch, line)),
            _ => Some(self.operator_or_invalid(ch, line)),
        }
    }

    /// Scan an operator or punctuation token. Multi-character operators win
    /// over their one-character prefixes.
    fn operator_or_invalid(&mut self, ch: char, line: usize) -> Token {
        match ch {
            '+' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Token::new(TokenKind::PlusAssign, "+=", line)
                } else {
                    Token::new(TokenKind::Plus, "+", line)
                }
            }
            '-' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Token::new(TokenKind::MinusAssign, "-=", line)
                } else if self.peek() == Some('>') {
                    self.advance();
                    Token::new(TokenKind::Arrow, "->", line)
                } else {
                    Token::new(TokenKind::Minus, "-", line)
                }
            }
            '*' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Token::new(TokenKind::StarAssign, "*=", line)
                } else {
                    Token::new(TokenKind::Star, "*", line)
                }
            }
            '/' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Token::new(TokenKind::SlashAssign, "/=", line)
                } else {
                    Token::new(TokenKind::Slash, "/", line)
                }
            }
            '%' => Token::new(TokenKind::Percent, "%", line),
            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Token::new(TokenKind::EqEq, "==", line)
                } else {
                    Token::new(TokenKind::Assign, "=", line)
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Token::new(TokenKind::NotEq, "!=", line)
                } else {
                    Token::new(TokenKind::Not, "!", line)
                }
            }
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Token::new(TokenKind::Le, "<=", line)
                } else {
                    Token::new(TokenKind::Lt, "<", line)
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Token::new(TokenKind::Ge, ">=", line)
                } else {
                    Token::new(TokenKind::Gt, ">", line)
                }
            }
            '&' => {
                if self.peek() == Some('&') {
                    self.advance();
                    Token::new(TokenKind::AndAnd, "&&", line)
                } else {
                    Token::new(TokenKind::Amp, "&", line)
                }
            }
            '|' => {
                // There is no bitwise-or in the language, so a lone '|'
                // matches nothing.
                if self.peek() == Some('|') {
                    self.advance();
                    Token::new(TokenKind::OrOr, "||", line)
                } else {
                    self.invalid_token(ch, line)
                }
            }
            '.' => Token::new(TokenKind::Dot, ".", line),
            '(' => Token::new(TokenKind::LParen, "(", line),
            ')' => Token::new(TokenKind::RParen, ")", line),
            '{' => Token::new(TokenKind::LBrace, "{", line),
            '}' => Token::new(TokenKind::RBrace, "}", line),
            '[' => Token::new(TokenKind::LBracket, "[", line),
            ']' => Token::new(TokenKind::RBracket, "]", line),
            ';' => Token::new(TokenKind::Semicolon, ";", line),
            ',' => Token::new(TokenKind::Comma, ",", line),
            _ => self.invalid_token(ch, line),
        }
    }

    /// Report an unrecognized character and emit an [`TokenKind::Invalid`]
    /// token for it. Scanning continues at the next character.
    fn invalid_token(&mut self, ch: char, line: usize) -> Token {
        let lexeme = ch.to_string();
        self.error(line, format!("invalid token: {}", lexeme));
        Token::new(TokenKind::Invalid, lexeme, line)
    }

    /// Scan a string literal. The opening quote has already been consumed;
    /// `line` is the line it appeared on.
    ///
    /// A newline or end of input before the closing quote reports
    /// `unterminated string literal` anchored at the opening line and yields
    /// no token; scanning resumes after the broken literal.
    fn string_literal(&mut self, line: usize) -> Option<Token> {
        let mut value = String::new();

        loop {
            match self.advance() {
                Some('"') => {
                    return Some(Token::new(TokenKind::StringLiteral, value, line));
                }
                Some('\\') => match self.advance() {
                    Some('\n') | None => {
                        self.error(line, "unterminated string literal".to_string());
                        return None;
                    }
                    Some(escaped) => value.push(unescape(escaped)),
                },
                Some('\n') | None => {
                    self.error(line, "unterminated string literal".to_string());
                    return None;
                }
                Some(ch) => value.push(ch),
            }
        }
    }

    /// Scan a character literal (`'x'` or `'\x'`). The opening quote has
    /// already been consumed.
    ///
    /// A quote that does not complete a literal is reported as an invalid
    /// token by itself, and scanning resumes at the character after it.
    fn char_literal(&mut self, line: usize) -> Token {
        match self.peek() {
            Some('\\') => {
                if let (Some(escaped), Some('\'')) = (self.peek_ahead(1), self.peek_ahead(2)) {
                    if escaped != '\n' {
                        self.advance();
                        self.advance();
                        self.advance();
                        let value = unescape(escaped) as u8;
                        return Token::new(
                            TokenKind::CharLiteral(value),
                            format!("'\\{}'", escaped),
                            line,
                        );
                    }
                }
                self.invalid_token('\'', line)
            }
            Some(ch) if ch != '\'' && ch != '\n' => {
                if self.peek_ahead(1) == Some('\'') {
                    self.advance();
                    self.advance();
                    return Token::new(TokenKind::CharLiteral(ch as u8), format!("'{}'", ch), line);
                }
                self.invalid_token('\'', line)
            }
            _ => self.invalid_token('\'', line),
        }
    }

    /// Scan a numeric literal. A decimal point followed by a digit, or an
    /// exponent suffix, makes it a float; everything else is an integer.
    fn number_literal(&mut self, first_digit: char, line: usize) -> Token {
        let mut text = String::new();
        text.push(first_digit);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let mut is_float = false;

        if self.peek() == Some('.') && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            text.push('.');
            self.advance();
            while let Some(ch) = self.peek() {
                if ch.is_ascii_digit() {
                    text.push(ch);
                    self.advance();
                } else {
                    break;
                }
            }
        }

        if matches!(self.peek(), Some('e') | Some('E')) {
            let after_sign = if matches!(self.peek_ahead(1), Some('+') | Some('-')) {
                2
            } else {
                1
            };
            if self.peek_ahead(after_sign).is_some_and(|c| c.is_ascii_digit()) {
                is_float = true;
                for _ in 0..after_sign {
                    if let Some(ch) = self.advance() {
                        text.push(ch);
                    }
                }
                while let Some(ch) = self.peek() {
                    if ch.is_ascii_digit() {
                        text.push(ch);
                        self.advance();
                    } else {
                        break;
                    }
                }
            }
        }

        if is_float {
            // Overflow goes to infinity, as strtod would.
            let value = text.parse::<f64>().unwrap_or(f64::INFINITY);
            Token::new(TokenKind::FloatLiteral(value), text, line)
        } else {
            // A digit run only fails i64 parsing on overflow; saturate.
            let value = text.parse::<i64>().unwrap_or(i64::MAX);
            Token::new(TokenKind::IntLiteral(value), text, line)
        }
    }

    /// Scan an identifier, then check it against the keyword set.
    fn identifier_or_keyword(&mut self, first_char: char, line: usize) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = match ident.as_str() {
            "int" => TokenKind::KwInt,
            "float" => TokenKind::KwFloat,
            "char" => TokenKind::KwChar,
            "void" => TokenKind::KwVoid,
            "struct" => TokenKind::KwStruct,
            "if" => TokenKind::KwIf,
            "else" => TokenKind::KwElse,
            "while" => TokenKind::KwWhile,
            "for" => TokenKind::KwFor,
            "return" => TokenKind::KwReturn,
            _ => TokenKind::Identifier,
        };

        Token::new(kind, ident, line)
    }

    /// Skip whitespace and both comment forms.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.advance();
                }
                Some('/') => {
                    if self.peek_ahead(1) == Some('/') {
                        self.skip_line_comment();
                    } else if self.peek_ahead(1) == Some('*') {
                        self.skip_block_comment();
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
    }

    /// Skip a `// ...` comment through the end of the line.
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.advance() {
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip a `/* ... */` comment. Hitting end of input first reports
    /// `unterminated block comment` anchored at the line of the opening
    /// `/*`.
    fn skip_block_comment(&mut self) {
        let start_line = self.line;
        self.advance(); // '/'
        self.advance(); // '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance();
                self.advance();
                return;
            }
            self.advance();
        }

        self.error(start_line, "unterminated block comment".to_string());
    }

    fn error(&mut self, line: usize, message: String) {
        self.errors.push(LexError {
            filename: self.filename.clone(),
            line,
            message,
        });
    }

    /// Peek at the current character without consuming it.
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek `n` characters past the current one.
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Consume one character, advancing the line counter on newlines.
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        if ch == '\n' {
            self.line += 1;
        }
        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }
}

/// Decode one escaped character; anything outside the known set stands for
/// itself.
fn unescape(ch: char) -> char {
    match ch {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '0' => '\0',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let (tokens, _) = tokenize(source, "test.c");
        tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_tokens() {
        let (tokens, errors) = tokenize("int main() { return 0; }", "test.c");

        assert!(errors.is_empty());
        assert!(matches!(tokens[0].kind, TokenKind::KwInt));
        assert!(matches!(tokens[1].kind, TokenKind::Identifier));
        assert_eq!(tokens[1].lexeme, "main");
        assert!(matches!(tokens[2].kind, TokenKind::LParen));
        assert!(matches!(tokens[3].kind, TokenKind::RParen));
        assert!(matches!(tokens[4].kind, TokenKind::LBrace));
        assert!(matches!(tokens[5].kind, TokenKind::KwReturn));
        assert!(matches!(tokens[6].kind, TokenKind::IntLiteral(0)));
        assert!(matches!(tokens[7].kind, TokenKind::Semicolon));
        assert!(matches!(tokens[8].kind, TokenKind::RBrace));
        assert!(matches!(tokens[9].kind, TokenKind::Eof));
    }

    #[test]
    fn test_longest_match_operators() {
        assert_eq!(
            kinds("== != <= >= && || += -= *= /= ->"),
            vec![
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::Le,
                TokenKind::Ge,
                TokenKind::AndAnd,
                TokenKind::OrOr,
                TokenKind::PlusAssign,
                TokenKind::MinusAssign,
                TokenKind::StarAssign,
                TokenKind::SlashAssign,
                TokenKind::Arrow,
                TokenKind::Eof,
            ]
        );

        // With a space in between, the single-character tokens win.
        assert_eq!(
            kinds("< ="),
            vec![TokenKind::Lt, TokenKind::Assign, TokenKind::Eof]
        );
    }

    #[test]
    fn test_keywords_need_exact_match() {
        let (tokens, _) = tokenize("for forever int intx", "test.c");

        assert!(matches!(tokens[0].kind, TokenKind::KwFor));
        assert!(matches!(tokens[1].kind, TokenKind::Identifier));
        assert_eq!(tokens[1].lexeme, "forever");
        assert!(matches!(tokens[2].kind, TokenKind::KwInt));
        assert!(matches!(tokens[3].kind, TokenKind::Identifier));
        assert_eq!(tokens[3].lexeme, "intx");
    }

    #[test]
    fn test_number_literals() {
        assert_eq!(
            kinds("42 3.5 1e3 25e-2 7."),
            vec![
                TokenKind::IntLiteral(42),
                TokenKind::FloatLiteral(3.5),
                TokenKind::FloatLiteral(1000.0),
                TokenKind::FloatLiteral(0.25),
                TokenKind::IntLiteral(7),
                TokenKind::Dot,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_escapes() {
        let (tokens, errors) = tokenize(r#""a\nb" '\t' '\q'"#, "test.c");

        assert!(errors.is_empty());
        assert!(matches!(tokens[0].kind, TokenKind::StringLiteral));
        assert_eq!(tokens[0].lexeme, "a\nb");
        assert!(matches!(tokens[1].kind, TokenKind::CharLiteral(b'\t')));
        // Unknown escapes stand for themselves.
        assert!(matches!(tokens[2].kind, TokenKind::CharLiteral(b'q')));
    }

    #[test]
    fn test_invalid_character_keeps_scanning() {
        let (tokens, errors) = tokenize("a | b", "test.c");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "invalid token: |");
        assert!(matches!(tokens[1].kind, TokenKind::Invalid));
        assert_eq!(tokens[2].lexeme, "b");
    }

    #[test]
    fn test_broken_char_literal_recovers_after_quote() {
        let (tokens, errors) = tokenize("'ab' x", "test.c");

        assert_eq!(errors[0].message, "invalid token: '");
        assert!(matches!(tokens[0].kind, TokenKind::Invalid));
        // Scanning picked up again at the 'a'.
        assert!(matches!(tokens[1].kind, TokenKind::Identifier));
        assert_eq!(tokens[1].lexeme, "ab");
    }

    #[test]
    fn test_line_tracking_through_comments() {
        let (tokens, errors) = tokenize("int x; // one\n/* two\nlines */\nreturn x;", "test.c");

        assert!(errors.is_empty());
        assert_eq!(tokens[0].line, 1);
        let ret = tokens
            .iter()
            .find(|t| matches!(t.kind, TokenKind::KwReturn))
            .unwrap();
        assert_eq!(ret.line, 4);
    }

    #[test]
    fn test_eof_token_carries_last_line() {
        let (tokens, _) = tokenize("int x;\n\n", "test.c");

        let eof = tokens.last().unwrap();
        assert!(matches!(eof.kind, TokenKind::Eof));
        assert_eq!(eof.lexeme, "");
        assert_eq!(eof.line, 3);
    }
}
