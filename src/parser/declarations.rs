//! Top-level declaration parsing.
//!
//! A translation unit is a sequence of struct declarations, function
//! definitions or prototypes, and global variables. Functions and globals
//! share a common prefix (`type identifier`), so both are parsed through
//! one entry point that branches on the token after the name.
//!
//! # Grammar
//!
//! ```text
//! declaration  ::= struct_decl | function_decl | var_decl
//! struct_decl  ::= "struct" identifier "{" field* "}" ";"
//! field        ::= type identifier ";"
//! function_decl ::= type identifier "(" params ")" (compound_stmt | ";")
//! params       ::= "" | "void" | type identifier ("," type identifier)*
//! var_decl     ::= type identifier ("=" expression)? ";"
//! type         ::= "int" | "float" | "char" | "void" | "struct" identifier
//! ```

use crate::ast::{AstNode, FieldDecl, ParamDecl, TypeInfo};
use crate::lexer::TokenKind;
use crate::parser::{ParseResult, Parser};

impl Parser {
    /// Parse one top-level declaration.
    ///
    /// `struct` is ambiguous at the top level: `struct Point { ... };`
    /// declares a type, while `struct Point origin();` uses one. Two tokens
    /// of lookahead settle it without consuming anything.
    pub(crate) fn parse_top_level_declaration(&mut self) -> ParseResult<AstNode> {
        if self.check(&TokenKind::KwStruct)
            && matches!(self.peek_ahead(1).map(|t| &t.kind), Some(TokenKind::Identifier))
            && matches!(self.peek_ahead(2).map(|t| &t.kind), Some(TokenKind::LBrace))
        {
            return self.parse_struct_declaration();
        }

        let line = self.peek().line;
        let ty = self.parse_type()?;
        let name = self.expect_identifier()?;

        if self.check(&TokenKind::LParen) {
            self.parse_function_declaration(name, ty, line)
        } else {
            self.parse_variable_declaration(name, ty, line)
        }
    }

    /// Parse `struct Name { fields };`, recovering after each broken field.
    pub(crate) fn parse_struct_declaration(&mut self) -> ParseResult<AstNode> {
        let line = self.peek().line;
        self.advance(); // struct
        let name = self.expect_identifier()?;
        self.expect(&TokenKind::LBrace, "expected '{' after struct name")?;

        let mut fields = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            match self.parse_field() {
                Ok(field) => fields.push(field),
                Err(err) => {
                    self.errors.push(err);
                    self.synchronize();
                }
            }
        }

        self.expect(&TokenKind::RBrace, "expected '}' after struct fields")?;
        self.expect(&TokenKind::Semicolon, "expected ';' after struct declaration")?;

        Ok(AstNode::StructDecl { name, fields, line })
    }

    fn parse_field(&mut self) -> ParseResult<FieldDecl> {
        let ty = self.parse_type()?;
        let name = self.expect_identifier()?;
        self.expect(&TokenKind::Semicolon, "expected ';' after struct field")?;
        Ok(FieldDecl { name, ty })
    }

    /// Parse the remainder of a function once `type name` has been consumed
    /// and the cursor sits on `(`. A `;` in place of the body makes this a
    /// prototype.
    fn parse_function_declaration(
        &mut self,
        name: String,
        return_type: TypeInfo,
        line: usize,
    ) -> ParseResult<AstNode> {
        self.advance(); // (
        let params = self.parse_parameter_list()?;
        self.expect(&TokenKind::RParen, "expected ')' after parameter list")?;

        let body = if self.match_token(&TokenKind::Semicolon) {
            None
        } else {
            Some(Box::new(self.parse_compound_statement()?))
        };

        Ok(AstNode::FunctionDecl {
            name,
            return_type,
            params,
            body,
            line,
        })
    }

    fn parse_parameter_list(&mut self) -> ParseResult<Vec<ParamDecl>> {
        if self.check(&TokenKind::RParen) {
            return Ok(Vec::new());
        }

        // `(void)` declares an empty parameter list.
        if self.check(&TokenKind::KwVoid)
            && matches!(self.peek_ahead(1).map(|t| &t.kind), Some(TokenKind::RParen))
        {
            self.advance();
            return Ok(Vec::new());
        }

        let mut params = Vec::new();
        loop {
            let ty = self.parse_type()?;
            let name = self.expect_identifier()?;
            params.push(ParamDecl { name, ty });

            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }

        Ok(params)
    }

    /// Parse a type name. Struct types read the tag and carry it as
    /// `struct Name` so `lookup` keys stay plain strings.
    pub(crate) fn parse_type(&mut self) -> ParseResult<TypeInfo> {
        match self.peek().kind {
            TokenKind::KwInt | TokenKind::KwFloat | TokenKind::KwChar | TokenKind::KwVoid => {
                let token = self.advance();
                Ok(TypeInfo::new(token.lexeme))
            }
            TokenKind::KwStruct => {
                self.advance();
                let name = self.expect_identifier()?;
                Ok(TypeInfo::new(format!("struct {}", name)))
            }
            _ => Err(self.error_here(format!("expected type name, found {}", self.peek()))),
        }
    }

    /// Parse the remainder of a variable declaration once `type name` has
    /// been consumed: an optional initializer, then `;`.
    pub(crate) fn parse_variable_declaration(
        &mut self,
        name: String,
        ty: TypeInfo,
        line: usize,
    ) -> ParseResult<AstNode> {
        let init = if self.match_token(&TokenKind::Assign) {
            Some(Box::new(self.parse_expression()?))
        } else {
            None
        };

        self.expect(&TokenKind::Semicolon, "expected ';' after variable declaration")?;

        Ok(AstNode::VarDecl {
            name,
            ty,
            init,
            line,
        })
    }
}
