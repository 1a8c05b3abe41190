//! Statement parsing.
//!
//! # Grammar
//!
//! ```text
//! statement     ::= compound_stmt | if_stmt | while_stmt | for_stmt
//!                 | return_stmt | var_decl | expr_stmt
//! compound_stmt ::= "{" statement* "}"
//! if_stmt       ::= "if" "(" expression ")" statement ("else" statement)?
//! while_stmt    ::= "while" "(" expression ")" statement
//! for_stmt      ::= "for" "(" for_init? ";"? expression? ";" expression? ")" statement
//! for_init      ::= var_decl | expression ";"
//! return_stmt   ::= "return" expression? ";"
//! expr_stmt     ::= expression ";"
//! ```
//!
//! Blocks recover per statement: a broken statement is reported and skipped,
//! then the rest of the block is still parsed, so one pass surfaces every
//! independent problem in a function body.

use crate::ast::AstNode;
use crate::lexer::TokenKind;
use crate::parser::{ParseResult, Parser};

impl Parser {
    pub(crate) fn parse_statement(&mut self) -> ParseResult<AstNode> {
        if self.check(&TokenKind::LBrace) {
            self.parse_compound_statement()
        } else if self.check(&TokenKind::KwIf) {
            self.parse_if_statement()
        } else if self.check(&TokenKind::KwWhile) {
            self.parse_while_statement()
        } else if self.check(&TokenKind::KwFor) {
            self.parse_for_statement()
        } else if self.check(&TokenKind::KwReturn) {
            self.parse_return_statement()
        } else if self.is_type_keyword() {
            self.parse_local_declaration()
        } else {
            self.parse_expression_statement()
        }
    }

    /// Parse `{ statement* }`, recovering after each failed statement.
    pub(crate) fn parse_compound_statement(&mut self) -> ParseResult<AstNode> {
        let line = self.peek().line;
        self.expect(&TokenKind::LBrace, "expected '{'")?;

        let mut stmts = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            match self.parse_statement() {
                Ok(stmt) => stmts.push(stmt),
                Err(err) => {
                    self.errors.push(err);
                    self.synchronize();
                }
            }
        }

        self.expect(&TokenKind::RBrace, "expected '}' to close block")?;

        Ok(AstNode::CompoundStmt { stmts, line })
    }

    fn parse_if_statement(&mut self) -> ParseResult<AstNode> {
        let line = self.peek().line;
        self.advance(); // if
        self.expect(&TokenKind::LParen, "expected '(' after 'if'")?;
        let cond = Box::new(self.parse_expression()?);
        self.expect(&TokenKind::RParen, "expected ')' after condition")?;

        let then_branch = Box::new(self.parse_statement()?);

        // The else binds to the nearest unmatched if.
        let else_branch = if self.match_token(&TokenKind::KwElse) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(AstNode::IfStmt {
            cond,
            then_branch,
            else_branch,
            line,
        })
    }

    fn parse_while_statement(&mut self) -> ParseResult<AstNode> {
        let line = self.peek().line;
        self.advance(); // while
        self.expect(&TokenKind::LParen, "expected '(' after 'while'")?;
        let cond = Box::new(self.parse_expression()?);
        self.expect(&TokenKind::RParen, "expected ')' after condition")?;
        let body = Box::new(self.parse_statement()?);

        Ok(AstNode::WhileStmt { cond, body, line })
    }

    /// Parse a for loop. All three clauses are optional; the initializer may
    /// be a declaration (which consumes its own `;`) or an expression.
    fn parse_for_statement(&mut self) -> ParseResult<AstNode> {
        let line = self.peek().line;
        self.advance(); // for
        self.expect(&TokenKind::LParen, "expected '(' after 'for'")?;

        let init = if self.match_token(&TokenKind::Semicolon) {
            None
        } else if self.is_type_keyword() {
            Some(Box::new(self.parse_local_declaration()?))
        } else {
            let expr = self.parse_expression()?;
            self.expect(&TokenKind::Semicolon, "expected ';' after loop initializer")?;
            Some(Box::new(expr))
        };

        let cond = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };
        self.expect(&TokenKind::Semicolon, "expected ';' after loop condition")?;

        let incr = if self.check(&TokenKind::RParen) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };
        self.expect(&TokenKind::RParen, "expected ')' after loop clauses")?;

        let body = Box::new(self.parse_statement()?);

        Ok(AstNode::ForStmt {
            init,
            cond,
            incr,
            body,
            line,
        })
    }

    fn parse_return_statement(&mut self) -> ParseResult<AstNode> {
        let line = self.peek().line;
        self.advance(); // return

        let value = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };

        self.expect(&TokenKind::Semicolon, "expected ';' after return statement")?;

        Ok(AstNode::ReturnStmt { value, line })
    }

    pub(crate) fn parse_local_declaration(&mut self) -> ParseResult<AstNode> {
        let line = self.peek().line;
        let ty = self.parse_type()?;
        let name = self.expect_identifier()?;
        self.parse_variable_declaration(name, ty, line)
    }

    fn parse_expression_statement(&mut self) -> ParseResult<AstNode> {
        let line = self.peek().line;
        let expr = Box::new(self.parse_expression()?);
        self.expect(&TokenKind::Semicolon, "expected ';' after expression")?;

        Ok(AstNode::ExprStmt { expr, line })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::AstNode;
    use crate::parser::parse;

    fn body_of(source: &str) -> Vec<AstNode> {
        let (unit, errors) = parse(source, "test.c");
        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
        let mut unit = unit.unwrap();
        match unit.decls.remove(0) {
            AstNode::FunctionDecl { body: Some(body), .. } => match *body {
                AstNode::CompoundStmt { stmts, .. } => stmts,
                other => panic!("expected compound body, got {:?}", other),
            },
            other => panic!("expected function with body, got {:?}", other),
        }
    }

    #[test]
    fn test_dangling_else_binds_to_nearest_if() {
        let stmts = body_of("void f() { if (a) if (b) x = 1; else x = 2; }");

        match &stmts[0] {
            AstNode::IfStmt {
                then_branch,
                else_branch,
                ..
            } => {
                // Outer if has no else; the inner one got it.
                assert!(else_branch.is_none());
                match then_branch.as_ref() {
                    AstNode::IfStmt { else_branch, .. } => assert!(else_branch.is_some()),
                    other => panic!("expected nested if, got {:?}", other),
                }
            }
            other => panic!("expected if statement, got {:?}", other),
        }
    }

    #[test]
    fn test_for_clauses_are_all_optional() {
        let stmts = body_of("void f() { for (;;) x = 1; }");

        match &stmts[0] {
            AstNode::ForStmt {
                init, cond, incr, ..
            } => {
                assert!(init.is_none());
                assert!(cond.is_none());
                assert!(incr.is_none());
            }
            other => panic!("expected for statement, got {:?}", other),
        }
    }

    #[test]
    fn test_for_with_declaration_initializer() {
        let stmts = body_of("void f() { for (int i = 0; i < 10; i += 1) g(i); }");

        match &stmts[0] {
            AstNode::ForStmt { init, cond, incr, .. } => {
                assert!(matches!(init.as_deref(), Some(AstNode::VarDecl { .. })));
                assert!(matches!(cond.as_deref(), Some(AstNode::BinaryExpr { .. })));
                assert!(matches!(incr.as_deref(), Some(AstNode::BinaryExpr { .. })));
            }
            other => panic!("expected for statement, got {:?}", other),
        }
    }

    #[test]
    fn test_return_value_is_optional() {
        let stmts = body_of("void f() { return; }");
        assert!(matches!(&stmts[0], AstNode::ReturnStmt { value: None, .. }));

        let stmts = body_of("int g() { return 4; }");
        assert!(matches!(&stmts[0], AstNode::ReturnStmt { value: Some(_), .. }));
    }

    #[test]
    fn test_local_declaration_inside_block() {
        let stmts = body_of("void f() { int x = 1; x = 2; }");

        assert_eq!(stmts.len(), 2);
        assert!(matches!(&stmts[0], AstNode::VarDecl { .. }));
        assert!(matches!(&stmts[1], AstNode::ExprStmt { .. }));
    }

    #[test]
    fn test_block_reports_every_broken_statement() {
        let (unit, errors) = parse("int main() { int x = ; int y = ; return 0; }", "test.c");

        assert!(unit.is_none());
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_nested_blocks() {
        let stmts = body_of("void f() { { int x = 1; } }");

        match &stmts[0] {
            AstNode::CompoundStmt { stmts, .. } => assert_eq!(stmts.len(), 1),
            other => panic!("expected nested block, got {:?}", other),
        }
    }
}
