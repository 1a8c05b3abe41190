//! Expression parsing.
//!
//! Binary operators are parsed by precedence climbing over a single binding
//! power table instead of one recursive method per precedence level. From
//! loosest to tightest:
//!
//! ```text
//! =  +=  -=  *=  /=     right-associative
//! ||                    left-associative
//! &&                    left-associative
//! ==  !=                left-associative
//! <  >  <=  >=          left-associative
//! +  -                  left-associative
//! *  /  %               left-associative
//! ```
//!
//! Unary `!` `-` `&` bind tighter than any binary operator, and the postfix
//! forms (calls, member access, subscripts) tighter still.

use crate::ast::AstNode;
use crate::lexer::TokenKind;
use crate::parser::{ParseResult, Parser};

/// Left and right binding power of a binary operator, or `None` for tokens
/// that cannot continue a binary expression. `left < right` parses
/// left-associative, `left > right` right-associative.
fn binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    let bp = match kind {
        TokenKind::Assign
        | TokenKind::PlusAssign
        | TokenKind::MinusAssign
        | TokenKind::StarAssign
        | TokenKind::SlashAssign => (3, 2),
        TokenKind::OrOr => (4, 5),
        TokenKind::AndAnd => (6, 7),
        TokenKind::EqEq | TokenKind::NotEq => (8, 9),
        TokenKind::Lt | TokenKind::Gt | TokenKind::Le | TokenKind::Ge => (10, 11),
        TokenKind::Plus | TokenKind::Minus => (12, 13),
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => (14, 15),
        _ => return None,
    };
    Some(bp)
}

impl Parser {
    pub(crate) fn parse_expression(&mut self) -> ParseResult<AstNode> {
        self.parse_binary_expression(0)
    }

    /// Precedence climbing: fold in every operator whose left binding power
    /// is at least `min_bp`, recursing with the operator's right binding
    /// power for its right operand.
    fn parse_binary_expression(&mut self, min_bp: u8) -> ParseResult<AstNode> {
        let mut lhs = self.parse_unary()?;

        while let Some((left_bp, right_bp)) = binding_power(&self.peek().kind) {
            if left_bp < min_bp {
                break;
            }

            let op = self.advance();
            let rhs = self.parse_binary_expression(right_bp)?;
            lhs = AstNode::BinaryExpr {
                op: op.lexeme,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
                line: op.line,
            };
        }

        Ok(lhs)
    }

    fn parse_unary(&mut self) -> ParseResult<AstNode> {
        if self.check(&TokenKind::Not)
            || self.check(&TokenKind::Minus)
            || self.check(&TokenKind::Amp)
        {
            let op = self.advance();
            let operand = Box::new(self.parse_unary()?);
            return Ok(AstNode::UnaryExpr {
                op: op.lexeme,
                operand,
                line: op.line,
            });
        }

        self.parse_postfix()
    }

    /// Parse postfix operators: calls, `.`/`->` member access, subscripts.
    /// They chain left to right, so `a[i].f(x)` folds in source order.
    fn parse_postfix(&mut self) -> ParseResult<AstNode> {
        let mut expr = self.parse_primary()?;

        loop {
            if self.check(&TokenKind::LParen) {
                let callee = match expr {
                    AstNode::VarRef { name, .. } => name,
                    _ => {
                        return Err(
                            self.error_here("call target must be a function name".to_string())
                        )
                    }
                };
                let lparen = self.advance();
                let args = self.parse_argument_list()?;
                self.expect(&TokenKind::RParen, "expected ')' after arguments")?;
                expr = AstNode::CallExpr {
                    callee,
                    args,
                    line: lparen.line,
                };
            } else if self.check(&TokenKind::Dot) || self.check(&TokenKind::Arrow) {
                let op = self.advance();
                let member = self.expect_identifier()?;
                expr = AstNode::MemberExpr {
                    object: Box::new(expr),
                    member,
                    is_arrow: matches!(op.kind, TokenKind::Arrow),
                    line: op.line,
                };
            } else if self.check(&TokenKind::LBracket) {
                let bracket = self.advance();
                let index = Box::new(self.parse_expression()?);
                self.expect(&TokenKind::RBracket, "expected ']' after subscript")?;
                expr = AstNode::ArraySubscript {
                    array: Box::new(expr),
                    index,
                    line: bracket.line,
                };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn parse_argument_list(&mut self) -> ParseResult<Vec<AstNode>> {
        let mut args = Vec::new();

        if self.check(&TokenKind::RParen) {
            return Ok(args);
        }

        loop {
            args.push(self.parse_expression()?);
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }

        Ok(args)
    }

    fn parse_primary(&mut self) -> ParseResult<AstNode> {
        let token = self.peek().clone();

        match token.kind {
            TokenKind::IntLiteral(value) => {
                self.advance();
                Ok(AstNode::IntLiteral {
                    value,
                    line: token.line,
                })
            }
            TokenKind::FloatLiteral(value) => {
                self.advance();
                Ok(AstNode::FloatLiteral {
                    value,
                    line: token.line,
                })
            }
            TokenKind::CharLiteral(value) => {
                self.advance();
                Ok(AstNode::CharLiteral {
                    value,
                    line: token.line,
                })
            }
            TokenKind::StringLiteral => {
                self.advance();
                Ok(AstNode::StringLiteral {
                    value: token.lexeme,
                    line: token.line,
                })
            }
            TokenKind::Identifier => {
                self.advance();
                Ok(AstNode::VarRef {
                    name: token.lexeme,
                    line: token.line,
                })
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(&TokenKind::RParen, "expected ')' after expression")?;
                Ok(expr)
            }
            // The bad token stays put so synchronize discards it.
            TokenKind::Invalid => {
                Err(self.error_here(format!("invalid token: {}", token.lexeme)))
            }
            _ => Err(self.error_here(format!("expected expression, found {}", token))),
        }
    }
}
