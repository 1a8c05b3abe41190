//! # Introduction
//!
//! minicc is the front end of a compiler for a small C-like language: a
//! hand-written lexer, a recursive-descent parser with panic-mode error
//! recovery, a printable AST, and the scaffolding for semantic analysis.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → SemanticAnalyzer
//!                            ↓
//!                      pretty_print
//! ```
//!
//! 1. [`lexer`] — turns source text into a token stream, accumulating
//!    lexical diagnostics instead of stopping at the first bad character.
//! 2. [`parser`] — builds a [`TranslationUnit`], synchronizing at statement
//!    boundaries after each syntax error so one run reports them all.
//! 3. [`ast`] — the tree itself plus [`pretty_print`], a stable text dump
//!    used by tests and the `--dump-ast` flag.
//! 4. [`sema`] — scope-aware traversal; checking rules are still to come.
//!
//! The usual entry point is [`parse`], which runs the first two stages and
//! returns the tree together with every diagnostic:
//!
//! ```
//! let (unit, errors) = minicc::parse("int main() { return 0; }", "main.c");
//! assert!(errors.is_empty());
//! println!("{}", minicc::pretty_print(&unit.unwrap()));
//! ```

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod sema;
pub mod visitor;

pub use ast::{pretty_print, AstNode, FieldDecl, ParamDecl, TranslationUnit, TypeInfo};
pub use lexer::{tokenize, LexError, Lexer, Token, TokenKind};
pub use parser::{parse, ParseError, Parser};
pub use sema::{SemanticAnalyzer, SymbolTable};
pub use visitor::{walk_node, walk_unit, Visitor};
