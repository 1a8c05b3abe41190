//! Read-only traversal over the AST.
//!
//! [`Visitor`] has one method per node category with a default body that
//! delegates to the matching `walk_*` function, so an implementor overrides
//! only the hooks it cares about and still gets a full tree walk. Overriding
//! methods should call `walk_node`/`walk_unit` themselves if they want to
//! keep recursing.

use crate::ast::{AstNode, TranslationUnit};

pub trait Visitor<'ast>: Sized {
    fn visit_unit(&mut self, unit: &'ast TranslationUnit) {
        walk_unit(self, unit);
    }

    fn visit_node(&mut self, node: &'ast AstNode) {
        walk_node(self, node);
    }
}

/// Visit every top-level declaration in order.
pub fn walk_unit<'ast, V: Visitor<'ast>>(visitor: &mut V, unit: &'ast TranslationUnit) {
    for decl in &unit.decls {
        visitor.visit_node(decl);
    }
}

/// Visit the children of one node in source order.
pub fn walk_node<'ast, V: Visitor<'ast>>(visitor: &mut V, node: &'ast AstNode) {
    match node {
        AstNode::FunctionDecl { body, .. } => {
            if let Some(body) = body {
                visitor.visit_node(body);
            }
        }
        AstNode::VarDecl { init, .. } => {
            if let Some(init) = init {
                visitor.visit_node(init);
            }
        }
        AstNode::StructDecl { .. } => {}
        AstNode::CompoundStmt { stmts, .. } => {
            for stmt in stmts {
                visitor.visit_node(stmt);
            }
        }
        AstNode::IfStmt {
            cond,
            then_branch,
            else_branch,
            ..
        } => {
            visitor.visit_node(cond);
            visitor.visit_node(then_branch);
            if let Some(else_branch) = else_branch {
                visitor.visit_node(else_branch);
            }
        }
        AstNode::WhileStmt { cond, body, .. } => {
            visitor.visit_node(cond);
            visitor.visit_node(body);
        }
        AstNode::ForStmt {
            init,
            cond,
            incr,
            body,
            ..
        } => {
            if let Some(init) = init {
                visitor.visit_node(init);
            }
            if let Some(cond) = cond {
                visitor.visit_node(cond);
            }
            if let Some(incr) = incr {
                visitor.visit_node(incr);
            }
            visitor.visit_node(body);
        }
        AstNode::ReturnStmt { value, .. } => {
            if let Some(value) = value {
                visitor.visit_node(value);
            }
        }
        AstNode::ExprStmt { expr, .. } => {
            visitor.visit_node(expr);
        }
        AstNode::BinaryExpr { lhs, rhs, .. } => {
            visitor.visit_node(lhs);
            visitor.visit_node(rhs);
        }
        AstNode::UnaryExpr { operand, .. } => {
            visitor.visit_node(operand);
        }
        AstNode::CallExpr { args, .. } => {
            for arg in args {
                visitor.visit_node(arg);
            }
        }
        AstNode::MemberExpr { object, .. } => {
            visitor.visit_node(object);
        }
        AstNode::ArraySubscript { array, index, .. } => {
            visitor.visit_node(array);
            visitor.visit_node(index);
        }
        AstNode::IntLiteral { .. }
        | AstNode::FloatLiteral { .. }
        | AstNode::CharLiteral { .. }
        | AstNode::StringLiteral { .. }
        | AstNode::VarRef { .. } => {}
    }
}
