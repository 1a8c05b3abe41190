//! Abstract syntax tree for the C-like language.
//!
//! The node set is closed: one [`AstNode`] enum covers declarations,
//! statements, and expressions, rooted by a [`TranslationUnit`]. Children are
//! owned boxes, optional slots are explicit `Option`s, and every node carries
//! the 1-based source line it started on. Ownership is a strict tree; nodes
//! live exactly as long as the unit that roots them.

/// A type is just a name: `int`, `float`, `char`, `void`, or `struct X`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    pub name: String,
}

impl TypeInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// One function parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDecl {
    pub name: String,
    pub ty: TypeInfo,
}

/// One struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: String,
    pub ty: TypeInfo,
}

/// Root of a parse: the ordered top-level declarations of one source file.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationUnit {
    pub decls: Vec<AstNode>,
    pub line: usize,
}

/// Every AST node in the language.
///
/// Statement bodies (`then_branch`, loop bodies) hold arbitrary statements;
/// a braced body shows up as a [`AstNode::CompoundStmt`]. A
/// [`AstNode::FunctionDecl`] without a body is a prototype.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    // Declarations
    FunctionDecl {
        name: String,
        return_type: TypeInfo,
        params: Vec<ParamDecl>,
        body: Option<Box<AstNode>>,
        line: usize,
    },
    VarDecl {
        name: String,
        ty: TypeInfo,
        init: Option<Box<AstNode>>,
        line: usize,
    },
    StructDecl {
        name: String,
        fields: Vec<FieldDecl>,
        line: usize,
    },

    // Statements
    CompoundStmt {
        stmts: Vec<AstNode>,
        line: usize,
    },
    IfStmt {
        cond: Box<AstNode>,
        then_branch: Box<AstNode>,
        else_branch: Option<Box<AstNode>>,
        line: usize,
    },
    WhileStmt {
        cond: Box<AstNode>,
        body: Box<AstNode>,
        line: usize,
    },
    ForStmt {
        init: Option<Box<AstNode>>,
        cond: Option<Box<AstNode>>,
        incr: Option<Box<AstNode>>,
        body: Box<AstNode>,
        line: usize,
    },
    ReturnStmt {
        value: Option<Box<AstNode>>,
        line: usize,
    },
    ExprStmt {
        expr: Box<AstNode>,
        line: usize,
    },

    // Expressions
    BinaryExpr {
        op: String,
        lhs: Box<AstNode>,
        rhs: Box<AstNode>,
        line: usize,
    },
    UnaryExpr {
        op: String,
        operand: Box<AstNode>,
        line: usize,
    },
    CallExpr {
        callee: String,
        args: Vec<AstNode>,
        line: usize,
    },
    MemberExpr {
        object: Box<AstNode>,
        member: String,
        is_arrow: bool,
        line: usize,
    },
    ArraySubscript {
        array: Box<AstNode>,
        index: Box<AstNode>,
        line: usize,
    },
    IntLiteral {
        value: i64,
        line: usize,
    },
    FloatLiteral {
        value: f64,
        line: usize,
    },
    CharLiteral {
        value: u8,
        line: usize,
    },
    StringLiteral {
        value: String,
        line: usize,
    },
    VarRef {
        name: String,
        line: usize,
    },
}

impl AstNode {
    /// The 1-based source line this node started on.
    pub fn line(&self) -> usize {
        match self {
            AstNode::FunctionDecl { line, .. }
            | AstNode::VarDecl { line, .. }
            | AstNode::StructDecl { line, .. }
            | AstNode::CompoundStmt { line, .. }
            | AstNode::IfStmt { line, .. }
            | AstNode::WhileStmt { line, .. }
            | AstNode::ForStmt { line, .. }
            | AstNode::ReturnStmt { line, .. }
            | AstNode::ExprStmt { line, .. }
            | AstNode::BinaryExpr { line, .. }
            | AstNode::UnaryExpr { line, .. }
            | AstNode::CallExpr { line, .. }
            | AstNode::MemberExpr { line, .. }
            | AstNode::ArraySubscript { line, .. }
            | AstNode::IntLiteral { line, .. }
            | AstNode::FloatLiteral { line, .. }
            | AstNode::CharLiteral { line, .. }
            | AstNode::StringLiteral { line, .. }
            | AstNode::VarRef { line, .. } => *line,
        }
    }
}

/// Render a parse tree as an indented dump, one node per line, two spaces
/// per depth level. Pure function; the output is deterministic.
///
/// Nodes with a fixed child count (`ForStmt` clauses, a `ReturnStmt` value,
/// a prototype's missing body) print `<null>` for absent slots so sibling
/// positions stay unambiguous; truly optional children (`VarDecl`
/// initializers, `else` branches) are simply omitted.
pub fn pretty_print(unit: &TranslationUnit) -> String {
    let mut out = String::new();
    out.push_str("TranslationUnit\n");
    for decl in &unit.decls {
        print_node(decl, &mut out, 1);
    }
    out
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn print_slot(node: Option<&AstNode>, out: &mut String, depth: usize) {
    match node {
        Some(node) => print_node(node, out, depth),
        None => {
            indent(out, depth);
            out.push_str("<null>\n");
        }
    }
}

fn print_node(node: &AstNode, out: &mut String, depth: usize) {
    indent(out, depth);
    match node {
        AstNode::FunctionDecl {
            name,
            return_type,
            params,
            body,
            ..
        } => {
            out.push_str(&format!("FunctionDecl {} -> {}\n", name, return_type.name));
            for param in params {
                indent(out, depth + 1);
                out.push_str(&format!("Param {}:{}\n", param.name, param.ty.name));
            }
            print_slot(body.as_deref(), out, depth + 1);
        }
        AstNode::VarDecl { name, ty, init, .. } => {
            out.push_str(&format!("VarDecl {}:{}\n", name, ty.name));
            if let Some(init) = init {
                print_node(init, out, depth + 1);
            }
        }
        AstNode::StructDecl { name, fields, .. } => {
            out.push_str(&format!("StructDecl {}\n", name));
            for field in fields {
                indent(out, depth + 1);
                out.push_str(&format!("Field {}:{}\n", field.name, field.ty.name));
            }
        }
        AstNode::CompoundStmt { stmts, .. } => {
            out.push_str("CompoundStmt\n");
            for stmt in stmts {
                print_node(stmt, out, depth + 1);
            }
        }
        AstNode::IfStmt {
            cond,
            then_branch,
            else_branch,
            ..
        } => {
            out.push_str("IfStmt\n");
            print_node(cond, out, depth + 1);
            print_node(then_branch, out, depth + 1);
            if let Some(else_branch) = else_branch {
                print_node(else_branch, out, depth + 1);
            }
        }
        AstNode::WhileStmt { cond, body, .. } => {
            out.push_str("WhileStmt\n");
            print_node(cond, out, depth + 1);
            print_node(body, out, depth + 1);
        }
        AstNode::ForStmt {
            init,
            cond,
            incr,
            body,
            ..
        } => {
            out.push_str("ForStmt\n");
            print_slot(init.as_deref(), out, depth + 1);
            print_slot(cond.as_deref(), out, depth + 1);
            print_slot(incr.as_deref(), out, depth + 1);
            print_node(body, out, depth + 1);
        }
        AstNode::ReturnStmt { value, .. } => {
            out.push_str("ReturnStmt\n");
            print_slot(value.as_deref(), out, depth + 1);
        }
        AstNode::ExprStmt { expr, .. } => {
            out.push_str("ExprStmt\n");
            print_node(expr, out, depth + 1);
        }
        AstNode::BinaryExpr { op, lhs, rhs, .. } => {
            out.push_str(&format!("BinaryExpr {}\n", op));
            print_node(lhs, out, depth + 1);
            print_node(rhs, out, depth + 1);
        }
        AstNode::UnaryExpr { op, operand, .. } => {
            out.push_str(&format!("UnaryExpr {}\n", op));
            print_node(operand, out, depth + 1);
        }
        AstNode::CallExpr { callee, args, .. } => {
            out.push_str(&format!("CallExpr {}\n", callee));
            for arg in args {
                print_node(arg, out, depth + 1);
            }
        }
        AstNode::MemberExpr {
            object,
            member,
            is_arrow,
            ..
        } => {
            let sigil = if *is_arrow { "->" } else { "." };
            out.push_str(&format!("MemberExpr {}{}\n", sigil, member));
            print_node(object, out, depth + 1);
        }
        AstNode::ArraySubscript { array, index, .. } => {
            out.push_str("ArraySubscript\n");
            print_node(array, out, depth + 1);
            print_node(index, out, depth + 1);
        }
        AstNode::IntLiteral { value, .. } => {
            out.push_str(&format!("IntLiteral {}\n", value));
        }
        AstNode::FloatLiteral { value, .. } => {
            out.push_str(&format!("FloatLiteral {}\n", value));
        }
        AstNode::CharLiteral { value, .. } => {
            out.push_str(&format!("CharLiteral {}\n", value));
        }
        AstNode::StringLiteral { value, .. } => {
            out.push_str(&format!("StringLiteral \"{}\"\n", value));
        }
        AstNode::VarRef { name, .. } => {
            out.push_str(&format!("VarRef {}\n", name));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_print_var_decl_with_init() {
        let unit = TranslationUnit {
            decls: vec![AstNode::VarDecl {
                name: "x".to_string(),
                ty: TypeInfo::new("int"),
                init: Some(Box::new(AstNode::IntLiteral { value: 42, line: 1 })),
                line: 1,
            }],
            line: 1,
        };

        assert_eq!(
            pretty_print(&unit),
            "TranslationUnit\n  VarDecl x:int\n    IntLiteral 42\n"
        );
    }

    #[test]
    fn test_for_stmt_prints_null_for_absent_clauses() {
        let node = AstNode::ForStmt {
            init: None,
            cond: None,
            incr: None,
            body: Box::new(AstNode::CompoundStmt {
                stmts: vec![],
                line: 1,
            }),
            line: 1,
        };

        let mut out = String::new();
        print_node(&node, &mut out, 0);
        assert_eq!(out, "ForStmt\n  <null>\n  <null>\n  <null>\n  CompoundStmt\n");
    }

    #[test]
    fn test_return_without_value_prints_null() {
        let node = AstNode::ReturnStmt {
            value: None,
            line: 3,
        };

        let mut out = String::new();
        print_node(&node, &mut out, 0);
        assert_eq!(out, "ReturnStmt\n  <null>\n");
    }

    #[test]
    fn test_member_expr_sigil_is_glued_to_member() {
        let dot = AstNode::MemberExpr {
            object: Box::new(AstNode::VarRef {
                name: "p".to_string(),
                line: 1,
            }),
            member: "x".to_string(),
            is_arrow: false,
            line: 1,
        };
        let arrow = AstNode::MemberExpr {
            object: Box::new(AstNode::VarRef {
                name: "q".to_string(),
                line: 1,
            }),
            member: "y".to_string(),
            is_arrow: true,
            line: 1,
        };

        let mut out = String::new();
        print_node(&dot, &mut out, 0);
        assert_eq!(out, "MemberExpr .x\n  VarRef p\n");

        out.clear();
        print_node(&arrow, &mut out, 0);
        assert_eq!(out, "MemberExpr ->y\n  VarRef q\n");
    }

    #[test]
    fn test_literal_formats() {
        let unit = TranslationUnit {
            decls: vec![AstNode::ExprStmt {
                expr: Box::new(AstNode::CallExpr {
                    callee: "f".to_string(),
                    args: vec![
                        AstNode::CharLiteral { value: 97, line: 1 },
                        AstNode::StringLiteral {
                            value: "hi".to_string(),
                            line: 1,
                        },
                        AstNode::FloatLiteral { value: 3.5, line: 1 },
                    ],
                    line: 1,
                }),
                line: 1,
            }],
            line: 1,
        };

        let text = pretty_print(&unit);
        assert!(text.contains("CharLiteral 97\n"));
        assert!(text.contains("StringLiteral \"hi\"\n"));
        assert!(text.contains("FloatLiteral 3.5\n"));
    }

    #[test]
    fn test_prototype_prints_null_body() {
        let node = AstNode::FunctionDecl {
            name: "add".to_string(),
            return_type: TypeInfo::new("int"),
            params: vec![ParamDecl {
                name: "a".to_string(),
                ty: TypeInfo::new("int"),
            }],
            body: None,
            line: 1,
        };

        let mut out = String::new();
        print_node(&node, &mut out, 0);
        assert_eq!(out, "FunctionDecl add -> int\n  Param a:int\n  <null>\n");
    }
}
