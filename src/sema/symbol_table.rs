//! Lexically scoped symbol table.
//!
//! Scopes form a stack: the bottom entry is the global scope and is never
//! popped, so the table always has somewhere to declare into. Name lookup
//! walks from the innermost scope outward, which is what makes shadowing
//! work.

use rustc_hash::FxHashMap;

use crate::ast::TypeInfo;

#[derive(Debug)]
pub struct SymbolTable {
    scopes: Vec<FxHashMap<String, TypeInfo>>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self {
            scopes: vec![FxHashMap::default()],
        }
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a fresh innermost scope.
    pub fn enter_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    /// Pop the innermost scope. The global scope stays put, so calling this
    /// at depth 1 is a no-op.
    pub fn exit_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Declare `name` in the innermost scope. Returns `false` when the name
    /// is already declared in that scope; outer-scope entries never
    /// conflict, they are shadowed.
    pub fn declare(&mut self, name: &str, ty: TypeInfo) -> bool {
        let innermost = self.scopes.len() - 1;
        let scope = &mut self.scopes[innermost];
        if scope.contains_key(name) {
            return false;
        }
        scope.insert(name.to_string(), ty);
        true
    }

    /// Resolve `name` against the innermost scope that declares it.
    pub fn lookup(&self, name: &str) -> Option<&TypeInfo> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Current nesting depth; the global scope alone is depth 1.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_in_same_scope_is_rejected() {
        let mut table = SymbolTable::new();

        assert!(table.declare("x", TypeInfo::new("int")));
        assert!(!table.declare("x", TypeInfo::new("float")));
        // The original entry survives the rejected redeclaration.
        assert_eq!(table.lookup("x").unwrap().name, "int");
    }

    #[test]
    fn test_inner_scope_shadows_outer() {
        let mut table = SymbolTable::new();
        table.declare("x", TypeInfo::new("int"));

        table.enter_scope();
        assert!(table.declare("x", TypeInfo::new("float")));
        assert_eq!(table.lookup("x").unwrap().name, "float");

        table.exit_scope();
        assert_eq!(table.lookup("x").unwrap().name, "int");
    }

    #[test]
    fn test_exited_scope_entries_are_gone() {
        let mut table = SymbolTable::new();

        table.enter_scope();
        table.declare("tmp", TypeInfo::new("char"));
        assert!(table.lookup("tmp").is_some());

        table.exit_scope();
        assert!(table.lookup("tmp").is_none());
    }

    #[test]
    fn test_outer_names_stay_visible_from_inner_scopes() {
        let mut table = SymbolTable::new();
        table.declare("g", TypeInfo::new("int"));

        table.enter_scope();
        table.enter_scope();
        assert_eq!(table.lookup("g").unwrap().name, "int");
        assert_eq!(table.depth(), 3);
    }

    #[test]
    fn test_global_scope_is_never_popped() {
        let mut table = SymbolTable::new();
        table.declare("g", TypeInfo::new("int"));

        table.exit_scope();
        table.exit_scope();

        assert_eq!(table.depth(), 1);
        assert!(table.lookup("g").is_some());
        assert!(table.declare("h", TypeInfo::new("int")));
    }
}
