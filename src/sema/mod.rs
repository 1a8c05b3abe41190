//! Semantic analysis.
//!
//! [`SemanticAnalyzer`] walks a parsed translation unit and accumulates
//! human-readable diagnostics. Only the scaffolding is wired up so far: the
//! traversal reaches every node and the scope stack is in place, but no
//! checking rule emits a diagnostic yet, so [`SemanticAnalyzer::analyze`]
//! accepts every tree the parser produces.

mod symbol_table;

pub use symbol_table::SymbolTable;

use crate::ast::TranslationUnit;
use crate::visitor::Visitor;

#[derive(Debug, Default)]
pub struct SemanticAnalyzer {
    symbols: SymbolTable,
    diagnostics: Vec<String>,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk the unit and report whether it passed. Diagnostics from a
    /// previous run are discarded first, so an analyzer is reusable.
    pub fn analyze(&mut self, unit: &TranslationUnit) -> bool {
        self.diagnostics.clear();
        self.visit_unit(unit);
        self.diagnostics.is_empty()
    }

    /// Diagnostics produced by the last [`SemanticAnalyzer::analyze`] call.
    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    /// The scope stack, populated as checking rules land.
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }
}

// TODO: declare parameters and locals into the symbol table once type
// checking lands.
impl<'ast> Visitor<'ast> for SemanticAnalyzer {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_analyze_accepts_a_parsed_unit() {
        let (unit, errors) = parse(
            "int square(int x) { return x * x; }\nint main() { return square(4); }",
            "test.c",
        );
        assert!(errors.is_empty());

        let mut analyzer = SemanticAnalyzer::new();
        assert!(analyzer.analyze(&unit.unwrap()));
        assert!(analyzer.diagnostics().is_empty());
    }

    #[test]
    fn test_analyzer_is_reusable() {
        let (first, _) = parse("int x = 1;", "a.c");
        let (second, _) = parse("float y = 2.5;", "b.c");

        let mut analyzer = SemanticAnalyzer::new();
        assert!(analyzer.analyze(&first.unwrap()));
        assert!(analyzer.analyze(&second.unwrap()));
    }
}
