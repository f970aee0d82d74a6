//! Process-wide state accumulated while translating one unit.
//!
//! The context only ever grows: declarations add typedef aliases, record
//! layouts, enum constants, function signatures and symbol kinds, and the
//! emitter later reads them back. Nothing is removed or overwritten, which
//! is what lets later declarations trust what earlier ones registered.

use hashbrown::{HashMap, HashSet};

use crate::diagnostic::DiagnosticEngine;

/// What a name refers to, for `DeclRefExpr` resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Function,
    EnumConstant,
}

/// A struct or union definition learned from a `RecordDecl`.
#[derive(Debug, Clone)]
pub struct RecordInfo {
    pub go_name: String,
    pub is_union: bool,
    /// Field name and C type spelling, in declaration order.
    pub fields: Vec<(String, String)>,
}

/// A function's C-level signature, learned from its declaration or from
/// the builtin table.
#[derive(Debug, Clone)]
pub struct FunctionSignature {
    /// Parameter C type spellings, fixed arguments only.
    pub parameters: Vec<String>,
    pub return_type: String,
    pub is_variadic: bool,
    /// Fully qualified Go callee (`noarch.Printf`, `math.Sqrt`) that
    /// replaces the C name, together with the import it needs.
    pub substitution: Option<(String, Option<String>)>,
}

/// The translation-wide context.
pub struct Program {
    /// Typedef name to underlying C spelling.
    typedefs: HashMap<String, String>,
    records: HashMap<String, RecordInfo>,
    enums: HashSet<String>,
    enum_constants: HashMap<String, i64>,
    functions: HashMap<String, FunctionSignature>,
    symbols: HashMap<String, SymbolKind>,
    imports: HashSet<String>,
    pub diagnostics: DiagnosticEngine,
    /// Import path of the hand-written C runtime.
    pub runtime_import: String,
    pub package_name: String,
    /// Path of the user's input file, for telling user declarations apart
    /// from the ones the front-end injects.
    pub input_file: Option<String>,
}

pub const DEFAULT_RUNTIME_IMPORT: &str = "transgo/noarch";

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

impl Program {
    pub fn new() -> Self {
        Program {
            typedefs: HashMap::new(),
            records: HashMap::new(),
            enums: HashSet::new(),
            enum_constants: HashMap::new(),
            functions: HashMap::new(),
            symbols: HashMap::new(),
            imports: HashSet::new(),
            diagnostics: DiagnosticEngine::new(),
            runtime_import: DEFAULT_RUNTIME_IMPORT.to_string(),
            package_name: "main".to_string(),
            input_file: None,
        }
    }

    /// Registers a Go import path. Safe to call repeatedly.
    pub fn add_import(&mut self, path: &str) {
        self.imports.insert(path.to_string());
    }

    /// Registers the runtime import and returns the package prefix to call
    /// through (`noarch`).
    pub fn import_runtime(&mut self) -> &'static str {
        let path = self.runtime_import.clone();
        self.add_import(&path);
        "noarch"
    }

    /// All registered imports in a stable order.
    pub fn imports(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.imports.iter().cloned().collect();
        paths.sort();
        paths
    }

    /// Learns a typedef alias. First registration wins; a typedef is never
    /// redefined within one unit, so a second sighting is always the
    /// front-end repeating itself.
    pub fn add_typedef(&mut self, name: &str, underlying: &str) {
        self.typedefs
            .entry(name.to_string())
            .or_insert_with(|| underlying.to_string());
    }

    pub fn typedef(&self, name: &str) -> Option<&str> {
        self.typedefs.get(name).map(|s| s.as_str())
    }

    pub fn add_record(&mut self, name: &str, info: RecordInfo) {
        self.records.entry(name.to_string()).or_insert(info);
    }

    /// Registers a record definition, completing an earlier forward
    /// declaration if one was seen.
    pub fn define_record(&mut self, name: &str, info: RecordInfo) {
        match self.records.get_mut(name) {
            Some(existing) if existing.fields.is_empty() => *existing = info,
            Some(_) => {}
            None => {
                self.records.insert(name.to_string(), info);
            }
        }
    }

    pub fn record(&self, name: &str) -> Option<&RecordInfo> {
        self.records.get(name)
    }

    pub fn add_enum(&mut self, name: &str) {
        self.enums.insert(name.to_string());
    }

    pub fn is_enum(&self, name: &str) -> bool {
        self.enums.contains(name)
    }

    pub fn add_enum_constant(&mut self, name: &str, value: i64) {
        self.enum_constants.entry(name.to_string()).or_insert(value);
        self.declare_symbol(name, SymbolKind::EnumConstant);
    }

    pub fn enum_constant(&self, name: &str) -> Option<i64> {
        self.enum_constants.get(name).copied()
    }

    pub fn add_function(&mut self, name: &str, signature: FunctionSignature) {
        self.functions
            .entry(name.to_string())
            .or_insert(signature);
        self.declare_symbol(name, SymbolKind::Function);
    }

    pub fn function(&self, name: &str) -> Option<&FunctionSignature> {
        self.functions.get(name)
    }

    /// Records what a name refers to. The first registration wins; a
    /// symbol's kind never changes during one translation.
    pub fn declare_symbol(&mut self, name: &str, kind: SymbolKind) {
        self.symbols.entry(name.to_string()).or_insert(kind);
    }

    pub fn symbol(&self, name: &str) -> Option<SymbolKind> {
        self.symbols.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imports_are_deduplicated_and_sorted() {
        let mut program = Program::new();
        program.add_import("os");
        program.add_import("transgo/noarch");
        program.add_import("os");
        assert_eq!(program.imports(), vec!["os", "transgo/noarch"]);
    }

    #[test]
    fn symbol_kind_is_never_overwritten() {
        let mut program = Program::new();
        program.declare_symbol("x", SymbolKind::Variable);
        program.declare_symbol("x", SymbolKind::Function);
        assert_eq!(program.symbol("x"), Some(SymbolKind::Variable));
    }

    #[test]
    fn first_typedef_registration_wins() {
        let mut program = Program::new();
        program.add_typedef("u32", "unsigned int");
        program.add_typedef("u32", "unsigned long");
        assert_eq!(program.typedef("u32"), Some("unsigned int"));
    }

    #[test]
    fn enum_constants_register_their_symbol_kind() {
        let mut program = Program::new();
        program.add_enum_constant("RED", 0);
        assert_eq!(program.enum_constant("RED"), Some(0));
        assert_eq!(program.symbol("RED"), Some(SymbolKind::EnumConstant));
    }
}
