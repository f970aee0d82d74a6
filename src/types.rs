//! C type spellings and their Go renditions.
//!
//! Resolution is intentionally spelling-driven: the front-end emits
//! canonical type spellings, so matching by shape is sufficient and much
//! cheaper than building a full type graph.

use bitflags::bitflags;
use hashbrown::HashMap;
use std::sync::LazyLock;
use thiserror::Error;

pub mod cast;
pub mod function;
pub mod resolve;

pub use cast::cast_expr;
pub use resolve::resolve;

/// A C type spelling the resolver could not translate. This is a soft
/// failure; callers emit the `interface{}` placeholder and a diagnostic.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot resolve C type '{spelling}'")]
pub struct UnknownType {
    pub spelling: String,
}

bitflags! {
    /// Qualifiers stripped off a spelling before resolution, 1 byte total
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TypeQualifiers: u8 {
        const CONST    = 0b00001;
        const VOLATILE = 0b00010;
        const RESTRICT = 0b00100;
        const NULLABLE = 0b01000;
        const NONNULL  = 0b10000;
    }
}

/// Strips qualifiers and storage-class words from a spelling, recording
/// which qualifiers were present. `restrict` also covers clang's
/// `__restrict` spelling.
pub fn strip_qualifiers(spelling: &str) -> (String, TypeQualifiers) {
    let mut qualifiers = TypeQualifiers::empty();
    let mut kept: Vec<&str> = Vec::new();

    for word in spelling.split_whitespace() {
        match word {
            "const" => qualifiers |= TypeQualifiers::CONST,
            "volatile" => qualifiers |= TypeQualifiers::VOLATILE,
            "restrict" | "__restrict" => qualifiers |= TypeQualifiers::RESTRICT,
            "_Nullable" => qualifiers |= TypeQualifiers::NULLABLE,
            "_Nonnull" => qualifiers |= TypeQualifiers::NONNULL,
            "static" | "extern" | "register" => {}
            word => kept.push(word),
        }
    }

    (kept.join(" "), qualifiers)
}

/// The canonical primitive table, C spelling to Go spelling.
///
/// Go spellings map to themselves so that resolution is idempotent. `long`
/// is fixed to the 32-bit width and `long double` to `float64`.
static PRIMITIVES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from_iter([
        ("void", ""),
        ("char", "int8"),
        ("signed char", "int8"),
        ("unsigned char", "uint8"),
        ("short", "int16"),
        ("short int", "int16"),
        ("signed short", "int16"),
        ("signed short int", "int16"),
        ("unsigned short", "uint16"),
        ("unsigned short int", "uint16"),
        ("short unsigned int", "uint16"),
        ("int", "int"),
        ("signed", "int"),
        ("signed int", "int"),
        ("unsigned", "uint"),
        ("unsigned int", "uint"),
        ("long", "int32"),
        ("long int", "int32"),
        ("signed long", "int32"),
        ("signed long int", "int32"),
        ("unsigned long", "uint32"),
        ("unsigned long int", "uint32"),
        ("long unsigned int", "uint32"),
        ("long long", "int64"),
        ("long long int", "int64"),
        ("signed long long", "int64"),
        ("signed long long int", "int64"),
        ("unsigned long long", "uint64"),
        ("unsigned long long int", "uint64"),
        ("long long unsigned int", "uint64"),
        ("float", "float32"),
        ("double", "float64"),
        ("long double", "float64"),
        ("_Bool", "bool"),
        // Common aliases the front-end leaves unexpanded.
        ("size_t", "uint32"),
        ("ssize_t", "int32"),
        ("ptrdiff_t", "int32"),
        // Go spellings, for idempotence.
        ("byte", "byte"),
        ("rune", "rune"),
        ("int8", "int8"),
        ("int16", "int16"),
        ("int32", "int32"),
        ("int64", "int64"),
        ("uint", "uint"),
        ("uint8", "uint8"),
        ("uint16", "uint16"),
        ("uint32", "uint32"),
        ("uint64", "uint64"),
        ("float32", "float32"),
        ("float64", "float64"),
        ("bool", "bool"),
        ("string", "string"),
        ("null", "null"),
    ])
});

/// Looks up a spelling in the primitive table.
pub fn primitive(spelling: &str) -> Option<&'static str> {
    PRIMITIVES.get(spelling).copied()
}

/// The Go numeric spellings that convert between each other with a plain
/// `T(e)` conversion.
pub fn is_numeric(go_spelling: &str) -> bool {
    matches!(
        go_spelling,
        "byte"
            | "rune"
            | "int"
            | "int8"
            | "int16"
            | "int32"
            | "int64"
            | "uint"
            | "uint8"
            | "uint16"
            | "uint32"
            | "uint64"
            | "float32"
            | "float64"
    )
}

pub fn is_float(go_spelling: &str) -> bool {
    matches!(go_spelling, "float32" | "float64")
}

/// Placeholder spelling for types the resolver gives up on.
pub const UNRESOLVED_PLACEHOLDER: &str = "interface{}";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualifiers_are_stripped_and_recorded() {
        let (spelling, qualifiers) = strip_qualifiers("const volatile unsigned int");
        assert_eq!(spelling, "unsigned int");
        assert!(qualifiers.contains(TypeQualifiers::CONST));
        assert!(qualifiers.contains(TypeQualifiers::VOLATILE));
    }

    #[test]
    fn storage_class_words_vanish_silently() {
        let (spelling, qualifiers) = strip_qualifiers("static int");
        assert_eq!(spelling, "int");
        assert!(qualifiers.is_empty());
    }

    #[test]
    fn primitive_table_covers_clang_canonical_orderings() {
        assert_eq!(primitive("long unsigned int"), Some("uint32"));
        assert_eq!(primitive("short unsigned int"), Some("uint16"));
        assert_eq!(primitive("long long unsigned int"), Some("uint64"));
    }
}
