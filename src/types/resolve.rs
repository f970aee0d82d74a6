//! Maps C type spellings to Go type spellings.
//!
//! The resolver is stateful through the [`Program`] context: typedef
//! aliases are followed transitively, record and enum names come back as
//! the Go names their declarations registered, and runtime-backed types
//! (`FILE`) pull in the runtime import as a side effect.

use hashbrown::HashSet;
use regex::Regex;
use std::sync::LazyLock;

use crate::goast::sanitize_ident;
use crate::program::Program;
use crate::types::{self, function, strip_qualifiers, UnknownType};

static ARRAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<elem>[^\[]+?) *\[(?P<n>\d*)\](?P<rest>.*)$").unwrap());

/// Resolves a C type spelling into its Go spelling.
///
/// Resolution is idempotent: Go spellings pass through unchanged, so
/// `resolve(resolve(x)) == resolve(x)`.
pub fn resolve(program: &mut Program, spelling: &str) -> Result<String, UnknownType> {
    let mut visiting = HashSet::new();
    resolve_inner(program, spelling, &mut visiting)
}

fn resolve_inner(
    program: &mut Program,
    spelling: &str,
    visiting: &mut HashSet<String>,
) -> Result<String, UnknownType> {
    let trimmed = spelling.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }

    // Already a Go spelling; nothing to do.
    if trimmed.starts_with('[')
        || trimmed.starts_with('*')
        || trimmed.starts_with("func(")
        || trimmed.starts_with("noarch.")
        || trimmed == "unsafe.Pointer"
        || trimmed == types::UNRESOLVED_PLACEHOLDER
    {
        return Ok(trimmed.to_string());
    }

    let (stripped, _) = strip_qualifiers(trimmed);
    let s = stripped.as_str();
    if s.is_empty() {
        return Ok(String::new());
    }

    if let Some(go) = types::primitive(s) {
        return Ok(go.to_string());
    }

    if s.contains("(*)") {
        let fn_type = function::parse_function_pointer(s)
            .ok_or_else(|| UnknownType { spelling: s.to_string() })?;
        let mut params = Vec::new();
        for param in &fn_type.parameters {
            params.push(resolve_inner(program, param, visiting)?);
        }
        if fn_type.is_variadic {
            params.push("...interface{}".to_string());
        }
        let ret = resolve_inner(program, &fn_type.return_type, visiting)?;
        let mut go = format!("func({})", params.join(", "));
        if !ret.is_empty() {
            go.push_str(&format!(" {}", ret));
        }
        return Ok(go);
    }

    if let Some(caps) = ARRAY.captures(s) {
        let elem = caps["elem"].trim().to_string();
        let rest = caps["rest"].trim().to_string();
        let length = caps["n"].to_string();

        let elem_go = if rest.is_empty() {
            match elem.as_str() {
                // Character arrays carry C strings; they travel as bytes.
                "char" | "unsigned char" => "byte".to_string(),
                _ => resolve_inner(program, &elem, visiting)?,
            }
        } else {
            resolve_inner(program, &format!("{} {}", elem, rest), visiting)?
        };

        return if length.is_empty() {
            Ok(format!("[]{}", elem_go))
        } else {
            Ok(format!("[{}]{}", length, elem_go))
        };
    }

    if let Some(base) = s.strip_suffix('*') {
        let base = base.trim();
        let (base, _) = strip_qualifiers(base);
        return resolve_pointer(program, &base, visiting);
    }

    if let Some(name) = s.strip_prefix("struct ").or_else(|| s.strip_prefix("union ")) {
        if name.starts_with('(') {
            // `struct (anonymous struct at f.c:3:5)`: the record
            // declaration registered a synthesized name for this spelling.
            if let Some(alias) = program.typedef(s) {
                return Ok(alias.to_string());
            }
            return Err(UnknownType { spelling: s.to_string() });
        }
        if name == "_IO_FILE" {
            let prefix = program.import_runtime();
            return Ok(format!("{}.File", prefix));
        }
        return Ok(sanitize_ident(name));
    }

    if let Some(name) = s.strip_prefix("enum ") {
        if name.starts_with('(') {
            // Anonymous enums have no Go name; their constants are ints.
            return Ok("int".to_string());
        }
        return Ok(sanitize_ident(name));
    }

    if s == "FILE" {
        let prefix = program.import_runtime();
        return Ok(format!("{}.File", prefix));
    }

    // A bare name: a typedef alias, a record or an enum learned earlier.
    if let Some(underlying) = program.typedef(s).map(|u| u.to_string()) {
        if !visiting.insert(s.to_string()) {
            // Visit-in-progress: a typedef cycle is a forward reference.
            return Ok(sanitize_ident(s));
        }
        return resolve_inner(program, &underlying, visiting);
    }
    if program.record(s).is_some() || program.is_enum(s) {
        return Ok(sanitize_ident(s));
    }

    Err(UnknownType {
        spelling: trimmed.to_string(),
    })
}

fn resolve_pointer(
    program: &mut Program,
    base: &str,
    visiting: &mut HashSet<String>,
) -> Result<String, UnknownType> {
    match base {
        "void" => Ok("unsafe.Pointer".to_string()),
        // Pointer-to-char decays to a string-carrying byte sequence.
        "char" | "signed char" | "unsigned char" => Ok("[]byte".to_string()),
        "FILE" | "struct _IO_FILE" => {
            let prefix = program.import_runtime();
            Ok(format!("*{}.File", prefix))
        }
        _ => {
            let inner = resolve_inner(program, base, visiting)?;
            if inner.is_empty() {
                return Ok("unsafe.Pointer".to_string());
            }
            // Record pointers stay true pointers; everything else becomes
            // a slice so that decayed arrays and pointer arithmetic work.
            if program.record(&inner).is_some() || inner.starts_with("noarch.") {
                Ok(format!("*{}", inner))
            } else {
                Ok(format!("[]{}", inner))
            }
        }
    }
}

/// Byte size of a resolved Go spelling, for `sizeof`.
///
/// Record sizes are the unpadded sum of their field sizes; the translated
/// program never relies on C ABI layout.
pub fn size_of(program: &mut Program, go_spelling: &str) -> Option<u64> {
    match go_spelling {
        "bool" | "byte" | "int8" | "uint8" => Some(1),
        "int16" | "uint16" => Some(2),
        "int" | "uint" | "int32" | "uint32" | "rune" | "float32" => Some(4),
        "int64" | "uint64" | "float64" => Some(8),
        "" => Some(0),
        s if s.starts_with('*') || s.starts_with("[]") || s.starts_with("func(") => Some(8),
        s if s == "unsafe.Pointer" || s == "string" => Some(8),
        s if s.starts_with('[') => {
            let close = s.find(']')?;
            let length: u64 = s[1..close].parse().ok()?;
            let elem = size_of(program, &s[close + 1..])?;
            Some(length * elem)
        }
        s => {
            if program.is_enum(s) {
                return Some(4);
            }
            let fields: Vec<String> = program
                .record(s)?
                .fields
                .iter()
                .map(|(_, c_type)| c_type.clone())
                .collect();
            let mut total = 0;
            for c_type in fields {
                let field_go = resolve(program, &c_type).ok()?;
                total += size_of(program, &field_go)?;
            }
            Some(total)
        }
    }
}
