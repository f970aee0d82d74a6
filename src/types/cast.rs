//! Converts an expression from one C type's context into another's.
//!
//! There are lots of rules about how an expression is cast; they are
//! applied strictly in order and the first match wins. The distinguished
//! source type `"null"` stands for the front-end's rendition of the NULL
//! macro, and `"string"` for a string literal; both exist only inside the
//! translator and never appear in a C program.
//!
//! Failures here are soft: a spelling the resolver cannot place is
//! reported to the diagnostic engine and the expression comes back
//! unconverted.

use regex::Regex;
use std::sync::LazyLock;

use crate::diagnostic::TranslationDefect;
use crate::goast::Expr;
use crate::program::Program;
use crate::types::{self, resolve};

static FIXED_BYTES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\[(\d+)\]byte$").unwrap());
static FIXED_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(\d+)\](?P<elem>.+)$").unwrap());

/// Yields the expression to use where a value of C type `to` is expected,
/// given that `expr` has C type `from`.
pub fn cast_expr(program: &mut Program, expr: Expr, from: &str, to: &str) -> Expr {
    // Anything can be converted to a void pointer.
    if to.trim() == "void *" {
        return expr;
    }

    let from = match resolve(program, from) {
        Ok(resolved) => resolved,
        Err(unknown) => {
            program.diagnostics.report_defect(TranslationDefect::UnknownType {
                spelling: unknown.spelling,
                position: None,
            });
            return expr;
        }
    };
    let to = match resolve(program, to) {
        Ok(resolved) => resolved,
        Err(unknown) => {
            program.diagnostics.report_defect(TranslationDefect::UnknownType {
                spelling: unknown.spelling,
                position: None,
            });
            return expr;
        }
    };

    if from == "null" {
        return cast_null(to.as_str(), expr);
    }

    if from.is_empty() || to.is_empty() {
        return expr;
    }

    if from == to {
        return expr;
    }

    if to == "bool" {
        if is_numeric_like(program, &from) {
            return Expr::binary("!=", expr, Expr::int(0));
        }
        if from.starts_with('*') || from == "unsafe.Pointer" {
            return Expr::binary("!=", expr, Expr::Nil);
        }
    }

    // A string literal poured into byte storage becomes a composite of its
    // bytes plus the NUL terminator.
    if from == "string" && (to == "[]byte" || FIXED_BYTES.is_match(&to)) {
        if let Expr::StringLit(value) = &expr {
            return byte_composite(&to, value);
        }
    }

    // Fixed byte storage read back as a string: trim the NUL.
    if to == "string" {
        if let Some(caps) = FIXED_BYTES.captures(&from) {
            let length: i64 = caps[1].parse().unwrap_or(0);
            return Expr::conv(
                "string",
                Expr::Slice {
                    expr: Box::new(expr),
                    low: None,
                    high: Some(Box::new(Expr::int(length - 1))),
                },
            );
        }
    }

    if from == "[]byte" && to == "bool" {
        let prefix = program.import_runtime();
        return Expr::unary("!", Expr::call(&format!("{}.CStringIsNull", prefix), vec![expr]));
    }

    // Any remaining sequence type still carries pointer truthiness.
    if from.starts_with("[]") && to == "bool" {
        return Expr::binary("!=", expr, Expr::Nil);
    }

    // A fixed array decays into the matching slice by re-slicing.
    if let Some(caps) = FIXED_ARRAY.captures(&from) {
        if to == format!("[]{}", &caps["elem"]) {
            return Expr::Slice {
                expr: Box::new(expr),
                low: None,
                high: None,
            };
        }
    }

    if is_numeric_like(program, &from) && is_numeric_like(program, &to) {
        return Expr::conv(&to, expr);
    }

    // Fallback: assume the runtime carries a conversion shim. A shim that
    // does not exist surfaces as a compile error downstream, not here.
    let prefix = program.import_runtime();
    let name = format!(
        "{}.{}To{}",
        prefix,
        exported_name(&from),
        exported_name(&to)
    );
    Expr::Call {
        callee: Box::new(Expr::ident(&name)),
        args: vec![expr],
    }
}

/// The type-specific rendition of the NULL macro.
fn cast_null(to: &str, expr: Expr) -> Expr {
    if to.starts_with('*') || to.starts_with("[]") || to == "unsafe.Pointer" {
        return Expr::Nil;
    }
    match to {
        t if types::is_float(t) => Expr::FloatLit("0.0".to_string()),
        "bool" => Expr::ident("false"),
        "string" => Expr::StringLit(String::new()),
        t if types::is_numeric(t) => Expr::int(0),
        _ => expr,
    }
}

fn is_numeric_like(program: &Program, go_spelling: &str) -> bool {
    types::is_numeric(go_spelling) || program.is_enum(go_spelling)
}

fn byte_composite(to: &str, value: &str) -> Expr {
    let mut elems: Vec<Expr> = value
        .bytes()
        .map(|b| {
            let c = b as char;
            if c.is_ascii_graphic() || c == ' ' || matches!(c, '\n' | '\t' | '\r') {
                Expr::CharLit(c)
            } else {
                Expr::int(b as i64)
            }
        })
        .collect();
    elems.push(Expr::int(0));
    Expr::Composite {
        ty: to.to_string(),
        elems,
    }
}

/// Recognizes the front-end's rendition of the NULL macro, `(0)`.
///
/// The recognition is purely advisory: it lets the translator tag the
/// expression with the `"null"` source type for cleaner output, but never
/// changes what the code does.
pub fn is_null_expr(expr: &Expr) -> bool {
    match expr {
        Expr::Paren(inner) => is_null_expr(inner),
        Expr::IntLit(value) => value == "0",
        _ => false,
    }
}

/// Builds the exported shim-name fragment for a resolved Go spelling:
/// package prefixes drop, sequence markers become words, and the first
/// letter is upper-cased.
fn exported_name(go_spelling: &str) -> String {
    let spelling = go_spelling
        .rsplit('.')
        .next()
        .unwrap_or(go_spelling)
        .trim_start_matches('*');

    let spelling = if let Some(rest) = spelling.strip_prefix("[]") {
        return format!("{}Slice", exported_name(rest));
    } else if let Some(caps) = FIXED_ARRAY.captures(spelling) {
        return format!("{}Array", exported_name(&caps["elem"]));
    } else {
        spelling
    };

    let mut chars = spelling.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
