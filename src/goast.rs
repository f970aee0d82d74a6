//! The Go output tree.
//!
//! Fragments are built bottom-up by the translator and never mutated after
//! they are handed to the printer. Types are carried as resolved Go
//! spellings (plain strings): the translation is spelling-driven end to
//! end, so a structured Go type graph would buy nothing.

use serde::Serialize;

pub mod printer;

/// A Go expression fragment.
#[derive(Debug, Clone, Serialize)]
pub enum Expr {
    Ident(String),
    /// Integer literal, kept as source text to preserve magnitude.
    IntLit(String),
    FloatLit(String),
    CharLit(char),
    StringLit(String),
    Nil,
    Unary {
        op: String,
        expr: Box<Expr>,
    },
    Binary {
        op: String,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    /// A type conversion `T(e)`.
    Conv {
        ty: String,
        expr: Box<Expr>,
    },
    Index {
        expr: Box<Expr>,
        index: Box<Expr>,
    },
    Slice {
        expr: Box<Expr>,
        low: Option<Box<Expr>>,
        high: Option<Box<Expr>>,
    },
    Selector {
        expr: Box<Expr>,
        field: String,
    },
    Composite {
        ty: String,
        elems: Vec<Expr>,
    },
    KeyValue {
        key: Box<Expr>,
        value: Box<Expr>,
    },
    /// A `func() T { ... }` literal; wrap in [`Expr::Call`] for the
    /// immediately-invoked form that stands in for C value-context
    /// side effects and the ternary operator.
    Closure {
        ret: String,
        body: Vec<Stmt>,
    },
    Paren(Box<Expr>),
    /// Placeholder emitted for soft translation failures.
    Raw(String),
}

impl Expr {
    pub fn ident(name: &str) -> Expr {
        Expr::Ident(name.to_string())
    }

    pub fn int(value: i64) -> Expr {
        Expr::IntLit(value.to_string())
    }

    pub fn call(callee: &str, args: Vec<Expr>) -> Expr {
        Expr::Call {
            callee: Box::new(Expr::ident(callee)),
            args,
        }
    }

    pub fn binary(op: &str, lhs: Expr, rhs: Expr) -> Expr {
        Expr::Binary {
            op: op.to_string(),
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn unary(op: &str, expr: Expr) -> Expr {
        Expr::Unary {
            op: op.to_string(),
            expr: Box::new(expr),
        }
    }

    pub fn conv(ty: &str, expr: Expr) -> Expr {
        Expr::Conv {
            ty: ty.to_string(),
            expr: Box::new(expr),
        }
    }
}

/// A Go statement fragment.
#[derive(Debug, Clone, Serialize)]
pub enum Stmt {
    Expr(Expr),
    Assign {
        lhs: Expr,
        op: String,
        rhs: Expr,
    },
    VarDecl {
        name: String,
        ty: String,
        init: Option<Expr>,
    },
    Return(Option<Expr>),
    If {
        cond: Expr,
        then: Vec<Stmt>,
        els: Vec<Stmt>,
    },
    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        post: Option<Box<Stmt>>,
        body: Vec<Stmt>,
    },
    Switch {
        tag: Expr,
        cases: Vec<CaseClause>,
    },
    Block(Vec<Stmt>),
    Break,
    Continue,
    Fallthrough,
    Goto(String),
    Label {
        name: String,
        stmt: Option<Box<Stmt>>,
    },
    IncDec {
        expr: Expr,
        is_inc: bool,
    },
    Comment(String),
    Empty,
}

/// One arm of a `switch`. An empty `values` list is the `default` arm.
#[derive(Debug, Clone, Serialize)]
pub struct CaseClause {
    pub values: Vec<Expr>,
    pub body: Vec<Stmt>,
}

/// A top-level Go declaration.
#[derive(Debug, Clone, Serialize)]
pub enum Decl {
    Var {
        name: String,
        ty: String,
        init: Option<Expr>,
    },
    Struct {
        name: String,
        fields: Vec<(String, String)>,
    },
    TypeAlias {
        name: String,
        ty: String,
    },
    Consts(Vec<(String, i64)>),
    Func(FuncDecl),
}

#[derive(Debug, Clone, Serialize)]
pub struct FuncDecl {
    pub name: String,
    pub params: Vec<(String, String)>,
    pub ret: String,
    pub body: Vec<Stmt>,
}

/// One emitted Go file: import block, type declarations, globals and
/// function definitions, in stable input order.
#[derive(Debug, Clone, Serialize, Default)]
pub struct File {
    pub package: String,
    pub imports: Vec<String>,
    pub decls: Vec<Decl>,
}

const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else",
    "fallthrough", "for", "func", "go", "goto", "if", "import", "interface",
    "map", "package", "range", "return", "select", "struct", "switch", "type",
    "var",
];

/// Renames identifiers that collide with a Go keyword. C and Go share the
/// identifier grammar otherwise, so an underscore suffix is enough.
pub fn sanitize_ident(name: &str) -> String {
    if GO_KEYWORDS.contains(&name) {
        format!("{}_", name)
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_suffixed() {
        assert_eq!(sanitize_ident("type"), "type_");
        assert_eq!(sanitize_ident("range"), "range_");
        assert_eq!(sanitize_ident("main"), "main");
    }
}
