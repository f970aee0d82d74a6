//! Prints the Go output tree as source text.
//!
//! The printer produces valid, readable Go; gofmt-grade polish is left to
//! the downstream formatter. Operator precedence is respected when
//! parenthesizing nested binary expressions, so fragments can be composed
//! without defensive parens.

use crate::goast::{CaseClause, Decl, Expr, File, FuncDecl, Stmt};

/// Go binary-operator precedence, higher binds tighter.
fn binary_precedence(op: &str) -> u8 {
    match op {
        "*" | "/" | "%" | "<<" | ">>" | "&" | "&^" => 5,
        "+" | "-" | "|" | "^" => 4,
        "==" | "!=" | "<" | "<=" | ">" | ">=" => 3,
        "&&" => 2,
        "||" => 1,
        _ => 0,
    }
}

fn expr_precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Binary { op, .. } => binary_precedence(op),
        Expr::Unary { .. } => 6,
        _ => 7,
    }
}

pub struct Printer {
    out: String,
    indent: usize,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Printer {
            out: String::new(),
            indent: 0,
        }
    }

    /// Prints a whole file and returns the text.
    pub fn print_file(mut self, file: &File) -> String {
        self.out.push_str(&format!("package {}\n", file.package));

        if !file.imports.is_empty() {
            self.out.push_str("\nimport (\n");
            for path in &file.imports {
                self.out.push_str(&format!("\t\"{}\"\n", path));
            }
            self.out.push_str(")\n");
        }

        for decl in &file.decls {
            self.out.push('\n');
            self.print_decl(decl);
        }

        self.out
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.out.push('\t');
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn print_decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Var { name, ty, init } => {
                let mut text = format!("var {} {}", name, ty);
                if let Some(init) = init {
                    text.push_str(&format!(" = {}", print_expr(init, 0)));
                }
                self.line(&text);
            }
            Decl::Struct { name, fields } => {
                self.line(&format!("type {} struct {{", name));
                self.indent += 1;
                for (field, ty) in fields {
                    self.line(&format!("{} {}", field, ty));
                }
                self.indent -= 1;
                self.line("}");
            }
            Decl::TypeAlias { name, ty } => {
                self.line(&format!("type {} {}", name, ty));
            }
            Decl::Consts(constants) => {
                self.line("const (");
                self.indent += 1;
                for (name, value) in constants {
                    self.line(&format!("{} = {}", name, value));
                }
                self.indent -= 1;
                self.line(")");
            }
            Decl::Func(func) => self.print_func(func),
        }
    }

    fn print_func(&mut self, func: &FuncDecl) {
        let params = func
            .params
            .iter()
            .map(|(name, ty)| format!("{} {}", name, ty))
            .collect::<Vec<_>>()
            .join(", ");
        let mut header = format!("func {}({})", func.name, params);
        if !func.ret.is_empty() {
            header.push_str(&format!(" {}", func.ret));
        }
        header.push_str(" {");
        self.line(&header);
        self.indent += 1;
        for stmt in &func.body {
            self.print_stmt(stmt);
        }
        self.indent -= 1;
        self.line("}");
    }

    fn print_block(&mut self, body: &[Stmt]) {
        self.indent += 1;
        for stmt in body {
            self.print_stmt(stmt);
        }
        self.indent -= 1;
    }

    fn print_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Empty => {}
            Stmt::Comment(text) => self.line(&format!("// {}", text)),
            Stmt::Expr(expr) => {
                let text = print_expr(expr, 0);
                self.line(&text);
            }
            Stmt::Assign { .. } | Stmt::VarDecl { .. } | Stmt::IncDec { .. } => {
                let text = print_simple_stmt(stmt);
                self.line(&text);
            }
            Stmt::Return(expr) => match expr {
                Some(expr) => self.line(&format!("return {}", print_expr(expr, 0))),
                None => self.line("return"),
            },
            Stmt::If { cond, then, els } => {
                self.line(&format!("if {} {{", print_expr(cond, 0)));
                self.print_block(then);
                if els.is_empty() {
                    self.line("}");
                } else {
                    self.line("} else {");
                    self.print_block(els);
                    self.line("}");
                }
            }
            Stmt::For {
                init,
                cond,
                post,
                body,
            } => {
                let header = match (init, cond, post) {
                    (None, None, None) => "for {".to_string(),
                    (None, Some(cond), None) => format!("for {} {{", print_expr(cond, 0)),
                    _ => {
                        let init = init.as_deref().map(print_simple_stmt).unwrap_or_default();
                        let cond = cond.as_ref().map(|c| print_expr(c, 0)).unwrap_or_default();
                        let post = post.as_deref().map(print_simple_stmt).unwrap_or_default();
                        format!("for {}; {}; {} {{", init, cond, post)
                    }
                };
                self.line(&header);
                self.print_block(body);
                self.line("}");
            }
            Stmt::Switch { tag, cases } => {
                self.line(&format!("switch {} {{", print_expr(tag, 0)));
                for case in cases {
                    self.print_case(case);
                }
                self.line("}");
            }
            Stmt::Block(body) => {
                self.line("{");
                self.print_block(body);
                self.line("}");
            }
            Stmt::Break => self.line("break"),
            Stmt::Continue => self.line("continue"),
            Stmt::Fallthrough => self.line("fallthrough"),
            Stmt::Goto(label) => self.line(&format!("goto {}", label)),
            Stmt::Label { name, stmt } => {
                // Labels sit at the parent's indentation, gofmt style.
                let saved = self.indent;
                self.indent = saved.saturating_sub(1);
                self.line(&format!("{}:", name));
                self.indent = saved;
                if let Some(stmt) = stmt {
                    self.print_stmt(stmt);
                }
            }
        }
    }

    fn print_case(&mut self, case: &CaseClause) {
        if case.values.is_empty() {
            self.line("default:");
        } else {
            let values = case
                .values
                .iter()
                .map(|v| print_expr(v, 0))
                .collect::<Vec<_>>()
                .join(", ");
            self.line(&format!("case {}:", values));
        }
        self.print_block(&case.body);
    }
}

/// Prints a statement in its single-line form, as used in `for` headers.
fn print_simple_stmt(stmt: &Stmt) -> String {
    match stmt {
        Stmt::Assign { lhs, op, rhs } => {
            format!("{} {} {}", print_expr(lhs, 0), op, print_expr(rhs, 0))
        }
        Stmt::VarDecl { name, ty, init } => match init {
            Some(init) => format!("var {} {} = {}", name, ty, print_expr(init, 0)),
            None => format!("var {} {}", name, ty),
        },
        Stmt::IncDec { expr, is_inc } => {
            format!("{}{}", print_expr(expr, 0), if *is_inc { "++" } else { "--" })
        }
        Stmt::Expr(expr) => print_expr(expr, 0),
        _ => String::new(),
    }
}

/// Escapes a Go interpreted string literal.
fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn quote_char(value: char) -> String {
    match value {
        '\'' => "'\\''".to_string(),
        '\\' => "'\\\\'".to_string(),
        '\n' => "'\\n'".to_string(),
        '\t' => "'\\t'".to_string(),
        '\r' => "'\\r'".to_string(),
        c if (c as u32) < 0x20 || (c as u32) > 0x7e => format!("'\\x{:02x}'", c as u32),
        c => format!("'{}'", c),
    }
}

/// Prints one expression. `min_precedence` is the binding strength of the
/// surrounding context; weaker expressions get wrapped in parens.
pub fn print_expr(expr: &Expr, min_precedence: u8) -> String {
    let precedence = expr_precedence(expr);
    let text = match expr {
        Expr::Ident(name) => name.clone(),
        Expr::IntLit(value) => value.clone(),
        Expr::FloatLit(value) => value.clone(),
        Expr::CharLit(value) => quote_char(*value),
        Expr::StringLit(value) => quote_string(value),
        Expr::Nil => "nil".to_string(),
        Expr::Unary { op, expr } => format!("{}{}", op, print_expr(expr, 7)),
        Expr::Binary { op, lhs, rhs } => {
            let precedence = binary_precedence(op);
            format!(
                "{} {} {}",
                print_expr(lhs, precedence),
                op,
                // Left-associative: the right operand must bind strictly
                // tighter to reproduce evaluation order.
                print_expr(rhs, precedence + 1)
            )
        }
        Expr::Call { callee, args } => {
            let args = args
                .iter()
                .map(|a| print_expr(a, 0))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}({})", print_expr(callee, 7), args)
        }
        Expr::Conv { ty, expr } => {
            let ty = if ty.starts_with('*') || ty.starts_with("func") {
                format!("({})", ty)
            } else {
                ty.clone()
            };
            format!("{}({})", ty, print_expr(expr, 0))
        }
        Expr::Index { expr, index } => {
            format!("{}[{}]", print_expr(expr, 7), print_expr(index, 0))
        }
        Expr::Slice { expr, low, high } => {
            let low = low.as_ref().map(|e| print_expr(e, 0)).unwrap_or_default();
            let high = high.as_ref().map(|e| print_expr(e, 0)).unwrap_or_default();
            format!("{}[{}:{}]", print_expr(expr, 7), low, high)
        }
        Expr::Selector { expr, field } => {
            format!("{}.{}", print_expr(expr, 7), field)
        }
        Expr::Composite { ty, elems } => {
            let elems = elems
                .iter()
                .map(|e| print_expr(e, 0))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}{{{}}}", ty, elems)
        }
        Expr::KeyValue { key, value } => {
            format!("{}: {}", print_expr(key, 0), print_expr(value, 0))
        }
        Expr::Closure { ret, body } => {
            let mut printer = Printer::new();
            printer.indent = 1;
            for stmt in body {
                printer.print_stmt(stmt);
            }
            let body_text = printer.out;
            let ret = if ret.is_empty() {
                String::new()
            } else {
                format!(" {}", ret)
            };
            // Rendered inline; the downstream formatter rewraps it. A
            // semicolon separator would be wrong next to a brace, so the
            // joiner watches both sides.
            let mut inline = String::new();
            for line in body_text.lines().map(|l| l.trim()) {
                if !inline.is_empty() {
                    if inline.ends_with('{') || line.starts_with('}') {
                        inline.push(' ');
                    } else {
                        inline.push_str("; ");
                    }
                }
                inline.push_str(line);
            }
            format!("func(){} {{ {} }}", ret, inline)
        }
        Expr::Paren(expr) => format!("({})", print_expr(expr, 0)),
        Expr::Raw(text) => text.clone(),
    };

    if precedence < min_precedence && precedence > 0 {
        format!("({})", text)
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_inserts_parens() {
        // (a + b) * c must keep its parens, a + b * c must not gain any.
        let sum = Expr::binary("+", Expr::ident("a"), Expr::ident("b"));
        let scaled = Expr::binary("*", sum.clone(), Expr::ident("c"));
        assert_eq!(print_expr(&scaled, 0), "(a + b) * c");

        let product = Expr::binary("*", Expr::ident("b"), Expr::ident("c"));
        let total = Expr::binary("+", Expr::ident("a"), product);
        assert_eq!(print_expr(&total, 0), "a + b * c");
    }

    #[test]
    fn left_associative_subtraction_parenthesizes_right() {
        let rhs = Expr::binary("-", Expr::ident("b"), Expr::ident("c"));
        let total = Expr::binary("-", Expr::ident("a"), rhs);
        assert_eq!(print_expr(&total, 0), "a - (b - c)");
    }

    #[test]
    fn pointer_conversion_is_parenthesized() {
        let conv = Expr::conv("*Foo", Expr::ident("p"));
        assert_eq!(print_expr(&conv, 0), "(*Foo)(p)");
        let conv = Expr::conv("[]byte", Expr::ident("s"));
        assert_eq!(print_expr(&conv, 0), "[]byte(s)");
    }

    #[test]
    fn string_and_char_literals_escape() {
        assert_eq!(
            print_expr(&Expr::StringLit("hi\n\"x\"".to_string()), 0),
            r#""hi\n\"x\"""#
        );
        assert_eq!(print_expr(&Expr::CharLit('\n'), 0), r"'\n'");
        assert_eq!(print_expr(&Expr::CharLit('a'), 0), "'a'");
    }

    #[test]
    fn file_layout_is_stable() {
        let file = File {
            package: "main".to_string(),
            imports: vec!["os".to_string(), "transgo/noarch".to_string()],
            decls: vec![
                Decl::Var {
                    name: "x".to_string(),
                    ty: "int32".to_string(),
                    init: Some(Expr::int(7)),
                },
                Decl::Func(FuncDecl {
                    name: "main".to_string(),
                    params: vec![],
                    ret: String::new(),
                    body: vec![Stmt::Return(None)],
                }),
            ],
        };
        let text = Printer::new().print_file(&file);
        let expected = "package main\n\nimport (\n\t\"os\"\n\t\"transgo/noarch\"\n)\n\nvar x int32 = 7\n\nfunc main() {\n\treturn\n}\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn switch_with_fallthrough() {
        let stmt = Stmt::Switch {
            tag: Expr::ident("x"),
            cases: vec![
                CaseClause {
                    values: vec![Expr::int(1)],
                    body: vec![Stmt::Expr(Expr::call("f", vec![])), Stmt::Fallthrough],
                },
                CaseClause {
                    values: vec![],
                    body: vec![Stmt::Expr(Expr::call("g", vec![]))],
                },
            ],
        };
        let mut printer = Printer::new();
        printer.print_stmt(&stmt);
        assert_eq!(
            printer.out,
            "switch x {\ncase 1:\n\tf()\n\tfallthrough\ndefault:\n\tg()\n}\n"
        );
    }
}
