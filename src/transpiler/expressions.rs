//! Expression translation: literals, references, member access, casts.

use crate::ast::{Node, NodeKind};
use crate::diagnostic::TranslationDefect;
use crate::goast::{sanitize_ident, Expr};
use crate::program::SymbolKind;
use crate::transpiler::{TranspileError, Transpiler};
use crate::types::{self, cast::cast_expr, cast::is_null_expr, resolve, resolve::size_of};

impl Transpiler<'_> {
    /// Translates one expression node, returning the Go fragment together
    /// with its C type spelling so callers can cast it into context.
    pub(crate) fn transpile_expr(&mut self, node: &Node) -> Result<(Expr, String), TranspileError> {
        match &node.kind {
            NodeKind::IntegerLiteral { value } => {
                Ok((Expr::IntLit(value.clone()), self.expr_type(node)?))
            }
            NodeKind::FloatingLiteral { value } => {
                let normalized = value
                    .parse::<f64>()
                    .map(|v| format!("{}", v))
                    .unwrap_or_else(|_| value.clone());
                Ok((Expr::FloatLit(normalized), self.expr_type(node)?))
            }
            NodeKind::CharacterLiteral { value } => {
                let expr = match char::from_u32(*value) {
                    Some(c) if c.is_ascii_graphic() || c == ' ' => Expr::CharLit(c),
                    _ => Expr::int(*value as i64),
                };
                Ok((expr, self.expr_type(node)?))
            }
            // String literals travel as Go strings until a cast pours them
            // into byte storage.
            NodeKind::StringLiteral { value } => Ok((Expr::StringLit(value.clone()), "string".to_string())),
            NodeKind::PredefinedExpr { .. } => {
                let name = self.current_function.clone().unwrap_or_default();
                Ok((Expr::StringLit(name), "string".to_string()))
            }
            NodeKind::DeclRefExpr { name, referenced_kind } => {
                self.transpile_decl_ref(node, name, referenced_kind)
            }
            NodeKind::MemberExpr { name, .. } => {
                let base = self.first_expr_child(node)?;
                let (expr, _) = self.transpile_expr(base)?;
                let expr = Expr::Selector {
                    expr: Box::new(expr),
                    field: sanitize_ident(name),
                };
                Ok((expr, self.expr_type(node)?))
            }
            NodeKind::ArraySubscriptExpr => {
                let children = Self::real_children(node);
                let [base, index] = children.as_slice() else {
                    return Err(TranspileError::invariant(
                        "ArraySubscriptExpr without two children",
                    ));
                };
                let (base, _) = self.transpile_expr(base)?;
                let (index, _) = self.transpile_expr(index)?;
                let expr = Expr::Index {
                    expr: Box::new(base),
                    index: Box::new(index),
                };
                Ok((expr, self.expr_type(node)?))
            }
            NodeKind::CallExpr => self.transpile_call(node),
            NodeKind::BinaryOperator { opcode } => self.transpile_binary(node, opcode),
            NodeKind::CompoundAssignOperator { opcode } => self.transpile_binary(node, opcode),
            NodeKind::UnaryOperator { opcode, is_prefix } => {
                self.transpile_unary(node, opcode, *is_prefix)
            }
            NodeKind::ConditionalOperator => self.transpile_conditional(node),
            NodeKind::ImplicitCastExpr { cast_kind } | NodeKind::CStyleCastExpr { cast_kind } => {
                self.transpile_cast(node, cast_kind)
            }
            NodeKind::ParenExpr => {
                let child = self.first_expr_child(node)?;
                let (expr, c_type) = self.transpile_expr(child)?;
                Ok((Expr::Paren(Box::new(expr)), c_type))
            }
            NodeKind::InitListExpr => self.transpile_init_list(node),
            NodeKind::ImplicitValueInitExpr => {
                let c_type = self.expr_type(node)?;
                let go = self.resolve_soft(&c_type, node);
                Ok((zero_value(&go), c_type))
            }
            NodeKind::CompoundLiteralExpr => {
                let child = self.first_expr_child(node)?;
                let (expr, _) = self.transpile_expr(child)?;
                Ok((expr, self.expr_type(node)?))
            }
            NodeKind::UnaryExprOrTypeTraitExpr { trait_name, argument_type } => {
                self.transpile_type_trait(node, trait_name, argument_type.as_deref())
            }
            NodeKind::Unknown { raw } => {
                let raw = raw.clone();
                self.warn_unknown(&raw, node);
                Ok(self.placeholder(node))
            }
            _ => {
                self.unsupported(node, node.kind_name());
                Ok(self.placeholder(node))
            }
        }
    }

    /// Translates an expression and casts it into the context of `to`.
    pub(crate) fn transpile_expr_cast(
        &mut self,
        node: &Node,
        to: &str,
    ) -> Result<Expr, TranspileError> {
        let (expr, from) = self.transpile_expr(node)?;
        Ok(cast_expr(self.program, expr, &from, to))
    }

    /// Translates a condition, cast to boolean.
    pub(crate) fn transpile_cond(&mut self, node: &Node) -> Result<Expr, TranspileError> {
        self.transpile_expr_cast(node, "_Bool")
    }

    /// Every expression node carries a type spelling; its absence is a
    /// front-end contract violation, not a soft defect.
    pub(crate) fn expr_type(&self, node: &Node) -> Result<String, TranspileError> {
        match &node.type_spelling {
            Some(spelling) if !spelling.is_empty() => Ok(spelling.clone()),
            _ => Err(TranspileError::invariant(format!(
                "{} node {} carries no type spelling",
                node.kind_name(),
                node.address
            ))),
        }
    }

    pub(crate) fn first_expr_child<'n>(&self, node: &'n Node) -> Result<&'n Node, TranspileError> {
        node.children
            .iter()
            .find(|c| !c.kind.is_null())
            .ok_or_else(|| {
                TranspileError::invariant(format!(
                    "{} node {} has no children",
                    node.kind_name(),
                    node.address
                ))
            })
    }

    fn transpile_decl_ref(
        &mut self,
        node: &Node,
        name: &str,
        referenced_kind: &str,
    ) -> Result<(Expr, String), TranspileError> {
        let known = self.program.symbol(name).is_some()
            || matches!(referenced_kind, "Function" | "Var" | "ParmVar" | "EnumConstant");
        if !known {
            self.program
                .diagnostics
                .report_defect(TranslationDefect::UnresolvedSymbol {
                    name: name.to_string(),
                    position: node.position.clone(),
                });
        }
        if self.program.symbol(name).is_none() && referenced_kind == "Var" {
            // Seen through a reference before its declaration reached us;
            // keep the table complete for later lookups.
            self.program.declare_symbol(name, SymbolKind::Variable);
        }
        Ok((Expr::ident(&sanitize_ident(name)), self.expr_type(node)?))
    }

    fn transpile_cast(
        &mut self,
        node: &Node,
        cast_kind: &str,
    ) -> Result<(Expr, String), TranspileError> {
        let child = self.first_expr_child(node)?;
        let (expr, from) = self.transpile_expr(child)?;

        match cast_kind {
            // Function designators decay without a value change.
            "FunctionToPointerDecay" | "BuiltinFnToFnPtr" | "NoOp" => {
                Ok((expr, self.expr_type(node)?))
            }
            "LValueToRValue" => Ok((expr, self.expr_type(node)?)),
            "NullToPointer" => Ok((expr, "null".to_string())),
            _ => {
                let to = self.expr_type(node)?;
                // The front-end spells NULL as `(0)`; recognizing it here
                // is advisory and only improves the output.
                if is_null_expr(&expr) && self.is_pointer_spelling(&to) {
                    return Ok((expr, "null".to_string()));
                }
                let expr = cast_expr(self.program, expr, &from, &to);
                Ok((expr, to))
            }
        }
    }

    fn is_pointer_spelling(&mut self, spelling: &str) -> bool {
        match resolve(self.program, spelling) {
            Ok(go) => go.starts_with('*') || go.starts_with("[]") || go == "unsafe.Pointer",
            Err(_) => false,
        }
    }

    /// A composite literal. Element types come from the target's element
    /// or field types; positional initializers fill in order.
    fn transpile_init_list(&mut self, node: &Node) -> Result<(Expr, String), TranspileError> {
        let c_type = self.expr_type(node)?;
        let go_type = self.resolve_soft(&c_type, node);

        let element_types = self.init_element_types(&c_type, node.children.len());
        let mut elems = Vec::new();
        let children: Vec<&Node> = Self::real_children(node)
            .into_iter()
            // The trailing "array filler" subtree stands for positions the
            // initializer left out; a Go composite zero-fills those anyway.
            .filter(|c| !matches!(&c.kind, NodeKind::Unknown { raw } if raw.starts_with("array")))
            .collect();
        for (index, child) in children.into_iter().enumerate() {
            let target = element_types
                .get(index)
                .cloned()
                .unwrap_or_default();
            let expr = if target.is_empty() {
                self.transpile_expr(child)?.0
            } else {
                self.transpile_expr_cast(child, &target)?
            };
            elems.push(expr);
        }

        Ok((
            Expr::Composite {
                ty: go_type,
                elems,
            },
            c_type,
        ))
    }

    /// The per-position target C types for an initializer list.
    fn init_element_types(&mut self, c_type: &str, count: usize) -> Vec<String> {
        let (stripped, _) = types::strip_qualifiers(c_type);
        if let Some(open) = stripped.find('[') {
            // An array: every position shares the element type, which is
            // the spelling with its outermost dimension dropped.
            let close = stripped[open..].find(']').map(|i| open + i);
            let elem = match close {
                Some(close) => format!(
                    "{} {}",
                    stripped[..open].trim(),
                    stripped[close + 1..].trim()
                )
                .trim()
                .to_string(),
                None => stripped[..open].trim().to_string(),
            };
            return vec![elem; count];
        }
        let name = stripped
            .trim_start_matches("struct ")
            .trim_start_matches("union ");
        if let Some(record) = self.program.record(name) {
            return record.fields.iter().map(|(_, ty)| ty.clone()).collect();
        }
        Vec::new()
    }

    fn transpile_type_trait(
        &mut self,
        node: &Node,
        trait_name: &str,
        argument_type: Option<&str>,
    ) -> Result<(Expr, String), TranspileError> {
        if trait_name != "sizeof" {
            self.unsupported(node, &format!("type trait '{}'", trait_name));
            return Ok(self.placeholder(node));
        }

        let spelling = match argument_type {
            Some(spelling) => spelling.to_string(),
            None => {
                let child = self.first_expr_child(node)?;
                self.expr_type(child)?
            }
        };

        let go = self.resolve_soft(&spelling, node);
        match size_of(self.program, &go) {
            Some(size) => Ok((Expr::IntLit(size.to_string()), self.expr_type(node)?)),
            None => {
                self.unsupported(node, &format!("sizeof '{}'", spelling));
                Ok(self.placeholder(node))
            }
        }
    }

    /// Resolves a spelling, downgrading failure to a diagnostic plus the
    /// placeholder type.
    pub(crate) fn resolve_soft(&mut self, spelling: &str, node: &Node) -> String {
        match resolve(self.program, spelling) {
            Ok(go) => go,
            Err(unknown) => {
                self.program
                    .diagnostics
                    .report_defect(TranslationDefect::UnknownType {
                        spelling: unknown.spelling,
                        position: node.position.clone(),
                    });
                types::UNRESOLVED_PLACEHOLDER.to_string()
            }
        }
    }
}

/// The Go zero value for a resolved spelling.
fn zero_value(go_spelling: &str) -> Expr {
    match go_spelling {
        "bool" => Expr::ident("false"),
        "string" => Expr::StringLit(String::new()),
        "float32" | "float64" => Expr::FloatLit("0".to_string()),
        s if s.starts_with('*') || s.starts_with("[]") || s == "unsafe.Pointer" => Expr::Nil,
        s if crate::types::is_numeric(s) || s.is_empty() => Expr::int(0),
        s => Expr::Composite {
            ty: s.to_string(),
            elems: Vec::new(),
        },
    }
}

