//! Statement translation: control flow, declarations in blocks, jumps.

use crate::ast::{Node, NodeKind};
use crate::goast::{sanitize_ident, Expr, Stmt};
use crate::program::SymbolKind;
use crate::transpiler::{TranspileError, Transpiler};

impl Transpiler<'_> {
    /// Translates a statement node, appending to the enclosing block. One
    /// C statement may expand to several Go statements.
    pub(crate) fn transpile_stmt(
        &mut self,
        node: &Node,
        out: &mut Vec<Stmt>,
    ) -> Result<(), TranspileError> {
        match &node.kind {
            NodeKind::NullPlaceholder | NodeKind::NullStmt => {}
            NodeKind::CompoundStmt => {
                let body = self.transpile_block(node)?;
                out.push(Stmt::Block(body));
            }
            NodeKind::DeclStmt => self.transpile_decl_stmt(node, out)?,
            NodeKind::IfStmt { .. } => {
                let children = Self::real_children(node);
                let [cond, then, rest @ ..] = children.as_slice() else {
                    return Err(TranspileError::invariant("IfStmt without a body"));
                };
                let cond = self.transpile_cond(cond)?;
                let then = self.stmt_as_block(then)?;
                let els = match rest {
                    [els] => self.stmt_as_block(els)?,
                    _ => Vec::new(),
                };
                out.push(Stmt::If { cond, then, els });
            }
            NodeKind::WhileStmt => {
                let children = Self::real_children(node);
                let [.., cond, body] = children.as_slice() else {
                    return Err(TranspileError::invariant("WhileStmt without a body"));
                };
                let cond = self.transpile_cond(cond)?;
                let body = self.stmt_as_block(body)?;
                out.push(Stmt::For {
                    init: None,
                    cond: Some(cond),
                    post: None,
                    body,
                });
            }
            NodeKind::DoStmt => {
                let children = Self::real_children(node);
                let [body, cond] = children.as_slice() else {
                    return Err(TranspileError::invariant("DoStmt without a condition"));
                };
                // do/while becomes an infinite loop with a tail
                // conditional break.
                let mut loop_body = self.stmt_as_block(body)?;
                let cond = self.transpile_cond(cond)?;
                loop_body.push(Stmt::If {
                    cond: Expr::unary("!", cond),
                    then: vec![Stmt::Break],
                    els: vec![],
                });
                out.push(Stmt::For {
                    init: None,
                    cond: None,
                    post: None,
                    body: loop_body,
                });
            }
            NodeKind::ForStmt => self.transpile_for(node, out)?,
            NodeKind::SwitchStmt => self.transpile_switch(node, out)?,
            NodeKind::ReturnStmt => {
                let children = Self::real_children(node);
                match children.as_slice() {
                    [] => out.push(Stmt::Return(None)),
                    [value, ..] => {
                        let return_type = self.current_return.clone();
                        let expr = match return_type {
                            Some(to) => self.transpile_expr_cast(value, &to)?,
                            None => self.transpile_expr(value)?.0,
                        };
                        out.push(Stmt::Return(Some(expr)));
                    }
                }
            }
            NodeKind::BreakStmt => out.push(Stmt::Break),
            NodeKind::ContinueStmt => out.push(Stmt::Continue),
            NodeKind::GotoStmt { label } => out.push(Stmt::Goto(sanitize_ident(label))),
            NodeKind::LabelStmt { name } => {
                let mut body = Vec::new();
                for child in Self::real_children(node) {
                    self.transpile_stmt(child, &mut body)?;
                }
                let stmt = match body.len() {
                    0 => None,
                    1 => Some(Box::new(body.remove(0))),
                    _ => Some(Box::new(Stmt::Block(body))),
                };
                out.push(Stmt::Label {
                    name: sanitize_ident(name),
                    stmt,
                });
            }
            NodeKind::Unknown { raw } => {
                let raw = raw.clone();
                self.warn_unknown(&raw, node);
                out.push(Stmt::Comment(format!("unknown statement: {}", raw)));
            }
            _ => self.transpile_expr_stmt(node, out)?,
        }
        Ok(())
    }

    /// Translates an expression used for its effect. Go only permits call
    /// expressions as statements, so anything else is assigned away.
    fn transpile_expr_stmt(
        &mut self,
        node: &Node,
        out: &mut Vec<Stmt>,
    ) -> Result<(), TranspileError> {
        match &node.kind {
            NodeKind::BinaryOperator { opcode } | NodeKind::CompoundAssignOperator { opcode }
                if opcode.ends_with('=')
                    && !matches!(opcode.as_str(), "==" | "!=" | "<=" | ">=") =>
            {
                let opcode = opcode.clone();
                let (stmt, _, _) = self.transpile_assign_stmt(node, &opcode)?;
                out.push(stmt);
            }
            NodeKind::BinaryOperator { opcode } if opcode == "," => {
                let children = Self::real_children(node);
                for child in children {
                    self.transpile_stmt(child, out)?;
                }
            }
            NodeKind::UnaryOperator { opcode, .. } if opcode == "++" || opcode == "--" => {
                let is_inc = opcode == "++";
                let child = self.first_expr_child(node)?;
                let (expr, _) = self.transpile_expr(child)?;
                out.push(Stmt::IncDec { expr, is_inc });
            }
            NodeKind::ParenExpr => {
                let child = self.first_expr_child(node)?;
                self.transpile_stmt(child, out)?;
            }
            _ => {
                let (expr, _) = self.transpile_expr(node)?;
                match expr {
                    Expr::Call { .. } => out.push(Stmt::Expr(expr)),
                    expr => out.push(Stmt::Assign {
                        lhs: Expr::ident("_"),
                        op: "=".to_string(),
                        rhs: expr,
                    }),
                }
            }
        }
        Ok(())
    }

    /// Translates a compound statement's children into a statement list.
    pub(crate) fn transpile_block(&mut self, node: &Node) -> Result<Vec<Stmt>, TranspileError> {
        let mut body = Vec::new();
        for child in &node.children {
            self.transpile_stmt(child, &mut body)?;
        }
        Ok(body)
    }

    /// A statement in a position that expects a block: compound statements
    /// flatten, anything else becomes a one-statement block.
    pub(crate) fn stmt_as_block(&mut self, node: &Node) -> Result<Vec<Stmt>, TranspileError> {
        if matches!(node.kind, NodeKind::CompoundStmt) {
            return self.transpile_block(node);
        }
        let mut body = Vec::new();
        self.transpile_stmt(node, &mut body)?;
        Ok(body)
    }

    fn transpile_decl_stmt(
        &mut self,
        node: &Node,
        out: &mut Vec<Stmt>,
    ) -> Result<(), TranspileError> {
        for child in Self::real_children(node) {
            match &child.kind {
                NodeKind::VarDecl(_) => {
                    let stmt = self.transpile_local_var(child)?;
                    out.push(stmt);
                }
                NodeKind::TypedefDecl { .. } => self.transpile_typedef(child),
                // Block-scoped types hoist to file scope; Go has no local
                // type declarations that C code would rely on.
                NodeKind::RecordDecl { .. } => {
                    self.transpile_record(child, None, true)?;
                }
                NodeKind::EnumDecl { .. } => self.transpile_enum(child, true)?,
                _ => self.unsupported(child, child.kind_name()),
            }
        }
        Ok(())
    }

    pub(crate) fn transpile_local_var(&mut self, node: &Node) -> Result<Stmt, TranspileError> {
        let NodeKind::VarDecl(data) = &node.kind else {
            return Err(TranspileError::invariant("expected a VarDecl"));
        };
        let name = sanitize_ident(&data.name);
        let c_type = node
            .type_spelling
            .clone()
            .unwrap_or_else(|| "int".to_string());
        let go_type = self.resolve_soft(&c_type, node);
        self.program.declare_symbol(&data.name, SymbolKind::Variable);

        let init = match Self::real_children(node)
            .into_iter()
            .find(|c| !matches!(c.kind, NodeKind::IncompleteArrayType))
        {
            Some(child) if data.has_init => Some(self.transpile_expr_cast(child, &c_type)?),
            _ => None,
        };

        Ok(Stmt::VarDecl {
            name,
            ty: go_type,
            init,
        })
    }

    fn transpile_for(&mut self, node: &Node, out: &mut Vec<Stmt>) -> Result<(), TranspileError> {
        // The front-end always dumps five child slots: init, condition
        // variable, condition, increment, body. Absent slots are NULL
        // placeholders.
        let children: Vec<&Node> = node.children.iter().collect();
        let (init_node, cond_node, post_node, body_node) = match children.as_slice() {
            [init, _cond_var, cond, post, body] => (*init, *cond, *post, *body),
            _ => {
                let Some(body) = children.last() else {
                    return Err(TranspileError::invariant("ForStmt without children"));
                };
                self.unsupported(node, "for statement with unexpected shape");
                let body = self.stmt_as_block(body)?;
                out.push(Stmt::For {
                    init: None,
                    cond: None,
                    post: None,
                    body,
                });
                return Ok(());
            }
        };

        let init = self.for_clause(init_node, out)?;
        let cond = if cond_node.kind.is_null() {
            None
        } else {
            Some(self.transpile_cond(cond_node)?)
        };
        let post = self.for_clause(post_node, &mut Vec::new())?;
        let body = self.stmt_as_block(body_node)?;

        out.push(Stmt::For {
            init: init.map(Box::new),
            cond,
            post: post.map(Box::new),
            body,
        });
        Ok(())
    }

    /// An init or post clause of a `for` header, in single-line form.
    /// Multi-variable declarations hoist everything but nothing fits the
    /// header; they land in `out` before the loop.
    fn for_clause(
        &mut self,
        node: &Node,
        out: &mut Vec<Stmt>,
    ) -> Result<Option<Stmt>, TranspileError> {
        match &node.kind {
            NodeKind::NullPlaceholder => Ok(None),
            NodeKind::DeclStmt => {
                let vars = Self::real_children(node);
                match vars.as_slice() {
                    [single] => {
                        let Stmt::VarDecl { name, ty, init } = self.transpile_local_var(single)?
                        else {
                            return Ok(None);
                        };
                        // `var` is not a valid for-init; use := with the
                        // type pinned by conversion where it matters.
                        let rhs = init.unwrap_or(Expr::int(0));
                        let rhs = if ty == "int" {
                            rhs
                        } else {
                            match rhs {
                                Expr::Conv { .. } => rhs,
                                rhs => Expr::Conv {
                                    ty: ty.clone(),
                                    expr: Box::new(rhs),
                                },
                            }
                        };
                        Ok(Some(Stmt::Assign {
                            lhs: Expr::Ident(name),
                            op: ":=".to_string(),
                            rhs,
                        }))
                    }
                    _ => {
                        self.transpile_decl_stmt(node, out)?;
                        Ok(None)
                    }
                }
            }
            NodeKind::BinaryOperator { opcode } | NodeKind::CompoundAssignOperator { opcode }
                if opcode.ends_with('=')
                    && !matches!(opcode.as_str(), "==" | "!=" | "<=" | ">=") =>
            {
                let opcode = opcode.clone();
                let (stmt, _, _) = self.transpile_assign_stmt(node, &opcode)?;
                Ok(Some(stmt))
            }
            NodeKind::UnaryOperator { opcode, .. } if opcode == "++" || opcode == "--" => {
                let is_inc = opcode == "++";
                let child = self.first_expr_child(node)?;
                let (expr, _) = self.transpile_expr(child)?;
                Ok(Some(Stmt::IncDec { expr, is_inc }))
            }
            _ => {
                let (expr, _) = self.transpile_expr(node)?;
                Ok(Some(Stmt::Expr(expr)))
            }
        }
    }
}
