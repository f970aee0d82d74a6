//! Function declarations, definitions and the `main` bridge.
//!
//! Emission of one function runs through a small state machine (Header,
//! Params, Body, Done) advanced as the matching children are consumed.
//! The C `main` is renamed and wrapped in a synthesized Go `main` that
//! marshals `os.Args` into a C-style `argc`/`argv` pair.

use log::debug;

use crate::ast::{Node, NodeKind};
use crate::goast::{sanitize_ident, Decl, Expr, FuncDecl, Stmt};
use crate::program::{FunctionSignature, SymbolKind};
use crate::transpiler::{FunctionState, TranspileError, Transpiler};
use crate::types::function::parse_signature;

/// The Go name the C entry point moves to so the synthesized `main` can
/// wrap it.
const RENAMED_MAIN: &str = "cMain";

impl Transpiler<'_> {
    pub(crate) fn transpile_function(
        &mut self,
        node: &Node,
        emit: bool,
    ) -> Result<(), TranspileError> {
        let NodeKind::FunctionDecl(data) = &node.kind else {
            return Err(TranspileError::invariant("expected a FunctionDecl"));
        };
        if data.is_implicit {
            return Ok(());
        }

        let spelling = node.c_type().to_string();
        let parsed = parse_signature(&spelling);
        let (return_type, mut parameters, is_variadic) = match &parsed {
            Some(sig) => (
                sig.return_type.clone(),
                sig.parameters.clone(),
                sig.is_variadic,
            ),
            None => (spelling.clone(), Vec::new(), false),
        };

        // Parameter spellings from the signature, names from the children.
        // The children drive the Header -> Params -> Body state machine; a
        // parameter after the body would mean the front-end reordered the
        // dump, which no later pass could survive.
        let mut state = FunctionState::Header;
        let mut param_names: Vec<String> = Vec::new();
        let mut body_node: Option<&Node> = None;
        for child in &node.children {
            state = match (&child.kind, state) {
                (
                    NodeKind::ParmVarDecl { name },
                    FunctionState::Header | FunctionState::Params,
                ) => {
                    param_names.push(name.clone().unwrap_or_else(|| "_".to_string()));
                    if parameters.len() < param_names.len() {
                        parameters.push(child.c_type().to_string());
                    }
                    FunctionState::Params
                }
                (NodeKind::ParmVarDecl { .. }, _) => {
                    return Err(TranspileError::invariant(format!(
                        "parameter after the body of '{}'",
                        data.name
                    )));
                }
                (NodeKind::CompoundStmt, FunctionState::Header | FunctionState::Params) => {
                    body_node = Some(child);
                    FunctionState::Body
                }
                (_, state) => state,
            };
        }

        self.program.add_function(
            &data.name,
            FunctionSignature {
                parameters: parameters.clone(),
                return_type: return_type.clone(),
                is_variadic,
                substitution: None,
            },
        );

        // Declarations without a body register the signature and emit
        // nothing; the definition lives in another unit or the runtime.
        let Some(body_node) = body_node else {
            return Ok(());
        };
        if !emit {
            return Ok(());
        }

        let is_main = data.name == "main";
        let go_name = if is_main {
            RENAMED_MAIN.to_string()
        } else {
            sanitize_ident(&data.name)
        };

        let mut go_params = Vec::new();
        for (index, name) in param_names.iter().enumerate() {
            let c_type = parameters.get(index).cloned().unwrap_or_default();
            let go_type = self.resolve_soft(&c_type, node);
            if name != "_" {
                self.program.declare_symbol(name, SymbolKind::Variable);
            }
            go_params.push((sanitize_ident(name), go_type));
        }
        if is_variadic {
            go_params.push(("varargs".to_string(), "...interface{}".to_string()));
        }

        let go_return = self.resolve_soft(&return_type, node);

        self.current_return = Some(return_type.clone());
        self.current_function = Some(data.name.clone());
        let body = self.transpile_block(body_node)?;
        self.current_return = None;
        self.current_function = None;
        state = FunctionState::Done;

        self.file.decls.push(Decl::Func(FuncDecl {
            name: go_name,
            params: go_params,
            ret: go_return.clone(),
            body,
        }));
        debug!("emitted function {} in state {:?}", data.name, state);

        if is_main {
            self.emit_main_bridge(node, &parameters, &go_return)?;
        }
        Ok(())
    }

    /// The synthesized Go `main`: builds NUL-terminated byte-slice
    /// arguments from `os.Args` and exits with the C entry point's return
    /// value.
    fn emit_main_bridge(
        &mut self,
        node: &Node,
        parameters: &[String],
        go_return: &str,
    ) -> Result<(), TranspileError> {
        self.program.add_import("os");
        let mut body: Vec<Stmt> = Vec::new();
        let mut call_args: Vec<Expr> = Vec::new();

        if !parameters.is_empty() {
            if parameters.len() != 2 {
                self.unsupported(node, "main with an unexpected parameter count");
            }

            body.push(Stmt::VarDecl {
                name: "argv".to_string(),
                ty: "[][]byte".to_string(),
                init: None,
            });
            let os_args = Expr::ident("os.Args");
            let arg_bytes = Expr::call(
                "append",
                vec![
                    Expr::conv(
                        "[]byte",
                        Expr::Index {
                            expr: Box::new(os_args.clone()),
                            index: Box::new(Expr::ident("i")),
                        },
                    ),
                    Expr::int(0),
                ],
            );
            body.push(Stmt::For {
                init: Some(Box::new(Stmt::Assign {
                    lhs: Expr::ident("i"),
                    op: ":=".to_string(),
                    rhs: Expr::int(0),
                })),
                cond: Some(Expr::binary(
                    "<",
                    Expr::ident("i"),
                    Expr::call("len", vec![os_args.clone()]),
                )),
                post: Some(Box::new(Stmt::IncDec {
                    expr: Expr::ident("i"),
                    is_inc: true,
                })),
                body: vec![Stmt::Assign {
                    lhs: Expr::ident("argv"),
                    op: "=".to_string(),
                    rhs: Expr::call("append", vec![Expr::ident("argv"), arg_bytes]),
                }],
            });

            let argc_type = self.resolve_soft(&parameters[0], node);
            let argc = Expr::call("len", vec![os_args]);
            let argc = if argc_type == "int" || argc_type.is_empty() {
                argc
            } else {
                Expr::Conv {
                    ty: argc_type,
                    expr: Box::new(argc),
                }
            };
            call_args.push(argc);
            call_args.push(Expr::ident("argv"));
        }

        let call = Expr::call(RENAMED_MAIN, call_args);
        if go_return.is_empty() {
            body.push(Stmt::Expr(call));
        } else {
            let status = if go_return == "int" {
                call
            } else {
                Expr::conv("int", call)
            };
            body.push(Stmt::Expr(Expr::call("os.Exit", vec![status])));
        }

        self.file.decls.push(Decl::Func(FuncDecl {
            name: "main".to_string(),
            params: Vec::new(),
            ret: String::new(),
            body,
        }));
        Ok(())
    }
}
