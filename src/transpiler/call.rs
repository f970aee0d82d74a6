//! Function calls and the builtin C standard-library table.
//!
//! Known stdlib functions are substituted with their `noarch` shims (or a
//! native Go function where one exists) and carry full signatures, so
//! arguments are cast per parameter even when the user never declared the
//! function. Everything else resolves through the program context.

use crate::ast::{Node, NodeKind};
use crate::diagnostic::TranslationDefect;
use crate::goast::{sanitize_ident, Expr};
use crate::program::{FunctionSignature, Program};
use crate::transpiler::{TranspileError, Transpiler};

/// C name, substituted Go callee, extra import, return type, parameter
/// types, variadic.
type Builtin = (
    &'static str,
    &'static str,
    Option<&'static str>,
    &'static str,
    &'static [&'static str],
    bool,
);

/// The substituted standard library. `noarch.` entries resolve against the
/// configured runtime import; the rest name ordinary Go packages.
const BUILTINS: &[Builtin] = &[
    // stdio.h
    ("printf", "noarch.Printf", None, "int", &["const char *"], true),
    ("fprintf", "noarch.Fprintf", None, "int", &["FILE *", "const char *"], true),
    ("sprintf", "noarch.Sprintf", None, "int", &["char *", "const char *"], true),
    ("scanf", "noarch.Scanf", None, "int", &["const char *"], true),
    ("fscanf", "noarch.Fscanf", None, "int", &["FILE *", "const char *"], true),
    ("puts", "noarch.Puts", None, "int", &["const char *"], false),
    ("putchar", "noarch.Putchar", None, "int", &["int"], false),
    ("getchar", "noarch.Getchar", None, "int", &[], false),
    ("fopen", "noarch.Fopen", None, "FILE *", &["const char *", "const char *"], false),
    ("fclose", "noarch.Fclose", None, "int", &["FILE *"], false),
    ("fgetc", "noarch.Fgetc", None, "int", &["FILE *"], false),
    ("fputc", "noarch.Fputc", None, "int", &["int", "FILE *"], false),
    ("fgets", "noarch.Fgets", None, "char *", &["char *", "int", "FILE *"], false),
    // stdlib.h
    ("exit", "os.Exit", Some("os"), "void", &["int"], false),
    ("abort", "noarch.Abort", None, "void", &[], false),
    ("malloc", "noarch.Malloc", None, "void *", &["unsigned long"], false),
    ("calloc", "noarch.Calloc", None, "void *", &["unsigned long", "unsigned long"], false),
    ("free", "noarch.Free", None, "void", &["void *"], false),
    ("atoi", "noarch.Atoi", None, "int", &["const char *"], false),
    ("abs", "noarch.Abs", None, "int", &["int"], false),
    // string.h
    ("strlen", "noarch.Strlen", None, "unsigned long", &["const char *"], false),
    ("strcpy", "noarch.Strcpy", None, "char *", &["char *", "const char *"], false),
    ("strncpy", "noarch.Strncpy", None, "char *", &["char *", "const char *", "unsigned long"], false),
    ("strcat", "noarch.Strcat", None, "char *", &["char *", "const char *"], false),
    ("strcmp", "noarch.Strcmp", None, "int", &["const char *", "const char *"], false),
    ("memset", "noarch.Memset", None, "void *", &["void *", "int", "unsigned long"], false),
    ("memcpy", "noarch.Memcpy", None, "void *", &["void *", "const void *", "unsigned long"], false),
    // ctype.h
    ("isalpha", "noarch.IsAlpha", None, "int", &["int"], false),
    ("isdigit", "noarch.IsDigit", None, "int", &["int"], false),
    ("isspace", "noarch.IsSpace", None, "int", &["int"], false),
    ("toupper", "noarch.ToUpper", None, "int", &["int"], false),
    ("tolower", "noarch.ToLower", None, "int", &["int"], false),
    // math.h maps straight onto the Go math package.
    ("sqrt", "math.Sqrt", Some("math"), "double", &["double"], false),
    ("pow", "math.Pow", Some("math"), "double", &["double", "double"], false),
    ("fabs", "math.Abs", Some("math"), "double", &["double"], false),
    ("floor", "math.Floor", Some("math"), "double", &["double"], false),
    ("ceil", "math.Ceil", Some("math"), "double", &["double"], false),
    ("sin", "math.Sin", Some("math"), "double", &["double"], false),
    ("cos", "math.Cos", Some("math"), "double", &["double"], false),
    ("exp", "math.Exp", Some("math"), "double", &["double"], false),
    ("log", "math.Log", Some("math"), "double", &["double"], false),
];

/// Seeds the program context with the substituted standard library. User
/// declarations of the same names arrive later and lose the race, which
/// is what keeps `printf` calling the runtime.
pub(crate) fn register_builtins(program: &mut Program) {
    for (c_name, go_name, import, return_type, parameters, is_variadic) in BUILTINS {
        program.add_function(
            c_name,
            FunctionSignature {
                parameters: parameters.iter().map(|p| p.to_string()).collect(),
                return_type: return_type.to_string(),
                is_variadic: *is_variadic,
                substitution: Some((go_name.to_string(), import.map(str::to_string))),
            },
        );
    }
}

impl Transpiler<'_> {
    pub(crate) fn transpile_call(&mut self, node: &Node) -> Result<(Expr, String), TranspileError> {
        let children = Self::real_children(node);
        let (&callee, args) = children.split_first().ok_or_else(|| {
            TranspileError::invariant("CallExpr without a callee")
        })?;

        if let Some(name) = Self::callee_name(callee) {
            return self.transpile_named_call(node, &name, args);
        }

        // Calling through a function-pointer value: the parameter types
        // come from the callee's own type spelling.
        let (callee_expr, callee_type) = self.transpile_expr(callee)?;
        let signature = crate::types::function::parse_function_pointer(&callee_type);
        let mut call_args = Vec::new();
        for (index, arg) in args.iter().enumerate() {
            let target = signature
                .as_ref()
                .and_then(|s| s.parameters.get(index))
                .cloned();
            let expr = match target {
                Some(target) => self.transpile_expr_cast(arg, &target)?,
                None => self.transpile_expr(arg)?.0,
            };
            call_args.push(expr);
        }
        let expr = Expr::Call {
            callee: Box::new(callee_expr),
            args: call_args,
        };
        Ok((expr, self.expr_type(node)?))
    }

    /// Digs the referenced name out of the callee, through the decay cast
    /// the front-end wraps it in.
    fn callee_name(node: &Node) -> Option<String> {
        match &node.kind {
            NodeKind::DeclRefExpr { name, referenced_kind } if referenced_kind == "Function" => {
                Some(name.clone())
            }
            NodeKind::ImplicitCastExpr { .. } | NodeKind::ParenExpr => {
                node.children.iter().find_map(Self::callee_name)
            }
            _ => None,
        }
    }

    fn transpile_named_call(
        &mut self,
        node: &Node,
        name: &str,
        args: &[&Node],
    ) -> Result<(Expr, String), TranspileError> {
        let signature = self.program.function(name).cloned();

        let (go_name, parameters, is_variadic) = match &signature {
            Some(signature) => {
                let go_name = match &signature.substitution {
                    Some((target, import)) => {
                        if let Some(import) = import {
                            self.program.add_import(import);
                        }
                        if let Some(shim) = target.strip_prefix("noarch.") {
                            let prefix = self.program.import_runtime();
                            format!("{}.{}", prefix, shim)
                        } else {
                            target.clone()
                        }
                    }
                    None => sanitize_ident(name),
                };
                (go_name, signature.parameters.clone(), signature.is_variadic)
            }
            None => {
                // No declaration in sight; emit the raw name and translate
                // the arguments as they come.
                self.program
                    .diagnostics
                    .report_defect(TranslationDefect::UnresolvedSymbol {
                        name: name.to_string(),
                        position: node.position.clone(),
                    });
                (sanitize_ident(name), Vec::new(), true)
            }
        };

        let mut call_args = Vec::new();
        for (index, arg) in args.iter().enumerate() {
            match parameters.get(index) {
                Some(target) => {
                    // Fixed arguments are cast to their parameter type.
                    call_args.push(self.transpile_expr_cast(arg, target)?);
                }
                None => {
                    // Variadic tail: passed through uncast; string
                    // literals already arrive as byte arrays via their
                    // decay cast.
                    if !is_variadic {
                        self.unsupported(
                            node,
                            &format!("extra argument in call to '{}'", name),
                        );
                    }
                    call_args.push(self.transpile_expr(arg)?.0);
                }
            }
        }

        let expr = Expr::Call {
            callee: Box::new(Expr::ident(&go_name)),
            args: call_args,
        };
        Ok((expr, self.expr_type(node)?))
    }
}
