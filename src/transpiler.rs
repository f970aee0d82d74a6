//! Walks the C syntax tree and emits the Go program.
//!
//! The walk is a single top-down pass, child-first, so every parent sees
//! fully translated children and context registered while translating
//! child *i* is visible to child *i+1*. Three return shapes exist:
//! declarations append to the output file, statements append to the
//! enclosing block, and expressions come back with their C type so the
//! cast engine can be applied upstream.

use log::debug;
use thiserror::Error;

use crate::ast::{Node, NodeKind};
use crate::diagnostic::TranslationDefect;
use crate::goast::{Expr, File};
use crate::program::Program;

mod call;
mod declarations;
mod expressions;
mod functions;
mod operators;
mod statements;
mod switch;

/// Hard translation failures. Everything else the translator meets is a
/// soft defect that lands on the diagnostic engine.
#[derive(Debug, Error)]
pub enum TranspileError {
    /// An invariant the front-end guarantees did not hold.
    #[error("internal invariant violated: {message}")]
    InternalInvariant { message: String },
}

impl TranspileError {
    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        TranspileError::InternalInvariant {
            message: message.into(),
        }
    }
}

/// Per-function emission states; see [`Transpiler::transpile_function`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FunctionState {
    Header,
    Params,
    Body,
    Done,
}

/// The tree walker. Owns the output file while translation runs and
/// borrows the program context for everything else.
pub struct Transpiler<'a> {
    pub(crate) program: &'a mut Program,
    pub(crate) file: File,
    /// C return-type spelling of the function being translated.
    pub(crate) current_return: Option<String>,
    pub(crate) current_function: Option<String>,
    pub(crate) anon_records: usize,
}

/// Translates one parsed translation unit into a Go file.
pub fn transpile(program: &mut Program, root: &Node) -> Result<File, TranspileError> {
    let mut transpiler = Transpiler::new(program);
    transpiler.transpile_unit(root)?;
    Ok(transpiler.finish())
}

impl<'a> Transpiler<'a> {
    pub fn new(program: &'a mut Program) -> Self {
        call::register_builtins(program);
        let file = File {
            package: program.package_name.clone(),
            ..File::default()
        };
        Transpiler {
            program,
            file,
            current_return: None,
            current_function: None,
            anon_records: 0,
        }
    }

    /// Finalizes the output file, folding the accumulated imports in.
    pub fn finish(mut self) -> File {
        self.file.imports = self.program.imports();
        self.file
    }

    /// Iterates the translation unit's children in order. Declarations the
    /// front-end injected are registered for type resolution but not
    /// emitted; only the user's own declarations reach the output.
    pub fn transpile_unit(&mut self, root: &Node) -> Result<(), TranspileError> {
        if !matches!(root.kind, NodeKind::TranslationUnitDecl) {
            return Err(TranspileError::invariant(format!(
                "expected a TranslationUnitDecl root, found {}",
                root.kind_name()
            )));
        }

        for child in &root.children {
            let emit = self.is_user_decl(child);
            match &child.kind {
                NodeKind::NullPlaceholder => {}
                NodeKind::TypedefDecl { .. } => self.transpile_typedef(child),
                NodeKind::RecordDecl { .. } => {
                    self.transpile_record(child, None, emit)?;
                }
                NodeKind::EnumDecl { .. } => self.transpile_enum(child, emit)?,
                NodeKind::FunctionDecl(_) => self.transpile_function(child, emit)?,
                NodeKind::VarDecl(_) => self.transpile_global_var(child, emit)?,
                NodeKind::MaxFieldAlignmentAttr { .. } | NodeKind::IncompleteArrayType => {
                    // Accepted, structurally parsed, and of no further use.
                }
                NodeKind::Unknown { raw } => {
                    self.warn_unknown(raw, child);
                }
                _ => {
                    self.unsupported(child, child.kind_name());
                }
            }
        }

        debug!(
            "translated unit into {} top-level declarations",
            self.file.decls.len()
        );
        Ok(())
    }

    /// True when the node comes from the user's input file rather than
    /// from a declaration the front-end injected.
    pub(crate) fn is_user_decl(&self, node: &Node) -> bool {
        let Some(position) = &node.position else {
            return false;
        };
        if position.is_synthetic() {
            return false;
        }
        match (&self.program.input_file, &position.file) {
            (Some(input), Some(file)) => input == file,
            (Some(_), None) => false,
            (None, _) => true,
        }
    }

    pub(crate) fn warn_unknown(&mut self, raw: &str, node: &Node) {
        let kind = raw.split_whitespace().next().unwrap_or("?").to_string();
        self.program
            .diagnostics
            .report_defect(TranslationDefect::UnknownNodeKind {
                kind,
                position: node.position.clone(),
            });
    }

    pub(crate) fn unsupported(&mut self, node: &Node, construct: &str) {
        self.program
            .diagnostics
            .report_defect(TranslationDefect::UnsupportedConstruct {
                construct: construct.to_string(),
                position: node.position.clone(),
            });
    }

    /// Placeholder expression emitted for a soft failure.
    pub(crate) fn placeholder(&self, node: &Node) -> (Expr, String) {
        (
            Expr::Raw(format!("0 /* {} */", node.kind_name())),
            node.type_spelling.clone().unwrap_or_else(|| "int".to_string()),
        )
    }

    /// The non-placeholder children, i.e. with absent `<<<NULL>>>` slots
    /// dropped. Statement kinds with positional slots must not use this.
    pub(crate) fn real_children(node: &Node) -> Vec<&Node> {
        node.children.iter().filter(|c| !c.kind.is_null()).collect()
    }
}

#[cfg(test)]
mod tests_transpiler;
