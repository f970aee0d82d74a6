use crate::{
    ast::parser::DumpError, frontend::FrontendError, transpiler::TranspileError,
};
use thiserror::Error;

/// The main error type for the application.
///
/// Everything here is a hard failure: once one of these is raised the
/// translation is abandoned and no output file is written. Soft defects
/// (unknown node kinds, unresolved types, unsupported constructs) never
/// reach this type; they accumulate on the [`crate::diagnostic::DiagnosticEngine`]
/// instead.
#[derive(Debug, Error)]
pub enum Error {
    /// The clang front-end could not be run or rejected the input.
    #[error("{0}")]
    Frontend(#[from] FrontendError),
    /// The syntax-tree dump could not be interpreted.
    #[error("{0}")]
    Dump(#[from] DumpError),
    /// An internal invariant failed during translation.
    #[error("{0}")]
    Transpile(#[from] TranspileError),
    /// A file could not be read or written.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}
