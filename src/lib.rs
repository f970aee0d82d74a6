//! A C-to-Go source translator implemented in Rust.
//!
//! The pipeline reconstructs a C syntax tree from the textual dump produced
//! by an external clang front-end, resolves C type spellings into Go type
//! spellings, and walks the tree emitting a Go program that calls into the
//! hand-written `noarch` runtime for C standard-library behavior.

/// Contains the syntax-tree node types and the dump parser.
pub mod ast;
/// Contains the diagnostic engine for soft translation errors.
pub mod diagnostic;
/// Contains the error types for the application.
pub mod error;
/// Contains the clang front-end subprocess runner.
pub mod frontend;
/// Contains the Go output tree and its printer.
pub mod goast;
/// Contains the program context accumulated during translation.
pub mod program;
/// Contains the per-node translator.
pub mod transpiler;
/// Contains the type resolver and the cast engine.
pub mod types;
