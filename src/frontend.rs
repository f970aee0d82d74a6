//! Runs the external clang front-end and captures its syntax-tree dump.
//!
//! The front-end is a black box: it preprocesses and parses the C input,
//! and everything downstream works from the textual dump on its stdout.

use std::path::Path;
use std::process::Command;

use log::debug;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrontendError {
    #[error("failed to run '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
    #[error("front-end rejected the input:\n{stderr}")]
    Rejected { stderr: String },
    #[error("front-end produced no dump output")]
    EmptyDump,
}

/// Options forwarded to the front-end invocation.
#[derive(Debug, Clone, Default)]
pub struct FrontendOptions {
    /// Path of the clang binary.
    pub clang: String,
    /// `-D` macro definitions.
    pub defines: Vec<String>,
    /// `-I` include search paths.
    pub include_paths: Vec<String>,
}

/// Produces the syntax-tree dump for one C source file.
pub fn ast_dump(options: &FrontendOptions, input: &Path) -> Result<String, FrontendError> {
    let clang = if options.clang.is_empty() {
        "clang"
    } else {
        options.clang.as_str()
    };

    let mut command = Command::new(clang);
    command
        .arg("-Xclang")
        .arg("-ast-dump")
        .arg("-fsyntax-only")
        .arg("-fno-color-diagnostics");
    for define in &options.defines {
        command.arg("-D").arg(define);
    }
    for path in &options.include_paths {
        command.arg("-I").arg(path);
    }
    command.arg(input);

    debug!("running front-end: {:?}", command);
    let output = command.output().map_err(|source| FrontendError::Spawn {
        command: clang.to_string(),
        source,
    })?;

    if !output.status.success() {
        return Err(FrontendError::Rejected {
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    let dump = String::from_utf8_lossy(&output.stdout).into_owned();
    if dump.trim().is_empty() {
        return Err(FrontendError::EmptyDump);
    }
    Ok(dump)
}
