use crate::ast::position::SourcePosition;
use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};

/// Diagnostic severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Error,
    Warning,
    Note,
}

/// Individual diagnostic carrying the position of the offending node
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
    pub position: Option<SourcePosition>,
}

impl Diagnostic {
    pub fn render(&self) -> String {
        let level = match self.level {
            DiagnosticLevel::Error => "error",
            DiagnosticLevel::Warning => "warning",
            DiagnosticLevel::Note => "note",
        };
        match &self.position {
            Some(position) => format!("{}: {}: {}", position, level, self.message),
            None => format!("{}: {}", level, self.message),
        }
    }
}

/// Soft translation defects.
///
/// Each of these produces a placeholder in the output and a diagnostic on
/// the engine, then translation continues. Compare with [`crate::error::Error`],
/// whose members abort the translation.
#[derive(Debug, thiserror::Error)]
pub enum TranslationDefect {
    #[error("unknown node kind '{kind}'")]
    UnknownNodeKind { kind: String, position: Option<SourcePosition> },
    #[error("cannot resolve C type '{spelling}'")]
    UnknownType { spelling: String, position: Option<SourcePosition> },
    #[error("unsupported construct: {construct}")]
    UnsupportedConstruct { construct: String, position: Option<SourcePosition> },
    #[error("unresolved symbol '{name}'")]
    UnresolvedSymbol { name: String, position: Option<SourcePosition> },
}

impl TranslationDefect {
    fn position(&self) -> Option<SourcePosition> {
        match self {
            TranslationDefect::UnknownNodeKind { position, .. }
            | TranslationDefect::UnknownType { position, .. }
            | TranslationDefect::UnsupportedConstruct { position, .. }
            | TranslationDefect::UnresolvedSymbol { position, .. } => position.clone(),
        }
    }
}

/// Diagnostic engine for collecting and reporting soft translation defects
#[derive(Debug)]
pub struct DiagnosticEngine {
    pub diagnostics: Vec<Diagnostic>,
    pub warnings_as_errors: bool,
    pub disable_all_warnings: bool,
}

impl Default for DiagnosticEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticEngine {
    pub fn new() -> Self {
        DiagnosticEngine {
            diagnostics: Vec::new(),
            warnings_as_errors: false,
            disable_all_warnings: false,
        }
    }

    fn report(&mut self, level: DiagnosticLevel, message: String, position: Option<SourcePosition>) {
        if level == DiagnosticLevel::Warning && self.disable_all_warnings {
            return;
        }

        let final_level = if level == DiagnosticLevel::Warning && self.warnings_as_errors {
            DiagnosticLevel::Error
        } else {
            level
        };

        self.diagnostics.push(Diagnostic {
            level: final_level,
            message,
            position,
        });
    }

    pub fn report_defect(&mut self, defect: TranslationDefect) {
        let position = defect.position();
        self.report(DiagnosticLevel::Warning, defect.to_string(), position);
    }

    pub fn report_note(&mut self, message: String, position: Option<SourcePosition>) {
        self.report(DiagnosticLevel::Note, message, position);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.level == DiagnosticLevel::Error)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Print all diagnostics to stderr
    pub fn print_diagnostics(&self) {
        for diag in &self.diagnostics {
            eprintln!("{}", diag.render());
        }
    }
}

/// Renders a hard dump-parse error against the offending dump line
pub struct ErrorFormatter {
    pub use_colors: bool,
}

impl Default for ErrorFormatter {
    fn default() -> Self {
        ErrorFormatter { use_colors: true }
    }
}

impl ErrorFormatter {
    /// Format a malformed-dump report with the source line annotated
    pub fn format_dump_error(&self, message: &str, line: &str, line_number: usize) -> String {
        let renderer = if self.use_colors {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let snippet = Snippet::source(line)
            .line_start(line_number)
            .path("<ast-dump>")
            .annotation(AnnotationKind::Primary.span(0..line.len()));

        let group = Level::ERROR.primary_title(message).element(snippet);
        let report = &[group];
        renderer.render(report).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_as_errors_promotes_defects() {
        let mut engine = DiagnosticEngine::new();
        engine.warnings_as_errors = true;
        engine.report_defect(TranslationDefect::UnknownType {
            spelling: "struct mystery".to_string(),
            position: None,
        });
        assert!(engine.has_errors());
    }

    #[test]
    fn disabled_warnings_are_dropped() {
        let mut engine = DiagnosticEngine::new();
        engine.disable_all_warnings = true;
        engine.report_defect(TranslationDefect::UnresolvedSymbol {
            name: "ghost".to_string(),
            position: None,
        });
        assert!(engine.diagnostics().is_empty());
    }

    #[test]
    fn defect_message_carries_position() {
        let mut engine = DiagnosticEngine::new();
        engine.report_defect(TranslationDefect::UnknownNodeKind {
            kind: "OMPParallelDirective".to_string(),
            position: Some(SourcePosition {
                raw: "omp.c:3:1".to_string(),
                file: Some("omp.c".to_string()),
                line: Some(3),
                column: Some(1),
            }),
        });
        let rendered = engine.diagnostics()[0].render();
        assert_eq!(
            rendered,
            "omp.c:3:1: warning: unknown node kind 'OMPParallelDirective'"
        );
    }

    #[test]
    fn dump_error_rendering_names_the_dump() {
        let formatter = ErrorFormatter { use_colors: false };
        let rendered = formatter.format_dump_error(
            "missing name attribute for FunctionDecl",
            "|-FunctionDecl 0x1234 <hello.c:1:1> 'int ()'",
            7,
        );
        assert!(rendered.contains("<ast-dump>"));
        assert!(rendered.contains("FunctionDecl"));
    }
}
