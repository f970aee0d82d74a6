//! Shared test utilities for the transgo integration suite.
//!
//! Tests feed hand-written syntax-tree dumps through the full pipeline
//! (dump parser -> translator -> printer) and assert on the emitted Go
//! text, exactly the path the binary takes after the front-end ran.

use transgo::ast::parser::parse;
use transgo::goast::printer::Printer;
use transgo::program::Program;
use transgo::transpiler::transpile;

/// Runs a dump through the pipeline, returning the Go text and the
/// rendered diagnostics.
pub fn transpile_dump(dump: &str) -> (String, Vec<String>) {
    let _ = env_logger::builder().is_test(true).try_init();
    let root = parse(dump).expect("dump should parse");
    let mut program = Program::new();
    let file = transpile(&mut program, &root).expect("translation should succeed");
    let text = Printer::new().print_file(&file);
    let diagnostics = program
        .diagnostics
        .diagnostics()
        .iter()
        .map(|d| d.render())
        .collect();
    (text, diagnostics)
}

/// Like [`transpile_dump`] but hands the caller the program context too.
pub fn transpile_dump_with_program(dump: &str) -> (String, Program) {
    let _ = env_logger::builder().is_test(true).try_init();
    let root = parse(dump).expect("dump should parse");
    let mut program = Program::new();
    let file = transpile(&mut program, &root).expect("translation should succeed");
    let text = Printer::new().print_file(&file);
    (text, program)
}

/// Asserts that the emitted text contains a fragment, with the whole
/// output in the failure message.
#[track_caller]
pub fn assert_emitted(text: &str, fragment: &str) {
    assert!(
        text.contains(fragment),
        "expected emitted Go to contain {:?}\n--- emitted ---\n{}",
        fragment,
        text
    );
}

/// Asserts the fragment is absent.
#[track_caller]
pub fn assert_not_emitted(text: &str, fragment: &str) {
    assert!(
        !text.contains(fragment),
        "expected emitted Go to not contain {:?}\n--- emitted ---\n{}",
        fragment,
        text
    );
}

/// Wraps a list of statement-dump lines in a `main` skeleton at the right
/// indentation, so statement tests stay readable.
pub fn dump_with_main_body(body_lines: &str) -> String {
    let mut dump = String::from(
        "TranslationUnitDecl 0x1 <<invalid sloc>> <invalid sloc>\n\
         `-FunctionDecl 0x2 <input.c:1:1, line:9:1> line:1:5 main 'int (void)'\n\
         \x20\x20`-CompoundStmt 0x3 <col:16, line:9:1>\n",
    );
    for line in body_lines.lines() {
        dump.push_str("    ");
        dump.push_str(line);
        dump.push('\n');
    }
    dump
}
