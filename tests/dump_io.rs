mod common;

use std::io::Write;

const DUMP: &str = "\
TranslationUnitDecl 0x1 <<invalid sloc>> <invalid sloc>
`-FunctionDecl 0x2 <hello.c:1:1, line:3:1> line:1:5 main 'int (void)'
  `-CompoundStmt 0x3 <col:16, line:3:1>
    `-ReturnStmt 0x4 <line:2:5, col:12>
      `-IntegerLiteral 0x5 <col:12> 'int' 0
";

// A dump that went through the filesystem (the driver's --from-dump path)
// must translate exactly like one handed over in memory.
#[test]
fn dump_read_back_from_disk_translates_identically() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(DUMP.as_bytes()).expect("write dump");

    let from_disk = std::fs::read_to_string(file.path()).expect("read dump");
    let (disk_text, disk_diags) = common::transpile_dump(&from_disk);
    let (memory_text, memory_diags) = common::transpile_dump(DUMP);

    assert_eq!(disk_text, memory_text);
    assert_eq!(disk_diags, memory_diags);
}

// Windows line endings survive the line-oriented parser.
#[test]
fn carriage_returns_do_not_change_the_output() {
    let crlf = DUMP.replace('\n', "\r\n");
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(crlf.as_bytes()).expect("write dump");

    let from_disk = std::fs::read_to_string(file.path()).expect("read dump");
    let (crlf_text, _) = common::transpile_dump(&from_disk);
    let (lf_text, _) = common::transpile_dump(DUMP);
    assert_eq!(crlf_text, lf_text);
}
