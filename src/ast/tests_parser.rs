use crate::ast::nodes::{Node, NodeKind};
use crate::ast::parser::{parse, DumpError};

const HELLO_DUMP: &str = r#"TranslationUnitDecl 0x35e7ae0 <<invalid sloc>> <invalid sloc>
|-TypedefDecl 0x35e8000 <<invalid sloc>> <invalid sloc> implicit __int128_t '__int128'
`-FunctionDecl 0x35f3ef0 <tests/hello.c:3:1, line:6:1> line:3:5 main 'int (void)'
  `-CompoundStmt 0x35f4080 <col:16, line:6:1>
    `-ReturnStmt 0x35f4068 <line:5:5, col:12>
      `-IntegerLiteral 0x35f4048 <col:12> 'int' 0
"#;

fn depths(node: &Node, depth: usize, out: &mut Vec<(String, usize)>) {
    out.push((node.kind_name().to_string(), depth));
    for child in &node.children {
        depths(child, depth + 1, out);
    }
}

#[test]
fn builds_tree_from_indentation() {
    let root = parse(HELLO_DUMP).expect("parse");
    assert!(matches!(root.kind, NodeKind::TranslationUnitDecl));
    assert_eq!(root.children.len(), 2);

    let function = &root.children[1];
    assert!(matches!(function.kind, NodeKind::FunctionDecl(_)));
    let body = &function.children[0];
    assert!(matches!(body.kind, NodeKind::CompoundStmt));
    let ret = &body.children[0];
    assert!(matches!(ret.kind, NodeKind::ReturnStmt));
    assert!(matches!(
        ret.children[0].kind,
        NodeKind::IntegerLiteral { .. }
    ));
}

// Depth relations in the parsed tree equal indentation counts in the input.
#[test]
fn tree_depth_matches_indentation() {
    let root = parse(HELLO_DUMP).expect("parse");
    let mut observed = Vec::new();
    depths(&root, 0, &mut observed);

    let expected: Vec<(String, usize)> = HELLO_DUMP
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| {
            let indent = l.len() - l.trim_start_matches(['|', '`', '-', ' ']).len();
            let kind = l
                .trim_start_matches(['|', '`', '-', ' '])
                .split([' ', '<'])
                .next()
                .unwrap()
                .to_string();
            (kind, indent / 2)
        })
        .collect();

    let observed: Vec<(String, usize)> = observed
        .into_iter()
        .map(|(kind, depth)| (kind, depth))
        .collect();
    assert_eq!(observed, expected);
}

#[test]
fn null_placeholders_keep_their_child_slots() {
    let dump = "\
TranslationUnitDecl 0x1 <<invalid sloc>> <invalid sloc>
`-FunctionDecl 0x2 <loop.c:1:1, line:3:1> line:1:5 main 'int (void)'
  `-CompoundStmt 0x3 <col:16, line:3:1>
    `-ForStmt 0x4 <line:2:5, col:20>
      |-<<<NULL>>>
      |-<<<NULL>>>
      |-<<<NULL>>>
      |-<<<NULL>>>
      `-NullStmt 0x5 <col:20>
";
    let root = parse(dump).expect("parse");
    let for_stmt = &root.children[0].children[0].children[0];
    assert!(matches!(for_stmt.kind, NodeKind::ForStmt));
    assert_eq!(for_stmt.children.len(), 5);
    assert!(for_stmt.children[0].kind.is_null());
    assert!(matches!(for_stmt.children[4].kind, NodeKind::NullStmt));
}

#[test]
fn unknown_kinds_are_kept_as_subtrees() {
    let dump = "\
TranslationUnitDecl 0x1 <<invalid sloc>> <invalid sloc>
`-StaticAssertDecl 0x2 <sa.c:1:1, col:30>
  `-IntegerLiteral 0x3 <col:16> 'int' 1
";
    let root = parse(dump).expect("parse");
    let unknown = &root.children[0];
    assert!(matches!(unknown.kind, NodeKind::Unknown { .. }));
    assert_eq!(unknown.children.len(), 1);
}

#[test]
fn indentation_jump_is_malformed() {
    let dump = "\
TranslationUnitDecl 0x1 <<invalid sloc>> <invalid sloc>
|     `-IntegerLiteral 0x3 <col:16> 'int' 1
";
    match parse(dump) {
        Err(DumpError::Malformed { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected Malformed, got {:?}", other),
    }
}

#[test]
fn missing_attribute_is_malformed() {
    let dump = "\
TranslationUnitDecl 0x1 <<invalid sloc>> <invalid sloc>
`-BinaryOperator 0x2 <col:1> 'int'
";
    match parse(dump) {
        Err(DumpError::Malformed { line, reason, .. }) => {
            assert_eq!(line, 2);
            assert!(reason.contains("BinaryOperator"));
        }
        other => panic!("expected Malformed, got {:?}", other),
    }
}

#[test]
fn empty_dump_has_no_root() {
    assert!(matches!(parse(""), Err(DumpError::MissingRoot)));
}

#[test]
fn non_translation_unit_root_is_rejected() {
    let dump = "FunctionDecl 0x1 <f.c:1:1> col:5 f 'void (void)'\n";
    assert!(matches!(parse(dump), Err(DumpError::Malformed { .. })));
}

#[test]
fn node_kinds_serialize_by_name() {
    insta::assert_yaml_snapshot!(NodeKind::BreakStmt, @"BreakStmt");
    insta::assert_yaml_snapshot!(crate::ast::StorageClass::Extern, @"Extern");
}

#[test]
fn addresses_are_preserved() {
    let root = parse(HELLO_DUMP).expect("parse");
    assert_eq!(root.address, "0x35e7ae0");
    assert_eq!(root.children[1].address, "0x35f3ef0");
}
