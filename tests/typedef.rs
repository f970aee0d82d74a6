mod common;

use common::{assert_emitted, assert_not_emitted, transpile_dump_with_program};

// typedef unsigned int u32; u32 x = 7;
#[test]
fn typedef_resolves_through_the_context() {
    let dump = "\
TranslationUnitDecl 0x1 <<invalid sloc>> <invalid sloc>
|-TypedefDecl 0x2 <t.c:1:1, col:22> col:22 referenced u32 'unsigned int'
`-VarDecl 0x3 <line:2:1, col:9> col:5 x 'u32':'unsigned int' cinit
  `-ImplicitCastExpr 0x4 <col:9> 'u32':'unsigned int' <IntegralCast>
    `-IntegerLiteral 0x5 <col:9> 'int' 7
";
    let (text, program) = transpile_dump_with_program(dump);

    assert_eq!(program.typedef("u32"), Some("unsigned int"));
    assert_emitted(&text, "var x uint = uint(7)");
    // Typedefs resolve away; no Go alias is declared for them.
    assert_not_emitted(&text, "type u32");
}

// Chained typedefs resolve to the same primitive.
#[test]
fn chained_typedefs_reach_the_primitive() {
    let dump = "\
TranslationUnitDecl 0x1 <<invalid sloc>> <invalid sloc>
|-TypedefDecl 0x2 <t.c:1:1, col:22> col:22 referenced u32 'unsigned int'
|-TypedefDecl 0x3 <line:2:1, col:20> col:20 referenced word 'u32':'unsigned int'
`-VarDecl 0x4 <line:3:1, col:8> col:6 w 'word':'unsigned int'
";
    let (text, program) = transpile_dump_with_program(dump);

    assert_eq!(program.typedef("word"), Some("u32"));
    assert_emitted(&text, "var w uint");
}

// typedef of a pointer participates in the pointer rendition.
#[test]
fn pointer_typedef() {
    let dump = "\
TranslationUnitDecl 0x1 <<invalid sloc>> <invalid sloc>
|-TypedefDecl 0x2 <t.c:1:1, col:20> col:20 referenced intp 'int *'
`-VarDecl 0x3 <line:2:1, col:7> col:6 p 'intp':'int *'
";
    let (text, _) = transpile_dump_with_program(dump);
    assert_emitted(&text, "var p []int");
}
