mod common;

use common::{assert_emitted, dump_with_main_body, transpile_dump};

// int *p = 0; if (p) return 1; return 0;
#[test]
fn null_initialized_pointer_and_nil_test() {
    let body = "\
|-DeclStmt 0x10 <line:2:5, col:15>
| `-VarDecl 0x11 <col:5, col:14> col:10 used p 'int *' cinit
|   `-ImplicitCastExpr 0x12 <col:14> 'int *' <NullToPointer>
|     `-IntegerLiteral 0x13 <col:14> 'int' 0
|-IfStmt 0x14 <line:3:5, col:19>
| |-ImplicitCastExpr 0x15 <col:9> 'int *' <LValueToRValue>
| | `-DeclRefExpr 0x16 <col:9> 'int *' lvalue Var 0x11 'p' 'int *'
| `-ReturnStmt 0x17 <col:12, col:19>
|   `-IntegerLiteral 0x18 <col:19> 'int' 1
`-ReturnStmt 0x19 <line:4:5, col:12>
  `-IntegerLiteral 0x1a <col:12> 'int' 0
";
    let (text, diagnostics) = transpile_dump(&dump_with_main_body(body));

    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    assert_emitted(&text, "var p []int = nil");
    assert_emitted(&text, "if p != nil {\n\t\treturn 1\n\t}");
}

// Pointer arithmetic adjusts the slice window, not raw bytes.
#[test]
fn pointer_addition_reslices() {
    let body = "\
|-DeclStmt 0x10 <line:2:5, col:20>
| `-VarDecl 0x11 <col:5, col:18> col:10 used q 'int *' cinit
|   `-BinaryOperator 0x12 <col:14, col:18> 'int *' '+'
|     |-ImplicitCastExpr 0x13 <col:14> 'int *' <LValueToRValue>
|     | `-DeclRefExpr 0x14 <col:14> 'int *' lvalue Var 0x20 'base' 'int *'
|     `-IntegerLiteral 0x15 <col:18> 'int' 2
`-ReturnStmt 0x16 <line:3:5, col:12>
  `-IntegerLiteral 0x17 <col:12> 'int' 0
";
    let (text, _) = transpile_dump(&dump_with_main_body(body));
    assert_emitted(&text, "var q []int = base[2:]");
}

// p - 1 cannot widen a slice window backwards; instead of a
// plausible-looking wrong pointer the output carries a marked stub and a
// diagnostic.
#[test]
fn pointer_subtraction_is_stubbed() {
    let body = "\
|-DeclStmt 0x10 <line:2:5, col:20>
| `-VarDecl 0x11 <col:5, col:18> col:10 used q 'int *' cinit
|   `-BinaryOperator 0x12 <col:14, col:18> 'int *' '-'
|     |-ImplicitCastExpr 0x13 <col:14> 'int *' <LValueToRValue>
|     | `-DeclRefExpr 0x14 <col:14> 'int *' lvalue Var 0x20 'base' 'int *'
|     `-IntegerLiteral 0x15 <col:18> 'int' 1
`-ReturnStmt 0x16 <line:3:5, col:12>
  `-IntegerLiteral 0x17 <col:12> 'int' 0
";
    let (text, diagnostics) = transpile_dump(&dump_with_main_body(body));

    assert_emitted(&text, "0 /* BinaryOperator */");
    assert!(!text.contains("base[") && !text.contains("base -"), "{}", text);
    assert!(
        diagnostics.iter().any(|d| d.contains("pointer subtraction")),
        "{:?}",
        diagnostics
    );
}

// p -= 1 has no Go rendition either (`-=` is not defined on slices); the
// statement becomes a marked stub instead of invalid Go.
#[test]
fn pointer_compound_decrement_is_stubbed() {
    let body = "\
|-CompoundAssignOperator 0x10 <line:2:5, col:10> 'int *' '-=' ComputeLHSTy='int *' ComputeResultTy='int *'
| |-DeclRefExpr 0x11 <col:5> 'int *' lvalue Var 0x20 'p' 'int *'
| `-IntegerLiteral 0x12 <col:10> 'int' 1
`-ReturnStmt 0x13 <line:3:5, col:12>
  `-IntegerLiteral 0x14 <col:12> 'int' 0
";
    let (text, diagnostics) = transpile_dump(&dump_with_main_body(body));

    assert_emitted(&text, "_ = 0 /* pointer subtraction */");
    assert!(!text.contains("p -="), "{}", text);
    assert!(
        diagnostics.iter().any(|d| d.contains("pointer subtraction")),
        "{:?}",
        diagnostics
    );
}

// Pointer advance through a compound assignment still reslices.
#[test]
fn pointer_compound_increment_reslices() {
    let body = "\
|-CompoundAssignOperator 0x10 <line:2:5, col:10> 'int *' '+=' ComputeLHSTy='int *' ComputeResultTy='int *'
| |-DeclRefExpr 0x11 <col:5> 'int *' lvalue Var 0x20 'p' 'int *'
| `-IntegerLiteral 0x12 <col:10> 'int' 2
`-ReturnStmt 0x13 <line:3:5, col:12>
  `-IntegerLiteral 0x14 <col:12> 'int' 0
";
    let (text, _) = transpile_dump(&dump_with_main_body(body));
    assert_emitted(&text, "p = p[2:]");
}

// Dereference of a slice-backed pointer indexes the first element.
#[test]
fn dereference_reads_element_zero() {
    let body = "\
`-ReturnStmt 0x10 <line:2:5, col:14>
  `-ImplicitCastExpr 0x11 <col:12, col:13> 'int' <LValueToRValue>
    `-UnaryOperator 0x12 <col:12, col:13> 'int' lvalue prefix '*'
      `-ImplicitCastExpr 0x13 <col:13> 'int *' <LValueToRValue>
        `-DeclRefExpr 0x14 <col:13> 'int *' lvalue Var 0x20 'p' 'int *'
";
    let (text, _) = transpile_dump(&dump_with_main_body(body));
    assert_emitted(&text, "return p[0]");
}

// p == 0 compares against nil through the NULL recognition.
#[test]
fn pointer_equality_with_null_macro() {
    let body = "\
`-ReturnStmt 0x10 <line:2:5, col:20>
  `-ImplicitCastExpr 0x11 <col:12, col:20> 'int' <IntegralCast>
    `-BinaryOperator 0x12 <col:12, col:20> 'int' '=='
      |-ImplicitCastExpr 0x13 <col:12> 'int *' <LValueToRValue>
      | `-DeclRefExpr 0x14 <col:12> 'int *' lvalue Var 0x20 'p' 'int *'
      `-ImplicitCastExpr 0x15 <col:17> 'int *' <NullToPointer>
        `-IntegerLiteral 0x16 <col:17> 'int' 0
";
    let (text, _) = transpile_dump(&dump_with_main_body(body));
    assert_emitted(&text, "p == nil");
}
