mod common;

use common::{assert_emitted, assert_not_emitted, transpile_dump};

// int main(void) { return 0; }
#[test]
fn minimal_main_returns_zero() {
    let dump = "\
TranslationUnitDecl 0x1 <<invalid sloc>> <invalid sloc>
`-FunctionDecl 0x2 <hello.c:1:1, line:3:1> line:1:5 main 'int (void)'
  `-CompoundStmt 0x3 <col:16, line:3:1>
    `-ReturnStmt 0x4 <line:2:5, col:12>
      `-IntegerLiteral 0x5 <col:12> 'int' 0
";
    let (text, diagnostics) = transpile_dump(dump);

    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    assert_eq!(text.matches("func main(").count(), 1, "{}", text);
    assert_emitted(&text, "func cMain() int {\n\treturn 0\n}");
    assert_emitted(&text, "os.Exit(cMain())");
}

// int add(int a, int b) { return a + b; }
#[test]
fn add_keeps_parameters_and_avoids_spurious_conversions() {
    let dump = "\
TranslationUnitDecl 0x1 <<invalid sloc>> <invalid sloc>
`-FunctionDecl 0x2 <add.c:1:1, line:3:1> line:1:5 add 'int (int, int)'
  |-ParmVarDecl 0x3 <col:9, col:13> col:13 used a 'int'
  |-ParmVarDecl 0x4 <col:16, col:20> col:20 used b 'int'
  `-CompoundStmt 0x5 <col:23, line:3:1>
    `-ReturnStmt 0x6 <line:2:5, col:16>
      `-BinaryOperator 0x7 <col:12, col:16> 'int' '+'
        |-ImplicitCastExpr 0x8 <col:12> 'int' <LValueToRValue>
        | `-DeclRefExpr 0x9 <col:12> 'int' lvalue ParmVar 0x3 'a' 'int'
        `-ImplicitCastExpr 0xa <col:16> 'int' <LValueToRValue>
          `-DeclRefExpr 0xb <col:16> 'int' lvalue ParmVar 0x4 'b' 'int'
";
    let (text, diagnostics) = transpile_dump(dump);

    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    assert_emitted(&text, "func add(a int, b int) int {\n\treturn a + b\n}");
    assert_not_emitted(&text, "int(a)");
}

// main(int argc, char **argv) gets the marshalled os.Args bridge.
#[test]
fn main_with_arguments_marshals_os_args() {
    let dump = "\
TranslationUnitDecl 0x1 <<invalid sloc>> <invalid sloc>
`-FunctionDecl 0x2 <args.c:1:1, line:3:1> line:1:5 main 'int (int, char **)'
  |-ParmVarDecl 0x3 <col:10, col:14> col:14 used argc 'int'
  |-ParmVarDecl 0x4 <col:20, col:27> col:27 used argv 'char **'
  `-CompoundStmt 0x5 <col:33, line:3:1>
    `-ReturnStmt 0x6 <line:2:5, col:12>
      `-ImplicitCastExpr 0x7 <col:12> 'int' <LValueToRValue>
        `-DeclRefExpr 0x8 <col:12> 'int' lvalue ParmVar 0x3 'argc' 'int'
";
    let (text, diagnostics) = transpile_dump(dump);

    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    assert_emitted(&text, "func cMain(argc int, argv [][]byte) int {");
    assert_emitted(&text, "var argv [][]byte");
    assert_emitted(&text, "for i := 0; i < len(os.Args); i++ {");
    assert_emitted(&text, "argv = append(argv, append([]byte(os.Args[i]), 0))");
    assert_emitted(&text, "os.Exit(cMain(len(os.Args), argv))");
}

// A call casts each fixed argument to its parameter type.
#[test]
fn call_arguments_are_cast_to_parameter_types() {
    let dump = "\
TranslationUnitDecl 0x1 <<invalid sloc>> <invalid sloc>
|-FunctionDecl 0x2 <call.c:1:1, col:30> col:6 used wide 'void (long long)'
| `-ParmVarDecl 0x3 <col:11, col:21> col:21 n 'long long'
`-FunctionDecl 0x4 <line:2:1, line:4:1> line:2:5 main 'int (void)'
  `-CompoundStmt 0x5 <col:16, line:4:1>
    |-CallExpr 0x6 <line:3:5, col:11> 'void'
    | |-ImplicitCastExpr 0x7 <col:5> 'void (*)(long long)' <FunctionToPointerDecay>
    | | `-DeclRefExpr 0x8 <col:5> 'void (long long)' Function 0x2 'wide' 'void (long long)'
    | `-IntegerLiteral 0x9 <col:10> 'int' 7
    `-ReturnStmt 0xa <line:3:14, col:21>
      `-IntegerLiteral 0xb <col:21> 'int' 0
";
    let (text, diagnostics) = transpile_dump(dump);

    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    assert_emitted(&text, "wide(int64(7))");
}
