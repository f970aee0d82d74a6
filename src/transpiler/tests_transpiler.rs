use crate::ast::parser::parse;
use crate::goast::printer::Printer;
use crate::program::Program;
use crate::transpiler::transpile;

fn transpile_dump(dump: &str) -> (String, Program) {
    let _ = env_logger::builder().is_test(true).try_init();
    let root = parse(dump).expect("parse dump");
    let mut program = Program::new();
    let file = transpile(&mut program, &root).expect("transpile");
    (Printer::new().print_file(&file), program)
}

#[test]
fn main_is_renamed_and_bridged() {
    let dump = "\
TranslationUnitDecl 0x1 <<invalid sloc>> <invalid sloc>
`-FunctionDecl 0x2 <hello.c:1:1, line:3:1> line:1:5 main 'int (void)'
  `-CompoundStmt 0x3 <col:16, line:3:1>
    `-ReturnStmt 0x4 <line:2:5, col:12>
      `-IntegerLiteral 0x5 <col:12> 'int' 0
";
    let (text, _) = transpile_dump(dump);
    assert!(text.contains("func cMain() int {\n\treturn 0\n}"), "{}", text);
    assert!(text.contains("func main() {\n\tos.Exit(cMain())\n}"), "{}", text);
    assert!(text.contains("\"os\""), "{}", text);
    // Exactly one function is named main.
    assert_eq!(text.matches("func main(").count(), 1, "{}", text);
}

// Every function declaration with a body yields exactly one output
// function with the same name and arity.
#[test]
fn bodied_functions_survive_one_to_one() {
    let dump = "\
TranslationUnitDecl 0x1 <<invalid sloc>> <invalid sloc>
|-FunctionDecl 0x2 <m.c:1:1, line:1:30> col:5 used twice 'int (int)'
| |-ParmVarDecl 0x3 <col:11, col:15> col:15 used n 'int'
| `-CompoundStmt 0x4 <col:18, col:30>
|   `-ReturnStmt 0x5 <col:20, col:29>
|     `-BinaryOperator 0x6 <col:27, col:29> 'int' '*'
|       |-ImplicitCastExpr 0x7 <col:27> 'int' <LValueToRValue>
|       | `-DeclRefExpr 0x8 <col:27> 'int' lvalue ParmVar 0x3 'n' 'int'
|       `-IntegerLiteral 0x9 <col:29> 'int' 2
|-FunctionDecl 0xa <line:2:1, col:20> col:5 forward 'void (void)'
`-FunctionDecl 0xb <line:3:1, line:3:40> col:6 noop 'void (void)'
  `-CompoundStmt 0xc <col:19, col:40>
";
    let (text, program) = transpile_dump(dump);

    assert!(text.contains("func twice(n int) int {"), "{}", text);
    assert!(text.contains("func noop() {"), "{}", text);
    // A declaration without a body registers its signature but emits
    // nothing.
    assert!(!text.contains("func forward"), "{}", text);
    assert!(program.function("forward").is_some());
    assert_eq!(text.matches("func twice").count(), 1);
}

#[test]
fn front_end_builtins_are_registered_but_not_emitted() {
    let dump = "\
TranslationUnitDecl 0x1 <<invalid sloc>> <invalid sloc>
|-TypedefDecl 0x2 <<invalid sloc>> <invalid sloc> implicit __int128_t '__int128'
|-TypedefDecl 0x3 <sys.h:10:1, col:30> col:30 referenced size_type 'unsigned long'
`-FunctionDecl 0x4 <main.c:3:1, line:5:1> line:3:5 main 'int (void)'
  `-CompoundStmt 0x5 <col:16, line:5:1>
    `-ReturnStmt 0x6 <line:4:5, col:12>
      `-IntegerLiteral 0x7 <col:12> 'int' 0
";
    let root = parse(dump).expect("parse");
    let mut program = Program::new();
    program.input_file = Some("main.c".to_string());
    let file = transpile(&mut program, &root).expect("transpile");
    let text = Printer::new().print_file(&file);

    // The header typedef resolves but contributes no output.
    assert_eq!(program.typedef("size_type"), Some("unsigned long"));
    assert!(!text.contains("size_type"), "{}", text);
    assert!(text.contains("func cMain"), "{}", text);
}

#[test]
fn unknown_declarations_warn_and_continue() {
    let dump = "\
TranslationUnitDecl 0x1 <<invalid sloc>> <invalid sloc>
|-StaticAssertDecl 0x2 <sa.c:1:1, col:30>
`-FunctionDecl 0x3 <line:2:1, line:2:30> col:5 ok 'void (void)'
  `-CompoundStmt 0x4 <col:20, col:30>
";
    let (text, program) = transpile_dump(dump);
    assert!(text.contains("func ok() {"), "{}", text);
    let rendered: Vec<String> = program
        .diagnostics
        .diagnostics()
        .iter()
        .map(|d| d.render())
        .collect();
    assert!(
        rendered
            .iter()
            .any(|d| d.contains("unknown node kind 'StaticAssertDecl'")),
        "{:?}",
        rendered
    );
}

#[test]
fn unresolvable_types_fall_back_to_the_placeholder() {
    let dump = "\
TranslationUnitDecl 0x1 <<invalid sloc>> <invalid sloc>
`-VarDecl 0x2 <v.c:1:1, col:20> col:18 handle '__builtin_va_list'
";
    let (text, program) = transpile_dump(dump);
    assert!(text.contains("var handle interface{}"), "{}", text);
    assert!(
        program
            .diagnostics
            .diagnostics()
            .iter()
            .any(|d| d.message.contains("__builtin_va_list")),
        "{}",
        text
    );
}

#[test]
fn go_keyword_identifiers_are_renamed() {
    let dump = "\
TranslationUnitDecl 0x1 <<invalid sloc>> <invalid sloc>
`-VarDecl 0x2 <kw.c:1:1, col:12> col:5 type 'int' cinit
  `-IntegerLiteral 0x3 <col:12> 'int' 1
";
    let (text, _) = transpile_dump(dump);
    assert!(text.contains("var type_ int = 1"), "{}", text);
}

#[test]
fn sizeof_folds_to_a_constant() {
    let dump = "\
TranslationUnitDecl 0x1 <<invalid sloc>> <invalid sloc>
`-FunctionDecl 0x2 <sz.c:1:1, line:3:1> line:1:5 size 'unsigned long (void)'
  `-CompoundStmt 0x3 <col:30, line:3:1>
    `-ReturnStmt 0x4 <line:2:5, col:25>
      `-UnaryExprOrTypeTraitExpr 0x5 <col:12, col:25> 'unsigned long' sizeof 'long long'
";
    let (text, _) = transpile_dump(dump);
    assert!(text.contains("func size() uint32 {"), "{}", text);
    assert!(text.contains("return 8"), "{}", text);
}
