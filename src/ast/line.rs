//! Per-line decoding of the front-end dump.
//!
//! Each dump line is `<indent><NodeKind> <hex-addr> <position>? <attrs>...`.
//! The indent is made of two-character tree-drawing units; attributes mix
//! bare keywords, single-quoted C type spellings, double-quoted string
//! values and angle-bracketed groups. Scanning is quote-aware first (so a
//! regex never crosses a quote boundary), then kind-specific anchored
//! regexes pull the attributes out of the remainder left-to-right.

use regex::Regex;
use std::sync::LazyLock;

use crate::ast::nodes::{
    FunctionDeclData, Node, NodeKind, StorageClass, TagKind, VarDeclData,
};
use crate::ast::position::PositionContext;

/// One dump line split into its structural parts, before kind-specific
/// attribute decoding.
#[derive(Debug)]
pub struct SplitLine<'a> {
    pub depth: usize,
    pub kind: &'a str,
    pub address: String,
    pub tail: &'a str,
}

/// Splits the indentation, node kind and address off a dump line.
///
/// Returns `Err` with a reason when the indentation is not made of whole
/// two-character units or no kind identifier follows it.
pub fn split_line(line: &str) -> Result<SplitLine<'_>, String> {
    let bytes = line.as_bytes();
    let mut offset = 0;
    while offset + 2 <= bytes.len() {
        match &bytes[offset..offset + 2] {
            b"| " | b"  " | b"|-" | b"`-" => offset += 2,
            _ => break,
        }
    }

    let rest = &line[offset..];
    if rest.starts_with('|') || rest.starts_with('`') || rest.starts_with(' ') {
        return Err(format!("inconsistent indentation before {:?}", rest));
    }

    let depth = offset / 2;

    if let Some(tail) = rest.strip_prefix("<<<NULL>>>") {
        return Ok(SplitLine {
            depth,
            kind: "<<<NULL>>>",
            address: String::new(),
            tail: tail.trim_start(),
        });
    }

    let kind_len = rest
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_alphanumeric() || *c == '_')
        .count();
    if kind_len == 0 {
        return Err(format!("expected a node kind, found {:?}", rest));
    }
    let kind = &rest[..kind_len];
    let mut tail = rest[kind_len..].trim_start();

    let mut address = String::new();
    if tail.starts_with("0x") {
        let end = tail.find(' ').unwrap_or(tail.len());
        address = tail[..end].to_string();
        tail = tail[end..].trim_start();
    }

    Ok(SplitLine {
        depth,
        kind,
        address,
        tail,
    })
}

/// Extracts a balanced `<...>` group from the start of `s`.
///
/// Nesting is tracked so `<<invalid sloc>>` comes back as one group with
/// inner text `<invalid sloc>`.
pub fn angle_group(s: &str) -> Option<(String, &str)> {
    if !s.starts_with('<') {
        return None;
    }
    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth == 0 {
                    return Some((s[1..i].to_string(), s[i + 1..].trim_start()));
                }
            }
            _ => {}
        }
    }
    None
}

/// Decodes the escape sequences inside a double-quoted dump string.
fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('a') => out.push('\x07'),
            Some('b') => out.push('\x08'),
            Some('f') => out.push('\x0c'),
            Some('v') => out.push('\x0b'),
            Some('0') => out.push('\0'),
            Some('x') => {
                let mut hex = String::new();
                while hex.len() < 2 {
                    match chars.peek() {
                        Some(c) if c.is_ascii_hexdigit() => hex.push(chars.next().unwrap()),
                        _ => break,
                    }
                }
                if let Ok(v) = u8::from_str_radix(&hex, 16) {
                    out.push(v as char);
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

macro_rules! dump_regex {
    ($name:ident, $pattern:expr) => {
        static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($pattern).unwrap());
    };
}

dump_regex!(
    TYPEDEF_DECL,
    r"^(?:implicit )?(?:referenced )?(?P<name>\w+) '(?P<type>.*?)'(?::'[^']*')?$"
);
dump_regex!(
    FUNCTION_DECL,
    r"^(?:prev 0x[0-9a-f]+ )?(?:parent 0x[0-9a-f]+ )?(?:implicit )?(?:used )?(?:referenced )?(?P<name>\w+) '(?P<type>.*?)'(?::'[^']*')?(?P<rest>( extern| static| inline)*)$"
);
dump_regex!(
    PARM_VAR_DECL,
    r"^(?:used )?(?:referenced )?(?:(?P<name>\w+) )?'(?P<type>.*?)'(?::'[^']*')?(?: (?P<rest>.*))?$"
);
dump_regex!(
    VAR_DECL,
    r"^(?:used )?(?:referenced )?(?P<name>\w+) '(?P<type>.*?)'(?::'[^']*')?(?P<rest>.*)$"
);
dump_regex!(
    RECORD_DECL,
    // The name group is lazy so a bare `struct definition` parses as an
    // anonymous definition, not as a record named "definition".
    r"^(?P<tag>struct|union)(?: (?P<name>\w+))??(?: (?P<def>definition))?\s*$"
);
dump_regex!(
    FIELD_DECL,
    r"^(?:implicit )?(?:referenced )?(?:(?P<name>\w+) )?'(?P<type>.*?)'(?::'[^']*')?$"
);
dump_regex!(ENUM_DECL, r"^(?:referenced )?(?:used )?(?P<name>\w+)?\s*$");
dump_regex!(
    ENUM_CONSTANT_DECL,
    r"^(?:referenced )?(?P<name>\w+) '(?P<type>.*?)'(?::'[^']*')?$"
);
dump_regex!(LABEL_STMT, r"^'(?P<name>.*)'$");
dump_regex!(GOTO_STMT, r"^'(?P<label>.*?)'(?: 0x[0-9a-f]+)?$");
dump_regex!(INTEGER_LITERAL, r"^'(?P<type>.*?)'(?::'[^']*')? (?P<value>-?\d+)$");
dump_regex!(
    FLOATING_LITERAL,
    r"^'(?P<type>.*?)'(?::'[^']*')? (?P<value>[-+]?[0-9.]+(?:[eE][-+]?\d+)?)$"
);
dump_regex!(CHARACTER_LITERAL, r"^'(?P<type>.*?)'(?::'[^']*')? (?P<value>\d+)$");
dump_regex!(
    STRING_LITERAL,
    r#"^'(?P<type>.*?)'(?::'[^']*')?(?: lvalue)? "(?P<value>.*)"$"#
);
dump_regex!(
    DECL_REF_EXPR,
    r"^'(?P<type>.*?)'(?::'[^']*')? (?:lvalue )?(?:rvalue )?(?P<kind>\w+) 0x[0-9a-f]+ '(?P<name>.*?)'(?: '(?P<dtype>.*?)'(?::'[^']*')?)?$"
);
dump_regex!(
    MEMBER_EXPR,
    r"^'(?P<type>.*?)'(?::'[^']*')? (?:lvalue )?(?P<arrow>->|\.)(?P<name>\w+) 0x[0-9a-f]+$"
);
dump_regex!(BINARY_OPERATOR, r"^'(?P<type>.*?)'(?::'[^']*')? '(?P<op>.*?)'$");
dump_regex!(
    COMPOUND_ASSIGN_OPERATOR,
    r"^'(?P<type>.*?)'(?::'[^']*')? '(?P<op>.*?)' ComputeLHSTy='(?P<lhs>.*?)'(?::'[^']*')? ComputeResultTy='(?P<res>.*?)'(?::'[^']*')?$"
);
dump_regex!(
    UNARY_OPERATOR,
    r"^'(?P<type>.*?)'(?::'[^']*')? (?:lvalue )?(?:rvalue )?(?P<fix>prefix|postfix) '(?P<op>.*?)'(?: .*)?$"
);
dump_regex!(CAST_EXPR, r"^'(?P<type>.*?)'(?::'[^']*')?(?: lvalue)? <(?P<kind>[^>]*)>(?: .*)?$");
dump_regex!(
    TYPED_EXPR,
    r"^'(?P<type>.*?)'(?::'[^']*')?(?: (?:lvalue|rvalue|xvalue))?$"
);
dump_regex!(
    PREDEFINED_EXPR,
    r"^'(?P<type>.*?)'(?::'[^']*')?(?: lvalue)? (?P<name>\S+)$"
);
dump_regex!(
    UNARY_EXPR_OR_TYPE_TRAIT,
    r"^'(?P<type>.*?)'(?::'[^']*')? (?P<trait>\w+)(?: '(?P<arg>.*?)'(?::'[^']*')?)?$"
);
dump_regex!(MAX_FIELD_ALIGNMENT, r"^Implicit (?P<size>\d+)$");
dump_regex!(INCOMPLETE_ARRAY_TYPE, r"^'(?P<type>.*?)'(?::'[^']*')?\s*$");

/// Decodes one split line into a [`Node`].
///
/// The position groups are consumed first with quote-aware scanning, then
/// the remainder goes through the kind-specific regex. A known kind whose
/// required attributes do not match is an error; an unknown kind is
/// preserved as [`NodeKind::Unknown`] for the translator to judge.
pub fn decode(split: SplitLine<'_>, ctx: &mut PositionContext) -> Result<Node, String> {
    let mut node = Node::new(NodeKind::TranslationUnitDecl, split.address);
    let mut rest = split.tail;

    // Leading `<...>` range, then an optional start-of-node location token
    // (`line:3:5`, `col:9`, `file.c:3:5` or a synthetic `<built-in>`).
    if let Some((inner, after)) = angle_group(rest) {
        node.position = Some(ctx.parse_range(&inner));
        rest = after;
    }
    if let Some((_, after)) = angle_group(rest) {
        rest = after;
    } else {
        let token_end = rest.find(' ').unwrap_or(rest.len());
        let token = &rest[..token_end];
        if !token.is_empty() && looks_like_location(token) {
            if let Some(position) = ctx.parse_location_token(token) {
                node.position = Some(position);
            }
            rest = rest[token_end..].trim_start();
        }
    }

    let missing = |attr: &str| format!("missing {} attribute for {}", attr, split.kind);

    node.kind = match split.kind {
        "<<<NULL>>>" => NodeKind::NullPlaceholder,
        "TranslationUnitDecl" => NodeKind::TranslationUnitDecl,
        "TypedefDecl" => {
            let caps = TYPEDEF_DECL.captures(rest).ok_or_else(|| missing("name"))?;
            node.type_spelling = Some(caps["type"].to_string());
            NodeKind::TypedefDecl {
                name: caps["name"].to_string(),
                is_implicit: rest.starts_with("implicit "),
            }
        }
        "FunctionDecl" => {
            let caps = FUNCTION_DECL.captures(rest).ok_or_else(|| missing("name"))?;
            node.type_spelling = Some(caps["type"].to_string());
            let flags = caps.name("rest").map(|m| m.as_str()).unwrap_or("");
            NodeKind::FunctionDecl(FunctionDeclData {
                name: caps["name"].to_string(),
                is_extern: flags.contains("extern"),
                is_static: flags.contains("static"),
                is_inline: flags.contains("inline"),
                is_implicit: rest.contains("implicit "),
            })
        }
        "ParmVarDecl" => {
            let caps = PARM_VAR_DECL.captures(rest).ok_or_else(|| missing("type"))?;
            node.type_spelling = Some(caps["type"].to_string());
            NodeKind::ParmVarDecl {
                name: caps.name("name").map(|m| m.as_str().to_string()),
            }
        }
        "VarDecl" => {
            let caps = VAR_DECL.captures(rest).ok_or_else(|| missing("name"))?;
            node.type_spelling = Some(caps["type"].to_string());
            let flags = caps.name("rest").map(|m| m.as_str()).unwrap_or("");
            let storage = if flags.contains("extern") {
                StorageClass::Extern
            } else if flags.contains("static") {
                StorageClass::Static
            } else {
                StorageClass::None
            };
            NodeKind::VarDecl(VarDeclData {
                name: caps["name"].to_string(),
                storage,
                has_init: flags.contains("cinit")
                    || flags.contains("callinit")
                    || flags.contains("listinit"),
            })
        }
        "RecordDecl" => {
            let caps = RECORD_DECL.captures(rest).ok_or_else(|| missing("tag"))?;
            NodeKind::RecordDecl {
                tag: if &caps["tag"] == "union" {
                    TagKind::Union
                } else {
                    TagKind::Struct
                },
                name: caps.name("name").map(|m| m.as_str().to_string()),
                is_definition: caps.name("def").is_some(),
            }
        }
        "FieldDecl" => {
            let caps = FIELD_DECL.captures(rest).ok_or_else(|| missing("type"))?;
            node.type_spelling = Some(caps["type"].to_string());
            NodeKind::FieldDecl {
                name: caps.name("name").map(|m| m.as_str().to_string()),
            }
        }
        "EnumDecl" => {
            let caps = ENUM_DECL.captures(rest).ok_or_else(|| missing("name"))?;
            NodeKind::EnumDecl {
                name: caps.name("name").map(|m| m.as_str().to_string()),
            }
        }
        "EnumConstantDecl" => {
            let caps = ENUM_CONSTANT_DECL
                .captures(rest)
                .ok_or_else(|| missing("name"))?;
            node.type_spelling = Some(caps["type"].to_string());
            NodeKind::EnumConstantDecl {
                name: caps["name"].to_string(),
            }
        }
        "CompoundStmt" => NodeKind::CompoundStmt,
        "IfStmt" => NodeKind::IfStmt {
            has_else: rest.contains("has_else"),
        },
        "ForStmt" => NodeKind::ForStmt,
        "WhileStmt" => NodeKind::WhileStmt,
        "DoStmt" => NodeKind::DoStmt,
        "SwitchStmt" => NodeKind::SwitchStmt,
        "CaseStmt" => NodeKind::CaseStmt,
        "DefaultStmt" => NodeKind::DefaultStmt,
        "BreakStmt" => NodeKind::BreakStmt,
        "ContinueStmt" => NodeKind::ContinueStmt,
        "ReturnStmt" => NodeKind::ReturnStmt,
        "NullStmt" => NodeKind::NullStmt,
        "DeclStmt" => NodeKind::DeclStmt,
        "LabelStmt" => {
            let caps = LABEL_STMT.captures(rest).ok_or_else(|| missing("name"))?;
            NodeKind::LabelStmt {
                name: caps["name"].to_string(),
            }
        }
        "GotoStmt" => {
            let caps = GOTO_STMT.captures(rest).ok_or_else(|| missing("label"))?;
            NodeKind::GotoStmt {
                label: caps["label"].to_string(),
            }
        }
        "IntegerLiteral" => {
            let caps = INTEGER_LITERAL
                .captures(rest)
                .ok_or_else(|| missing("value"))?;
            node.type_spelling = Some(caps["type"].to_string());
            NodeKind::IntegerLiteral {
                value: caps["value"].to_string(),
            }
        }
        "FloatingLiteral" => {
            let caps = FLOATING_LITERAL
                .captures(rest)
                .ok_or_else(|| missing("value"))?;
            node.type_spelling = Some(caps["type"].to_string());
            NodeKind::FloatingLiteral {
                value: caps["value"].to_string(),
            }
        }
        "CharacterLiteral" => {
            let caps = CHARACTER_LITERAL
                .captures(rest)
                .ok_or_else(|| missing("value"))?;
            node.type_spelling = Some(caps["type"].to_string());
            NodeKind::CharacterLiteral {
                value: caps["value"].parse().map_err(|_| missing("value"))?,
            }
        }
        "StringLiteral" => {
            let caps = STRING_LITERAL
                .captures(rest)
                .ok_or_else(|| missing("value"))?;
            node.type_spelling = Some(caps["type"].to_string());
            NodeKind::StringLiteral {
                value: unescape(&caps["value"]),
            }
        }
        "DeclRefExpr" => {
            let caps = DECL_REF_EXPR
                .captures(rest)
                .ok_or_else(|| missing("name"))?;
            node.type_spelling = Some(caps["type"].to_string());
            NodeKind::DeclRefExpr {
                name: caps["name"].to_string(),
                referenced_kind: caps["kind"].to_string(),
            }
        }
        "MemberExpr" => {
            let caps = MEMBER_EXPR.captures(rest).ok_or_else(|| missing("name"))?;
            node.type_spelling = Some(caps["type"].to_string());
            NodeKind::MemberExpr {
                name: caps["name"].to_string(),
                is_arrow: &caps["arrow"] == "->",
            }
        }
        "CallExpr" => {
            let caps = TYPED_EXPR.captures(rest).ok_or_else(|| missing("type"))?;
            node.type_spelling = Some(caps["type"].to_string());
            NodeKind::CallExpr
        }
        "BinaryOperator" => {
            let caps = BINARY_OPERATOR
                .captures(rest)
                .ok_or_else(|| missing("operator"))?;
            node.type_spelling = Some(caps["type"].to_string());
            NodeKind::BinaryOperator {
                opcode: caps["op"].to_string(),
            }
        }
        "CompoundAssignOperator" => {
            let caps = COMPOUND_ASSIGN_OPERATOR
                .captures(rest)
                .ok_or_else(|| missing("operator"))?;
            node.type_spelling = Some(caps["type"].to_string());
            NodeKind::CompoundAssignOperator {
                opcode: caps["op"].to_string(),
            }
        }
        "UnaryOperator" => {
            let caps = UNARY_OPERATOR
                .captures(rest)
                .ok_or_else(|| missing("operator"))?;
            node.type_spelling = Some(caps["type"].to_string());
            NodeKind::UnaryOperator {
                opcode: caps["op"].to_string(),
                is_prefix: &caps["fix"] == "prefix",
            }
        }
        "ConditionalOperator" => {
            let caps = TYPED_EXPR.captures(rest).ok_or_else(|| missing("type"))?;
            node.type_spelling = Some(caps["type"].to_string());
            NodeKind::ConditionalOperator
        }
        "ArraySubscriptExpr" => {
            let caps = TYPED_EXPR.captures(rest).ok_or_else(|| missing("type"))?;
            node.type_spelling = Some(caps["type"].to_string());
            NodeKind::ArraySubscriptExpr
        }
        "ImplicitCastExpr" | "CStyleCastExpr" => {
            let caps = CAST_EXPR.captures(rest).ok_or_else(|| missing("cast kind"))?;
            node.type_spelling = Some(caps["type"].to_string());
            let cast_kind = caps["kind"].to_string();
            if split.kind == "ImplicitCastExpr" {
                NodeKind::ImplicitCastExpr { cast_kind }
            } else {
                NodeKind::CStyleCastExpr { cast_kind }
            }
        }
        "ParenExpr" => {
            let caps = TYPED_EXPR.captures(rest).ok_or_else(|| missing("type"))?;
            node.type_spelling = Some(caps["type"].to_string());
            NodeKind::ParenExpr
        }
        "InitListExpr" => {
            let caps = TYPED_EXPR.captures(rest).ok_or_else(|| missing("type"))?;
            node.type_spelling = Some(caps["type"].to_string());
            NodeKind::InitListExpr
        }
        "ImplicitValueInitExpr" => {
            let caps = TYPED_EXPR.captures(rest).ok_or_else(|| missing("type"))?;
            node.type_spelling = Some(caps["type"].to_string());
            NodeKind::ImplicitValueInitExpr
        }
        "CompoundLiteralExpr" => {
            let caps = TYPED_EXPR.captures(rest).ok_or_else(|| missing("type"))?;
            node.type_spelling = Some(caps["type"].to_string());
            NodeKind::CompoundLiteralExpr
        }
        "PredefinedExpr" => {
            let caps = PREDEFINED_EXPR
                .captures(rest)
                .ok_or_else(|| missing("name"))?;
            node.type_spelling = Some(caps["type"].to_string());
            NodeKind::PredefinedExpr {
                name: caps["name"].to_string(),
            }
        }
        "UnaryExprOrTypeTraitExpr" => {
            let caps = UNARY_EXPR_OR_TYPE_TRAIT
                .captures(rest)
                .ok_or_else(|| missing("trait"))?;
            node.type_spelling = Some(caps["type"].to_string());
            NodeKind::UnaryExprOrTypeTraitExpr {
                trait_name: caps["trait"].to_string(),
                argument_type: caps.name("arg").map(|m| m.as_str().to_string()),
            }
        }
        "IncompleteArrayType" => {
            let caps = INCOMPLETE_ARRAY_TYPE
                .captures(rest)
                .ok_or_else(|| missing("type"))?;
            node.type_spelling = Some(caps["type"].to_string());
            NodeKind::IncompleteArrayType
        }
        "MaxFieldAlignmentAttr" => {
            let caps = MAX_FIELD_ALIGNMENT
                .captures(rest)
                .ok_or_else(|| missing("size"))?;
            NodeKind::MaxFieldAlignmentAttr {
                alignment: caps["size"].parse().map_err(|_| missing("size"))?,
            }
        }
        unknown => NodeKind::Unknown {
            raw: format!("{} {}", unknown, rest).trim_end().to_string(),
        },
    };

    Ok(node)
}

fn looks_like_location(token: &str) -> bool {
    if token.starts_with("col:") || token.starts_with("line:") {
        return true;
    }
    // `path/file.c:3:5`: at least two trailing numeric segments.
    let mut it = token.rsplitn(3, ':');
    let col_ok = it.next().is_some_and(|c| c.parse::<u32>().is_ok());
    let line_ok = it.next().is_some_and(|l| l.parse::<u32>().is_ok());
    col_ok && line_ok && it.next().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_line(line: &str) -> Node {
        let mut ctx = PositionContext::new();
        let split = split_line(line).expect("split");
        decode(split, &mut ctx).expect("decode")
    }

    #[test]
    fn splits_depth_from_tree_drawing_units() {
        let split = split_line("|   |-IntegerLiteral 0x35f4048 <col:12> 'int' 0").unwrap();
        assert_eq!(split.depth, 3);
        assert_eq!(split.kind, "IntegerLiteral");
        assert_eq!(split.address, "0x35f4048");
    }

    #[test]
    fn function_decl_attributes() {
        let node = decode_line(
            "|-FunctionDecl 0x35f3ef0 <tests/hello.c:3:1, line:6:1> line:3:5 used main 'int (void)'",
        );
        match &node.kind {
            NodeKind::FunctionDecl(data) => {
                assert_eq!(data.name, "main");
                assert!(!data.is_extern);
            }
            other => panic!("expected FunctionDecl, got {:?}", other),
        }
        assert_eq!(node.c_type(), "int (void)");
        let position = node.position.unwrap();
        assert_eq!(position.line, Some(3));
        assert_eq!(position.column, Some(5));
    }

    #[test]
    fn typedef_with_embedded_quotes_keeps_longest_match() {
        // The greedy final group must run to the last quote on the line.
        let node = decode_line("|-TypedefDecl 0x1 <<invalid sloc>> <invalid sloc> implicit __builtin_va_list 'struct __va_list_tag [1]'");
        match &node.kind {
            NodeKind::TypedefDecl { name, is_implicit } => {
                assert_eq!(name, "__builtin_va_list");
                assert!(is_implicit);
            }
            other => panic!("expected TypedefDecl, got {:?}", other),
        }
        assert_eq!(node.c_type(), "struct __va_list_tag [1]");
    }

    #[test]
    fn string_literal_unescapes() {
        let node = decode_line(r#"`-StringLiteral 0x2 <col:12> 'char [7]' lvalue "hello\n""#);
        match &node.kind {
            NodeKind::StringLiteral { value } => assert_eq!(value, "hello\n"),
            other => panic!("expected StringLiteral, got {:?}", other),
        }
    }

    #[test]
    fn decl_ref_expr_carries_referenced_kind() {
        let node = decode_line(
            "`-DeclRefExpr 0x3 <col:12> 'int (int, int)' Function 0x35f3ef0 'add' 'int (int, int)'",
        );
        match &node.kind {
            NodeKind::DeclRefExpr { name, referenced_kind } => {
                assert_eq!(name, "add");
                assert_eq!(referenced_kind, "Function");
            }
            other => panic!("expected DeclRefExpr, got {:?}", other),
        }
    }

    #[test]
    fn member_expr_arrow() {
        let node = decode_line("`-MemberExpr 0x4 <col:3, col:6> 'int' lvalue ->x 0x5");
        match &node.kind {
            NodeKind::MemberExpr { name, is_arrow } => {
                assert_eq!(name, "x");
                assert!(is_arrow);
            }
            other => panic!("expected MemberExpr, got {:?}", other),
        }
    }

    #[test]
    fn implicit_cast_kind() {
        let node =
            decode_line("`-ImplicitCastExpr 0x6 <col:10> 'int *' <NullToPointer>");
        match &node.kind {
            NodeKind::ImplicitCastExpr { cast_kind } => assert_eq!(cast_kind, "NullToPointer"),
            other => panic!("expected ImplicitCastExpr, got {:?}", other),
        }
    }

    #[test]
    fn sugared_type_spelling_keeps_the_sugar() {
        let node = decode_line("|-VarDecl 0x1 <t.c:2:1, col:9> col:5 x 'u32':'unsigned int' cinit");
        match &node.kind {
            NodeKind::VarDecl(data) => {
                assert_eq!(data.name, "x");
                assert!(data.has_init);
            }
            other => panic!("expected VarDecl, got {:?}", other),
        }
        assert_eq!(node.c_type(), "u32");
    }

    #[test]
    fn null_placeholder() {
        let split = split_line("| |-<<<NULL>>>").unwrap();
        assert_eq!(split.kind, "<<<NULL>>>");
        assert_eq!(split.depth, 2);
    }

    #[test]
    fn anonymous_record_definition_has_no_name() {
        let node = decode_line("|-RecordDecl 0x5 <col:1, line:5:1> col:1 struct definition");
        match &node.kind {
            NodeKind::RecordDecl { name, is_definition, .. } => {
                assert!(name.is_none());
                assert!(is_definition);
            }
            other => panic!("expected RecordDecl, got {:?}", other),
        }

        let node = decode_line("|-RecordDecl 0x6 <col:1, col:30> col:8 struct Point definition");
        match &node.kind {
            NodeKind::RecordDecl { name, is_definition, .. } => {
                assert_eq!(name.as_deref(), Some("Point"));
                assert!(is_definition);
            }
            other => panic!("expected RecordDecl, got {:?}", other),
        }
    }

    #[test]
    fn unknown_kind_is_preserved_verbatim() {
        let node = decode_line("`-AlignedAttr 0x7 <col:1> aligned");
        match &node.kind {
            NodeKind::Unknown { raw } => assert!(raw.contains("AlignedAttr")),
            other => panic!("expected Unknown, got {:?}", other),
        }
    }

    #[test]
    fn known_kind_with_missing_attribute_is_rejected() {
        let mut ctx = PositionContext::new();
        let split = split_line("`-BinaryOperator 0x8 <col:1> 'int'").unwrap();
        let err = decode(split, &mut ctx).unwrap_err();
        assert!(err.contains("BinaryOperator"));
    }

    #[test]
    fn compound_assign_operator() {
        let node = decode_line(
            "`-CompoundAssignOperator 0x9 <col:1, col:6> 'int' '+=' ComputeLHSTy='int' ComputeResultTy='int'",
        );
        match &node.kind {
            NodeKind::CompoundAssignOperator { opcode } => assert_eq!(opcode, "+="),
            other => panic!("expected CompoundAssignOperator, got {:?}", other),
        }
    }

    #[test]
    fn sizeof_with_argument_type() {
        let node = decode_line(
            "`-UnaryExprOrTypeTraitExpr 0xa <col:1, col:10> 'unsigned long' sizeof 'int'",
        );
        match &node.kind {
            NodeKind::UnaryExprOrTypeTraitExpr { trait_name, argument_type } => {
                assert_eq!(trait_name, "sizeof");
                assert_eq!(argument_type.as_deref(), Some("int"));
            }
            other => panic!("expected UnaryExprOrTypeTraitExpr, got {:?}", other),
        }
    }
}
