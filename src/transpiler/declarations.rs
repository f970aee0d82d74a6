//! Declaration translation: typedefs, records, enums, global variables.

use crate::ast::{Node, NodeKind, StorageClass, TagKind};
use crate::goast::{sanitize_ident, Decl};
use crate::program::{RecordInfo, SymbolKind};
use crate::transpiler::{TranspileError, Transpiler};

impl Transpiler<'_> {
    /// Registers a typedef alias. Typedefs never emit Go declarations of
    /// their own; later spellings resolve straight through them.
    pub(crate) fn transpile_typedef(&mut self, node: &Node) {
        let NodeKind::TypedefDecl { name, is_implicit } = &node.kind else {
            return;
        };
        if *is_implicit {
            return;
        }
        let underlying = node.c_type().to_string();
        if underlying.is_empty() || underlying == *name {
            return;
        }
        self.program.add_typedef(name, &underlying);
    }

    /// Translates a record declaration, hoisting anonymous inner records
    /// into named siblings first so the output stays in dependency order.
    pub(crate) fn transpile_record(
        &mut self,
        node: &Node,
        parent_field_path: Option<&str>,
        emit: bool,
    ) -> Result<Option<String>, TranspileError> {
        let NodeKind::RecordDecl {
            tag,
            name,
            is_definition,
        } = &node.kind
        else {
            return Err(TranspileError::invariant("expected a RecordDecl"));
        };
        let is_union = *tag == TagKind::Union;

        let go_name = match name {
            Some(name) => sanitize_ident(name),
            None => self.synthesize_record_name(node, parent_field_path),
        };

        if !is_definition {
            // A forward declaration only introduces the opaque handle.
            self.program.add_record(
                &go_name,
                RecordInfo {
                    go_name: go_name.clone(),
                    is_union,
                    fields: Vec::new(),
                },
            );
            return Ok(Some(go_name));
        }

        // First pass: hoist nested record definitions. An anonymous inner
        // record is named after the field that carries it.
        let children: Vec<&Node> = node.children.iter().collect();
        for (index, child) in children.iter().enumerate() {
            if matches!(child.kind, NodeKind::RecordDecl { .. }) {
                let field = children[index + 1..].iter().find_map(|c| match &c.kind {
                    NodeKind::FieldDecl { name: Some(name) } => Some(name.clone()),
                    _ => None,
                });
                let path = match &field {
                    Some(field) => format!("{}_{}", go_name, field),
                    None => format!("{}_inner", go_name),
                };
                self.transpile_record(child, Some(&path), emit)?;
            }
        }

        let mut fields = Vec::new();
        let mut unnamed = 0usize;
        for child in &children {
            if let NodeKind::FieldDecl { name } = &child.kind {
                let field_name = match name {
                    Some(name) => name.clone(),
                    None => {
                        unnamed += 1;
                        format!("field{}", unnamed)
                    }
                };
                fields.push((field_name, child.c_type().to_string()));
            }
        }

        self.program.define_record(
            &go_name,
            RecordInfo {
                go_name: go_name.clone(),
                is_union,
                fields: fields.clone(),
            },
        );

        if emit {
            let mut go_fields = Vec::new();
            for (field_name, c_type) in &fields {
                let go_type = self.resolve_soft(c_type, node);
                go_fields.push((sanitize_ident(field_name), go_type));
            }
            self.file.decls.push(Decl::Struct {
                name: go_name.clone(),
                fields: go_fields,
            });
        }

        Ok(Some(go_name))
    }

    /// Anonymous records get a synthesized name and an alias from the
    /// front-end's positional spelling so field types resolve to it.
    fn synthesize_record_name(&mut self, node: &Node, parent_field_path: Option<&str>) -> String {
        let go_name = match parent_field_path {
            Some(path) => sanitize_ident(path),
            None => {
                self.anon_records += 1;
                format!("anonymousRecord{}", self.anon_records)
            }
        };

        let NodeKind::RecordDecl { tag, .. } = &node.kind else {
            return go_name;
        };
        let keyword = if *tag == TagKind::Union { "union" } else { "struct" };
        if let Some(position) = &node.position {
            if let (Some(file), Some(line), Some(column)) =
                (&position.file, position.line, position.column)
            {
                let spelling = format!(
                    "{} (anonymous {} at {}:{}:{})",
                    keyword, keyword, file, line, column
                );
                self.program.add_typedef(&spelling, &go_name);
            }
        }
        go_name
    }

    /// Translates an enum: the type thins to an `int` alias and the
    /// constants become a `const` block.
    pub(crate) fn transpile_enum(&mut self, node: &Node, emit: bool) -> Result<(), TranspileError> {
        let NodeKind::EnumDecl { name } = &node.kind else {
            return Err(TranspileError::invariant("expected an EnumDecl"));
        };

        let go_name = name.as_deref().map(sanitize_ident);
        if let Some(go_name) = &go_name {
            self.program.add_enum(go_name);
        }

        let mut constants = Vec::new();
        let mut next_value = 0i64;
        for child in Self::real_children(node) {
            let NodeKind::EnumConstantDecl { name } = &child.kind else {
                continue;
            };
            let value = match child.children.iter().find(|c| !c.kind.is_null()) {
                None => next_value,
                Some(expr) => match Self::literal_int(expr) {
                    Some(value) => value,
                    None => {
                        self.unsupported(child, "non-literal enumerator value");
                        next_value
                    }
                },
            };
            self.program.add_enum_constant(name, value);
            constants.push((sanitize_ident(name), value));
            next_value = value + 1;
        }

        if emit {
            if let Some(go_name) = go_name {
                self.file.decls.push(Decl::TypeAlias {
                    name: go_name,
                    ty: "int".to_string(),
                });
            }
            if !constants.is_empty() {
                self.file.decls.push(Decl::Consts(constants));
            }
        }
        Ok(())
    }

    /// Enumerator values must be integer constant expressions; anything
    /// the front-end did not fold to a literal stays unsupported.
    fn literal_int(node: &Node) -> Option<i64> {
        match &node.kind {
            NodeKind::IntegerLiteral { value } => value.parse().ok(),
            NodeKind::ImplicitCastExpr { .. } | NodeKind::ParenExpr => {
                node.children.iter().find_map(Self::literal_int)
            }
            NodeKind::UnaryOperator { opcode, .. } if opcode == "-" => node
                .children
                .iter()
                .find_map(Self::literal_int)
                .map(|v| -v),
            _ => None,
        }
    }

    /// A file-scope variable. Extern declarations register the symbol but
    /// emit nothing; the definition lives elsewhere.
    pub(crate) fn transpile_global_var(
        &mut self,
        node: &Node,
        emit: bool,
    ) -> Result<(), TranspileError> {
        let NodeKind::VarDecl(data) = &node.kind else {
            return Err(TranspileError::invariant("expected a VarDecl"));
        };

        self.program.declare_symbol(&data.name, SymbolKind::Variable);
        if !emit || data.storage == StorageClass::Extern {
            return Ok(());
        }

        let c_type = node
            .type_spelling
            .clone()
            .unwrap_or_else(|| "int".to_string());
        let go_type = self.resolve_soft(&c_type, node);

        let init = match Self::real_children(node)
            .into_iter()
            .find(|c| !matches!(c.kind, NodeKind::IncompleteArrayType))
        {
            Some(child) if data.has_init => Some(self.transpile_expr_cast(child, &c_type)?),
            _ => None,
        };

        self.file.decls.push(Decl::Var {
            name: sanitize_ident(&data.name),
            ty: go_type,
            init,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::parser::parse;
    use crate::program::Program;
    use crate::transpiler::Transpiler;

    #[test]
    fn enum_constants_count_up_from_explicit_values() {
        let dump = "\
TranslationUnitDecl 0x1 <<invalid sloc>> <invalid sloc>
`-EnumDecl 0x2 <colors.c:1:1, col:40> col:6 Color
  |-EnumConstantDecl 0x3 <col:14> col:14 RED 'int'
  |-EnumConstantDecl 0x4 <col:19, col:27> col:19 GREEN 'int'
  | `-IntegerLiteral 0x5 <col:27> 'int' 5
  `-EnumConstantDecl 0x6 <col:30> col:30 BLUE 'int'
";
        let root = parse(dump).expect("parse");
        let mut program = Program::new();
        let mut transpiler = Transpiler::new(&mut program);
        transpiler.transpile_unit(&root).expect("transpile");

        assert_eq!(program.enum_constant("RED"), Some(0));
        assert_eq!(program.enum_constant("GREEN"), Some(5));
        assert_eq!(program.enum_constant("BLUE"), Some(6));
        assert!(program.is_enum("Color"));
    }
}
