//! Syntax-tree node definitions.
//!
//! The front-end dumps one node per line; every node re-appears here as a
//! variant of [`NodeKind`] with its kind-specific attributes, hanging off a
//! shared [`Node`] header that carries the attributes common to all kinds
//! (address, position, C type spelling, children).

use serde::Serialize;
use thin_vec::ThinVec;

use crate::ast::position::SourcePosition;

/// Shared structural header for one dump node.
///
/// Nodes are immutable once parsing completes; `children` is appended to
/// only while the dump parser is still running.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    /// Opaque identity assigned by the front-end (`0x...`), unique within a
    /// translation unit and used for cross-references.
    pub address: String,
    pub position: Option<SourcePosition>,
    /// The C type spelling the front-end annotated this node with. Always
    /// present on expression nodes.
    pub type_spelling: Option<String>,
    pub kind: NodeKind,
    pub children: ThinVec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind, address: String) -> Self {
        Node {
            address,
            position: None,
            type_spelling: None,
            kind,
            children: ThinVec::new(),
        }
    }

    /// Adds a new child node. Child nodes can then be accessed with the
    /// `children` attribute.
    pub fn add_child(&mut self, node: Node) {
        self.children.push(node);
    }

    /// The C type spelling, or `""` for the rare nodes without one.
    pub fn c_type(&self) -> &str {
        self.type_spelling.as_deref().unwrap_or("")
    }

    /// Name of the variant, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }
}

/// Storage class spelled on a variable declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StorageClass {
    None,
    Extern,
    Static,
}

/// Whether a record is a struct or a union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TagKind {
    Struct,
    Union,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunctionDeclData {
    pub name: String,
    pub is_extern: bool,
    pub is_static: bool,
    pub is_inline: bool,
    pub is_implicit: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct VarDeclData {
    pub name: String,
    pub storage: StorageClass,
    pub has_init: bool,
}

/// The core enum defining all node kinds the front-end emits.
///
/// Kinds the decoder does not know become [`NodeKind::Unknown`] so the
/// translator can decide policy; absent child slots (`<<<NULL>>>`) become
/// [`NodeKind::NullPlaceholder`] so positional children keep their slots.
#[derive(Debug, Clone, Serialize)]
pub enum NodeKind {
    // --- Declarations ---
    TranslationUnitDecl,
    FunctionDecl(FunctionDeclData),
    ParmVarDecl { name: Option<String> },
    VarDecl(VarDeclData),
    RecordDecl { tag: TagKind, name: Option<String>, is_definition: bool },
    FieldDecl { name: Option<String> },
    TypedefDecl { name: String, is_implicit: bool },
    EnumDecl { name: Option<String> },
    EnumConstantDecl { name: String },

    // --- Statements ---
    CompoundStmt,
    IfStmt { has_else: bool },
    ForStmt,
    WhileStmt,
    DoStmt,
    SwitchStmt,
    CaseStmt,
    DefaultStmt,
    BreakStmt,
    ContinueStmt,
    ReturnStmt,
    NullStmt,
    DeclStmt,
    LabelStmt { name: String },
    GotoStmt { label: String },

    // --- Expressions ---
    IntegerLiteral { value: String },
    FloatingLiteral { value: String },
    CharacterLiteral { value: u32 },
    StringLiteral { value: String },
    DeclRefExpr { name: String, referenced_kind: String },
    MemberExpr { name: String, is_arrow: bool },
    CallExpr,
    BinaryOperator { opcode: String },
    CompoundAssignOperator { opcode: String },
    UnaryOperator { opcode: String, is_prefix: bool },
    ConditionalOperator,
    ArraySubscriptExpr,
    ImplicitCastExpr { cast_kind: String },
    CStyleCastExpr { cast_kind: String },
    ParenExpr,
    InitListExpr,
    /// Zero value for a position a designated initializer skipped.
    ImplicitValueInitExpr,
    CompoundLiteralExpr,
    PredefinedExpr { name: String },
    UnaryExprOrTypeTraitExpr { trait_name: String, argument_type: Option<String> },

    // --- Attributes and type nodes the parser accepts but the translator
    // --- discards
    IncompleteArrayType,
    MaxFieldAlignmentAttr { alignment: u32 },

    // --- Placeholders ---
    NullPlaceholder,
    Unknown { raw: String },
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::TranslationUnitDecl => "TranslationUnitDecl",
            NodeKind::FunctionDecl(_) => "FunctionDecl",
            NodeKind::ParmVarDecl { .. } => "ParmVarDecl",
            NodeKind::VarDecl(_) => "VarDecl",
            NodeKind::RecordDecl { .. } => "RecordDecl",
            NodeKind::FieldDecl { .. } => "FieldDecl",
            NodeKind::TypedefDecl { .. } => "TypedefDecl",
            NodeKind::EnumDecl { .. } => "EnumDecl",
            NodeKind::EnumConstantDecl { .. } => "EnumConstantDecl",
            NodeKind::CompoundStmt => "CompoundStmt",
            NodeKind::IfStmt { .. } => "IfStmt",
            NodeKind::ForStmt => "ForStmt",
            NodeKind::WhileStmt => "WhileStmt",
            NodeKind::DoStmt => "DoStmt",
            NodeKind::SwitchStmt => "SwitchStmt",
            NodeKind::CaseStmt => "CaseStmt",
            NodeKind::DefaultStmt => "DefaultStmt",
            NodeKind::BreakStmt => "BreakStmt",
            NodeKind::ContinueStmt => "ContinueStmt",
            NodeKind::ReturnStmt => "ReturnStmt",
            NodeKind::NullStmt => "NullStmt",
            NodeKind::DeclStmt => "DeclStmt",
            NodeKind::LabelStmt { .. } => "LabelStmt",
            NodeKind::GotoStmt { .. } => "GotoStmt",
            NodeKind::IntegerLiteral { .. } => "IntegerLiteral",
            NodeKind::FloatingLiteral { .. } => "FloatingLiteral",
            NodeKind::CharacterLiteral { .. } => "CharacterLiteral",
            NodeKind::StringLiteral { .. } => "StringLiteral",
            NodeKind::DeclRefExpr { .. } => "DeclRefExpr",
            NodeKind::MemberExpr { .. } => "MemberExpr",
            NodeKind::CallExpr => "CallExpr",
            NodeKind::BinaryOperator { .. } => "BinaryOperator",
            NodeKind::CompoundAssignOperator { .. } => "CompoundAssignOperator",
            NodeKind::UnaryOperator { .. } => "UnaryOperator",
            NodeKind::ConditionalOperator => "ConditionalOperator",
            NodeKind::ArraySubscriptExpr => "ArraySubscriptExpr",
            NodeKind::ImplicitCastExpr { .. } => "ImplicitCastExpr",
            NodeKind::CStyleCastExpr { .. } => "CStyleCastExpr",
            NodeKind::ParenExpr => "ParenExpr",
            NodeKind::InitListExpr => "InitListExpr",
            NodeKind::ImplicitValueInitExpr => "ImplicitValueInitExpr",
            NodeKind::CompoundLiteralExpr => "CompoundLiteralExpr",
            NodeKind::PredefinedExpr { .. } => "PredefinedExpr",
            NodeKind::UnaryExprOrTypeTraitExpr { .. } => "UnaryExprOrTypeTraitExpr",
            NodeKind::IncompleteArrayType => "IncompleteArrayType",
            NodeKind::MaxFieldAlignmentAttr { .. } => "MaxFieldAlignmentAttr",
            NodeKind::NullPlaceholder => "<<<NULL>>>",
            NodeKind::Unknown { .. } => "Unknown",
        }
    }

    /// True for the placeholder that marks an absent child slot.
    pub fn is_null(&self) -> bool {
        matches!(self, NodeKind::NullPlaceholder)
    }
}
