//! Host-facing view of the syntax tree and source text
//!
//! Architecture: Anti-Corruption Layer - the linting host owns parsing, this module only
//! names the capabilities the checks consume
//! - DeclarationNode / DefinitionNode / SourceLines are narrow read-only traits
//! - DiagnosticSink is the only way findings leave a check run
//! - SourceUnit is an owned, serde-friendly dump of one file for hosts that run out of process

use crate::domain::violations::{Finding, StyleError, StyleResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The eight primitive kinds, in prefix-table order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 8] = [
        Self::Boolean,
        Self::Byte,
        Self::Char,
        Self::Double,
        Self::Float,
        Self::Int,
        Self::Long,
        Self::Short,
    ];

    /// Keyword as written in source, used in messages
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Double => "double",
            Self::Float => "float",
            Self::Int => "int",
            Self::Long => "long",
            Self::Short => "short",
        }
    }

    /// Required identifier prefix
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Boolean | Self::Byte => "b",
            Self::Char => "c",
            Self::Double => "d",
            Self::Float => "f",
            Self::Int => "i",
            Self::Long => "l",
            Self::Short => "s",
        }
    }
}

/// Declared type of a variable or parameter as the host resolved it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeRef {
    /// One of the primitive keywords
    Primitive { primitive: PrimitiveKind },
    /// Class or interface name, outer-to-inner (`Map.Entry` is `["Map", "Entry"]`)
    Class { name_parts: Vec<String> },
    /// One array dimension around `element`
    Array { element: Box<TypeRef> },
    /// The host could not tell what the type is
    Unresolved,
}

impl TypeRef {
    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self::Primitive { primitive: kind }
    }

    /// Build a class reference from a dotted name such as `Outer.Inner`
    pub fn class(dotted: &str) -> Self {
        Self::Class { name_parts: dotted.split('.').map(str::to_string).collect() }
    }

    /// Wrap `self` in `dimensions` array layers
    pub fn array_of(self, dimensions: usize) -> Self {
        (0..dimensions).fold(self, |element, _| Self::Array { element: Box::new(element) })
    }

    /// Number of array dimensions around the element type
    pub fn array_depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self;
        while let Self::Array { element } = current {
            depth += 1;
            current = element;
        }
        depth
    }

    /// Innermost element type, with every array dimension stripped
    pub fn element(&self) -> &TypeRef {
        let mut current = self;
        while let Self::Array { element } = current {
            current = element;
        }
        current
    }
}

/// How a declaration is described in naming messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationRole {
    /// Method, constructor or catch parameter
    Parameter,
    /// Field or local variable
    #[default]
    Variable,
    /// Anything else the host chooses to run the naming check on
    Other,
}

impl DeclarationRole {
    /// Suffix placed after the type in naming messages
    pub fn message_suffix(self) -> &'static str {
        match self {
            Self::Parameter => " parameter",
            Self::Variable => " member",
            Self::Other => "",
        }
    }
}

/// A field, local variable or parameter definition
pub trait DeclarationNode {
    fn is_static(&self) -> bool;
    fn is_variadic(&self) -> bool;
    /// Declared type including any array dimensions
    fn declared_type(&self) -> &TypeRef;
    fn identifier(&self) -> &str;
    /// 1-based line of the declaration
    fn line(&self) -> u32;
    fn role(&self) -> DeclarationRole;

    fn array_depth(&self) -> usize {
        self.declared_type().array_depth()
    }
}

/// Kinds of definitions that can carry a doc comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefinitionKind {
    Class,
    Interface,
    Enum,
    Annotation,
    Constructor,
    Method,
}

impl DefinitionKind {
    /// Whether this definition introduces a type (counts toward nesting depth)
    pub fn is_type(self) -> bool {
        matches!(self, Self::Class | Self::Interface | Self::Enum | Self::Annotation)
    }

    pub fn is_callable(self) -> bool {
        matches!(self, Self::Constructor | Self::Method)
    }
}

/// A class, interface, constructor or method definition
pub trait DefinitionNode {
    fn kind(&self) -> DefinitionKind;
    /// 1-based line of the definition
    fn line(&self) -> u32;
    /// Number of type-defining ancestors, not counting the node itself
    fn enclosing_types(&self) -> usize;
    /// Whether the node sits below anything at all in the tree
    fn has_parent(&self) -> bool;
}

/// Boundaries of the doc comment right before a definition (1-based, inclusive;
/// `end_line` holds the closing delimiter)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocBlock {
    pub start_line: u32,
    pub end_line: u32,
}

impl DocBlock {
    pub fn new(start_line: u32, end_line: u32) -> Self {
        Self { start_line, end_line }
    }

    /// Lines strictly between the opening and the closing delimiter
    pub fn content_lines(&self) -> impl Iterator<Item = u32> {
        self.start_line.saturating_add(1)..self.end_line
    }
}

/// Random access to raw file lines by 1-based line number
pub trait SourceLines {
    fn line(&self, number: u32) -> Option<&str>;
}

impl SourceLines for [String] {
    fn line(&self, number: u32) -> Option<&str> {
        let index = usize::try_from(number.checked_sub(1)?).ok()?;
        self.get(index).map(String::as_str)
    }
}

impl SourceLines for Vec<String> {
    fn line(&self, number: u32) -> Option<&str> {
        self.as_slice().line(number)
    }
}

impl SourceLines for [&str] {
    fn line(&self, number: u32) -> Option<&str> {
        let index = usize::try_from(number.checked_sub(1)?).ok()?;
        self.get(index).copied()
    }
}

/// Receives findings as a check run produces them
pub trait DiagnosticSink {
    fn report(&mut self, finding: Finding);
}

impl DiagnosticSink for Vec<Finding> {
    fn report(&mut self, finding: Finding) {
        self.push(finding);
    }
}

/// Owned declaration as written to a syntax dump
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub identifier: String,
    pub line: u32,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_variadic: bool,
    #[serde(default)]
    pub role: DeclarationRole,
    pub declared_type: TypeRef,
}

impl Declaration {
    pub fn new(identifier: impl Into<String>, line: u32, declared_type: TypeRef) -> Self {
        Self {
            identifier: identifier.into(),
            line,
            is_static: false,
            is_variadic: false,
            role: DeclarationRole::Variable,
            declared_type,
        }
    }

    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_variadic(mut self) -> Self {
        self.is_variadic = true;
        self
    }

    pub fn with_role(mut self, role: DeclarationRole) -> Self {
        self.role = role;
        self
    }
}

impl DeclarationNode for Declaration {
    fn is_static(&self) -> bool {
        self.is_static
    }

    fn is_variadic(&self) -> bool {
        self.is_variadic
    }

    fn declared_type(&self) -> &TypeRef {
        &self.declared_type
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn line(&self) -> u32 {
        self.line
    }

    fn role(&self) -> DeclarationRole {
        self.role
    }
}

/// Owned definition as written to a syntax dump
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub kind: DefinitionKind,
    pub line: u32,
    #[serde(default)]
    pub enclosing_types: usize,
    #[serde(default)]
    pub has_parent: bool,
    /// Doc comment immediately before the definition, if any
    #[serde(default)]
    pub doc: Option<DocBlock>,
}

impl Definition {
    /// A top-level definition with no parent
    pub fn new(kind: DefinitionKind, line: u32) -> Self {
        Self { kind, line, enclosing_types: 0, has_parent: false, doc: None }
    }

    /// Place the definition inside `enclosing_types` type definitions
    pub fn nested_in(mut self, enclosing_types: usize) -> Self {
        self.enclosing_types = enclosing_types;
        self.has_parent = true;
        self
    }

    pub fn with_doc(mut self, doc: DocBlock) -> Self {
        self.doc = Some(doc);
        self
    }
}

impl DefinitionNode for Definition {
    fn kind(&self) -> DefinitionKind {
        self.kind
    }

    fn line(&self) -> u32 {
        self.line
    }

    fn enclosing_types(&self) -> usize {
        self.enclosing_types
    }

    fn has_parent(&self) -> bool {
        self.has_parent
    }
}

/// Everything the checks need to know about one source file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceUnit {
    /// Path of the original source file, as reported in violations
    pub path: PathBuf,
    /// Raw source lines without line terminators
    #[serde(default)]
    pub lines: Vec<String>,
    #[serde(default)]
    pub declarations: Vec<Declaration>,
    #[serde(default)]
    pub definitions: Vec<Definition>,
}

impl SourceUnit {
    /// Create a unit from raw source text
    pub fn new(path: impl Into<PathBuf>, source: &str) -> Self {
        Self {
            path: path.into(),
            lines: source.lines().map(str::to_string).collect(),
            declarations: Vec::new(),
            definitions: Vec::new(),
        }
    }

    /// Decode a JSON syntax dump; `origin` names the dump in errors
    pub fn from_json(content: &str, origin: &str) -> StyleResult<Self> {
        serde_json::from_str(content).map_err(|e| StyleError::dump(origin, e.to_string()))
    }

    /// Load a JSON syntax dump from disk
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> StyleResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            StyleError::dump(path.display().to_string(), format!("Failed to read dump: {e}"))
        })?;

        let unit = Self::from_json(&content, &path.display().to_string())?;
        tracing::debug!(
            "Loaded dump {} for {} ({} lines, {} declarations, {} definitions)",
            path.display(),
            unit.path.display(),
            unit.lines.len(),
            unit.declarations.len(),
            unit.definitions.len()
        );
        Ok(unit)
    }

    /// Encode the unit as a JSON syntax dump
    pub fn to_json(&self) -> StyleResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            StyleError::dump(self.path.display().to_string(), format!("Failed to encode: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_depth_and_element() {
        let ty = TypeRef::primitive(PrimitiveKind::Int).array_of(3);

        assert_eq!(ty.array_depth(), 3);
        assert_eq!(ty.element(), &TypeRef::primitive(PrimitiveKind::Int));
        assert_eq!(TypeRef::class("String").array_depth(), 0);
    }

    #[test]
    fn test_class_splits_dotted_names() {
        assert_eq!(
            TypeRef::class("Outer.Inner"),
            TypeRef::Class { name_parts: vec!["Outer".to_string(), "Inner".to_string()] }
        );
    }

    #[test]
    fn test_source_lines_are_one_based() {
        let lines = vec!["first".to_string(), "second".to_string()];

        assert_eq!(lines.line(1), Some("first"));
        assert_eq!(lines.line(2), Some("second"));
        assert_eq!(lines.line(0), None);
        assert_eq!(lines.line(3), None);

        let borrowed: &[&str] = &["only"];
        assert_eq!(borrowed.line(1), Some("only"));
    }

    #[test]
    fn test_doc_block_content_lines_exclude_delimiters() {
        let lines: Vec<u32> = DocBlock::new(7, 12).content_lines().collect();
        assert_eq!(lines, vec![8, 9, 10, 11]);

        assert_eq!(DocBlock::new(3, 3).content_lines().count(), 0);
        assert_eq!(DocBlock::new(3, 4).content_lines().count(), 0);
    }

    #[test]
    fn test_doc_block_at_last_line_number_has_no_content() {
        assert_eq!(DocBlock::new(u32::MAX, u32::MAX).content_lines().count(), 0);
        assert_eq!(DocBlock::new(u32::MAX - 1, u32::MAX).content_lines().count(), 0);
    }

    #[test]
    fn test_dump_deserializes_with_defaults() {
        let json = r#"{
            "path": "Test.java",
            "lines": ["class Test {}"],
            "declarations": [
                {"identifier": "si11", "line": 47, "is_static": true,
                 "declared_type": {"kind": "primitive", "primitive": "int"}},
                {"identifier": "aoParam", "line": 60, "is_variadic": true, "role": "parameter",
                 "declared_type": {"kind": "array", "element":
                     {"kind": "class", "name_parts": ["Object"]}}}
            ],
            "definitions": [
                {"kind": "class", "line": 13, "doc": {"start_line": 7, "end_line": 12}},
                {"kind": "method", "line": 61, "enclosing_types": 1, "has_parent": true}
            ]
        }"#;

        let unit = SourceUnit::from_json(json, "test.json").unwrap();

        assert_eq!(unit.declarations.len(), 2);
        assert!(unit.declarations[0].is_static());
        assert_eq!(unit.declarations[0].role(), DeclarationRole::Variable);
        assert_eq!(unit.declarations[1].role(), DeclarationRole::Parameter);
        assert_eq!(unit.declarations[1].array_depth(), 1);
        assert_eq!(unit.definitions[0].doc, Some(DocBlock::new(7, 12)));
        assert!(!unit.definitions[0].has_parent());
        assert_eq!(unit.definitions[1].enclosing_types(), 1);
        assert!(unit.definitions[1].doc.is_none());
    }

    #[test]
    fn test_malformed_dump_reports_origin() {
        let err = SourceUnit::from_json("{not json", "broken.json").unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_dump_round_trip_through_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let dump_path = temp_dir.path().join("unit.json");

        let mut unit = SourceUnit::new("Test.java", "class Test {\n}\n");
        unit.declarations.push(
            Declaration::new("sb1", 3, TypeRef::primitive(PrimitiveKind::Boolean)).with_static(),
        );
        fs::write(&dump_path, unit.to_json().unwrap()).unwrap();

        let loaded = SourceUnit::load_from_file(&dump_path).unwrap();
        assert_eq!(loaded, unit);
    }

    #[test]
    fn test_primitive_names_and_prefixes() {
        assert_eq!(PrimitiveKind::Boolean.type_name(), "boolean");
        assert_eq!(PrimitiveKind::Byte.prefix(), PrimitiveKind::Boolean.prefix());
        assert_eq!(PrimitiveKind::Short.prefix(), "s");
    }
}
