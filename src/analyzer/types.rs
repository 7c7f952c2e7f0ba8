//! Type classification for the Hungarian prefix scheme
//!
//! Maps a declared type onto the category that decides its identifier prefix.
//! Array dimensions are always stripped first; primitives win over everything else.

use crate::domain::syntax::{PrimitiveKind, TypeRef};
use std::borrow::Cow;

/// Prefix for `String`
pub const STRING_PREFIX: &str = "s";
/// Prefix for `StringBuffer` and `StringBuilder`
pub const STRING_BUFFER_PREFIX: &str = "sb";
/// Prefix for `Object`
pub const OBJECT_PREFIX: &str = "o";
/// Marker for static declarations
pub const STATIC_MARKER: &str = "s";
/// Marker for arrays and varargs
pub const ARRAY_MARKER: &str = "a";

/// Semantic category of a declaration's element type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    Primitive(PrimitiveKind),
    String,
    /// `StringBuffer` or `StringBuilder`
    StringBuffer,
    Object,
    /// Any other class, by its innermost simple name
    UserClass { name: String },
}

impl TypeDescriptor {
    /// Prefix an identifier of this type must carry
    pub fn prefix(&self) -> Cow<'static, str> {
        match self {
            Self::Primitive(kind) => Cow::Borrowed(kind.prefix()),
            Self::String => Cow::Borrowed(STRING_PREFIX),
            Self::StringBuffer => Cow::Borrowed(STRING_BUFFER_PREFIX),
            Self::Object => Cow::Borrowed(OBJECT_PREFIX),
            Self::UserClass { name } => Cow::Owned(name.to_lowercase()),
        }
    }

    /// Type name as it appears in messages
    pub fn description(&self) -> &str {
        match self {
            Self::Primitive(kind) => kind.type_name(),
            Self::String => "String",
            Self::StringBuffer => "StringBuffer or StringBuilder",
            Self::Object => "Object",
            Self::UserClass { name } => name,
        }
    }
}

/// The declared type carried no usable element type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("declared type has no resolvable element type")]
pub struct UnresolvableType;

/// Classify a declared type, stripping every array dimension first
pub fn classify(declared: &TypeRef) -> Result<TypeDescriptor, UnresolvableType> {
    match declared.element() {
        TypeRef::Primitive { primitive } => Ok(TypeDescriptor::Primitive(*primitive)),
        TypeRef::Class { name_parts } => {
            let name = name_parts
                .last()
                .map(String::as_str)
                .filter(|name| !name.is_empty())
                .ok_or(UnresolvableType)?;
            Ok(classify_class_name(name))
        }
        TypeRef::Unresolved => Err(UnresolvableType),
        // element() never stops on an array layer
        TypeRef::Array { .. } => Err(UnresolvableType),
    }
}

fn classify_class_name(name: &str) -> TypeDescriptor {
    match name {
        "String" => TypeDescriptor::String,
        "StringBuffer" | "StringBuilder" => TypeDescriptor::StringBuffer,
        "Object" => TypeDescriptor::Object,
        other => TypeDescriptor::UserClass { name: other.to_string() },
    }
}

/// The fixed prefix table as (type, prefix) rows, for listing to users
pub fn prefix_table() -> Vec<(&'static str, &'static str)> {
    let mut rows: Vec<_> =
        PrimitiveKind::ALL.into_iter().map(|kind| (kind.type_name(), kind.prefix())).collect();
    rows.extend([
        ("Object", OBJECT_PREFIX),
        ("String", STRING_PREFIX),
        ("StringBuffer", STRING_BUFFER_PREFIX),
        ("StringBuilder", STRING_BUFFER_PREFIX),
        ("{ClassName}", "{classname}"),
    ]);
    rows
}
