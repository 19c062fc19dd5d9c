use serde::{Deserialize, Serialize};

use super::types::TypeRef;

/// Definition of a declared property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDef {
    /// Property name as declared in the source model.
    pub name: String,

    /// Declared type.
    #[serde(rename = "type")]
    pub ty: TypeRef,

    /// Accessibility of the property getter.
    #[serde(default)]
    pub visibility: Visibility,

    /// Documentation comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl PropertyDef {
    /// Create a new public property.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            visibility: Visibility::Public,
            doc: None,
        }
    }

    /// Set the visibility.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Whether callers outside the type can read this property.
    pub fn is_readable(&self) -> bool {
        self.visibility == Visibility::Public
    }

    /// Property name with its first character lowercased.
    pub fn ts_name(&self) -> String {
        to_initial_lowercase(&self.name)
    }
}

/// Getter accessibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Private,
    /// Settable from outside, but without a public getter.
    WriteOnly,
}

/// Lowercase the first character, leaving the rest untouched.
fn to_initial_lowercase(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
