use serde::{Deserialize, Serialize};

use super::field::PropertyDef;
use super::types::TypeRef;

/// A type declared in the source model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDef {
    /// Simple name.
    pub name: String,

    /// Namespace the type is declared in. Nested types carry their
    /// enclosing type's namespace.
    #[serde(default)]
    pub namespace: String,

    /// Kind-specific shape.
    #[serde(flatten)]
    pub kind: TypeKind,

    /// Types declared lexically inside this one, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<TypeDef>,

    /// Documentation comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

/// Declaration kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeKind {
    Class {
        #[serde(default, rename = "abstract")]
        is_abstract: bool,
        #[serde(default)]
        properties: Vec<PropertyDef>,
    },
    Interface {
        #[serde(default)]
        properties: Vec<PropertyDef>,
    },
    Enum {
        #[serde(default)]
        members: Vec<EnumMember>,
    },
}

impl TypeDef {
    fn new(namespace: &str, name: &str, kind: TypeKind) -> Self {
        Self {
            name: name.to_string(),
            namespace: namespace.to_string(),
            kind,
            nested: Vec::new(),
            doc: None,
        }
    }

    /// Create a concrete class.
    pub fn class(namespace: &str, name: &str) -> Self {
        Self::new(
            namespace,
            name,
            TypeKind::Class {
                is_abstract: false,
                properties: Vec::new(),
            },
        )
    }

    /// Create an interface.
    pub fn interface(namespace: &str, name: &str) -> Self {
        Self::new(
            namespace,
            name,
            TypeKind::Interface {
                properties: Vec::new(),
            },
        )
    }

    /// Create an enumeration.
    pub fn enumeration(namespace: &str, name: &str) -> Self {
        Self::new(
            namespace,
            name,
            TypeKind::Enum {
                members: Vec::new(),
            },
        )
    }

    /// Mark a class as abstract.
    pub fn abstract_class(mut self) -> Self {
        if let TypeKind::Class { is_abstract, .. } = &mut self.kind {
            *is_abstract = true;
        }
        self
    }

    /// Add a property. Ignored for enums.
    pub fn with_property(mut self, property: PropertyDef) -> Self {
        match &mut self.kind {
            TypeKind::Class { properties, .. } | TypeKind::Interface { properties } => {
                properties.push(property)
            }
            TypeKind::Enum { .. } => {}
        }
        self
    }

    /// Add a public property of the given type.
    pub fn with_field(self, name: &str, ty: TypeRef) -> Self {
        self.with_property(PropertyDef::new(name, ty))
    }

    /// Add an enum member. Ignored for object kinds.
    pub fn with_member(mut self, name: &str, value: i64) -> Self {
        if let TypeKind::Enum { members } = &mut self.kind {
            members.push(EnumMember::new(name, value));
        }
        self
    }

    /// Add a nested declaration.
    pub fn with_nested(mut self, nested: TypeDef) -> Self {
        self.nested.push(nested);
        self
    }

    /// Set documentation.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Declared properties; empty for enums.
    pub fn properties(&self) -> &[PropertyDef] {
        match &self.kind {
            TypeKind::Class { properties, .. } | TypeKind::Interface { properties } => properties,
            TypeKind::Enum { .. } => &[],
        }
    }

    /// Properties readable from outside the type, in declaration order.
    pub fn public_properties(&self) -> impl Iterator<Item = &PropertyDef> {
        self.properties().iter().filter(|p| p.is_readable())
    }

    /// Enum members; empty for object kinds.
    pub fn members(&self) -> &[EnumMember] {
        match &self.kind {
            TypeKind::Enum { members } => members,
            _ => &[],
        }
    }

    /// Class or interface.
    pub fn is_object(&self) -> bool {
        matches!(
            self.kind,
            TypeKind::Class { .. } | TypeKind::Interface { .. }
        )
    }

    pub fn is_enum(&self) -> bool {
        matches!(self.kind, TypeKind::Enum { .. })
    }

    /// A class that can be instantiated.
    pub fn is_concrete_class(&self) -> bool {
        matches!(
            self.kind,
            TypeKind::Class {
                is_abstract: false,
                ..
            }
        )
    }

    /// This declaration followed by all nested declarations, depth-first.
    pub fn flatten(&self) -> Vec<&TypeDef> {
        let mut out = vec![self];
        for nested in &self.nested {
            out.extend(nested.flatten());
        }
        out
    }
}

/// Enum member with its underlying integer value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,
    pub value: i64,
}

impl EnumMember {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// An operation exposed by the source API, whose result shape is a
/// discovery candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointDef {
    /// Operation name.
    pub name: String,

    /// Namespace the operation is declared in.
    #[serde(default)]
    pub namespace: String,

    /// Declared result type, wrappers included.
    pub returns: TypeRef,
}

impl EndpointDef {
    pub fn new(namespace: &str, name: &str, returns: TypeRef) -> Self {
        Self {
            name: name.to_string(),
            namespace: namespace.to_string(),
            returns,
        }
    }
}
