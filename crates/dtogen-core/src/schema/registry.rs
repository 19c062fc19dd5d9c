use std::path::Path;

use serde::{Deserialize, Serialize};

use super::model::{EndpointDef, TypeDef};
use crate::error::{DtogenError, Result};

/// The complete, read-only description of a source model.
///
/// Populated once by a metadata provider, then shared by discovery and
/// conversion for the duration of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Top-level declarations, in declaration order.
    #[serde(default)]
    pub types: Vec<TypeDef>,

    /// API operations whose result shapes are discovery candidates.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub endpoints: Vec<EndpointDef>,
}

impl Schema {
    /// Create a new empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level declaration.
    pub fn with_type(mut self, def: TypeDef) -> Self {
        self.types.push(def);
        self
    }

    /// Add an endpoint.
    pub fn with_endpoint(mut self, endpoint: EndpointDef) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    /// Load a schema from a JSON or TOML file, chosen by extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DtogenError::Schema(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let schema = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content)?,
            Some("json") | None => Self::from_json_str(&content)?,
            Some(other) => {
                return Err(DtogenError::Schema(format!(
                    "Unsupported schema file extension: .{}",
                    other
                )))
            }
        };

        tracing::debug!(
            file = ?path,
            types = schema.types.len(),
            endpoints = schema.endpoints.len(),
            "Loaded schema"
        );
        Ok(schema)
    }

    /// Parse a schema from JSON.
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse a schema from TOML.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Every declaration paired with its full name, nested ones included,
    /// depth-first in declaration order.
    pub fn all_types(&self) -> Vec<(String, &TypeDef)> {
        fn walk<'a>(prefix: String, def: &'a TypeDef, out: &mut Vec<(String, &'a TypeDef)>) {
            let full_name = format!("{}.{}", prefix, def.name);
            out.push((full_name.clone(), def));
            for nested in &def.nested {
                walk(full_name.clone(), nested, out);
            }
        }

        let mut out = Vec::new();
        for def in &self.types {
            walk(def.namespace.clone(), def, &mut out);
        }
        // Types in the global namespace have no leading qualifier.
        for (name, _) in &mut out {
            if let Some(stripped) = name.strip_prefix('.') {
                *name = stripped.to_string();
            }
        }
        out
    }

    /// Find a declaration by full name (`Ns.Outer.Inner`), by path within its
    /// namespace (`Outer.Inner`, so top-level types match their bare name
    /// first), or by the simple name of a nested type.
    pub fn resolve(&self, name: &str) -> Option<(String, &TypeDef)> {
        let all = self.all_types();

        if let Some(pos) = all.iter().position(|(full, _)| full == name) {
            return all.into_iter().nth(pos);
        }

        let by_path = all.iter().position(|(full, def)| {
            let path = full
                .strip_prefix(def.namespace.as_str())
                .map(|rest| rest.trim_start_matches('.'))
                .unwrap_or(full);
            path == name
        });
        if let Some(pos) = by_path {
            return all.into_iter().nth(pos);
        }

        if name.contains('.') {
            return None;
        }
        all.into_iter().find(|(_, def)| def.name == name)
    }

    /// Top-level declarations in a namespace.
    pub fn types_in_namespace<'a>(
        &'a self,
        namespace: &'a str,
    ) -> impl Iterator<Item = &'a TypeDef> + 'a {
        self.types.iter().filter(move |def| def.namespace == namespace)
    }

    /// Distinct namespaces, in first-seen order.
    pub fn namespaces(&self) -> Vec<&str> {
        let mut namespaces: Vec<&str> = Vec::new();
        let all = self
            .types
            .iter()
            .map(|def| def.namespace.as_str())
            .chain(self.endpoints.iter().map(|e| e.namespace.as_str()));
        for ns in all {
            if !namespaces.contains(&ns) {
                namespaces.push(ns);
            }
        }
        namespaces
    }
}
