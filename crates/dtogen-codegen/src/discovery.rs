//! Discovery of the root types of a namespace.
//!
//! A root is the payload type left after stripping array, async-result and
//! enumerable wrappers from a candidate. Each distinct root gets one output
//! file.

use dtogen_core::schema::{Schema, TypeRef, Wrapper};

use crate::{Error, Result};

/// Maximum number of wrapper layers stripped from a single candidate.
pub const MAX_UNWRAP_DEPTH: usize = 32;

/// Namespace restriction for a discovery run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryFilter {
    /// Namespace whose declarations are candidates.
    pub namespace: String,

    /// Also accept namespaces below `namespace` (`Ns.Sub`, `ns::sub`).
    pub include_nested_namespaces: bool,
}

impl DiscoveryFilter {
    /// Match a single namespace exactly.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            include_nested_namespaces: false,
        }
    }

    /// Set whether nested namespaces match.
    pub fn with_nested_namespaces(mut self, include: bool) -> Self {
        self.include_nested_namespaces = include;
        self
    }

    /// Check whether a declaration namespace passes the filter.
    pub fn matches(&self, namespace: &str) -> bool {
        if namespace == self.namespace {
            return true;
        }
        if !self.include_nested_namespaces {
            return false;
        }
        match namespace.strip_prefix(self.namespace.as_str()) {
            Some(rest) => {
                self.namespace.is_empty() || rest.starts_with('.') || rest.starts_with("::")
            }
            None => false,
        }
    }
}

/// Finds the root payload types of a namespace.
pub struct TypeDiscoverer<'a> {
    schema: &'a Schema,
}

impl<'a> TypeDiscoverer<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Candidate types before unwrapping: concrete top-level classes of the
    /// namespace, then the result types of the namespace's endpoints.
    pub fn candidates(&self, filter: &DiscoveryFilter) -> Vec<TypeRef> {
        let classes = self
            .schema
            .types
            .iter()
            .filter(|def| def.is_concrete_class() && filter.matches(&def.namespace))
            .map(|def| {
                if def.namespace.is_empty() {
                    TypeRef::named(&def.name)
                } else {
                    TypeRef::named(format!("{}.{}", def.namespace, def.name))
                }
            });

        let endpoints = self
            .schema
            .endpoints
            .iter()
            .filter(|endpoint| filter.matches(&endpoint.namespace))
            .map(|endpoint| endpoint.returns.clone());

        classes.chain(endpoints).collect()
    }

    /// Resolve every candidate to its payload, dropping primitives and
    /// duplicates. Fails on the first candidate with an unsupported wrapper.
    pub fn discover(&self, filter: &DiscoveryFilter) -> Result<Vec<TypeRef>> {
        let mut roots: Vec<TypeRef> = Vec::new();

        for candidate in self.candidates(filter) {
            let payload = resolve_payload(&candidate)?;

            if payload.is_primitive() {
                tracing::debug!(candidate = %candidate, "Skipping primitive payload");
                continue;
            }

            let payload = self.canonicalize(payload);
            if roots.contains(&payload) {
                tracing::debug!(candidate = %candidate, payload = %payload, "Already discovered");
                continue;
            }

            tracing::debug!(candidate = %candidate, payload = %payload, "Discovered root type");
            roots.push(payload);
        }

        tracing::info!(
            namespace = %filter.namespace,
            count = roots.len(),
            "Type discovery finished"
        );
        Ok(roots)
    }

    /// Replace a named payload by its fully-qualified name so that the same
    /// declaration reached through different spellings deduplicates.
    fn canonicalize(&self, payload: TypeRef) -> TypeRef {
        match &payload {
            TypeRef::Named(name) => match self.schema.resolve(name) {
                Some((full_name, _)) => TypeRef::Named(full_name),
                None => payload,
            },
            _ => payload,
        }
    }
}

/// Strip array, async-result and enumerable wrappers until a non-wrapper
/// type is reached.
pub fn resolve_payload(ty: &TypeRef) -> Result<TypeRef> {
    let mut current = ty;

    for _ in 0..=MAX_UNWRAP_DEPTH {
        current = match current {
            TypeRef::Array(element) => element.as_ref(),
            TypeRef::Generic { wrapper, args }
                if *wrapper == Wrapper::Task || wrapper.is_enumerable() =>
            {
                args.first().ok_or_else(|| Error::UnsupportedGenericShape {
                    type_name: ty.to_string(),
                })?
            }
            TypeRef::Generic { .. } => {
                return Err(Error::UnsupportedGenericShape {
                    type_name: ty.to_string(),
                })
            }
            TypeRef::Primitive(_) | TypeRef::Named(_) => return Ok(current.clone()),
        };
    }

    Err(Error::UnwrapDepthExceeded {
        type_name: ty.to_string(),
        depth: MAX_UNWRAP_DEPTH,
    })
}
