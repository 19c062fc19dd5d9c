//! Rust source code parser for extracting type declarations.
//!
//! This module parses Rust source files to build a [`Schema`] without
//! requiring compilation. Public structs with named fields become classes,
//! public fieldless enums become enums, and the module path of each file
//! becomes the namespace (`crate::dto::orders`).

use std::path::Path;

use dtogen_core::schema::{
    Primitive, PropertyDef, Schema, TypeDef, TypeRef, Visibility, Wrapper,
};
use syn::{Attribute, Expr, Fields, GenericArgument, Item, Lit, Meta, PathArguments, UnOp};
use walkdir::WalkDir;

use crate::{Error, Result};

/// Parse all Rust source files in a directory and extract type declarations.
pub fn parse_project(src_dir: &Path) -> Result<Schema> {
    let mut schema = Schema::new();

    for entry in WalkDir::new(src_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map(|ext| ext == "rs").unwrap_or(false))
    {
        let content = std::fs::read_to_string(entry.path())?;
        let namespace = module_path(src_dir, entry.path());
        if let Err(e) = parse_file(&content, &namespace, &mut schema) {
            tracing::debug!(file = ?entry.path(), error = %e, "Failed to parse file");
        }
    }

    tracing::debug!(
        dir = ?src_dir,
        types = schema.types.len(),
        "Scanned Rust sources"
    );
    Ok(schema)
}

/// Module path of a source file relative to the crate root.
fn module_path(src_dir: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(src_dir).unwrap_or(file);
    let mut segments = vec!["crate".to_string()];

    let components: Vec<String> = relative
        .with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    let last = components.len().saturating_sub(1);
    for (i, segment) in components.into_iter().enumerate() {
        if i == last && matches!(segment.as_str(), "mod" | "lib" | "main") {
            continue;
        }
        segments.push(segment);
    }

    segments.join("::")
}

/// Parse a single Rust source file and extract type declarations.
fn parse_file(content: &str, namespace: &str, schema: &mut Schema) -> Result<()> {
    let file = syn::parse_file(content).map_err(|e| Error::Parse(e.to_string()))?;
    parse_items(&file.items, namespace, schema);
    Ok(())
}

fn parse_items(items: &[Item], namespace: &str, schema: &mut Schema) {
    for item in items {
        match item {
            Item::Struct(item_struct) if is_public(&item_struct.vis) => {
                if let Some(def) = parse_struct(item_struct, namespace) {
                    schema.types.push(def);
                }
            }
            Item::Enum(item_enum) if is_public(&item_enum.vis) => {
                if let Some(def) = parse_enum(item_enum, namespace) {
                    schema.types.push(def);
                }
            }
            Item::Mod(item_mod) => {
                if let Some((_, items)) = &item_mod.content {
                    let nested = format!("{}::{}", namespace, item_mod.ident);
                    parse_items(items, &nested, schema);
                }
            }
            _ => {}
        }
    }
}

fn is_public(vis: &syn::Visibility) -> bool {
    matches!(vis, syn::Visibility::Public(_))
}

/// Parse a struct with named fields into a class.
fn parse_struct(item: &syn::ItemStruct, namespace: &str) -> Option<TypeDef> {
    let struct_name = item.ident.to_string();

    if item.generics.type_params().next().is_some() {
        tracing::debug!(name = %struct_name, "Skipping generic struct");
        return None;
    }

    let Fields::Named(fields) = &item.fields else {
        tracing::debug!(name = %struct_name, "Skipping struct without named fields");
        return None;
    };

    let mut def = TypeDef::class(namespace, &struct_name);
    def.doc = get_doc_comment(&item.attrs);

    for field in &fields.named {
        let Some(ident) = &field.ident else {
            continue;
        };
        let serde = serde_field_options(&field.attrs);

        let name = serde.rename.unwrap_or_else(|| ident.to_string());
        let mut property = PropertyDef::new(name, type_to_ref(&field.ty));
        property.doc = get_doc_comment(&field.attrs);
        if !is_public(&field.vis) || serde.skip {
            property.visibility = Visibility::Private;
        }

        def = def.with_property(property);
    }

    Some(def)
}

/// Parse a fieldless enum, assigning implicit discriminants the way the
/// compiler does: zero first, then one more than the previous member.
fn parse_enum(item: &syn::ItemEnum, namespace: &str) -> Option<TypeDef> {
    let enum_name = item.ident.to_string();

    if item
        .variants
        .iter()
        .any(|v| !matches!(v.fields, Fields::Unit))
    {
        tracing::debug!(name = %enum_name, "Skipping enum with data-carrying variants");
        return None;
    }

    let mut def = TypeDef::enumeration(namespace, &enum_name);
    def.doc = get_doc_comment(&item.attrs);

    let mut next_value = 0i64;
    for variant in &item.variants {
        let value = variant
            .discriminant
            .as_ref()
            .and_then(|(_, expr)| discriminant_value(expr))
            .unwrap_or(next_value);
        def = def.with_member(&variant.ident.to_string(), value);
        next_value = value.wrapping_add(1);
    }

    Some(def)
}

/// Integer value of a literal discriminant, including negated literals.
fn discriminant_value(expr: &Expr) -> Option<i64> {
    match expr {
        Expr::Lit(lit) => match &lit.lit {
            Lit::Int(int_lit) => int_lit.base10_parse::<i64>().ok(),
            _ => None,
        },
        Expr::Unary(unary) if matches!(unary.op, UnOp::Neg(_)) => {
            discriminant_value(&unary.expr).map(|v| -v)
        }
        Expr::Paren(paren) => discriminant_value(&paren.expr),
        _ => None,
    }
}

/// Convert a syn::Type to a TypeRef.
fn type_to_ref(ty: &syn::Type) -> TypeRef {
    match ty {
        syn::Type::Reference(reference) => type_to_ref(&reference.elem),
        syn::Type::Paren(paren) => type_to_ref(&paren.elem),
        syn::Type::Group(group) => type_to_ref(&group.elem),
        syn::Type::Array(array) => TypeRef::array(type_to_ref(&array.elem)),
        syn::Type::Slice(slice) => TypeRef::array(type_to_ref(&slice.elem)),
        syn::Type::Tuple(tuple) if tuple.elems.is_empty() => TypeRef::Primitive(Primitive::Void),
        syn::Type::Path(type_path) => path_to_ref(type_path),
        other => {
            let type_str = quote::quote!(#other).to_string().replace(' ', "");
            tracing::debug!(ty = %type_str, "Unsupported field type, using object");
            TypeRef::Primitive(Primitive::Object)
        }
    }
}

fn path_to_ref(type_path: &syn::TypePath) -> TypeRef {
    let Some(segment) = type_path.path.segments.last() else {
        return TypeRef::Primitive(Primitive::Object);
    };
    let ident = segment.ident.to_string();

    let args: Vec<TypeRef> = match &segment.arguments {
        PathArguments::AngleBracketed(angle) => angle
            .args
            .iter()
            .filter_map(|arg| match arg {
                GenericArgument::Type(ty) => Some(type_to_ref(ty)),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };

    match (ident.as_str(), args.as_slice()) {
        ("DateTime" | "OffsetDateTime" | "SystemTime", _) => {
            TypeRef::Primitive(Primitive::DateTimeOffset)
        }
        ("Value", []) => TypeRef::Primitive(Primitive::Object),
        ("Option", [inner]) => TypeRef::optional(inner.clone()),
        ("Box" | "Arc" | "Rc" | "Cow", [inner]) => inner.clone(),
        (_, []) => match Primitive::from_name(&ident) {
            Some(primitive) => TypeRef::Primitive(primitive),
            None => TypeRef::Named(ident),
        },
        _ => {
            let wrapper = Wrapper::from_name(&ident);
            match wrapper.arity() {
                Some(arity) if arity != args.len() => {
                    TypeRef::generic(Wrapper::Custom(ident), args)
                }
                _ => TypeRef::generic(wrapper, args),
            }
        }
    }
}

/// Field options from `#[serde(...)]` attributes.
#[derive(Debug, Default)]
struct SerdeFieldOptions {
    rename: Option<String>,
    skip: bool,
}

fn serde_field_options(attrs: &[Attribute]) -> SerdeFieldOptions {
    let mut options = SerdeFieldOptions::default();

    for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
        let parsed = attr.parse_nested_meta(|meta| {
            if meta.input.peek(syn::token::Paren) {
                // `rename(serialize = "..")` and friends.
                return meta.parse_nested_meta(|nested| {
                    let _: Expr = nested.value()?.parse()?;
                    Ok(())
                });
            }

            if meta.path.is_ident("rename") {
                let value: syn::LitStr = meta.value()?.parse()?;
                options.rename = Some(value.value());
            } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
                options.skip = true;
            } else if meta.input.peek(syn::Token![=]) {
                // Consume values of options we do not interpret.
                let _: Expr = meta.value()?.parse()?;
            }
            Ok(())
        });

        if let Err(e) = parsed {
            let attr_str = quote::quote!(#attr).to_string();
            tracing::debug!(attr = %attr_str, error = %e, "Failed to parse serde attribute");
        }
    }

    options
}

/// Get string value from attribute like #[attr = "value"].
fn get_attribute_string_value(attr: &Attribute) -> Option<String> {
    if let Meta::NameValue(nv) = &attr.meta {
        if let Expr::Lit(lit) = &nv.value {
            if let Lit::Str(s) = &lit.lit {
                return Some(s.value());
            }
        }
    }
    None
}

/// Get documentation comment from attributes.
fn get_doc_comment(attrs: &[Attribute]) -> Option<String> {
    let docs: Vec<String> = attrs
        .iter()
        .filter_map(|attr| {
            if attr.path().is_ident("doc") {
                get_attribute_string_value(attr)
            } else {
                None
            }
        })
        .collect();

    if docs.is_empty() {
        None
    } else {
        Some(
            docs.into_iter()
                .map(|s| s.trim().to_string())
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }
}
