//! Rendering of type references as TypeScript type expressions.

use dtogen_core::schema::{simple_name, TypeRef, Wrapper};

/// Marker appended to an array or enumerable element type.
pub const ARRAY_SUFFIX: &str = "[]";

/// Marker appended to a nullable value type.
pub const NULLABLE_SUFFIX: &str = "|null";

/// Render a type reference.
///
/// Primitives use the fixed alias table, arrays and enumerables get `[]`,
/// nullable value types get `|null`, dictionaries become structural map
/// types and async results render their result type. Anything else is a
/// forward reference by simple name.
pub fn render(ty: &TypeRef) -> String {
    match ty {
        TypeRef::Primitive(primitive) => primitive.to_typescript().to_string(),
        TypeRef::Named(name) => simple_name(name).to_string(),
        TypeRef::Array(element) => array_of(render(element)),
        TypeRef::Generic { wrapper, args } => match (wrapper, args.as_slice()) {
            (Wrapper::Dictionary, [key, value]) => {
                format!("{{ [key: {}]: {} }}", render(key), render(value))
            }
            (Wrapper::Nullable, [value]) if ty.nullable_value_type().is_some() => {
                format!("{}{}", render(value), NULLABLE_SUFFIX)
            }
            // Reference types are nullable already.
            (Wrapper::Nullable, [value]) => render(value),
            (Wrapper::Enumerable | Wrapper::Collection, [element]) => array_of(render(element)),
            (Wrapper::Task, [result]) => render(result),
            _ => ty.simple_name(),
        },
    }
}

fn array_of(element: String) -> String {
    if element.contains('|') {
        format!("({}){}", element, ARRAY_SUFFIX)
    } else {
        format!("{}{}", element, ARRAY_SUFFIX)
    }
}

/// Simple names of the declared types `render` refers to, in rendering
/// order, duplicates included.
///
/// Custom generics render as their definition name, which is not a
/// declaration of the schema, and contribute nothing.
pub fn referenced_types(ty: &TypeRef) -> Vec<String> {
    let mut names = Vec::new();
    collect_references(ty, &mut names);
    names
}

fn collect_references(ty: &TypeRef, names: &mut Vec<String>) {
    match ty {
        TypeRef::Primitive(_) => {}
        TypeRef::Named(name) => names.push(simple_name(name).to_string()),
        TypeRef::Array(element) => collect_references(element, names),
        TypeRef::Generic {
            wrapper: Wrapper::Custom(_),
            ..
        } => {}
        TypeRef::Generic { args, .. } => {
            for arg in args {
                collect_references(arg, names);
            }
        }
    }
}
