//! Conversion of declared types into TypeScript declarations.

use dtogen_core::schema::{Schema, TypeDef, TypeKind, TypeRef};

use super::mapping::{referenced_types, render};
use super::module::import_line;
use crate::{Error, Result};

/// Output of converting one root type: the file holding its declaration and
/// the declarations of every type nested inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedType {
    /// Simple name of the root type.
    pub type_name: String,

    /// `<TypeName>.ts`
    pub file_name: String,

    /// Output lines, without terminators.
    pub lines: Vec<String>,
}

/// Converts payload types of a schema into TypeScript.
pub struct TypeConverter<'a> {
    schema: &'a Schema,
}

impl<'a> TypeConverter<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Convert a discovered payload type.
    pub fn convert(&self, payload: &TypeRef) -> Result<ConvertedType> {
        let TypeRef::Named(name) = payload else {
            return Err(Error::UnknownType(payload.to_string()));
        };
        let (full_name, def) = self
            .schema
            .resolve(name)
            .ok_or_else(|| Error::UnknownType(name.clone()))?;

        let converted = convert_declaration(def);
        tracing::debug!(
            type_name = %full_name,
            file = %converted.file_name,
            declarations = def.flatten().len(),
            "Converted type"
        );
        Ok(converted)
    }
}

/// Convert a declaration and everything nested in it, depth-first with the
/// declaration itself first. Declarations are separated by a blank line.
pub fn convert_declaration(def: &TypeDef) -> ConvertedType {
    let mut lines = Vec::new();

    for declaration in def.flatten() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        match &declaration.kind {
            TypeKind::Class { .. } | TypeKind::Interface { .. } => {
                convert_object(&mut lines, declaration)
            }
            TypeKind::Enum { .. } => convert_enum(&mut lines, declaration),
        }
    }

    ConvertedType {
        type_name: def.name.clone(),
        file_name: format!("{}.ts", def.name),
        lines,
    }
}

fn convert_object(lines: &mut Vec<String>, def: &TypeDef) {
    let imports = import_names(def);
    for name in &imports {
        lines.push(import_line(name));
    }
    if !imports.is_empty() {
        lines.push(String::new());
    }

    lines.push(format!("export interface {} {{", def.name));
    for property in def.public_properties() {
        lines.push(format!(
            "  {}: {};",
            property.ts_name(),
            render(&property.ty)
        ));
    }
    lines.push("}".to_string());
}

fn convert_enum(lines: &mut Vec<String>, def: &TypeDef) {
    lines.push(format!("export enum {} {{", def.name));
    for member in def.members() {
        lines.push(format!("  {} = {},", member.name, member.value));
    }
    lines.push("}".to_string());
}

/// Names an interface body must import, deduplicated, first-seen order.
///
/// Every declared type a property renders is imported, however deeply it
/// sits inside arrays, enumerables, nullables, dictionaries or async
/// results. Self-reference is detected by simple name only, so a same-named
/// type from another namespace is never imported either.
pub fn import_names(def: &TypeDef) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    for property in def.public_properties() {
        for name in referenced_types(&property.ty) {
            if name == def.name || names.contains(&name) {
                continue;
            }
            names.push(name);
        }
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use dtogen_core::schema::{PropertyDef, Visibility};

    fn ty(expr: &str) -> TypeRef {
        TypeRef::parse(expr).unwrap()
    }

    #[test]
    fn test_convert_interface_with_imports() {
        let def = TypeDef::class("Shop.Dtos", "Parent")
            .with_field("Id", ty("int"))
            .with_field("Name", ty("string"))
            .with_field("Lines", ty("ICollection<Line>"));

        let converted = convert_declaration(&def);
        assert_eq!(converted.file_name, "Parent.ts");
        assert_eq!(
            converted.lines,
            vec![
                r#"import {Line} from "./Line";"#,
                "",
                "export interface Parent {",
                "  id: number;",
                "  name: string;",
                "  lines: Line[];",
                "}",
            ]
        );
    }

    #[test]
    fn test_convert_interface_without_imports() {
        let def = TypeDef::class("Shop.Dtos", "Line")
            .with_field("Id", ty("int"))
            .with_field("Amount", ty("decimal"));

        assert_eq!(
            convert_declaration(&def).lines,
            vec!["export interface Line {", "  id: number;", "  amount: number;", "}"]
        );
    }

    #[test]
    fn test_convert_enum_uses_integer_values() {
        let def = TypeDef::enumeration("Shop.Dtos", "Status")
            .with_member("Open", 0)
            .with_member("Closed", 1)
            .with_member("Archived", 10);

        assert_eq!(
            convert_declaration(&def).lines,
            vec![
                "export enum Status {",
                "  Open = 0,",
                "  Closed = 1,",
                "  Archived = 10,",
                "}"
            ]
        );
    }

    #[test]
    fn test_self_reference_is_not_imported() {
        let def = TypeDef::class("Shop.Dtos", "Category")
            .with_field("Parent", ty("Category"))
            .with_field("Children", ty("List<Category>"))
            .with_field("Owner", ty("Shop.Admin.Category"));

        let converted = convert_declaration(&def);
        assert!(converted.lines.iter().all(|l| !l.starts_with("import")));
        assert!(converted.lines.contains(&"  parent: Category;".to_string()));
        assert!(converted.lines.contains(&"  children: Category[];".to_string()));
    }

    #[test]
    fn test_imports_are_deduplicated_in_first_seen_order() {
        let def = TypeDef::class("Shop.Dtos", "Order")
            .with_field("Customer", ty("Customer"))
            .with_field("Lines", ty("Line[]"))
            .with_field("BillTo", ty("Customer"))
            .with_field("History", ty("IEnumerable<Line>"));

        assert_eq!(import_names(&def), vec!["Customer", "Line"]);
    }

    #[test]
    fn test_nullable_primitives_need_no_import() {
        let def = TypeDef::class("Shop.Dtos", "Order")
            .with_field("ShippedAt", ty("Nullable<DateTimeOffset>"))
            .with_field("Quantity", ty("int?"))
            .with_field("Tags", ty("List<string>"));

        assert!(import_names(&def).is_empty());
        let lines = convert_declaration(&def).lines;
        assert!(lines.contains(&"  shippedAt: string|null;".to_string()));
        assert!(lines.contains(&"  quantity: number|null;".to_string()));
        assert!(lines.contains(&"  tags: string[];".to_string()));
    }

    #[test]
    fn test_wrapped_references_are_imported() {
        let def = TypeDef::class("Shop.Dtos", "Order")
            .with_field("Grid", ty("List<Line[]>"))
            .with_field("Batches", ty("Vec<Vec<Line>>"))
            .with_field("Pending", ty("Task<Customer>"))
            .with_field("Status", ty("Nullable<Status>"))
            .with_field("Totals", ty("Dictionary<string, Money>"));

        assert_eq!(
            convert_declaration(&def).lines,
            vec![
                r#"import {Line} from "./Line";"#,
                r#"import {Customer} from "./Customer";"#,
                r#"import {Status} from "./Status";"#,
                r#"import {Money} from "./Money";"#,
                "",
                "export interface Order {",
                "  grid: Line[][];",
                "  batches: Line[][];",
                "  pending: Customer;",
                "  status: Status|null;",
                "  totals: { [key: string]: Money };",
                "}",
            ]
        );
    }

    #[test]
    fn test_nested_self_reference_is_not_imported() {
        let def = TypeDef::class("Shop.Dtos", "Node")
            .with_field("Rows", ty("List<List<Node>>"))
            .with_field("Next", ty("Task<Node>"));

        assert!(import_names(&def).is_empty());
        let lines = convert_declaration(&def).lines;
        assert!(lines.contains(&"  rows: Node[][];".to_string()));
        assert!(lines.contains(&"  next: Node;".to_string()));
    }

    #[test]
    fn test_only_readable_properties_are_emitted() {
        let def = TypeDef::class("Shop.Dtos", "Account")
            .with_field("Id", ty("int"))
            .with_property(
                PropertyDef::new("PasswordHash", ty("Secret"))
                    .with_visibility(Visibility::Private),
            )
            .with_property(
                PropertyDef::new("Token", ty("string")).with_visibility(Visibility::WriteOnly),
            );

        let lines = convert_declaration(&def).lines;
        assert_eq!(lines, vec!["export interface Account {", "  id: number;", "}"]);
    }

    #[test]
    fn test_nested_types_share_the_file() {
        let def = TypeDef::class("Shop.Dtos", "Order")
            .with_field("State", ty("Order.State"))
            .with_nested(
                TypeDef::enumeration("Shop.Dtos", "State")
                    .with_member("New", 0)
                    .with_member("Paid", 1),
            )
            .with_nested(TypeDef::class("Shop.Dtos", "Note").with_field("Text", ty("string")));

        let converted = convert_declaration(&def);
        assert_eq!(
            converted.lines,
            vec![
                r#"import {State} from "./State";"#,
                "",
                "export interface Order {",
                "  state: State;",
                "}",
                "",
                "export enum State {",
                "  New = 0,",
                "  Paid = 1,",
                "}",
                "",
                "export interface Note {",
                "  text: string;",
                "}",
            ]
        );
    }

    #[test]
    fn test_converter_rejects_unknown_types() {
        let schema = Schema::new();
        let converter = TypeConverter::new(&schema);
        assert!(matches!(
            converter.convert(&ty("Missing")),
            Err(Error::UnknownType(_))
        ));
        assert!(matches!(
            converter.convert(&ty("int")),
            Err(Error::UnknownType(_))
        ));
    }

    #[test]
    fn test_empty_enum() {
        let def = TypeDef::enumeration("Shop", "Empty");
        assert_eq!(
            convert_declaration(&def).lines,
            vec!["export enum Empty {", "}"]
        );
    }
}
