//! TypeScript declaration generator.
//!
//! Produces one `<Name>.ts` file per discovered root type plus a barrel file
//! re-exporting all of them.

mod convert;
mod mapping;
mod module;

pub use convert::{convert_declaration, import_names, ConvertedType, TypeConverter};
pub use mapping::{referenced_types, render};
pub use module::{barrel_lines, export_line, import_line};

use std::path::{Path, PathBuf};

use dtogen_core::config::DEFAULT_BARREL_FILE;
use dtogen_core::schema::Schema;

use crate::discovery::{DiscoveryFilter, TypeDiscoverer};
use crate::{Error, Result};

/// A rendered file, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    /// File name relative to the output directory.
    pub name: String,

    /// Output lines, without terminators.
    pub lines: Vec<String>,
}

impl OutputFile {
    /// File contents with each line newline-terminated.
    pub fn contents(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

impl From<ConvertedType> for OutputFile {
    fn from(converted: ConvertedType) -> Self {
        Self {
            name: converted.file_name,
            lines: converted.lines,
        }
    }
}

/// Summary of a generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Generated root type names, in discovery order.
    pub types: Vec<String>,

    /// Paths of every file written, barrel last.
    pub files: Vec<PathBuf>,

    /// Barrel file name, when one was written.
    pub barrel: Option<String>,
}

/// TypeScript code generator.
pub struct TypeScriptGenerator {
    /// Output directory for generated files.
    output_dir: PathBuf,

    /// Name of the barrel file.
    barrel_file: String,
}

impl TypeScriptGenerator {
    /// Create a new TypeScript generator writing to `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            barrel_file: DEFAULT_BARREL_FILE.to_string(),
        }
    }

    /// Override the barrel file name.
    pub fn with_barrel_file(mut self, barrel_file: impl Into<String>) -> Self {
        self.barrel_file = barrel_file.into();
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Discover and convert every root type in memory.
    ///
    /// The barrel file comes last and is omitted when nothing was discovered.
    /// Two roots sharing a simple name would share a file and are rejected.
    pub fn render(&self, schema: &Schema, filter: &DiscoveryFilter) -> Result<Vec<OutputFile>> {
        let roots = TypeDiscoverer::new(schema).discover(filter)?;
        let converter = TypeConverter::new(schema);

        let mut converted: Vec<ConvertedType> = Vec::with_capacity(roots.len());
        for (i, root) in roots.iter().enumerate() {
            let next = converter.convert(root)?;
            if let Some(pos) = converted.iter().position(|c| c.file_name == next.file_name) {
                return Err(Error::DuplicateFileName {
                    file_name: next.file_name,
                    first: roots[pos].to_string(),
                    second: roots[i].to_string(),
                });
            }
            converted.push(next);
        }

        if converted.is_empty() {
            return Ok(Vec::new());
        }

        let names: Vec<String> = converted.iter().map(|c| c.type_name.clone()).collect();
        let mut files: Vec<OutputFile> = converted.into_iter().map(OutputFile::from).collect();
        files.push(OutputFile {
            name: self.barrel_file.clone(),
            lines: barrel_lines(&names),
        });

        Ok(files)
    }

    /// Generate all files and write them to the output directory.
    ///
    /// Everything is converted before the first write, so a conversion
    /// failure leaves the directory untouched. Write failures are returned as
    /// they occur; files already written stay in place.
    pub fn generate(&self, schema: &Schema, filter: &DiscoveryFilter) -> Result<GenerationReport> {
        let files = self.render(schema, filter)?;

        let mut report = GenerationReport::default();
        if files.is_empty() {
            tracing::info!(namespace = %filter.namespace, "No types to generate");
            return Ok(report);
        }

        if !self.output_dir.exists() {
            std::fs::create_dir_all(&self.output_dir)?;
        }

        for file in &files {
            let path = self.output_dir.join(&file.name);
            std::fs::write(&path, file.contents())?;
            tracing::debug!(file = ?path, lines = file.lines.len(), "Wrote file");
            report.files.push(path);

            if file.name == self.barrel_file {
                report.barrel = Some(file.name.clone());
            } else if let Some(type_name) = file.name.strip_suffix(".ts") {
                report.types.push(type_name.to_string());
            }
        }

        tracing::info!(
            types = report.types.len(),
            output = ?self.output_dir,
            "TypeScript generation finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dtogen_core::schema::{EndpointDef, TypeDef, TypeRef};
    use tempfile::tempdir;

    fn ty(expr: &str) -> TypeRef {
        TypeRef::parse(expr).unwrap()
    }

    fn parent_and_line() -> Schema {
        Schema::new()
            .with_type(
                TypeDef::class("Shop.Dtos", "Parent")
                    .with_field("Id", ty("int"))
                    .with_field("Name", ty("string"))
                    .with_field("Lines", ty("ICollection<Line>")),
            )
            .with_type(
                TypeDef::class("Shop.Dtos", "Line")
                    .with_field("Id", ty("int"))
                    .with_field("Amount", ty("double")),
            )
    }

    #[test]
    fn test_generate_parent_and_line() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("dto");
        let generator = TypeScriptGenerator::new(&out);

        let report = generator
            .generate(&parent_and_line(), &DiscoveryFilter::new("Shop.Dtos"))
            .unwrap();

        assert_eq!(report.types, vec!["Parent", "Line"]);
        assert_eq!(report.barrel.as_deref(), Some("dto.exports.ts"));
        assert_eq!(report.files.len(), 3);

        let parent = std::fs::read_to_string(out.join("Parent.ts")).unwrap();
        assert_eq!(
            parent,
            "import {Line} from \"./Line\";\n\
             \n\
             export interface Parent {\n  id: number;\n  name: string;\n  lines: Line[];\n}\n"
        );

        let line = std::fs::read_to_string(out.join("Line.ts")).unwrap();
        assert_eq!(
            line,
            "export interface Line {\n  id: number;\n  amount: number;\n}\n"
        );

        let barrel = std::fs::read_to_string(out.join("dto.exports.ts")).unwrap();
        assert_eq!(
            barrel,
            "export {Parent} from \"./Parent\";\nexport {Line} from \"./Line\";\n"
        );
    }

    #[test]
    fn test_custom_barrel_file_name() {
        let generator = TypeScriptGenerator::new("unused").with_barrel_file("index.ts");
        let files = generator
            .render(&parent_and_line(), &DiscoveryFilter::new("Shop.Dtos"))
            .unwrap();

        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Parent.ts", "Line.ts", "index.ts"]);
    }

    #[test]
    fn test_no_types_writes_nothing() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("dto");
        let report = TypeScriptGenerator::new(&out)
            .generate(&parent_and_line(), &DiscoveryFilter::new("Elsewhere"))
            .unwrap();

        assert_eq!(report, GenerationReport::default());
        assert!(!out.exists());
    }

    #[test]
    fn test_unsupported_shape_aborts_without_writing() {
        let schema = parent_and_line().with_endpoint(EndpointDef::new(
            "Shop.Dtos",
            "GetPage",
            ty("Paged<Parent, int>"),
        ));

        let dir = tempdir().unwrap();
        let out = dir.path().join("dto");
        let result =
            TypeScriptGenerator::new(&out).generate(&schema, &DiscoveryFilter::new("Shop.Dtos"));

        assert!(matches!(
            result,
            Err(Error::UnsupportedGenericShape { .. })
        ));
        assert!(!out.exists());
    }

    #[test]
    fn test_unknown_endpoint_payload_aborts_without_writing() {
        let schema = parent_and_line().with_endpoint(EndpointDef::new(
            "Shop.Dtos",
            "GetGhost",
            ty("Task<Ghost>"),
        ));

        let dir = tempdir().unwrap();
        let result = TypeScriptGenerator::new(dir.path())
            .generate(&schema, &DiscoveryFilter::new("Shop.Dtos"));

        assert!(matches!(result, Err(Error::UnknownType(_))));
        assert!(!dir.path().join("Parent.ts").exists());
    }

    #[test]
    fn test_roots_sharing_a_simple_name_are_rejected() {
        let schema = Schema::new()
            .with_type(TypeDef::class("Shop.Dtos", "Order").with_field("Id", ty("int")))
            .with_type(TypeDef::class("Shop.Dtos.Admin", "Order").with_field("Id", ty("int")));
        let filter = DiscoveryFilter::new("Shop.Dtos").with_nested_namespaces(true);

        let dir = tempdir().unwrap();
        let out = dir.path().join("dto");
        let result = TypeScriptGenerator::new(&out).generate(&schema, &filter);

        match result {
            Err(Error::DuplicateFileName {
                file_name,
                first,
                second,
            }) => {
                assert_eq!(file_name, "Order.ts");
                assert_eq!(first, "Shop.Dtos.Order");
                assert_eq!(second, "Shop.Dtos.Admin.Order");
            }
            other => panic!("expected a duplicate file name error, got {:?}", other),
        }
        assert!(!out.exists());
    }

    #[test]
    fn test_same_payload_through_two_shapes_yields_one_file() {
        let schema = Schema::new()
            .with_type(TypeDef::class("Shop.Models", "Foo").with_field("Id", ty("int")))
            .with_endpoint(EndpointDef::new("Shop.Api", "All", ty("Foo[]")))
            .with_endpoint(EndpointDef::new("Shop.Api", "One", ty("Task<Foo>")));

        let files = TypeScriptGenerator::new("unused")
            .render(&schema, &DiscoveryFilter::new("Shop.Api"))
            .unwrap();

        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Foo.ts", "dto.exports.ts"]);
    }
}
