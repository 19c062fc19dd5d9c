//! dtogen - TypeScript declarations from data-transfer type metadata.
//!
//! Reads type declarations from a schema file or Rust sources, discovers the
//! root types of a namespace and writes one `.ts` file per root plus a
//! barrel file re-exporting them.

pub use dtogen_codegen::{
    parse_project, resolve_payload, ConvertedType, DiscoveryFilter, Error, GenerationReport,
    MetadataSource, OutputFile, TypeConverter, TypeDiscoverer, TypeScriptGenerator,
};
pub use dtogen_core::schema::{
    EndpointDef, EnumMember, Primitive, PropertyDef, Schema, TypeDef, TypeKind, TypeRef,
    Visibility, Wrapper,
};
pub use dtogen_core::{DtogenConfig, DtogenError};
