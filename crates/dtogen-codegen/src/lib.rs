pub mod discovery;
mod error;
pub mod parser;
pub mod source;
pub mod typescript;

pub use discovery::{resolve_payload, DiscoveryFilter, TypeDiscoverer, MAX_UNWRAP_DEPTH};
pub use error::{Error, Result};
pub use parser::parse_project;
pub use source::MetadataSource;
pub use typescript::{
    ConvertedType, GenerationReport, OutputFile, TypeConverter, TypeScriptGenerator,
};
