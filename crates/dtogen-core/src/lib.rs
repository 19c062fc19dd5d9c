pub mod config;
pub mod error;
pub mod schema;

pub use config::DtogenConfig;
pub use error::{DtogenError, Result};
pub use schema::{
    EndpointDef, EnumMember, Primitive, PropertyDef, Schema, TypeDef, TypeKind, TypeRef,
    Visibility, Wrapper,
};
