mod field;
mod model;
mod registry;
mod types;

pub use field::{PropertyDef, Visibility};
pub use model::{EndpointDef, EnumMember, TypeDef, TypeKind};
pub use registry::Schema;
pub use types::{simple_name, Primitive, TypeRef, Wrapper};
