/// Code generation error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(
        "Unsupported generic shape `{type_name}`: only async results and enumerables can be unwrapped"
    )]
    UnsupportedGenericShape { type_name: String },

    #[error("Unwrapping `{type_name}` exceeded {depth} wrapper levels")]
    UnwrapDepthExceeded { type_name: String, depth: usize },

    #[error("Types `{first}` and `{second}` would both be written to `{file_name}`")]
    DuplicateFileName {
        file_name: String,
        first: String,
        second: String,
    },

    #[error("Unknown type `{0}`: not declared in the schema")]
    UnknownType(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Schema(#[from] dtogen_core::DtogenError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using the codegen Error.
pub type Result<T> = std::result::Result<T, Error>;
