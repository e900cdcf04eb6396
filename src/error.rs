use thiserror::Error;

/// Failures reported by the maps and views in this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// no boundary, layer, or entry resolves the key, or the key
    /// resolved to an explicitly undefined span
    #[error("key not found")]
    NotFound,

    #[error("{0} is empty")]
    EmptyCollection(&'static str),

    #[error("position {index} out of range for {len} entries")]
    OutOfRange { index: isize, len: usize },

    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: &'static str, message: String },

    #[error("key conflict in inverted mapping")]
    KeyConflict,

    #[error("no attribute {0}")]
    NoAttribute(String),
}

impl Error {
    pub fn invalid_arg(name: &'static str, message: impl Into<String>) -> Error {
        Error::InvalidArgument {
            name,
            message: message.into(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
