use crate::resource::ResourceId;
use std::{path::PathBuf, string::FromUtf8Error, sync::Arc};

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("No embedded query for {0}")]
    NotFound(ResourceId),

    #[error("Recursive embedded query include: {id}")]
    CyclicInclude { id: ResourceId },

    #[error("Include path {path} escapes the root of {parent}")]
    InvalidIncludePath { path: String, parent: ResourceId },

    #[error("Query {id} is not valid UTF-8: {source}")]
    InvalidEncoding {
        id: ResourceId,
        #[source]
        source: FromUtf8Error,
    },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: Arc<std::io::Error>,
    },

    #[error("Both {} and {} map to {id}", first.display(), second.display())]
    DuplicateResource {
        id: ResourceId,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T = ()> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source: Arc::new(source),
        }
    }
}

impl From<regex::Error> for Error {
    fn from(value: regex::Error) -> Self {
        Error::Config(value.to_string())
    }
}
