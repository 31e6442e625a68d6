use std::fmt;
use std::io;
use std::path::PathBuf;

/// Which of the two addressing components was missing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameKind {
    Collection,
    Record,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collection => f.write_str("collection"),
            Self::Record => f.write_str("record name"),
        }
    }
}

/// Errors from document store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A collection or record name was empty. No I/O was attempted.
    #[error("missing {0}: name must not be empty")]
    MissingName(NameKind),

    /// Neither the bare path nor its `.json` form exists.
    #[error("unable to find file or directory named {path}")]
    NotFound { path: String },

    /// Filesystem failure, tagged with the operation and path involved.
    #[error("{context} {}: {source}", .path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The value could not be encoded as JSON.
    #[error("serialization error: {0}")]
    Encode(#[source] serde_json::Error),

    /// The stored bytes could not be decoded into the requested type.
    #[error("cannot decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Returns `true` for [`StoreError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` for [`StoreError::MissingName`].
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingName(_))
    }

    pub(crate) fn io(context: &'static str, path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io {
            context,
            path,
            source,
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
