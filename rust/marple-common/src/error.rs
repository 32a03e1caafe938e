use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

pub type StdErrorBoxed = Box<dyn std::error::Error + Send + Sync + 'static>;

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_format(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidFormat {
                element: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    /// The field exists in the segment, but carries no doc-values store.
    ///
    /// The rendered message starts with `No doc values for`, which is what
    /// doc-value consumers match on to degrade to an empty result.
    pub fn no_doc_values(field: impl Into<String>) -> Error {
        Error(
            ErrorKind::NoDocValues {
                field: field.into(),
            }
            .into(),
        )
    }

    pub fn unknown_segment(segment: impl Into<String>) -> Error {
        Error(
            ErrorKind::UnknownSegment {
                segment: segment.into(),
            }
            .into(),
        )
    }

    /// A failure reported by a doc-values backend as plain text.
    pub fn backend(message: impl Into<String>) -> Error {
        Error(
            ErrorKind::Backend {
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Error {
        Error(
            ErrorKind::Io {
                context: context.into(),
                source,
            }
            .into(),
        )
    }

    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Error {
        Error(
            ErrorKind::Json {
                context: context.into(),
                source,
            }
            .into(),
        )
    }

    pub fn other<E>(context: impl Into<String>, source: E) -> Error
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error(
            ErrorKind::Other {
                context: context.into(),
                source: Box::new(source),
            }
            .into(),
        )
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("invalid format for '{element}': {message}")]
    InvalidFormat { element: String, message: String },

    #[error("No doc values for field '{field}'")]
    NoDocValues { field: String },

    #[error("unknown segment '{segment}'")]
    UnknownSegment { segment: String },

    #[error("{message}")]
    Backend { message: String },

    #[error("IO error for '{context}': {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },

    #[error("JSON error for '{context}': {source}")]
    Json {
        context: String,
        source: serde_json::Error,
    },

    #[error("{context}: {source}")]
    Other {
        context: String,
        source: StdErrorBoxed,
    },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::io("", e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::json("", e)
    }
}
