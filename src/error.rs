use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Format,
    Lookup,
    Conversion,
    Usage,
    Cycle,
    Adapter,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("read content error, {line} format should be key = value")]
    Format { line: String, line_number: usize },

    #[error("invalid utf-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("section {0} not exist")]
    SectionNotFound(String),

    #[error("key {0} not exist")]
    KeyNotFound(String),

    #[error("parsing {literal:?} as {target}: invalid syntax")]
    Conversion {
        literal: String,
        target: &'static str,
    },

    #[error("key can not be empty")]
    EmptyKey,

    #[error("include cycle detected at {}", .path.display())]
    IncludeCycle { path: PathBuf },

    #[error("unknown adapter {0}, register it first")]
    UnknownAdapter(String),

    #[error("invalid json document: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn format(line: impl Into<String>, line_number: usize) -> Self {
        Error::Format {
            line: line.into(),
            line_number,
        }
    }

    pub fn conversion(literal: impl Into<String>, target: &'static str) -> Self {
        Error::Conversion {
            literal: literal.into(),
            target,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) => ErrorKind::Io,
            Error::Format { .. } | Error::Utf8(_) => ErrorKind::Format,
            Error::SectionNotFound(_) | Error::KeyNotFound(_) => ErrorKind::Lookup,
            Error::Conversion { .. } => ErrorKind::Conversion,
            Error::EmptyKey => ErrorKind::Usage,
            Error::IncludeCycle { .. } => ErrorKind::Cycle,
            Error::UnknownAdapter(_) | Error::Json(_) => ErrorKind::Adapter,
        }
    }
}
