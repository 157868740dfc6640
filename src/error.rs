//! All error types for the xliffgen crate.
//!
//! These are returned from all fallible operations (payload loading, XLIFF
//! parsing, encoding and writing output files).

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("could not find `{}` in raw translations directory", path.display())]
    MissingInputFile { path: PathBuf },

    #[error("malformed XLIFF document `{}`: {reason}", path.display())]
    MalformedDocument { path: PathBuf, reason: String },

    #[error("could not find glossary file `{}`", path.display())]
    MissingGlossaryFile { path: PathBuf },

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid data: {0}")]
    DataMismatch(String),

    #[error("invalid locale `{0}`")]
    InvalidLocale(String),

    #[error("unknown target `{0}`")]
    UnknownTarget(String),
}

impl Error {
    /// Creates a [`Error::MalformedDocument`] for the given file.
    pub fn malformed(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Error::MalformedDocument {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Creates a [`Error::MissingInputFile`] for the given file.
    pub fn missing_input(path: impl AsRef<Path>) -> Self {
        Error::MissingInputFile {
            path: path.as_ref().to_path_buf(),
        }
    }
}
