//! Option file parse errors

use std::path::PathBuf;
use thiserror::Error;

/// Fatal failure while parsing one option file.
///
/// Any of these aborts the file: nothing from it reaches the option table.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to open file '{}'", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read line number {line} in file '{}'", path.display())]
    LineRead {
        path: PathBuf,
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("empty file '{}'", path.display())]
    EmptyFile { path: PathBuf },
}

impl ParseError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::FileOpen { path, .. } | Self::LineRead { path, .. } | Self::EmptyFile { path } => {
                path
            }
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;
