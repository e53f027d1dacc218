use std::{fmt, io, path::PathBuf};

use crate::config::ConfigError;

#[derive(Debug)]
pub enum DatasetError {
    /// `data_<i>` was already present when the run tried to create it.
    FolderExists { path: PathBuf, source: io::Error },
    Io(io::Error),
    Csv { path: PathBuf, source: csv::Error },
    MalformedRow {
        path: PathBuf,
        line: u64,
        reason: String,
    },
    Config(ConfigError),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::FolderExists { path, .. } => {
                write!(f, "folder {} already exists", path.display())
            }
            DatasetError::Io(e) => write!(f, "io error: {e}"),
            DatasetError::Csv { path, source } => {
                write!(f, "csv error in {}: {source}", path.display())
            }
            DatasetError::MalformedRow { path, line, reason } => {
                write!(f, "{}:{line}: {reason}", path.display())
            }
            DatasetError::Config(e) => write!(f, "invalid configuration: {e}"),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::FolderExists { source, .. } => Some(source),
            DatasetError::Io(e) => Some(e),
            DatasetError::Csv { source, .. } => Some(source),
            DatasetError::MalformedRow { .. } => None,
            DatasetError::Config(e) => Some(e),
        }
    }
}

impl From<io::Error> for DatasetError {
    fn from(error: io::Error) -> Self {
        DatasetError::Io(error)
    }
}

impl From<ConfigError> for DatasetError {
    fn from(error: ConfigError) -> Self {
        DatasetError::Config(error)
    }
}
