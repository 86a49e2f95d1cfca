use std::{io, path::PathBuf};

use thiserror::Error;

use crate::table::TableId;

pub type Result<T, E = NamesError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum NamesError {
    #[error("Invalid locale tag `{0}`")]
    InvalidLocaleTag(String),
    #[error("Unknown table kind `{0}`, expected one of `currency`, `locale` or `timezone`")]
    UnknownTableKind(String),
    #[error("Invalid name table `{id}`: {reason}")]
    InvalidTable { id: TableId, reason: String },
    #[error("Invalid format of `cldr-names.toml`: {0}")]
    InvalidConfig(#[from] toml::de::Error),
    #[error("Failed to read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("The name registry is already installed")]
    AlreadyInstalled,
    #[error("Failed to export name table: {0}")]
    Export(#[from] serde_json::Error),
    #[error("`{}` is not valid UTF-8", path.display())]
    NotUtf8 { path: PathBuf },
}

impl NamesError {
    pub(crate) fn invalid_table(id: &TableId, reason: impl ToString) -> Self {
        NamesError::InvalidTable {
            id: id.clone(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        NamesError::Io {
            path: path.into(),
            source,
        }
    }
}
