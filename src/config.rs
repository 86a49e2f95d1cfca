use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::{NamesError, Result};

/// Environment variable overriding [`Config::data_dir`].
pub const DATA_DIR_ENV: &str = "CLDR_NAMES_DATA_DIR";

/// The `cldr-names.toml` config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    // An on-disk `<kind>/<locale>.toml` tree, consulted before the embedded data.
    #[serde(default)]
    data_dir: Option<PathBuf>,
    // Whether the data compiled into the crate is served.
    #[serde(default = "Config::default_embedded")]
    pub embedded: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            embedded: Self::default_embedded(),
        }
    }
}

impl Config {
    pub const FILE_NAME: &'static str = "cldr-names.toml";

    fn default_embedded() -> bool {
        true
    }

    /// Load the config file at `path`.
    ///
    /// A relative `data_dir` is resolved against the config file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| NamesError::io(path, err))?;
        let mut config: Config = toml::from_str(&text)?;
        if let (Some(data_dir), Some(parent)) = (config.data_dir.as_ref(), path.parent()) {
            if data_dir.is_relative() {
                config.data_dir = Some(parent.join(data_dir));
            }
        }
        Ok(config)
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(data_dir.into());
        self
    }

    /// The data directory, [`DATA_DIR_ENV`] taking precedence over the file.
    pub fn data_dir(&self) -> Option<PathBuf> {
        env::var_os(DATA_DIR_ENV)
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .or_else(|| self.data_dir.clone())
    }
}
