//! Config structure
//!
//! Read from a YAML file; any missing section or field takes its default.

/*--- Use ----------------------------------------------------------------------------------------*/

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{error::Result, text_suggest::DEFAULT_LIMIT};

/*--- Const --------------------------------------------------------------------------------------*/

pub mod default {
    pub const STORAGE_DIR: &str = ".recipe-finder";
    pub const FAVORITES_KEY: &str = "aurora_favorites";
    pub const LIST_KEY: &str = "aurora_list";
    pub const REMOTE_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";
    pub const REMOTE_TIMEOUT_SECS: u64 = 10;
}

/*--- Types --------------------------------------------------------------------------------------*/

structstruck::strike! {
    /// Configuration structure
    #[strikethrough[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]]
    #[strikethrough[serde(default)]]
    pub struct Config {
        /// Where favorites and the shopping list live
        pub storage: pub struct StorageConfig {
            /// Directory holding one file per key
            pub dir: PathBuf,

            pub favorites_key: String,

            pub list_key: String,
        },

        /// Remote recipe search
        pub remote: pub struct RemoteConfig {
            /// Off by default, the bundled catalog is used
            pub enabled: bool,

            /// TheMealDB compatible API root
            pub base_url: String,

            pub timeout_secs: u64,
        },

        pub suggestions: pub struct SuggestionConfig {
            /// Maximum entries in the autocomplete list
            pub limit: usize,
        },
    }
}

/*--- Impl ---------------------------------------------------------------------------------------*/

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            remote: RemoteConfig::default(),
            suggestions: SuggestionConfig::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(default::STORAGE_DIR),
            favorites_key: default::FAVORITES_KEY.to_string(),
            list_key: default::LIST_KEY.to_string(),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: default::REMOTE_BASE_URL.to_string(),
            timeout_secs: default::REMOTE_TIMEOUT_SECS,
        }
    }
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self { limit: DEFAULT_LIMIT }
    }
}

impl RemoteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load from a YAML file, defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(s) => {
                debug!(?path, "read config");
                Self::from_yaml(&s)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(?path, "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn from_yaml(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }
}

/*--- Tests --------------------------------------------------------------------------------------*/


/*--------------------------------------------- EOF ----------------------------------------------*/
