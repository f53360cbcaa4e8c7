use serde::Deserialize;
use std::path::PathBuf;
use strum_macros::{Display, EnumString};

use lastseen_utils::config_util;

const ENV_PREFIX: &str = "CORE_";

const DEFAULT_DATA_FILE: &str = "user_data.json";
const DEFAULT_MONGO_DATABASE: &str = "lastseen";
const DEFAULT_MONGO_COLLECTION: &str = "users";

/// Read lastseen-core config from CORE_ prefixed env vars.
pub fn load_config() -> Result<Config, anyhow::Error> {
    config_util::get_config::<Config>(ENV_PREFIX)
}

/// Which storage keeps the records. Chosen once at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StorageBackend {
    /// single JSON document on disk
    #[default]
    File,

    /// MongoDB collection, one document per user
    Mongo,
}

/// Configurations for lastseen-core
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(alias = "CORE_STORAGE_BACKEND", default)]
    pub storage_backend: StorageBackend,

    /// path to the JSON data file of the file backend.
    #[serde(alias = "CORE_DATA_FILE", default = "default_data_file")]
    pub data_file: PathBuf,

    /// connection string, required by the mongo backend.
    #[serde(alias = "CORE_MONGO_URI", default)]
    pub mongo_uri: Option<String>,

    #[serde(alias = "CORE_MONGO_DATABASE", default = "default_mongo_database")]
    pub mongo_database: String,

    #[serde(alias = "CORE_MONGO_COLLECTION", default = "default_mongo_collection")]
    pub mongo_collection: String,
}

impl Config {
    /// connection string of the mongo backend, error when unset or blank.
    pub fn mongo_uri(&self) -> Result<&str, anyhow::Error> {
        self.mongo_uri
            .as_deref()
            .map(str::trim)
            .filter(|uri| !uri.is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!("CORE_MONGO_URI must be set when storage backend is mongo")
            })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_backend: StorageBackend::default(),
            data_file: default_data_file(),
            mongo_uri: None,
            mongo_database: default_mongo_database(),
            mongo_collection: default_mongo_collection(),
        }
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_mongo_database() -> String {
    DEFAULT_MONGO_DATABASE.to_string()
}

fn default_mongo_collection() -> String {
    DEFAULT_MONGO_COLLECTION.to_string()
}
