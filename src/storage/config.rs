// src/storage/config.rs
use thiserror::Error;

pub const KEYRING_SERVICE_NAME: &str = "parqedit";

pub const ENTRY_ACCESS_KEY_ID: &str = "aws_access_key_id";
pub const ENTRY_SECRET_ACCESS_KEY: &str = "aws_secret_access_key";
pub const ENTRY_REGION: &str = "aws_region";
pub const ENTRY_BUCKET_NAME: &str = "bucket_name";
pub const ENTRY_TABLE_KEY: &str = "table_key";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("credential store has no entry for '{0}'")]
    MissingEntry(&'static str),
    #[error("credential store entry '{0}' is empty")]
    EmptyEntry(&'static str),
    #[error("credential store error for '{name}': {source}")]
    Keyring {
        name: &'static str,
        source: keyring::Error,
    },
}

/// Everything needed to address the primary table object. Loaded from the
/// operating system credential store; never read from the environment.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
    pub bucket: String,
    pub key: String,
}

impl StorageConfig {
    /// Reads all required entries from the credential store. Any missing or
    /// empty entry fails the whole load; the caller halts before any table
    /// operation.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(StorageConfig {
            access_key_id: read_entry(ENTRY_ACCESS_KEY_ID)?,
            secret_access_key: read_entry(ENTRY_SECRET_ACCESS_KEY)?,
            region: read_entry(ENTRY_REGION)?,
            bucket: read_entry(ENTRY_BUCKET_NAME)?,
            key: read_entry(ENTRY_TABLE_KEY)?,
        })
    }
}

fn read_entry(name: &'static str) -> Result<String, ConfigError> {
    let entry = keyring::Entry::new(KEYRING_SERVICE_NAME, name)
        .map_err(|source| ConfigError::Keyring { name, source })?;
    match entry.get_password() {
        Ok(value) if value.trim().is_empty() => Err(ConfigError::EmptyEntry(name)),
        Ok(value) => Ok(value),
        Err(keyring::Error::NoEntry) => Err(ConfigError::MissingEntry(name)),
        Err(source) => Err(ConfigError::Keyring { name, source }),
    }
}
