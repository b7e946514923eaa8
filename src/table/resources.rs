// src/table/resources.rs
use bevy::prelude::Resource;

use super::session::EditSession;

/// The single table being edited, if any. Replaced wholesale by every
/// successful load; absent until one succeeds, which keeps every downstream
/// control (grid, save panel, summary) from rendering.
#[derive(Resource, Default)]
pub struct ActiveTable {
    pub session: Option<EditSession>,
    pub source: Option<LoadSource>,
}

#[derive(Debug, Clone)]
pub enum LoadSource {
    Remote { bucket: String, key: String },
    Upload { filename: String },
}

/// The configured primary address. Present only when the credential store
/// held a complete configuration at startup.
#[derive(Resource, Debug, Clone)]
pub struct RemoteAddress {
    pub bucket: String,
    pub key: String,
}

impl RemoteAddress {
    pub fn uri(&self) -> String {
        format!("s3://{}/{}", self.bucket, self.key)
    }

    pub fn uri_for(&self, key: &str) -> String {
        format!("s3://{}/{}", self.bucket, key)
    }
}

/// Set when startup configuration failed; the UI renders the error and
/// nothing else.
#[derive(Resource, Default, Debug)]
pub struct StartupStatus {
    pub config_error: Option<String>,
}
