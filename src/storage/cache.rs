// src/storage/cache.rs
use std::collections::HashMap;

use bevy::prelude::Resource;

use crate::table::definitions::TableData;

/// Explicit memo of successful remote reads, keyed by (bucket, key).
///
/// An entry lives until `invalidate` removes it; the save dispatcher
/// invalidates the primary address after every successful remote save so a
/// later load does not serve the pre-save table.
#[derive(Resource, Default, Debug)]
pub struct TableReadCache {
    entries: HashMap<(String, String), TableData>,
}

impl TableReadCache {
    pub fn get(&self, bucket: &str, key: &str) -> Option<TableData> {
        self.entries
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    pub fn insert(&mut self, bucket: &str, key: &str, table: TableData) {
        self.entries
            .insert((bucket.to_string(), key.to_string()), table);
    }

    pub fn invalidate(&mut self, bucket: &str, key: &str) {
        self.entries.remove(&(bucket.to_string(), key.to_string()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
