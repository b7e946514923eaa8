// src/table/systems/load.rs
use std::path::Path;

use bevy::prelude::*;
use bytes::Bytes;
use thiserror::Error;

use crate::codec::{self, CodecError};
use crate::storage::{StorageAccessor, StorageError, TableReadCache};
use crate::table::definitions::TableData;
use crate::table::events::{
    RequestProcessUpload, RequestRemoteLoad, RequestUploadDialog, TableOperationFeedback,
};
use crate::table::resources::{ActiveTable, LoadSource, RemoteAddress};
use crate::table::session::EditSession;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Fetch-and-decode with memoization: a cached entry for (bucket, key) skips
/// the network round-trip entirely.
pub fn load_remote(
    accessor: &StorageAccessor,
    cache: &mut TableReadCache,
    key: &str,
) -> Result<TableData, LoadError> {
    if let Some(table) = cache.get(accessor.bucket(), key) {
        return Ok(table);
    }
    let bytes = accessor.read(key)?;
    let table = codec::decode(bytes)?;
    cache.insert(accessor.bucket(), key, table.clone());
    Ok(table)
}

/// Decode of a user-chosen local Parquet file.
pub fn load_local(path: &Path) -> Result<TableData, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(codec::decode(Bytes::from(bytes))?)
}

pub fn handle_remote_load_request(
    mut events: EventReader<RequestRemoteLoad>,
    accessor: Option<Res<StorageAccessor>>,
    address: Option<Res<RemoteAddress>>,
    mut cache: ResMut<TableReadCache>,
    mut active: ResMut<ActiveTable>,
    mut feedback: EventWriter<TableOperationFeedback>,
) {
    if events.is_empty() {
        return;
    }
    events.clear();

    let (Some(accessor), Some(address)) = (accessor, address) else {
        feedback.write(TableOperationFeedback {
            message: "Storage is not configured; cannot load from S3.".to_string(),
            is_error: true,
        });
        return;
    };

    match load_remote(&accessor, &mut cache, &address.key) {
        Ok(table) => {
            info!("Loaded {} row(s) from {}", table.row_count(), address.uri());
            active.session = Some(EditSession::new(table));
            active.source = Some(LoadSource::Remote {
                bucket: address.bucket.clone(),
                key: address.key.clone(),
            });
            feedback.write(TableOperationFeedback {
                message: format!("Loaded from S3: {}", address.uri()),
                is_error: false,
            });
        }
        Err(e) => {
            error!("Remote load failed: {}", e);
            // No partial table ever reaches the edit session.
            active.session = None;
            active.source = None;
            feedback.write(TableOperationFeedback {
                message: format!("Error loading data: {}", e),
                is_error: true,
            });
        }
    }
}

pub fn handle_upload_dialog_request(
    mut events: EventReader<RequestUploadDialog>,
    mut feedback: EventWriter<TableOperationFeedback>,
    mut process_writer: EventWriter<RequestProcessUpload>,
) {
    if events.is_empty() {
        return;
    }
    events.clear();

    // Blocking file dialog; the whole app waits, matching the
    // request-per-interaction model.
    let picked = rfd::FileDialog::new()
        .add_filter("Parquet files", &["parquet"])
        .pick_file();

    match picked {
        Some(path) => {
            info!("File picked for upload: '{}'", path.display());
            process_writer.write(RequestProcessUpload { path });
        }
        None => {
            feedback.write(TableOperationFeedback {
                message: "File selection cancelled.".to_string(),
                is_error: false,
            });
        }
    }
}

pub fn handle_process_upload(
    mut events: EventReader<RequestProcessUpload>,
    mut active: ResMut<ActiveTable>,
    mut feedback: EventWriter<TableOperationFeedback>,
) {
    for event in events.read() {
        let filename = event
            .path
            .file_name()
            .map(|os| os.to_string_lossy().into_owned())
            .unwrap_or_else(|| event.path.display().to_string());

        match load_local(&event.path) {
            Ok(table) => {
                info!("Loaded {} row(s) from upload '{}'", table.row_count(), filename);
                active.session = Some(EditSession::new(table));
                active.source = Some(LoadSource::Upload { filename });
                feedback.write(TableOperationFeedback {
                    message: "File uploaded and loaded".to_string(),
                    is_error: false,
                });
            }
            Err(e) => {
                error!("Upload load failed for '{}': {}", filename, e);
                active.session = None;
                active.source = None;
                feedback.write(TableOperationFeedback {
                    message: format!("Error loading data: {}", e),
                    is_error: true,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::definitions::{ColumnDataType, ColumnSpec};
    use object_store::memory::InMemory;
    use std::sync::Arc;

    fn memory_accessor() -> StorageAccessor {
        StorageAccessor::with_store(Arc::new(InMemory::new()), "test-bucket".to_string()).unwrap()
    }

    fn table_with_names(names: &[&str]) -> TableData {
        TableData {
            columns: vec![ColumnSpec {
                header: "name".to_string(),
                data_type: ColumnDataType::String,
            }],
            grid: names
                .iter()
                .map(|n| vec![Some(n.to_string())])
                .collect(),
        }
    }

    #[test]
    fn load_remote_reads_and_decodes() {
        let accessor = memory_accessor();
        let mut cache = TableReadCache::default();
        let table = table_with_names(&["a", "b", "c"]);
        accessor
            .write("table.parquet", crate::codec::encode(&table).unwrap())
            .unwrap();

        let loaded = load_remote(&accessor, &mut cache, "table.parquet").unwrap();
        assert_eq!(loaded, table);
        assert!(!cache.is_empty());
    }

    #[test]
    fn load_remote_serves_the_memoized_table_until_invalidated() {
        let accessor = memory_accessor();
        let mut cache = TableReadCache::default();
        let original = table_with_names(&["a"]);
        accessor
            .write("table.parquet", crate::codec::encode(&original).unwrap())
            .unwrap();
        load_remote(&accessor, &mut cache, "table.parquet").unwrap();

        // Overwrite the stored object behind the cache's back.
        let replaced = table_with_names(&["z"]);
        accessor
            .write("table.parquet", crate::codec::encode(&replaced).unwrap())
            .unwrap();

        let cached = load_remote(&accessor, &mut cache, "table.parquet").unwrap();
        assert_eq!(cached, original);

        cache.invalidate(accessor.bucket(), "table.parquet");
        let fresh = load_remote(&accessor, &mut cache, "table.parquet").unwrap();
        assert_eq!(fresh, replaced);
    }

    #[test]
    fn load_remote_missing_object_errors_without_caching() {
        let accessor = memory_accessor();
        let mut cache = TableReadCache::default();
        assert!(load_remote(&accessor, &mut cache, "absent.parquet").is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn load_local_round_trips_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.parquet");
        let table = table_with_names(&["a", "b"]);
        std::fs::write(&path, crate::codec::encode(&table).unwrap()).unwrap();
        assert_eq!(load_local(&path).unwrap(), table);
    }

    #[test]
    fn load_local_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_local(&dir.path().join("absent.parquet")),
            Err(LoadError::Io { .. })
        ));
    }
}
