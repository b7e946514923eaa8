// src/table/systems/save.rs
use std::path::Path;

use bevy::prelude::*;
use chrono::{Local, NaiveDate};
use thiserror::Error;

use crate::codec::{self, CodecError};
use crate::storage::{StorageAccessor, StorageError, TableReadCache};
use crate::table::definitions::TableData;
use crate::table::events::{RequestSaveTable, SaveDestination, TableOperationFeedback};
use crate::table::resources::{ActiveTable, RemoteAddress};

pub const BACKUP_PREFIX: &str = "backups";

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("backup copy failed: {0}")]
    Backup(StorageError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("failed to write '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSaveReceipt {
    pub primary_key: String,
    pub backup_key: String,
}

/// Backup address for a primary key on a given day:
/// `backups/<stem>_<YYYYMMDD>.<ext>`. Recomputed on every save, never cached
/// across days.
pub fn backup_key_for(primary_key: &str, date: NaiveDate) -> String {
    let path = Path::new(primary_key);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| primary_key.to_string());
    let stamp = date.format("%Y%m%d");
    match path.extension() {
        Some(ext) => format!("{}/{}_{}.{}", BACKUP_PREFIX, stem, stamp, ext.to_string_lossy()),
        None => format!("{}/{}_{}", BACKUP_PREFIX, stem, stamp),
    }
}

/// Default filename offered for local saves, derived from the primary key.
pub fn default_local_save_path(primary_key: Option<&str>) -> String {
    let stem = primary_key
        .map(Path::new)
        .and_then(|p| p.file_stem())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "table".to_string());
    format!("{}_edited.parquet", stem)
}

/// Backup-then-overwrite against the remote backend.
///
/// The copy to the backup address happens before anything is encoded or
/// written; if it fails the save aborts with no partial effect. A successful
/// write invalidates the read-cache entry for the primary address so a later
/// load sees the saved table rather than the memoized pre-save one.
pub fn save_remote(
    accessor: &StorageAccessor,
    cache: &mut TableReadCache,
    key: &str,
    table: &TableData,
    today: NaiveDate,
) -> Result<RemoteSaveReceipt, SaveError> {
    let backup_key = backup_key_for(key, today);
    accessor.copy(key, &backup_key).map_err(SaveError::Backup)?;
    let bytes = codec::encode(table)?;
    accessor.write(key, bytes)?;
    cache.invalidate(accessor.bucket(), key);
    Ok(RemoteSaveReceipt {
        primary_key: key.to_string(),
        backup_key,
    })
}

/// Encode-and-write to a local path.
pub fn save_local(path: &Path, table: &TableData) -> Result<(), SaveError> {
    let bytes = codec::encode(table)?;
    std::fs::write(path, bytes).map_err(|source| SaveError::Io {
        path: path.display().to_string(),
        source,
    })
}

pub fn handle_save_request(
    mut events: EventReader<RequestSaveTable>,
    accessor: Option<Res<StorageAccessor>>,
    address: Option<Res<RemoteAddress>>,
    mut cache: ResMut<TableReadCache>,
    active: Res<ActiveTable>,
    mut feedback: EventWriter<TableOperationFeedback>,
) {
    for event in events.read() {
        let Some(session) = active.session.as_ref() else {
            feedback.write(TableOperationFeedback {
                message: "Nothing to save: no table loaded.".to_string(),
                is_error: true,
            });
            continue;
        };
        let table = session.working();

        match &event.destination {
            SaveDestination::Remote => {
                let (Some(accessor), Some(address)) = (accessor.as_deref(), address.as_deref())
                else {
                    feedback.write(TableOperationFeedback {
                        message: "Storage is not configured; cannot save to S3.".to_string(),
                        is_error: true,
                    });
                    continue;
                };
                let today = Local::now().date_naive();
                match save_remote(accessor, &mut cache, &address.key, table, today) {
                    Ok(receipt) => {
                        info!(
                            "Saved {} row(s) to {} (backup at {})",
                            table.row_count(),
                            address.uri(),
                            receipt.backup_key
                        );
                        feedback.write(TableOperationFeedback {
                            message: format!(
                                "Saved to S3: {}. Backup created at {}",
                                address.uri_for(&receipt.primary_key),
                                address.uri_for(&receipt.backup_key)
                            ),
                            is_error: false,
                        });
                    }
                    Err(e) => {
                        error!("Remote save failed: {}", e);
                        // The edited table stays in memory; the user retries
                        // without re-editing.
                        feedback.write(TableOperationFeedback {
                            message: format!("Error saving to S3: {}", e),
                            is_error: true,
                        });
                    }
                }
            }
            SaveDestination::Local { path } => match save_local(Path::new(path), table) {
                Ok(()) => {
                    info!("Saved {} row(s) locally to '{}'", table.row_count(), path);
                    feedback.write(TableOperationFeedback {
                        message: format!("Saved locally as {}", path),
                        is_error: false,
                    });
                }
                Err(e) => {
                    error!("Local save failed: {}", e);
                    feedback.write(TableOperationFeedback {
                        message: format!("Error saving locally: {}", e),
                        is_error: true,
                    });
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::definitions::{ColumnDataType, ColumnSpec};
    use bytes::Bytes;
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
            grid: names.iter().map(|n| vec![Some(n.to_string())]).collect(),
        }
    }

    fn august_7() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    #[test]
    fn backup_key_carries_stem_date_and_extension() {
        assert_eq!(
            backup_key_for("Controle_de_Processos.parquet", august_7()),
            "backups/Controle_de_Processos_20260807.parquet"
        );
    }

    #[test]
    fn backup_key_flattens_nested_keys() {
        assert_eq!(
            backup_key_for("data/2026/table.parquet", august_7()),
            "backups/table_20260807.parquet"
        );
    }

    #[test]
    fn backup_key_without_extension() {
        assert_eq!(backup_key_for("table", august_7()), "backups/table_20260807");
    }

    #[test]
    fn default_local_path_derives_from_the_key() {
        assert_eq!(
            default_local_save_path(Some("Controle_de_Processos.parquet")),
            "Controle_de_Processos_edited.parquet"
        );
        assert_eq!(default_local_save_path(None), "table_edited.parquet");
    }

    #[test]
    fn save_remote_backs_up_the_prior_version_then_overwrites() {
        let accessor = memory_accessor();
        let mut cache = TableReadCache::default();
        let original = table_with_names(&["a", "b", "c"]);
        accessor
            .write("table.parquet", crate::codec::encode(&original).unwrap())
            .unwrap();

        let mut edited = original.clone();
        edited.set_cell(0, 0, Some("edited".to_string()));
        let receipt =
            save_remote(&accessor, &mut cache, "table.parquet", &edited, august_7()).unwrap();
        assert_eq!(receipt.backup_key, "backups/table_20260807.parquet");

        // The backup holds the pre-save table; the primary holds the edit.
        let backup_bytes = accessor.read(&receipt.backup_key).unwrap();
        assert_eq!(crate::codec::decode(backup_bytes).unwrap(), original);
        let primary_bytes = accessor.read("table.parquet").unwrap();
        assert_eq!(crate::codec::decode(primary_bytes).unwrap(), edited);
    }

    #[test]
    fn save_remote_aborts_before_writing_when_the_backup_copy_fails() {
        let accessor = memory_accessor();
        let mut cache = TableReadCache::default();
        let table = table_with_names(&["a"]);

        // No primary object to copy: the backup step fails and nothing is
        // written at the primary address.
        let result = save_remote(&accessor, &mut cache, "table.parquet", &table, august_7());
        assert!(matches!(result, Err(SaveError::Backup(_))));
        assert!(accessor.read("table.parquet").is_err());
    }

    #[test]
    fn save_remote_invalidates_the_read_cache_entry() {
        let accessor = memory_accessor();
        let mut cache = TableReadCache::default();
        let original = table_with_names(&["a"]);
        accessor
            .write("table.parquet", crate::codec::encode(&original).unwrap())
            .unwrap();
        cache.insert(accessor.bucket(), "table.parquet", original.clone());

        let edited = table_with_names(&["z"]);
        save_remote(&accessor, &mut cache, "table.parquet", &edited, august_7()).unwrap();
        assert_eq!(cache.get(accessor.bucket(), "table.parquet"), None);
    }

    #[test]
    fn save_local_writes_a_decodable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.parquet");
        let table = table_with_names(&["a", "b"]);
        save_local(&path, &table).unwrap();
        let bytes = Bytes::from(std::fs::read(&path).unwrap());
        assert_eq!(crate::codec::decode(bytes).unwrap(), table);
    }

    #[test]
    fn save_local_reports_the_failing_path() {
        let table = table_with_names(&["a"]);
        let result = save_local(Path::new("/nonexistent-dir/out.parquet"), &table);
        assert!(matches!(result, Err(SaveError::Io { .. })));
    }
}
