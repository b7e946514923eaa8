// src/table/systems/startup.rs
use bevy::prelude::*;

use crate::storage::{StorageAccessor, StorageConfig};
use crate::table::resources::{RemoteAddress, StartupStatus};

/// Builds the storage accessor once from credential-store configuration and
/// inserts it, plus the primary address, as explicit resources. A missing or
/// broken configuration records the error instead; the UI then halts before
/// any table operation.
pub fn initialize_storage(mut commands: Commands, mut status: ResMut<StartupStatus>) {
    let config = match StorageConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Storage configuration is incomplete: {}", e);
            status.config_error = Some(e.to_string());
            return;
        }
    };

    match StorageAccessor::from_config(&config) {
        Ok(accessor) => {
            info!(
                "Storage accessor ready for s3://{}/{}",
                config.bucket, config.key
            );
            commands.insert_resource(accessor);
            commands.insert_resource(RemoteAddress {
                bucket: config.bucket,
                key: config.key,
            });
        }
        Err(e) => {
            error!("Failed to build storage accessor: {}", e);
            status.config_error = Some(e.to_string());
        }
    }
}
