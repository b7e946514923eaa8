// src/table/mod.rs

pub mod definitions;
pub mod events;
pub mod plugin;
pub mod resources;
pub mod session;

pub(crate) mod systems;

pub use definitions::{ColumnDataType, ColumnSpec, TableData};
pub use plugin::TablePlugin;
