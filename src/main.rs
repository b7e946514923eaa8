// src/main.rs

#![cfg_attr(all(not(debug_assertions), target_os = "windows"), windows_subsystem = "windows")]

use bevy::{
    log::LogPlugin,
    prelude::*,
    window::{PrimaryWindow, WindowPlugin},
    winit::{UpdateMode, WinitSettings},
};
use std::time::Duration;

// For loading the icon image from disk using the image crate
use image::ImageFormat as CrateImageFormat;
// For the winit window icon type
use winit::window::Icon as WinitIcon;

use bevy_egui::EguiPlugin;

mod codec;
mod storage;
mod table;
mod ui;

use table::TablePlugin;
use ui::EditorUiPlugin;

fn main() {
    App::new()
        .insert_resource(WinitSettings {
            focused_mode: UpdateMode::Continuous,
            unfocused_mode: UpdateMode::reactive_low_power(Duration::from_secs_f32(1.0 / 5.0)),
        })
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Parquet Client Data Editor".into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    level: bevy::log::Level::INFO,
                    filter: "wgpu=error,naga=warn".to_string(),
                    ..default()
                }),
        )
        .add_plugins(EguiPlugin {
            enable_multipass_for_primary_context: true,
        })
        .add_plugins(TablePlugin)
        .add_plugins(EditorUiPlugin)
        .add_systems(Startup, set_window_icon)
        .run();
}

fn set_window_icon(
    primary_window_query: Query<Entity, With<PrimaryWindow>>,
    windows: NonSend<bevy::winit::WinitWindows>,
) {
    let Ok(primary_entity) = primary_window_query.get_single() else {
        warn!("Could not find single primary window to set icon.");
        return;
    };

    let Some(primary_winit_window) = windows.get_window(primary_entity) else {
        warn!("Could not get winit window for primary window entity.");
        return;
    };

    let icon_path = "assets/icon.png";
    let icon_bytes = match std::fs::read(icon_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to read icon file '{}': {}", icon_path, e);
            return;
        }
    };

    match image::load_from_memory_with_format(&icon_bytes, CrateImageFormat::Png) {
        Ok(image_data) => {
            let image_buffer = image_data.into_rgba8();
            let (width, height) = image_buffer.dimensions();
            let rgba_data = image_buffer.into_raw();
            match WinitIcon::from_rgba(rgba_data, width, height) {
                Ok(winit_icon) => {
                    primary_winit_window.set_window_icon(Some(winit_icon));
                }
                Err(e) => {
                    warn!("Failed to create winit::window::Icon: {:?}", e);
                }
            }
        }
        Err(e) => {
            warn!("Failed to load icon image data from '{}': {}", icon_path, e);
        }
    }
}
