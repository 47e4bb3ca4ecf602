use bevy::{
    diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin},
    prelude::*,
    window::WindowResolution,
};
use ray_of_life::{
    camera::CamPlugin, debug::DebugPlugin, grid::GridPlugin, life::LifePlugin, menu::MenuPlugin,
    prelude::SCREEN_SIZE, settings::SettingsPlugin, state::GameState,
    visibility::VisibilityPlugin,
};

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(ImagePlugin::default_nearest())
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Ray-of-Life".into(),
                        resizable: true,
                        focused: true,
                        present_mode: bevy::window::PresentMode::AutoNoVsync,
                        mode: bevy::window::WindowMode::Windowed,
                        resolution: WindowResolution::new(SCREEN_SIZE.x, SCREEN_SIZE.y),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins((FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin::default()))
        .init_state::<GameState>()
        .add_plugins((
            CamPlugin,
            SettingsPlugin,
            MenuPlugin,
            GridPlugin,
            VisibilityPlugin,
            LifePlugin,
            DebugPlugin,
        ))
        .run();
}
