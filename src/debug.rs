use bevy::{
    diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin},
    prelude::*,
    window::PrimaryWindow,
};

use crate::{
    chunk::chunk_coord_of,
    prelude::*,
    settings::Settings,
    state::GameState,
    viewport::Viewport,
    visibility::{VisibilitySet, VisibleChunks},
};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Load), spawn_overlays)
            .add_systems(
                Update,
                (update_debug_text, update_chunk_tint, update_fps_text).after(VisibilitySet),
            );
    }
}

// Init
fn spawn_overlays(mut commands: Commands) {
    commands.spawn((
        ChunkTint,
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        BackgroundColor(CHUNK_TINT_COLOR),
        Visibility::Hidden,
    ));

    commands.spawn((
        DebugText,
        Text::default(),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::BLACK),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        Visibility::Hidden,
    ));

    // always on, independent of the debug toggles
    commands.spawn((
        FpsText,
        Text::new(fps_label(None)),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::BLACK),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(10.0),
            right: Val::Px(10.0),
            ..default()
        },
        GlobalZIndex(1),
    ));
}

fn update_debug_text(
    mut query: Query<(&mut Text, &mut Visibility), With<DebugText>>,
    settings: Res<Settings>,
    viewport: Res<Viewport>,
    visible: Res<VisibleChunks>,
    state: Res<State<GameState>>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Ok((mut text, mut visibility)) = query.get_single_mut() else {
        return;
    };

    if !settings.debug_text {
        visibility.set_if_neq(Visibility::Hidden);
        return;
    }
    visibility.set_if_neq(Visibility::Inherited);

    let cursor_chunk = windows
        .get_single()
        .ok()
        .and_then(Window::cursor_position)
        .map(|cursor| chunk_coord_of(viewport.screen_to_world(cursor)));

    **text = format!(
        "Camera Target X: {:.2}\n\
         Camera Target Y: {:.2}\n\
         Camera Zoom: {:.2}\n\
         Chunk Under Cursor: {}\n\
         Paused: {}\n\
         Debug Chunk Renderer: {}\n\
         Is Chunk On Screen: {} ({} visible)",
        viewport.pan_target.x,
        viewport.pan_target.y,
        viewport.zoom(),
        cursor_chunk.map_or_else(|| "-".to_string(), |coord| coord.to_string()),
        matches!(state.get(), GameState::Paused),
        if settings.debug_chunk_renderer { "on" } else { "off" },
        visible.any(),
        visible.len(),
    );
}

/// Tints the whole screen while any monitored chunk is on screen.
fn update_chunk_tint(
    mut query: Query<&mut Visibility, With<ChunkTint>>,
    visible: Res<VisibleChunks>,
) {
    for mut visibility in query.iter_mut() {
        visibility.set_if_neq(if visible.any() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        });
    }
}

fn update_fps_text(
    mut query: Query<&mut Text, With<FpsText>>,
    diagnostics: Res<DiagnosticsStore>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed());
    for mut text in query.iter_mut() {
        **text = fps_label(fps);
    }
}

/// `FPS: 60`, or `FPS: -` until the first measurement comes in.
fn fps_label(fps: Option<f64>) -> String {
    match fps {
        Some(fps) => format!("FPS: {fps:.0}"),
        None => "FPS: -".to_string(),
    }
}

// ——> COMPONENTS

#[derive(Component)]
struct ChunkTint;

#[derive(Component)]
struct DebugText;

#[derive(Component)]
struct FpsText;
