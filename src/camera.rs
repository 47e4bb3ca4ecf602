use bevy::{prelude::*, window::PrimaryWindow};
use bevy_pancam::{PanCam, PanCamPlugin, PanCamSystemSet};

use crate::{
    prelude::{BG_COLOR, MAX_ZOOM, MIN_ZOOM},
    state::GameState,
    viewport::Viewport,
};

pub struct CamPlugin;

impl Plugin for CamPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(PanCamPlugin)
            .insert_resource(ClearColor(BG_COLOR))
            .init_resource::<Viewport>()
            .add_systems(OnEnter(GameState::Load), spawn_cam)
            .add_systems(OnEnter(GameState::Paused), set_pancam_enabled::<false>)
            .add_systems(OnEnter(GameState::Running), set_pancam_enabled::<true>);
        add_viewport_sync(app);
    }
}

/// Systems reading [`Viewport`] run after this set.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewportSet;

// Init
fn spawn_cam(mut commands: Commands, viewport: Res<Viewport>) {
    commands.spawn((
        Camera2d,
        PanCam {
            grab_buttons: vec![MouseButton::Left],
            // projection scale is the inverse of the zoom
            min_scale: 1.0 / MAX_ZOOM,
            max_scale: 1.0 / MIN_ZOOM,
            enabled: false,
            ..default()
        },
        OrthographicProjection {
            scaling_mode: bevy::render::camera::ScalingMode::WindowSize,
            scale: 1.0 / viewport.zoom(),
            near: -1000.0,
            far: 1000.0,
            ..OrthographicProjection::default_2d()
        },
        Transform::from_translation(viewport.camera_translation().extend(0.0)),
        Msaa::Off,
    ));
}

fn set_pancam_enabled<const ENABLED: bool>(mut query: Query<&mut PanCam>) {
    for mut pancam in query.iter_mut() {
        pancam.enabled = ENABLED;
    }
}

/// The viewport is read back once PanCam has moved the camera for this frame.
fn add_viewport_sync(app: &mut App) {
    app.configure_sets(Update, ViewportSet.after(PanCamSystemSet))
        .add_systems(Update, sync_viewport.in_set(ViewportSet));
}

/// Rebuilds the viewport from wherever the pan/zoom controls left the camera.
fn sync_viewport(
    mut viewport: ResMut<Viewport>,
    cameras: Query<(&Transform, &OrthographicProjection), With<Camera2d>>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let (Ok((transform, projection)), Ok(window)) = (cameras.get_single(), windows.get_single())
    else {
        return;
    };

    let next = Viewport::from_camera(
        transform.translation.truncate(),
        projection.scale,
        window.size(),
    );
    // don't trigger change detection every frame
    viewport.set_if_neq(next);
}
