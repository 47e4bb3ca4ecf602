pub mod camera;
pub mod chunk;
pub mod debug;
pub mod grid;
pub mod life;
pub mod menu;
pub mod settings;
pub mod state;
pub mod viewport;
pub mod visibility;
pub mod world;

pub mod prelude {
    use bevy::{
        color::Color,
        math::{IVec2, Vec2},
    };

    pub const UPDATE_INTERVAL_MS: u64 = 16;
    pub const BG_COLOR: Color = Color::srgb(0.96, 0.96, 0.96);
    pub const SCREEN_SIZE: Vec2 = Vec2::new(800.0, 450.0);

    /// camera zoom range, the projection scale is its inverse
    pub const MIN_ZOOM: f32 = 0.1;
    pub const MAX_ZOOM: f32 = 5.0;

    /// side of a grid cell, in world units
    pub const BASE_GRID_SIZE: f32 = 50.0;
    /// side of a chunk, in world units (8 cells)
    pub const LOCAL_GRID_SIZE: f32 = 400.0;
    /// chunks created at startup
    pub const SEED_CHUNKS: &[IVec2] = &[IVec2::ZERO];

    pub const GRID_COLOR: Color = Color::srgb(0.78, 0.78, 0.78);
    pub const GRID_DOT_RADIUS: f32 = 3.0;
    pub const MARKER_CORNER_COLOR: Color = Color::srgb(0.9, 0.16, 0.22);
    pub const MARKER_START_COLOR: Color = Color::srgb(0.0, 0.47, 0.95);
    pub const CHUNK_GRID_COLOR: Color = Color::srgb(0.0, 0.47, 0.95);
    pub const CHUNK_CORNER_COLOR: Color = Color::srgb(0.9, 0.16, 0.22);
    pub const CELL_ALIVE_COLOR: Color = Color::srgb(0.0, 0.89, 0.19);
    pub const CHUNK_TINT_COLOR: Color = Color::srgba(0.75, 0.13, 0.22, 0.5);

    pub const PAUSE_DIM_COLOR: Color = Color::srgba(0.0, 0.0, 0.0, 0.6);
    pub const MENU_BUTTON_COLOR: Color = Color::srgba(0.78, 0.78, 0.78, 0.8);
    pub const MENU_BUTTON_SIZE: Vec2 = Vec2::new(200.0, 40.0);
    pub const MENU_BUTTON_SPACING: f32 = 10.0;
}
