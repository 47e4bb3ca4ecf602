use bevy::{math::vec2, prelude::*};

use crate::{
    camera::ViewportSet,
    prelude::*,
    settings::Settings,
    viewport::{to_scene, Viewport},
};

pub struct GridPlugin;

impl Plugin for GridPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (draw_grid, draw_grid_markers).after(ViewportSet));
    }
}

// ——> SYSTEMS

fn draw_grid(mut gizmos: Gizmos, viewport: Res<Viewport>, settings: Res<Settings>) {
    let mode = if settings.draw_lines {
        GridMode::Lines
    } else {
        GridMode::Dots
    };

    for primitive in grid_primitives(viewport.visible_world_rect(), BASE_GRID_SIZE, mode) {
        match primitive {
            GridPrimitive::Segment(from, to) => {
                gizmos.line_2d(to_scene(from), to_scene(to), GRID_COLOR);
            }
            GridPrimitive::Marker(at) => {
                gizmos.circle_2d(to_scene(at), GRID_DOT_RADIUS, GRID_COLOR);
            }
        }
    }
}

fn draw_grid_markers(mut gizmos: Gizmos, viewport: Res<Viewport>, settings: Res<Settings>) {
    if !settings.debug_grid_markers {
        return;
    }

    let rect = viewport.visible_world_rect();
    let inset = Vec2::splat(BASE_GRID_SIZE);
    gizmos.circle_2d(to_scene(rect.min + inset), 20.0, MARKER_CORNER_COLOR);
    gizmos.circle_2d(to_scene(rect.max - inset), 20.0, MARKER_CORNER_COLOR);
    gizmos.circle_2d(
        to_scene(snap_start(rect.min, BASE_GRID_SIZE)),
        10.0,
        MARKER_START_COLOR,
    );
}

// ——> GRID GEOMETRY

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridMode {
    /// one segment per row and per column
    Lines,
    /// one marker per intersection
    Dots,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridPrimitive {
    Segment(Vec2, Vec2),
    Marker(Vec2),
}

/// First grid line strictly after `p`, per axis: `floor((p + s) / s) * s`.
#[inline]
pub fn snap_start(p: Vec2, cell_size: f32) -> Vec2 {
    assert!(cell_size > 0.0, "cell size must be strictly positive, got {cell_size}");
    ((p + cell_size) / cell_size).floor() * cell_size
}

/// Grid line positions along one axis, from `start` up to `end + 1` inclusive.
pub fn grid_lines(start: f32, end: f32, cell_size: f32) -> impl Iterator<Item = f32> + Clone {
    assert!(cell_size > 0.0, "cell size must be strictly positive, got {cell_size}");
    // stepping by index keeps float error from accumulating on long spans
    (0..)
        .map(move |i| start + i as f32 * cell_size)
        .take_while(move |&v| v <= end + 1.0)
}

/// Lazily produces the grid clipped to the world-space rectangle `rect` (`min` is top-left).
///
/// Lines mode yields `rows + cols` segments, dots mode yields `rows * cols` markers, which
/// gets expensive when zoomed out.
pub fn grid_primitives(
    rect: Rect,
    cell_size: f32,
    mode: GridMode,
) -> Box<dyn Iterator<Item = GridPrimitive>> {
    let start = snap_start(rect.min, cell_size);
    let (top_left, bottom_right) = (rect.min, rect.max);
    let xs = grid_lines(start.x, bottom_right.x, cell_size);
    let ys = grid_lines(start.y, bottom_right.y, cell_size);

    match mode {
        GridMode::Lines => {
            let horizontal = ys.map(move |y| {
                GridPrimitive::Segment(vec2(top_left.x + 1.0, y), vec2(bottom_right.x + 1.0, y))
            });
            let vertical = xs.map(move |x| {
                GridPrimitive::Segment(vec2(x, top_left.y + 1.0), vec2(x, bottom_right.y + 1.0))
            });
            Box::new(horizontal.chain(vertical))
        }
        GridMode::Dots => Box::new(
            ys.flat_map(move |y| xs.clone().map(move |x| GridPrimitive::Marker(vec2(x, y)))),
        ),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn screen_rect() -> Rect {
        Rect {
            min: Vec2::ZERO,
            max: vec2(800.0, 450.0),
        }
    }

    #[test]
    fn snapping_works() {
        assert_eq!(vec2(50.0, 50.0), snap_start(Vec2::ZERO, 50.0));
        assert_eq!(vec2(100.0, 50.0), snap_start(vec2(50.0, 49.9), 50.0));
        assert_eq!(vec2(50.0, 0.0), snap_start(vec2(12.5, -37.5), 50.0));
        assert_eq!(vec2(0.0, 400.0), snap_start(vec2(-60.0, 0.0), 400.0));
        assert_eq!(vec2(-400.0, 0.0), snap_start(vec2(-400.5, -1.0), 400.0));

        // stable under sub-cell panning
        for i in 0..50 {
            let p = vec2(100.0 + i as f32 * 0.9, -200.1 - i as f32 * 0.3);
            assert_eq!(vec2(150.0, -200.0), snap_start(p, 50.0));
        }
    }

    #[test]
    fn lines_are_inclusive() {
        let xs: Vec<_> = grid_lines(50.0, 800.0, 50.0).collect();
        assert_eq!(16, xs.len());
        assert_eq!(Some(&800.0), xs.last());

        // `end + 1` is still inside
        assert_eq!(2, grid_lines(0.0, 49.0, 50.0).count());
        assert_eq!(1, grid_lines(0.0, 48.9, 50.0).count());
        assert_eq!(0, grid_lines(100.0, 0.0, 50.0).count());
    }

    #[test]
    fn line_mode() {
        let prims: Vec<_> = grid_primitives(screen_rect(), 50.0, GridMode::Lines).collect();
        // 9 rows (50..=450) and 16 columns (50..=800)
        assert_eq!(9 + 16, prims.len());
        assert_eq!(
            GridPrimitive::Segment(vec2(1.0, 50.0), vec2(801.0, 50.0)),
            prims[0]
        );
        assert_eq!(
            GridPrimitive::Segment(vec2(800.0, 1.0), vec2(800.0, 451.0)),
            prims[prims.len() - 1]
        );
    }

    #[test]
    fn dot_mode() {
        let prims: Vec<_> = grid_primitives(screen_rect(), 50.0, GridMode::Dots).collect();
        assert_eq!(9 * 16, prims.len());
        assert_eq!(GridPrimitive::Marker(vec2(50.0, 50.0)), prims[0]);
        assert_eq!(GridPrimitive::Marker(vec2(800.0, 450.0)), prims[prims.len() - 1]);
        assert!(prims.iter().all(|p| match p {
            GridPrimitive::Marker(at) => at.x % 50.0 == 0.0 && at.y % 50.0 == 0.0,
            GridPrimitive::Segment(..) => false,
        }));
    }

    #[test]
    fn chunk_grid_dots() {
        let prims: Vec<_> = grid_primitives(screen_rect(), LOCAL_GRID_SIZE, GridMode::Dots).collect();
        assert_eq!(
            vec![
                GridPrimitive::Marker(vec2(400.0, 400.0)),
                GridPrimitive::Marker(vec2(800.0, 400.0)),
            ],
            prims
        );
    }

    #[test]
    #[should_panic]
    fn zero_cell_size() {
        snap_start(Vec2::ZERO, 0.0);
    }
}
