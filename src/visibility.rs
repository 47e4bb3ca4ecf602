use bevy::{prelude::*, utils::HashSet};

use crate::{
    camera::ViewportSet,
    chunk::{ChunkCoord, ChunkMap, ChunkNode},
    settings::Settings,
    viewport::Viewport,
};

pub struct VisibilityPlugin;

impl Plugin for VisibilityPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<VisibleChunks>()
            .configure_sets(Update, VisibilitySet.after(ViewportSet))
            .add_systems(Update, resolve_visible_chunks.in_set(VisibilitySet));
    }
}

/// Runs after the viewport for the frame is known, before anything reads [`VisibleChunks`].
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct VisibilitySet;

/// Chunks intersecting the viewport this frame. Rebuilt every frame, never accumulated.
#[derive(Resource, Debug, Default, Deref)]
pub struct VisibleChunks(HashSet<ChunkCoord>);

impl VisibleChunks {
    #[inline]
    pub fn any(&self) -> bool {
        !self.0.is_empty()
    }
}

fn resolve_visible_chunks(
    mut visible: ResMut<VisibleChunks>,
    map: Res<ChunkMap>,
    viewport: Res<Viewport>,
    settings: Res<Settings>,
) {
    let was_any = visible.any();
    visible.0.clear();
    // only monitored while the chunk renderer is on
    if settings.debug_chunk_renderer {
        visible.0.extend(visible_chunks(&map, &viewport));
    }

    if was_any != visible.any() {
        debug!("chunks on screen: {}", visible.len());
    }
}

// ——> OVERLAP TEST

/// Closed-interval overlap: rectangles that only touch still count as overlapping.
#[inline]
pub fn rects_touch(a: Rect, b: Rect) -> bool {
    !(a.max.x < b.min.x || a.min.x > b.max.x || a.max.y < b.min.y || a.min.y > b.max.y)
}

#[inline]
pub fn is_chunk_on_screen(node: &ChunkNode, viewport: &Viewport) -> bool {
    rects_touch(node.world_rect(), viewport.visible_world_rect())
}

/// Coordinates of every chunk of `map` intersecting the viewport.
pub fn visible_chunks<'a>(
    map: &'a ChunkMap,
    viewport: &'a Viewport,
) -> impl Iterator<Item = ChunkCoord> + 'a {
    map.iter()
        .filter(|node| is_chunk_on_screen(node, viewport))
        .map(ChunkNode::coord)
}

#[cfg(test)]
mod test {
    use bevy::math::{ivec2, vec2};

    use super::*;

    fn screen() -> Viewport {
        Viewport::new(Vec2::ZERO, 1.0, vec2(800.0, 450.0))
    }

    #[test]
    fn origin_chunk_is_visible() {
        assert!(is_chunk_on_screen(&ChunkNode::new(IVec2::ZERO), &screen()));
        assert!(is_chunk_on_screen(&ChunkNode::new(ivec2(1, 1)), &screen()));
    }

    #[test]
    fn far_chunk_is_not_visible() {
        let node = ChunkNode::new(ivec2(3, 3));
        assert_eq!(vec2(1200.0, 1200.0), node.world_rect().min);
        assert!(!is_chunk_on_screen(&node, &screen()));
    }

    #[test]
    fn touching_counts_as_visible() {
        // chunk (-1, 0) spans x in [-400, 0], its right edge is the viewport's left edge
        let node = ChunkNode::new(ivec2(-1, 0));
        assert!(is_chunk_on_screen(&node, &screen()));

        // one unit further away
        let vp = Viewport::new(vec2(1.0, 0.0), 1.0, vec2(800.0, 450.0));
        assert!(!is_chunk_on_screen(&node, &vp));

        // chunk (2, 0) starts at x = 800, the viewport's right edge
        let node = ChunkNode::new(ivec2(2, 0));
        assert!(is_chunk_on_screen(&node, &screen()));
        let vp = Viewport::new(vec2(-1.0, 0.0), 1.0, vec2(800.0, 450.0));
        assert!(!is_chunk_on_screen(&node, &vp));
    }

    #[test]
    fn touching_counts_as_visible_vertically() {
        // chunk (0, -1) spans y in [-400, 0], its bottom edge is the viewport's top edge
        let node = ChunkNode::new(ivec2(0, -1));
        assert!(is_chunk_on_screen(&node, &screen()));
        let vp = Viewport::new(vec2(0.0, 1.0), 1.0, vec2(800.0, 450.0));
        assert!(!is_chunk_on_screen(&node, &vp));

        // chunk (0, 2) starts at y = 800, well below a 450 high viewport
        let node = ChunkNode::new(ivec2(0, 2));
        assert!(!is_chunk_on_screen(&node, &screen()));
        // bottom edge moved down to y = 800
        let vp = Viewport::new(vec2(0.0, 350.0), 1.0, vec2(800.0, 450.0));
        assert!(is_chunk_on_screen(&node, &vp));
        let vp = Viewport::new(vec2(0.0, 349.0), 1.0, vec2(800.0, 450.0));
        assert!(!is_chunk_on_screen(&node, &vp));
    }

    #[test]
    fn zoom_widens_the_view() {
        let node = ChunkNode::new(ivec2(3, 0));
        assert!(!is_chunk_on_screen(&node, &screen()));
        let vp = Viewport::new(Vec2::ZERO, 0.5, vec2(800.0, 450.0));
        assert!(is_chunk_on_screen(&node, &vp));
    }

    #[test]
    fn resolves_every_chunk() {
        let mut map = ChunkMap::default();
        for x in -2..=3 {
            for y in -2..=3 {
                map.get_or_insert(ivec2(x, y));
            }
        }

        let mut coords: Vec<_> = visible_chunks(&map, &screen()).collect();
        coords.sort_by_key(|c| (c.y, c.x));
        let expected: Vec<_> = (-1..=1)
            .flat_map(|y| (-1..=2).map(move |x| ivec2(x, y)))
            .collect();
        assert_eq!(expected, coords);
    }
}
