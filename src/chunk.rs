//! Chunk nodes placed on an infinite integer plane.
//!
//! Nodes live in a [`ChunkMap`] arena and reach their neighbours by coordinate lookup, so
//! evicting a chunk never leaves a dangling link behind.

use bevy::{math::ivec2, prelude::*, utils::HashMap};

use crate::{prelude::LOCAL_GRID_SIZE, world::Chunk};

/// position of a chunk on the chunk grid
pub type ChunkCoord = IVec2;

/// Offsets of the 8 neighbours, row-major, centre skipped.
pub const NEIGHBOUR_OFFSETS: [IVec2; 8] = [
    ivec2(-1, -1),
    ivec2(0, -1),
    ivec2(1, -1),
    ivec2(-1, 0),
    ivec2(1, 0),
    ivec2(-1, 1),
    ivec2(0, 1),
    ivec2(1, 1),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkNode {
    pub chunk: Chunk,
    coord: ChunkCoord,
}

impl ChunkNode {
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            chunk: Chunk::EMPTY,
            coord,
        }
    }

    #[inline]
    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// top-left corner of the chunk in world space
    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.coord.as_vec2() * LOCAL_GRID_SIZE
    }

    /// world-space square covered by the chunk
    #[inline]
    pub fn world_rect(&self) -> Rect {
        let origin = self.origin();
        Rect {
            min: origin,
            max: origin + Vec2::splat(LOCAL_GRID_SIZE),
        }
    }

    pub fn neighbour_coords(&self) -> [ChunkCoord; 8] {
        NEIGHBOUR_OFFSETS.map(|offs| self.coord + offs)
    }
}

/// Arena of chunk nodes addressed by chunk coordinates.
#[derive(Resource, Debug, Default)]
pub struct ChunkMap {
    nodes: Vec<ChunkNode>,
    index: HashMap<ChunkCoord, usize>,
}

impl ChunkMap {
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.index.contains_key(&coord)
    }

    /// Returns the node at `coord`, creating an empty one if there is none yet.
    pub fn get_or_insert(&mut self, coord: ChunkCoord) -> &mut ChunkNode {
        let idx = match self.index.get(&coord) {
            Some(&idx) => idx,
            None => {
                debug!("creating chunk at {coord}");
                self.nodes.push(ChunkNode::new(coord));
                self.index.insert(coord, self.nodes.len() - 1);
                self.nodes.len() - 1
            }
        };
        &mut self.nodes[idx]
    }

    pub fn get(&self, coord: ChunkCoord) -> Option<&ChunkNode> {
        self.index.get(&coord).map(|&idx| &self.nodes[idx])
    }

    pub fn get_mut(&mut self, coord: ChunkCoord) -> Option<&mut ChunkNode> {
        self.index.get(&coord).map(|&idx| &mut self.nodes[idx])
    }

    /// Evicts the node at `coord`.
    pub fn remove(&mut self, coord: ChunkCoord) -> Option<ChunkNode> {
        let idx = self.index.remove(&coord)?;
        let node = self.nodes.swap_remove(idx);
        // the former last node now lives at `idx`
        if let Some(moved) = self.nodes.get(idx) {
            self.index.insert(moved.coord, idx);
        }
        debug!("evicted chunk at {coord}");
        Some(node)
    }

    /// Neighbour of `coord` at `NEIGHBOUR_OFFSETS[dir]`, if it exists.
    pub fn neighbour(&self, coord: ChunkCoord, dir: usize) -> Option<&ChunkNode> {
        self.get(coord + NEIGHBOUR_OFFSETS[dir])
    }

    /// All 8 neighbour slots of `coord`, `None` where no chunk exists.
    pub fn neighbours(&self, coord: ChunkCoord) -> [Option<&ChunkNode>; 8] {
        NEIGHBOUR_OFFSETS.map(|offs| self.get(coord + offs))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChunkNode> {
        self.nodes.iter()
    }
}

/// Chunk coordinate containing the world-space point `p`.
#[inline]
pub fn chunk_coord_of(p: Vec2) -> ChunkCoord {
    (p / LOCAL_GRID_SIZE).floor().as_ivec2()
}
