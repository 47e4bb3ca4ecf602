use std::time::{Duration, SystemTime, UNIX_EPOCH};

use bevy::{math::vec2, prelude::*};

use crate::{
    chunk::{ChunkCoord, ChunkMap, ChunkNode},
    grid::{grid_primitives, GridMode, GridPrimitive},
    prelude::*,
    settings::Settings,
    state::GameState,
    viewport::{to_scene, Viewport},
    visibility::{VisibilitySet, VisibleChunks},
    world::{Chunk, BLOCKS_PER_CHUNK, CELLS_PER_BLOCK},
};

pub struct LifePlugin;

impl Plugin for LifePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ChunkMap>()
            .insert_resource(Simulation::new(RandomFill::from_wall_clock()))
            .insert_resource(Time::<Fixed>::from_duration(Duration::from_millis(
                UPDATE_INTERVAL_MS,
            )))
            .add_systems(
                OnEnter(GameState::Load),
                (seed_chunks, finish_loading).chain(),
            )
            .add_systems(
                FixedUpdate,
                step_chunks.run_if(in_state(GameState::Running)),
            )
            .add_systems(
                Update,
                (
                    sync_chunk_entities.run_if(resource_changed::<ChunkMap>),
                    update_chunk_sprites,
                    draw_chunk_debug,
                )
                    .chain()
                    .after(VisibilitySet),
            );
    }
}

// ——> SYSTEMS

fn seed_chunks(mut map: ResMut<ChunkMap>) {
    if seed(&mut map) {
        info!("seeded {} chunk(s)", map.len());
    }
}

/// Fills an empty arena with [`SEED_CHUNKS`]. A populated arena is left alone.
fn seed(map: &mut ChunkMap) -> bool {
    if !map.is_empty() {
        return false;
    }
    for &coord in SEED_CHUNKS {
        map.get_or_insert(coord);
    }
    true
}

fn finish_loading(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::Running);
}

fn step_chunks(mut sim: ResMut<Simulation>, mut map: ResMut<ChunkMap>) {
    sim.step(&mut map);
}

/// Keeps one sprite group per chunk of the arena.
fn sync_chunk_entities(
    mut commands: Commands,
    map: Res<ChunkMap>,
    chunks: Query<(Entity, &ChunkEntity)>,
) {
    let mut spawned = bevy::utils::HashSet::new();
    for (entity, chunk) in chunks.iter() {
        if map.contains(chunk.0) {
            spawned.insert(chunk.0);
        } else {
            commands.entity(entity).despawn_recursive();
        }
    }

    for node in map.iter().filter(|node| !spawned.contains(&node.coord())) {
        spawn_chunk_entity(&mut commands, node);
    }
}

fn spawn_chunk_entity(commands: &mut Commands, node: &ChunkNode) {
    let half_cell = BASE_GRID_SIZE * 0.5;
    commands
        .spawn((
            ChunkEntity(node.coord()),
            Transform::from_translation(to_scene(node.origin()).extend(1.0)),
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            for y in 0..BLOCKS_PER_CHUNK {
                for x in 0..CELLS_PER_BLOCK {
                    let local = vec2(x as f32, y as f32) * BASE_GRID_SIZE + half_cell;
                    parent.spawn((
                        CellSprite(y * CELLS_PER_BLOCK + x),
                        Sprite::from_color(CELL_ALIVE_COLOR, Vec2::splat(BASE_GRID_SIZE)),
                        Transform::from_translation(to_scene(local).extend(0.0)),
                        Visibility::Hidden,
                    ));
                }
            }
        });
}

fn update_chunk_sprites(
    map: Res<ChunkMap>,
    visible: Res<VisibleChunks>,
    mut chunks: Query<(&ChunkEntity, &mut Visibility, &Children)>,
    mut cells: Query<(&CellSprite, &mut Visibility), Without<ChunkEntity>>,
) {
    for (chunk, mut visibility, children) in chunks.iter_mut() {
        let on_screen = visible.contains(&chunk.0);
        visibility.set_if_neq(if on_screen {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        });

        let Some(node) = map.get(chunk.0).filter(|_| on_screen) else {
            continue;
        };
        for &child in children.iter() {
            if let Ok((cell, mut visibility)) = cells.get_mut(child) {
                visibility.set_if_neq(if node.chunk.cell(cell.0) {
                    Visibility::Inherited
                } else {
                    Visibility::Hidden
                });
            }
        }
    }
}

fn draw_chunk_debug(
    mut gizmos: Gizmos,
    map: Res<ChunkMap>,
    visible: Res<VisibleChunks>,
    viewport: Res<Viewport>,
    settings: Res<Settings>,
) {
    if !settings.debug_chunk_renderer {
        return;
    }

    for primitive in grid_primitives(
        viewport.visible_world_rect(),
        LOCAL_GRID_SIZE,
        GridMode::Dots,
    ) {
        if let GridPrimitive::Marker(at) = primitive {
            gizmos.circle_2d(to_scene(at), 6.0, CHUNK_GRID_COLOR);
        }
    }

    for node in visible.iter().filter_map(|&coord| map.get(coord)) {
        let rect = node.world_rect();
        gizmos.circle_2d(to_scene(rect.min), 9.0, CHUNK_CORNER_COLOR);
        gizmos.circle_2d(to_scene(rect.max), 9.0, CHUNK_CORNER_COLOR);
    }
}

// ——> RULES

/// One simulation step for a single chunk.
///
/// Every chunk sees the arena as it was before the step, the new states are written back
/// together once all of them are computed.
pub trait StepRule: Send + Sync + 'static {
    fn step(&mut self, node: &ChunkNode, map: &ChunkMap) -> Chunk;
}

/// Placeholder rule: every chunk gets fresh random content, neighbours are ignored.
pub struct RandomFill {
    rng: fastrand::Rng,
}

impl RandomFill {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn from_wall_clock() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        info!("random fill seed: {seed}");
        Self::with_seed(seed)
    }
}

impl StepRule for RandomFill {
    fn step(&mut self, _node: &ChunkNode, _map: &ChunkMap) -> Chunk {
        let mut chunk = Chunk::EMPTY;
        chunk.fill_random(&mut self.rng);
        chunk
    }
}

// ——> RESOURCES

#[derive(Resource)]
pub struct Simulation {
    rule: Box<dyn StepRule>,
    generation: u64,
}

impl Simulation {
    pub fn new(rule: impl StepRule) -> Self {
        Self {
            rule: Box::new(rule),
            generation: 0,
        }
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Advances every chunk of `map` by one step.
    pub fn step(&mut self, map: &mut ChunkMap) {
        let snapshot: &ChunkMap = map;
        let next: Vec<(ChunkCoord, Chunk)> = snapshot
            .iter()
            .map(|node| (node.coord(), self.rule.step(node, snapshot)))
            .collect();

        for (coord, chunk) in next {
            if let Some(node) = map.get_mut(coord) {
                node.chunk = chunk;
            }
        }
        self.generation += 1;
    }
}

// ——> COMPONENTS

/// parent of the 64 cell sprites of a chunk
#[derive(Component, Debug)]
struct ChunkEntity(ChunkCoord);

/// index of the cell within its chunk
#[derive(Component, Debug)]
struct CellSprite(u32);
