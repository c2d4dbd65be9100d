//! Dungeon procedural generation.

use log::{info, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use super::types::{Dungeon, DungeonGrid, TileType};
use crate::character::Position;
use crate::combat::generate_monster;
use crate::core::constants::{SPAWN_POSITION, WALL_CHANCE};

fn spawn_position() -> Position {
    Position::new(SPAWN_POSITION.0, SPAWN_POSITION.1)
}

/// Generates a dungeon with the default wall chance.
pub fn generate_dungeon(
    size: usize,
    player_level: u32,
    monster_count: usize,
    rng: &mut impl Rng,
) -> Dungeon {
    generate_dungeon_with(size, player_level, monster_count, WALL_CHANCE, rng)
}

/// Generates a `size` x `size` dungeon.
///
/// Every cell except the spawn cell becomes a wall with probability
/// `wall_chance`. Only the spawn cell starts revealed. Each monster is scaled
/// to `player_level` and dropped on a uniformly chosen walkable cell other
/// than the spawn cell. Monsters may share a cell.
pub fn generate_dungeon_with(
    size: usize,
    player_level: u32,
    monster_count: usize,
    wall_chance: f64,
    rng: &mut impl Rng,
) -> Dungeon {
    let size = size.max(1);
    let wall_chance = if wall_chance.is_nan() {
        0.0
    } else {
        wall_chance.clamp(0.0, 1.0)
    };
    let spawn = spawn_position();
    let mut grid = DungeonGrid::new(size);

    for y in 0..size {
        for x in 0..size {
            let pos = Position::new(x, y);
            if pos != spawn && rng.gen_bool(wall_chance) {
                grid.set_type(pos, TileType::Wall);
            }
        }
    }
    grid.reveal_around(spawn, 0);

    let candidates: Vec<Position> = grid
        .walkable_positions()
        .into_iter()
        .filter(|&pos| pos != spawn)
        .collect();

    let mut monsters = Vec::with_capacity(monster_count);
    if candidates.is_empty() && monster_count > 0 {
        warn!(
            "no walkable cell for monsters in {}x{} dungeon, placing none",
            size, size
        );
    } else {
        for _ in 0..monster_count {
            let mut monster = generate_monster(player_level, rng);
            if let Some(&pos) = candidates.choose(rng) {
                monster.position = pos;
            }
            monsters.push(monster);
        }
    }

    info!(
        "generated {}x{} dungeon: {} walls, {} monsters at level {}",
        size,
        size,
        size * size - grid.walkable_positions().len(),
        monsters.len(),
        player_level
    );

    Dungeon { grid, monsters }
}
