//! Dungeon grid data structures.

use serde::{Deserialize, Serialize};

use crate::character::Position;
use crate::combat::Monster;

/// Kind of cell. Only floor and wall are produced by generation; the rest are
/// reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileType {
    Floor,
    Wall,
    Door,
    Stairs,
    Chest,
}

impl TileType {
    pub fn is_walkable(&self) -> bool {
        !matches!(self, TileType::Wall)
    }
}

/// A single cell of the dungeon grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonTile {
    pub position: Position,
    pub tile_type: TileType,
    pub walkable: bool,
    /// Fog of war. Only ever goes from false to true.
    pub revealed: bool,
}

impl DungeonTile {
    pub fn new(position: Position, tile_type: TileType) -> Self {
        Self {
            position,
            tile_type,
            walkable: tile_type.is_walkable(),
            revealed: false,
        }
    }
}

/// Square grid of tiles, indexed `tiles[y][x]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonGrid {
    size: usize,
    tiles: Vec<Vec<DungeonTile>>,
}

impl DungeonGrid {
    /// All-floor, fully hidden grid.
    pub fn new(size: usize) -> Self {
        let tiles = (0..size)
            .map(|y| {
                (0..size)
                    .map(|x| DungeonTile::new(Position::new(x, y), TileType::Floor))
                    .collect()
            })
            .collect();
        Self { size, tiles }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x < self.size && pos.y < self.size
    }

    pub fn get(&self, pos: Position) -> Option<&DungeonTile> {
        self.tiles.get(pos.y)?.get(pos.x)
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut DungeonTile> {
        self.tiles.get_mut(pos.y)?.get_mut(pos.x)
    }

    pub fn set_type(&mut self, pos: Position, tile_type: TileType) {
        if let Some(tile) = self.get_mut(pos) {
            tile.tile_type = tile_type;
            tile.walkable = tile_type.is_walkable();
        }
    }

    pub fn is_walkable(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(|tile| tile.walkable)
    }

    pub fn is_revealed(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(|tile| tile.revealed)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &DungeonTile> {
        self.tiles.iter().flatten()
    }

    pub fn revealed_count(&self) -> usize {
        self.tiles().filter(|tile| tile.revealed).count()
    }

    pub fn walkable_positions(&self) -> Vec<Position> {
        self.tiles()
            .filter(|tile| tile.walkable)
            .map(|tile| tile.position)
            .collect()
    }

    /// Marks every tile within Chebyshev distance `radius` of `center` as
    /// revealed. Already revealed tiles stay revealed.
    pub fn reveal_around(&mut self, center: Position, radius: usize) {
        let min_x = center.x.saturating_sub(radius);
        let min_y = center.y.saturating_sub(radius);
        let max_x = (center.x + radius).min(self.size.saturating_sub(1));
        let max_y = (center.y + radius).min(self.size.saturating_sub(1));

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                if let Some(tile) = self.get_mut(Position::new(x, y)) {
                    tile.revealed = true;
                }
            }
        }
    }
}

/// One generated dungeon: the grid and the monsters placed on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dungeon {
    pub grid: DungeonGrid,
    pub monsters: Vec<Monster>,
}

impl Dungeon {
    pub fn all_monsters_defeated(&self) -> bool {
        self.monsters.iter().all(|m| !m.is_alive)
    }
}

/// The first living monster standing on `pos`.
pub fn monster_at(monsters: &[Monster], pos: Position) -> Option<&Monster> {
    monsters.iter().find(|m| m.is_alive && m.position == pos)
}
