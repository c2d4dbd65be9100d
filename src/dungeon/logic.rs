//! Movement, collision and fog of war.

use log::debug;

use super::types::{monster_at, DungeonGrid};
use crate::character::Character;
use crate::combat::Monster;
use crate::core::constants::REVEAL_RADIUS;
use crate::core::error::Rejection;

/// Result of a proposed move
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    /// The character stepped onto the target cell and the fog lifted around it
    Moved {
        character: Character,
        grid: DungeonGrid,
    },
    /// A living monster holds the target cell. The character stays put.
    Encounter { monster: Monster },
    /// Nothing changed
    Rejected(Rejection),
}

/// Resolves a move by `(dx, dy)`.
///
/// Checks run in order: not in combat, target in bounds, target walkable,
/// then monster occupancy. Inputs are never modified; a successful move
/// returns updated copies.
pub fn move_character(
    character: &Character,
    dx: i32,
    dy: i32,
    grid: &DungeonGrid,
    monsters: &[Monster],
    in_combat: bool,
) -> MoveOutcome {
    if in_combat {
        return MoveOutcome::Rejected(Rejection::InCombat);
    }

    let target = match character.position.offset(dx, dy) {
        Some(pos) if grid.in_bounds(pos) => pos,
        _ => return MoveOutcome::Rejected(Rejection::OutOfBounds),
    };

    if !grid.is_walkable(target) {
        return MoveOutcome::Rejected(Rejection::NotWalkable);
    }

    if let Some(monster) = monster_at(monsters, target) {
        debug!("{} blocks ({}, {})", monster.name, target.x, target.y);
        return MoveOutcome::Encounter {
            monster: monster.clone(),
        };
    }

    let mut character = character.clone();
    character.position = target;
    let mut grid = grid.clone();
    grid.reveal_around(target, REVEAL_RADIUS);

    debug!("moved to ({}, {})", target.x, target.y);
    MoveOutcome::Moved { character, grid }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{CharacterClass, Position};
    use crate::combat::MONSTER_TEMPLATES;
    use crate::dungeon::types::TileType;
    use uuid::Uuid;

    fn hero() -> Character {
        Character::new("Test Hero", CharacterClass::Rogue).unwrap()
    }

    fn open_grid() -> DungeonGrid {
        let mut grid = DungeonGrid::new(8);
        grid.reveal_around(Position::new(0, 0), 0);
        grid
    }

    fn imp_at(x: usize, y: usize) -> Monster {
        let mut monster = Monster::from_template(&MONSTER_TEMPLATES[4], 1, Uuid::nil(), Vec::new());
        monster.position = Position::new(x, y);
        monster
    }

    #[test]
    fn test_move_updates_position_and_reveals() {
        let grid = open_grid();
        match move_character(&hero(), 1, 1, &grid, &[], false) {
            MoveOutcome::Moved { character, grid } => {
                assert_eq!(character.position, Position::new(1, 1));
                // (0..=2) x (0..=2)
                assert_eq!(grid.revealed_count(), 9);
                assert!(grid.is_revealed(Position::new(2, 2)));
                assert!(!grid.is_revealed(Position::new(3, 3)));
            }
            other => panic!("expected move, got {other:?}"),
        }
    }

    #[test]
    fn test_reveal_keeps_previous_tiles() {
        let mut grid = open_grid();
        let mut hero = hero();
        for _ in 0..4 {
            match move_character(&hero, 1, 0, &grid, &[], false) {
                MoveOutcome::Moved { character, grid: next } => {
                    assert!(next.revealed_count() >= grid.revealed_count());
                    hero = character;
                    grid = next;
                }
                other => panic!("expected move, got {other:?}"),
            }
        }
        assert!(grid.is_revealed(Position::new(0, 0)));
        assert!(grid.is_revealed(Position::new(5, 1)));
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let grid = open_grid();
        assert_eq!(
            move_character(&hero(), -1, 0, &grid, &[], false),
            MoveOutcome::Rejected(Rejection::OutOfBounds)
        );

        let mut far = hero();
        far.position = Position::new(7, 7);
        assert_eq!(
            move_character(&far, 1, 0, &grid, &[], false),
            MoveOutcome::Rejected(Rejection::OutOfBounds)
        );
    }

    #[test]
    fn test_wall_rejected() {
        let mut grid = open_grid();
        grid.set_type(Position::new(1, 0), TileType::Wall);
        assert_eq!(
            move_character(&hero(), 1, 0, &grid, &[], false),
            MoveOutcome::Rejected(Rejection::NotWalkable)
        );
    }

    #[test]
    fn test_combat_blocks_movement_first() {
        // Out of bounds too, but combat is checked first
        let grid = open_grid();
        assert_eq!(
            move_character(&hero(), -1, 0, &grid, &[], true),
            MoveOutcome::Rejected(Rejection::InCombat)
        );
    }

    #[test]
    fn test_living_monster_starts_encounter() {
        let grid = open_grid();
        let imp = imp_at(1, 0);
        match move_character(&hero(), 1, 0, &grid, std::slice::from_ref(&imp), false) {
            MoveOutcome::Encounter { monster } => assert_eq!(monster, imp),
            other => panic!("expected encounter, got {other:?}"),
        }
    }

    #[test]
    fn test_dead_monster_does_not_block() {
        let grid = open_grid();
        let mut imp = imp_at(1, 0);
        imp.take_damage(imp.max_health);
        assert!(matches!(
            move_character(&hero(), 1, 0, &grid, &[imp], false),
            MoveOutcome::Moved { .. }
        ));
    }

    #[test]
    fn test_first_living_monster_wins_shared_cell() {
        let grid = open_grid();
        let mut dead = imp_at(1, 0);
        dead.take_damage(dead.max_health);
        let mut alive = imp_at(1, 0);
        alive.name = "Second Imp".to_string();
        match move_character(&hero(), 1, 0, &grid, &[dead, alive], false) {
            MoveOutcome::Encounter { monster } => assert_eq!(monster.name, "Second Imp"),
            other => panic!("expected encounter, got {other:?}"),
        }
    }
}
