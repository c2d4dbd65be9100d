//! Integration test: clearing a whole dungeon through the session API
//!
//! enter → walk to each monster → fight → wait out the delay → next dungeon

use dungeon_legacy::character::{Character, CharacterClass, Position};
use dungeon_legacy::core::{CombatPhase, EngineConfig, GameEvent, GameSession};
use dungeon_legacy::items::find_item;

fn open_config(seed: u64) -> EngineConfig {
    EngineConfig {
        wall_chance: 0.0,
        ..EngineConfig::seeded(seed)
    }
}

/// A warrior in legendary gear: every monster hits for the 1 point floor.
fn geared_session(seed: u64) -> GameSession {
    let mut hero = Character::new("Dungeon Explorer", CharacterClass::Warrior).unwrap();
    hero.inventory.push(find_item("sword_legendary").unwrap());
    hero.inventory.push(find_item("armor_legendary").unwrap());
    let mut session = GameSession::new(hero, open_config(seed)).unwrap();
    session.equip("sword_legendary").unwrap();
    session.equip("armor_legendary").unwrap();
    session
}

fn nearest_living_monster(session: &GameSession) -> Option<Position> {
    let here = session.character().position;
    session
        .dungeon()
        .monsters
        .iter()
        .filter(|m| m.is_alive)
        .map(|m| m.position)
        .min_by_key(|pos| here.chebyshev_distance(*pos))
}

fn step_toward(from: Position, to: Position) -> (i32, i32) {
    let dx = (to.x as i64 - from.x as i64).signum() as i32;
    let dy = (to.y as i64 - from.y as i64).signum() as i32;
    (dx, dy)
}

/// Fights until the monster dies and the session is idle again.
fn fight(session: &mut GameSession, events: &mut Vec<GameEvent>) {
    for _ in 0..200 {
        match session.phase() {
            CombatPhase::InCombat { .. } => events.extend(session.attack().unwrap()),
            CombatPhase::Resolving { .. } => events.extend(session.update(0.5)),
            CombatPhase::Idle => return,
            CombatPhase::Defeated => panic!("geared warrior should not fall"),
        }
    }
    panic!("fight never ended");
}

fn clear_dungeon(session: &mut GameSession) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..500 {
        let Some(target) = nearest_living_monster(session) else {
            return events;
        };
        let (dx, dy) = step_toward(session.character().position, target);
        events.extend(session.move_by(dx, dy).unwrap());
        fight(session, &mut events);
    }
    panic!("dungeon was never cleared");
}

#[test]
fn test_clear_full_dungeon() {
    let mut session = geared_session(7);
    let monster_count = session.dungeon().monsters.len();
    assert_eq!(monster_count, 5);

    let events = clear_dungeon(&mut session);

    assert!(session.all_monsters_defeated());
    let kills = events
        .iter()
        .filter(|e| matches!(e, GameEvent::MonsterDefeated { .. }))
        .count();
    assert_eq!(kills, monster_count);
    let started = events
        .iter()
        .filter(|e| matches!(e, GameEvent::CombatStarted { .. }))
        .count();
    assert_eq!(started, monster_count);
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::CombatEnded))
            .count(),
        monster_count
    );
    assert!(session.character().gold > 100);
    assert!(session.character().experience > 0 || session.character().level > 1);
}

#[test]
fn test_fog_only_grows_during_run() {
    let mut session = geared_session(11);
    let mut revealed = session.dungeon().grid.revealed_count();
    assert_eq!(revealed, 1);

    for _ in 0..60 {
        let Some(target) = nearest_living_monster(&session) else {
            break;
        };
        let (dx, dy) = step_toward(session.character().position, target);
        session.move_by(dx, dy).unwrap();
        let mut events = Vec::new();
        fight(&mut session, &mut events);

        let now = session.dungeon().grid.revealed_count();
        assert!(now >= revealed, "fog closed again: {now} < {revealed}");
        revealed = now;
    }
    assert!(revealed > 1);
}

#[test]
fn test_monsters_scale_with_level_on_reentry() {
    let mut session = geared_session(3);
    clear_dungeon(&mut session);
    let level = session.character().level;

    session.enter_dungeon().unwrap();
    assert_eq!(session.character().position, Position::new(0, 0));
    assert_eq!(session.dungeon().grid.revealed_count(), 1);
    assert!(!session.all_monsters_defeated());
    assert!(session.dungeon().monsters.iter().all(|m| m.level == level));
}

#[test]
fn test_seeded_runs_are_identical() {
    let mut a = geared_session(99);
    let mut b = geared_session(99);
    let events_a = clear_dungeon(&mut a);
    let events_b = clear_dungeon(&mut b);
    assert_eq!(events_a, events_b);
    assert_eq!(a.character().gold, b.character().gold);
    assert_eq!(a.character().inventory, b.character().inventory);
}
