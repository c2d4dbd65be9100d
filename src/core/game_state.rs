//! A running game: character, quest log, current dungeon and combat phase.

use std::collections::VecDeque;

use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use super::config::{ConfigError, EngineConfig};
use super::error::Rejection;
use crate::character::{self, Character, Position};
use crate::combat::{self, CombatOutcome, Monster};
use crate::dungeon::{generate_dungeon_with, move_character, Dungeon, MoveOutcome};
use crate::quests::{self, initial_quests, Quest};
use crate::save_manager::SaveSnapshot;

/// Where the session is in the encounter cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CombatPhase {
    /// Free movement
    Idle,
    InCombat { monster_id: Uuid },
    /// The monster is dead; movement resumes once `remaining` seconds pass.
    Resolving { remaining: f64 },
    /// Health reached zero. Terminal until the caller starts over.
    Defeated,
}

/// Something that happened during an action, for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Moved { position: Position },
    CombatStarted { monster_id: Uuid, monster_name: String },
    /// The character's blow landed
    PlayerHit { damage: u32 },
    /// The monster struck back
    MonsterHit { damage: u32 },
    MonsterDefeated { monster_name: String, experience: u32, gold: u32 },
    LootGained { item_id: String },
    LeveledUp { level: u32 },
    PlayerDefeated,
    CombatEnded,
    QuestCompleted { quest_id: String },
    ItemEquipped { item_id: String },
    PotionConsumed { item_id: String },
    ItemSold { item_id: String, value: u32 },
    RewardsClaimed { quest_id: String },
}

pub struct GameSession {
    config: EngineConfig,
    character: Character,
    quests: Vec<Quest>,
    dungeon: Dungeon,
    phase: CombatPhase,
    combat_log: VecDeque<String>,
    rng: ChaCha8Rng,
}

impl GameSession {
    /// Starts a fresh game for `character` with the starting quest log.
    pub fn new(character: Character, config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_quests(character, initial_quests(), config)
    }

    /// Resumes a saved game in a newly generated dungeon.
    pub fn from_snapshot(snapshot: SaveSnapshot, config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_quests(snapshot.character, snapshot.quests, config)
    }

    fn with_quests(
        character: Character,
        quests: Vec<Quest>,
        config: EngineConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let dungeon = Self::generate(&config, character.level, &mut rng);
        let quests = quests::recompute_quests(&quests, &character);
        let phase = if character.is_defeated() {
            CombatPhase::Defeated
        } else {
            CombatPhase::Idle
        };

        let mut session = Self {
            combat_log: VecDeque::with_capacity(config.combat_log_capacity),
            config,
            character,
            quests,
            dungeon,
            phase,
            rng,
        };
        session.character.position = Position::default();
        Ok(session)
    }

    fn generate(config: &EngineConfig, level: u32, rng: &mut ChaCha8Rng) -> Dungeon {
        generate_dungeon_with(
            config.dungeon_size,
            level,
            config.monster_count,
            config.wall_chance,
            rng,
        )
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn quests(&self) -> &[Quest] {
        &self.quests
    }

    pub fn dungeon(&self) -> &Dungeon {
        &self.dungeon
    }

    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    /// Oldest line first
    pub fn combat_log(&self) -> impl Iterator<Item = &str> {
        self.combat_log.iter().map(String::as_str)
    }

    pub fn is_defeated(&self) -> bool {
        self.phase == CombatPhase::Defeated
    }

    pub fn all_monsters_defeated(&self) -> bool {
        self.dungeon.all_monsters_defeated()
    }

    /// The monster currently being fought, if any.
    pub fn current_monster(&self) -> Option<&Monster> {
        match self.phase {
            CombatPhase::InCombat { monster_id } => {
                self.dungeon.monsters.iter().find(|m| m.id == monster_id)
            }
            _ => None,
        }
    }

    /// The persisted part of the session.
    pub fn snapshot(&self) -> SaveSnapshot {
        SaveSnapshot::new(self.character.clone(), self.quests.clone())
    }

    /// Replaces the dungeon with a fresh one at the character's level and
    /// puts the character back on the spawn cell.
    pub fn enter_dungeon(&mut self) -> Result<(), Rejection> {
        if self.is_defeated() {
            return Err(Rejection::CharacterDefeated);
        }
        self.dungeon = Self::generate(&self.config, self.character.level, &mut self.rng);
        self.character.position = Position::default();
        self.phase = CombatPhase::Idle;
        self.combat_log.clear();
        info!(
            "{} entered a new dungeon ({} monsters)",
            self.character.name,
            self.dungeon.monsters.len()
        );
        Ok(())
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) -> Result<Vec<GameEvent>, Rejection> {
        if self.is_defeated() {
            return Err(Rejection::CharacterDefeated);
        }
        let in_combat = self.phase != CombatPhase::Idle;
        let outcome = move_character(
            &self.character,
            dx,
            dy,
            &self.dungeon.grid,
            &self.dungeon.monsters,
            in_combat,
        );

        let mut events = Vec::new();
        match outcome {
            MoveOutcome::Moved { character, grid } => {
                self.dungeon.grid = grid;
                events.push(GameEvent::Moved {
                    position: character.position,
                });
                self.commit_character(character, &mut events);
            }
            MoveOutcome::Encounter { monster } => {
                self.phase = CombatPhase::InCombat {
                    monster_id: monster.id,
                };
                self.push_log(format!(
                    "A level {} {} blocks your path!",
                    monster.level, monster.name
                ));
                info!("encounter with {} (level {})", monster.name, monster.level);
                events.push(GameEvent::CombatStarted {
                    monster_id: monster.id,
                    monster_name: monster.name,
                });
            }
            MoveOutcome::Rejected(reason) => {
                debug!("move ({}, {}) rejected: {}", dx, dy, reason);
                return Err(reason);
            }
        }
        Ok(events)
    }

    /// One exchange against the monster being fought.
    pub fn attack(&mut self) -> Result<Vec<GameEvent>, Rejection> {
        let monster_id = match self.phase {
            CombatPhase::InCombat { monster_id } => monster_id,
            CombatPhase::Idle => return Err(Rejection::NotInCombat),
            CombatPhase::Resolving { .. } => return Err(Rejection::CombatResolving),
            CombatPhase::Defeated => return Err(Rejection::CharacterDefeated),
        };
        let index = self
            .dungeon
            .monsters
            .iter()
            .position(|m| m.id == monster_id)
            .ok_or(Rejection::NotInCombat)?;

        let result = combat::attack(&self.character, &self.dungeon.monsters[index])?;

        let mut events = vec![GameEvent::PlayerHit {
            damage: result.player_damage,
        }];
        if let Some(damage) = result.monster_damage {
            events.push(GameEvent::MonsterHit { damage });
        }
        for line in result.log {
            self.push_log(line);
        }

        match result.outcome {
            CombatOutcome::Ongoing => {}
            CombatOutcome::Victory => {
                events.push(GameEvent::MonsterDefeated {
                    monster_name: result.monster.name.clone(),
                    experience: result.monster.experience,
                    gold: result.monster.gold_drop,
                });
                events.extend(result.loot.iter().map(|item| GameEvent::LootGained {
                    item_id: item.id.clone(),
                }));
                if result.leveled_up {
                    events.push(GameEvent::LeveledUp {
                        level: result.character.level,
                    });
                }
                self.phase = CombatPhase::Resolving {
                    remaining: self.config.combat_resolution_delay,
                };
            }
            CombatOutcome::Defeat => {
                events.push(GameEvent::PlayerDefeated);
                self.phase = CombatPhase::Defeated;
            }
        }

        self.dungeon.monsters[index] = result.monster;
        self.commit_character(result.character, &mut events);
        Ok(events)
    }

    /// Advances the post-combat delay by `delta_time` seconds.
    pub fn update(&mut self, delta_time: f64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if let CombatPhase::Resolving { remaining } = self.phase {
            // NaN and negative steps do not advance the timer
            let remaining = remaining - delta_time.max(0.0);
            if remaining <= 0.0 {
                self.phase = CombatPhase::Idle;
                self.combat_log.clear();
                events.push(GameEvent::CombatEnded);
            } else {
                self.phase = CombatPhase::Resolving { remaining };
            }
        }
        events
    }

    /// Equips the first inventory entry with `item_id`. Potions are drunk.
    pub fn equip(&mut self, item_id: &str) -> Result<Vec<GameEvent>, Rejection> {
        let item = self.inventory_item(item_id)?;
        let updated = character::equip(&self.character, &item)?;

        let mut events = vec![if item.is_potion() {
            GameEvent::PotionConsumed {
                item_id: item.id.clone(),
            }
        } else {
            GameEvent::ItemEquipped {
                item_id: item.id.clone(),
            }
        }];
        self.commit_character(updated, &mut events);
        Ok(events)
    }

    pub fn consume(&mut self, potion_id: &str) -> Result<Vec<GameEvent>, Rejection> {
        if self.is_defeated() {
            return Err(Rejection::CharacterDefeated);
        }
        let updated = character::consume(&self.character, potion_id)?;
        let mut events = vec![GameEvent::PotionConsumed {
            item_id: potion_id.to_string(),
        }];
        self.commit_character(updated, &mut events);
        Ok(events)
    }

    pub fn sell(&mut self, item_id: &str) -> Result<Vec<GameEvent>, Rejection> {
        let item = self.inventory_item(item_id)?;
        let updated = character::sell(&self.character, &item)?;
        let mut events = vec![GameEvent::ItemSold {
            item_id: item.id.clone(),
            value: item.value,
        }];
        self.commit_character(updated, &mut events);
        Ok(events)
    }

    /// Adds progress to a quest's counter objectives.
    pub fn advance_quest(&mut self, quest_id: &str, amount: u32) -> Result<Vec<GameEvent>, Rejection> {
        self.quests = quests::advance_objective(&self.quests, quest_id, amount)?;
        let mut events = Vec::new();
        self.refresh_quests(&mut events);
        Ok(events)
    }

    pub fn claim_quest_rewards(&mut self, quest_id: &str) -> Result<Vec<GameEvent>, Rejection> {
        if self.is_defeated() {
            return Err(Rejection::CharacterDefeated);
        }
        let index = self
            .quests
            .iter()
            .position(|q| q.id == quest_id)
            .ok_or_else(|| Rejection::QuestNotFound {
                quest_id: quest_id.to_string(),
            })?;

        let level_before = self.character.level;
        let (updated, quest) = quests::claim_quest_rewards(&self.character, &self.quests[index])?;
        self.quests[index] = quest;

        let mut events = vec![GameEvent::RewardsClaimed {
            quest_id: quest_id.to_string(),
        }];
        if updated.level > level_before {
            events.push(GameEvent::LeveledUp {
                level: updated.level,
            });
        }
        self.commit_character(updated, &mut events);
        Ok(events)
    }

    fn inventory_item(&self, item_id: &str) -> Result<crate::items::Item, Rejection> {
        if self.is_defeated() {
            return Err(Rejection::CharacterDefeated);
        }
        self.character
            .inventory
            .iter()
            .find(|item| item.id == item_id)
            .cloned()
            .ok_or_else(|| Rejection::NotInInventory {
                item_id: item_id.to_string(),
            })
    }

    /// Stores the new character and re-evaluates the quest log.
    fn commit_character(&mut self, character: Character, events: &mut Vec<GameEvent>) {
        self.character = character;
        self.refresh_quests(events);
    }

    fn refresh_quests(&mut self, events: &mut Vec<GameEvent>) {
        let updated = quests::recompute_quests(&self.quests, &self.character);
        for (before, after) in self.quests.iter().zip(&updated) {
            if !before.is_completed && after.is_completed {
                events.push(GameEvent::QuestCompleted {
                    quest_id: after.id.clone(),
                });
            }
        }
        self.quests = updated;
    }

    fn push_log(&mut self, line: String) {
        if self.config.combat_log_capacity == 0 {
            return;
        }
        while self.combat_log.len() >= self.config.combat_log_capacity {
            self.combat_log.pop_front();
        }
        self.combat_log.push_back(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterClass;
    use crate::combat::MONSTER_TEMPLATES;
    use crate::core::constants::HEALTH_POTION_ID;
    use crate::items::find_item;

    fn config() -> EngineConfig {
        EngineConfig {
            wall_chance: 0.0,
            ..EngineConfig::seeded(42)
        }
    }

    fn session() -> GameSession {
        let hero = Character::new("Test Hero", CharacterClass::Warrior).unwrap();
        GameSession::new(hero, config()).unwrap()
    }

    /// Session with a single skeleton one step east of spawn.
    fn session_with_skeleton() -> GameSession {
        let mut session = session();
        let mut skeleton =
            Monster::from_template(&MONSTER_TEMPLATES[0], 1, Uuid::from_u128(1), Vec::new());
        skeleton.position = Position::new(1, 0);
        session.dungeon.monsters = vec![skeleton];
        session
    }

    fn fight_to_victory(session: &mut GameSession) {
        for _ in 0..100 {
            if session.attack().is_err() {
                break;
            }
            if matches!(session.phase(), CombatPhase::Resolving { .. }) {
                return;
            }
        }
        panic!("fight did not end in victory: {:?}", session.phase());
    }

    #[test]
    fn test_new_session_starts_idle_at_spawn() {
        let session = session();
        assert_eq!(session.phase(), CombatPhase::Idle);
        assert_eq!(session.character().position, Position::new(0, 0));
        assert_eq!(session.dungeon().grid.size(), 8);
        assert_eq!(session.quests().len(), 2);
    }

    #[test]
    fn test_move_reveals_and_reports() {
        let mut session = session();
        session.dungeon.monsters.clear();
        let events = session.move_by(1, 0).unwrap();
        assert_eq!(
            events,
            vec![GameEvent::Moved {
                position: Position::new(1, 0)
            }]
        );
        assert_eq!(session.dungeon().grid.revealed_count(), 6);
    }

    #[test]
    fn test_bump_into_monster_starts_combat() {
        let mut session = session_with_skeleton();
        let events = session.move_by(1, 0).unwrap();
        assert!(matches!(events[0], GameEvent::CombatStarted { .. }));
        assert_eq!(
            session.phase(),
            CombatPhase::InCombat {
                monster_id: Uuid::from_u128(1)
            }
        );
        assert_eq!(session.character().position, Position::new(0, 0));
        assert_eq!(session.current_monster().map(|m| m.name.as_str()), Some("Skeleton"));
        assert_eq!(session.move_by(0, 1), Err(Rejection::InCombat));
    }

    #[test]
    fn test_attack_outside_combat_rejected() {
        let mut session = session();
        assert_eq!(session.attack(), Err(Rejection::NotInCombat));
    }

    #[test]
    fn test_victory_then_delay_then_idle() {
        let mut session = session_with_skeleton();
        session.move_by(1, 0).unwrap();
        fight_to_victory(&mut session);

        assert!(session.all_monsters_defeated());
        assert_eq!(session.character().experience, 15);
        assert_eq!(session.attack(), Err(Rejection::CombatResolving));
        assert_eq!(session.move_by(1, 0), Err(Rejection::InCombat));

        assert!(session.update(1.0).is_empty());
        assert!(matches!(session.phase(), CombatPhase::Resolving { .. }));
        assert_eq!(session.update(1.0), vec![GameEvent::CombatEnded]);
        assert_eq!(session.phase(), CombatPhase::Idle);
        assert_eq!(session.combat_log().count(), 0);

        // The dead skeleton no longer blocks the cell
        session.move_by(1, 0).unwrap();
        assert_eq!(session.character().position, Position::new(1, 0));
    }

    #[test]
    fn test_defeat_is_terminal() {
        let mut session = session_with_skeleton();
        session.dungeon.monsters[0].damage = 1000;
        session.dungeon.monsters[0].health = 1000;
        session.move_by(1, 0).unwrap();

        let events = session.attack().unwrap();
        assert!(events.contains(&GameEvent::PlayerDefeated));
        assert!(session.is_defeated());
        assert_eq!(session.attack(), Err(Rejection::CharacterDefeated));
        assert_eq!(session.move_by(0, 1), Err(Rejection::CharacterDefeated));
        assert_eq!(session.enter_dungeon(), Err(Rejection::CharacterDefeated));
        assert!(session.update(10.0).is_empty());
    }

    #[test]
    fn test_potion_usable_mid_fight() {
        let mut session = session_with_skeleton();
        session.character.inventory.push(find_item(HEALTH_POTION_ID).unwrap());
        session.character.combat.health = 50;
        session.move_by(1, 0).unwrap();

        let events = session.consume(HEALTH_POTION_ID).unwrap();
        assert_eq!(
            events,
            vec![GameEvent::PotionConsumed {
                item_id: HEALTH_POTION_ID.to_string()
            }]
        );
        assert_eq!(session.character().combat.health, 100);
    }

    #[test]
    fn test_equip_and_sell_through_session() {
        let mut session = session();
        session.equip("sword_1").unwrap();
        assert_eq!(session.character().combat.damage, 18);
        assert!(matches!(
            session.sell("sword_1"),
            Err(Rejection::ItemEquipped { .. })
        ));

        session.character.inventory.push(find_item("armor_1").unwrap());
        let events = session.sell("armor_1").unwrap();
        assert_eq!(
            events,
            vec![GameEvent::ItemSold {
                item_id: "armor_1".to_string(),
                value: 80
            }]
        );
        assert_eq!(session.character().gold, 180);
    }

    #[test]
    fn test_level_quest_completes_after_mutation() {
        let mut session = session();
        session.character.level = 2;
        session.character.experience = 149;
        session.character.experience_to_next_level = 150;
        session.character.inventory.push(find_item("armor_1").unwrap());

        // Any committed mutation re-evaluates quests
        session.sell("armor_1").unwrap();
        assert!(!session.quests()[1].is_completed);

        session.character.level = 3;
        let events = session.sell("sword_1").unwrap();
        assert!(events.contains(&GameEvent::QuestCompleted {
            quest_id: "quest_2".to_string()
        }));

        let events = session.claim_quest_rewards("quest_2").unwrap();
        assert!(events.contains(&GameEvent::LeveledUp { level: 4 }));
        assert!(session.character().has_item("staff_1"));
        assert_eq!(
            session.claim_quest_rewards("quest_2"),
            Err(Rejection::RewardsAlreadyClaimed {
                quest_id: "quest_2".to_string()
            })
        );
    }

    #[test]
    fn test_advance_kill_quest() {
        let mut session = session();
        session.advance_quest("quest_1", 4).unwrap();
        assert!(!session.quests()[0].is_completed);
        let events = session.advance_quest("quest_1", 1).unwrap();
        assert_eq!(
            events,
            vec![GameEvent::QuestCompleted {
                quest_id: "quest_1".to_string()
            }]
        );
    }

    #[test]
    fn test_enter_dungeon_regenerates_at_level() {
        let mut session = session();
        session.character.level = 3;
        session.character.position = Position::new(2, 2);
        session.enter_dungeon().unwrap();
        assert_eq!(session.character().position, Position::new(0, 0));
        assert!(session.dungeon().monsters.iter().all(|m| m.level == 3));
        assert_eq!(session.dungeon().grid.revealed_count(), 1);
    }

    #[test]
    fn test_combat_log_is_bounded() {
        let mut session = session();
        for i in 0..100 {
            session.push_log(format!("line {i}"));
        }
        assert_eq!(session.combat_log().count(), session.config().combat_log_capacity);
        assert_eq!(session.combat_log().last(), Some("line 99"));
    }

    #[test]
    fn test_snapshot_round_trip_resets_position() {
        let mut session = session();
        session.dungeon.monsters.clear();
        session.move_by(1, 0).unwrap();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.character.position, Position::new(1, 0));

        let resumed = GameSession::from_snapshot(snapshot, config()).unwrap();
        assert_eq!(resumed.character().name, "Test Hero");
        assert_eq!(resumed.character().position, Position::new(0, 0));
        assert_eq!(resumed.phase(), CombatPhase::Idle);
    }

    #[test]
    fn test_nan_wall_chance_is_refused() {
        let hero = Character::new("Test Hero", CharacterClass::Warrior).unwrap();
        let config = EngineConfig {
            wall_chance: f64::NAN,
            ..EngineConfig::seeded(1)
        };
        assert!(matches!(
            GameSession::new(hero, config),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_nan_delay_is_refused() {
        let hero = Character::new("Test Hero", CharacterClass::Warrior).unwrap();
        let config = EngineConfig {
            combat_resolution_delay: f64::NAN,
            ..config()
        };
        let snapshot = SaveSnapshot::new(hero, initial_quests());
        assert!(matches!(
            GameSession::from_snapshot(snapshot, config),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_bad_update_steps_still_reach_idle() {
        let mut session = session_with_skeleton();
        session.move_by(1, 0).unwrap();
        fight_to_victory(&mut session);

        assert!(session.update(f64::NAN).is_empty());
        assert!(session.update(-5.0).is_empty());
        assert_eq!(
            session.phase(),
            CombatPhase::Resolving {
                remaining: session.config().combat_resolution_delay
            }
        );
        assert_eq!(session.update(2.0), vec![GameEvent::CombatEnded]);
        assert_eq!(session.phase(), CombatPhase::Idle);
    }

    #[test]
    fn test_seeded_sessions_match() {
        let a = session();
        let b = session();
        assert_eq!(a.dungeon(), b.dungeon());
    }
}
