use serde::{Deserialize, Serialize};

use crate::items::{find_item, Item};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestKind {
    Kill,
    Collect,
    Explore,
}

/// Where an objective's progress comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectiveTracking {
    /// Advanced from outside through `advance_objective`
    Counter,
    /// Mirrors the character's level
    CharacterLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    pub description: String,
    pub current: u32,
    pub target: u32,
    pub completed: bool,
    pub tracking: ObjectiveTracking,
}

impl Objective {
    pub fn new(description: &str, current: u32, target: u32, tracking: ObjectiveTracking) -> Self {
        Self {
            description: description.to_string(),
            current,
            target,
            completed: current >= target,
            tracking,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestRewards {
    pub experience: u32,
    pub gold: u32,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: QuestKind,
    pub objectives: Vec<Objective>,
    pub rewards: QuestRewards,
    /// One-way: never goes back to false
    pub is_completed: bool,
    pub is_active: bool,
    pub rewards_claimed: bool,
}

impl Quest {
    /// Quests that still take progress.
    pub fn is_tracking(&self) -> bool {
        self.is_active && !self.is_completed
    }

    pub fn all_objectives_completed(&self) -> bool {
        self.objectives.iter().all(|o| o.completed)
    }
}

/// Quest log a new character starts with.
pub fn initial_quests() -> Vec<Quest> {
    vec![
        Quest {
            id: "quest_1".to_string(),
            title: "Clear the Dungeon".to_string(),
            description: "Slay 5 monsters lurking in the depths.".to_string(),
            kind: QuestKind::Kill,
            objectives: vec![Objective::new(
                "Monsters slain",
                0,
                5,
                ObjectiveTracking::Counter,
            )],
            rewards: QuestRewards {
                experience: 100,
                gold: 50,
                items: Vec::new(),
            },
            is_completed: false,
            is_active: true,
            rewards_claimed: false,
        },
        Quest {
            id: "quest_2".to_string(),
            title: "Growing Stronger".to_string(),
            description: "Reach level 3.".to_string(),
            kind: QuestKind::Explore,
            objectives: vec![Objective::new(
                "Reach level 3",
                1,
                3,
                ObjectiveTracking::CharacterLevel,
            )],
            rewards: QuestRewards {
                experience: 200,
                gold: 100,
                items: find_item("staff_1").into_iter().collect(),
            },
            is_completed: false,
            is_active: true,
            rewards_claimed: false,
        },
    ]
}
