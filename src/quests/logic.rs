//! Quest progress recomputation and rewards.

use log::info;

use super::types::{ObjectiveTracking, Quest};
use crate::character::{gain_experience, Character};
use crate::core::error::Rejection;

/// Recomputes every tracking quest from the character snapshot.
///
/// Level objectives mirror `character.level`; counter objectives keep their
/// externally advanced value. A quest whose objectives are all complete
/// becomes completed and is never touched again.
pub fn recompute_quests(quests: &[Quest], character: &Character) -> Vec<Quest> {
    quests
        .iter()
        .map(|quest| {
            if !quest.is_tracking() {
                return quest.clone();
            }
            let mut quest = quest.clone();
            for objective in &mut quest.objectives {
                if objective.tracking == ObjectiveTracking::CharacterLevel {
                    objective.current = character.level;
                }
                objective.completed = objective.current >= objective.target;
            }
            if quest.all_objectives_completed() {
                quest.is_completed = true;
                info!("quest completed: {}", quest.title);
            }
            quest
        })
        .collect()
}

/// Adds `amount` to every counter objective of a tracking quest.
///
/// Completion is left to the next [`recompute_quests`] pass.
pub fn advance_objective(
    quests: &[Quest],
    quest_id: &str,
    amount: u32,
) -> Result<Vec<Quest>, Rejection> {
    if !quests.iter().any(|q| q.id == quest_id) {
        return Err(Rejection::QuestNotFound {
            quest_id: quest_id.to_string(),
        });
    }

    Ok(quests
        .iter()
        .map(|quest| {
            let mut quest = quest.clone();
            if quest.id == quest_id && quest.is_tracking() {
                for objective in &mut quest.objectives {
                    if objective.tracking == ObjectiveTracking::Counter {
                        objective.current = objective.current.saturating_add(amount);
                    }
                }
            }
            quest
        })
        .collect())
}

pub fn active_quests(quests: &[Quest]) -> Vec<&Quest> {
    quests.iter().filter(|q| q.is_tracking()).collect()
}

pub fn completed_quests(quests: &[Quest]) -> Vec<&Quest> {
    quests.iter().filter(|q| q.is_completed).collect()
}

/// Pays a completed quest's rewards once.
///
/// Experience goes through the regular progression rule, so at most one
/// level is gained. The returned quest is marked claimed and inactive.
pub fn claim_quest_rewards(
    character: &Character,
    quest: &Quest,
) -> Result<(Character, Quest), Rejection> {
    if !quest.is_completed {
        return Err(Rejection::QuestNotCompleted {
            quest_id: quest.id.clone(),
        });
    }
    if quest.rewards_claimed {
        return Err(Rejection::RewardsAlreadyClaimed {
            quest_id: quest.id.clone(),
        });
    }

    let mut updated = character.clone();
    updated.gold = updated.gold.saturating_add(quest.rewards.gold);
    updated.inventory.extend(quest.rewards.items.iter().cloned());
    let (updated, _) = gain_experience(updated, quest.rewards.experience);

    let mut quest = quest.clone();
    quest.rewards_claimed = true;
    quest.is_active = false;

    info!(
        "{} claimed {}: +{} xp, +{} gold, {} item(s)",
        updated.name,
        quest.title,
        quest.rewards.experience,
        quest.rewards.gold,
        quest.rewards.items.len()
    );
    Ok((updated, quest))
}
