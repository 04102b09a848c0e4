//! Intent selection and resolution.
//!
//! Selection runs in three steps:
//!
//! 1. **Candidates**: one per behavior weight slot, starting at its base
//!    weight. Without a behavior row every skill is a candidate of weight 1.
//! 2. **Rules**: each satisfied condition adds its bonus to the slot it
//!    names. Skills that are not unlocked drop to weight 0.
//! 3. **Draw**: a weighted-random pick among positive weights. No positive
//!    weight means the enemy idles next turn.

use crate::effect::execute_skill;
use crate::env::RowId;
use crate::requirement::{RequirementSubjects, condition_holds, requirement_met};
use crate::state::{BattleEvent, BattleState, EnemyState, EntityId};

use super::behavior::{RuleResult, WeightSlot};

/// A skill the enemy may pick, with its final weight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillCandidate {
    /// `None` for a weight slot that did not parse.
    pub skill_id: Option<RowId>,
    pub weight: u32,
}

/// Scores every skill slot of `enemy`. Empty for unknown or dead enemies.
pub fn candidates(state: &BattleState, enemy: EntityId) -> Vec<SkillCandidate> {
    let Some(me) = state.enemy(enemy).filter(|e| e.is_alive()) else {
        return Vec::new();
    };

    let Some(behavior) = &me.behavior else {
        return me
            .skills
            .iter()
            .map(|skill| SkillCandidate {
                skill_id: Some(skill.row.id.clone()),
                weight: u32::from(is_unlocked(state, me, &skill.row.id)),
            })
            .collect();
    };

    let mut scored: Vec<(Option<RowId>, i64)> = behavior
        .skill_weights
        .iter()
        .map(|raw| match raw.parse::<WeightSlot>() {
            Ok(slot) => (Some(slot.skill_id), i64::from(slot.weight)),
            Err(error) => {
                tracing::warn!(behavior = %behavior.id, slot = %raw, %error, "malformed weight slot");
                (None, 0)
            }
        })
        .collect();

    for rule in &behavior.rules {
        if rule.condition.trim().is_empty() || !condition_holds(&rule.condition, state, enemy) {
            continue;
        }
        match rule.result.parse::<RuleResult>() {
            Ok(result) => match scored.get_mut(result.slot) {
                Some((_, weight)) => *weight += i64::from(result.bonus),
                None => tracing::warn!(
                    behavior = %behavior.id,
                    slot = result.slot + 1,
                    "rule result names a missing weight slot"
                ),
            },
            Err(error) => {
                tracing::warn!(behavior = %behavior.id, result = %rule.result, %error, "malformed rule result");
            }
        }
    }

    scored
        .into_iter()
        .map(|(skill_id, weight)| {
            let unlocked = skill_id
                .as_deref()
                .is_some_and(|id| is_unlocked(state, me, id));
            let weight = if unlocked {
                u32::try_from(weight.max(0)).unwrap_or(u32::MAX)
            } else {
                0
            };
            SkillCandidate { skill_id, weight }
        })
        .collect()
}

fn is_unlocked(state: &BattleState, me: &EnemyState, skill_id: &str) -> bool {
    let Some(skill) = me.skill(skill_id) else {
        tracing::warn!(enemy = %me.id(), skill = skill_id, "behavior names a skill the enemy lacks");
        return false;
    };
    let subjects = RequirementSubjects::of(state, me.id(), false);
    requirement_met(&skill.requirement, &subjects)
}

/// Picks and stores the next intent of `enemy`.
pub fn choose_intent(state: &mut BattleState, enemy: EntityId) -> Option<RowId> {
    let candidates = candidates(state, enemy);
    let weights: Vec<u32> = candidates.iter().map(|c| c.weight).collect();
    let intent = state
        .rng
        .weighted_index(&weights)
        .and_then(|index| candidates.get(index))
        .and_then(|candidate| candidate.skill_id.clone());

    let me = state.enemy_mut(enemy)?;
    me.intent = intent.clone();
    tracing::debug!(%enemy, intent = ?intent, "intent chosen");
    state.emit(BattleEvent::IntentChosen {
        enemy,
        skill: intent.clone(),
    });
    intent
}

/// Recomputes the intent of every living enemy, in battle order.
pub fn refresh_intents(state: &mut BattleState) {
    for enemy in state.living_enemies() {
        choose_intent(state, enemy);
    }
}

/// Resolves the stored intent of `enemy` against the player.
///
/// Returns whether the skill killed something. An enemy without an intent
/// idles.
pub fn perform_intent(state: &mut BattleState, enemy: EntityId) -> bool {
    let Some(me) = state.enemy_mut(enemy).filter(|e| e.is_alive()) else {
        return false;
    };
    let Some(skill) = me.intent_skill().cloned() else {
        tracing::debug!(%enemy, "no intent, idling");
        return false;
    };
    me.cast_count += 1;
    let base_atk = me.data.base_atk;

    tracing::debug!(%enemy, skill = %skill.row.id, "enemy uses skill");
    state.emit(BattleEvent::SkillUsed {
        enemy,
        skill: skill.row.id.clone(),
    });
    execute_skill(state, enemy, &skill.row, base_atk)
}
