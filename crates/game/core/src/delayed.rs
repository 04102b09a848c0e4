//! Delayed damage queue.
//!
//! Entries are queued by `DelaySingleDamage` / `DelayAOEDamage` and resolved
//! at player-turn starts. The damage amount is locked in at cast time: the
//! caster's buffs are not consulted again, only the defender's incoming
//! modifiers apply when it lands.

use crate::combat;
use crate::env::ElementType;
use crate::state::{BattleEvent, BattleState, EntityId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DelayedMode {
    /// Hits one fixed target, fizzling if it is gone.
    Single,
    /// Hits every enemy alive at trigger time, or the player when the
    /// effect was cast by an enemy.
    AreaOfAllEnemies,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DelayedEffect {
    pub mode: DelayedMode,
    pub caster: EntityId,
    pub damage: f32,
    /// Turn starts left; the effect fires once this reaches 0 or below.
    pub remaining: i32,
    pub target: Option<EntityId>,
    pub element: ElementType,
    pub targets_player: bool,
}

impl DelayedEffect {
    pub fn single(caster: EntityId, target: EntityId, damage: f32, turns: i32) -> Self {
        Self {
            mode: DelayedMode::Single,
            caster,
            damage,
            remaining: turns,
            target: Some(target),
            element: ElementType::Neutral,
            targets_player: target.is_player(),
        }
    }

    pub fn area(caster: EntityId, damage: f32, turns: i32) -> Self {
        Self {
            mode: DelayedMode::AreaOfAllEnemies,
            caster,
            damage,
            remaining: turns,
            target: None,
            element: ElementType::Neutral,
            targets_player: !caster.is_player(),
        }
    }

    pub fn with_element(mut self, element: ElementType) -> Self {
        self.element = element;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DelayedQueue {
    effects: Vec<DelayedEffect>,
}

impl DelayedQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: DelayedEffect) {
        self.effects.push(effect);
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DelayedEffect> {
        self.effects.iter()
    }

    /// Decrements every counter and removes the entries that are due, in
    /// queue order.
    pub fn tick(&mut self) -> Vec<DelayedEffect> {
        for effect in &mut self.effects {
            effect.remaining = effect.remaining.saturating_sub(1);
        }
        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.effects)
            .into_iter()
            .partition(|effect| effect.remaining <= 0);
        self.effects = pending;
        due
    }
}

/// Queues a delayed effect and records it.
pub fn enqueue(state: &mut BattleState, effect: DelayedEffect) {
    tracing::debug!(
        caster = %effect.caster,
        damage = effect.damage,
        turns = effect.remaining,
        mode = ?effect.mode,
        "delayed effect queued"
    );
    state.emit(BattleEvent::DelayedQueued {
        caster: effect.caster,
        damage: effect.damage,
        turns: effect.remaining,
    });
    state.delayed.push(effect);
}

/// Turn-start hook of the queue: fires every entry that came due.
pub fn on_turn_start(state: &mut BattleState) {
    for effect in state.delayed.tick() {
        let targets = match effect.mode {
            DelayedMode::Single => match effect.target {
                Some(target) if state.is_alive(target) => vec![target],
                _ => {
                    tracing::debug!(caster = %effect.caster, "delayed effect fizzled");
                    continue;
                }
            },
            DelayedMode::AreaOfAllEnemies if effect.targets_player => {
                state.opponents_of(effect.caster)
            }
            DelayedMode::AreaOfAllEnemies => state.living_enemies(),
        };

        state.emit(BattleEvent::DelayedFired {
            caster: effect.caster,
            damage: effect.damage,
        });
        for target in targets {
            combat::apply_damage(state, target, effect.damage);
        }
    }
}
