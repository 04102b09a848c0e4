//! Per-entity buff collection and its hooks.

use arrayvec::ArrayVec;

use super::{Buff, BuffId, BuffKind, SwiftOffsets};
use crate::config::BattleConfig;
use crate::env::ElementType;

/// Result of [`BuffList::add`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuffApplied {
    /// A new entry was appended.
    Added,
    /// An existing stackable entry grew to `stacks`.
    Stacked { stacks: u32 },
    /// An existing entry had its duration refreshed.
    Refreshed,
}

/// Work a turn-end hook asks the damage pipeline to perform on the owner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BuffTick {
    Heal { source: BuffId, amount: f32 },
    Damage { source: BuffId, amount: f32 },
}

/// What the turn-start hooks produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnStartOutcome {
    /// Random cards the owner should receive (Gifted).
    pub gifted_cards: u32,
    /// Buffs whose duration ran out.
    pub expired: Vec<BuffId>,
}

/// Ordered buff entries of one entity, at most one per [`BuffId`].
///
/// Insertion order is application order; every fold walks it left to right.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuffList {
    buffs: ArrayVec<Buff, { BattleConfig::MAX_BUFFS }>,
}

impl BuffList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a buff.
    ///
    /// Re-applying an id keeps the existing parameters. Stackable ids add the
    /// new stacks; every id refreshes its duration to the longer of the two,
    /// with permanent winning.
    pub fn add(&mut self, buff: Buff) -> BuffApplied {
        if let Some(existing) = self.buffs.iter_mut().find(|b| b.id() == buff.id()) {
            existing.duration = longer_duration(existing.duration, buff.duration);
            if buff.id().is_stackable() {
                existing.stacks = existing.stacks.saturating_add(buff.stacks);
                return BuffApplied::Stacked {
                    stacks: existing.stacks,
                };
            }
            return BuffApplied::Refreshed;
        }

        if self.buffs.try_push(buff).is_err() {
            // Unreachable while MAX_BUFFS covers every id.
            tracing::warn!(buff = %buff.id(), "buff list full, buff dropped");
        }
        BuffApplied::Added
    }

    pub fn remove(&mut self, id: BuffId) -> Option<Buff> {
        let index = self.buffs.iter().position(|b| b.id() == id)?;
        Some(self.buffs.remove(index))
    }

    /// Whether an active buff with this id is present.
    pub fn has(&self, id: BuffId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: BuffId) -> Option<&Buff> {
        self.buffs.iter().find(|b| b.id() == id && b.is_active())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Buff> {
        self.buffs.iter()
    }

    pub fn len(&self) -> usize {
        self.buffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffs.is_empty()
    }

    pub fn positive_count(&self) -> usize {
        self.active().filter(|b| b.id().is_positive()).count()
    }

    pub fn negative_count(&self) -> usize {
        self.active().filter(|b| !b.id().is_positive()).count()
    }

    /// Removes up to `count` negative buffs, oldest first.
    pub fn remove_debuffs(&mut self, count: usize) -> Vec<BuffId> {
        let mut removed = Vec::new();
        self.buffs.retain(|buff| {
            if removed.len() < count && !buff.id().is_positive() {
                removed.push(buff.id());
                false
            } else {
                true
            }
        });
        removed
    }

    // ========================================================================
    // Damage pipeline hooks
    // ========================================================================

    /// Folds outgoing damage through every active buff in list order.
    pub fn modify_outgoing(&self, amount: f32) -> f32 {
        self.active().fold(amount, |amount, buff| match buff.kind {
            BuffKind::IncreaseDmg { percent } => amount * (1.0 + percent / 100.0),
            BuffKind::BoostDmg { flat } => amount + flat * buff.stacks as f32,
            BuffKind::ReduceAtk { percent } => {
                (amount * (1.0 - percent / 100.0 * buff.stacks as f32)).max(0.0)
            }
            _ => amount,
        })
    }

    /// Folds incoming damage through Fragile and Guard in list order.
    ///
    /// Guard negates the first positive amount that reaches it and expires.
    pub fn modify_incoming(&mut self, amount: f32) -> f32 {
        let mut amount = amount;
        for buff in self.buffs.iter_mut().filter(|b| b.is_active()) {
            match buff.kind {
                BuffKind::Fragile { percent } => {
                    amount *= 1.0 + percent / 100.0 * buff.stacks as f32;
                }
                BuffKind::Guard if amount > 0.0 => {
                    amount = 0.0;
                    buff.expire();
                }
                _ => {}
            }
        }
        amount
    }

    /// Feeds HP lost to the Feared accumulator.
    pub fn record_damage_taken(&mut self, hp_lost: i32) {
        for buff in self.buffs.iter_mut().filter(|b| b.is_active()) {
            if let BuffKind::Feared { accumulated } = &mut buff.kind {
                *accumulated = accumulated.saturating_add(hp_lost);
            }
        }
    }

    /// Consumes an untriggered Lifesteel and returns its heal percentage.
    pub fn trigger_lifesteel(&mut self) -> Option<f32> {
        for buff in self.buffs.iter_mut().filter(|b| b.is_active()) {
            if let BuffKind::Lifesteel { percent, triggered } = &mut buff.kind {
                if *triggered {
                    continue;
                }
                *triggered = true;
                let percent = *percent;
                buff.expire();
                return Some(percent);
            }
        }
        None
    }

    /// Consumes an active Swift buff and returns its offsets.
    pub fn trigger_swift(&mut self) -> Option<SwiftOffsets> {
        let buff = self
            .buffs
            .iter_mut()
            .find(|b| b.is_active() && b.id() == BuffId::Swift)?;
        let BuffKind::Swift { offsets } = buff.kind else {
            return None;
        };
        buff.expire();
        Some(offsets)
    }

    // ========================================================================
    // Turn boundary hooks
    // ========================================================================

    /// Decrements durations, runs turn-start hooks, prunes expired buffs.
    pub fn on_turn_start(&mut self) -> TurnStartOutcome {
        let mut outcome = TurnStartOutcome::default();
        for buff in self.buffs.iter_mut() {
            if !buff.is_active() {
                continue;
            }
            if buff.duration > 0 {
                buff.duration -= 1;
            }
            match &mut buff.kind {
                BuffKind::Feared { accumulated } => *accumulated = 0,
                BuffKind::Gifted => {
                    outcome.gifted_cards = outcome.gifted_cards.saturating_add(buff.stacks)
                }
                _ => {}
            }
        }
        outcome.expired = self.prune_expired();
        outcome
    }

    /// Collects turn-end heals and damage in list order.
    ///
    /// The caller applies the ticks and then calls [`Self::prune_expired`].
    pub fn on_turn_end(&self, max_hp: i32) -> Vec<BuffTick> {
        let max_hp = max_hp as f32;
        self.active()
            .filter_map(|buff| match buff.kind {
                BuffKind::Blessed { percent } => Some(BuffTick::Heal {
                    source: BuffId::Blessed,
                    amount: max_hp * percent / 100.0,
                }),
                BuffKind::Bleeding { percent } => Some(BuffTick::Damage {
                    source: BuffId::Bleeding,
                    amount: max_hp * percent / 100.0 * buff.stacks as f32,
                }),
                BuffKind::Feared { accumulated } if accumulated > 0 => Some(BuffTick::Damage {
                    source: BuffId::Feared,
                    amount: accumulated as f32,
                }),
                _ => None,
            })
            .collect()
    }

    /// Drops every buff whose duration reached 0.
    pub fn prune_expired(&mut self) -> Vec<BuffId> {
        let mut expired = Vec::new();
        self.buffs.retain(|buff| {
            if buff.is_active() {
                true
            } else {
                expired.push(buff.id());
                false
            }
        });
        expired
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Net resistance modifier for an element from IncreaseRes / ReduceRes.
    pub fn resistance_modifier(&self, element: ElementType) -> i32 {
        let applies = |scope: Option<ElementType>| scope.is_none_or(|e| e == element);
        let scaled = |buff: &Buff, percent: i32| {
            percent.saturating_mul(i32::try_from(buff.stacks).unwrap_or(i32::MAX))
        };
        self.active()
            .map(|buff| match buff.kind {
                BuffKind::IncreaseRes {
                    element: scope,
                    percent,
                } if applies(scope) => scaled(buff, percent),
                BuffKind::ReduceRes {
                    element: scope,
                    percent,
                } if applies(scope) => scaled(buff, percent).saturating_neg(),
                _ => 0,
            })
            .fold(0, i32::saturating_add)
    }

    /// Requirement modifier carried by ReqChange, `0` if absent.
    pub fn requirement_modifier(&self) -> i32 {
        self.active()
            .find_map(|buff| match buff.kind {
                BuffKind::ReqChange { modifier } => Some(modifier),
                _ => None,
            })
            .unwrap_or(0)
    }

    fn active(&self) -> impl Iterator<Item = &Buff> {
        self.buffs.iter().filter(|b| b.is_active())
    }
}

fn longer_duration(current: i32, incoming: i32) -> i32 {
    if current < 0 || incoming < 0 {
        Buff::PERMANENT
    } else {
        current.max(incoming)
    }
}
