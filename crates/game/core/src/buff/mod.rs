//! Status effects attached to battle entities.
//!
//! A [`Buff`] pairs a [`BuffKind`] (the variant plus its per-variant data)
//! with a stack count and a duration. Each entity owns one [`BuffList`] that
//! keeps at most one entry per [`BuffId`].
//!
//! # Duration
//!
//! `duration` counts the owner's remaining turn starts. `-1` is permanent.
//! Durations only decrement in [`BuffList::on_turn_start`]; a buff whose
//! duration is `0` is inert and pruned at the next hook boundary. One-shot
//! buffs (Guard, Lifesteel, Swift) expire by setting their own duration to 0.
mod kind;
mod list;
mod spec;

pub use kind::BuffId;
pub use list::{BuffApplied, BuffList, BuffTick, TurnStartOutcome};
pub use spec::{BuffSpec, BuffSpecError, SwiftOffsets};

use crate::env::ElementType;

/// Buff variant with the data its hooks need.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuffKind {
    Guard,
    Blessed { percent: f32 },
    Lifesteel { percent: f32, triggered: bool },
    /// Inert modifier kept for display; nothing consumes it yet.
    ReqChange { modifier: i32 },
    IncreaseDmg { percent: f32 },
    BoostDmg { flat: f32 },
    /// `element == None` applies to every element.
    IncreaseRes { element: Option<ElementType>, percent: i32 },
    Gifted,
    Swift { offsets: SwiftOffsets },
    ReduceRes { element: Option<ElementType>, percent: i32 },
    Fragile { percent: f32 },
    Bleeding { percent: f32 },
    /// Damage taken since the last turn start.
    Feared { accumulated: i32 },
    ReduceAtk { percent: f32 },
    Cursed,
}

impl BuffKind {
    pub const fn id(&self) -> BuffId {
        match self {
            BuffKind::Guard => BuffId::Guard,
            BuffKind::Blessed { .. } => BuffId::Blessed,
            BuffKind::Lifesteel { .. } => BuffId::Lifesteel,
            BuffKind::ReqChange { .. } => BuffId::ReqChange,
            BuffKind::IncreaseDmg { .. } => BuffId::IncreaseDmg,
            BuffKind::BoostDmg { .. } => BuffId::BoostDmg,
            BuffKind::IncreaseRes { .. } => BuffId::IncreaseRes,
            BuffKind::Gifted => BuffId::Gifted,
            BuffKind::Swift { .. } => BuffId::Swift,
            BuffKind::ReduceRes { .. } => BuffId::ReduceRes,
            BuffKind::Fragile { .. } => BuffId::Fragile,
            BuffKind::Bleeding { .. } => BuffId::Bleeding,
            BuffKind::Feared { .. } => BuffId::Feared,
            BuffKind::ReduceAtk { .. } => BuffId::ReduceAtk,
            BuffKind::Cursed => BuffId::Cursed,
        }
    }
}

/// A buff instance on one entity.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Buff {
    pub kind: BuffKind,
    /// Always `1` for non-stackable variants.
    pub stacks: u32,
    /// Remaining turn starts; `-1` is permanent.
    pub duration: i32,
}

impl Buff {
    pub const PERMANENT: i32 = -1;

    pub fn new(kind: BuffKind, stacks: u32, duration: i32) -> Self {
        let stacks = if kind.id().is_stackable() {
            stacks.max(1)
        } else {
            1
        };
        let duration = if duration < 0 { Self::PERMANENT } else { duration };
        Self {
            kind,
            stacks,
            duration,
        }
    }

    pub const fn id(&self) -> BuffId {
        self.kind.id()
    }

    pub const fn is_permanent(&self) -> bool {
        self.duration < 0
    }

    /// Buffs at duration 0 no longer take part in any hook.
    pub const fn is_active(&self) -> bool {
        self.duration != 0
    }

    fn expire(&mut self) {
        self.duration = 0;
    }
}
