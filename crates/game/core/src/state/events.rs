//! Change notifications for the presentation layer.
//!
//! The engine appends events as it mutates state and never reads them back.

use super::card::CardInstanceId;
use super::entity::EntityId;
use super::piles::Pile;
use super::turn::{BattleOutcome, BattlePhase};
use crate::buff::BuffId;
use crate::env::RowId;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    PhaseChanged {
        phase: BattlePhase,
    },
    TurnStarted {
        turn: u32,
    },
    CardPlayed {
        card: CardInstanceId,
        row: RowId,
        target: Option<EntityId>,
    },
    /// A card's effect slots ran again through CastMore or Swift.
    CardEchoed {
        card: CardInstanceId,
        row: RowId,
    },
    CardsDrawn {
        cards: Vec<CardInstanceId>,
    },
    DeckReshuffled,
    CardsDiscarded {
        cards: Vec<CardInstanceId>,
    },
    CardsDestroyed {
        pile: Pile,
        cards: Vec<CardInstanceId>,
    },
    CardsGranted {
        cards: Vec<CardInstanceId>,
    },
    CostReduced {
        card: CardInstanceId,
        cost: i32,
    },
    Damaged {
        target: EntityId,
        absorbed: i32,
        hp_lost: i32,
        killed: bool,
    },
    Healed {
        target: EntityId,
        amount: i32,
    },
    BuffApplied {
        target: EntityId,
        buff: BuffId,
        stacks: u32,
    },
    BuffExpired {
        target: EntityId,
        buff: BuffId,
    },
    GaugesChanged {
        angel: i32,
        demon: i32,
    },
    ActionPointsChanged {
        action_point: i32,
    },
    DelayedQueued {
        caster: EntityId,
        damage: f32,
        turns: i32,
    },
    DelayedFired {
        caster: EntityId,
        damage: f32,
    },
    IntentChosen {
        enemy: EntityId,
        skill: Option<RowId>,
    },
    SkillUsed {
        enemy: EntityId,
        skill: RowId,
    },
    BattleEnded {
        outcome: BattleOutcome,
    },
}
