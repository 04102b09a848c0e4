//! Static card rows.
//!
//! A card row is consumed exactly as it was parsed from the spreadsheet: the
//! effect type is a closed enum, but the effect value and requirement stay
//! plain text and are interpreted at execution time.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;

/// Identifier of a static row (card, enemy, behavior or skill).
pub type RowId = String;

/// Elemental tag carried by cards and delayed effects.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum ElementType {
    #[default]
    Neutral,
    Fire,
    Water,
    Earth,
    Wind,
    Lightning,
}

impl ElementType {
    /// Elements that enemies carry a resistance percentage for.
    pub const RESISTED: [ElementType; 5] = [
        ElementType::Fire,
        ElementType::Water,
        ElementType::Earth,
        ElementType::Wind,
        ElementType::Lightning,
    ];
}

/// Which side of the angel/demon split a card belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Faction {
    #[default]
    Neutral,
    Angel,
    Demon,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Rarity {
    #[default]
    Common,
    Rare,
    Epic,
    Legendary,
}

/// Effect types that may appear in a card or skill effect slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum EffectType {
    /// Empty slot.
    #[default]
    None,
    SingleDamage,
    #[strum(serialize = "AOEDamage")]
    #[cfg_attr(feature = "serde", serde(rename = "AOEDamage"))]
    AoeDamage,
    SelfDamage,
    SelfFlatHeal,
    SelfPercHeal,
    AvalueInc,
    AvalueDec,
    DvalueInc,
    DvalueDec,
    GainAction,
    ReduceCost,
    InstDraw,
    DeckBurn,
    HandBurn,
    CleanseSelf,
    SelfBuff,
    TargetSingleBuff,
    #[strum(serialize = "TargetAOEBuff")]
    #[cfg_attr(feature = "serde", serde(rename = "TargetAOEBuff"))]
    TargetAoeBuff,
    CastMore,
    DelaySingleDamage,
    #[strum(serialize = "DelayAOEDamage")]
    #[cfg_attr(feature = "serde", serde(rename = "DelayAOEDamage"))]
    DelayAoeDamage,
    SpendRepeatTheRest,
}

impl EffectType {
    /// Types whose value is a flat damage amount scaled by an enemy's base attack.
    pub fn is_flat_damage(&self) -> bool {
        matches!(
            self,
            EffectType::SingleDamage | EffectType::AoeDamage | EffectType::SelfDamage
        )
    }
}

/// One `(EffectType, EffectValue, EffectRequirement)` triple of a card row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectSlot {
    pub effect_type: EffectType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub requirement: String,
}

impl EffectSlot {
    pub fn new(
        effect_type: EffectType,
        value: impl Into<String>,
        requirement: impl Into<String>,
    ) -> Self {
        Self {
            effect_type,
            value: value.into(),
            requirement: requirement.into(),
        }
    }

    /// Slot without a requirement.
    pub fn unconditional(effect_type: EffectType, value: impl Into<String>) -> Self {
        Self::new(effect_type, value, "")
    }

    pub fn is_empty(&self) -> bool {
        self.effect_type == EffectType::None
    }
}

/// Static card definition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardRow {
    pub id: RowId,
    pub display_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub element: ElementType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub faction: Faction,
    #[cfg_attr(feature = "serde", serde(default))]
    pub god_type: String,
    /// Angel gauge delta applied after every effect slot resolved.
    #[cfg_attr(feature = "serde", serde(default))]
    pub avalue_inc: i32,
    /// Demon gauge delta applied after every effect slot resolved.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dvalue_inc: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Rarity,
    pub action_cost: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: ArrayVec<EffectSlot, { BattleConfig::MAX_EFFECT_SLOTS }>,
}

impl CardRow {
    pub fn new(id: impl Into<RowId>, display_name: impl Into<String>, action_cost: i32) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            action_cost,
            ..Self::default()
        }
    }

    /// Builder: append an effect slot. Slots beyond the fourth are dropped.
    pub fn with_effect(
        mut self,
        effect_type: EffectType,
        value: impl Into<String>,
        requirement: impl Into<String>,
    ) -> Self {
        if self.effects.try_push(EffectSlot::new(effect_type, value, requirement)).is_err() {
            tracing::warn!(card = %self.id, "card row already has four effect slots");
        }
        self
    }

    /// Builder: set the fixed gauge deltas.
    pub fn with_gauges(mut self, avalue_inc: i32, dvalue_inc: i32) -> Self {
        self.avalue_inc = avalue_inc;
        self.dvalue_inc = dvalue_inc;
        self
    }

    pub fn with_element(mut self, element: ElementType) -> Self {
        self.element = element;
        self
    }
}
