//! Buff identifiers and their static traits.

/// Named buff variants. Parsed case-insensitively from effect values.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum BuffId {
    // ========================================================================
    // Positive
    // ========================================================================
    /// Negates the first incoming hit, then expires.
    Guard,
    /// Heals a percentage of max HP at turn end.
    Blessed,
    /// Heals on the first landed hit, then expires.
    Lifesteel,
    /// Carries a requirement modifier for the next card.
    ReqChange,
    /// Multiplies outgoing damage.
    IncreaseDmg,
    /// Adds flat outgoing damage per stack.
    BoostDmg,
    /// Raises elemental resistance per stack.
    IncreaseRes,
    /// Grants random cards at turn start.
    Gifted,
    /// Casts neighbouring hand cards along with the next played card.
    Swift,

    // ========================================================================
    // Negative
    // ========================================================================
    /// Lowers elemental resistance per stack.
    ReduceRes,
    /// Multiplies incoming damage per stack.
    Fragile,
    /// Loses a percentage of max HP per stack at turn end.
    Bleeding,
    /// Re-suffers the damage taken this turn at turn end.
    Feared,
    /// Reduces outgoing damage per stack.
    ReduceAtk,
    /// Blocks all healing.
    Cursed,
}

impl BuffId {
    /// Whether re-application adds to the stack count.
    pub const fn is_stackable(&self) -> bool {
        matches!(
            self,
            BuffId::BoostDmg
                | BuffId::IncreaseRes
                | BuffId::ReduceRes
                | BuffId::Fragile
                | BuffId::Bleeding
                | BuffId::ReduceAtk
                | BuffId::Gifted
        )
    }

    /// Positive buffs survive cleansing.
    pub const fn is_positive(&self) -> bool {
        !matches!(
            self,
            BuffId::ReduceRes
                | BuffId::Fragile
                | BuffId::Bleeding
                | BuffId::Feared
                | BuffId::ReduceAtk
                | BuffId::Cursed
        )
    }
}
