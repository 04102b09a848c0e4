/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Starting and maximum HP of the player.
    pub player_max_hp: i32,

    /// Cards drawn when the player turn begins.
    pub hand_size: u32,

    /// Action points restored at the start of every player turn.
    pub max_action_point: i32,

    /// Starting value of both the angel and the demon gauge.
    pub gauge_default: i32,

    /// Maximum nesting of card re-execution (CastMore, Swift).
    /// Chains deeper than this are cut off with a warning.
    pub max_chain_depth: u32,

    /// Turn cap used by headless drivers. `0` means unlimited; the engine
    /// itself never ends a battle on turn count.
    pub turn_limit: u32,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_EFFECT_SLOTS: usize = 4;
    pub const MAX_SKILL_EFFECT_SLOTS: usize = 3;
    pub const MAX_ENEMY_SKILLS: usize = 3;
    pub const MAX_BEHAVIOR_SKILLS: usize = 6;
    pub const MAX_BEHAVIOR_RULES: usize = 4;
    /// One slot per buff id.
    pub const MAX_BUFFS: usize = 16;

    // ===== gauge bounds =====
    pub const GAUGE_MIN: i32 = 0;
    pub const GAUGE_MAX: i32 = 100;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_PLAYER_MAX_HP: i32 = 100;
    pub const DEFAULT_HAND_SIZE: u32 = 5;
    pub const DEFAULT_MAX_ACTION_POINT: i32 = 3;
    pub const DEFAULT_GAUGE: i32 = 50;
    pub const DEFAULT_MAX_CHAIN_DEPTH: u32 = 4;

    pub fn new() -> Self {
        Self {
            player_max_hp: Self::DEFAULT_PLAYER_MAX_HP,
            hand_size: Self::DEFAULT_HAND_SIZE,
            max_action_point: Self::DEFAULT_MAX_ACTION_POINT,
            gauge_default: Self::DEFAULT_GAUGE,
            max_chain_depth: Self::DEFAULT_MAX_CHAIN_DEPTH,
            turn_limit: 0,
        }
    }

    pub fn with_hand_size(mut self, hand_size: u32) -> Self {
        self.hand_size = hand_size;
        self
    }

    pub fn with_player_max_hp(mut self, player_max_hp: i32) -> Self {
        self.player_max_hp = player_max_hp;
        self
    }

    pub fn with_max_chain_depth(mut self, max_chain_depth: u32) -> Self {
        self.max_chain_depth = max_chain_depth;
        self
    }

    pub fn with_max_action_point(mut self, max_action_point: i32) -> Self {
        self.max_action_point = max_action_point;
        self
    }

    /// Clamps a gauge value into `[GAUGE_MIN, GAUGE_MAX]`.
    pub fn clamp_gauge(value: i32) -> i32 {
        value.clamp(Self::GAUGE_MIN, Self::GAUGE_MAX)
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
