/// Phases of the battle state machine.
///
/// `BattleStart → PlayerTurn → EnemyTurn → PlayerTurn → … → BattleEnd`.
/// `BattleEnd` is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattlePhase {
    #[default]
    BattleStart,
    PlayerTurn,
    EnemyTurn,
    BattleEnd,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleOutcome {
    Victory,
    Defeat,
}
