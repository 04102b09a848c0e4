use crate::env::{EffectSlot, EffectType, ElementType};
use crate::state::{BattleState, CardInstanceId, EntityId, HandAnchor};

/// The card whose slots are resolving.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardSource {
    pub instance: CardInstanceId,
    /// Where adjacency for `CastMore` is measured from.
    pub anchor: HandAnchor,
}

/// Context for one card or skill resolution.
///
/// Lives for a single `execute_*` call and is never stored. Nested
/// re-execution (CastMore, Swift) builds a child context with `depth + 1`
/// over the same state.
pub struct EffectContext<'a> {
    /// The entity performing the effects.
    pub caster: EntityId,

    /// Chosen target, if any. Enemy casters always target the player.
    pub target: Option<EntityId>,

    /// Mutable battle state.
    pub state: &'a mut BattleState,

    /// Effect slots of the resolving card or skill, in slot order.
    pub slots: &'a [EffectSlot],

    /// Index of the first `SpendRepeatTheRest` slot.
    pub spend_repeat_index: Option<usize>,

    /// `None` for enemy skills.
    pub card: Option<CardSource>,

    pub element: ElementType,

    /// Set by any effect that brings an entity from positive HP to 0.
    pub kill_occurred: bool,

    /// Re-execution nesting level; 0 for the played card.
    pub depth: u32,
}

impl<'a> EffectContext<'a> {
    pub fn new(
        caster: EntityId,
        target: Option<EntityId>,
        state: &'a mut BattleState,
        slots: &'a [EffectSlot],
    ) -> Self {
        Self {
            caster,
            target,
            state,
            slots,
            spend_repeat_index: slots
                .iter()
                .position(|slot| slot.effect_type == EffectType::SpendRepeatTheRest),
            card: None,
            element: ElementType::Neutral,
            kill_occurred: false,
            depth: 0,
        }
    }

    pub fn with_card(mut self, card: CardSource, element: ElementType) -> Self {
        self.card = Some(card);
        self.element = element;
        self
    }

    /// The target a single-target effect should hit.
    ///
    /// Enemy casters always hit the player. Dead targets resolve to `None`.
    pub fn single_target(&self) -> Option<EntityId> {
        let target = if self.caster.is_player() {
            self.target?
        } else {
            EntityId::PLAYER
        };
        self.state.is_alive(target).then_some(target)
    }
}
