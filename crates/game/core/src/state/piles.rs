//! The player's card piles.
//!
//! Every card instance lives in exactly one of: draw pile, hand, discard
//! pile, destroyed set, or the in-play slot that holds the card currently
//! resolving. Moves go through the methods below, so no instance is ever
//! duplicated. Only Gifted grants add new instances.

use std::sync::Arc;

use super::card::{CardInstance, CardInstanceId};
use crate::env::{BattleRng, CardRow};

/// Piles that random destruction can target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pile {
    Draw,
    Hand,
    Discard,
}

/// Direction for adjacency lookups (`CastMore`, Swift).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Side {
    Left,
    Right,
}

/// Hand position adjacency is measured from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandAnchor {
    /// The played card's former index; it has already left the hand.
    Played(usize),
    /// A card still in hand at this index.
    Held(usize),
}

impl HandAnchor {
    /// Hand index `distance` cards toward `side`, if it can exist.
    pub fn offset(self, side: Side, distance: usize) -> Option<usize> {
        if distance == 0 {
            return None;
        }
        match (self, side) {
            (HandAnchor::Played(i) | HandAnchor::Held(i), Side::Left) => i.checked_sub(distance),
            (HandAnchor::Played(i), Side::Right) => Some(i + distance - 1),
            (HandAnchor::Held(i), Side::Right) => Some(i + distance),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PileCounts {
    pub draw: usize,
    pub hand: usize,
    pub discard: usize,
    pub destroyed: usize,
    pub in_play: usize,
}

impl PileCounts {
    pub fn total(&self) -> usize {
        self.draw + self.hand + self.discard + self.destroyed + self.in_play
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DrawOutcome {
    pub drawn: Vec<CardInstanceId>,
    /// Whether the discard pile was shuffled back in.
    pub reshuffled: bool,
}

#[derive(Clone, Debug, Default)]
pub struct DeckPiles {
    /// The last element is the top of the pile.
    draw: Vec<CardInstance>,
    hand: Vec<CardInstance>,
    discard: Vec<CardInstance>,
    destroyed: Vec<CardInstance>,
    in_play: Option<CardInstance>,
    next_id: u32,
}

impl DeckPiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a draw pile whose first row is drawn first.
    pub fn from_rows(rows: impl IntoIterator<Item = Arc<CardRow>>) -> Self {
        let mut piles = Self::new();
        let mut cards: Vec<_> = rows.into_iter().map(|row| piles.mint(row)).collect();
        cards.reverse();
        piles.draw = cards;
        piles
    }

    fn mint(&mut self, row: Arc<CardRow>) -> CardInstance {
        let id = CardInstanceId(self.next_id);
        self.next_id += 1;
        CardInstance::new(id, row)
    }

    pub fn shuffle_draw(&mut self, rng: &mut BattleRng) {
        rng.shuffle(&mut self.draw);
    }

    /// Draws up to `n` cards into the hand.
    ///
    /// An empty draw pile is refilled from the shuffled discard pile. When
    /// both are empty the draw stops early.
    pub fn draw(&mut self, n: u32, rng: &mut BattleRng) -> DrawOutcome {
        let mut outcome = DrawOutcome::default();
        for _ in 0..n {
            if self.draw.is_empty() {
                if self.discard.is_empty() {
                    break;
                }
                self.draw.append(&mut self.discard);
                rng.shuffle(&mut self.draw);
                outcome.reshuffled = true;
            }
            if let Some(card) = self.draw.pop() {
                outcome.drawn.push(card.id);
                self.hand.push(card);
            }
        }
        outcome
    }

    /// Moves one card from hand to discard. Unknown ids are a logged no-op.
    pub fn discard(&mut self, id: CardInstanceId) -> bool {
        let Some(index) = self.hand_index(id) else {
            tracing::warn!(card = %id, "discard requested for card not in hand");
            return false;
        };
        let card = self.hand.remove(index);
        self.discard.push(card);
        true
    }

    pub fn discard_hand(&mut self) -> Vec<CardInstanceId> {
        let ids = self.hand.iter().map(|c| c.id).collect();
        self.discard.append(&mut self.hand);
        ids
    }

    /// Moves up to `n` uniformly chosen cards of `pile` to the destroyed set.
    pub fn destroy_random(
        &mut self,
        pile: Pile,
        n: u32,
        rng: &mut BattleRng,
    ) -> Vec<CardInstanceId> {
        let mut destroyed = Vec::new();
        for _ in 0..n {
            let cards = self.pile_mut(pile);
            let Some(index) = rng.index(cards.len()) else {
                break;
            };
            let card = cards.remove(index);
            destroyed.push(card.id);
            self.destroyed.push(card);
        }
        destroyed
    }

    /// Adds `n` fresh instances of random pool rows to the hand.
    pub fn grant_random(
        &mut self,
        pool: &[Arc<CardRow>],
        n: u32,
        rng: &mut BattleRng,
    ) -> Vec<CardInstanceId> {
        let mut granted = Vec::new();
        for _ in 0..n {
            let Some(index) = rng.index(pool.len()) else {
                break;
            };
            let card = self.mint(Arc::clone(&pool[index]));
            granted.push(card.id);
            self.hand.push(card);
        }
        granted
    }

    /// Moves a hand card to the in-play slot; returns its former hand index.
    pub fn begin_play(&mut self, id: CardInstanceId) -> Option<usize> {
        let index = self.hand_index(id)?;
        let card = self.hand.remove(index);
        if let Some(stale) = self.in_play.replace(card) {
            tracing::warn!(card = %stale.id, "in-play slot was occupied, discarding");
            self.discard.push(stale);
        }
        Some(index)
    }

    /// Moves the resolved card from the in-play slot to the discard pile.
    pub fn finish_play(&mut self) -> Option<CardInstanceId> {
        let card = self.in_play.take()?;
        let id = card.id;
        self.discard.push(card);
        Some(id)
    }

    pub fn in_play(&self) -> Option<&CardInstance> {
        self.in_play.as_ref()
    }

    pub fn in_play_mut(&mut self) -> Option<&mut CardInstance> {
        self.in_play.as_mut()
    }

    /// The in-play card or a hand card with this id.
    pub fn active_card_mut(&mut self, id: CardInstanceId) -> Option<&mut CardInstance> {
        if self.in_play.as_ref().is_some_and(|c| c.id == id) {
            return self.in_play.as_mut();
        }
        self.hand.iter_mut().find(|c| c.id == id)
    }

    /// Hand card `distance` positions toward `side` of `anchor`.
    pub fn neighbor(
        &self,
        anchor: HandAnchor,
        side: Side,
        distance: usize,
    ) -> Option<(usize, &CardInstance)> {
        let index = anchor.offset(side, distance)?;
        self.hand.get(index).map(|card| (index, card))
    }

    pub fn hand(&self) -> &[CardInstance] {
        &self.hand
    }

    pub fn hand_mut(&mut self) -> &mut [CardInstance] {
        &mut self.hand
    }

    pub fn draw_pile(&self) -> &[CardInstance] {
        &self.draw
    }

    pub fn discard_pile(&self) -> &[CardInstance] {
        &self.discard
    }

    pub fn destroyed(&self) -> &[CardInstance] {
        &self.destroyed
    }

    pub fn hand_index(&self, id: CardInstanceId) -> Option<usize> {
        self.hand.iter().position(|c| c.id == id)
    }

    pub fn counts(&self) -> PileCounts {
        PileCounts {
            draw: self.draw.len(),
            hand: self.hand.len(),
            discard: self.discard.len(),
            destroyed: self.destroyed.len(),
            in_play: usize::from(self.in_play.is_some()),
        }
    }

    /// Every instance id across all piles, destroyed set included.
    pub fn all_ids(&self) -> impl Iterator<Item = CardInstanceId> + '_ {
        self.draw
            .iter()
            .chain(&self.hand)
            .chain(&self.discard)
            .chain(&self.destroyed)
            .chain(self.in_play.iter())
            .map(|c| c.id)
    }

    fn pile_mut(&mut self, pile: Pile) -> &mut Vec<CardInstance> {
        match pile {
            Pile::Draw => &mut self.draw,
            Pile::Hand => &mut self.hand,
            Pile::Discard => &mut self.discard,
        }
    }
}
