//! The shared 84-card deck and its discard pile.
//!
//! Cards only ever move between the deck, the discard pile and robot
//! hands; none are created or destroyed during a match. The piles use
//! `im` vectors so a match snapshot clones in O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use super::card::{Card, CardAction};
use crate::core::{GameRng, BASE_HAND_SIZE, DECK_SIZE, MIN_HAND_SIZE};

/// Deck composition: (action, count, first priority, priority step).
const DECK_TABLE: [(CardAction, u32, u32, u32); 7] = [
    (CardAction::UTurn, 6, 10, 10),
    (CardAction::RotateLeft, 18, 70, 20),
    (CardAction::RotateRight, 18, 80, 20),
    (CardAction::MoveBack, 6, 430, 10),
    (CardAction::Move1, 18, 490, 10),
    (CardAction::Move2, 12, 670, 10),
    (CardAction::Move3, 6, 790, 10),
];

/// Build the full, unshuffled deck in table order.
#[must_use]
pub fn build_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for (action, count, first, step) in DECK_TABLE {
        deck.extend((0..count).map(|i| Card::new(action, first + i * step)));
    }
    debug_assert_eq!(deck.len(), DECK_SIZE);
    deck
}

/// Cards dealt to a robot: `clamp(9 - damage, 5, 9)`.
#[must_use]
pub fn hand_size(max_health: u32, health: u32) -> usize {
    let damage = max_health.saturating_sub(health) as usize;
    BASE_HAND_SIZE.saturating_sub(damage).max(MIN_HAND_SIZE)
}

/// Draw and discard piles. The top of the deck is the back of the vector.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPiles {
    deck: Vector<Card>,
    discard: Vector<Card>,
}

impl CardPiles {
    /// A full deck, shuffled.
    #[must_use]
    pub fn shuffled(rng: &mut GameRng) -> Self {
        let mut cards = build_deck();
        rng.shuffle(&mut cards);
        Self {
            deck: cards.into_iter().collect(),
            discard: Vector::new(),
        }
    }

    /// Piles with explicit contents; the last deck card is drawn first.
    #[must_use]
    pub fn from_parts(deck: Vec<Card>, discard: Vec<Card>) -> Self {
        Self {
            deck: deck.into_iter().collect(),
            discard: discard.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    #[must_use]
    pub fn discard_len(&self) -> usize {
        self.discard.len()
    }

    pub fn deck(&self) -> impl Iterator<Item = &Card> {
        self.deck.iter()
    }

    pub fn discard_pile(&self) -> impl Iterator<Item = &Card> {
        self.discard.iter()
    }

    /// Shuffle the deck in place.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        let mut cards: Vec<Card> = self.deck.iter().copied().collect();
        rng.shuffle(&mut cards);
        self.deck = cards.into_iter().collect();
    }

    /// Move the whole discard pile into the deck and shuffle.
    pub fn reshuffle_discard(&mut self, rng: &mut GameRng) {
        let discard = std::mem::take(&mut self.discard);
        self.deck.append(discard);
        self.shuffle(rng);
        tracing::debug!(deck = self.deck.len(), "reshuffled discard pile into deck");
    }

    /// Draw up to `count` cards, recycling the discard pile when the deck
    /// runs dry. Returns fewer cards when both piles are exhausted.
    pub fn draw(&mut self, count: usize, rng: &mut GameRng) -> Vec<Card> {
        let mut drawn = Vec::with_capacity(count);
        while drawn.len() < count {
            if self.deck.is_empty() {
                if self.discard.is_empty() {
                    tracing::debug!(wanted = count, got = drawn.len(), "deck exhausted");
                    break;
                }
                self.reshuffle_discard(rng);
            }
            match self.deck.pop_back() {
                Some(card) => drawn.push(card),
                None => break,
            }
        }
        drawn
    }

    /// Put cards on the discard pile.
    pub fn discard(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.discard.extend(cards);
    }
}
