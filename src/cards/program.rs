//! Per-robot hand and program registers.
//!
//! Registers fill left to right: a selected card always lands in the first
//! empty slot, and undo clears the highest filled slot. Because filling is
//! sequential, last-by-index is also last-by-time.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::Card;
use crate::core::NUM_REGISTERS;

/// Why a register edit was refused.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProgramError {
    #[error("hand index {index} is out of range (hand has {hand_size} cards)")]
    InvalidHandIndex { index: usize, hand_size: usize },

    #[error("card at hand index {0} is already in a register")]
    AlreadyAssigned(usize),

    #[error("all registers are already filled")]
    RegistersFull,

    #[error("no register to clear")]
    NothingToUndo,
}

/// A robot's hand, register slots and committed program for one round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotProgram {
    hand: SmallVec<[Card; 9]>,

    /// Hand indices per register; `None` is an empty slot.
    registers: [Option<usize>; NUM_REGISTERS],

    committed: SmallVec<[Card; NUM_REGISTERS]>,
}

impl RobotProgram {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the hand and clear the registers.
    pub fn set_hand(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.hand = cards.into_iter().collect();
        self.registers = [None; NUM_REGISTERS];
    }

    /// Remove and return the hand, clearing the registers.
    pub fn take_hand(&mut self) -> SmallVec<[Card; 9]> {
        self.registers = [None; NUM_REGISTERS];
        std::mem::take(&mut self.hand)
    }

    #[must_use]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    #[must_use]
    pub fn registers(&self) -> &[Option<usize>; NUM_REGISTERS] {
        &self.registers
    }

    /// Card currently placed in register `slot`.
    #[must_use]
    pub fn register_card(&self, slot: usize) -> Option<Card> {
        let index = (*self.registers.get(slot)?)?;
        self.hand.get(index).copied()
    }

    #[must_use]
    pub fn is_card_in_register(&self, hand_index: usize) -> bool {
        self.registers.contains(&Some(hand_index))
    }

    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.registers.iter().filter(|s| s.is_some()).count()
    }

    /// All registers hold a card.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.registers.iter().all(Option::is_some)
    }

    /// Complete, or every card of a short hand has been placed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.is_complete() || self.filled_count() >= self.hand.len()
    }

    /// Place hand card `hand_index` in the first empty register.
    ///
    /// Returns the register it landed in.
    pub fn select(&mut self, hand_index: usize) -> Result<usize, ProgramError> {
        if hand_index >= self.hand.len() {
            return Err(ProgramError::InvalidHandIndex {
                index: hand_index,
                hand_size: self.hand.len(),
            });
        }
        if self.is_card_in_register(hand_index) {
            return Err(ProgramError::AlreadyAssigned(hand_index));
        }
        let slot = self
            .registers
            .iter()
            .position(Option::is_none)
            .ok_or(ProgramError::RegistersFull)?;
        self.registers[slot] = Some(hand_index);
        Ok(slot)
    }

    /// Clear the highest-numbered filled register; returns its index.
    pub fn undo_last(&mut self) -> Result<usize, ProgramError> {
        let slot = self
            .registers
            .iter()
            .rposition(Option::is_some)
            .ok_or(ProgramError::NothingToUndo)?;
        self.registers[slot] = None;
        Ok(slot)
    }

    /// Copy register cards, in slot order, into the committed program.
    ///
    /// Empty or dangling slots are skipped, so the program can be shorter
    /// than five cards.
    pub fn commit(&mut self) {
        self.committed = self
            .registers
            .iter()
            .filter_map(|slot| slot.and_then(|i| self.hand.get(i).copied()))
            .collect();
    }

    #[must_use]
    pub fn committed(&self) -> &[Card] {
        &self.committed
    }

    /// Committed card for register `register`, if any.
    #[must_use]
    pub fn committed_card(&self, register: usize) -> Option<Card> {
        self.committed.get(register).copied()
    }

    pub fn clear_committed(&mut self) {
        self.committed.clear();
    }
}
