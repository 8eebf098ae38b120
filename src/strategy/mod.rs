//! Betting strategy state machine
//!
//! One `CategoryState` per betting category, driven each spin by the
//! `ProgressionEngine` (when a bet cycle is open) or the `SignalDetector`
//! (when idle). At most one cycle is open per category at any time.

pub mod detector;
pub mod progression;

#[cfg(test)]
mod detector_tests;

pub use detector::SignalDetector;
pub use progression::{fibonacci, ProgressionEngine, Resolution};

use crate::config::GameConfig;
use crate::types::{BetClass, CategoryKind, Target};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Bounded per-category history capacity, most-recent-first.
pub const HISTORY_CAP: usize = 12;

/// Fibonacci indices start here so the first progression step already
/// produces a whole-unit stake (fib(2) = 1).
pub const FIB_START_INDEX: u32 = 2;

/// Mutable per-category record: bounded history plus the open-cycle fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryState {
    pub kind: CategoryKind,
    pub bet_class: BetClass,
    /// Most-recent-first category labels, bounded at `HISTORY_CAP`.
    pub history: VecDeque<String>,
    /// Open bet target, `None` while idle.
    pub active: Option<Target>,
    /// Current per-unit stake.
    pub stake: Decimal,
    pub consecutive_losses: u32,
    /// Money lost so far in the open cycle (includes half-refund losses).
    pub cycle_loss: Decimal,
    pub fib_index: u32,
    /// Trigger threshold: streak length or delay, depending on the kind.
    pub min_sequence: usize,
}

impl CategoryState {
    pub fn new(kind: CategoryKind, config: &GameConfig) -> Self {
        let min_sequence = match kind {
            CategoryKind::Color | CategoryKind::Parity | CategoryKind::Height => {
                config.min_sequence_even_money
            }
            CategoryKind::Dozen | CategoryKind::Column => config.min_sequence_dozen_column,
            CategoryKind::ColdNumber => config.min_delay_cold_number,
            CategoryKind::Neighbors => config.neighbor_span,
        };
        CategoryState {
            kind,
            bet_class: kind.bet_class(),
            history: VecDeque::with_capacity(HISTORY_CAP),
            active: None,
            stake: config.base_stake,
            consecutive_losses: 0,
            cycle_loss: Decimal::ZERO,
            fib_index: FIB_START_INDEX,
            min_sequence,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Push a new label at the front, evicting the oldest beyond capacity.
    pub fn push_history(&mut self, label: &str) {
        self.history.push_front(label.to_string());
        while self.history.len() > HISTORY_CAP {
            self.history.pop_back();
        }
    }

    /// Close the open cycle and return the stake to base.
    pub fn reset_cycle(&mut self, base_stake: Decimal) {
        self.active = None;
        self.stake = base_stake;
        self.consecutive_losses = 0;
        self.cycle_loss = Decimal::ZERO;
        self.fib_index = FIB_START_INDEX;
    }

    /// Full reset: cycle plus history.
    pub fn reset(&mut self, base_stake: Decimal) {
        self.reset_cycle(base_stake);
        self.history.clear();
    }
}
