//! Signal detection heuristics
//!
//! One detection algorithm per bet class. Detection only runs while the
//! category is idle; open cycles are resolved by the progression engine
//! instead. Detectors borrow state and return a decision, they never
//! mutate anything.

use crate::config::GameConfig;
use crate::strategy::CategoryState;
use crate::types::{is_zero_label, opposite_label, wheel_neighbors, CategoryKind, Signal, Target, WheelVariant};
use std::collections::HashMap;

/// Minimum session length before neighbor-spread bets are considered.
const NEIGHBORS_MIN_SPINS: usize = 6;

pub struct SignalDetector<'a> {
    config: &'a GameConfig,
}

impl<'a> SignalDetector<'a> {
    pub fn new(config: &'a GameConfig) -> Self {
        Self { config }
    }

    /// Look for a new bet to open on an idle category.
    pub fn detect(
        &self,
        state: &CategoryState,
        spin_log: &[String],
        frequency: &HashMap<String, u64>,
    ) -> Option<Signal> {
        if state.is_active() {
            return None;
        }
        match state.kind {
            CategoryKind::Color | CategoryKind::Parity | CategoryKind::Height => {
                self.detect_sequence(state)
            }
            CategoryKind::Dozen | CategoryKind::Column => self.detect_delay(state),
            CategoryKind::ColdNumber => self.detect_cold(state, spin_log, frequency),
            CategoryKind::Neighbors => self.detect_neighbors(state, spin_log),
        }
    }

    /// Streak reversal: `min_sequence` identical even-money results in a row
    /// opens a bet on the opposite label.
    fn detect_sequence(&self, state: &CategoryState) -> Option<Signal> {
        if state.history.len() < state.min_sequence {
            return None;
        }
        let reference = state.history.front()?;
        if is_zero_label(reference) {
            return None;
        }
        let streak = state
            .history
            .iter()
            .take(state.min_sequence)
            .all(|h| h == reference);
        if !streak {
            return None;
        }
        let target = opposite_label(reference)?;
        Some(Signal {
            category: state.kind,
            target: Target::Single(target.to_string()),
            stake: state.stake,
            strength: state.min_sequence as u32,
            losses: 0,
        })
    }

    /// Two-of-three delay: if exactly one dozen/column label is absent from
    /// the recent window, bet on the absent one.
    fn detect_delay(&self, state: &CategoryState) -> Option<Signal> {
        if state.history.len() < state.min_sequence {
            return None;
        }
        let all_labels: [&str; 3] = match state.kind {
            CategoryKind::Dozen => ["D1", "D2", "D3"],
            _ => ["C1", "C2", "C3"],
        };
        let window: Vec<&String> = state.history.iter().take(state.min_sequence).collect();
        let missing: Vec<&str> = all_labels
            .iter()
            .copied()
            .filter(|label| !window.iter().any(|h| h.as_str() == *label))
            .collect();
        // Two absent labels is ambiguous; no signal.
        if missing.len() != 1 {
            return None;
        }
        let target = missing[0];
        Some(Signal {
            category: state.kind,
            target: Target::Single(target.to_string()),
            stake: state.stake,
            strength: delay_strength(state, target),
            losses: 0,
        })
    }

    /// Cold number: the least-frequent non-zero slot, bet once it has been
    /// absent for at least `min_delay_cold_number` spins.
    fn detect_cold(
        &self,
        state: &CategoryState,
        spin_log: &[String],
        frequency: &HashMap<String, u64>,
    ) -> Option<Signal> {
        if spin_log.is_empty() {
            return None;
        }
        let (cold, _) = hot_cold(frequency);
        let target = cold.first()?;
        let delay = match spin_log.iter().rev().position(|s| s == target) {
            Some(idx) => idx,
            None => spin_log.len(),
        };
        if delay < self.config.min_delay_cold_number {
            return None;
        }
        Some(Signal {
            category: state.kind,
            target: Target::Single(target.clone()),
            stake: state.stake,
            strength: delay as u32,
            losses: 0,
        })
    }

    /// Neighbor spread: follow the last number with its physical wheel
    /// neighbors. European wheel only.
    fn detect_neighbors(&self, state: &CategoryState, spin_log: &[String]) -> Option<Signal> {
        if self.config.wheel != WheelVariant::European {
            return None;
        }
        if spin_log.len() < NEIGHBORS_MIN_SPINS {
            return None;
        }
        let last = spin_log.last()?;
        let labels = wheel_neighbors(last, self.config.neighbor_span)?;
        Some(Signal {
            category: state.kind,
            target: Target::Spread(labels),
            stake: state.stake,
            strength: 0,
            losses: 0,
        })
    }
}

/// Spins since the target last appeared in the bounded history; the history
/// length when it never did. Reported as the signal's strength.
fn delay_strength(state: &CategoryState, target: &str) -> u32 {
    state
        .history
        .iter()
        .position(|h| h == target)
        .unwrap_or(state.history.len()) as u32
}

/// Three coldest and three hottest non-zero slots, ties broken by ascending
/// numeric label. Hottest are returned most-frequent-first.
pub fn hot_cold(frequency: &HashMap<String, u64>) -> (Vec<String>, Vec<String>) {
    let mut counts: Vec<(u64, u32, &String)> = frequency
        .iter()
        .filter(|(label, _)| label.as_str() != "0" && label.as_str() != "00")
        .filter_map(|(label, count)| label.parse::<u32>().ok().map(|n| (*count, n, label)))
        .collect();
    if counts.is_empty() {
        return (Vec::new(), Vec::new());
    }
    counts.sort();
    let cold: Vec<String> = counts.iter().take(3).map(|(_, _, l)| (*l).clone()).collect();
    let hot: Vec<String> = counts
        .iter()
        .rev()
        .take(3)
        .map(|(_, _, l)| (*l).clone())
        .collect();
    (cold, hot)
}
