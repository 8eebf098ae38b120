//! Roulette Table Assistant
//!
//! A bookkeeping and signal engine for European/American roulette sessions.
//!
//! ## Architecture
//!
//! ```text
//! Raw result → Classifier (types) → Session → ProgressionEngine (open bets)
//!                                      ↓              ↓
//!                              SignalDetector ← CategoryState / Bankroll
//! ```
//!
//! Each spin is classified into its betting categories (color, parity,
//! high/low, dozen, column, straight number), open bet cycles are resolved
//! against the bankroll, and streak/delay heuristics decide whether a new
//! cycle should open. The engine is explicitly negative-EV bookkeeping; it
//! recommends stakes, it does not promise profits.

pub mod bankroll;
pub mod config;
pub mod error;
pub mod session;
pub mod strategy;
pub mod types;

pub use bankroll::Bankroll;
pub use config::{GameConfig, Progression};
pub use error::{Error, Result};
pub use session::{Session, SessionManager, SessionStats, SpinReport};
pub use types::{CategoryKind, Signal, SpinResult, Target, WheelVariant};

#[cfg(test)]
mod config_tests;
