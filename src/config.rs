//! Game configuration
//!
//! All knobs of the strategy/progression engine, deserializable from a TOML
//! file with per-field defaults so a partial (or empty) file is valid.

use crate::error::{Error, Result};
use crate::types::WheelVariant;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Stake progression applied after an ordinary loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Progression {
    #[default]
    Martingale,
    Fibonacci,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Stake every cycle opens with.
    #[serde(default = "default_base_stake")]
    pub base_stake: Decimal,
    /// Multiplier applied to the stake after each Martingale loss.
    #[serde(default = "default_martingale_factor")]
    pub martingale_factor: Decimal,
    /// Hard ceiling for any single stake; `None` disables the cap.
    #[serde(default = "default_stake_cap")]
    pub stake_cap: Option<Decimal>,
    /// A cycle aborts once it reaches this many consecutive ordinary losses.
    #[serde(default = "default_max_losses")]
    pub max_consecutive_losses: u32,
    /// Half-refund on zero for even-money bets (European wheel only).
    #[serde(default = "default_true")]
    pub la_partage_enabled: bool,
    /// Identical results required to trigger an even-money reversal bet.
    #[serde(default = "default_min_sequence_even_money")]
    pub min_sequence_even_money: usize,
    /// Window examined by the dozen/column two-of-three delay check.
    #[serde(default = "default_min_sequence_dozen_column")]
    pub min_sequence_dozen_column: usize,
    /// Spins without an appearance before a cold number is bet.
    #[serde(default = "default_min_delay_cold_number")]
    pub min_delay_cold_number: usize,
    /// Wheel neighbors covered on each side by a neighbor-spread bet.
    #[serde(default = "default_neighbor_span")]
    pub neighbor_span: usize,
    #[serde(default)]
    pub wheel: WheelVariant,
    #[serde(default)]
    pub progression: Progression,
    /// Historical results required before live processing starts.
    #[serde(default = "default_warmup_spins")]
    pub warmup_spins: usize,
    /// When true, a debit that would overdraw the bankroll is an error
    /// instead of going negative.
    #[serde(default)]
    pub strict_bankroll: bool,
}

fn default_base_stake() -> Decimal {
    dec!(0.50)
}

fn default_martingale_factor() -> Decimal {
    dec!(2.0)
}

fn default_stake_cap() -> Option<Decimal> {
    Some(dec!(2.00))
}

fn default_max_losses() -> u32 {
    4
}

fn default_true() -> bool {
    true
}

fn default_min_sequence_even_money() -> usize {
    3
}

fn default_min_sequence_dozen_column() -> usize {
    2
}

fn default_min_delay_cold_number() -> usize {
    37
}

fn default_neighbor_span() -> usize {
    2
}

fn default_warmup_spins() -> usize {
    12
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            base_stake: default_base_stake(),
            martingale_factor: default_martingale_factor(),
            stake_cap: default_stake_cap(),
            max_consecutive_losses: default_max_losses(),
            la_partage_enabled: true,
            min_sequence_even_money: default_min_sequence_even_money(),
            min_sequence_dozen_column: default_min_sequence_dozen_column(),
            min_delay_cold_number: default_min_delay_cold_number(),
            neighbor_span: default_neighbor_span(),
            wheel: WheelVariant::default(),
            progression: Progression::default(),
            warmup_spins: default_warmup_spins(),
            strict_bankroll: false,
        }
    }
}

impl GameConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        let cfg: GameConfig = settings
            .try_deserialize()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_stake <= Decimal::ZERO {
            return Err(Error::InvalidConfig("base_stake must be positive".into()));
        }
        if self.martingale_factor <= Decimal::ONE {
            return Err(Error::InvalidConfig(
                "martingale_factor must be greater than 1".into(),
            ));
        }
        if let Some(cap) = self.stake_cap {
            if cap < self.base_stake {
                return Err(Error::InvalidConfig(
                    "stake_cap must be at least base_stake".into(),
                ));
            }
        }
        if self.max_consecutive_losses == 0 {
            return Err(Error::InvalidConfig(
                "max_consecutive_losses must be at least 1".into(),
            ));
        }
        if self.min_sequence_even_money == 0 {
            return Err(Error::InvalidConfig(
                "min_sequence_even_money must be at least 1".into(),
            ));
        }
        if !(1..=3).contains(&self.min_sequence_dozen_column) {
            return Err(Error::InvalidConfig(
                "min_sequence_dozen_column must be between 1 and 3".into(),
            ));
        }
        if self.neighbor_span == 0 || self.neighbor_span > 18 {
            return Err(Error::InvalidConfig(
                "neighbor_span must be between 1 and 18".into(),
            ));
        }
        Ok(())
    }
}
