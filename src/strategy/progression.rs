//! Bet-outcome resolver and stake progression
//!
//! The central state machine. While a category has an open cycle, every
//! spin resolves to a win, a half-refund (La Partage) or an ordinary loss,
//! mutating the bankroll and the category state. Losses advance the
//! configured progression, then the abort ladder runs: loss limit, cap
//! recoverability, bankroll exhaustion.

use crate::bankroll::Bankroll;
use crate::config::{GameConfig, Progression};
use crate::error::Result;
use crate::strategy::CategoryState;
use crate::types::{BetClass, Signal, SpinResult, Target, WheelVariant};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Outcome of resolving one spin against one open cycle.
#[derive(Debug, Default)]
pub struct Resolution {
    /// The still-open recommendation, if the cycle survived this spin.
    pub signal: Option<Signal>,
    pub messages: Vec<String>,
}

pub struct ProgressionEngine<'a> {
    config: &'a GameConfig,
}

impl<'a> ProgressionEngine<'a> {
    pub fn new(config: &'a GameConfig) -> Self {
        Self { config }
    }

    /// Resolve the open cycle of `state` against a spin result. No-op when
    /// the category is idle.
    pub fn resolve(
        &self,
        state: &mut CategoryState,
        result: &SpinResult,
        bankroll: &mut Bankroll,
    ) -> Result<Resolution> {
        let Some(target) = state.active.clone() else {
            return Ok(Resolution::default());
        };

        let outcome = result.category_label(state.kind);
        if target.hits(outcome) {
            return self.settle_win(state, &target, bankroll);
        }
        if self.refund_applies(state, result) {
            return self.settle_refund(state, &target, bankroll);
        }
        self.settle_loss(state, &target, result, bankroll)
    }

    /// La Partage: even-money bets lose only half their stake on a zero,
    /// European wheel only, and the progression does not advance.
    fn refund_applies(&self, state: &CategoryState, result: &SpinResult) -> bool {
        result.is_zero()
            && state.bet_class == BetClass::EvenMoney
            && self.config.la_partage_enabled
            && self.config.wheel == WheelVariant::European
    }

    fn settle_win(
        &self,
        state: &mut CategoryState,
        target: &Target,
        bankroll: &mut Bankroll,
    ) -> Result<Resolution> {
        let multiplier = state.bet_class.payout_multiplier();
        // Net profit: gross return on the winning unit minus everything
        // staked (for spreads the losing units were staked too).
        let net = state.stake * multiplier - state.stake * target.unit_count();
        bankroll.credit(net);
        tracing::info!(category = %state.kind, %net, "cycle won");

        let mut resolution = Resolution::default();
        resolution.messages.push(format!(
            "WIN ({}): net profit {:.2}, cycle closed",
            state.kind, net
        ));
        state.reset_cycle(self.config.base_stake);
        Ok(resolution)
    }

    fn settle_refund(
        &self,
        state: &mut CategoryState,
        target: &Target,
        bankroll: &mut Bankroll,
    ) -> Result<Resolution> {
        let half = state.stake / dec!(2);
        bankroll.debit(half)?;
        state.cycle_loss += half;

        let mut resolution = Resolution::default();
        resolution.messages.push(format!(
            "LA PARTAGE ({}): zero hit, half stake {:.2} lost, stake unchanged",
            state.kind, half
        ));

        if bankroll.balance() <= Decimal::ZERO {
            resolution
                .messages
                .push(format!("ABORT ({}): bankroll exhausted, cycle reset", state.kind));
            state.reset_cycle(self.config.base_stake);
            return Ok(resolution);
        }

        // The stake itself does not progress, but it can never exceed what
        // is left in the bankroll.
        let next = state.stake.min(bankroll.balance());
        if next < state.stake {
            resolution.messages.push(format!(
                "WARNING ({}): bankroll covers only {:.2}, stake reduced",
                state.kind, next
            ));
        }
        state.stake = next;
        resolution.signal = Some(Signal {
            category: state.kind,
            target: target.clone(),
            stake: state.stake,
            strength: 0,
            losses: state.consecutive_losses,
        });
        Ok(resolution)
    }

    fn settle_loss(
        &self,
        state: &mut CategoryState,
        target: &Target,
        result: &SpinResult,
        bankroll: &mut Bankroll,
    ) -> Result<Resolution> {
        let units = target.unit_count();
        let lost = state.stake * units;
        bankroll.debit(lost)?;
        state.consecutive_losses += 1;
        state.cycle_loss += lost;

        let mut resolution = Resolution::default();
        let term = if result.is_zero() { "ZERO" } else { "LOSS" };
        resolution.messages.push(format!(
            "{} ({}): lost {:.2}, cycle loss {:.2}",
            term, state.kind, lost, state.cycle_loss
        ));

        // Loss-count limit: a cycle aborts when it reaches the limit.
        if state.consecutive_losses >= self.config.max_consecutive_losses {
            resolution.messages.push(format!(
                "ABORT ({}): {} consecutive losses, cycle reset",
                state.kind, state.consecutive_losses
            ));
            tracing::warn!(category = %state.kind, "loss limit reached, cycle aborted");
            state.reset_cycle(self.config.base_stake);
            return Ok(resolution);
        }

        let next = self.next_stake(state);
        let capped = match self.config.stake_cap {
            Some(cap) => next.min(cap),
            None => next,
        };
        if capped < next {
            resolution.messages.push(format!(
                "WARNING ({}): stake capped at {:.2} (progression wanted {:.2})",
                state.kind, capped, next
            ));
        }

        // Recoverability: if even an immediate win at the capped stake
        // cannot cover the cycle's losses, continuing is futile.
        let multiplier = state.bet_class.payout_multiplier();
        let potential = capped * multiplier - capped * units;
        if potential < state.cycle_loss {
            resolution.messages.push(format!(
                "ABORT ({}): capped stake {:.2} cannot recover cycle loss {:.2}, cycle reset",
                state.kind, capped, state.cycle_loss
            ));
            tracing::warn!(category = %state.kind, "unrecoverable cycle aborted");
            state.reset_cycle(self.config.base_stake);
            return Ok(resolution);
        }

        // Never recommend more than the bankroll can stake.
        let affordable = bankroll.balance() / units;
        let next_stake = capped.min(affordable);
        if next_stake <= Decimal::ZERO {
            resolution
                .messages
                .push(format!("ABORT ({}): bankroll exhausted, cycle reset", state.kind));
            state.reset_cycle(self.config.base_stake);
            return Ok(resolution);
        }
        if next_stake < capped {
            resolution.messages.push(format!(
                "WARNING ({}): bankroll covers only {:.2}, stake reduced",
                state.kind, next_stake
            ));
        }

        state.stake = next_stake;
        resolution.messages.push(format!(
            "CONTINUE ({}): next stake {:.2} on {}",
            state.kind,
            next_stake,
            target.describe()
        ));
        resolution.signal = Some(Signal {
            category: state.kind,
            target: target.clone(),
            stake: state.stake,
            strength: 0,
            losses: state.consecutive_losses,
        });
        Ok(resolution)
    }

    /// Next uncapped stake according to the configured progression.
    fn next_stake(&self, state: &mut CategoryState) -> Decimal {
        match self.config.progression {
            Progression::Martingale => state.stake * self.config.martingale_factor,
            Progression::Fibonacci => {
                state.fib_index += 1;
                Decimal::from(fibonacci(state.fib_index)) * self.config.base_stake
            }
        }
    }
}

/// Plain iterative Fibonacci: fib(0) = 0, fib(1) = 1.
pub fn fibonacci(n: u32) -> u64 {
    let (mut a, mut b) = (0u64, 1u64);
    for _ in 0..n {
        let next = a + b;
        a = b;
        b = next;
    }
    a
}
