//! Virtual bankroll
//!
//! Plain running-balance arithmetic. The balance is always the initial
//! amount plus every signed delta applied so far; nothing here rounds or
//! drifts. In lenient mode (the default) the balance may go negative, which
//! the progression engine treats as exhaustion.

use crate::error::{Error, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bankroll {
    initial: Decimal,
    current: Decimal,
    strict: bool,
}

impl Bankroll {
    pub fn new(initial: Decimal, strict: bool) -> Result<Self> {
        if initial <= Decimal::ZERO {
            return Err(Error::InvalidConfig("bankroll must be positive".into()));
        }
        Ok(Bankroll {
            initial,
            current: initial,
            strict,
        })
    }

    pub fn balance(&self) -> Decimal {
        self.current
    }

    pub fn initial(&self) -> Decimal {
        self.initial
    }

    pub fn profit_loss(&self) -> Decimal {
        self.current - self.initial
    }

    /// Add winnings. `amount` is a non-negative magnitude.
    pub fn credit(&mut self, amount: Decimal) {
        debug_assert!(amount >= Decimal::ZERO);
        self.current += amount;
    }

    /// Remove a loss. `amount` is a non-negative magnitude; in strict mode
    /// an overdraw fails without mutating the balance.
    pub fn debit(&mut self, amount: Decimal) -> Result<()> {
        debug_assert!(amount >= Decimal::ZERO);
        if self.strict && amount > self.current {
            return Err(Error::InsufficientFunds {
                balance: self.current,
                requested: amount,
            });
        }
        self.current -= amount;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_rejects_non_positive() {
        assert!(Bankroll::new(dec!(0), false).is_err());
        assert!(Bankroll::new(dec!(-5), false).is_err());
    }

    #[test]
    fn test_credit_debit_conservation() {
        let mut bank = Bankroll::new(dec!(100), false).unwrap();
        bank.debit(dec!(0.50)).unwrap();
        bank.debit(dec!(1.00)).unwrap();
        bank.credit(dec!(2.00));
        assert_eq!(bank.balance(), dec!(100.50));
        assert_eq!(bank.profit_loss(), dec!(0.50));
        assert_eq!(bank.initial(), dec!(100));
    }

    #[test]
    fn test_lenient_mode_allows_negative() {
        let mut bank = Bankroll::new(dec!(1), false).unwrap();
        bank.debit(dec!(3)).unwrap();
        assert_eq!(bank.balance(), dec!(-2));
    }

    #[test]
    fn test_strict_mode_rejects_overdraw() {
        let mut bank = Bankroll::new(dec!(1), true).unwrap();
        let err = bank.debit(dec!(3)).unwrap_err();
        assert!(matches!(err, Error::InsufficientFunds { .. }));
        // Balance untouched by the failed debit
        assert_eq!(bank.balance(), dec!(1));
        bank.debit(dec!(1)).unwrap();
        assert_eq!(bank.balance(), dec!(0));
    }
}
