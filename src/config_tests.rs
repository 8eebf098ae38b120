//! Tests for configuration

#[cfg(test)]
mod tests {
    use super::super::config::*;
    use crate::error::Error;
    use crate::types::WheelVariant;
    use rust_decimal_macros::dec;
    use std::io::Write;

    #[test]
    fn test_game_config_defaults() {
        let config: GameConfig = toml::from_str("").unwrap();
        assert_eq!(config.base_stake, dec!(0.50));
        assert_eq!(config.martingale_factor, dec!(2.0));
        assert_eq!(config.stake_cap, Some(dec!(2.00)));
        assert_eq!(config.max_consecutive_losses, 4);
        assert!(config.la_partage_enabled);
        assert_eq!(config.min_sequence_even_money, 3);
        assert_eq!(config.min_sequence_dozen_column, 2);
        assert_eq!(config.min_delay_cold_number, 37);
        assert_eq!(config.neighbor_span, 2);
        assert_eq!(config.wheel, WheelVariant::European);
        assert_eq!(config.progression, Progression::Martingale);
        assert_eq!(config.warmup_spins, 12);
        assert!(!config.strict_bankroll);
        config.validate().unwrap();
    }

    #[test]
    fn test_game_config_overrides() {
        let toml_str = r#"
base_stake = 1.00
martingale_factor = 3.0
max_consecutive_losses = 6
la_partage_enabled = false
wheel = "AMERICAN"
progression = "FIBONACCI"
warmup_spins = 0
strict_bankroll = true
"#;
        let config: GameConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.base_stake, dec!(1.00));
        assert_eq!(config.martingale_factor, dec!(3.0));
        assert_eq!(config.max_consecutive_losses, 6);
        assert!(!config.la_partage_enabled);
        assert_eq!(config.wheel, WheelVariant::American);
        assert_eq!(config.progression, Progression::Fibonacci);
        assert_eq!(config.warmup_spins, 0);
        assert!(config.strict_bankroll);
    }

    #[test]
    fn test_validate_rejects_non_positive_stake() {
        let config: GameConfig = toml::from_str("base_stake = 0").unwrap();
        assert!(matches!(
            config.validate().unwrap_err(),
            Error::InvalidConfig(_)
        ));
    }

    #[test]
    fn test_validate_rejects_factor_at_most_one() {
        let config: GameConfig = toml::from_str("martingale_factor = 1.0").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_cap_below_base() {
        let config: GameConfig = toml::from_str("base_stake = 5.0\nstake_cap = 1.0").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_loss_limit() {
        let config: GameConfig = toml::from_str("max_consecutive_losses = 0").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_dozen_window() {
        let config: GameConfig = toml::from_str("min_sequence_dozen_column = 4").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "base_stake = 0.25\nmax_consecutive_losses = 3").unwrap();

        let config = GameConfig::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.base_stake, dec!(0.25));
        assert_eq!(config.max_consecutive_losses, 3);
        // Untouched fields fall back to defaults
        assert_eq!(config.min_delay_cold_number, 37);
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(GameConfig::load("/nonexistent/config.toml").is_err());
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "base_stake = -1.0").unwrap();
        let err = GameConfig::load(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
