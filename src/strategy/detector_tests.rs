//! Tests for signal detection

#[cfg(test)]
mod tests {
    use crate::config::GameConfig;
    use crate::strategy::{CategoryState, SignalDetector};
    use crate::types::{CategoryKind, Target, WheelVariant};
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn state_with_history(kind: CategoryKind, labels: &[&str]) -> CategoryState {
        let config = GameConfig::default();
        let mut state = CategoryState::new(kind, &config);
        // Oldest first, so the last pushed label is the most recent.
        for label in labels {
            state.push_history(label);
        }
        state
    }

    fn empty_tracking() -> (Vec<String>, HashMap<String, u64>) {
        (Vec::new(), HashMap::new())
    }

    #[test]
    fn test_color_streak_opens_opposite_bet() {
        let config = GameConfig::default();
        let detector = SignalDetector::new(&config);
        let state = state_with_history(CategoryKind::Color, &["R", "R", "R"]);
        let (log, freq) = empty_tracking();

        let signal = detector.detect(&state, &log, &freq).unwrap();
        assert_eq!(signal.target, Target::Single("B".to_string()));
        assert_eq!(signal.stake, dec!(0.50));
        assert_eq!(signal.strength, 3);
        assert_eq!(signal.losses, 0);
    }

    #[test]
    fn test_streak_below_threshold_is_silent() {
        let config = GameConfig::default();
        let detector = SignalDetector::new(&config);
        let state = state_with_history(CategoryKind::Color, &["R", "R"]);
        let (log, freq) = empty_tracking();
        assert!(detector.detect(&state, &log, &freq).is_none());
    }

    #[test]
    fn test_zero_breaks_streak() {
        let config = GameConfig::default();
        let detector = SignalDetector::new(&config);
        let (log, freq) = empty_tracking();

        // Zero as most recent entry: no reference label to reverse.
        let state = state_with_history(CategoryKind::Color, &["R", "R", "G"]);
        assert!(detector.detect(&state, &log, &freq).is_none());

        // Zero inside the window breaks equality.
        let state = state_with_history(CategoryKind::Parity, &["EVEN", "ZERO", "EVEN"]);
        assert!(detector.detect(&state, &log, &freq).is_none());
    }

    #[test]
    fn test_parity_and_height_reversal() {
        let config = GameConfig::default();
        let detector = SignalDetector::new(&config);
        let (log, freq) = empty_tracking();

        let state = state_with_history(CategoryKind::Parity, &["EVEN", "EVEN", "EVEN"]);
        let signal = detector.detect(&state, &log, &freq).unwrap();
        assert_eq!(signal.target, Target::Single("ODD".to_string()));

        let state = state_with_history(CategoryKind::Height, &["LOW", "LOW", "LOW"]);
        let signal = detector.detect(&state, &log, &freq).unwrap();
        assert_eq!(signal.target, Target::Single("HIGH".to_string()));
    }

    #[test]
    fn test_no_detection_while_active() {
        let config = GameConfig::default();
        let detector = SignalDetector::new(&config);
        let (log, freq) = empty_tracking();

        let mut state = state_with_history(CategoryKind::Color, &["R", "R", "R"]);
        state.active = Some(Target::Single("B".to_string()));
        assert!(detector.detect(&state, &log, &freq).is_none());
    }

    #[test]
    fn test_dozen_delay_two_of_three() {
        let config = GameConfig::default();
        let detector = SignalDetector::new(&config);
        let (log, freq) = empty_tracking();

        // D1 then D2 landed: D3 is the single absent label.
        let state = state_with_history(CategoryKind::Dozen, &["D1", "D2"]);
        let signal = detector.detect(&state, &log, &freq).unwrap();
        assert_eq!(signal.target, Target::Single("D3".to_string()));
        // D3 never appears in the bounded history: strength = history length.
        assert_eq!(signal.strength, 2);
    }

    #[test]
    fn test_dozen_delay_strength_counts_back_to_occurrence() {
        let config = GameConfig::default();
        let detector = SignalDetector::new(&config);
        let (log, freq) = empty_tracking();

        // Most recent first: [D1, D2, D3, ...] → D3 last seen 2 spins ago.
        let state = state_with_history(CategoryKind::Dozen, &["D3", "D2", "D1"]);
        let signal = detector.detect(&state, &log, &freq).unwrap();
        assert_eq!(signal.target, Target::Single("D3".to_string()));
        assert_eq!(signal.strength, 2);
    }

    #[test]
    fn test_dozen_delay_ambiguous_window_is_silent() {
        let config = GameConfig::default();
        let detector = SignalDetector::new(&config);
        let (log, freq) = empty_tracking();

        // Same dozen twice: two labels absent, no signal.
        let state = state_with_history(CategoryKind::Dozen, &["D1", "D1"]);
        assert!(detector.detect(&state, &log, &freq).is_none());

        // Zero in the window is not a dozen label either.
        let state = state_with_history(CategoryKind::Dozen, &["D1", "ZERO"]);
        assert!(detector.detect(&state, &log, &freq).is_none());
    }

    #[test]
    fn test_column_delay() {
        let config = GameConfig::default();
        let detector = SignalDetector::new(&config);
        let (log, freq) = empty_tracking();

        let state = state_with_history(CategoryKind::Column, &["C3", "C2"]);
        let signal = detector.detect(&state, &log, &freq).unwrap();
        assert_eq!(signal.target, Target::Single("C1".to_string()));
    }

    #[test]
    fn test_cold_number_detection() {
        let config = GameConfig::default();
        let detector = SignalDetector::new(&config);
        let state = CategoryState::new(CategoryKind::ColdNumber, &config);

        // 37 spins of "1": every other number is tied-cold with count 0,
        // "2" wins the tie by numeric order and has never appeared.
        let log: Vec<String> = std::iter::repeat("1".to_string()).take(37).collect();
        let mut freq: HashMap<String, u64> = (0..=36u8).map(|n| (n.to_string(), 0)).collect();
        freq.insert("1".to_string(), 37);

        let signal = detector.detect(&state, &log, &freq).unwrap();
        assert_eq!(signal.target, Target::Single("2".to_string()));
        assert_eq!(signal.strength, 37);
    }

    #[test]
    fn test_cold_number_below_delay_threshold() {
        let config = GameConfig::default();
        let detector = SignalDetector::new(&config);
        let state = CategoryState::new(CategoryKind::ColdNumber, &config);

        // Only 10 spins: even a never-seen number has delay 10 < 37.
        let log: Vec<String> = std::iter::repeat("1".to_string()).take(10).collect();
        let mut freq: HashMap<String, u64> = (0..=36u8).map(|n| (n.to_string(), 0)).collect();
        freq.insert("1".to_string(), 10);

        assert!(detector.detect(&state, &log, &freq).is_none());
    }

    #[test]
    fn test_cold_number_excludes_zero_slots() {
        let config = GameConfig::default();
        let detector = SignalDetector::new(&config);
        let state = CategoryState::new(CategoryKind::ColdNumber, &config);

        // Zero has the lowest count but is never a straight-up target here.
        let log: Vec<String> = (0..40).map(|i| ((i % 36) + 1).to_string()).collect();
        let mut freq: HashMap<String, u64> = (0..=36u8).map(|n| (n.to_string(), 1)).collect();
        freq.insert("0".to_string(), 0);

        if let Some(signal) = detector.detect(&state, &log, &freq) {
            assert_ne!(signal.target, Target::Single("0".to_string()));
        }
    }

    #[test]
    fn test_neighbors_spread() {
        let config = GameConfig::default();
        let detector = SignalDetector::new(&config);
        let state = CategoryState::new(CategoryKind::Neighbors, &config);
        let freq = HashMap::new();

        let log: Vec<String> = ["5", "12", "19", "33", "7", "0"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let signal = detector.detect(&state, &log, &freq).unwrap();
        let expected: Vec<String> = ["3", "26", "0", "32", "15"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(signal.target, Target::Spread(expected));
    }

    #[test]
    fn test_neighbors_needs_warm_log() {
        let config = GameConfig::default();
        let detector = SignalDetector::new(&config);
        let state = CategoryState::new(CategoryKind::Neighbors, &config);
        let freq = HashMap::new();

        let log: Vec<String> = ["5", "12", "19", "33", "7"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(detector.detect(&state, &log, &freq).is_none());
    }

    #[test]
    fn test_neighbors_disabled_on_american_wheel() {
        let config = GameConfig {
            wheel: WheelVariant::American,
            ..GameConfig::default()
        };
        let detector = SignalDetector::new(&config);
        let state = CategoryState::new(CategoryKind::Neighbors, &config);
        let freq = HashMap::new();
        let log: Vec<String> = ["5", "12", "19", "33", "7", "0"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(detector.detect(&state, &log, &freq).is_none());
    }

    #[test]
    fn test_hot_cold_summary() {
        use crate::strategy::detector::hot_cold;

        let mut freq: HashMap<String, u64> = (0..=36u8).map(|n| (n.to_string(), 0)).collect();
        freq.insert("7".to_string(), 5);
        freq.insert("12".to_string(), 3);
        freq.insert("1".to_string(), 1);

        let (cold, hot) = hot_cold(&freq);
        assert_eq!(cold, vec!["2", "3", "4"]);
        assert_eq!(hot, vec!["7", "12", "1"]);
    }
}
