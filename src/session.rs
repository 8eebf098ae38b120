//! Game session orchestration
//!
//! A `Session` owns the bankroll, every category state, the global spin log
//! and the frequency table. One spin is fully processed (classify → resolve
//! open cycles → update histories → detect new signals → report) before the
//! next is accepted. Sessions never share mutable state; `SessionManager`
//! hands out one isolated session per key.

use crate::bankroll::Bankroll;
use crate::config::GameConfig;
use crate::error::{Error, Result};
use crate::strategy::{CategoryState, ProgressionEngine, SignalDetector};
use crate::strategy::detector::hot_cold;
use crate::types::{CategoryKind, Signal, SpinResult, Target};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// How many recent results the reports echo back.
const RECENT_HISTORY_LEN: usize = 20;

/// Per-spin report returned to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct SpinReport {
    /// The classified result, with every category label.
    pub result: SpinResult,
    pub bankroll: Decimal,
    pub profit_loss: Decimal,
    pub signals: Vec<Signal>,
    pub messages: Vec<String>,
    pub hot_numbers: Vec<String>,
    pub cold_numbers: Vec<String>,
    pub recent_history: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionStats {
    pub bankroll: Decimal,
    pub initial_bankroll: Decimal,
    pub profit_loss: Decimal,
    pub total_spins: usize,
    pub hot_numbers: Vec<String>,
    pub cold_numbers: Vec<String>,
    pub recent_history: Vec<String>,
}

/// One player's complete game state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    config: GameConfig,
    bankroll: Option<Bankroll>,
    categories: BTreeMap<CategoryKind, CategoryState>,
    enabled: BTreeSet<CategoryKind>,
    spin_log: Vec<String>,
    frequency: HashMap<String, u64>,
    initialized: bool,
    warmed_up: bool,
}

impl Session {
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let categories = CategoryKind::ALL
            .iter()
            .map(|&kind| (kind, CategoryState::new(kind, &config)))
            .collect();
        let frequency = seed_frequency(&config);
        Ok(Session {
            config,
            bankroll: None,
            categories,
            enabled: BTreeSet::new(),
            spin_log: Vec::new(),
            frequency,
            initialized: false,
            warmed_up: false,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_warmed_up(&self) -> bool {
        self.warmed_up
    }

    /// Start a session: set the bankroll, choose the enabled categories and
    /// clear any previous state.
    pub fn initialize(&mut self, bankroll: Decimal, enabled: &[CategoryKind]) -> Result<()> {
        let bank = Bankroll::new(bankroll, self.config.strict_bankroll)?;

        self.bankroll = Some(bank);
        self.enabled = enabled.iter().copied().collect();
        self.spin_log.clear();
        self.frequency = seed_frequency(&self.config);
        for state in self.categories.values_mut() {
            state.reset(self.config.base_stake);
        }
        self.initialized = true;
        self.warmed_up = false;

        tracing::info!(
            bankroll = %bankroll,
            categories = ?self.enabled,
            "session initialized"
        );
        Ok(())
    }

    /// Replay historical results (most-recent-first, exactly
    /// `config.warmup_spins` of them) into histories and frequency tracking.
    /// No bets are resolved and no signals fire during warm-up.
    pub fn warm_up(&mut self, results: &[String]) -> Result<()> {
        if !self.initialized {
            return Err(Error::NotInitialized);
        }
        if results.len() != self.config.warmup_spins {
            return Err(Error::InvalidConfig(format!(
                "warm-up expects {} results, got {}",
                self.config.warmup_spins,
                results.len()
            )));
        }

        // Validate everything before mutating anything.
        let mut classified = Vec::with_capacity(results.len());
        for raw in results {
            classified.push(SpinResult::classify(raw, self.config.wheel)?);
        }

        // Chronological replay: oldest first.
        for result in classified.iter().rev() {
            self.track_result(result);
        }
        self.warmed_up = true;
        tracing::info!(spins = results.len(), "warm-up complete");
        Ok(())
    }

    /// Process one live spin: resolve open cycles, advance histories and
    /// detect new signals, returning the aggregated report.
    pub fn process_spin(&mut self, raw: &str) -> Result<SpinReport> {
        if !self.initialized {
            return Err(Error::NotInitialized);
        }
        if !self.warmed_up {
            return Err(Error::NotWarmedUp);
        }
        // Classification runs before any mutation; a rejected spin must
        // leave every history untouched.
        let result = SpinResult::classify(raw, self.config.wheel)?;

        self.spin_log.push(result.label.clone());
        *self.frequency.entry(result.label.clone()).or_insert(0) += 1;

        let mut signals: Vec<Signal> = Vec::new();
        let mut messages: Vec<String> = Vec::new();
        let engine = ProgressionEngine::new(&self.config);
        let detector = SignalDetector::new(&self.config);
        let bankroll = self.bankroll.as_mut().ok_or(Error::NotInitialized)?;

        for (&kind, state) in self.categories.iter_mut() {
            if !self.enabled.contains(&kind) {
                // Disabled categories keep tracking so they start warm if
                // enabled later in the session.
                state.push_history(result.category_label(kind));
                continue;
            }

            // Resolve the open cycle first; the new result only joins the
            // detection history afterwards.
            let resolution = engine.resolve(state, &result, bankroll)?;
            messages.extend(resolution.messages);
            let mut still_open = resolution.signal;

            state.push_history(result.category_label(kind));

            // No new bets on an exhausted bankroll.
            if still_open.is_none() && !state.is_active() && bankroll.balance() > Decimal::ZERO {
                if let Some(mut signal) = detector.detect(state, &self.spin_log, &self.frequency) {
                    // An opening stake is never larger than the bankroll can
                    // cover (per unit for spreads).
                    let affordable = bankroll.balance() / signal.target.unit_count();
                    if signal.stake > affordable {
                        messages.push(format!(
                            "WARNING ({}): bankroll covers only {:.2}, stake reduced",
                            signal.category, affordable
                        ));
                        signal.stake = affordable;
                        state.stake = affordable;
                    }
                    messages.push(describe_signal(&signal));
                    tracing::info!(
                        category = %signal.category,
                        target = %signal.target.describe(),
                        stake = %signal.stake,
                        "signal opened"
                    );
                    state.active = Some(signal.target.clone());
                    still_open = Some(signal);
                }
            }
            signals.extend(still_open);
        }

        let (cold_numbers, hot_numbers) = hot_cold(&self.frequency);
        let bankroll = self.bankroll.as_ref().ok_or(Error::NotInitialized)?;
        Ok(SpinReport {
            result,
            bankroll: bankroll.balance(),
            profit_loss: bankroll.profit_loss(),
            signals,
            messages,
            hot_numbers,
            cold_numbers,
            recent_history: self.recent_history(),
            timestamp: Utc::now(),
        })
    }

    pub fn stats(&self) -> Result<SessionStats> {
        let bankroll = self.bankroll.as_ref().ok_or(Error::NotInitialized)?;
        let (cold_numbers, hot_numbers) = hot_cold(&self.frequency);
        Ok(SessionStats {
            bankroll: bankroll.balance(),
            initial_bankroll: bankroll.initial(),
            profit_loss: bankroll.profit_loss(),
            total_spins: self.spin_log.len(),
            hot_numbers,
            cold_numbers,
            recent_history: self.recent_history(),
        })
    }

    /// Clear everything back to the pre-initialization state.
    pub fn reset(&mut self) {
        self.bankroll = None;
        self.enabled.clear();
        self.spin_log.clear();
        self.frequency = seed_frequency(&self.config);
        for state in self.categories.values_mut() {
            state.reset(self.config.base_stake);
        }
        self.initialized = false;
        self.warmed_up = false;
        tracing::info!("session reset");
    }

    /// JSON snapshot of the complete session state.
    pub fn snapshot(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Rebuild a session from a `snapshot` string.
    pub fn restore(json: &str) -> Result<Session> {
        let session: Session = serde_json::from_str(json)?;
        session.config.validate()?;
        Ok(session)
    }

    /// History/frequency bookkeeping shared by warm-up and live spins.
    fn track_result(&mut self, result: &SpinResult) {
        self.spin_log.push(result.label.clone());
        *self.frequency.entry(result.label.clone()).or_insert(0) += 1;
        for (&kind, state) in self.categories.iter_mut() {
            state.push_history(result.category_label(kind));
        }
    }

    fn recent_history(&self) -> Vec<String> {
        let start = self.spin_log.len().saturating_sub(RECENT_HISTORY_LEN);
        self.spin_log[start..].to_vec()
    }
}

fn seed_frequency(config: &GameConfig) -> HashMap<String, u64> {
    config
        .wheel
        .slot_labels()
        .into_iter()
        .map(|label| (label, 0))
        .collect()
}

fn describe_signal(signal: &Signal) -> String {
    match &signal.target {
        Target::Single(label) => format!(
            "SIGNAL ({}): bet {:.2} on {} (strength {})",
            signal.category, signal.stake, label, signal.strength
        ),
        Target::Spread(labels) => format!(
            "SIGNAL ({}): bet {:.2} on each of {} ({} numbers)",
            signal.category,
            signal.stake,
            labels.join("/"),
            labels.len()
        ),
    }
}

/// Independent sessions keyed by caller-supplied ids, plus a default
/// session for single-player use. Each session is fully isolated.
pub struct SessionManager {
    config: GameConfig,
    default_session: Session,
    sessions: HashMap<String, Session>,
}

impl SessionManager {
    pub fn new(config: GameConfig) -> Result<Self> {
        let default_session = Session::new(config.clone())?;
        Ok(SessionManager {
            config,
            default_session,
            sessions: HashMap::new(),
        })
    }

    /// The session for `id`, created on first use; `None` addresses the
    /// default session.
    pub fn session(&mut self, id: Option<&str>) -> &mut Session {
        match id {
            None => &mut self.default_session,
            Some(key) => self
                .sessions
                .entry(key.to_string())
                .or_insert_with(|| {
                    // Config was validated when the manager was built.
                    Session::new(self.config.clone())
                        .expect("validated config must produce a session")
                }),
        }
    }

    /// Drop a session entirely, releasing its state.
    pub fn clear(&mut self, id: Option<&str>) {
        match id {
            None => self.default_session.reset(),
            Some(key) => {
                self.sessions.remove(key);
            }
        }
    }
}
