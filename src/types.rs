//! Core wheel and betting types
//!
//! Pure value model: slot classification, bet classes, targets and signals.
//! Nothing in here holds session state.

use crate::error::{Error, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The 18 red slots; every other slot in 1-36 is black, zeros are green.
pub const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

/// Physical slot order of the European wheel, used for neighbor bets.
pub const EUROPEAN_WHEEL: [u8; 37] = [
    0, 32, 15, 19, 4, 21, 2, 25, 17, 34, 6, 27, 13, 36, 11, 30, 8, 23, 10, 5, 24, 16, 33, 1, 20,
    14, 31, 9, 22, 18, 29, 7, 28, 12, 35, 3, 26,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum WheelVariant {
    #[default]
    European,
    American,
}

impl WheelVariant {
    /// Number of pockets on the wheel.
    pub fn slots(&self) -> u32 {
        match self {
            WheelVariant::European => 37,
            WheelVariant::American => 38,
        }
    }

    pub fn allows_double_zero(&self) -> bool {
        matches!(self, WheelVariant::American)
    }

    /// Every canonical slot label for this wheel.
    pub fn slot_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = (0..=36).map(|n| n.to_string()).collect();
        if self.allows_double_zero() {
            labels.push("00".to_string());
        }
        labels
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "B")]
    Black,
    #[serde(rename = "G")]
    Green,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "R",
            Color::Black => "B",
            Color::Green => "G",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Parity {
    Even,
    Odd,
    Zero,
}

impl Parity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Parity::Even => "EVEN",
            Parity::Odd => "ODD",
            Parity::Zero => "ZERO",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Height {
    Low,
    High,
    Zero,
}

impl Height {
    pub fn as_str(&self) -> &'static str {
        match self {
            Height::Low => "LOW",
            Height::High => "HIGH",
            Height::Zero => "ZERO",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Dozen {
    D1,
    D2,
    D3,
    Zero,
}

impl Dozen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dozen::D1 => "D1",
            Dozen::D2 => "D2",
            Dozen::D3 => "D3",
            Dozen::Zero => "ZERO",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Column {
    C1,
    C2,
    C3,
    Zero,
}

impl Column {
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::C1 => "C1",
            Column::C2 => "C2",
            Column::C3 => "C3",
            Column::Zero => "ZERO",
        }
    }
}

/// Bet class determines the payout multiplier applied to a winning stake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BetClass {
    EvenMoney,
    TwoToOne,
    Straight,
}

impl BetClass {
    /// Gross payout multiplier (stake included): 2x, 3x or 36x.
    pub fn payout_multiplier(&self) -> Decimal {
        match self {
            BetClass::EvenMoney => Decimal::from(2),
            BetClass::TwoToOne => Decimal::from(3),
            BetClass::Straight => Decimal::from(36),
        }
    }
}

/// One tracked betting category, each driving an independent bet cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Color,
    Parity,
    Height,
    Dozen,
    Column,
    #[serde(rename = "cold")]
    ColdNumber,
    Neighbors,
}

impl CategoryKind {
    pub const ALL: [CategoryKind; 7] = [
        CategoryKind::Color,
        CategoryKind::Parity,
        CategoryKind::Height,
        CategoryKind::Dozen,
        CategoryKind::Column,
        CategoryKind::ColdNumber,
        CategoryKind::Neighbors,
    ];

    pub fn bet_class(&self) -> BetClass {
        match self {
            CategoryKind::Color | CategoryKind::Parity | CategoryKind::Height => {
                BetClass::EvenMoney
            }
            CategoryKind::Dozen | CategoryKind::Column => BetClass::TwoToOne,
            CategoryKind::ColdNumber | CategoryKind::Neighbors => BetClass::Straight,
        }
    }

    /// Tag used in report messages.
    pub fn tag(&self) -> &'static str {
        match self {
            CategoryKind::Color => "COLOR",
            CategoryKind::Parity => "PARITY",
            CategoryKind::Height => "HIGH_LOW",
            CategoryKind::Dozen => "DOZEN",
            CategoryKind::Column => "COLUMN",
            CategoryKind::ColdNumber => "COLD",
            CategoryKind::Neighbors => "NEIGHBORS",
        }
    }
}

impl std::str::FromStr for CategoryKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "color" => Ok(CategoryKind::Color),
            "parity" => Ok(CategoryKind::Parity),
            "height" | "high_low" => Ok(CategoryKind::Height),
            "dozen" => Ok(CategoryKind::Dozen),
            "column" => Ok(CategoryKind::Column),
            "cold" | "cold_number" => Ok(CategoryKind::ColdNumber),
            "neighbors" => Ok(CategoryKind::Neighbors),
            other => Err(Error::InvalidConfig(format!("unknown category '{other}'"))),
        }
    }
}

impl std::fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// What an open cycle is betting on. Spread targets carry one label per
/// covered number; the stake attached to a spread is per-number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Single(String),
    Spread(Vec<String>),
}

impl Target {
    /// Does this outcome label win the bet?
    pub fn hits(&self, outcome: &str) -> bool {
        match self {
            Target::Single(label) => label == outcome,
            Target::Spread(labels) => labels.iter().any(|l| l == outcome),
        }
    }

    /// Number of units staked (1 for a single label, N for a spread).
    pub fn unit_count(&self) -> Decimal {
        match self {
            Target::Single(_) => Decimal::ONE,
            Target::Spread(labels) => Decimal::from(labels.len() as u64),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Target::Single(label) => label.clone(),
            Target::Spread(labels) => labels.join("/"),
        }
    }
}

/// A recommended wager emitted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub category: CategoryKind,
    pub target: Target,
    /// Per-unit stake (equal to the total for single-label targets).
    pub stake: Decimal,
    /// Heuristic strength: streak length, delay in spins, etc.
    pub strength: u32,
    /// Consecutive losses so far in this cycle.
    pub losses: u32,
}

/// A classified roulette result. Built once per spin, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinResult {
    pub label: String,
    pub color: Color,
    pub parity: Parity,
    pub height: Height,
    pub dozen: Dozen,
    pub column: Column,
}

impl SpinResult {
    /// Validate and classify a raw slot label for the given wheel.
    ///
    /// Accepts `"0"`..`"36"`, plus `"00"` on the American wheel only.
    pub fn classify(raw: &str, variant: WheelVariant) -> Result<SpinResult> {
        let trimmed = raw.trim();

        if trimmed == "0" || (trimmed == "00" && variant.allows_double_zero()) {
            return Ok(SpinResult {
                label: trimmed.to_string(),
                color: Color::Green,
                parity: Parity::Zero,
                height: Height::Zero,
                dozen: Dozen::Zero,
                column: Column::Zero,
            });
        }

        let n: u8 = trimmed
            .parse()
            .map_err(|_| Error::InvalidResult(trimmed.to_string()))?;
        if !(1..=36).contains(&n) {
            return Err(Error::InvalidResult(trimmed.to_string()));
        }

        let color = if RED_NUMBERS.contains(&n) {
            Color::Red
        } else {
            Color::Black
        };
        let parity = if n % 2 == 0 { Parity::Even } else { Parity::Odd };
        let height = if n <= 18 { Height::Low } else { Height::High };
        let dozen = match n {
            1..=12 => Dozen::D1,
            13..=24 => Dozen::D2,
            _ => Dozen::D3,
        };
        let column = match n % 3 {
            1 => Column::C1,
            2 => Column::C2,
            _ => Column::C3,
        };

        Ok(SpinResult {
            label: n.to_string(),
            color,
            parity,
            height,
            dozen,
            column,
        })
    }

    pub fn is_zero(&self) -> bool {
        self.color == Color::Green
    }

    /// Label of this result within a category, e.g. `"R"` for color or
    /// `"D2"` for dozen. Straight-up categories use the slot label itself.
    pub fn category_label(&self, kind: CategoryKind) -> &str {
        match kind {
            CategoryKind::Color => self.color.as_str(),
            CategoryKind::Parity => self.parity.as_str(),
            CategoryKind::Height => self.height.as_str(),
            CategoryKind::Dozen => self.dozen.as_str(),
            CategoryKind::Column => self.column.as_str(),
            CategoryKind::ColdNumber | CategoryKind::Neighbors => &self.label,
        }
    }
}

/// Zero markers never participate in streaks or reversal targets.
pub fn is_zero_label(label: &str) -> bool {
    matches!(label, "G" | "ZERO")
}

/// Opposite label for even-money reversal bets.
pub fn opposite_label(label: &str) -> Option<&'static str> {
    match label {
        "R" => Some("B"),
        "B" => Some("R"),
        "EVEN" => Some("ODD"),
        "ODD" => Some("EVEN"),
        "LOW" => Some("HIGH"),
        "HIGH" => Some("LOW"),
        _ => None,
    }
}

/// The spun number plus `span` physical neighbors on each side of the
/// European wheel, wrapping around the rim.
pub fn wheel_neighbors(label: &str, span: usize) -> Option<Vec<String>> {
    let n: u8 = label.parse().ok()?;
    let center = EUROPEAN_WHEEL.iter().position(|&w| w == n)?;
    let len = EUROPEAN_WHEEL.len();
    let mut out = Vec::with_capacity(span * 2 + 1);
    for offset in 0..=(span * 2) {
        let idx = (center + len - span + offset) % len;
        out.push(EUROPEAN_WHEEL[idx].to_string());
    }
    Some(out)
}
