use super::entry::CoffeeEntry;
use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;

pub const SCORE_MIN: f64 = 6.0;
pub const SCORE_MAX: f64 = 10.0;
pub const SCORE_STEP: f64 = 0.25;
pub const SCORE_DEFAULT: f64 = 8.0;

const GRID_TOLERANCE: f64 = 1e-9;

#[derive(Error, Debug, PartialEq)]
pub enum ScoreError {
    #[error("Score {0} is outside 6..=10")]
    OutOfRange(f64),
    #[error("Score {0} is not on the 0.25 grid")]
    OffGrid(f64),
}

/// One attribute score: within `[6, 10]`, on the quarter-point grid.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Score(f64);

impl Score {
    pub const DEFAULT: Score = Score(SCORE_DEFAULT);

    pub fn new(value: f64) -> Result<Self, ScoreError> {
        if !value.is_finite() || !(SCORE_MIN..=SCORE_MAX).contains(&value) {
            return Err(ScoreError::OutOfRange(value));
        }
        let steps = (value - SCORE_MIN) / SCORE_STEP;
        if (steps - steps.round()).abs() > GRID_TOLERANCE {
            return Err(ScoreError::OffGrid(value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Every value a scorer can pick, lowest first.
    pub fn steps() -> impl Iterator<Item = Score> {
        let count = ((SCORE_MAX - SCORE_MIN) / SCORE_STEP).round() as usize;
        (0..=count).map(|i| Score(SCORE_MIN + i as f64 * SCORE_STEP))
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for Score {
    type Error = ScoreError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Score> for f64 {
    fn from(score: Score) -> Self {
        score.0
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter, StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    #[strum(to_string = "fragrance", serialize = "aroma")]
    Fragrance,
    Flavor,
    Aftertaste,
    Acidity,
    Body,
    Balance,
}

impl CoffeeEntry {
    pub fn score(&self, attribute: Attribute) -> Score {
        match attribute {
            Attribute::Fragrance => self.fragrance_score,
            Attribute::Flavor => self.flavor_score,
            Attribute::Aftertaste => self.aftertaste_score,
            Attribute::Acidity => self.acidity_score,
            Attribute::Body => self.body_score,
            Attribute::Balance => self.balance_score,
        }
    }

    pub(crate) fn score_slot(&mut self, attribute: Attribute) -> &mut Score {
        match attribute {
            Attribute::Fragrance => &mut self.fragrance_score,
            Attribute::Flavor => &mut self.flavor_score,
            Attribute::Aftertaste => &mut self.aftertaste_score,
            Attribute::Acidity => &mut self.acidity_score,
            Attribute::Body => &mut self.body_score,
            Attribute::Balance => &mut self.balance_score,
        }
    }

    /// Mean of the six attribute scores, computed from the current values.
    pub fn aggregate_score(&self) -> f64 {
        let sum: f64 = Attribute::iter().map(|a| self.score(a).value()).sum();
        sum / Attribute::iter().count() as f64
    }
}

/// Display form of an aggregate: two decimals.
pub fn format_score(value: f64) -> String {
    format!("{value:.2}")
}
