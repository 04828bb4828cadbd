use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

/// Verdict for a sung sentence, from the share of correctly sung beats
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    IntoStaticStr,
)]
pub enum SentenceRating {
    #[default]
    #[strum(serialize = "AWFUL")]
    Awful,
    #[strum(serialize = "BAD")]
    Bad,
    #[strum(serialize = "NOT BAD")]
    NotBad,
    #[strum(serialize = "GOOD")]
    Good,
    #[strum(serialize = "GREAT")]
    Great,
    #[strum(serialize = "PERFECT")]
    Perfect,
}

impl SentenceRating {
    /// Rate a sentence; `perfect_threshold` is the fraction counted as perfect
    pub fn from_fraction(fraction: f64, perfect_threshold: f64) -> Self {
        match fraction {
            f if f >= perfect_threshold => Self::Perfect,
            f if f >= 0.8 => Self::Great,
            f if f >= 0.6 => Self::Good,
            f if f >= 0.4 => Self::NotBad,
            f if f >= 0.2 => Self::Bad,
            _ => Self::Awful,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for SentenceRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
