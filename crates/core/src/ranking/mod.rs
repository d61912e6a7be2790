//! Multi-store option ranking and recommendation engine.
//!
//! Given the matched options for a request (store + the items it can
//! supply), the pipeline runs strictly upward:
//! basket aggregation → batch normalization → preference-weighted ranking →
//! selection of top pick, runners-up, and the option to avoid.
//!
//! Every stage is a pure function of its input; nothing is cached between
//! calls and concurrent calls with independent inputs cannot interfere.

mod basket;
mod engine;
mod normalize;
mod rank;
mod select;
mod types;

pub use basket::aggregate;
pub use engine::RankingEngine;
pub use normalize::normalize;
pub use rank::{rank, Weights};
pub use select::select;
pub use types::{MatchedOption, Recommendation, ScoredOption, Selection};

use serde::{Deserialize, Serialize};

use crate::errors::ClientInputError;

/// Maximum number of runner-up recommendations after the top pick.
pub const MAX_RUNNERS_UP: usize = 3;

/// User-selected weighting policy. Closed set; anything else is a caller
/// error, not a fallback to a default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceMode {
    Price,
    Quality,
    Balanced,
}

impl PreferenceMode {
    /// Fixed weight table. Both axes are penalties (lower is better), so a
    /// heavier price weight means cost dominates the blend.
    pub fn weights(self) -> Weights {
        match self {
            Self::Price => Weights { price: 0.7, quality: 0.3 },
            Self::Quality => Weights { price: 0.3, quality: 0.7 },
            Self::Balanced => Weights { price: 0.5, quality: 0.5 },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Quality => "quality",
            Self::Balanced => "balanced",
        }
    }
}

impl std::str::FromStr for PreferenceMode {
    type Err = ClientInputError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "price" => Ok(Self::Price),
            "quality" => Ok(Self::Quality),
            "balanced" => Ok(Self::Balanced),
            other => Err(ClientInputError::InvalidPreferenceMode(other.to_owned())),
        }
    }
}
