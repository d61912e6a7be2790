use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::Item;

/// A store paired with the subset of its inventory that satisfies the
/// requested item list. Constructed fresh per request by the upstream
/// matcher; by contract `matched_items` is never empty.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchedOption {
    pub store_name: String,
    pub matched_items: Vec<Item>,
}

/// A matched option with its derived metrics. Built and discarded within a
/// single ranking call; never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredOption {
    pub store_name: String,
    pub matched_items: Vec<Item>,
    /// Sum of matched item prices, rounded to 2 decimal places.
    pub total_price: Decimal,
    /// Mean of matched item quality scores, rounded to 1 decimal place.
    pub average_quality: Decimal,
    /// Cost rescaled onto [0,1] relative to the batch (0 = cheapest).
    pub normalized_cost: f64,
    /// Quality rescaled onto [0,1] relative to the batch (1 = best).
    pub normalized_quality: f64,
    /// Inverted quality axis used for blending (0 = best quality).
    pub quality_penalty: f64,
    /// Preference-weighted blend of the two penalty axes; lower is better.
    pub composite_score: f64,
}

impl ScoredOption {
    pub fn item_names(&self) -> Vec<String> {
        self.matched_items.iter().map(|item| item.name.clone()).collect()
    }
}

/// One selected entry, pre-formatted so the narration layer never has to
/// re-derive numbers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub store_name: String,
    /// Currency-prefixed basket total, e.g. `$23.75`.
    pub total_price: String,
    /// Quality with its scale indicator, e.g. `8.5/10`.
    pub average_quality: String,
    pub items: Vec<String>,
}

/// Outcome of selection over a ranked batch. `NoViableOptions` is the
/// normal, expected result when no store could satisfy the request. It is
/// presented to the user as an apology, never as a system error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Selection {
    NoViableOptions,
    Picks {
        top_pick: Recommendation,
        runners_up: Vec<Recommendation>,
        avoid: Recommendation,
    },
}

impl Selection {
    pub fn is_viable(&self) -> bool {
        matches!(self, Self::Picks { .. })
    }
}
