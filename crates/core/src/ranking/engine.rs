use super::basket::aggregate;
use super::normalize::normalize;
use super::rank::rank;
use super::select::select;
use super::types::{MatchedOption, ScoredOption, Selection};
use super::PreferenceMode;
use crate::errors::RankingError;

/// Facade over the full pipeline. Holds no state: every call is a pure
/// function of its inputs, so the engine is freely shareable across
/// concurrent requests.
#[derive(Clone, Copy, Debug, Default)]
pub struct RankingEngine;

impl RankingEngine {
    pub fn new() -> Self {
        Self
    }

    /// Aggregate, normalize, and rank a batch. Exposed separately from
    /// [`Self::recommend`] for callers that want the scored detail.
    pub fn rank_options(
        &self,
        options: Vec<MatchedOption>,
        mode: PreferenceMode,
    ) -> Result<Vec<ScoredOption>, RankingError> {
        let mut scored =
            options.into_iter().map(aggregate).collect::<Result<Vec<_>, _>>()?;
        normalize(&mut scored)?;
        Ok(rank(scored, mode))
    }

    /// Full pipeline. Zero candidate stores is the expected
    /// `NoViableOptions` outcome, not an internal error; the defensive
    /// empty-batch/empty-basket checks below it only fire on upstream
    /// contract violations.
    pub fn recommend(
        &self,
        options: Vec<MatchedOption>,
        mode: PreferenceMode,
    ) -> Result<Selection, RankingError> {
        if options.is_empty() {
            return Ok(Selection::NoViableOptions);
        }

        let ranked = self.rank_options(options, mode)?;
        Ok(select(&ranked))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::RankingEngine;
    use crate::catalog::Item;
    use crate::errors::RankingError;
    use crate::ranking::{MatchedOption, PreferenceMode, Selection};

    fn item(name: &str, price: &str, quality: &str) -> Item {
        Item {
            name: name.to_string(),
            price: price.parse::<Decimal>().expect("price literal"),
            quality_score: quality.parse::<Decimal>().expect("quality literal"),
            in_stock: true,
        }
    }

    fn option(store: &str, items: Vec<Item>) -> MatchedOption {
        MatchedOption { store_name: store.to_string(), matched_items: items }
    }

    fn three_store_batch() -> Vec<MatchedOption> {
        vec![
            option("A", vec![item("Flour", "4.00", "4.0"), item("Eggs", "6.00", "4.0")]),
            option("B", vec![item("Flour", "11.00", "9.0"), item("Eggs", "9.00", "9.0")]),
            option("C", vec![item("Flour", "7.50", "6.0"), item("Eggs", "7.50", "6.0")]),
        ]
    }

    #[test]
    fn empty_candidate_list_is_no_viable_options_not_an_error() {
        let engine = RankingEngine::new();
        let selection = engine
            .recommend(Vec::new(), PreferenceMode::Balanced)
            .expect("empty input is a legitimate outcome");
        assert_eq!(selection, Selection::NoViableOptions);
    }

    #[test]
    fn price_mode_ranks_the_cheap_low_quality_store_first() {
        let engine = RankingEngine::new();
        // A: cost 0.0, penalty 1.0 -> 0.30; B: 0.70; C: 0.53.
        let Selection::Picks { top_pick, runners_up, avoid } = engine
            .recommend(three_store_batch(), PreferenceMode::Price)
            .expect("recommend")
        else {
            panic!("batch must be viable");
        };

        assert_eq!(top_pick.store_name, "A");
        assert_eq!(top_pick.total_price, "$10.00");
        let names: Vec<&str> = runners_up.iter().map(|r| r.store_name.as_str()).collect();
        assert_eq!(names, vec!["C", "B"]);
        assert_eq!(avoid.store_name, "B");
    }

    #[test]
    fn quality_mode_ranks_the_premium_store_first() {
        let engine = RankingEngine::new();
        let Selection::Picks { top_pick, avoid, .. } = engine
            .recommend(three_store_batch(), PreferenceMode::Quality)
            .expect("recommend")
        else {
            panic!("batch must be viable");
        };

        assert_eq!(top_pick.store_name, "B");
        assert_eq!(top_pick.average_quality, "9.0/10");
        assert_eq!(avoid.store_name, "A");
    }

    #[test]
    fn identical_calls_produce_identical_selections() {
        let engine = RankingEngine::new();
        let first = engine.recommend(three_store_batch(), PreferenceMode::Balanced).expect("first");
        let second =
            engine.recommend(three_store_batch(), PreferenceMode::Balanced).expect("second");
        assert_eq!(first, second);
    }

    #[test]
    fn contract_violation_surfaces_as_empty_basket_error() {
        let engine = RankingEngine::new();
        let options = vec![option("Ghost Mart", Vec::new())];

        let error = engine.recommend(options, PreferenceMode::Price).unwrap_err();
        assert_eq!(error, RankingError::EmptyBasket { store: "Ghost Mart".to_string() });
    }
}
