use std::cmp::Ordering;

use super::types::ScoredOption;
use super::PreferenceMode;

/// Blend weights for the two penalty axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weights {
    pub price: f64,
    pub quality: f64,
}

/// Preference-weighted ranking over a normalized batch, ascending by
/// composite score (lower is better).
///
/// Both axes are treated as penalties. Cost already points the right way;
/// quality is inverted here, in exactly one place, so every mode shares the
/// same sign convention:
///
/// `composite = wp * normalized_cost + wq * (1 - normalized_quality)`
///
/// Equal composite scores order by store name (case-insensitive) so the
/// ranking is deterministic regardless of input order.
pub fn rank(mut options: Vec<ScoredOption>, mode: PreferenceMode) -> Vec<ScoredOption> {
    let weights = mode.weights();

    for option in &mut options {
        option.quality_penalty = 1.0 - option.normalized_quality;
        option.composite_score =
            weights.price * option.normalized_cost + weights.quality * option.quality_penalty;
    }

    options.sort_by(|a, b| {
        a.composite_score
            .partial_cmp(&b.composite_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.store_name.to_lowercase().cmp(&b.store_name.to_lowercase()))
    });

    options
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::rank;
    use crate::ranking::{normalize, PreferenceMode, ScoredOption};

    fn scored(name: &str, price: &str, quality: &str) -> ScoredOption {
        ScoredOption {
            store_name: name.to_string(),
            matched_items: Vec::new(),
            total_price: price.parse::<Decimal>().expect("price literal"),
            average_quality: quality.parse::<Decimal>().expect("quality literal"),
            normalized_cost: 0.0,
            normalized_quality: 0.0,
            quality_penalty: 0.0,
            composite_score: 0.0,
        }
    }

    fn normalized(options: Vec<ScoredOption>) -> Vec<ScoredOption> {
        let mut options = options;
        normalize(&mut options).expect("normalize fixture batch");
        options
    }

    #[test]
    fn price_mode_prefers_the_cheaper_store_at_equal_quality() {
        let options =
            normalized(vec![scored("Budget Barn", "10.00", "7.0"), scored("Pricey Place", "18.00", "7.0")]);

        let ranked = rank(options, PreferenceMode::Price);

        assert_eq!(ranked[0].store_name, "Budget Barn");
        assert!(ranked[0].composite_score < ranked[1].composite_score);
    }

    #[test]
    fn quality_mode_scenario_matches_hand_computed_scores() {
        // Stores A (10.00, 4.0), B (20.00, 9.0), C (15.00, 6.0).
        // Normalized cost:    A=0.0, B=1.0, C=0.5
        // Quality penalty:    A=1.0, B=0.0, C=0.6
        // wp=0.3, wq=0.7  ->  A=0.70, B=0.30, C=0.57  =>  B, C, A
        let options = normalized(vec![
            scored("A", "10.00", "4.0"),
            scored("B", "20.00", "9.0"),
            scored("C", "15.00", "6.0"),
        ]);

        let ranked = rank(options, PreferenceMode::Quality);

        let names: Vec<&str> = ranked.iter().map(|o| o.store_name.as_str()).collect();
        assert_eq!(names, vec!["B", "C", "A"]);
        assert!((ranked[0].composite_score - 0.30).abs() < 1e-9);
        assert!((ranked[1].composite_score - 0.57).abs() < 1e-9);
        assert!((ranked[2].composite_score - 0.70).abs() < 1e-9);
    }

    #[test]
    fn balanced_mode_weighs_both_axes_equally() {
        let options = normalized(vec![
            scored("A", "10.00", "4.0"),
            scored("B", "20.00", "9.0"),
            scored("C", "15.00", "6.0"),
        ]);

        let ranked = rank(options, PreferenceMode::Balanced);

        // A = 0.5*0.0 + 0.5*1.0 = 0.50, B = 0.50, C = 0.55; tie between A
        // and B breaks on name.
        let names: Vec<&str> = ranked.iter().map(|o| o.store_name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn ties_break_on_store_name_case_insensitively() {
        // Identical metrics everywhere: composite scores are all equal.
        let options = normalized(vec![
            scored("zeta mart", "10.00", "5.0"),
            scored("Acme", "10.00", "5.0"),
            scored("beta mart", "10.00", "5.0"),
        ]);

        let ranked = rank(options, PreferenceMode::Balanced);

        let names: Vec<&str> = ranked.iter().map(|o| o.store_name.as_str()).collect();
        assert_eq!(names, vec!["Acme", "beta mart", "zeta mart"]);
    }

    #[test]
    fn ranking_is_deterministic_across_input_orders() {
        let batch = vec![
            scored("North Market", "22.40", "8.1"),
            scored("South Market", "19.90", "7.4"),
            scored("East Market", "25.10", "9.2"),
            scored("West Market", "19.90", "7.4"),
        ];
        let mut reversed = batch.clone();
        reversed.reverse();

        let first = rank(normalized(batch), PreferenceMode::Balanced);
        let second = rank(normalized(reversed), PreferenceMode::Balanced);

        let first_names: Vec<&str> = first.iter().map(|o| o.store_name.as_str()).collect();
        let second_names: Vec<&str> = second.iter().map(|o| o.store_name.as_str()).collect();
        assert_eq!(first_names, second_names);
    }
}
