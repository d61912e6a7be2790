use rust_decimal::Decimal;

use super::types::{MatchedOption, ScoredOption};
use crate::errors::RankingError;

/// Basket aggregation: total price (2 dp, currency convention) and average
/// quality (1 dp) for one store's matched items. Pure function; the
/// normalized fields are filled in later by the batch stages.
///
/// An empty basket violates the upstream matcher's contract and is rejected
/// rather than silently scored as zero.
pub fn aggregate(option: MatchedOption) -> Result<ScoredOption, RankingError> {
    if option.matched_items.is_empty() {
        return Err(RankingError::EmptyBasket { store: option.store_name });
    }

    let total_price: Decimal =
        option.matched_items.iter().map(|item| item.price).sum::<Decimal>().round_dp(2);
    let quality_sum: Decimal =
        option.matched_items.iter().map(|item| item.quality_score).sum();
    let average_quality =
        (quality_sum / Decimal::from(option.matched_items.len())).round_dp(1);

    Ok(ScoredOption {
        store_name: option.store_name,
        matched_items: option.matched_items,
        total_price,
        average_quality,
        normalized_cost: 0.0,
        normalized_quality: 0.0,
        quality_penalty: 0.0,
        composite_score: 0.0,
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::aggregate;
    use crate::catalog::Item;
    use crate::errors::RankingError;
    use crate::ranking::MatchedOption;

    fn item(name: &str, price: &str, quality: &str) -> Item {
        Item {
            name: name.to_string(),
            price: price.parse::<Decimal>().expect("price literal"),
            quality_score: quality.parse::<Decimal>().expect("quality literal"),
            in_stock: true,
        }
    }

    #[test]
    fn totals_and_averages_are_rounded_to_currency_and_scale_precision() {
        let option = MatchedOption {
            store_name: "Green Grocer".to_string(),
            matched_items: vec![
                item("Bread", "3.333", "7.0"),
                item("Cheese", "6.333", "8.0"),
                item("Ham", "4.333", "8.5"),
            ],
        };

        let scored = aggregate(option).expect("non-empty basket aggregates");

        assert_eq!(scored.total_price, "14.00".parse::<Decimal>().unwrap());
        // (7.0 + 8.0 + 8.5) / 3 = 7.8333... -> 7.8
        assert_eq!(scored.average_quality, "7.8".parse::<Decimal>().unwrap());
    }

    #[test]
    fn single_item_basket_keeps_its_values() {
        let option = MatchedOption {
            store_name: "Corner Shop".to_string(),
            matched_items: vec![item("Milk", "1.20", "6.5")],
        };

        let scored = aggregate(option).expect("aggregate");
        assert_eq!(scored.total_price, "1.20".parse::<Decimal>().unwrap());
        assert_eq!(scored.average_quality, "6.5".parse::<Decimal>().unwrap());
    }

    #[test]
    fn empty_basket_is_rejected() {
        let option =
            MatchedOption { store_name: "Ghost Mart".to_string(), matched_items: Vec::new() };

        let error = aggregate(option).expect_err("empty basket must fail");
        assert_eq!(error, RankingError::EmptyBasket { store: "Ghost Mart".to_string() });
    }
}
