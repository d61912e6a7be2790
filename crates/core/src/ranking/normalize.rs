use rust_decimal::prelude::ToPrimitive;

use super::types::ScoredOption;
use crate::errors::RankingError;

/// Batch normalization: rescale the cost and quality axes independently
/// onto [0,1] relative to the batch's min/max. A zero-range axis (all
/// values equal) maps every element to 0; there is no discriminating
/// information on that axis and no division by zero.
///
/// This stage is a pure rescale. The quality axis keeps its natural
/// direction here (1 = best in batch); the ranker owns the inversion into a
/// penalty.
pub fn normalize(options: &mut [ScoredOption]) -> Result<(), RankingError> {
    if options.is_empty() {
        return Err(RankingError::EmptyBatch);
    }

    let costs: Vec<f64> =
        options.iter().map(|option| option.total_price.to_f64().unwrap_or(0.0)).collect();
    let qualities: Vec<f64> =
        options.iter().map(|option| option.average_quality.to_f64().unwrap_or(0.0)).collect();

    let cost_scale = AxisScale::of(&costs);
    let quality_scale = AxisScale::of(&qualities);

    for (index, option) in options.iter_mut().enumerate() {
        option.normalized_cost = cost_scale.rescale(costs[index]);
        option.normalized_quality = quality_scale.rescale(qualities[index]);
    }

    Ok(())
}

struct AxisScale {
    min: f64,
    range: f64,
}

impl AxisScale {
    fn of(values: &[f64]) -> Self {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self { min, range: max - min }
    }

    fn rescale(&self, value: f64) -> f64 {
        if self.range == 0.0 {
            0.0
        } else {
            (value - self.min) / self.range
        }
    }
}
