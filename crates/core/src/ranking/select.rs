use super::types::{Recommendation, ScoredOption, Selection};
use super::MAX_RUNNERS_UP;

/// Selection over a ranked batch: best option, up to three runners-up, and
/// the worst option to avoid. An empty batch is the legitimate
/// `NoViableOptions` outcome, not an error. With exactly one option the
/// avoid entry equals the top pick (documented degenerate case).
pub fn select(ranked: &[ScoredOption]) -> Selection {
    let Some(first) = ranked.first() else {
        return Selection::NoViableOptions;
    };
    let last = ranked.last().unwrap_or(first);

    Selection::Picks {
        top_pick: render(first),
        runners_up: ranked.iter().skip(1).take(MAX_RUNNERS_UP).map(render).collect(),
        avoid: render(last),
    }
}

fn render(option: &ScoredOption) -> Recommendation {
    Recommendation {
        store_name: option.store_name.clone(),
        total_price: format!("${:.2}", option.total_price),
        average_quality: format!("{:.1}/10", option.average_quality),
        items: option.item_names(),
    }
}
