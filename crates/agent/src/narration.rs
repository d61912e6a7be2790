//! Stage three of the agent loop: turn a selection into conversational
//! prose. The numbers are fixed before the model sees them; it is told to
//! fact-check against the ranked data and never invent prices or scores.

use anyhow::{Context, Result};
use serde_json::json;
use shopscout_core::ranking::{PreferenceMode, Selection};

use crate::llm::LlmClient;

/// Fixed reply for `NoViableOptions`. No LLM call is made for this case,
/// so the wording is stable across runs.
pub const NO_OPTIONS_APOLOGY: &str = "I'm sorry, but it seems no single store has a complete set \
of matching items in stock for that request. Could you try being more specific or asking for \
something else?";

pub async fn narrate(
    llm: &dyn LlmClient,
    latest_request: &str,
    mode: PreferenceMode,
    selection: &Selection,
) -> Result<String> {
    let Selection::Picks { top_pick, runners_up, avoid } = selection else {
        return Ok(NO_OPTIONS_APOLOGY.to_string());
    };

    let ranked = json!({
        "top_pick": top_pick,
        "runners_up": runners_up,
        "avoid": avoid,
    });
    let formatted = serde_json::to_string_pretty(&ranked).context("serialize ranked options")?;

    let prompt = narration_prompt(latest_request, mode, &formatted);
    llm.complete(&prompt).await.context("recommendation narration failed")
}

fn narration_prompt(latest_request: &str, mode: PreferenceMode, formatted_options: &str) -> String {
    let preference = mode.as_str();
    format!(
        r#"You are a concise and factual AI shopping assistant. Your goal is to give a direct and clear answer to the user's latest request using ONLY the provided data.

**User's Latest Request:** "{latest_request}"

**Analysis Results (Ranked by user preference: '{preference}'):**
```json
{formatted_options}
```

**Your Task:**
Based on the user's latest request and the ranked analysis results, provide a helpful response.
1. **Fact-Check Everything**: Your response MUST be based *exclusively* on the data provided in the "Analysis Results". Do not invent or misstate prices or quality scores.
2. **Recommend & List Items**: When recommending an option, you MUST state the store name, total price, quality score, AND the full list of items that make up that recommendation.
3. **Handle Follow-ups**: If the user asks for "more quality" or an "alternative", recommend the next best option from the ranked list, again including all its details.
4. **Be Direct**: Keep your response concise and to the point.

Example response:
"For the best quality, I recommend Organic Emporium. The total cost is $25.50 for an average quality of 9.5/10. The items included are: organic flour, organic eggs, organic milk, and organic butter.""#
    )
}
