//! Orchestration of the full conversational loop: extract a shopping list
//! from the transcript, probe every store in the extracted category,
//! rank the viable baskets, and narrate the result.

use std::sync::Arc;

use shopscout_core::catalog::Catalog;
use shopscout_core::errors::ApplicationError;
use shopscout_core::ranking::{MatchedOption, PreferenceMode, RankingEngine, Selection};
use tracing::{debug, info, instrument};

use crate::extraction::{extract_request, ConversationTurn};
use crate::llm::LlmClient;
use crate::matching::InventoryMatcher;
use crate::narration::{narrate, NO_OPTIONS_APOLOGY};

pub struct AgentRuntime {
    catalog: Arc<Catalog>,
    llm: Arc<dyn LlmClient>,
    matcher: Arc<dyn InventoryMatcher>,
    engine: RankingEngine,
}

/// The narrated reply together with the structured selection behind it, so
/// interface layers can expose either.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentReply {
    pub message: String,
    pub selection: Selection,
}

impl AgentRuntime {
    pub fn new(
        catalog: Arc<Catalog>,
        llm: Arc<dyn LlmClient>,
        matcher: Arc<dyn InventoryMatcher>,
    ) -> Self {
        Self { catalog, llm, matcher, engine: RankingEngine::new() }
    }

    /// Handle one conversational turn. LLM transport and parse failures
    /// surface as `Integration` errors; a request no store can satisfy is
    /// a normal reply carrying the apology, not an error.
    #[instrument(skip_all, fields(mode = mode.as_str()))]
    pub async fn converse(
        &self,
        transcript: &[ConversationTurn],
        latest_request: &str,
        mode: PreferenceMode,
    ) -> Result<AgentReply, ApplicationError> {
        let categories = self.catalog.categories();
        let extracted =
            extract_request(self.llm.as_ref(), transcript, latest_request, &categories)
                .await
                .map_err(|error| ApplicationError::Integration(format!("{error:#}")))?;

        if !extracted.is_actionable() {
            debug!("extraction produced no actionable list");
            return Ok(AgentReply {
                message: NO_OPTIONS_APOLOGY.to_string(),
                selection: Selection::NoViableOptions,
            });
        }

        let category = extracted.category.as_deref().unwrap_or_default();
        info!(category, items = extracted.items.len(), "shopping list extracted");

        let options = self.collect_options(&extracted.items, category).await?;
        debug!(viable_stores = options.len(), "inventory matching complete");

        let selection = self.engine.recommend(options, mode)?;
        let message = narrate(self.llm.as_ref(), latest_request, mode, &selection)
            .await
            .map_err(|error| ApplicationError::Integration(format!("{error:#}")))?;

        Ok(AgentReply { message, selection })
    }

    async fn collect_options(
        &self,
        items: &[String],
        category: &str,
    ) -> Result<Vec<MatchedOption>, ApplicationError> {
        let mut options = Vec::new();

        for store in self.catalog.stores_in_category(category) {
            let matched = self
                .matcher
                .match_items(items, store)
                .await
                .map_err(|error| ApplicationError::Integration(format!("{error:#}")))?;

            if let Some(matched_items) = matched {
                options.push(MatchedOption { store_name: store.name.clone(), matched_items });
            }
        }

        Ok(options)
    }
}
