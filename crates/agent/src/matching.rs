//! Stage two of the agent loop: decide, per store, whether the shopping
//! list can be fulfilled from that store's in-stock inventory.
//!
//! Matching is all-or-nothing. A store that covers four of five items
//! offers nothing; partial baskets never reach the ranking pipeline.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use shopscout_core::catalog::{Item, Store};
use tracing::debug;

use crate::extraction::strip_code_fences;
use crate::llm::LlmClient;

#[async_trait]
pub trait InventoryMatcher: Send + Sync {
    /// `Ok(Some(items))` when the store fulfills the whole list,
    /// `Ok(None)` when it cannot. `Err` is reserved for transport and
    /// parse failures, never for "no match".
    async fn match_items(&self, needed: &[String], store: &Store) -> Result<Option<Vec<Item>>>;
}

/// Literal name matching against the in-stock inventory. No LLM involved;
/// this is what the deterministic `/api/rank` path and the tests use.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExactMatcher;

#[async_trait]
impl InventoryMatcher for ExactMatcher {
    async fn match_items(&self, needed: &[String], store: &Store) -> Result<Option<Vec<Item>>> {
        Ok(store.match_items_exact(needed))
    }
}

/// Conceptual matching via the LLM: "mid-range graphics card" may match
/// "Nvidia GeForce RTX 5070". The model must echo exact inventory names
/// back; anything it invents fails the match.
pub struct SemanticMatcher<L> {
    llm: L,
}

impl<L> SemanticMatcher<L>
where
    L: LlmClient,
{
    pub fn new(llm: L) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl<L> InventoryMatcher for SemanticMatcher<L>
where
    L: LlmClient,
{
    async fn match_items(&self, needed: &[String], store: &Store) -> Result<Option<Vec<Item>>> {
        if needed.is_empty() {
            return Ok(None);
        }

        let available = store.in_stock_names();
        if available.is_empty() {
            return Ok(None);
        }

        let prompt = matching_prompt(needed, &available);
        let reply =
            self.llm.complete(&prompt).await.context("semantic inventory matching failed")?;

        let Some(echoed_names) = parse_matching_reply(&reply)? else {
            debug!(store = %store.name, "store cannot fulfill the full list");
            return Ok(None);
        };

        // Anything the model echoed that is not a real in-stock name is
        // dropped by resolve_items; if that shrinks the basket below the
        // list size, the all-or-nothing contract is broken and the store
        // is out.
        let items = store.resolve_items(&echoed_names);
        if items.len() < needed.len() {
            debug!(
                store = %store.name,
                echoed = echoed_names.len(),
                resolved = items.len(),
                "matcher reply did not resolve to a full basket"
            );
            return Ok(None);
        }

        Ok(Some(items))
    }
}

fn matching_prompt(needed: &[String], available: &[&str]) -> String {
    format!(
        r#"You are a precise inventory matching expert. Your only task is to determine if a user's shopping list can be **completely** fulfilled by a specific store's inventory.

**User's Shopping List:**
{needed:?}

**Store's Available Inventory:**
{available:?}

**Instructions:**
1. For each item in the "User's Shopping List", find the single best-matching item from the "Store's Available Inventory".
2. The match should be conceptual. For example, if the user wants "mid-range graphics card" and the inventory has "Nvidia GeForce RTX 5070", that is a valid match.
3. **If you cannot find a reasonable match for even ONE item, the entire match fails.**

**Output Format (Strict):**
Respond with ONLY a valid JSON object with a single key "matched_items".
- If ALL items are successfully matched, "matched_items" MUST be a list of the *exact* item names from the store's inventory.
- If ANY item cannot be matched, "matched_items" MUST be `null`."#
    )
}

fn parse_matching_reply(reply: &str) -> Result<Option<Vec<String>>> {
    #[derive(Deserialize)]
    struct Reply {
        matched_items: Option<Vec<String>>,
    }

    let cleaned = strip_code_fences(reply);
    let parsed: Reply = serde_json::from_str(cleaned)
        .with_context(|| format!("matching reply was not valid json: {cleaned}"))?;

    Ok(parsed.matched_items.filter(|names| !names.is_empty()))
}
