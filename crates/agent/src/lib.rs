//! Agent runtime - LLM-powered shopping assistance over the deterministic
//! ranking core.
//!
//! The agent follows a constrained loop per conversational turn:
//! 1. **Extraction** (`extraction`) - transcript → definitive shopping list
//!    and store category
//! 2. **Matching** (`matching`) - per-store, all-or-nothing inventory
//!    fulfillment (exact or semantic)
//! 3. **Ranking** - the deterministic pipeline in `shopscout-core`
//! 4. **Narration** (`narration`) - ranked selection → conversational prose
//!
//! # Safety Principle
//!
//! The LLM is strictly a translator. It never decides prices, quality
//! scores, or rankings; those are deterministic outputs of the core. The
//! model only interprets language on the way in and phrases results on the
//! way out, and its factual claims are constrained to pre-computed data.

pub mod extraction;
pub mod llm;
pub mod matching;
pub mod narration;
pub mod runtime;

pub use extraction::{ConversationTurn, ExtractedRequest, Role};
pub use llm::{HttpLlmClient, LlmClient};
pub use matching::{ExactMatcher, InventoryMatcher, SemanticMatcher};
pub use narration::NO_OPTIONS_APOLOGY;
pub use runtime::{AgentReply, AgentRuntime};
