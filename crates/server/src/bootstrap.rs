use std::sync::Arc;

use shopscout_agent::{AgentRuntime, HttpLlmClient, LlmClient, SemanticMatcher};
use shopscout_core::catalog::Catalog;
use shopscout_core::config::AppConfig;
use shopscout_core::ranking::RankingEngine;
use thiserror::Error;
use tracing::{info, warn};

use crate::routes::AppState;
use crate::session::SessionStore;

pub struct Application {
    pub config: AppConfig,
    pub state: AppState,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("llm client construction failed: {0}")]
    Llm(#[source] anyhow::Error),
}

/// Assemble the running application from an already-loaded config. A
/// missing or unreadable catalog degrades the service (the health endpoint
/// reports it) rather than preventing startup.
pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let catalog = match Catalog::load(&config.catalog.path) {
        Ok(catalog) => {
            info!(
                event_name = "system.bootstrap.catalog_loaded",
                correlation_id = "bootstrap",
                stores = catalog.len(),
                path = %config.catalog.path.display(),
                "store catalog loaded"
            );
            catalog
        }
        Err(error) => {
            warn!(
                event_name = "system.bootstrap.catalog_unavailable",
                correlation_id = "bootstrap",
                error = %error,
                "catalog unavailable; starting degraded with an empty store list"
            );
            Catalog::default()
        }
    };
    let catalog = Arc::new(catalog);

    let llm: Arc<dyn LlmClient> =
        Arc::new(HttpLlmClient::new(config.llm.clone()).map_err(BootstrapError::Llm)?);
    let matcher = Arc::new(SemanticMatcher::new(llm.clone()));
    let agent = Arc::new(AgentRuntime::new(catalog.clone(), llm, matcher));

    Ok(Application {
        config,
        state: AppState {
            catalog,
            agent,
            sessions: SessionStore::new(),
            engine: RankingEngine::new(),
        },
    })
}

#[cfg(test)]
mod tests {
    use shopscout_core::config::AppConfig;

    use crate::bootstrap::bootstrap_with_config;

    #[tokio::test]
    async fn bootstrap_degrades_gracefully_without_a_catalog_file() {
        let mut config = AppConfig::default();
        config.catalog.path = "does/not/exist.json".into();

        let app = bootstrap_with_config(config).await.expect("bootstrap succeeds degraded");
        assert!(app.state.catalog.is_empty());
        assert_eq!(app.state.sessions.session_count().await, 0);
    }
}
