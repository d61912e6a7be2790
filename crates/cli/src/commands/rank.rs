//! One-shot deterministic ranking against a locally loaded catalog. No
//! server, no LLM; the same pipeline the server's `/api/rank` uses.

use std::path::PathBuf;
use std::str::FromStr;

use shopscout_core::catalog::Catalog;
use shopscout_core::config::{AppConfig, ConfigOverrides, LoadOptions};
use shopscout_core::ranking::{MatchedOption, PreferenceMode, RankingEngine};

use crate::commands::CommandResult;

pub fn run(items: Vec<String>, mode: String, catalog_path: Option<PathBuf>) -> CommandResult {
    if items.is_empty() {
        return CommandResult::failure(
            "rank",
            "client_input",
            "at least one --item is required",
            2,
        );
    }

    let mode = match PreferenceMode::from_str(&mode) {
        Ok(mode) => mode,
        Err(error) => {
            return CommandResult::failure("rank", "client_input", error.to_string(), 2);
        }
    };

    let config = match AppConfig::load(LoadOptions {
        overrides: ConfigOverrides { catalog_path, ..ConfigOverrides::default() },
        ..LoadOptions::default()
    }) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "rank",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let catalog = match Catalog::load(&config.catalog.path) {
        Ok(catalog) => catalog,
        Err(error) => {
            return CommandResult::failure("rank", "catalog", error.to_string(), 4);
        }
    };

    let options: Vec<MatchedOption> = catalog
        .stores()
        .iter()
        .filter_map(|store| {
            store.match_items_exact(&items).map(|matched_items| MatchedOption {
                store_name: store.name.clone(),
                matched_items,
            })
        })
        .collect();

    let selection = match RankingEngine::new().recommend(options, mode) {
        Ok(selection) => selection,
        Err(error) => {
            return CommandResult::failure("rank", "ranking", error.to_string(), 5);
        }
    };

    match serde_json::to_string_pretty(&selection) {
        Ok(rendered) => CommandResult::success("rank", rendered),
        Err(error) => CommandResult::failure("rank", "serialization", error.to_string(), 5),
    }
}
