//! Core domain logic for shopscout: the store catalog model and the
//! deterministic ranking pipeline (basket aggregation, batch
//! normalization, preference-weighted ranking, selection), plus the
//! shared configuration and error types.
//!
//! This crate is synchronous and side-effect free apart from catalog
//! and config file loading; the agent, server, and CLI crates layer IO
//! on top of it.

pub mod catalog;
pub mod config;
pub mod errors;
pub mod ranking;

pub use catalog::{Catalog, CatalogError, Item, Store};
pub use config::{AppConfig, ConfigError, ConfigOverrides, LlmProvider, LoadOptions, LogFormat};
pub use errors::{ApplicationError, ClientInputError, InterfaceError, RankingError};
pub use ranking::{
    MatchedOption, PreferenceMode, RankingEngine, Recommendation, ScoredOption, Selection,
};
