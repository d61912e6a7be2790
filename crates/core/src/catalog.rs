//! Read-only store catalog.
//!
//! The catalog is loaded once from a JSON file and shared immutably for the
//! process lifetime (wrap it in an `Arc`; reload by swapping the whole
//! structure, never by mutating in place). The ranking core only ever reads
//! from it.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "itemName")]
    pub name: String,
    pub price: Decimal,
    #[serde(rename = "qualityScore")]
    pub quality_score: Decimal,
    #[serde(rename = "inStock")]
    pub in_stock: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub name: String,
    pub category: String,
    pub inventory: Vec<Item>,
    /// Fields this service does not interpret (addresses, coordinates, and
    /// so on) round-trip untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Store {
    /// Exact case-insensitive match of `required` names against the
    /// in-stock inventory. All-or-nothing: if even one required name has no
    /// match, the store offers nothing for this request and the result is
    /// `None`.
    pub fn match_items_exact(&self, required: &[String]) -> Option<Vec<Item>> {
        let wanted: BTreeSet<String> =
            required.iter().map(|name| name.to_lowercase()).collect();
        if wanted.is_empty() {
            return None;
        }

        let mut found: BTreeSet<String> = BTreeSet::new();
        let mut matched = Vec::new();
        for item in self.inventory.iter().filter(|item| item.in_stock) {
            let key = item.name.to_lowercase();
            if wanted.contains(&key) && found.insert(key) {
                matched.push(item.clone());
            }
        }

        (found.len() == wanted.len()).then_some(matched)
    }

    /// Resolve literal inventory names (as echoed back by a semantic
    /// matcher) to their items. Names that do not exist in the inventory
    /// are dropped; the matcher's all-or-nothing contract is enforced by
    /// the caller comparing counts.
    pub fn resolve_items(&self, names: &[String]) -> Vec<Item> {
        let wanted: BTreeSet<&str> = names.iter().map(String::as_str).collect();
        self.inventory
            .iter()
            .filter(|item| item.in_stock && wanted.contains(item.name.as_str()))
            .cloned()
            .collect()
    }

    pub fn in_stock_names(&self) -> Vec<&str> {
        self.inventory
            .iter()
            .filter(|item| item.in_stock)
            .map(|item| item.name.as_str())
            .collect()
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse catalog file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: serde_json::Error },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    stores: Vec<Store>,
}

impl Catalog {
    pub fn from_stores(stores: Vec<Store>) -> Self {
        Self { stores }
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| CatalogError::ReadFile { path: path.to_path_buf(), source })?;
        let stores = serde_json::from_str(&raw)
            .map_err(|source| CatalogError::ParseFile { path: path.to_path_buf(), source })?;
        Ok(Self { stores })
    }

    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn stores_in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Store> {
        self.stores.iter().filter(move |store| store.category.eq_ignore_ascii_case(category))
    }

    /// Distinct categories, sorted, for the extraction prompt's closed list.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> =
            self.stores.iter().map(|store| store.category.clone()).collect::<BTreeSet<_>>()
                .into_iter()
                .collect();
        categories.sort();
        categories
    }
}
