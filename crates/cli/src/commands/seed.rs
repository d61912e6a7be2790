//! Write the deterministic demo catalog to the configured path. The
//! fixture covers three categories with deliberately spread price/quality
//! profiles so every preference mode produces a different winner.

use std::fs;
use std::path::PathBuf;

use serde_json::json;
use shopscout_core::config::{AppConfig, ConfigOverrides, LoadOptions};

use crate::commands::CommandResult;

pub fn run(force: bool, catalog_path: Option<PathBuf>) -> CommandResult {
    let config = match AppConfig::load(LoadOptions {
        overrides: ConfigOverrides { catalog_path, ..ConfigOverrides::default() },
        ..LoadOptions::default()
    }) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "seed",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let path = &config.catalog.path;
    if path.exists() && !force {
        return CommandResult::failure(
            "seed",
            "destination_exists",
            format!("catalog file `{}` already exists; pass --force to overwrite", path.display()),
            4,
        );
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(error) = fs::create_dir_all(parent) {
                return CommandResult::failure(
                    "seed",
                    "io",
                    format!("could not create `{}`: {error}", parent.display()),
                    4,
                );
            }
        }
    }

    let rendered = match serde_json::to_string_pretty(&demo_catalog()) {
        Ok(rendered) => rendered,
        Err(error) => {
            return CommandResult::failure("seed", "serialization", error.to_string(), 5);
        }
    };

    if let Err(error) = fs::write(path, rendered) {
        return CommandResult::failure(
            "seed",
            "io",
            format!("could not write `{}`: {error}", path.display()),
            4,
        );
    }

    CommandResult::success(
        "seed",
        format!("demo catalog with 6 stores written to `{}`", path.display()),
    )
}

fn demo_catalog() -> serde_json::Value {
    json!([
        {
            "name": "Value Mart",
            "category": "Groceries",
            "inventory": [
                { "itemName": "Flour", "price": 1.99, "qualityScore": 5.0, "inStock": true },
                { "itemName": "Eggs", "price": 2.49, "qualityScore": 5.5, "inStock": true },
                { "itemName": "Milk", "price": 1.79, "qualityScore": 5.0, "inStock": true },
                { "itemName": "Butter", "price": 3.29, "qualityScore": 4.5, "inStock": true },
                { "itemName": "Sugar", "price": 2.19, "qualityScore": 5.0, "inStock": false }
            ]
        },
        {
            "name": "Organic Emporium",
            "category": "Groceries",
            "inventory": [
                { "itemName": "Flour", "price": 4.99, "qualityScore": 9.5, "inStock": true },
                { "itemName": "Eggs", "price": 6.49, "qualityScore": 9.0, "inStock": true },
                { "itemName": "Milk", "price": 4.29, "qualityScore": 9.5, "inStock": true },
                { "itemName": "Butter", "price": 7.99, "qualityScore": 9.0, "inStock": true },
                { "itemName": "Sugar", "price": 5.49, "qualityScore": 8.5, "inStock": true }
            ]
        },
        {
            "name": "Corner Grocery",
            "category": "Groceries",
            "inventory": [
                { "itemName": "Flour", "price": 2.99, "qualityScore": 7.0, "inStock": true },
                { "itemName": "Eggs", "price": 3.99, "qualityScore": 7.5, "inStock": true },
                { "itemName": "Milk", "price": 2.89, "qualityScore": 7.0, "inStock": true },
                { "itemName": "Butter", "price": 4.99, "qualityScore": 6.5, "inStock": true }
            ]
        },
        {
            "name": "Corner Hardware",
            "category": "Hardware",
            "inventory": [
                { "itemName": "Hammer", "price": 12.99, "qualityScore": 8.5, "inStock": true },
                { "itemName": "Screwdriver Set", "price": 19.99, "qualityScore": 8.0, "inStock": true },
                { "itemName": "Duct Tape", "price": 4.49, "qualityScore": 7.0, "inStock": true }
            ]
        },
        {
            "name": "Discount Tools",
            "category": "Hardware",
            "inventory": [
                { "itemName": "Hammer", "price": 7.99, "qualityScore": 5.5, "inStock": true },
                { "itemName": "Screwdriver Set", "price": 9.99, "qualityScore": 5.0, "inStock": true },
                { "itemName": "Duct Tape", "price": 2.99, "qualityScore": 6.0, "inStock": false }
            ]
        },
        {
            "name": "Circuit City",
            "category": "Electronics",
            "inventory": [
                { "itemName": "Nvidia GeForce RTX 5070", "price": 549.99, "qualityScore": 9.0, "inStock": true },
                { "itemName": "AMD Ryzen 5 7600", "price": 229.99, "qualityScore": 8.5, "inStock": true },
                { "itemName": "Corsair 650W PSU", "price": 89.99, "qualityScore": 8.0, "inStock": true },
                { "itemName": "16GB DDR5 RAM", "price": 74.99, "qualityScore": 8.0, "inStock": true }
            ]
        }
    ])
}
