//! Configuration for a café session
//!
//! Holds the menu the catalog is seeded with and the base quantum the
//! scheduler multiplies by each queue's weight.
use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::menu::MenuCatalog;

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CafeConfig {
    /// Item name -> base preparation minutes
    pub menu: BTreeMap<String, u32>,
    /// Tasks served per visit before weighting
    pub quantum: u32,
}

impl CafeConfig {
    /// Create a configuration with the house menu and a quantum of 1
    pub fn new() -> Self {
        let menu = [
            ("americano", 2),
            ("latte", 3),
            ("cappuccino", 3),
            ("mocha", 4),
            ("tea", 1),
            ("macchiato", 2),
            ("hot_chocolate", 4),
        ]
        .into_iter()
        .map(|(name, minutes)| (name.to_string(), minutes))
        .collect();

        Self { menu, quantum: 1 }
    }

    /// Configuration with no menu items at all
    pub fn empty() -> Self {
        Self {
            menu: BTreeMap::new(),
            quantum: 1,
        }
    }

    /// Add or replace a menu item
    pub fn with_menu_item(mut self, name: impl Into<String>, minutes: u32) -> Self {
        self.menu.insert(name.into(), minutes);
        self
    }

    /// Set the base quantum
    ///
    /// # Note
    /// A quantum of 0 is rejected when the scheduler is built.
    pub fn with_quantum(mut self, quantum: u32) -> Self {
        self.quantum = quantum;
        self
    }

    /// Load a JSON configuration file. Missing fields fall back to defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn catalog(&self) -> MenuCatalog {
        MenuCatalog::from_items(self.menu.iter().map(|(name, minutes)| (name.clone(), *minutes)))
    }
}

impl Default for CafeConfig {
    fn default() -> Self {
        Self::new()
    }
}
