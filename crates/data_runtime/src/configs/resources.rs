//! Harvestable resource archetypes loaded from `data/config/resources.toml`.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::loader::read_config;

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceCfg {
    pub id: String,
    pub name: String,
    /// "wood" | "stone" | "ore" | "foliage"
    pub category: String,
    pub max_health: f32,
    pub harvest_time_s: f32,
    /// "axe" | "pickaxe" | "sickle" | "none"
    #[serde(default = "default_tool")]
    pub required_tool: String,
    pub drop_item: String,
    pub drop_min: u32,
    pub drop_max: u32,
    #[serde(default)]
    pub radius_m: Option<f32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceCatalog {
    pub resources: Vec<ResourceCfg>,
}

impl ResourceCatalog {
    pub fn get(&self, id: &str) -> Option<&ResourceCfg> {
        self.resources.iter().find(|r| r.id == id)
    }
}

fn default_tool() -> String {
    "none".into()
}

/// Load the default catalog from `data/config/resources.toml`.
pub fn load_default() -> Result<ResourceCatalog> {
    let txt = read_config("config/resources.toml")?;
    let cat: ResourceCatalog = toml::from_str(&txt).context("parse resources.toml")?;
    Ok(cat)
}
