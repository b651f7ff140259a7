//! Weapon/tool specs loaded from `data/config/weapons.toml`.
//!
//! A weapon is also the player's harvesting tool; `tool` decides which
//! resource categories it can work on and `harvest_hit` is the progress
//! fraction a single swing contributes.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::loader::read_config;

#[derive(Debug, Clone, Deserialize)]
pub struct WeaponCfg {
    pub id: String,
    pub name: String,
    pub damage: i32,
    pub range_m: f32,
    pub cooldown_s: f32,
    /// Half-angle of the forgiving aim cone, degrees.
    #[serde(default = "default_cone")]
    pub cone_deg: f32,
    /// "axe" | "pickaxe" | "sickle" | "none"
    #[serde(default = "default_tool")]
    pub tool: String,
    /// Progress fraction per swing against a compatible resource.
    #[serde(default = "default_harvest_hit")]
    pub harvest_hit: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeaponCatalog {
    pub weapons: Vec<WeaponCfg>,
}

impl WeaponCatalog {
    pub fn get(&self, id: &str) -> Option<&WeaponCfg> {
        self.weapons.iter().find(|w| w.id == id)
    }
}

fn default_cone() -> f32 {
    12.0
}
fn default_tool() -> String {
    "none".into()
}
fn default_harvest_hit() -> f32 {
    0.5
}

/// Load the default catalog from `data/config/weapons.toml`.
pub fn load_default() -> Result<WeaponCatalog> {
    let txt = read_config("config/weapons.toml")?;
    let cat: WeaponCatalog = toml::from_str(&txt).context("parse weapons.toml")?;
    Ok(cat)
}
