//! Species stat-block catalog loaded from `data/config/species.toml`.
//!
//! Each entry seeds a spawned actor: base stats, behavior variant, and the
//! optional per-variant parameter blocks (standoff band, ambush timings,
//! pack coordination, slam). Keep this crate free of sim types; the sim
//! converts entries into its own stat struct on spawn.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::loader::read_config;

#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesCfg {
    pub id: String,
    pub name: String,
    /// "standard" | "coward" | "ambush" | "pack" | "aoe_slam"
    #[serde(default = "default_variant")]
    pub variant: String,
    pub max_hp: i32,
    pub speed_mps: f32,
    pub attack_range_m: f32,
    pub detection_range_m: f32,
    pub attack_cooldown_s: f32,
    pub telegraph_s: f32,
    pub damage: i32,
    #[serde(default = "default_flee_threshold")]
    pub flee_threshold: f32,
    #[serde(default)]
    pub radius_m: Option<f32>,
    #[serde(default)]
    pub drops: Vec<DropCfg>,
    #[serde(default)]
    pub coward: Option<CowardCfg>,
    #[serde(default)]
    pub ambush: Option<AmbushCfg>,
    #[serde(default)]
    pub pack: Option<PackCfg>,
    #[serde(default)]
    pub slam: Option<SlamCfg>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DropCfg {
    pub item: String,
    pub chance: f32,
}

/// Standoff band for coward species: hold inside the band, backpedal when the
/// player closes below it.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CowardCfg {
    pub preferred_m: f32,
    pub tolerance_m: f32,
    #[serde(default = "default_backpedal_mult")]
    pub backpedal_mult: f32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AmbushCfg {
    pub emerge_m: f32,
    pub emerge_s: f32,
    pub burrow_s: f32,
    #[serde(default = "default_reburrow_chance")]
    pub reburrow_chance: f32,
    #[serde(default = "default_reburrow_heal")]
    pub reburrow_heal_frac: f32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PackCfg {
    pub coordination_m: f32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SlamCfg {
    pub radius_m: f32,
    pub stagger_s: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesCatalog {
    pub species: Vec<SpeciesCfg>,
}

impl SpeciesCatalog {
    pub fn get(&self, id: &str) -> Option<&SpeciesCfg> {
        self.species.iter().find(|s| s.id == id)
    }
}

fn default_variant() -> String {
    "standard".into()
}
fn default_flee_threshold() -> f32 {
    0.20
}
fn default_backpedal_mult() -> f32 {
    0.6
}
fn default_reburrow_chance() -> f32 {
    0.30
}
fn default_reburrow_heal() -> f32 {
    0.25
}

/// Load the default catalog from `data/config/species.toml`.
pub fn load_default() -> Result<SpeciesCatalog> {
    let txt = read_config("config/species.toml")?;
    let cat: SpeciesCatalog = toml::from_str(&txt).context("parse species.toml")?;
    Ok(cat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_species_toml() {
        let cat = load_default().expect("species catalog");
        assert!(cat.species.len() >= 5);
        let wolf = cat.get("wolf").expect("wolf entry");
        assert_eq!(wolf.variant, "pack");
        assert!(wolf.pack.is_some());
        let scorpion = cat.get("dune_scorpion").expect("scorpion entry");
        assert!(scorpion.ambush.is_some());
        assert!(scorpion.ambush.unwrap().emerge_m > scorpion.detection_range_m);
    }

    #[test]
    fn defaults_fill_in() {
        let txt = r#"
            [[species]]
            id = "stub"
            name = "Stub"
            max_hp = 10
            speed_mps = 1.0
            attack_range_m = 1.5
            detection_range_m = 8.0
            attack_cooldown_s = 1.0
            telegraph_s = 0.3
            damage = 3
        "#;
        let cat: SpeciesCatalog = toml::from_str(txt).expect("parse stub");
        let s = cat.get("stub").expect("stub");
        assert_eq!(s.variant, "standard");
        assert!((s.flee_threshold - 0.20).abs() < 1e-6);
        assert!(s.drops.is_empty());
    }
}
