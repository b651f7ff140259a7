//! Harvestable resource entities and their store.

use glam::Vec3;

use data_runtime::configs::resources::ResourceCfg;

use crate::events::FeedbackTag;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceId(pub u32);

/// Identity of whoever holds a harvest claim. The player is `PLAYER_HARVESTER`;
/// other values are free for scripted harvesters.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HarvesterId(pub u32);

pub const PLAYER_HARVESTER: HarvesterId = HarvesterId(0);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResourceCategory {
    Wood,
    Stone,
    Ore,
    Foliage,
}

impl ResourceCategory {
    pub fn parse(s: &str) -> Self {
        match s {
            "stone" => ResourceCategory::Stone,
            "ore" => ResourceCategory::Ore,
            "foliage" => ResourceCategory::Foliage,
            _ => ResourceCategory::Wood,
        }
    }

    /// Per-category harvest-hit presentation cue.
    pub fn hit_feedback(self) -> FeedbackTag {
        match self {
            ResourceCategory::Wood => FeedbackTag::HitWood,
            ResourceCategory::Stone => FeedbackTag::HitStone,
            ResourceCategory::Ore => FeedbackTag::HitOre,
            ResourceCategory::Foliage => FeedbackTag::HitFoliage,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tool {
    None,
    Axe,
    Pickaxe,
    Sickle,
}

impl Tool {
    pub fn parse(s: &str) -> Self {
        match s {
            "axe" => Tool::Axe,
            "pickaxe" => Tool::Pickaxe,
            "sickle" => Tool::Sickle,
            _ => Tool::None,
        }
    }

    /// Whether this tool satisfies a resource's requirement. `None`
    /// requirement accepts any tool (bare hands included).
    pub fn satisfies(self, required: Tool) -> bool {
        required == Tool::None || self == required
    }
}

/// Immutable archetype converted from `data_runtime` config.
#[derive(Clone, Debug)]
pub struct ResourceKind {
    pub name: String,
    pub category: ResourceCategory,
    pub max_health: f32,
    pub harvest_time_s: f32,
    pub required_tool: Tool,
    pub drop_item: String,
    pub drop_min: u32,
    pub drop_max: u32,
    pub radius_m: f32,
}

impl ResourceKind {
    pub fn from_cfg(cfg: &ResourceCfg) -> Self {
        Self {
            name: cfg.name.clone(),
            category: ResourceCategory::parse(&cfg.category),
            max_health: cfg.max_health,
            harvest_time_s: cfg.harvest_time_s,
            required_tool: Tool::parse(&cfg.required_tool),
            drop_item: cfg.drop_item.clone(),
            drop_min: cfg.drop_min,
            drop_max: cfg.drop_max,
            radius_m: cfg.radius_m.unwrap_or(0.6),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ResourceEntity {
    pub id: ResourceId,
    pub kind: ResourceKind,
    pub pos: Vec3,
    pub health: f32,
    pub harvester: Option<HarvesterId>,
    pub progress: f32,
}

impl ResourceEntity {
    #[inline]
    pub fn is_being_harvested(&self) -> bool {
        self.harvester.is_some()
    }
}

#[derive(Default, Debug)]
pub struct ResourceStore {
    next_id: u32,
    pub resources: Vec<ResourceEntity>,
}

impl ResourceStore {
    pub fn spawn(&mut self, kind: ResourceKind, pos: Vec3) -> ResourceId {
        let id = ResourceId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let health = kind.max_health;
        self.resources.push(ResourceEntity {
            id,
            kind,
            pos,
            health,
            harvester: None,
            progress: 0.0,
        });
        id
    }

    #[inline]
    pub fn get(&self, id: ResourceId) -> Option<&ResourceEntity> {
        self.resources.iter().find(|r| r.id == id)
    }
    #[inline]
    pub fn get_mut(&mut self, id: ResourceId) -> Option<&mut ResourceEntity> {
        self.resources.iter_mut().find(|r| r.id == id)
    }
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &ResourceEntity> {
        self.resources.iter()
    }

    pub fn remove(&mut self, id: ResourceId) -> Option<ResourceEntity> {
        let idx = self.resources.iter().position(|r| r.id == id)?;
        Some(self.resources.swap_remove(idx))
    }
}
