//! Authoritative actor store, species stat blocks and FSM state.

use glam::Vec3;

use data_runtime::configs::species::SpeciesCfg;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ActorId(pub u32);

/// Behavior branch selected by the species stat block. Transition-rule
/// differences are keyed off this tag rather than per-species types.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Variant {
    Standard,
    Coward,
    Ambush,
    Pack,
    AoeSlam,
}

impl Variant {
    pub fn parse(s: &str) -> Self {
        match s {
            "coward" => Variant::Coward,
            "ambush" => Variant::Ambush,
            "pack" => Variant::Pack,
            "aoe_slam" => Variant::AoeSlam,
            _ => Variant::Standard,
        }
    }
}

/// FSM states. The `Buried..Burrowing` cycle is only reachable for
/// `Variant::Ambush`; `Death` is terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AiState {
    Idle,
    Chase,
    Attack,
    Death,
    Buried,
    Emerging,
    Surfaced,
    Burrowing,
}

#[derive(Copy, Clone, Debug)]
pub struct Health {
    pub hp: i32,
    pub max: i32,
}

impl Health {
    #[inline]
    pub fn alive(&self) -> bool {
        self.hp > 0
    }
    #[inline]
    pub fn fraction(&self) -> f32 {
        if self.max <= 0 {
            0.0
        } else {
            self.hp as f32 / self.max as f32
        }
    }
}

/// Coward standoff band.
#[derive(Copy, Clone, Debug)]
pub struct Standoff {
    pub preferred_m: f32,
    pub tolerance_m: f32,
    pub backpedal_mult: f32,
}

#[derive(Copy, Clone, Debug)]
pub struct AmbushParams {
    pub emerge_m: f32,
    pub emerge_s: f32,
    pub burrow_s: f32,
    pub reburrow_chance: f32,
    pub reburrow_heal_frac: f32,
}

#[derive(Copy, Clone, Debug)]
pub struct SlamParams {
    pub radius_m: f32,
    pub stagger_s: f32,
}

/// Data-driven species stat block (converted from `data_runtime` config).
#[derive(Clone, Debug)]
pub struct SpeciesStats {
    pub id: String,
    pub variant: Variant,
    pub max_hp: i32,
    pub speed_mps: f32,
    pub attack_range_m: f32,
    pub detection_range_m: f32,
    pub attack_cooldown_s: f32,
    pub telegraph_s: f32,
    pub damage: i32,
    pub flee_threshold: f32,
    pub radius_m: f32,
    pub drops: Vec<(String, f32)>,
    pub coward: Option<Standoff>,
    pub ambush: Option<AmbushParams>,
    pub pack_coordination_m: f32,
    pub slam: Option<SlamParams>,
}

impl SpeciesStats {
    pub fn from_cfg(cfg: &SpeciesCfg) -> Self {
        Self {
            id: cfg.id.clone(),
            variant: Variant::parse(&cfg.variant),
            max_hp: cfg.max_hp,
            speed_mps: cfg.speed_mps,
            attack_range_m: cfg.attack_range_m,
            detection_range_m: cfg.detection_range_m,
            attack_cooldown_s: cfg.attack_cooldown_s,
            telegraph_s: cfg.telegraph_s,
            damage: cfg.damage,
            flee_threshold: cfg.flee_threshold,
            radius_m: cfg.radius_m.unwrap_or(0.8),
            drops: cfg.drops.iter().map(|d| (d.item.clone(), d.chance)).collect(),
            coward: cfg.coward.map(|c| Standoff {
                preferred_m: c.preferred_m,
                tolerance_m: c.tolerance_m,
                backpedal_mult: c.backpedal_mult,
            }),
            ambush: cfg.ambush.map(|a| AmbushParams {
                emerge_m: a.emerge_m,
                emerge_s: a.emerge_s,
                burrow_s: a.burrow_s,
                reburrow_chance: a.reburrow_chance,
                reburrow_heal_frac: a.reburrow_heal_frac,
            }),
            pack_coordination_m: cfg.pack.map(|p| p.coordination_m).unwrap_or(0.0),
            slam: cfg.slam.map(|s| SlamParams {
                radius_m: s.radius_m,
                stagger_s: s.stagger_s,
            }),
        }
    }
}

/// Seconds a corpse lingers before removal.
pub const DESPAWN_DELAY_S: f32 = 2.5;
/// Patrol ring radius around the spawn point and dwell at each waypoint.
pub const PATROL_RADIUS_M: f32 = 3.5;
pub const PATROL_DWELL_S: f32 = 2.0;

#[derive(Clone, Debug)]
pub struct Actor {
    pub id: ActorId,
    pub stats: SpeciesStats,
    pub pos: Vec3,
    pub yaw: f32,
    pub hp: Health,
    pub state: AiState,
    pub fleeing: bool,
    /// One-shot detection bypass set by a pack alert.
    pub alerted: bool,
    pub howled: bool,
    pub pack_id: Option<u32>,
    pub cooldown_s: f32,
    pub telegraphing: bool,
    pub telegraph_left_s: f32,
    pub stagger_left_s: f32,
    /// Emerging/burrowing countdown for ambush species.
    pub phase_left_s: f32,
    pub despawn_left_s: f32,
    pub spawn_pos: Vec3,
    pub patrol: Vec<Vec3>,
    pub patrol_idx: usize,
    pub dwell_left_s: f32,
}

impl Actor {
    pub fn new(id: ActorId, stats: SpeciesStats, pos: Vec3, pack_id: Option<u32>) -> Self {
        let initial = if stats.variant == Variant::Ambush {
            AiState::Buried
        } else {
            AiState::Idle
        };
        let max = stats.max_hp;
        let patrol = patrol_ring(pos, PATROL_RADIUS_M);
        Self {
            id,
            stats,
            pos,
            yaw: 0.0,
            hp: Health { hp: max, max },
            state: initial,
            fleeing: false,
            alerted: false,
            howled: false,
            pack_id,
            cooldown_s: 0.0,
            telegraphing: false,
            telegraph_left_s: 0.0,
            stagger_left_s: 0.0,
            phase_left_s: 0.0,
            despawn_left_s: 0.0,
            spawn_pos: pos,
            patrol,
            patrol_idx: 0,
            dwell_left_s: 0.0,
        }
    }

    #[inline]
    pub fn alive(&self) -> bool {
        self.hp.alive() && self.state != AiState::Death
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.stats.radius_m
    }

    /// XZ distance to a point (height ignored, as for all AI range checks).
    #[inline]
    pub fn dist_xz(&self, p: Vec3) -> f32 {
        let dx = p.x - self.pos.x;
        let dz = p.z - self.pos.z;
        (dx * dx + dz * dz).sqrt()
    }

    pub fn face_toward(&mut self, p: Vec3) {
        let dx = p.x - self.pos.x;
        let dz = p.z - self.pos.z;
        if dx * dx + dz * dz > 1e-6 {
            self.yaw = dx.atan2(dz);
        }
    }
}

fn patrol_ring(center: Vec3, radius: f32) -> Vec<Vec3> {
    let n = 4usize;
    (0..n)
        .map(|i| {
            let a = (i as f32) / (n as f32) * std::f32::consts::TAU;
            Vec3::new(center.x + radius * a.cos(), center.y, center.z + radius * a.sin())
        })
        .collect()
}

#[derive(Default, Debug)]
pub struct ActorStore {
    next_id: u32,
    pub actors: Vec<Actor>,
}

impl ActorStore {
    pub fn spawn(&mut self, stats: SpeciesStats, pos: Vec3, pack_id: Option<u32>) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.actors.push(Actor::new(id, stats, pos, pack_id));
        id
    }

    #[inline]
    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }
    #[inline]
    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|a| a.id == id)
    }
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }
    #[inline]
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Actor> {
        self.actors.iter_mut()
    }
    #[inline]
    pub fn is_live(&self, id: ActorId) -> bool {
        self.get(id).map(|a| a.alive()).unwrap_or(false)
    }
}
