//! Authoritative, single-threaded survival sim core.
//!
//! Tick-driven: the driver calls [`SimState::step`] once per frame with the
//! current player position, and [`SimState::player_swing`] for each discrete
//! attack input. All presentation, player damage and item drops come back as
//! entries on the returned event buses; the core never calls audio/UI/
//! inventory directly.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub mod actor;
pub mod combat;
pub mod events;
pub mod harvest;
pub mod pack;
pub mod resource;
pub mod schedule;
pub mod systems;
pub mod telemetry;

pub use actor::{Actor, ActorId, ActorStore, AiState, Health, SpeciesStats, Variant};
pub use combat::{AimMode, SwingInput, SwingOutcome, WeaponSpec};
pub use events::{DropEvent, FeedbackEvent, FeedbackTag, PlayerHit, TickEvents};
pub use pack::PackRegistry;
pub use resource::{
    HarvesterId, ResourceEntity, ResourceId, ResourceKind, ResourceStore, Tool, PLAYER_HARVESTER,
};
pub use schedule::{Ctx, Schedule};

use actor::DESPAWN_DELAY_S;
use events::{FeedbackEvent as Fx, FeedbackTag as Tag};

#[derive(Debug)]
pub struct SimState {
    pub actors: ActorStore,
    pub resources: ResourceStore,
    pub packs: PackRegistry,
    pub rng: ChaCha8Rng,
    /// Global player swing cooldown; swings are rejected while positive.
    pub swing_ready_in_s: f32,
    pub time_s: f32,
    pub(crate) out: TickEvents,
}

impl Default for SimState {
    fn default() -> Self {
        Self::new()
    }
}

impl SimState {
    pub fn new() -> Self {
        Self::with_seed(0xFEED_5EED)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            actors: ActorStore::default(),
            resources: ResourceStore::default(),
            packs: PackRegistry::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            swing_ready_in_s: 0.0,
            time_s: 0.0,
            out: TickEvents::default(),
        }
    }

    /// Place an actor in the world. Pack-capable species pass a shared
    /// `pack_id`; membership is registered here (idempotent).
    pub fn spawn_actor(
        &mut self,
        stats: SpeciesStats,
        pos: Vec3,
        pack_id: Option<u32>,
    ) -> ActorId {
        let species = stats.id.clone();
        let id = self.actors.spawn(stats, pos, pack_id);
        if let Some(p) = pack_id {
            self.packs.enroll(p, id);
        }
        log::debug!("spawned {species} as {id:?} at {pos:?}");
        metrics::counter!("actors.spawned_total").increment(1);
        id
    }

    pub fn spawn_resource(&mut self, kind: ResourceKind, pos: Vec3) -> ResourceId {
        self.resources.spawn(kind, pos)
    }

    /// Apply damage to an actor and derive every consequence in order:
    /// forced emergence for buried ambushers, flee threshold, pack alert,
    /// death. Negative amounts and damage after death are no-ops.
    pub fn damage_actor(&mut self, id: ActorId, amount: i32, threat: Option<Vec3>) {
        if amount <= 0 {
            return;
        }
        let (pos, pack_id, emerged, died) = {
            let Some(a) = self.actors.get_mut(id) else {
                return;
            };
            if !a.alive() {
                return;
            }
            let dealt = amount.min(a.hp.hp);
            a.hp.hp -= dealt;
            let pos = a.pos;
            let pack_id = a.pack_id;
            let mut emerged = false;
            if a.state == AiState::Buried {
                if let Some(amb) = a.stats.ambush {
                    // damage forces emergence
                    a.state = AiState::Emerging;
                    a.phase_left_s = amb.emerge_s;
                    emerged = true;
                }
            }
            if !a.fleeing && a.hp.fraction() <= a.stats.flee_threshold {
                a.fleeing = true;
            }
            let died = a.hp.hp == 0;
            if died {
                a.state = AiState::Death;
                a.telegraphing = false;
                a.fleeing = false;
                a.despawn_left_s = DESPAWN_DELAY_S;
            }
            (pos, pack_id, emerged, died)
        };
        if emerged {
            self.push_fx(Fx {
                tag: Tag::Emerge,
                pos,
            });
        }
        if died {
            self.push_fx(Fx {
                tag: Tag::Death,
                pos,
            });
            metrics::counter!("actors.deaths_total").increment(1);
            self.roll_death_drops(id, pos);
        }
        if let Some(pid) = pack_id {
            self.alert_pack(pid, id, threat.unwrap_or(pos), pos);
        }
    }

    fn roll_death_drops(&mut self, id: ActorId, pos: Vec3) {
        let table: Vec<(String, f32)> = self
            .actors
            .get(id)
            .map(|a| a.stats.drops.clone())
            .unwrap_or_default();
        for (item, chance) in table {
            if self.rng.gen::<f32>() < chance {
                self.out.drops.push(DropEvent {
                    item,
                    amount: 1,
                    pos,
                });
            }
        }
    }

    /// Alert-on-damage: the victim howls once, and live packmates within the
    /// coordination radius start chasing the same threat, bypassing their own
    /// detection check once.
    fn alert_pack(&mut self, pack_id: u32, victim: ActorId, _threat: Vec3, victim_pos: Vec3) {
        let coord_m = self
            .actors
            .get(victim)
            .map(|a| a.stats.pack_coordination_m)
            .unwrap_or(0.0);
        if coord_m <= 0.0 {
            return;
        }
        let members = self.packs.live_members(pack_id, &self.actors);
        let mut howl = None;
        if let Some(v) = self.actors.get_mut(victim) {
            if v.alive() && !v.howled {
                v.howled = true;
                howl = Some(v.pos);
            }
        }
        if let Some(p) = howl {
            self.push_fx(Fx {
                tag: Tag::Howl,
                pos: p,
            });
        }
        for mid in members {
            if mid == victim {
                continue;
            }
            let Some(m) = self.actors.get_mut(mid) else {
                continue;
            };
            if m.dist_xz(victim_pos) > coord_m {
                continue;
            }
            m.alerted = true;
            if matches!(m.state, AiState::Idle | AiState::Surfaced) {
                m.state = AiState::Chase;
                m.alerted = false;
            }
        }
    }

    /// Direct-damage path for resources (explosions, scripted destruction).
    /// Emits the drop computation exactly once, on destruction. Returns true
    /// when the resource was destroyed by this call.
    pub fn damage_resource(&mut self, id: ResourceId, amount: f32) -> bool {
        if amount <= 0.0 {
            return false;
        }
        let destroyed = {
            let Some(r) = self.resources.get_mut(id) else {
                return false;
            };
            r.health = (r.health - amount).max(0.0);
            r.health <= 0.0
        };
        if !destroyed {
            return false;
        }
        let Some(res) = self.resources.remove(id) else {
            return false;
        };
        let lo = res.kind.drop_min.min(res.kind.drop_max);
        let hi = res.kind.drop_min.max(res.kind.drop_max);
        let amount = self.rng.gen_range(lo..=hi);
        self.out.drops.push(DropEvent {
            item: res.kind.drop_item.clone(),
            amount,
            pos: res.pos,
        });
        self.push_fx(Fx {
            tag: Tag::HarvestComplete,
            pos: res.pos,
        });
        true
    }

    /// Resolve one discrete player attack input. See [`combat::player_swing`].
    pub fn player_swing(&mut self, weapon: &WeaponSpec, input: &SwingInput) -> SwingOutcome {
        combat::player_swing(self, weapon, input)
    }

    /// Caller-driven harvest cancellation (actor moved out of range, blocking
    /// menu opened, explicit cancel input).
    pub fn cancel_harvest(&mut self, id: ResourceId) {
        harvest::cancel(&mut self.resources, id, &mut self.out.fx);
    }

    /// Advance the whole sim one tick and drain everything it produced.
    pub fn step(&mut self, dt: f32, player: Option<Vec3>) -> TickEvents {
        let t0 = std::time::Instant::now();
        self.time_s += dt;
        self.swing_ready_in_s = (self.swing_ready_in_s - dt).max(0.0);
        let mut ctx = Ctx::new(dt);
        Schedule.run(self, &mut ctx, player);
        metrics::histogram!("tick.ms").record(t0.elapsed().as_secs_f64() * 1000.0);
        std::mem::take(&mut self.out)
    }

    pub(crate) fn push_fx(&mut self, e: FeedbackEvent) {
        self.out.fx.push(e);
    }
}
