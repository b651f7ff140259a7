//! Fixed-order tick schedule over the sim state, with event buses for damage
//! carried between systems.
//!
//! Order per tick: flee overlay, ambush cycle, decide/move, slam expansion,
//! separation, damage application, despawn/cleanup. Damage consequences
//! (flee, forced emergence, pack alert, death) derive inside
//! `SimState::damage_actor` from the post-damage health, so no system
//! observes a half-applied transition.

use glam::Vec3;

use crate::actor::{ActorId, AiState};
use crate::events::DamageEvent;
use crate::systems;
use crate::SimState;

pub struct Ctx {
    pub dt: f32,
    pub dmg: Vec<DamageEvent>,
    /// Slam AoE zones queued during the decide pass: (source, center,
    /// radius, damage).
    pub slam_zones: Vec<(ActorId, Vec3, f32, i32)>,
}

impl Ctx {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            dmg: Vec::new(),
            slam_zones: Vec::new(),
        }
    }
}

pub struct Schedule;

impl Schedule {
    pub fn run(&mut self, sim: &mut SimState, ctx: &mut Ctx, player: Option<Vec3>) {
        systems::ai::flee_overlay(sim);
        systems::ambush::ambush_cycle(sim, ctx.dt, player);
        systems::ai::decide_and_move(sim, ctx, player);
        systems::ai::queue_slam_damage(sim, ctx);
        systems::separation::resolve(sim, player);
        apply_damage(sim, ctx);
        despawn_update(sim, ctx.dt);
    }
}

fn apply_damage(sim: &mut SimState, ctx: &mut Ctx) {
    let events: Vec<DamageEvent> = ctx.dmg.drain(..).collect();
    for d in events {
        let threat = d.src.and_then(|s| sim.actors.get(s)).map(|a| a.pos);
        sim.damage_actor(d.dst, d.amount, threat);
    }
}

fn despawn_update(sim: &mut SimState, dt: f32) {
    let mut removed = false;
    for a in sim.actors.iter_mut() {
        if a.state == AiState::Death {
            a.despawn_left_s -= dt;
        }
    }
    sim.actors.actors.retain(|a| {
        let gone = a.state == AiState::Death && a.despawn_left_s <= 0.0;
        removed |= gone;
        !gone
    });
    if removed {
        sim.packs.prune(&sim.actors);
    }
}
