//! Actor decision core: flee overlay, patrol, chase, standoff, attack
//! telegraph/execute, slam AoE.
//!
//! The flee overlay runs before any state-specific logic each tick; the
//! buried/emerging/burrowing half of the ambush cycle lives in
//! [`crate::systems::ambush`].

use glam::Vec3;
use rand::Rng;

use crate::actor::{ActorId, AiState, Variant, PATROL_DWELL_S};
use crate::events::{DamageEvent, FeedbackEvent, FeedbackTag, PlayerHit};
use crate::pack::surround_angle;
use crate::schedule::Ctx;
use crate::SimState;

pub const PLAYER_RADIUS_M: f32 = 0.7;
const MELEE_PAD_M: f32 = 0.35;
/// Attack is abandoned when the player escapes past range * this.
const CHASE_GIVEUP_MULT: f32 = 1.5;
/// Patrol amble speed relative to chase speed.
const PATROL_SPEED_MULT: f32 = 0.5;
const WAYPOINT_REACHED_M: f32 = 0.25;
/// How close a pack member must be to its surround slot before attacking.
const SLOT_REACHED_M: f32 = 0.6;

/// Flee check for every live actor, ahead of state logic.
pub fn flee_overlay(sim: &mut SimState) {
    for a in sim.actors.iter_mut() {
        if !a.alive() || a.fleeing {
            continue;
        }
        if a.hp.fraction() <= a.stats.flee_threshold {
            a.fleeing = true;
        }
    }
}

/// One decision step per live actor: transition evaluation plus movement and
/// orientation writes. Below-ground ambush states are skipped here.
pub fn decide_and_move(sim: &mut SimState, ctx: &mut Ctx, player: Option<Vec3>) {
    let ids: Vec<ActorId> = sim
        .actors
        .iter()
        .filter(|a| a.alive())
        .map(|a| a.id)
        .collect();
    for id in ids {
        // Pack slot is read against the store before the mutable borrow below.
        let slot = match sim.actors.get(id) {
            Some(a) if a.stats.variant == Variant::Pack => match a.pack_id {
                Some(p) => sim.packs.surround_slot(p, id, &sim.actors),
                None => None,
            },
            _ => None,
        };
        let Some(a) = sim.actors.get_mut(id) else {
            continue;
        };
        if matches!(
            a.state,
            AiState::Buried | AiState::Emerging | AiState::Burrowing | AiState::Death
        ) {
            continue;
        }
        a.cooldown_s = (a.cooldown_s - ctx.dt).max(0.0);
        a.stagger_left_s = (a.stagger_left_s - ctx.dt).max(0.0);

        // No player known: no AI decisions this tick. Separation/ground snap
        // still runs later so the actor does not float or sink.
        let Some(player_pos) = player else {
            continue;
        };
        let dist = a.dist_xz(player_pos);

        // Flee overlay redirects chase/attack movement; the state stays Chase.
        if a.fleeing {
            if a.state == AiState::Attack {
                a.state = AiState::Chase;
                a.telegraphing = false;
            }
            if a.state == AiState::Chase {
                let away = Vec3::new(a.pos.x - player_pos.x, 0.0, a.pos.z - player_pos.z);
                let step = away.normalize_or_zero() * a.stats.speed_mps * ctx.dt;
                a.pos += step;
                a.face_toward(player_pos);
                continue;
            }
        }

        match a.state {
            AiState::Idle | AiState::Surfaced => {
                if a.alerted || dist < a.stats.detection_range_m {
                    a.alerted = false;
                    a.state = AiState::Chase;
                } else if a.state == AiState::Idle {
                    patrol_step(a, ctx.dt);
                }
            }
            AiState::Chase => {
                a.face_toward(player_pos);
                match (a.stats.coward, slot) {
                    (Some(band), _) => {
                        // Dead-zone first: hold inside the band, backpedal
                        // below it, close above it.
                        let low = band.preferred_m - band.tolerance_m;
                        let high = band.preferred_m + band.tolerance_m;
                        if dist < low {
                            let away =
                                Vec3::new(a.pos.x - player_pos.x, 0.0, a.pos.z - player_pos.z);
                            a.pos += away.normalize_or_zero()
                                * a.stats.speed_mps
                                * band.backpedal_mult
                                * ctx.dt;
                        } else if dist > high {
                            step_toward(a, player_pos, a.stats.speed_mps, ctx.dt, low);
                        }
                        // inside the band: hold position, stay oriented
                        if dist < a.stats.attack_range_m {
                            a.state = AiState::Attack;
                        }
                    }
                    (None, Some((idx, size))) => {
                        // Approach an assigned point around the player so the
                        // pack encircles instead of stacking. The attack only
                        // starts from the slot, not from first contact.
                        let ang = surround_angle(idx, size);
                        let ring = a.stats.attack_range_m * 0.9;
                        let goal = Vec3::new(
                            player_pos.x + ring * ang.sin(),
                            a.pos.y,
                            player_pos.z + ring * ang.cos(),
                        );
                        step_toward(a, goal, a.stats.speed_mps, ctx.dt, 0.0);
                        let at_slot = a.dist_xz(goal) < SLOT_REACHED_M;
                        if dist < a.stats.attack_range_m && at_slot {
                            a.state = AiState::Attack;
                        }
                    }
                    (None, None) => {
                        let contact = a.radius() + PLAYER_RADIUS_M + MELEE_PAD_M;
                        step_toward(a, player_pos, a.stats.speed_mps, ctx.dt, contact);
                        if dist < a.stats.attack_range_m {
                            a.state = AiState::Attack;
                        }
                    }
                }
            }
            AiState::Attack => {
                a.face_toward(player_pos);
                let escaped = dist > a.stats.attack_range_m * CHASE_GIVEUP_MULT;
                let too_close = a
                    .stats
                    .coward
                    .map(|b| dist < b.preferred_m * 0.5)
                    .unwrap_or(false);
                if escaped || too_close {
                    a.state = AiState::Chase;
                    a.telegraphing = false;
                    continue;
                }
                if a.telegraphing {
                    a.telegraph_left_s -= ctx.dt;
                    if a.telegraph_left_s <= 0.0 {
                        a.telegraphing = false;
                        a.cooldown_s = a.stats.attack_cooldown_s;
                        execute_attack(a, ctx, player_pos, dist, &mut sim.rng, &mut sim.out.fx, &mut sim.out.player_hits);
                    }
                } else if a.cooldown_s <= 0.0 && a.stagger_left_s <= 0.0 {
                    a.telegraphing = true;
                    a.telegraph_left_s = a.stats.telegraph_s;
                    sim.out.fx.push(FeedbackEvent {
                        tag: FeedbackTag::Telegraph,
                        pos: a.pos,
                    });
                }
            }
            _ => {}
        }
    }
}

fn step_toward(a: &mut crate::actor::Actor, goal: Vec3, speed: f32, dt: f32, stop_at: f32) {
    let to = Vec3::new(goal.x - a.pos.x, 0.0, goal.z - a.pos.z);
    let dist = to.length();
    if dist > stop_at + 0.02 {
        let step = (speed * dt).min(dist - stop_at);
        if step > 1e-4 {
            a.pos += to.normalize() * step;
        }
    }
}

fn patrol_step(a: &mut crate::actor::Actor, dt: f32) {
    if a.patrol.is_empty() {
        return;
    }
    if a.dwell_left_s > 0.0 {
        a.dwell_left_s -= dt;
        return;
    }
    let wp = a.patrol[a.patrol_idx];
    if a.dist_xz(wp) < WAYPOINT_REACHED_M {
        a.patrol_idx = (a.patrol_idx + 1) % a.patrol.len();
        a.dwell_left_s = PATROL_DWELL_S;
        return;
    }
    a.face_toward(wp);
    step_toward(a, wp, a.stats.speed_mps * PATROL_SPEED_MULT, dt, 0.0);
}

fn execute_attack(
    a: &mut crate::actor::Actor,
    ctx: &mut Ctx,
    player_pos: Vec3,
    dist: f32,
    rng: &mut rand_chacha::ChaCha8Rng,
    fx: &mut Vec<FeedbackEvent>,
    player_hits: &mut Vec<PlayerHit>,
) {
    if let Some(slam) = a.stats.slam {
        // Ground slam: everything damageable in the radius, not a single
        // raycast target, then a stagger during which no attack may begin.
        fx.push(FeedbackEvent {
            tag: FeedbackTag::Slam,
            pos: a.pos,
        });
        if dist <= slam.radius_m {
            player_hits.push(PlayerHit {
                src: a.id,
                damage: a.stats.damage,
            });
        }
        ctx.slam_zones.push((a.id, a.pos, slam.radius_m, a.stats.damage));
        a.stagger_left_s = slam.stagger_s;
        return;
    }
    // Single-target melee lands only if the player is still in range.
    if dist <= a.stats.attack_range_m {
        player_hits.push(PlayerHit {
            src: a.id,
            damage: a.stats.damage,
        });
        fx.push(FeedbackEvent {
            tag: FeedbackTag::AttackHit,
            pos: a.pos,
        });
    }
    // Ambush predators may vanish back underground after a strike.
    if let Some(amb) = a.stats.ambush {
        if rng.gen::<f32>() < amb.reburrow_chance {
            a.state = AiState::Burrowing;
            a.phase_left_s = amb.burrow_s;
            fx.push(FeedbackEvent {
                tag: FeedbackTag::Burrow,
                pos: a.pos,
            });
        }
    }
}

/// Expand queued slam zones into per-actor damage events. Runs after the
/// decide pass so every actor sees the same pre-slam positions.
pub fn queue_slam_damage(sim: &mut SimState, ctx: &mut Ctx) {
    let zones = std::mem::take(&mut ctx.slam_zones);
    for (src, center, radius, damage) in zones {
        for a in sim.actors.iter() {
            if !a.alive() || a.id == src {
                continue;
            }
            if a.dist_xz(center) <= radius {
                ctx.dmg.push(DamageEvent {
                    src: Some(src),
                    dst: a.id,
                    amount: damage,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{Actor, ActorId, SpeciesStats, Variant};

    fn stats() -> SpeciesStats {
        SpeciesStats {
            id: "boar".into(),
            variant: Variant::Standard,
            max_hp: 50,
            speed_mps: 3.0,
            attack_range_m: 2.0,
            detection_range_m: 10.0,
            attack_cooldown_s: 1.5,
            telegraph_s: 0.4,
            damage: 12,
            flee_threshold: 0.2,
            radius_m: 0.8,
            drops: vec![],
            coward: None,
            ambush: None,
            pack_coordination_m: 0.0,
            slam: None,
        }
    }

    #[test]
    fn patrol_advances_index_circularly() {
        let mut a = Actor::new(ActorId(0), stats(), Vec3::ZERO, None);
        // park on the current waypoint so the reach check fires
        a.pos = a.patrol[0];
        patrol_step(&mut a, 0.1);
        assert_eq!(a.patrol_idx, 1);
        assert!(a.dwell_left_s > 0.0);
        // dwell holds position
        let held = a.pos;
        patrol_step(&mut a, 0.1);
        assert_eq!(a.pos, held);
        // wrap from the last waypoint back to zero
        a.dwell_left_s = 0.0;
        a.patrol_idx = 3;
        a.pos = a.patrol[3];
        patrol_step(&mut a, 0.1);
        assert_eq!(a.patrol_idx, 0);
    }

    #[test]
    fn step_toward_respects_stop_distance() {
        let mut a = Actor::new(ActorId(0), stats(), Vec3::ZERO, None);
        let goal = Vec3::new(0.0, 0.0, 10.0);
        for _ in 0..200 {
            step_toward(&mut a, goal, 3.0, 0.1, 2.0);
        }
        let d = a.dist_xz(goal);
        assert!(d >= 1.95 && d <= 2.1, "stopped at {d}");
    }
}
