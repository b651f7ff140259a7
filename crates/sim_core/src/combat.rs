//! Combat mediation: resolve one player swing into exactly one outcome.
//!
//! Priority: a live actor along the aim vector wins over a resource; a
//! resource goes through the tool gate before any harvest progress is
//! applied. A swing on cooldown is rejected before resolution and produces
//! nothing.

use glam::{Vec2, Vec3};

use data_runtime::configs::weapons::WeaponCfg;

use crate::actor::ActorId;
use crate::events::{FeedbackEvent, FeedbackTag};
use crate::harvest;
use crate::resource::{ResourceId, Tool, PLAYER_HARVESTER};
use crate::SimState;

#[derive(Clone, Debug)]
pub struct WeaponSpec {
    pub name: String,
    pub damage: i32,
    pub range_m: f32,
    pub cooldown_s: f32,
    /// Half-angle of the forgiving aim cone, degrees.
    pub cone_deg: f32,
    pub tool: Tool,
    /// Progress fraction one swing contributes to a compatible resource.
    pub harvest_hit: f32,
}

impl WeaponSpec {
    pub fn from_cfg(cfg: &WeaponCfg) -> Self {
        Self {
            name: cfg.name.clone(),
            damage: cfg.damage,
            range_m: cfg.range_m,
            cooldown_s: cfg.cooldown_s,
            cone_deg: cfg.cone_deg,
            tool: Tool::parse(&cfg.tool),
            harvest_hit: cfg.harvest_hit,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AimMode {
    Ray,
    Cone,
}

#[derive(Copy, Clone, Debug)]
pub struct SwingInput {
    pub origin: Vec3,
    pub dir: Vec3,
    pub aim: AimMode,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SwingOutcome {
    /// Swing cooldown still running; nothing resolved.
    Rejected,
    ActorHit { id: ActorId, fatal: bool },
    HarvestHit { id: ResourceId, progress: f32, completed: bool },
    WrongTool { id: ResourceId },
    /// Someone else holds the harvest claim.
    Busy { id: ResourceId },
    Miss,
}

/// Closest-approach parameter of an XZ ray against a circle, within `range`.
fn ray_circle_t_xz(origin: Vec3, dir: Vec3, range: f32, center: Vec3, radius: f32) -> Option<f32> {
    let o = Vec2::new(origin.x, origin.z);
    let d = Vec2::new(dir.x, dir.z).normalize_or_zero();
    if d.length_squared() < 1e-12 {
        return None;
    }
    let c = Vec2::new(center.x, center.z);
    let t = (c - o).dot(d).clamp(0.0, range);
    let closest = o + d * t;
    if (closest - c).length_squared() <= radius * radius {
        Some(t)
    } else {
        None
    }
}

/// Distance to a circle center if it falls inside the aim cone and range.
fn cone_hit_xz(
    origin: Vec3,
    dir: Vec3,
    range: f32,
    half_angle_deg: f32,
    center: Vec3,
    radius: f32,
) -> Option<f32> {
    let o = Vec2::new(origin.x, origin.z);
    let d = Vec2::new(dir.x, dir.z).normalize_or_zero();
    if d.length_squared() < 1e-12 {
        return None;
    }
    let to = Vec2::new(center.x, center.z) - o;
    let dist = to.length();
    if dist > range + radius {
        return None;
    }
    if dist <= radius {
        // standing inside the target counts
        return Some(dist);
    }
    let cos = to.normalize().dot(d);
    if cos >= half_angle_deg.to_radians().cos() {
        Some(dist)
    } else {
        None
    }
}

fn pick_metric(input: &SwingInput, range: f32, cone_deg: f32, center: Vec3, radius: f32) -> Option<f32> {
    match input.aim {
        AimMode::Ray => ray_circle_t_xz(input.origin, input.dir, range, center, radius),
        AimMode::Cone => cone_hit_xz(input.origin, input.dir, range, cone_deg, center, radius),
    }
}

/// Resolve one discrete swing. Exactly one of {actor damaged, harvest hit,
/// miss} occurs for every accepted input; a cooldown-gated input is rejected
/// before resolution.
pub fn player_swing(sim: &mut SimState, weapon: &WeaponSpec, input: &SwingInput) -> SwingOutcome {
    if sim.swing_ready_in_s > 0.0 {
        return SwingOutcome::Rejected;
    }
    // The swing counts on every accepted path, wrong tool and whiff included.
    sim.swing_ready_in_s = weapon.cooldown_s;
    metrics::counter!("combat.swings_total").increment(1);

    // 1) Actors first.
    let mut best: Option<(f32, ActorId)> = None;
    for a in sim.actors.iter() {
        if !a.alive() {
            continue;
        }
        if let Some(m) = pick_metric(input, weapon.range_m, weapon.cone_deg, a.pos, a.radius()) {
            if best.map(|(b, _)| m < b).unwrap_or(true) {
                best = Some((m, a.id));
            }
        }
    }
    if let Some((_, id)) = best {
        let pos = sim.actors.get(id).map(|a| a.pos).unwrap_or(input.origin);
        sim.damage_actor(id, weapon.damage, Some(input.origin));
        let fatal = !sim.actors.is_live(id);
        sim.push_fx(FeedbackEvent {
            tag: FeedbackTag::AttackHit,
            pos,
        });
        return SwingOutcome::ActorHit { id, fatal };
    }

    // 2) Resources only if no actor resolved.
    let mut best_res: Option<(f32, ResourceId)> = None;
    for r in sim.resources.iter() {
        if let Some(m) = pick_metric(input, weapon.range_m, weapon.cone_deg, r.pos, r.kind.radius_m)
        {
            if best_res.map(|(b, _)| m < b).unwrap_or(true) {
                best_res = Some((m, r.id));
            }
        }
    }
    if let Some((_, id)) = best_res {
        return swing_resource(sim, weapon, id);
    }

    // 3) Whiff.
    sim.push_fx(FeedbackEvent {
        tag: FeedbackTag::Miss,
        pos: input.origin,
    });
    SwingOutcome::Miss
}

fn swing_resource(sim: &mut SimState, weapon: &WeaponSpec, id: ResourceId) -> SwingOutcome {
    let (pos, required, category, claimed_by_other) = {
        let Some(r) = sim.resources.get(id) else {
            return SwingOutcome::Miss;
        };
        (
            r.pos,
            r.kind.required_tool,
            r.kind.category,
            r.harvester.map(|h| h != PLAYER_HARVESTER).unwrap_or(false),
        )
    };
    if !weapon.tool.satisfies(required) {
        sim.push_fx(FeedbackEvent {
            tag: FeedbackTag::WrongTool,
            pos,
        });
        return SwingOutcome::WrongTool { id };
    }
    if claimed_by_other {
        sim.push_fx(FeedbackEvent {
            tag: FeedbackTag::HarvestBusy,
            pos,
        });
        return SwingOutcome::Busy { id };
    }
    let unclaimed = sim
        .resources
        .get(id)
        .map(|r| !r.is_being_harvested())
        .unwrap_or(false);
    if unclaimed && !harvest::start(&mut sim.resources, id, PLAYER_HARVESTER, &mut sim.out.fx) {
        return SwingOutcome::Busy { id };
    }
    let progress = harvest::advance_hit(&mut sim.resources, id, weapon.harvest_hit).unwrap_or(0.0);
    sim.push_fx(FeedbackEvent {
        tag: category.hit_feedback(),
        pos,
    });
    let completed = if progress >= 1.0 {
        let done = harvest::complete(
            &mut sim.resources,
            id,
            &mut sim.rng,
            &mut sim.out.fx,
            &mut sim.out.drops,
        );
        if done {
            metrics::counter!("harvest.completed_total").increment(1);
        }
        done
    } else {
        false
    };
    SwingOutcome::HarvestHit {
        id,
        progress,
        completed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_pick_orders_by_distance() {
        let o = Vec3::ZERO;
        let d = Vec3::new(0.0, 0.0, 1.0);
        let near = ray_circle_t_xz(o, d, 10.0, Vec3::new(0.0, 0.0, 3.0), 0.5).unwrap();
        let far = ray_circle_t_xz(o, d, 10.0, Vec3::new(0.0, 0.0, 7.0), 0.5).unwrap();
        assert!(near < far);
        assert!(ray_circle_t_xz(o, d, 10.0, Vec3::new(5.0, 0.0, 3.0), 0.5).is_none());
    }

    #[test]
    fn cone_is_forgiving_about_angle() {
        let o = Vec3::ZERO;
        let d = Vec3::new(0.0, 0.0, 1.0);
        // ~11 degrees off-axis at 5m
        let target = Vec3::new(1.0, 0.0, 5.0);
        assert!(ray_circle_t_xz(o, d, 10.0, target, 0.5).is_none());
        assert!(cone_hit_xz(o, d, 10.0, 15.0, target, 0.5).is_some());
        assert!(cone_hit_xz(o, d, 10.0, 5.0, target, 0.5).is_none());
    }

    #[test]
    fn out_of_range_is_no_hit() {
        let o = Vec3::ZERO;
        let d = Vec3::new(0.0, 0.0, 1.0);
        assert!(ray_circle_t_xz(o, d, 2.0, Vec3::new(0.0, 0.0, 6.0), 0.5).is_none());
        assert!(cone_hit_xz(o, d, 2.0, 15.0, Vec3::new(0.0, 0.0, 6.0), 0.5).is_none());
    }
}
