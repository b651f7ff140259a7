//! Buried/emerging/burrowing half of the ambush-predator cycle.
//!
//! Forced emergence on damage lives in `SimState::damage_actor`; the
//! probabilistic re-burrow after a strike lives in the attack execute step.

use glam::Vec3;

use crate::actor::AiState;
use crate::events::{FeedbackEvent, FeedbackTag};
use crate::SimState;

pub fn ambush_cycle(sim: &mut SimState, dt: f32, player: Option<Vec3>) {
    let mut fx: Vec<FeedbackEvent> = Vec::new();
    for a in sim.actors.iter_mut() {
        if !a.alive() {
            continue;
        }
        let Some(amb) = a.stats.ambush else {
            continue;
        };
        match a.state {
            AiState::Buried => {
                // Emerge distance is deliberately larger than detection range.
                if let Some(p) = player {
                    if a.dist_xz(p) < amb.emerge_m {
                        a.state = AiState::Emerging;
                        a.phase_left_s = amb.emerge_s;
                        fx.push(FeedbackEvent {
                            tag: FeedbackTag::Emerge,
                            pos: a.pos,
                        });
                    }
                }
            }
            AiState::Emerging => {
                a.phase_left_s -= dt;
                if a.phase_left_s <= 0.0 {
                    a.state = AiState::Surfaced;
                }
            }
            AiState::Burrowing => {
                a.phase_left_s -= dt;
                if a.phase_left_s <= 0.0 {
                    a.state = AiState::Buried;
                    // ambush-predator advantage: partial heal on re-burrow
                    let heal = (amb.reburrow_heal_frac * a.hp.max as f32) as i32;
                    a.hp.hp = (a.hp.hp + heal).min(a.hp.max);
                }
            }
            _ => {}
        }
    }
    sim.out.fx.extend(fx);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{AmbushParams, SpeciesStats, Variant};

    fn scorpion() -> SpeciesStats {
        SpeciesStats {
            id: "dune_scorpion".into(),
            variant: Variant::Ambush,
            max_hp: 40,
            speed_mps: 4.0,
            attack_range_m: 1.8,
            detection_range_m: 8.0,
            attack_cooldown_s: 1.8,
            telegraph_s: 0.35,
            damage: 15,
            flee_threshold: 0.15,
            radius_m: 0.7,
            drops: vec![],
            coward: None,
            ambush: Some(AmbushParams {
                emerge_m: 12.0,
                emerge_s: 0.8,
                burrow_s: 1.0,
                reburrow_chance: 0.3,
                reburrow_heal_frac: 0.25,
            }),
            pack_coordination_m: 0.0,
            slam: None,
        }
    }

    #[test]
    fn reburrow_heal_clamps_to_max() {
        let mut sim = SimState::with_seed(1);
        let id = sim.actors.spawn(scorpion(), Vec3::ZERO, None);
        {
            let a = sim.actors.get_mut(id).unwrap();
            a.state = AiState::Burrowing;
            a.phase_left_s = 0.05;
            a.hp.hp = 38;
        }
        ambush_cycle(&mut sim, 0.1, None);
        let a = sim.actors.get(id).unwrap();
        assert_eq!(a.state, AiState::Buried);
        assert_eq!(a.hp.hp, a.hp.max);
    }
}
