//! Push-back resolution of actor-actor and actor-player overlaps on the XZ
//! plane, plus ground snap. Runs every tick, player or no player.

use glam::Vec3;

use crate::actor::AiState;
use crate::systems::ai::PLAYER_RADIUS_M;
use crate::SimState;

pub fn resolve(sim: &mut SimState, player: Option<Vec3>) {
    let actors = &mut sim.actors.actors;
    let n = actors.len();
    for i in 0..n {
        if !actors[i].alive() || actors[i].state == AiState::Buried {
            continue;
        }
        for j in (i + 1)..n {
            if !actors[j].alive() || actors[j].state == AiState::Buried {
                continue;
            }
            let mut dx = actors[j].pos.x - actors[i].pos.x;
            let mut dz = actors[j].pos.z - actors[i].pos.z;
            let d2 = dx * dx + dz * dz;
            let min_d = actors[i].radius() + actors[j].radius();
            if d2 < min_d * min_d {
                let d = d2.sqrt().max(1e-4);
                dx /= d;
                dz /= d;
                let push = (min_d - d) * 0.5;
                actors[i].pos.x -= dx * push;
                actors[i].pos.z -= dz * push;
                actors[j].pos.x += dx * push;
                actors[j].pos.z += dz * push;
            }
        }
    }
    if let Some(p) = player {
        for a in actors.iter_mut() {
            if !a.alive() || a.state == AiState::Buried {
                continue;
            }
            let mut dx = a.pos.x - p.x;
            let mut dz = a.pos.z - p.z;
            let d2 = dx * dx + dz * dz;
            let min_d = a.radius() + PLAYER_RADIUS_M;
            if d2 < min_d * min_d {
                let d = d2.sqrt().max(1e-4);
                dx /= d;
                dz /= d;
                let overlap = min_d - d;
                a.pos.x += dx * overlap;
                a.pos.z += dz * overlap;
            }
        }
    }
    // Ground snap: keep everyone at spawn height until real terrain queries
    // are wired in.
    for a in actors.iter_mut() {
        a.pos.y = a.spawn_pos.y;
    }
}
