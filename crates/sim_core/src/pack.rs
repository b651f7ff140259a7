//! Pack coordination: a passive registry keyed by pack id.
//!
//! The registry holds actor ids only, never ownership; every lookup filters
//! out ids whose actor is gone or dead, and stale entries are pruned lazily.

use std::collections::HashMap;

use crate::actor::{ActorId, ActorStore};

#[derive(Default, Debug)]
pub struct PackRegistry {
    packs: HashMap<u32, Vec<ActorId>>,
}

impl PackRegistry {
    /// Register a member. Idempotent: enrolling twice does not duplicate.
    pub fn enroll(&mut self, pack_id: u32, actor: ActorId) {
        let members = self.packs.entry(pack_id).or_default();
        if !members.contains(&actor) {
            members.push(actor);
        }
    }

    /// Live members of a pack, in enrollment order.
    pub fn live_members(&self, pack_id: u32, actors: &ActorStore) -> Vec<ActorId> {
        self.packs
            .get(&pack_id)
            .map(|m| {
                m.iter()
                    .copied()
                    .filter(|id| actors.is_live(*id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Position of `actor` among its pack's live members, with the live count.
    /// Used to spread approach vectors; None when the actor is not a live
    /// member.
    pub fn surround_slot(
        &self,
        pack_id: u32,
        actor: ActorId,
        actors: &ActorStore,
    ) -> Option<(usize, usize)> {
        let live = self.live_members(pack_id, actors);
        let idx = live.iter().position(|id| *id == actor)?;
        Some((idx, live.len()))
    }

    /// Drop ids whose actor no longer exists or is dead. Entries are otherwise
    /// never destroyed proactively.
    pub fn prune(&mut self, actors: &ActorStore) {
        for members in self.packs.values_mut() {
            members.retain(|id| actors.is_live(*id));
        }
        self.packs.retain(|_, m| !m.is_empty());
    }
}

/// Deterministic angular offset for encirclement: member `index` of
/// `pack_size` approaches from `index * (360 / pack_size)` degrees.
#[inline]
pub fn surround_angle(index: usize, pack_size: usize) -> f32 {
    if pack_size == 0 {
        return 0.0;
    }
    (index as f32) * (std::f32::consts::TAU / pack_size as f32)
}
