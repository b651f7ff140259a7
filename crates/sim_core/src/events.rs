//! Output event buses drained by the driver after each tick.
//!
//! The core never calls into audio/UI directly; presentation, player damage
//! and drop emission are entries on these buses.

use glam::Vec3;

use crate::actor::ActorId;

/// Fire-and-forget presentation cue.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FeedbackTag {
    Telegraph,
    AttackHit,
    Slam,
    Miss,
    WrongTool,
    HarvestBusy,
    HitWood,
    HitStone,
    HitOre,
    HitFoliage,
    HarvestStart,
    HarvestCancel,
    HarvestComplete,
    Death,
    Howl,
    Emerge,
    Burrow,
}

#[derive(Copy, Clone, Debug)]
pub struct FeedbackEvent {
    pub tag: FeedbackTag,
    pub pos: Vec3,
}

/// Damage dealt to the player this tick.
#[derive(Copy, Clone, Debug)]
pub struct PlayerHit {
    pub src: ActorId,
    pub damage: i32,
}

/// Item payload for the inventory collaborator.
#[derive(Clone, Debug)]
pub struct DropEvent {
    pub item: String,
    pub amount: u32,
    pub pos: Vec3,
}

/// Internal damage bus entry (slam AoE, external callers).
#[derive(Copy, Clone, Debug)]
pub struct DamageEvent {
    pub src: Option<ActorId>,
    pub dst: ActorId,
    pub amount: i32,
}

/// Everything a single `step` produced, in emission order per bus.
#[derive(Default, Debug)]
pub struct TickEvents {
    pub fx: Vec<FeedbackEvent>,
    pub player_hits: Vec<PlayerHit>,
    pub drops: Vec<DropEvent>,
}

impl TickEvents {
    pub fn is_empty(&self) -> bool {
        self.fx.is_empty() && self.player_hits.is_empty() && self.drops.is_empty()
    }
}
