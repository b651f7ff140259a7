//! Harvest coordination: claim, progress, cancel, complete.
//!
//! The coordinator performs no tool checks; the combat mediator gates tools
//! before calling in so it can give distinct "wrong tool" vs "already being
//! harvested" feedback. Completion is never automatic: the caller decides
//! when a full progress bar turns into drops.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::events::{DropEvent, FeedbackEvent, FeedbackTag};
use crate::resource::{HarvesterId, ResourceId, ResourceStore};

/// Claim a resource for `who`. Rejected (false, no state change) while another
/// claim is in progress. Progress resets to zero on a fresh claim.
pub fn start(
    store: &mut ResourceStore,
    id: ResourceId,
    who: HarvesterId,
    fx: &mut Vec<FeedbackEvent>,
) -> bool {
    let Some(res) = store.get_mut(id) else {
        return false;
    };
    if res.is_being_harvested() {
        return false;
    }
    res.harvester = Some(who);
    res.progress = 0.0;
    fx.push(FeedbackEvent {
        tag: FeedbackTag::HarvestStart,
        pos: res.pos,
    });
    true
}

/// Advance by elapsed time; only valid while claimed. Returns the new
/// progress for presentation use. Never auto-completes.
pub fn advance(store: &mut ResourceStore, id: ResourceId, dt: f32) -> Option<f32> {
    let res = store.get_mut(id)?;
    if !res.is_being_harvested() {
        return None;
    }
    let inc = if res.kind.harvest_time_s > 0.0 {
        (dt / res.kind.harvest_time_s).max(0.0)
    } else {
        1.0
    };
    res.progress = (res.progress + inc).clamp(0.0, 1.0);
    Some(res.progress)
}

/// Advance by a fixed progress fraction (one swing's worth). Same claim rules
/// as [`advance`].
pub fn advance_hit(store: &mut ResourceStore, id: ResourceId, frac: f32) -> Option<f32> {
    let res = store.get_mut(id)?;
    if !res.is_being_harvested() {
        return None;
    }
    res.progress = (res.progress + frac.max(0.0)).clamp(0.0, 1.0);
    Some(res.progress)
}

/// Release a claim. No-op when not in progress; otherwise progress resets to
/// zero and a cancellation cue is emitted.
pub fn cancel(store: &mut ResourceStore, id: ResourceId, fx: &mut Vec<FeedbackEvent>) {
    let Some(res) = store.get_mut(id) else {
        return;
    };
    if !res.is_being_harvested() {
        return;
    }
    res.harvester = None;
    res.progress = 0.0;
    fx.push(FeedbackEvent {
        tag: FeedbackTag::HarvestCancel,
        pos: res.pos,
    });
}

/// Roll the drop amount, emit the payload and destruction cue, and remove the
/// resource from the world. No-op (false) when no harvest is in progress.
pub fn complete(
    store: &mut ResourceStore,
    id: ResourceId,
    rng: &mut ChaCha8Rng,
    fx: &mut Vec<FeedbackEvent>,
    drops: &mut Vec<DropEvent>,
) -> bool {
    let claimed = store
        .get(id)
        .map(|r| r.is_being_harvested())
        .unwrap_or(false);
    if !claimed {
        return false;
    }
    let Some(res) = store.remove(id) else {
        return false;
    };
    let lo = res.kind.drop_min.min(res.kind.drop_max);
    let hi = res.kind.drop_min.max(res.kind.drop_max);
    let amount = rng.gen_range(lo..=hi);
    drops.push(DropEvent {
        item: res.kind.drop_item.clone(),
        amount,
        pos: res.pos,
    });
    fx.push(FeedbackEvent {
        tag: FeedbackTag::HarvestComplete,
        pos: res.pos,
    });
    true
}
