//! Per-tick systems run in a fixed order by the schedule.

pub mod ai;
pub mod ambush;
pub mod separation;
