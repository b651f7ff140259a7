use glam::Vec3;
use sim_core::{FeedbackTag, ResourceKind, SimState};

fn boulder() -> ResourceKind {
    let cat = data_runtime::configs::resources::load_default().expect("resource catalog");
    ResourceKind::from_cfg(cat.get("granite_boulder").expect("granite_boulder"))
}

#[test]
fn partial_damage_keeps_the_resource() {
    // granite_boulder max_health = 90
    let mut s = SimState::with_seed(1);
    let id = s.spawn_resource(boulder(), Vec3::ZERO);
    assert!(!s.damage_resource(id, 40.0));
    let r = s.resources.get(id).unwrap();
    assert_eq!(r.health, 50.0);
    let ev = s.step(0.0, None);
    assert!(ev.drops.is_empty());
}

#[test]
fn destruction_drops_exactly_once() {
    let mut s = SimState::with_seed(1);
    let id = s.spawn_resource(boulder(), Vec3::ZERO);
    assert!(!s.damage_resource(id, 40.0));
    assert!(s.damage_resource(id, 60.0));
    assert!(s.resources.get(id).is_none());

    // stale id after destruction
    assert!(!s.damage_resource(id, 60.0));

    let ev = s.step(0.0, None);
    assert_eq!(ev.drops.len(), 1);
    let d = &ev.drops[0];
    assert_eq!(d.item, "stone_chunk");
    assert!((2..=5).contains(&d.amount));
    assert_eq!(
        ev.fx
            .iter()
            .filter(|f| f.tag == FeedbackTag::HarvestComplete)
            .count(),
        1
    );
}

#[test]
fn nonpositive_damage_is_ignored() {
    let mut s = SimState::with_seed(1);
    let id = s.spawn_resource(boulder(), Vec3::ZERO);
    assert!(!s.damage_resource(id, 0.0));
    assert!(!s.damage_resource(id, -5.0));
    assert_eq!(s.resources.get(id).unwrap().health, 90.0);
}

#[test]
fn destruction_mid_harvest_still_drops_once() {
    let mut s = SimState::with_seed(1);
    let id = s.spawn_resource(boulder(), Vec3::ZERO);
    let mut fx = Vec::new();
    assert!(sim_core::harvest::start(
        &mut s.resources,
        id,
        sim_core::PLAYER_HARVESTER,
        &mut fx
    ));
    assert!(s.damage_resource(id, 90.0));
    let ev = s.step(0.0, None);
    assert_eq!(ev.drops.len(), 1);
}
