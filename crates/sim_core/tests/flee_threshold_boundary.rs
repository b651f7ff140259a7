use glam::vec3;
use sim_core::{SimState, SpeciesStats};

fn boar() -> SpeciesStats {
    let cat = data_runtime::configs::species::load_default().expect("species catalog");
    SpeciesStats::from_cfg(cat.get("wild_boar").expect("wild_boar"))
}

#[test]
fn flee_sets_at_threshold_not_above() {
    // flee_threshold = 0.20, max_hp = 50
    let mut s = SimState::with_seed(1);
    let id = s.spawn_actor(boar(), vec3(0.0, 0.0, 0.0), None);
    // 22% health: no flee
    s.damage_actor(id, 39, None);
    assert_eq!(s.actors.get(id).unwrap().hp.hp, 11);
    assert!(!s.actors.get(id).unwrap().fleeing);
    // exactly 20%: flees
    s.damage_actor(id, 1, None);
    assert_eq!(s.actors.get(id).unwrap().hp.hp, 10);
    assert!(s.actors.get(id).unwrap().fleeing);
}

#[test]
fn fleeing_actor_opens_distance() {
    let mut s = SimState::with_seed(2);
    let id = s.spawn_actor(boar(), vec3(0.0, 0.0, 3.0), None);
    let player = vec3(0.0, 0.0, 0.0);
    // get it chasing, then wound it past the threshold
    let _ = s.step(0.1, Some(player));
    s.damage_actor(id, 40, None);
    let d0 = s.actors.get(id).unwrap().dist_xz(player);
    for _ in 0..10 {
        let _ = s.step(0.1, Some(player));
    }
    let d1 = s.actors.get(id).unwrap().dist_xz(player);
    assert!(d1 > d0, "expected retreat: {d0} -> {d1}");
}
