use glam::vec3;
use sim_core::{AiState, FeedbackTag, SimState, SpeciesStats};

fn wolf() -> SpeciesStats {
    let cat = data_runtime::configs::species::load_default().expect("species catalog");
    SpeciesStats::from_cfg(cat.get("wolf").expect("wolf"))
}

#[test]
fn wounded_wolf_alerts_packmates_in_radius() {
    // coordination_m = 20.0
    let mut s = SimState::with_seed(1);
    let a = s.spawn_actor(wolf(), vec3(0.0, 0.0, 0.0), Some(1));
    let b = s.spawn_actor(wolf(), vec3(5.0, 0.0, 0.0), Some(1));
    let c = s.spawn_actor(wolf(), vec3(30.0, 0.0, 0.0), Some(1));

    s.damage_actor(a, 10, Some(vec3(0.0, 0.0, -3.0)));

    assert_eq!(s.actors.get(b).unwrap().state, AiState::Chase);
    assert_eq!(
        s.actors.get(c).unwrap().state,
        AiState::Idle,
        "out of coordination range"
    );
    assert!(!s.actors.get(c).unwrap().alerted);

    let ev = s.step(0.0, None);
    assert_eq!(
        ev.fx.iter().filter(|f| f.tag == FeedbackTag::Howl).count(),
        1
    );
}

#[test]
fn a_wolf_howls_only_once() {
    let mut s = SimState::with_seed(1);
    let a = s.spawn_actor(wolf(), vec3(0.0, 0.0, 0.0), Some(1));
    let _b = s.spawn_actor(wolf(), vec3(5.0, 0.0, 0.0), Some(1));

    s.damage_actor(a, 5, None);
    s.damage_actor(a, 5, None);
    s.damage_actor(a, 5, None);

    let ev = s.step(0.0, None);
    assert_eq!(
        ev.fx.iter().filter(|f| f.tag == FeedbackTag::Howl).count(),
        1
    );
}

#[test]
fn lethal_hit_alerts_without_a_howl() {
    let mut s = SimState::with_seed(1);
    let a = s.spawn_actor(wolf(), vec3(0.0, 0.0, 0.0), Some(1));
    let b = s.spawn_actor(wolf(), vec3(5.0, 0.0, 0.0), Some(1));

    s.damage_actor(a, 40, None);

    assert_eq!(s.actors.get(a).unwrap().state, AiState::Death);
    assert_eq!(s.actors.get(b).unwrap().state, AiState::Chase);
    let ev = s.step(0.0, None);
    assert!(
        !ev.fx.iter().any(|f| f.tag == FeedbackTag::Howl),
        "the dead do not howl"
    );
}

#[test]
fn pack_members_encircle_instead_of_stacking() {
    let mut s = SimState::with_seed(1);
    let a = s.spawn_actor(wolf(), vec3(0.0, 0.0, 10.0), Some(1));
    let b = s.spawn_actor(wolf(), vec3(0.6, 0.0, 10.0), Some(1));
    s.actors.get_mut(a).unwrap().state = AiState::Chase;
    s.actors.get_mut(b).unwrap().state = AiState::Chase;
    let player = vec3(0.0, 0.0, 0.0);
    for _ in 0..120 {
        let _ = s.step(0.1, Some(player));
    }
    let pa = s.actors.get(a).unwrap().pos;
    let pb = s.actors.get(b).unwrap().pos;
    let spread = ((pa.x - pb.x).powi(2) + (pa.z - pb.z).powi(2)).sqrt();
    assert!(
        spread > 2.0,
        "surround slots put them on opposite sides, spread {spread}"
    );
}

#[test]
fn loners_raise_no_alert() {
    let mut s = SimState::with_seed(1);
    let a = s.spawn_actor(wolf(), vec3(0.0, 0.0, 0.0), None);
    let b = s.spawn_actor(wolf(), vec3(5.0, 0.0, 0.0), None);

    s.damage_actor(a, 10, None);
    assert_eq!(s.actors.get(b).unwrap().state, AiState::Idle);
    let ev = s.step(0.0, None);
    assert!(!ev.fx.iter().any(|f| f.tag == FeedbackTag::Howl));
}
