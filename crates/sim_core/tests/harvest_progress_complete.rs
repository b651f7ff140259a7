use glam::{vec3, Vec3};
use sim_core::{
    harvest, AimMode, FeedbackTag, ResourceKind, SimState, SwingInput, SwingOutcome, WeaponSpec,
    PLAYER_HARVESTER,
};

fn pine() -> ResourceKind {
    let cat = data_runtime::configs::resources::load_default().expect("resource catalog");
    ResourceKind::from_cfg(cat.get("pine_tree").expect("pine_tree"))
}

fn hand_axe() -> WeaponSpec {
    let cat = data_runtime::configs::weapons::load_default().expect("weapon catalog");
    WeaponSpec::from_cfg(cat.get("hand_axe").expect("hand_axe"))
}

#[test]
fn timed_progress_is_dt_over_harvest_time() {
    // pine harvest_time_s = 2.0
    let mut s = SimState::with_seed(1);
    let id = s.spawn_resource(pine(), Vec3::ZERO);
    let mut fx = Vec::new();
    assert!(harvest::start(&mut s.resources, id, PLAYER_HARVESTER, &mut fx));
    let p = harvest::advance(&mut s.resources, id, 0.5).unwrap();
    assert!((p - 0.25).abs() < 1e-6);
    let p = harvest::advance(&mut s.resources, id, 0.5).unwrap();
    assert!((p - 0.5).abs() < 1e-6);
    // oversized dt clamps instead of wrapping
    let p = harvest::advance(&mut s.resources, id, 100.0).unwrap();
    assert_eq!(p, 1.0);
    assert!(s.resources.get(id).is_some(), "full bar does not auto-complete");
}

#[test]
fn two_axe_swings_fell_a_pine() {
    // hand_axe harvest_hit = 0.5
    let mut s = SimState::with_seed(42);
    let id = s.spawn_resource(pine(), vec3(0.0, 0.0, 1.5));
    let input = SwingInput {
        origin: Vec3::ZERO,
        dir: vec3(0.0, 0.0, 1.0),
        aim: AimMode::Ray,
    };
    let axe = hand_axe();

    let out = s.player_swing(&axe, &input);
    assert_eq!(
        out,
        SwingOutcome::HarvestHit {
            id,
            progress: 0.5,
            completed: false
        }
    );

    s.swing_ready_in_s = 0.0;
    let out = s.player_swing(&axe, &input);
    assert_eq!(
        out,
        SwingOutcome::HarvestHit {
            id,
            progress: 1.0,
            completed: true
        }
    );
    assert!(s.resources.get(id).is_none(), "felled tree leaves the world");

    let ev = s.step(0.0, None);
    assert_eq!(ev.drops.len(), 1);
    let d = &ev.drops[0];
    assert_eq!(d.item, "pine_log");
    assert!((2..=4).contains(&d.amount));
    assert_eq!(
        ev.fx
            .iter()
            .filter(|f| f.tag == FeedbackTag::HarvestStart)
            .count(),
        1
    );
    assert_eq!(
        ev.fx
            .iter()
            .filter(|f| f.tag == FeedbackTag::HitWood)
            .count(),
        2
    );
    assert_eq!(
        ev.fx
            .iter()
            .filter(|f| f.tag == FeedbackTag::HarvestComplete)
            .count(),
        1
    );
}

#[test]
fn completion_without_claim_is_refused() {
    let mut s = SimState::with_seed(1);
    let id = s.spawn_resource(pine(), Vec3::ZERO);
    let (mut fx, mut drops) = (Vec::new(), Vec::new());
    assert!(!harvest::complete(
        &mut s.resources,
        id,
        &mut s.rng,
        &mut fx,
        &mut drops
    ));
    assert!(drops.is_empty());
    assert!(s.resources.get(id).is_some());
}
