//! Session lifecycle integration tests.
//!
//! These drive a full session through the public API the way a UI shell
//! would: drag, drop, acknowledge intents, advance rounds.

use offering_engine::catalog::{Catalog, Destination, Item};
use offering_engine::core::{DestinationId, ItemId, LayoutConfig, Point, Rect, SessionConfig, StageGeometry};
use offering_engine::effects::PulseKind;
use offering_engine::events::SessionEvent;
use offering_engine::session::{MatchOutcome, Session, SessionPhase};
use offering_engine::targeting::stage_geometry;
use offering_engine::SessionError;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// `destinations` destinations named `d0..`, each with `per_destination`
/// items. Items of even destinations are red, odd ones black.
fn items_and_destinations(destinations: usize, per_destination: usize) -> (Vec<Item>, Vec<Destination>) {
    let dests = (0..destinations)
        .map(|d| Destination::new(format!("d{d}"), format!("D{d}")))
        .collect();
    let items = (0..destinations)
        .flat_map(|d| {
            let faction = if d % 2 == 0 { "red" } else { "black" };
            (0..per_destination)
                .map(move |i| Item::new(format!("d{d}-{i}"), format!("item {d}-{i}"), format!("d{d}")).with_faction(faction))
        })
        .collect();
    (items, dests)
}

fn session(destinations: usize, per_destination: usize, cap: usize) -> Session {
    init_tracing();
    let (items, dests) = items_and_destinations(destinations, per_destination);
    Session::new(items, dests, SessionConfig::default().with_cap_rounds(cap).with_seed(42)).unwrap()
}

const SNAP: f64 = 30.0;

/// Stage at the client origin; destination `i` anchored at (100 * (i + 1), 100).
fn stage(destinations: usize) -> StageGeometry {
    let mut stage = StageGeometry::new(Rect::new(0.0, 0.0, 1000.0, 600.0), SNAP);
    for d in 0..destinations {
        stage = stage.with_anchor(format!("d{d}"), Point::new(100.0 * (d as f64 + 1.0), 100.0));
    }
    stage
}

fn tray_slot() -> Rect {
    Rect::new(480.0, 500.0, 40.0, 40.0)
}

fn anchor(stage: &StageGeometry, destination: &DestinationId) -> Point {
    stage.anchor_of(destination).unwrap()
}

fn wrong_destination(stage: &StageGeometry, item: &Item) -> DestinationId {
    stage
        .anchors
        .iter()
        .find(|a| a.destination != item.destination)
        .unwrap()
        .destination
        .clone()
}

/// Drop the first tray item on its own destination.
fn drop_correct(session: &mut Session, stage: &StageGeometry) -> MatchOutcome {
    let item = session.active_batch()[0].clone();
    assert!(session.begin_drag(&item.id, tray_slot()));
    session.drop_at(anchor(stage, &item.destination), stage).unwrap()
}

/// Drop the first tray item on some other destination.
fn drop_wrong(session: &mut Session, stage: &StageGeometry) -> MatchOutcome {
    let item = session.active_batch()[0].clone();
    let wrong = wrong_destination(stage, &item);
    assert!(session.begin_drag(&item.id, tray_slot()));
    session.drop_at(anchor(stage, &wrong), stage).unwrap()
}

/// Correctly match `count` items, advancing rounds as needed.
fn play_correct(session: &mut Session, stage: &StageGeometry, count: usize) {
    for _ in 0..count {
        if session.phase() == SessionPhase::RoundTransition {
            assert!(session.advance_round());
        }
        assert!(drop_correct(session, stage).is_correct());
    }
}

/// Play every item correctly, acknowledging offerings as they launch.
fn play_to_completion(session: &mut Session, stage: &StageGeometry) {
    while !session.is_complete() {
        if session.phase() == SessionPhase::RoundTransition {
            assert!(session.advance_round());
        }
        if let MatchOutcome::Correct { offering, .. } = drop_correct(session, stage) {
            assert!(session.on_offering_complete(offering));
        }
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_two_destinations_five_items() {
    let session = session(2, 5, 5);

    assert_eq!(session.max_rounds(), 5);
    assert_eq!(session.round_index(), 1);
    assert_eq!(session.active_batch().len(), 2);

    let mut destinations: Vec<_> = session.active_batch().iter().map(|i| i.destination.to_string()).collect();
    destinations.sort();
    assert_eq!(destinations, vec!["d0", "d1"]);
}

#[test]
fn test_first_correct_then_reward_on_third() {
    let mut session = session(3, 3, 5);
    let stage = stage(3);
    session.drain_events();

    drop_correct(&mut session, &stage);
    assert_eq!(session.streak(), 1);
    assert_eq!(session.score(), 100);
    assert_eq!(session.reward_count(), 0);
    assert_eq!(session.drain_events(), vec![SessionEvent::StreakStarted]);

    drop_correct(&mut session, &stage);
    assert_eq!(session.reward_count(), 0);

    drop_correct(&mut session, &stage);
    assert_eq!(session.streak(), 3);
    assert_eq!(session.reward_count(), 1);
    assert!(session
        .drain_events()
        .contains(&SessionEvent::RewardEarned { streak: 3, total: 1 }));
}

#[test]
fn test_wrong_drop_after_long_streak() {
    let mut session = session(3, 5, 5);
    let stage = stage(3);
    play_correct(&mut session, &stage, 5);
    assert_eq!(session.streak(), 5);
    session.drain_events();

    let score = session.score();
    let item = session.active_batch()[0].clone();
    let outcome = drop_wrong(&mut session, &stage);

    assert!(!outcome.is_correct());
    assert_eq!(session.streak(), 0);
    assert_eq!(session.max_streak(), 5);
    assert_eq!(session.score(), score);
    assert!(session.active_batch().iter().any(|i| i.id == item.id));
    assert_eq!(session.drain_events(), vec![SessionEvent::Encouragement { lost_streak: 5 }]);
}

#[test]
fn test_last_item_completes_game() {
    let mut session = session(2, 3, 5);
    let stage = stage(2);
    play_to_completion(&mut session, &stage);

    assert_eq!(session.phase(), SessionPhase::Complete);
    assert_eq!(session.completed_total() as usize, session.total_items());
    assert_eq!(session.round_index(), 3);
    assert!(session.drain_events().contains(&SessionEvent::GameComplete));

    // Terminal: no drags, drops or round loads
    assert!(!session.begin_drag(&ItemId::new("d0-0"), tray_slot()));
    assert!(session.drop_at(Point::new(100.0, 100.0), &stage).is_none());
    assert!(!session.advance_round());
}

// =============================================================================
// Drag lifecycle
// =============================================================================

#[test]
fn test_end_drag_without_begin_is_noop() {
    let mut session = session(2, 2, 5);
    let before = session.snapshot();

    session.end_drag();
    session.end_drag();

    assert_eq!(session.snapshot(), before);
}

#[test]
fn test_cancelled_drag_does_not_drop() {
    let mut session = session(2, 2, 5);
    let stage = stage(2);
    let item = session.active_batch()[0].clone();

    session.begin_drag(&item.id, tray_slot());
    assert_eq!(session.hidden_item(), Some(&item.id));
    session.end_drag();

    assert!(session.hidden_item().is_none());
    assert!(session.drop_at(anchor(&stage, &item.destination), &stage).is_none());
    assert_eq!(session.score(), 0);
    assert_eq!(session.active_batch().len(), 2);
}

#[test]
fn test_drop_outside_tolerance_is_incorrect() {
    let mut session = session(2, 2, 5);
    let stage = stage(2);
    let item = session.active_batch()[0].clone();

    session.begin_drag(&item.id, tray_slot());
    let outcome = session.drop_at(Point::new(900.0, 550.0), &stage).unwrap();

    assert_eq!(outcome, MatchOutcome::Incorrect { item: item.id, resolved: None });
    assert_eq!(session.effects().pulse().unwrap().kind, PulseKind::Incorrect);
    assert!(session.effects().returning().is_some());
}

#[test]
fn test_snap_radius_boundary() {
    let stage = stage(2);
    let mut session = session(2, 2, 5);
    let item = session.active_batch()[0].clone();
    let target = anchor(&stage, &item.destination);
    let eps = 1e-6;

    session.begin_drag(&item.id, tray_slot());
    let at_radius = Point::new(target.x, target.y + SNAP);
    assert!(!session.drop_at(at_radius, &stage).unwrap().is_correct());

    session.begin_drag(&item.id, tray_slot());
    let outside = Point::new(target.x, target.y + SNAP + eps);
    assert!(!session.drop_at(outside, &stage).unwrap().is_correct());

    session.begin_drag(&item.id, tray_slot());
    let inside = Point::new(target.x, target.y + SNAP - eps);
    assert!(session.drop_at(inside, &stage).unwrap().is_correct());
}

#[test]
fn test_drop_point_is_stage_relative() {
    let mut session = session(2, 2, 5);
    let item = session.active_batch()[0].clone();

    // Same anchors, stage element offset in the page
    let mut stage = stage(2);
    stage.bounds = Rect::new(250.0, 120.0, 1000.0, 600.0);
    let local = anchor(&stage, &item.destination);

    session.begin_drag(&item.id, Rect::new(300.0, 620.0, 40.0, 40.0));
    let client = Point::new(local.x + 250.0, local.y + 120.0);
    let MatchOutcome::Correct { offering, .. } = session.drop_at(client, &stage).unwrap() else {
        panic!("expected a correct match");
    };

    let entering = &session.effects().entering()[0];
    assert_eq!(entering.id, offering);
    assert_eq!(entering.from, local);
    assert_eq!(entering.to, local);
}

// =============================================================================
// Intents and inventories
// =============================================================================

#[test]
fn test_wrong_then_right_delivers_once() {
    let mut session = session(2, 2, 5);
    let stage = stage(2);
    let item = session.active_batch()[0].clone();

    drop_wrong(&mut session, &stage);
    assert_eq!(session.effects().returning().unwrap().item.id, item.id);

    // Retry before the return animation finishes
    session.begin_drag(&item.id, tray_slot());
    let MatchOutcome::Correct { offering, destination, .. } =
        session.drop_at(anchor(&stage, &item.destination), &stage).unwrap()
    else {
        panic!("expected a correct match");
    };
    assert!(session.effects().returning().is_none());
    assert!(!session.on_return_complete());

    assert!(session.on_offering_complete(offering));
    assert!(!session.on_offering_complete(offering));

    let stored: Vec<_> = session.inventory(&destination).iter().map(|i| i.id.clone()).collect();
    assert_eq!(stored, vec![item.id.clone()]);
    let elsewhere = wrong_destination(&stage, &item);
    assert!(session.inventory(&elsewhere).iter().all(|i| i.id != item.id));
    assert!(session.active_batch().iter().all(|i| i.id != item.id));
}

#[test]
fn test_offerings_overlap() {
    let mut session = session(3, 2, 5);
    let stage = stage(3);

    let first = drop_correct(&mut session, &stage);
    let second = drop_correct(&mut session, &stage);
    assert_eq!(session.effects().in_flight_count(), 2);

    // Later offering lands first
    for outcome in [second, first] {
        let MatchOutcome::Correct { offering, .. } = outcome else {
            panic!("expected a correct match");
        };
        assert!(session.on_offering_complete(offering));
    }
    assert_eq!(session.effects().in_flight_count(), 0);
    assert_eq!(session.effects().delivered_count(), 2);
}

#[test]
fn test_unacknowledged_offerings_stay_pending() {
    let mut session = session(2, 1, 5);
    let stage = stage(2);
    play_correct(&mut session, &stage, 2);

    assert!(session.is_complete());
    assert_eq!(session.effects().in_flight_count(), 2);
    assert_eq!(session.effects().delivered_count(), 0);

    assert_eq!(session.flush_offerings(), 2);
    assert_eq!(session.effects().delivered_count(), 2);
    let delivered = session
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, SessionEvent::OfferingDelivered { .. }))
        .count();
    assert_eq!(delivered, 2);
}

#[test]
fn test_pulse_supersedes_and_clears() {
    let mut session = session(2, 2, 5);
    let stage = stage(2);

    drop_wrong(&mut session, &stage);
    let first = session.effects().pulse().unwrap().key;
    drop_wrong(&mut session, &stage);
    let second = session.effects().pulse().unwrap().key;
    assert_ne!(first, second);

    assert!(session.on_pulse_complete());
    assert!(session.effects().pulse().is_none());
    assert!(!session.on_pulse_complete());
}

#[test]
fn test_round_transition_resets_presentation() {
    let mut session = session(2, 2, 5);
    let stage = stage(2);

    play_correct(&mut session, &stage, 2);
    assert_eq!(session.phase(), SessionPhase::RoundTransition);
    assert!(session.spotlight().is_some());
    let epoch = session.snapshot().animation_epoch;

    // Item still flying when the round ends
    let pending = session.effects().entering()[0].id;

    assert!(session.advance_round());
    let snapshot = session.snapshot();
    assert_eq!(snapshot.phase, SessionPhase::Ready);
    assert_eq!(snapshot.round_index, 2);
    assert_eq!(snapshot.animation_epoch, epoch + 1);
    assert!(snapshot.spotlight.is_none());
    assert!(snapshot.pulse.is_none());
    assert!(snapshot.inventories.iter().all(|i| i.recent.is_none()));

    assert!(session.on_offering_complete(pending));
}

// =============================================================================
// Accounting and progress
// =============================================================================

#[test]
fn test_item_accounting_holds_throughout() {
    let mut session = session(3, 4, 3);
    let stage = stage(3);
    assert_eq!(session.total_items(), 9);

    let mut pending = Vec::new();
    while !session.is_complete() {
        if session.phase() == SessionPhase::RoundTransition {
            session.advance_round();
        }
        drop_wrong(&mut session, &stage);
        assert_eq!(session.accounted_items(), session.total_items());

        if let MatchOutcome::Correct { offering, .. } = drop_correct(&mut session, &stage) {
            pending.push(offering);
        }
        assert_eq!(session.accounted_items(), session.total_items());

        // Acknowledge every other offering late
        if pending.len() >= 2 {
            assert!(session.on_offering_complete(pending.remove(0)));
        }
    }

    for offering in pending {
        assert!(session.on_offering_complete(offering));
    }
    assert_eq!(session.effects().delivered_count(), session.total_items());
}

#[test]
fn test_faction_progress() {
    let mut session = session(2, 2, 5);
    let stage = stage(2);
    play_to_completion(&mut session, &stage);

    let snapshot = session.snapshot();
    assert_eq!(snapshot.faction_progress.len(), 2);
    for progress in &snapshot.faction_progress {
        assert_eq!(progress.total, 2);
        assert_eq!(progress.completed, 2);
    }
}

#[test]
fn test_no_supply_is_fatal() {
    init_tracing();
    let (_, destinations) = items_and_destinations(3, 0);
    let err = Session::new(Vec::new(), destinations, SessionConfig::default()).unwrap_err();
    assert_eq!(err, SessionError::NoPlayableRounds { destinations: 0, cap_rounds: 5 });
}

#[test]
fn test_same_seed_same_session() {
    let a = session(3, 5, 4);
    let b = session(3, 5, 4);
    assert_eq!(a.snapshot().active_batch, b.snapshot().active_batch);
    assert_eq!(a.seed(), 42);
}

// =============================================================================
// Catalog to session
// =============================================================================

const GAME_DATA: &str = r##"{
    "clans": [
        {"id": "clan_paiwoe", "name": "PAIWOE"},
        {"id": "clan_kie", "name": "KIE"},
        {"id": "clan_empty", "name": "EMPTY"}
    ],
    "items": [
        {"id": "item_arara_paiwoe", "name": "arara", "icon": "🦜", "correct_clan_id": "clan_paiwoe", "color": "#b52323"},
        {"id": "item_tucano_paiwoe", "name": "tucano", "icon": "🐦", "correct_clan_id": "clan_paiwoe", "color": "#b52323"},
        {"id": "item_anta_kie", "name": "anta", "icon": "🫎", "correct_clan_id": "clan_kie", "color": "#000000"},
        {"id": "item_tucano_paiwoe", "name": "tucano", "icon": "🐦", "correct_clan_id": "clan_paiwoe", "color": "#b52323"}
    ]
}"##;

#[test]
fn test_catalog_session_with_ring_layout() {
    init_tracing();
    let catalog = Catalog::from_json(GAME_DATA).unwrap();
    // Repeated item id in the data is loaded once
    assert_eq!(catalog.items().len(), 3);
    let mut session = Session::from_catalog(&catalog, SessionConfig::default().with_seed(3)).unwrap();

    // Smallest supply is one item; the empty clan does not participate
    assert_eq!(session.max_rounds(), 1);
    assert_eq!(session.destinations().len(), 2);
    assert_eq!(session.total_items(), 2);

    let stage = stage_geometry(Rect::new(0.0, 0.0, 1200.0, 800.0), &LayoutConfig::default(), &catalog);
    play_to_completion(&mut session, &stage);

    let snapshot = session.snapshot();
    assert_eq!(snapshot.completed_total, 2);
    assert_eq!(snapshot.inventories.len(), 2);
    assert!(snapshot.inventories.iter().all(|i| i.items.len() == 1));
}

#[test]
fn test_snapshot_serializes() {
    let mut session = session(2, 2, 5);
    let stage = stage(2);
    drop_correct(&mut session, &stage);

    let json = serde_json::to_value(session.snapshot()).unwrap();
    assert_eq!(json["score"], 100);
    assert_eq!(json["phase"], "Ready");
    assert_eq!(json["entering"].as_array().unwrap().len(), 1);
}
