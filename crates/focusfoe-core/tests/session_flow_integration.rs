//! End-to-end session lifecycle: countdown, ready capture, seal, flow
//! transitions, scoring, and the completion export.

use chrono::NaiveDate;
use focusfoe_core::export::LocalSnapshot;
use focusfoe_core::scoring::{session_multiplier, session_score, WrapGrade};
use focusfoe_core::{Event, FlowAction, FlowState, PrestartTimer, Session};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 4).unwrap()
}

#[test]
fn committed_session_earns_its_boost() {
    let mut session = Session::new();
    let mut timer = PrestartTimer::new(420_000).unwrap();

    timer.start(0);
    session.apply(FlowAction::LockIn).unwrap();

    // Ready tap a quarter of the way through the countdown.
    let ready = timer.tap_ready(105_000).expect("first tap captures");
    if let Event::ReadyCaptured { elapsed_ms, .. } = ready {
        assert!(session.capture_ready(elapsed_ms));
    } else {
        panic!("expected ReadyCaptured");
    }

    // Countdown runs out; sealing fires once and carries the capture flag.
    assert!(timer.tick(400_000).is_none());
    let sealed = timer.tick(420_000).unwrap();
    assert!(matches!(
        sealed,
        Event::CountdownSealed {
            ready_captured: true,
            ..
        }
    ));
    session.record_seal();
    assert!(!session.multiplier_penalty());

    // Walk the remaining phases.
    session.apply(FlowAction::Confirm).unwrap();
    session.apply(FlowAction::Begin).unwrap();
    session.apply(FlowAction::Finish).unwrap();
    session.set_rating(92).unwrap();
    session.apply(FlowAction::SubmitRating).unwrap();
    session.apply(FlowAction::Continue).unwrap();
    session.apply(FlowAction::Claim).unwrap();
    assert_eq!(session.state(), FlowState::PostActions);

    // progress 0.75 -> boost 0.20; grade A adds 0.10.
    let input = session.multiplier_input(timer.total_ms(), WrapGrade::A);
    let multiplier = session_multiplier(&input).unwrap();
    assert!((multiplier - 1.30).abs() < 1e-9);
    assert_eq!(session_score(100.0, multiplier).unwrap(), 130);

    // Completion export carries the captured latency.
    let mut snapshot = LocalSnapshot::new();
    let record = snapshot
        .record_completion(&session, timer.clamped_ready_ms(), false, date())
        .unwrap();
    assert_eq!(record.day_index, 1);
    assert_eq!(record.streak_after, 1);
    assert_eq!(record.grade, Some(92));
    assert_eq!(record.latency_ms, Some(105_000));
    let json = record.to_json().unwrap();
    assert!(json.contains("\"date\":\"2026-08-04\""));
}

#[test]
fn hesitant_session_pays_the_flat_penalty() {
    let mut session = Session::new();
    let mut timer = PrestartTimer::new(420_000).unwrap();
    timer.start(0);

    // No tap; the countdown just runs out.
    let sealed = timer.tick(420_000).unwrap();
    assert!(matches!(
        sealed,
        Event::CountdownSealed {
            ready_captured: false,
            ..
        }
    ));
    session.record_seal();
    assert!(session.multiplier_penalty());

    let input = session.multiplier_input(timer.total_ms(), WrapGrade::B);
    let multiplier = session_multiplier(&input).unwrap();
    assert!((multiplier - 0.75).abs() < 1e-9);
    assert_eq!(session_score(100.0, multiplier).unwrap(), 75);
}

#[test]
fn second_tap_never_overwrites_the_first() {
    let mut session = Session::new();
    let mut timer = PrestartTimer::new(420_000).unwrap();
    timer.start(0);

    let first = timer.tap_ready(30_000).unwrap();
    if let Event::ReadyCaptured { elapsed_ms, .. } = first {
        session.capture_ready(elapsed_ms);
    }
    assert!(timer.tap_ready(200_000).is_none());
    assert!(!session.capture_ready(200_000));

    assert_eq!(session.ready_at_ms(), Some(30_000));
}

#[test]
fn reset_mid_session_returns_to_a_clean_pre_start() {
    let mut session = Session::new();
    session.apply(FlowAction::LockIn).unwrap();
    session.apply(FlowAction::Confirm).unwrap();
    session.target = Some("deep work".into());
    session.capture_ready(9_000);

    let event = session.apply(FlowAction::Reset).unwrap();
    assert!(matches!(
        event,
        Event::SessionReset {
            from: FlowState::FocusSetup,
            ..
        }
    ));
    assert_eq!(session.state(), FlowState::PreStart);
    assert!(!session.ready_pressed());
    assert!(session.target.is_none());

    // A fresh session can capture ready again.
    assert!(session.capture_ready(1_000));
}

#[test]
fn discarded_recap_goes_back_to_the_start() {
    let mut session = Session::new();
    for action in [
        FlowAction::LockIn,
        FlowAction::Confirm,
        FlowAction::Begin,
        FlowAction::Finish,
        FlowAction::SubmitRating,
    ] {
        session.apply(action).unwrap();
    }
    assert_eq!(session.state(), FlowState::Recap);

    session.apply(FlowAction::Discard).unwrap();
    assert_eq!(session.state(), FlowState::PreStart);
}
