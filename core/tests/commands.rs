//! Command dispatch tests: events emitted per command, JSON wire shape.

use riverfarm_core::{
    FertilizerLevel, PestManagement, PlayerCommand, SessionController, SessionStatus, SimEvent,
};

#[test]
fn setters_emit_only_on_change() {
    let mut session = SessionController::new();

    // Defaults are Medium / Integrated / buffer on.
    let same = PlayerCommand::SetFertilizer { level: FertilizerLevel::Medium };
    assert!(session.apply(&same).is_empty());
    assert!(session.apply(&PlayerCommand::SetBuffer { present: true }).is_empty());

    let events = session.apply(&PlayerCommand::SetFertilizer { level: FertilizerLevel::High });
    assert_eq!(
        events,
        vec![SimEvent::FertilizerChanged { cycle: 1, level: FertilizerLevel::High }]
    );

    let intensive = PlayerCommand::SetPestManagement { mode: PestManagement::Intensive };
    let events = session.apply(&intensive);
    assert_eq!(events[0].type_name(), "pest_management_changed");

    let events = session.apply(&PlayerCommand::SetBuffer { present: false });
    assert_eq!(events, vec![SimEvent::BufferChanged { cycle: 1, present: false }]);
}

#[test]
fn advance_emits_cycle_evaluated() {
    let mut session = SessionController::new();
    let events = session.apply(&PlayerCommand::AdvanceCycle);

    assert_eq!(events.len(), 1);
    match &events[0] {
        SimEvent::CycleEvaluated { cycle, crop_yield, cumulative_yield, river_health, .. } => {
            assert_eq!(*cycle, 2);
            assert_eq!(*crop_yield, 70.0);
            assert_eq!(*cumulative_yield, 140.0);
            assert_eq!(river_health.value(), 100.0);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn collapse_and_ignored_advance_are_reported() {
    let mut session = SessionController::new();
    session.apply(&PlayerCommand::SetFertilizer { level: FertilizerLevel::High });
    session.apply(&PlayerCommand::SetPestManagement { mode: PestManagement::Intensive });
    session.apply(&PlayerCommand::SetBuffer { present: false });

    let mut last = Vec::new();
    while session.state().status == SessionStatus::Active {
        last = session.apply(&PlayerCommand::AdvanceCycle);
    }
    assert_eq!(last.len(), 2);
    assert!(matches!(last[1], SimEvent::RiverCollapsed { cycle: 15, .. }));

    let events = session.apply(&PlayerCommand::AdvanceCycle);
    assert_eq!(
        events,
        vec![SimEvent::AdvanceIgnored { cycle: 15, status: SessionStatus::Collapsed }]
    );
}

#[test]
fn achievement_is_reported() {
    let mut session = SessionController::new();
    let mut last = Vec::new();
    while session.state().status == SessionStatus::Active {
        last = session.apply(&PlayerCommand::AdvanceCycle);
    }
    assert!(matches!(
        last.last(),
        Some(SimEvent::TargetAchieved { cycle: 72, .. })
    ));
}

#[test]
fn reset_emits_reset_then_seed_evaluation() {
    let mut session = SessionController::new();
    session.apply(&PlayerCommand::AdvanceCycle);
    session.apply(&PlayerCommand::AdvanceCycle);

    let events = session.apply(&PlayerCommand::Reset);
    assert_eq!(events.len(), 2);
    assert_eq!(
        events[0],
        SimEvent::SessionReset { previous_status: SessionStatus::Active, previous_cycle: 3 }
    );
    assert!(matches!(events[1], SimEvent::CycleEvaluated { cycle: 1, .. }));
    assert_eq!(session.state().cumulative_yield, 70.0);
}

#[test]
fn commands_parse_from_json() {
    let cmd: PlayerCommand =
        serde_json::from_str(r#"{"cmd":"set_fertilizer","level":"low"}"#).unwrap();
    assert_eq!(cmd, PlayerCommand::SetFertilizer { level: FertilizerLevel::Low });

    let cmd: PlayerCommand = serde_json::from_str(r#"{"cmd":"advance_cycle"}"#).unwrap();
    assert_eq!(cmd, PlayerCommand::AdvanceCycle);
    assert_eq!(cmd.name(), "advance_cycle");

    let bad_json = r#"{"cmd":"set_fertilizer","level":"extreme"}"#;
    let bad = serde_json::from_str::<PlayerCommand>(bad_json);
    assert!(bad.is_err());
}

#[test]
fn state_serializes_for_hosts() {
    let session = SessionController::new();
    let json: serde_json::Value = serde_json::to_value(session.state()).unwrap();

    assert_eq!(json["status"], "active");
    assert_eq!(json["cycle_count"], 1);
    assert_eq!(json["river_health"], 100.0);
    assert_eq!(json["last_result"]["yield"], 70.0);
    assert_eq!(json["decisions"]["fertilizer_level"], "medium");
}
