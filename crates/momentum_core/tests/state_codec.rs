use chrono::{TimeZone, Utc};
use momentum_core::seed::sample_state;
use momentum_core::{
    ApplicationState, MemberRole, Message, Project, ProjectStatus, Task, TaskPriority, TaskStatus,
    TeamMember,
};
use uuid::Uuid;

#[test]
fn sample_state_survives_json_roundtrip() {
    let state = sample_state(Utc::now());

    let bytes = serde_json::to_vec(&state).unwrap();
    let decoded: ApplicationState = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(decoded, state);
}

#[test]
fn roundtrip_preserves_list_order_and_optional_fields() {
    let now = Utc.with_ymd_and_hms(2026, 2, 13, 10, 0, 0).unwrap();
    let owner = TeamMember::new("Ada Lovelace", "ada@example.com", MemberRole::Owner);
    let mut state = ApplicationState::empty(owner.id);
    state.team_members.push(owner.clone());

    let mut project = Project::new("Beta", "", now);
    project.budget = None;
    project.team_member_ids = vec![owner.id, owner.id];
    state.projects.push(project.clone());

    for title in ["third", "first", "second"] {
        let mut task = Task::new(title, "", now);
        task.project_id = Some(project.id);
        state.tasks.push(task);
    }
    let mut broadcast = Message::new(owner.id, "hello");
    broadcast.sent_at = now;
    state.messages.push(broadcast);

    let json = serde_json::to_string(&state).unwrap();
    let decoded: ApplicationState = serde_json::from_str(&json).unwrap();

    let titles = decoded.tasks.iter().map(|t| t.title.as_str()).collect::<Vec<_>>();
    assert_eq!(titles, ["third", "first", "second"]);
    assert_eq!(decoded.projects[0].team_member_ids.len(), 2);
    assert_eq!(decoded.messages[0].recipient_id, None);
    assert_eq!(decoded, state);
}

#[test]
fn arbitrary_floats_roundtrip_bit_for_bit() {
    let now = Utc.with_ymd_and_hms(2026, 2, 13, 10, 0, 0).unwrap();
    let owner = TeamMember::new("Ada Lovelace", "ada@example.com", MemberRole::Owner);
    let mut state = ApplicationState::empty(owner.id);
    state.team_members.push(owner);

    // xorshift64 keeps the sequence fixed across runs.
    let mut seed = 0x9E37_79B9_7F4A_7C15_u64;
    let mut next = || {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        (seed >> 11) as f64 / (1u64 << 53) as f64
    };
    for i in 0..200 {
        let mut task = Task::new(format!("task {i}"), "", now);
        task.estimated_hours = next() * 100.0;
        task.actual_hours = next() * 1e-3;
        state.tasks.push(task);

        let mut project = Project::new(format!("project {i}"), "", now);
        project.budget = Some(next() * 1e6);
        project.progress = next();
        state.projects.push(project);
    }
    state.tasks[0].estimated_hours = 39.430133835633676;
    state.projects[0].progress = 0.1 + 0.2;

    let bytes = serde_json::to_vec(&state).unwrap();
    let decoded: ApplicationState = serde_json::from_slice(&bytes).unwrap();

    for (task, back) in state.tasks.iter().zip(&decoded.tasks) {
        assert_eq!(task.estimated_hours.to_bits(), back.estimated_hours.to_bits());
        assert_eq!(task.actual_hours.to_bits(), back.actual_hours.to_bits());
    }
    assert_eq!(decoded, state);
}

#[test]
fn task_serialization_uses_snake_case_wire_names() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let deadline = Utc.with_ymd_and_hms(2026, 2, 13, 10, 0, 0).unwrap();
    let mut task = Task::with_id(id, "ship", "release build", deadline);
    task.priority = TaskPriority::Critical;
    task.status = TaskStatus::InProgress;
    task.tags = vec!["release".to_string()];
    task.estimated_hours = 2.5;

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["priority"], "critical");
    assert_eq!(json["status"], "in_progress");
    assert_eq!(json["deadline"], "2026-02-13T10:00:00Z");
    assert_eq!(json["completed_at"], serde_json::Value::Null);
    assert_eq!(json["assigned_to_id"], serde_json::Value::Null);
    assert_eq!(json["tags"], serde_json::json!(["release"]));
    assert_eq!(json["estimated_hours"], 2.5);
}

#[test]
fn enum_wire_values_are_snake_case() {
    assert_eq!(
        serde_json::to_value(ProjectStatus::OnHold).unwrap(),
        serde_json::json!("on_hold")
    );
    assert_eq!(
        serde_json::to_value(MemberRole::Qa).unwrap(),
        serde_json::json!("qa")
    );
    assert_eq!(
        serde_json::to_value(TaskStatus::Review).unwrap(),
        serde_json::json!("review")
    );
}

#[test]
fn state_missing_a_field_does_not_decode() {
    let value = serde_json::json!({
        "tasks": [],
        "projects": [],
        "team_members": [],
        "messages": []
    });

    let err = serde_json::from_value::<ApplicationState>(value).unwrap_err();
    assert!(err.to_string().contains("current_user_id"), "unexpected error: {err}");
}
