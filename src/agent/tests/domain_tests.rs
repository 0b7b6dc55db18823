//! Unit tests for agent domain types.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use crate::agent::domain::{
    Agent, AgentId, AgentKind, AgentStatus, CapabilitySet, ParseAgentKindError,
    ParseAgentStatusError,
};
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::{Map, json};

fn agent() -> Agent {
    Agent::new(
        "librarian",
        AgentKind::Generation,
        CapabilitySet::new(),
        Map::new(),
        &DefaultClock,
    )
}

#[rstest]
fn agent_id_new_creates_non_nil() {
    let id = AgentId::new();
    assert!(!id.as_ref().is_nil());
}

#[rstest]
#[case(AgentKind::Generation, "generation")]
#[case(AgentKind::TaskExecutor, "task_executor")]
#[case(AgentKind::Orchestrator, "orchestrator")]
#[case(AgentKind::RetrievalAugmented, "retrieval_augmented")]
#[case(AgentKind::Multimodal, "multimodal")]
fn agent_kind_round_trips_through_str(#[case] kind: AgentKind, #[case] tag: &str) {
    assert_eq!(kind.as_str(), tag);
    assert_eq!(AgentKind::try_from(tag).expect("known tag"), kind);
}

#[rstest]
fn agent_kind_parse_trims_and_lowercases() {
    assert_eq!(
        AgentKind::try_from("  Task_Executor ").expect("normalised tag"),
        AgentKind::TaskExecutor,
    );
}

#[rstest]
fn agent_kind_rejects_unknown_tag() {
    let err = AgentKind::try_from("oracle").expect_err("unknown tag must fail");
    assert_eq!(err, ParseAgentKindError("oracle".to_owned()));
}

#[rstest]
#[case(AgentStatus::Created, false)]
#[case(AgentStatus::Active, true)]
#[case(AgentStatus::Idle, true)]
#[case(AgentStatus::Busy, false)]
#[case(AgentStatus::Error, false)]
#[case(AgentStatus::Stopped, false)]
fn agent_status_availability(#[case] status: AgentStatus, #[case] available: bool) {
    assert_eq!(status.is_available(), available);
}

#[rstest]
#[case(AgentStatus::Created, "created")]
#[case(AgentStatus::Active, "active")]
#[case(AgentStatus::Idle, "idle")]
#[case(AgentStatus::Busy, "busy")]
#[case(AgentStatus::Error, "error")]
#[case(AgentStatus::Stopped, "stopped")]
fn agent_status_round_trips_through_str(#[case] status: AgentStatus, #[case] tag: &str) {
    assert_eq!(status.as_str(), tag);
    assert_eq!(AgentStatus::try_from(tag).expect("known tag"), status);
}

#[rstest]
fn agent_status_rejects_unknown_tag() {
    let err = AgentStatus::try_from("sleeping").expect_err("unknown tag must fail");
    assert_eq!(err, ParseAgentStatusError("sleeping".to_owned()));
}

#[rstest]
fn capability_set_tracks_declarations() {
    let mut capabilities = CapabilitySet::new();
    assert!(capabilities.is_empty());

    capabilities.insert("summarise", json!(true));
    capabilities.insert("translate", json!({"languages": ["en", "cy"]}));

    assert_eq!(capabilities.len(), 2);
    assert!(capabilities.has("summarise"));
    assert!(!capabilities.has("transcribe"));
    assert!(capabilities.contains_all(["summarise", "translate"]));
    assert!(!capabilities.contains_all(["summarise", "transcribe"]));

    assert_eq!(capabilities.remove("summarise"), Some(json!(true)));
    assert_eq!(capabilities.remove("summarise"), None);
}

#[rstest]
fn capability_set_contains_all_is_vacuously_true_when_empty_requirement() {
    let capabilities = CapabilitySet::new();
    assert!(capabilities.contains_all(Vec::<String>::new()));
}

#[rstest]
fn new_agent_starts_created_with_equal_timestamps() {
    let agent = agent();

    assert_eq!(agent.status(), AgentStatus::Created);
    assert_eq!(agent.name(), "librarian");
    assert_eq!(agent.kind(), AgentKind::Generation);
    assert_eq!(agent.created_at(), agent.updated_at());
    assert!(!agent.is_available());
}

#[rstest]
fn change_status_touches_the_aggregate() {
    let mut agent = agent();
    let before = agent.updated_at();

    assert!(agent.change_status(AgentStatus::Active, &DefaultClock));

    assert_eq!(agent.status(), AgentStatus::Active);
    assert!(agent.is_available());
    assert!(agent.updated_at() >= before);
}

#[rstest]
fn same_status_change_is_a_silent_no_op() {
    let mut agent = agent();
    assert!(agent.change_status(AgentStatus::Active, &DefaultClock));
    let stamped = agent.updated_at();

    assert!(!agent.change_status(AgentStatus::Active, &DefaultClock));

    assert_eq!(agent.status(), AgentStatus::Active);
    assert_eq!(agent.updated_at(), stamped);
}

#[rstest]
fn capability_mutation_touches_only_on_change() {
    let mut agent = agent();
    agent.add_capability("summarise", json!(true), &DefaultClock);
    assert!(agent.capabilities().has("summarise"));
    let stamped = agent.updated_at();

    assert_eq!(agent.remove_capability("transcribe", &DefaultClock), None);
    assert_eq!(agent.updated_at(), stamped);

    assert_eq!(
        agent.remove_capability("summarise", &DefaultClock),
        Some(json!(true)),
    );
    assert!(!agent.capabilities().has("summarise"));
}
