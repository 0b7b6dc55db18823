//! Unit tests for task domain types.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use crate::task::domain::{
    ParseTaskKindError, Task, TaskDomainError, TaskId, TaskKind, TaskStatus,
};
use eyre::Result;
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::{Map, json};

fn payload() -> Map<String, serde_json::Value> {
    let mut payload = Map::new();
    payload.insert("query".to_owned(), json!("weather"));
    payload
}

#[rstest]
fn task_id_new_creates_non_nil() {
    let id = TaskId::new();
    assert!(!id.as_ref().is_nil());
}

#[rstest]
#[case(TaskKind::Generation, "generation")]
#[case(TaskKind::RetrievalQuery, "retrieval_query")]
#[case(TaskKind::DataProcessing, "data_processing")]
#[case(TaskKind::Multimodal, "multimodal")]
#[case(TaskKind::Custom, "custom")]
fn task_kind_round_trips_through_str(#[case] kind: TaskKind, #[case] tag: &str) -> Result<()> {
    assert_eq!(kind.as_str(), tag);
    assert_eq!(TaskKind::try_from(tag)?, kind);
    Ok(())
}

#[rstest]
fn task_kind_rejects_unknown_tag() {
    let err = TaskKind::try_from("telepathy").expect_err("unknown tag must fail");
    assert_eq!(err, ParseTaskKindError("telepathy".to_owned()));
}

#[rstest]
fn new_task_requires_a_payload() {
    let result = Task::new(TaskKind::Custom, Map::new(), Map::new(), &DefaultClock);
    assert_eq!(result.expect_err("empty payload"), TaskDomainError::EmptyPayload);
}

#[rstest]
fn new_task_starts_created_and_unassigned() -> Result<()> {
    let task = Task::new(TaskKind::Generation, payload(), Map::new(), &DefaultClock)?;

    assert_eq!(task.status(), TaskStatus::Created);
    assert_eq!(task.assigned_agent(), None);
    assert_eq!(task.result(), None);
    assert_eq!(task.error(), None);
    assert_eq!(task.started_at(), None);
    assert_eq!(task.completed_at(), None);
    assert_eq!(task.created_at(), task.updated_at());
    assert!(!task.is_finished());
    Ok(())
}

#[rstest]
fn priority_defaults_to_zero() {
    let task = Task::new(TaskKind::Custom, payload(), Map::new(), &DefaultClock)
        .expect("non-empty payload");
    assert_eq!(task.priority(), 0);
}

#[rstest]
fn priority_reads_from_metadata() {
    let mut metadata = Map::new();
    metadata.insert("priority".to_owned(), json!(7));
    let task = Task::new(TaskKind::Custom, payload(), metadata, &DefaultClock)
        .expect("non-empty payload");
    assert_eq!(task.priority(), 7);
}

#[rstest]
fn required_capabilities_absent_without_metadata() {
    let task = Task::new(TaskKind::Custom, payload(), Map::new(), &DefaultClock)
        .expect("non-empty payload");
    assert_eq!(task.required_capabilities(), None);
}

#[rstest]
fn required_capabilities_reads_string_entries() {
    let mut metadata = Map::new();
    metadata.insert(
        "required_capabilities".to_owned(),
        json!(["summarise", "translate"]),
    );
    let task = Task::new(TaskKind::Custom, payload(), metadata, &DefaultClock)
        .expect("non-empty payload");

    assert_eq!(
        task.required_capabilities(),
        Some(vec!["summarise".to_owned(), "translate".to_owned()]),
    );
}
