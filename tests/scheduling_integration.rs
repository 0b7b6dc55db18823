//! Integration tests for the task scheduling flow.
//!
//! Drives task creation, agent registration, and the pending-task sweep
//! through the public service APIs, observing the published domain events
//! through deferred subscribers.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

mod test_helpers;

use brunel::agent::adapters::memory::InMemoryAgentRepository;
use brunel::agent::domain::AgentStatus;
use brunel::agent::services::{AgentOrchestrator, CreateAgentRequest};
use brunel::event::bus::{DispatchMode, EventBus};
use brunel::event::domain::EventKind;
use brunel::event::ports::EventHandler;
use brunel::task::adapters::memory::InMemoryTaskRepository;
use brunel::task::domain::TaskStatus;
use brunel::task::services::{CreateTaskRequest, TaskScheduler};
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::{Map, json};
use std::sync::Arc;
use test_helpers::RecordingHandler;

type Orchestrator =
    AgentOrchestrator<InMemoryAgentRepository, InMemoryTaskRepository, DefaultClock>;
type Scheduler = TaskScheduler<InMemoryAgentRepository, InMemoryTaskRepository, DefaultClock>;

struct World {
    orchestrator: Orchestrator,
    scheduler: Scheduler,
    bus: Arc<EventBus>,
}

fn world() -> World {
    let bus = Arc::new(EventBus::new());
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let orchestrator = AgentOrchestrator::new(
        Arc::new(InMemoryAgentRepository::new()),
        Arc::clone(&tasks),
        Arc::clone(&bus),
        Arc::new(DefaultClock),
    );
    let scheduler = TaskScheduler::new(tasks, Arc::clone(&bus), Arc::new(DefaultClock))
        .with_orchestrator(Arc::new(orchestrator.clone()));
    World {
        orchestrator,
        scheduler,
        bus,
    }
}

fn payload() -> Map<String, serde_json::Value> {
    let mut payload = Map::new();
    payload.insert("prompt".to_owned(), json!("summarise the report"));
    payload
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_backlog_is_drained_once_an_agent_becomes_available() {
    let world = world();
    let assignments = Arc::new(RecordingHandler::new());
    let _subscription = world.bus.subscribe(
        EventKind::TaskAssigned,
        Arc::clone(&assignments) as Arc<dyn EventHandler>,
        DispatchMode::Deferred,
    );

    // Tasks created before any agent exists stay pending.
    let first = world
        .scheduler
        .create_task(CreateTaskRequest::new("generation", payload()))
        .await
        .expect("task creation should succeed");
    let second = world
        .scheduler
        .create_task(CreateTaskRequest::new("custom", payload()).with_priority(3))
        .await
        .expect("task creation should succeed");
    assert_eq!(first.status(), TaskStatus::Created);
    assert_eq!(second.status(), TaskStatus::Created);

    let agent = world
        .orchestrator
        .create_agent(CreateAgentRequest::new("worker", "task_executor"))
        .await
        .expect("agent creation should succeed");
    world
        .orchestrator
        .update_agent_status(agent.id(), AgentStatus::Active, Some("booted"))
        .await
        .expect("activation should succeed");

    let scheduled = world
        .scheduler
        .schedule_all_pending()
        .await
        .expect("sweep should succeed");
    assert_eq!(scheduled, 2);

    let agent_tasks = world
        .orchestrator
        .agent_tasks(agent.id())
        .await
        .expect("listing should succeed");
    assert_eq!(agent_tasks.len(), 2);
    for task in &agent_tasks {
        assert_eq!(task.status(), TaskStatus::Assigned);
        assert_eq!(task.assigned_agent(), Some(agent.id()));
    }
    let pending = world
        .scheduler
        .pending_tasks()
        .await
        .expect("listing should succeed");
    assert!(pending.iter().all(|task| task.status() == TaskStatus::Assigned));

    world.bus.stop().await;
    let events = assignments.events();
    assert_eq!(events.len(), 2);
    for event in &events {
        assert_eq!(
            event.metadata().get("agent_id"),
            Some(&json!(agent.id().to_string())),
        );
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn creation_auto_schedules_against_a_live_agent() {
    let world = world();
    let observer = Arc::new(RecordingHandler::new());
    for kind in [EventKind::TaskCreated, EventKind::TaskAssigned] {
        let _subscription = world.bus.subscribe(
            kind,
            Arc::clone(&observer) as Arc<dyn EventHandler>,
            DispatchMode::Deferred,
        );
    }

    let agent = world
        .orchestrator
        .create_agent(CreateAgentRequest::new("worker", "task_executor"))
        .await
        .expect("agent creation should succeed");
    world
        .orchestrator
        .update_agent_status(agent.id(), AgentStatus::Idle, None)
        .await
        .expect("activation should succeed");

    let task = world
        .scheduler
        .create_task(CreateTaskRequest::new("generation", payload()))
        .await
        .expect("task creation should succeed");

    assert_eq!(task.status(), TaskStatus::Assigned);
    assert_eq!(task.assigned_agent(), Some(agent.id()));
    let stored = world
        .scheduler
        .task(task.id())
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(stored.status(), TaskStatus::Assigned);

    world.bus.stop().await;
    assert_eq!(
        observer.kinds(),
        vec![EventKind::TaskCreated, EventKind::TaskAssigned],
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_busy_agent_receives_no_work() {
    let world = world();

    let agent = world
        .orchestrator
        .create_agent(CreateAgentRequest::new("worker", "task_executor"))
        .await
        .expect("agent creation should succeed");
    world
        .orchestrator
        .update_agent_status(agent.id(), AgentStatus::Busy, None)
        .await
        .expect("status update should succeed");

    let task = world
        .scheduler
        .create_task(CreateTaskRequest::new("custom", payload()))
        .await
        .expect("task creation should succeed");

    assert_eq!(task.status(), TaskStatus::Created);
    assert_eq!(task.assigned_agent(), None);
}
