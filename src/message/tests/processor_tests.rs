//! Unit tests for message processing.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use crate::event::bus::{DispatchMode, EventBus};
use crate::event::domain::EventKind;
use crate::event::ports::EventHandler;
use crate::message::adapters::memory::InMemoryMessageRepository;
use crate::message::domain::{Conversation, Role};
use crate::message::ports::generation::MockGenerationClient;
use crate::message::ports::{Completion, GenerationError, MessageRepository};
use crate::message::services::{
    GenerationService, MessageProcessor, ProcessMessageRequest, ProcessorError,
};
use crate::test_support::RecordingHandler;
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::{Map, json};
use std::sync::Arc;

type TestRepository = InMemoryMessageRepository<DefaultClock>;
type TestProcessor = MessageProcessor<TestRepository, DefaultClock>;

struct Harness {
    processor: TestProcessor,
    repository: Arc<TestRepository>,
    bus: Arc<EventBus>,
}

fn harness(client: Option<MockGenerationClient>) -> Harness {
    let bus = Arc::new(EventBus::new());
    let clock = Arc::new(DefaultClock);
    let repository = Arc::new(InMemoryMessageRepository::new(Arc::clone(&clock)));
    let mut processor = MessageProcessor::new(
        Arc::clone(&repository),
        Arc::clone(&bus),
        Arc::clone(&clock),
    );
    if let Some(client) = client {
        let generation =
            GenerationService::new(Arc::new(client), Arc::clone(&bus), Arc::clone(&clock));
        processor = processor.with_generation(Arc::new(generation));
    }
    Harness {
        processor,
        repository,
        bus,
    }
}

fn replying_client(reply: &'static str) -> MockGenerationClient {
    let mut client = MockGenerationClient::new();
    client.expect_generate().returning(move |_, _| {
        Ok(Completion::new(reply)
            .with_model("oracle-1")
            .with_tokens_used(12))
    });
    client
}

fn subscribe(harness: &Harness, kind: EventKind) -> Arc<RecordingHandler> {
    let handler = Arc::new(RecordingHandler::new());
    let _subscription = harness.bus.subscribe(
        kind,
        Arc::clone(&handler) as Arc<dyn EventHandler>,
        DispatchMode::Immediate,
    );
    handler
}

async fn stored_conversation(harness: &Harness) -> Conversation {
    let conversations = harness
        .processor
        .conversations(0, 10)
        .await
        .expect("listing should succeed");
    assert_eq!(conversations.len(), 1);
    conversations.into_iter().next().expect("one conversation")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_content_is_rejected_before_any_conversation_exists() {
    let harness = harness(None);

    let result = harness
        .processor
        .process_message(ProcessMessageRequest::new("   ", "user"))
        .await;

    assert!(matches!(result, Err(ProcessorError::Domain(_))));
    let conversations = harness
        .processor
        .conversations(0, 10)
        .await
        .expect("listing should succeed");
    assert!(conversations.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_role_is_rejected() {
    let harness = harness(None);

    let result = harness
        .processor
        .process_message(ProcessMessageRequest::new("hello", "narrator"))
        .await;

    assert!(matches!(result, Err(ProcessorError::UnknownRole(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn user_message_is_recorded_without_generation() {
    let harness = harness(None);
    let received = subscribe(&harness, EventKind::MessageReceived);
    let processed = subscribe(&harness, EventKind::MessageProcessed);

    let mut metadata = Map::new();
    metadata.insert("topic".to_owned(), json!("weather"));
    let message = harness
        .processor
        .process_message(ProcessMessageRequest::new("hello", "user").with_metadata(metadata.clone()))
        .await
        .expect("processing should succeed");

    assert_eq!(message.role(), Role::User);
    let conversation = stored_conversation(&harness).await;
    assert_eq!(message.conversation_id(), conversation.id());
    // The request metadata seeds the new conversation's context.
    assert_eq!(conversation.context(), &metadata);
    assert_eq!(conversation.messages().len(), 1);

    assert_eq!(received.len(), 1);
    let event = received.events().pop().expect("one event");
    assert_eq!(event.aggregate_id(), message.id().to_string());
    assert_eq!(event.metadata().get("role"), Some(&json!("user")));
    assert_eq!(event.metadata().get("content"), Some(&json!("hello")));
    assert_eq!(processed.len(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn existing_conversation_is_reused() {
    let harness = harness(None);
    let first = harness
        .processor
        .process_message(ProcessMessageRequest::new("hello", "user"))
        .await
        .expect("processing should succeed");

    let second = harness
        .processor
        .process_message(
            ProcessMessageRequest::new("still here", "user")
                .with_conversation(first.conversation_id()),
        )
        .await
        .expect("processing should succeed");

    assert_eq!(second.conversation_id(), first.conversation_id());
    let conversation = stored_conversation(&harness).await;
    assert_eq!(conversation.messages().len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_conversation_id_creates_a_fresh_conversation() {
    let harness = harness(None);

    let message = harness
        .processor
        .process_message(
            ProcessMessageRequest::new("hello", "user")
                .with_conversation(crate::message::domain::ConversationId::new()),
        )
        .await
        .expect("processing should succeed");

    let conversation = stored_conversation(&harness).await;
    assert_eq!(message.conversation_id(), conversation.id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn user_message_with_generation_records_a_reply() {
    let harness = harness(Some(replying_client("a fine reply")));
    let processed = subscribe(&harness, EventKind::MessageProcessed);

    let message = harness
        .processor
        .process_message(ProcessMessageRequest::new("hello", "user"))
        .await
        .expect("processing should succeed");

    let conversation = stored_conversation(&harness).await;
    assert_eq!(conversation.messages().len(), 2);
    let reply = conversation.last_message().expect("reply recorded");
    assert_eq!(reply.role(), Role::Assistant);
    assert_eq!(reply.content(), "a fine reply");
    assert_eq!(reply.metadata().get("model"), Some(&json!("oracle-1")));
    assert_eq!(reply.metadata().get("tokens_used"), Some(&json!(12)));

    let stored_reply = harness
        .repository
        .find_message(reply.id())
        .await
        .expect("lookup should succeed");
    assert!(stored_reply.is_some());

    assert_eq!(processed.len(), 1);
    let event = processed.events().pop().expect("one event");
    assert_eq!(event.aggregate_id(), message.id().to_string());
    assert_eq!(event.metadata().get("response"), Some(&json!("a fine reply")));
}

#[rstest]
#[case("assistant")]
#[case("system")]
#[tokio::test(flavor = "multi_thread")]
async fn non_user_messages_never_trigger_generation(#[case] role: &str) {
    // No expectation is set on the mock, so any generate call would panic.
    let harness = harness(Some(MockGenerationClient::new()));

    let message = harness
        .processor
        .process_message(ProcessMessageRequest::new("noted", role))
        .await
        .expect("processing should succeed");

    assert_eq!(message.content(), "noted");
    let conversation = stored_conversation(&harness).await;
    assert_eq!(conversation.messages().len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn generation_failure_propagates_after_recording_the_inbound() {
    let mut client = MockGenerationClient::new();
    client
        .expect_generate()
        .returning(|_, _| Err(GenerationError::message("provider timeout")));
    let harness = harness(Some(client));
    let received = subscribe(&harness, EventKind::MessageReceived);

    let result = harness
        .processor
        .process_message(ProcessMessageRequest::new("hello", "user"))
        .await;

    assert!(matches!(result, Err(ProcessorError::Generation(_))));
    // The inbound user message survives the failed reply.
    assert_eq!(received.len(), 1);
    let conversation = stored_conversation(&harness).await;
    assert_eq!(conversation.messages().len(), 1);
    let inbound = conversation.last_message().expect("inbound recorded");
    assert_eq!(inbound.role(), Role::User);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn conversation_messages_pages_in_order() {
    let harness = harness(None);
    let first = harness
        .processor
        .process_message(ProcessMessageRequest::new("one", "user"))
        .await
        .expect("processing should succeed");
    for content in ["two", "three"] {
        harness
            .processor
            .process_message(
                ProcessMessageRequest::new(content, "user")
                    .with_conversation(first.conversation_id()),
            )
            .await
            .expect("processing should succeed");
    }

    let page = harness
        .processor
        .conversation_messages(first.conversation_id(), 1, 1)
        .await
        .expect("listing should succeed");
    let contents: Vec<&str> = page.iter().map(|message| message.content()).collect();
    assert_eq!(contents, vec!["two"]);

    let unknown = harness
        .processor
        .conversation_messages(crate::message::domain::ConversationId::new(), 0, 10)
        .await
        .expect("listing should succeed");
    assert!(unknown.is_empty());
}
