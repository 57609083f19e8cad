//! Chat turn behavior: history growth, bounded windows, sanitization, and
//! concurrency.

mod test_utils;

use fabula_core::{ChatMessage, ChatMode, ConversationLog, Role};
use fabula_engine::PartialEngineConfig;
use fabula_error::{ConversationErrorKind, FabulaErrorKind, StudioErrorKind};
use fabula_interface::RecordStore;
use fabula_studio::{ConversationStore, MAX_HISTORY_MESSAGES};
use std::sync::Arc;
use test_utils::{MockTextDriver, TestHarnessBuilder, sample_canon_json, script_of_words};

async fn ingested_harness(replies: Vec<&str>) -> (test_utils::TestHarness, String) {
    let mut all = vec![];
    let canon_json = sample_canon_json();
    all.push(canon_json.as_str());
    all.extend(replies);

    let (harness, _) = TestHarnessBuilder::new()
        .text(MockTextDriver::with_replies(all))
        .build();

    let outcome = harness
        .studio
        .ingest(
            "Tide Road",
            "tide.txt",
            &script_of_words(500),
            PartialEngineConfig::default(),
        )
        .await
        .unwrap();

    (harness, outcome.project_id)
}

#[tokio::test]
async fn first_turn_yields_history_of_two() {
    let (harness, project_id) = ingested_harness(vec!["She is Ash Calder."]).await;

    let outcome = harness
        .studio
        .chat(
            &project_id,
            ChatMode::Canon,
            vec![ChatMessage::user("Who is the protagonist?")],
        )
        .await
        .unwrap();

    assert_eq!(outcome.reply, "She is Ash Calder.");
    assert_eq!(outcome.history.len(), 2);
    assert_eq!(outcome.history[0].role, Role::User);
    assert_eq!(outcome.history[1].role, Role::Assistant);
}

#[tokio::test]
async fn second_turn_yields_history_of_four() {
    let (harness, project_id) = ingested_harness(vec!["First.", "Second."]).await;

    harness
        .studio
        .chat(&project_id, ChatMode::Canon, vec![ChatMessage::user("One?")])
        .await
        .unwrap();
    let outcome = harness
        .studio
        .chat(&project_id, ChatMode::Canon, vec![ChatMessage::user("Two?")])
        .await
        .unwrap();

    assert_eq!(outcome.history.len(), 4);
    assert_eq!(outcome.history[3].content, "Second.");

    let listed = harness
        .studio
        .list_history(&project_id, ChatMode::Canon)
        .await
        .unwrap();
    assert_eq!(listed.len(), 4);
}

#[tokio::test]
async fn modes_keep_independent_histories() {
    let (harness, project_id) = ingested_harness(vec!["canon says", "copilot says"]).await;

    harness
        .studio
        .chat(&project_id, ChatMode::Canon, vec![ChatMessage::user("a")])
        .await
        .unwrap();
    harness
        .studio
        .chat(&project_id, ChatMode::Copilot, vec![ChatMessage::user("b")])
        .await
        .unwrap();

    let canon = harness
        .studio
        .list_history(&project_id, ChatMode::Canon)
        .await
        .unwrap();
    let copilot = harness
        .studio
        .list_history(&project_id, ChatMode::Copilot)
        .await
        .unwrap();
    assert_eq!(canon.len(), 2);
    assert_eq!(copilot.len(), 2);
    assert_eq!(canon[1].content, "canon says");
    assert_eq!(copilot[1].content, "copilot says");
}

#[tokio::test]
async fn outbound_window_is_bounded_but_persistence_is_not() {
    let (harness, project_id) = ingested_harness(vec!["windowed reply"]).await;

    // Preload a 50-message log through the conversation store.
    let conversations =
        ConversationStore::new(Arc::clone(&harness.records) as Arc<dyn RecordStore>);
    let empty = conversations
        .load(&project_id, ChatMode::Copilot)
        .await
        .unwrap();
    let preload: Vec<ChatMessage> = (0..50)
        .map(|i| ChatMessage::user(format!("m{i}")))
        .collect();
    conversations
        .commit(&project_id, ChatMode::Copilot, &empty, preload)
        .await
        .unwrap();

    let outcome = harness
        .studio
        .chat(
            &project_id,
            ChatMode::Copilot,
            vec![ChatMessage::user("latest question")],
        )
        .await
        .unwrap();

    // Call 0 was canon extraction during ingest; call 1 is this turn.
    let outbound = harness.text.call(1);
    // canon system message + soft-context system message + 40 history + 1 new
    assert_eq!(outbound.len(), 2 + MAX_HISTORY_MESSAGES + 1);
    let history_segment: Vec<&ChatMessage> = outbound
        .iter()
        .filter(|m| m.role == Role::User && m.content.starts_with('m'))
        .collect();
    assert_eq!(history_segment.len(), MAX_HISTORY_MESSAGES);
    assert_eq!(history_segment[0].content, "m10");
    assert_eq!(history_segment[39].content, "m49");

    // Full log persisted: 50 + 1 user + 1 assistant.
    assert_eq!(outcome.history.len(), 52);
    assert_eq!(outcome.history[51].content, "windowed reply");
}

#[tokio::test]
async fn adapter_failure_leaves_log_untouched() {
    let (harness, _) = TestHarnessBuilder::new()
        .text(MockTextDriver::failing())
        .build();

    let canon =
        fabula_studio::extract_canon_json(&sample_canon_json()).unwrap();
    harness.studio.save_canon("p1", &canon).await.unwrap();
    harness
        .studio
        .save_engines("p1", PartialEngineConfig::default())
        .await
        .unwrap();

    let err = harness
        .studio
        .chat("p1", ChatMode::Canon, vec![ChatMessage::user("hi")])
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), FabulaErrorKind::Models(_)));

    let history = harness
        .studio
        .list_history("p1", ChatMode::Canon)
        .await
        .unwrap();
    assert!(history.is_empty());
}

#[tokio::test]
async fn missing_engine_config_is_a_typed_error() {
    let (harness, _) = TestHarnessBuilder::new().build();

    let err = harness
        .studio
        .chat("ghost", ChatMode::Canon, vec![ChatMessage::user("hi")])
        .await
        .unwrap_err();
    assert!(matches!(
        err.kind(),
        FabulaErrorKind::Studio(e) if matches!(e.kind, StudioErrorKind::EngineConfigNotFound(_))
    ));
}

#[tokio::test]
async fn empty_turn_is_rejected() {
    let (harness, project_id) = ingested_harness(vec![]).await;

    let err = harness
        .studio
        .chat(&project_id, ChatMode::Canon, vec![])
        .await
        .unwrap_err();
    assert!(matches!(
        err.kind(),
        FabulaErrorKind::Studio(e) if matches!(e.kind, StudioErrorKind::EmptyTurn)
    ));
}

#[tokio::test]
async fn concurrent_commit_is_detected() {
    let (harness, project_id) = ingested_harness(vec![]).await;
    let conversations =
        ConversationStore::new(Arc::clone(&harness.records) as Arc<dyn RecordStore>);

    let loaded = conversations
        .load(&project_id, ChatMode::Canon)
        .await
        .unwrap();
    assert_eq!(loaded, ConversationLog::default());

    // A concurrent turn commits first.
    conversations
        .commit(
            &project_id,
            ChatMode::Canon,
            &loaded,
            vec![ChatMessage::user("racer")],
        )
        .await
        .unwrap();

    // Committing against the stale load must fail, not overwrite.
    let err = conversations
        .commit(
            &project_id,
            ChatMode::Canon,
            &loaded,
            vec![ChatMessage::user("loser")],
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err.kind(),
        FabulaErrorKind::Conversation(e)
            if matches!(e.kind, ConversationErrorKind::ConcurrentTurn { .. })
    ));

    let log = conversations
        .load(&project_id, ChatMode::Canon)
        .await
        .unwrap();
    assert_eq!(log.version, 1);
    assert_eq!(log.messages.len(), 1);
    assert_eq!(log.messages[0].content, "racer");
}

#[tokio::test]
async fn version_increments_per_turn() {
    let (harness, project_id) = ingested_harness(vec!["one", "two"]).await;
    let conversations =
        ConversationStore::new(Arc::clone(&harness.records) as Arc<dyn RecordStore>);

    harness
        .studio
        .chat(&project_id, ChatMode::Canon, vec![ChatMessage::user("1")])
        .await
        .unwrap();
    let after_first = conversations
        .load(&project_id, ChatMode::Canon)
        .await
        .unwrap();
    assert_eq!(after_first.version, 1);

    harness
        .studio
        .chat(&project_id, ChatMode::Canon, vec![ChatMessage::user("2")])
        .await
        .unwrap();
    let after_second = conversations
        .load(&project_id, ChatMode::Canon)
        .await
        .unwrap();
    assert_eq!(after_second.version, 2);
}
