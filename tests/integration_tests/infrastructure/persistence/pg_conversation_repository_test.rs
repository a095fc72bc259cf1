//! Runs against a throwaway PostgreSQL container; needs a Docker daemon.

use chat_history::application::ports::ConversationRepository;
use chat_history::domain::{ConversationId, MessageRole, NewMessage};

use crate::helpers::TestPostgres;

#[tokio::test]
async fn given_new_conversation_when_creating_and_retrieving_then_conversation_is_persisted() {
    let test_pg = TestPostgres::new().await;
    let repository = &test_pg.conversation_repository;

    let created = repository
        .create_conversation("Test Conversation")
        .await
        .expect("Failed to create conversation");

    let retrieved = repository
        .get_conversation(created.id)
        .await
        .expect("Failed to retrieve conversation")
        .expect("Conversation not found");

    assert_eq!(created.id, ConversationId::from(1));
    assert_eq!(retrieved, created);
}

#[tokio::test]
async fn given_conversation_when_appending_messages_then_messages_are_returned_in_order() {
    let test_pg = TestPostgres::new().await;
    let repository = &test_pg.conversation_repository;
    let conversation = repository.create_conversation("Chat").await.unwrap();

    repository
        .append_message(&NewMessage::new(
            conversation.id,
            MessageRole::User,
            "Hello".to_string(),
        ))
        .await
        .expect("Failed to append first message");
    repository
        .append_message(
            &NewMessage::new(conversation.id, MessageRole::Model, "Hi there!".to_string())
                .with_user_id(Some("alice".to_string())),
        )
        .await
        .expect("Failed to append second message");

    let messages = repository.get_messages(conversation.id).await.unwrap();

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, MessageRole::User);
    assert_eq!(messages[0].content, "Hello");
    assert_eq!(messages[1].role, MessageRole::Model);
    assert_eq!(messages[1].user_id.as_deref(), Some("alice"));
    assert!(messages[0].created_at <= messages[1].created_at);

    let for_user = repository.get_messages_for_user("alice").await.unwrap();
    assert_eq!(for_user.len(), 1);
    assert_eq!(for_user[0].content, "Hi there!");
}

#[tokio::test]
async fn given_conversations_when_listing_then_newest_first() {
    let test_pg = TestPostgres::new().await;
    let repository = &test_pg.conversation_repository;

    repository.create_conversation("First").await.unwrap();
    tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
    repository.create_conversation("Second").await.unwrap();

    let titles: Vec<String> = repository
        .list_conversations()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.title)
        .collect();

    assert_eq!(titles, vec!["Second", "First"]);
}

#[tokio::test]
async fn given_titles_with_wildcards_when_finding_similar_then_wildcards_match_literally() {
    let test_pg = TestPostgres::new().await;
    let repository = &test_pg.conversation_repository;

    for title in ["100% done", "100% done (2)", "1000 done", "demo_1", "demoX1"] {
        repository.create_conversation(title).await.unwrap();
    }

    let mut percent = repository.find_titles_like("100% DONE").await.unwrap();
    percent.sort();
    let underscore = repository.find_titles_like("demo_").await.unwrap();

    assert_eq!(percent, vec!["100% done", "100% done (2)"]);
    assert_eq!(underscore, vec!["demo_1"]);
}

#[tokio::test]
async fn given_existing_conversation_when_updating_title_then_new_title_is_returned() {
    let test_pg = TestPostgres::new().await;
    let repository = &test_pg.conversation_repository;
    let conversation = repository.create_conversation("Old").await.unwrap();

    let updated = repository
        .update_title(conversation.id, "New")
        .await
        .unwrap()
        .expect("Conversation not found");
    let missing = repository
        .update_title(ConversationId::from(999), "New")
        .await
        .unwrap();

    assert_eq!(updated.title, "New");
    assert_eq!(updated.created_at, conversation.created_at);
    assert!(missing.is_none());
}

#[tokio::test]
async fn given_conversation_with_messages_when_deleting_then_both_are_removed() {
    let test_pg = TestPostgres::new().await;
    let repository = &test_pg.conversation_repository;
    let conversation = repository.create_conversation("Doomed").await.unwrap();
    for content in ["a", "b"] {
        repository
            .append_message(&NewMessage::new(
                conversation.id,
                MessageRole::User,
                content.to_string(),
            ))
            .await
            .unwrap();
    }

    let removed = repository.delete_messages(conversation.id).await.unwrap();
    let deleted = repository.delete_conversation(conversation.id).await.unwrap();
    let deleted_again = repository.delete_conversation(conversation.id).await.unwrap();

    assert_eq!(removed, 2);
    assert!(deleted);
    assert!(!deleted_again);
    assert!(
        repository
            .get_conversation(conversation.id)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        repository
            .get_messages(conversation.id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn given_pool_when_querying_chats_table_then_schema_is_migrated() {
    let test_pg = TestPostgres::new().await;

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chat_history")
        .fetch_one(&test_pg.pool)
        .await
        .unwrap();

    assert_eq!(count, 0);
}
