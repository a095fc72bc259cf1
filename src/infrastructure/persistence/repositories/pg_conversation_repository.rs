use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use crate::application::ports::{ConversationRepository, RepositoryError};
use crate::domain::{Conversation, ConversationId, Message, MessageId, MessageRole, NewMessage};

pub struct PgConversationRepository {
    pool: PgPool,
}

impl PgConversationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ChatRow {
    id: i64,
    title: String,
    created_at: DateTime<Utc>,
}

impl From<ChatRow> for Conversation {
    fn from(row: ChatRow) -> Self {
        Conversation {
            id: ConversationId::from_i64(row.id),
            title: row.title,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct MessageRow {
    id: i64,
    chat_id: i64,
    user_id: Option<String>,
    role: String,
    content: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<MessageRow> for Message {
    type Error = RepositoryError;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        let role = row
            .role
            .parse::<MessageRole>()
            .map_err(RepositoryError::CorruptRow)?;

        Ok(Message {
            id: MessageId::from_i64(row.id),
            conversation_id: ConversationId::from_i64(row.chat_id),
            user_id: row.user_id,
            role,
            content: row.content,
            created_at: row.created_at,
        })
    }
}

fn map_sqlx_error(e: sqlx::Error) -> RepositoryError {
    match &e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::ConnectionFailed(e.to_string())
        }
        sqlx::Error::Database(db) if db.constraint().is_some() => {
            RepositoryError::ConstraintViolation(db.message().to_string())
        }
        _ => RepositoryError::QueryFailed(e.to_string()),
    }
}

/// Escapes `LIKE` wildcards so `base` is matched literally.
fn escape_like(base: &str) -> String {
    let mut escaped = String::with_capacity(base.len());
    for c in base.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn collect_messages(rows: Vec<MessageRow>) -> Result<Vec<Message>, RepositoryError> {
    rows.into_iter().map(Message::try_from).collect()
}

#[async_trait]
impl ConversationRepository for PgConversationRepository {
    #[instrument(skip(self))]
    async fn create_conversation(&self, title: &str) -> Result<Conversation, RepositoryError> {
        let row = sqlx::query_as::<_, ChatRow>(
            r#"
            INSERT INTO chats (title)
            VALUES ($1)
            RETURNING id, title, created_at
            "#,
        )
        .bind(title)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    #[instrument(skip(self), fields(conversation_id = %id))]
    async fn get_conversation(
        &self,
        id: ConversationId,
    ) -> Result<Option<Conversation>, RepositoryError> {
        let row = sqlx::query_as::<_, ChatRow>(
            r#"
            SELECT id, title, created_at
            FROM chats
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Conversation::from))
    }

    #[instrument(skip(self))]
    async fn list_conversations(&self) -> Result<Vec<Conversation>, RepositoryError> {
        let rows = sqlx::query_as::<_, ChatRow>(
            r#"
            SELECT id, title, created_at
            FROM chats
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Conversation::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_titles_like(&self, base: &str) -> Result<Vec<String>, RepositoryError> {
        let pattern = format!("{}%", escape_like(base));

        sqlx::query_scalar::<_, String>(
            r#"
            SELECT title
            FROM chats
            WHERE title ILIKE $1 ESCAPE '\'
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    #[instrument(skip(self), fields(conversation_id = %id))]
    async fn update_title(
        &self,
        id: ConversationId,
        title: &str,
    ) -> Result<Option<Conversation>, RepositoryError> {
        let row = sqlx::query_as::<_, ChatRow>(
            r#"
            UPDATE chats
            SET title = $1
            WHERE id = $2
            RETURNING id, title, created_at
            "#,
        )
        .bind(title)
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Conversation::from))
    }

    #[instrument(skip(self), fields(conversation_id = %id))]
    async fn delete_conversation(&self, id: ConversationId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r#"
            DELETE FROM chats
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self, message), fields(conversation_id = %message.conversation_id, role = %message.role))]
    async fn append_message(&self, message: &NewMessage) -> Result<Message, RepositoryError> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            INSERT INTO chat_history (chat_id, user_id, role, content)
            VALUES ($1, $2, $3, $4)
            RETURNING id, chat_id, user_id, role, content, created_at
            "#,
        )
        .bind(message.conversation_id.as_i64())
        .bind(message.user_id.as_deref())
        .bind(message.role.as_str())
        .bind(&message.content)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Message::try_from(row)
    }

    #[instrument(skip(self))]
    async fn get_messages(
        &self,
        conversation_id: ConversationId,
    ) -> Result<Vec<Message>, RepositoryError> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, chat_id, user_id, role, content, created_at
            FROM chat_history
            WHERE chat_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(conversation_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        collect_messages(rows)
    }

    #[instrument(skip(self))]
    async fn get_messages_for_user(&self, user_id: &str) -> Result<Vec<Message>, RepositoryError> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, chat_id, user_id, role, content, created_at
            FROM chat_history
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        collect_messages(rows)
    }

    #[instrument(skip(self))]
    async fn delete_messages(
        &self,
        conversation_id: ConversationId,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r#"
            DELETE FROM chat_history
            WHERE chat_id = $1
            "#,
        )
        .bind(conversation_id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }
}
