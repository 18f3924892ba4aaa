use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{Conversation, Message, NewMessage, Profile};

use super::{conversation_db, message_db, profile_db};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store failure: {0}")]
    Database(#[from] sqlx::Error),
}

/// Profile, conversation and message records for signed-in users.
#[async_trait]
pub trait ChatStore: Send + Sync {
    async fn profile(&self, user_id: Uuid) -> Result<Option<Profile>, StoreError>;
    async fn insert_profile(&self, user_id: Uuid) -> Result<Profile, StoreError>;
    async fn update_location(&self, user_id: Uuid, location: &str) -> Result<(), StoreError>;
    async fn create_conversation(
        &self,
        user_id: Uuid,
        title: &str,
    ) -> Result<Conversation, StoreError>;
    async fn conversation(&self, conversation_id: Uuid)
        -> Result<Option<Conversation>, StoreError>;
    /// Newest first.
    async fn conversations(&self, user_id: Uuid) -> Result<Vec<Conversation>, StoreError>;
    async fn insert_messages(
        &self,
        conversation_id: Uuid,
        messages: &[NewMessage],
    ) -> Result<(), StoreError>;
    /// Oldest first.
    async fn messages(&self, conversation_id: Uuid) -> Result<Vec<Message>, StoreError>;
}

pub struct PgChatStore {
    pool: PgPool,
}

impl PgChatStore {
    pub fn new(pool: PgPool) -> Self {
        PgChatStore { pool }
    }
}

#[async_trait]
impl ChatStore for PgChatStore {
    async fn profile(&self, user_id: Uuid) -> Result<Option<Profile>, StoreError> {
        Ok(profile_db::get_profile(&self.pool, user_id).await?)
    }

    async fn insert_profile(&self, user_id: Uuid) -> Result<Profile, StoreError> {
        Ok(profile_db::insert_profile(&self.pool, user_id).await?)
    }

    async fn update_location(&self, user_id: Uuid, location: &str) -> Result<(), StoreError> {
        profile_db::update_location(&self.pool, user_id, location).await?;
        Ok(())
    }

    async fn create_conversation(
        &self,
        user_id: Uuid,
        title: &str,
    ) -> Result<Conversation, StoreError> {
        Ok(conversation_db::insert_conversation(&self.pool, user_id, title).await?)
    }

    async fn conversation(
        &self,
        conversation_id: Uuid,
    ) -> Result<Option<Conversation>, StoreError> {
        Ok(conversation_db::get_conversation(&self.pool, conversation_id).await?)
    }

    async fn conversations(&self, user_id: Uuid) -> Result<Vec<Conversation>, StoreError> {
        Ok(conversation_db::get_conversations_for_user(&self.pool, user_id).await?)
    }

    async fn insert_messages(
        &self,
        conversation_id: Uuid,
        messages: &[NewMessage],
    ) -> Result<(), StoreError> {
        if messages.is_empty() {
            return Ok(());
        }
        message_db::insert_messages(&self.pool, conversation_id, messages).await?;
        Ok(())
    }

    async fn messages(&self, conversation_id: Uuid) -> Result<Vec<Message>, StoreError> {
        Ok(message_db::get_messages(&self.pool, conversation_id).await?)
    }
}
