use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::Conversation;

pub async fn insert_conversation(
    pool: &PgPool,
    user_id: Uuid,
    title: &str,
) -> Result<Conversation, sqlx::Error> {
    sqlx::query_as::<_, Conversation>(
        r"
        insert into conversations
            (id, user_id, title)
        values
            ($1, $2, $3)
        returning id, user_id, title, created_at
        ",
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(title)
    .fetch_one(pool)
    .await
}

pub async fn get_conversation(
    pool: &PgPool,
    conversation_id: Uuid,
) -> Result<Option<Conversation>, sqlx::Error> {
    sqlx::query_as::<_, Conversation>(
        r"
        select
            id,
            user_id,
            title,
            created_at
        from
            conversations
        where
            id = $1
        ",
    )
    .bind(conversation_id)
    .fetch_optional(pool)
    .await
}

pub async fn get_conversations_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<Conversation>, sqlx::Error> {
    sqlx::query_as::<_, Conversation>(
        r"
        select
            id,
            user_id,
            title,
            created_at
        from
            conversations
        where
            user_id = $1
        order by created_at desc
        ",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
