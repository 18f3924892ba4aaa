use sqlx::{postgres::PgQueryResult, PgPool};
use uuid::Uuid;

use crate::domain::{Message, NewMessage, Role};

pub async fn insert_messages(
    pool: &PgPool,
    conversation_id: Uuid,
    messages: &[NewMessage],
) -> Result<PgQueryResult, sqlx::Error> {
    let total_rows = messages.len();
    let ids: Vec<Uuid> = (0..total_rows).map(|_| Uuid::new_v4()).collect();
    let conversation_ids: Vec<Uuid> = (0..total_rows).map(|_| conversation_id).collect();
    let roles: Vec<Role> = messages.iter().map(|m| m.role).collect();
    let contents: Vec<String> = messages.iter().map(|m| m.content.clone()).collect();

    // Row order is kept through clock_timestamp() so replies sort after prompts.
    sqlx::query(
        r#"
        insert into messages
            (id, conversation_id, role, content, created_at)
        select
            id, conversation_id, role, content, clock_timestamp()
        from unnest (
            $1::uuid[],
            $2::uuid[],
            $3::message_role[],
            $4::text[]
        ) as t(id, conversation_id, role, content)
        "#,
    )
    .bind(&ids)
    .bind(&conversation_ids)
    .bind(&roles)
    .bind(&contents)
    .execute(pool)
    .await
}

pub async fn get_messages(
    pool: &PgPool,
    conversation_id: Uuid,
) -> Result<Vec<Message>, sqlx::Error> {
    sqlx::query_as::<_, Message>(
        r"
        select
            id,
            conversation_id,
            role,
            content,
            created_at
        from
            messages
        where
            conversation_id = $1
        order by created_at asc
        ",
    )
    .bind(conversation_id)
    .fetch_all(pool)
    .await
}
