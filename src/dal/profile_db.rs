use sqlx::{postgres::PgQueryResult, PgPool};
use uuid::Uuid;

use crate::domain::Profile;

pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<Option<Profile>, sqlx::Error> {
    sqlx::query_as::<_, Profile>(
        r"
        select
            id,
            location
        from
            profiles
        where
            id = $1
        ",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn insert_profile(pool: &PgPool, user_id: Uuid) -> Result<Profile, sqlx::Error> {
    sqlx::query_as::<_, Profile>(
        r"
        insert into profiles
            (id)
        values
            ($1)
        on conflict(id) do update set
            id = excluded.id
        returning id, location
        ",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}

pub async fn update_location(
    pool: &PgPool,
    user_id: Uuid,
    location: &str,
) -> Result<PgQueryResult, sqlx::Error> {
    sqlx::query(
        r"
        insert into profiles
            (id, location)
        values
            ($1, $2)
        on conflict(id) do update set
            location = $2
        ",
    )
    .bind(user_id)
    .bind(location)
    .execute(pool)
    .await
}
