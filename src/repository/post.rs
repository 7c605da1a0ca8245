use anyhow::Context;
use sqlx::{Executor, PgPool, Postgres};
use tracing::Span;
use uuid::Uuid;

use crate::{authentication::UserId, domain::{Post, PostRecord}};

/// Whether a post with this id exists. Comment operations check this before touching the tree.
pub async fn post_exists<'e, E>(post_id: Uuid, executor: E) -> Result<bool, anyhow::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS(
            SELECT 1
            FROM posts
            WHERE id = $1
        )
        "#,
    )
    .bind(post_id)
    .fetch_one(executor)
    .await
    .context("Failed to check if post exists")
}

#[tracing::instrument(skip(pool))]
pub async fn get_post(id: Uuid, pool: &PgPool) -> Result<Option<PostRecord>, anyhow::Error> {
    sqlx::query_as::<_, PostRecord>(
        r#"
        SELECT id, title, post_text, created_by, created_at
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .context("Failed to fetch post")
}

#[tracing::instrument(
    skip_all,
    fields(user_id=%created_by, post_id=tracing::field::Empty)
)]
pub async fn insert_post(
    post: &Post,
    created_by: UserId,
    pool: &PgPool,
) -> Result<PostRecord, anyhow::Error> {
    let record = sqlx::query_as::<_, PostRecord>(
        r#"
        INSERT INTO posts (id, title, post_text, created_by)
        VALUES ($1, $2, $3, $4)
        RETURNING id, title, post_text, created_by, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(post.title.as_ref())
    .bind(post.text.as_ref())
    .bind(*created_by)
    .fetch_one(pool)
    .await
    .context("Failed to insert new post")?;

    Span::current().record("post_id", tracing::field::display(&record.id));
    Ok(record)
}
