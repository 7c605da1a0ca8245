mod authoring;
mod retrieval;

use anyhow::Context;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

pub use authoring::*;
pub use retrieval::*;

/// Post a comment belongs to, or `None` when the comment does not exist.
async fn find_comment_post_id<'e, E>(
    comment_id: i64,
    executor: E,
) -> Result<Option<Uuid>, anyhow::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT post_id
        FROM comments
        WHERE id = $1
        "#,
    )
    .bind(comment_id)
    .fetch_optional(executor)
    .await
    .context("Failed to look up comment")
}
