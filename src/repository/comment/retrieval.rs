use anyhow::Context;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::{
    domain::{
        CommentRecord, CommentSort, DisplayComment, PREVIEW_SIZE, Pagination, ReplyCount,
        shape_comments,
    },
    repository::{self, PgTransaction},
    routes::CommentError,
};

/// Top-level comments of a post, each with its newest replies and reply count.
#[tracing::instrument(skip(pool))]
pub async fn list_top_level_comments(
    post_id: Uuid,
    sort: &CommentSort,
    pool: &PgPool,
) -> Result<Vec<DisplayComment>, CommentError> {
    let mut transaction = begin_snapshot(pool).await?;

    if !repository::post_exists(post_id, &mut *transaction).await? {
        return Err(CommentError::PostNotFound);
    }

    let query = format!(
        r#"
        SELECT c.id, c.text, c.post_id, c.author_id, c.parent_comment_id, c.created_at
        FROM comments c
        WHERE c.post_id = $1 AND c.parent_comment_id IS NULL
        ORDER BY {}, c.id ASC
        "#,
        sort.to_sql()
    );

    let roots = sqlx::query_as::<_, CommentRecord>(&query)
        .bind(post_id)
        .fetch_all(&mut *transaction)
        .await
        .context("Failed to load top-level comments")?;

    let comments = with_reply_previews(roots, &mut transaction).await?;

    transaction
        .commit()
        .await
        .context("Failed to close read snapshot")?;

    Ok(comments)
}

/// One page of a comment's direct replies plus the total number of direct replies.
///
/// Count and page are read from the same snapshot, so `total` always agrees
/// with the page boundaries.
#[tracing::instrument(
    skip(pool, pagination),
    fields(page = pagination.page.value(), page_size = pagination.page_size.value())
)]
pub async fn expand_comment_replies(
    post_id: Uuid,
    comment_id: i64,
    pagination: &Pagination,
    pool: &PgPool,
) -> Result<(Vec<DisplayComment>, i64), CommentError> {
    let mut transaction = begin_snapshot(pool).await?;

    if !repository::post_exists(post_id, &mut *transaction).await? {
        return Err(CommentError::PostNotFound);
    }

    match super::find_comment_post_id(comment_id, &mut *transaction).await? {
        Some(owner) if owner == post_id => {}
        _ => return Err(CommentError::CommentNotFound),
    }

    let total = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM comments
        WHERE post_id = $1 AND parent_comment_id = $2
        "#,
    )
    .bind(post_id)
    .bind(comment_id)
    .fetch_one(&mut *transaction)
    .await
    .context("Failed to count replies")?;

    let children = sqlx::query_as::<_, CommentRecord>(
        r#"
        SELECT id, text, post_id, author_id, parent_comment_id, created_at
        FROM comments
        WHERE post_id = $1 AND parent_comment_id = $2
        ORDER BY created_at DESC, id DESC
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(post_id)
    .bind(comment_id)
    .bind(pagination.limit())
    .bind(pagination.offset())
    .fetch_all(&mut *transaction)
    .await
    .context("Failed to load a page of replies")?;

    let comments = with_reply_previews(children, &mut transaction).await?;

    transaction
        .commit()
        .await
        .context("Failed to close read snapshot")?;

    Ok((comments, total))
}

/// Read-only transaction whose statements all see one snapshot.
async fn begin_snapshot(pool: &PgPool) -> Result<PgTransaction, anyhow::Error> {
    let mut transaction = pool
        .begin()
        .await
        .context("Failed to acquire a Postgres connection from the pool")?;

    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
        .execute(&mut *transaction)
        .await
        .context("Failed to open a read snapshot")?;

    Ok(transaction)
}

#[tracing::instrument(skip_all, fields(parents = parents.len()))]
async fn with_reply_previews(
    parents: Vec<CommentRecord>,
    connection: &mut PgConnection,
) -> Result<Vec<DisplayComment>, anyhow::Error> {
    if parents.is_empty() {
        return Ok(Vec::new());
    }

    let parent_ids: Vec<i64> = parents.iter().map(|c| c.id).collect();

    let previews = sqlx::query_as::<_, CommentRecord>(
        r#"
        SELECT id, text, post_id, author_id, parent_comment_id, created_at
        FROM (
            SELECT c.*,
                   ROW_NUMBER() OVER (
                       PARTITION BY c.parent_comment_id
                       ORDER BY c.created_at DESC, c.id DESC
                   ) AS preview_rank
            FROM comments c
            WHERE c.parent_comment_id = ANY($1)
        ) ranked
        WHERE preview_rank <= $2
        "#,
    )
    .bind(parent_ids.as_slice())
    .bind(PREVIEW_SIZE as i64)
    .fetch_all(&mut *connection)
    .await
    .context("Failed to load reply previews")?;

    let reply_counts = sqlx::query_as::<_, ReplyCount>(
        r#"
        SELECT parent_comment_id, COUNT(*) AS reply_count
        FROM comments
        WHERE parent_comment_id = ANY($1)
        GROUP BY parent_comment_id
        "#,
    )
    .bind(parent_ids.as_slice())
    .fetch_all(&mut *connection)
    .await
    .context("Failed to count replies")?;

    Ok(shape_comments(parents, previews, reply_counts))
}
