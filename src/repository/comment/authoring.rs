use anyhow::Context;
use sqlx::{Executor, PgPool, Postgres};
use tracing::Span;

use crate::{
    authentication::UserId,
    domain::{CommentRecord, NewComment},
    repository,
    routes::CommentError,
};

#[tracing::instrument(
    skip_all,
    fields(post_id=%comment.post_id, user_id=%author_id, comment_id=tracing::field::Empty)
)]
pub async fn insert_root_comment(
    comment: &NewComment,
    author_id: UserId,
    pool: &PgPool,
) -> Result<CommentRecord, CommentError> {
    if !repository::post_exists(comment.post_id, pool).await? {
        return Err(CommentError::PostNotFound);
    }

    // A post removed after the check surfaces as a foreign key violation
    let record = insert_comment_row(comment, author_id, None, pool).await?;

    Span::current().record("comment_id", record.id);
    Ok(record)
}

#[tracing::instrument(
    skip_all,
    fields(
        post_id=%reply.post_id,
        parent_comment_id=%parent_comment_id,
        user_id=%author_id,
        comment_id=tracing::field::Empty
    )
)]
pub async fn insert_reply(
    parent_comment_id: i64,
    reply: &NewComment,
    author_id: UserId,
    pool: &PgPool,
) -> Result<CommentRecord, CommentError> {
    let mut transaction = pool
        .begin()
        .await
        .context("Failed to acquire a Postgres connection from the pool")?;

    if !repository::post_exists(reply.post_id, &mut *transaction).await? {
        return Err(CommentError::PostNotFound);
    }

    let parent_post_id = super::find_comment_post_id(parent_comment_id, &mut *transaction)
        .await?
        .ok_or(CommentError::CommentNotFound)?;

    // A reply joins its parent's tree; a parent from another post is not found here
    if parent_post_id != reply.post_id {
        tracing::info!(%parent_post_id, "Parent comment belongs to a different post");
        return Err(CommentError::CommentNotFound);
    }

    let record =
        insert_comment_row(reply, author_id, Some(parent_comment_id), &mut *transaction).await?;

    transaction
        .commit()
        .await
        .context("Failed to commit SQL transaction to store a new reply")?;

    Span::current().record("comment_id", record.id);
    Ok(record)
}

async fn insert_comment_row<'e, E>(
    comment: &NewComment,
    author_id: UserId,
    parent_comment_id: Option<i64>,
    executor: E,
) -> Result<CommentRecord, CommentError>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as::<_, CommentRecord>(
        r#"
        INSERT INTO comments (text, post_id, author_id, parent_comment_id)
        VALUES ($1, $2, $3, $4)
        RETURNING id, text, post_id, author_id, parent_comment_id, created_at
        "#,
    )
    .bind(comment.text.as_ref())
    .bind(comment.post_id)
    .bind(*author_id)
    .bind(parent_comment_id)
    .fetch_one(executor)
    .await
    .map_err(classify_insert_error)
}

/// Maps referential-integrity failures onto the missing target; everything else is unexpected.
fn classify_insert_error(e: sqlx::Error) -> CommentError {
    if let sqlx::Error::Database(db_error) = &e {
        if db_error.is_foreign_key_violation() {
            match db_error.constraint() {
                Some("comments_post_id_fkey") => return CommentError::PostNotFound,
                Some("comments_parent_comment_id_fkey") => return CommentError::CommentNotFound,
                _ => {}
            }
        }
    }

    CommentError::UnexpectedError(anyhow::Error::new(e).context("Failed to insert comment"))
}
