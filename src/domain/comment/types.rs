use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::NewComment;

/// A stored comment row, as returned by `INSERT ... RETURNING` and by every read.
#[derive(sqlx::FromRow, Serialize, Debug, Clone, PartialEq)]
pub struct CommentRecord {
    pub id: i64,
    pub text: String,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub parent_comment_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Number of direct replies of one comment.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct ReplyCount {
    pub parent_comment_id: i64,
    pub reply_count: i64,
}

#[derive(Deserialize, Debug)]
pub struct CreateCommentPayload {
    pub text: String,
    pub post_id: String,
}

impl TryFrom<CreateCommentPayload> for NewComment {
    type Error = String;

    fn try_from(value: CreateCommentPayload) -> Result<Self, Self::Error> {
        NewComment::new(value.text, value.post_id)
    }
}
