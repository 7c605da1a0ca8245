use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Post;

#[derive(sqlx::FromRow, Serialize, Debug)]
pub struct PostRecord {
    pub id: Uuid,
    pub title: String,
    pub post_text: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug)]
pub struct CreatePostPayload {
    pub title: String,
    pub text: String,
}

impl TryFrom<CreatePostPayload> for Post {
    type Error = String;

    fn try_from(payload: CreatePostPayload) -> Result<Self, Self::Error> {
        Post::new(payload.title, payload.text)
    }
}
