use crate::authentication::UserId;
use crate::domain::{CreatePostPayload, Post};
use crate::{build_error_response, error_chain_fmt, repository};
use actix_web::ResponseError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(thiserror::Error)]
pub enum PostError {
    #[error("{0}")]
    ValidationError(String),

    #[error("post not found")]
    NotFound,

    #[error("an unexpected error occurred")]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for PostError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for PostError {
    fn error_response(&self) -> HttpResponse {
        let status_code = match self {
            PostError::ValidationError(_) => StatusCode::BAD_REQUEST,
            PostError::NotFound => StatusCode::NOT_FOUND,
            PostError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        build_error_response(status_code, self.to_string())
    }
}

#[derive(Deserialize, Debug)]
pub struct PostPathParams {
    pub post_id: Uuid,
}

#[tracing::instrument(
    skip_all,
    fields(post_id = %path.post_id)
)]
pub async fn get_post(
    path: web::Path<PostPathParams>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, PostError> {
    let post = repository::get_post(path.post_id, &pool)
        .await?
        .ok_or(PostError::NotFound)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({"post": post})))
}

#[tracing::instrument(
    skip(pool, payload),
    fields(user_id=%&*user_id)
)]
pub async fn create_post(
    payload: web::Json<CreatePostPayload>,
    pool: web::Data<PgPool>,
    user_id: web::ReqData<UserId>,
) -> Result<HttpResponse, PostError> {
    let user_id = user_id.into_inner();
    let post: Post = payload.0.try_into().map_err(PostError::ValidationError)?;

    let record = repository::insert_post(&post, user_id, &pool).await?;

    Ok(HttpResponse::Created().json(record))
}
