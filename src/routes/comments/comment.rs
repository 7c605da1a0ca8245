use std::fmt::{self, Debug, Formatter};

use actix_web::{HttpResponse, ResponseError, http::StatusCode, web};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    authentication::UserId,
    domain::{
        CommentSort, CreateCommentPayload, ExpandCommentsQuery, ListCommentsQuery, Metadata,
        NewComment, Pagination,
    },
    repository, utils,
};

#[derive(thiserror::Error)]
pub enum CommentError {
    #[error("{0}")]
    ValidationError(String),

    #[error("post not found")]
    PostNotFound,

    #[error("comment not found")]
    CommentNotFound,

    #[error("an unexpected error occurred")]
    UnexpectedError(#[from] anyhow::Error),
}

impl CommentError {
    /// Only store failures may succeed when the same request is sent again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CommentError::UnexpectedError(_))
    }
}

impl Debug for CommentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        utils::error_chain_fmt(self, f)
    }
}

impl ResponseError for CommentError {
    fn error_response(&self) -> HttpResponse {
        let status_code = match self {
            CommentError::ValidationError(_) => StatusCode::BAD_REQUEST,
            CommentError::PostNotFound | CommentError::CommentNotFound => StatusCode::NOT_FOUND,
            CommentError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        utils::build_error_response(status_code, self.to_string())
    }
}

#[derive(Deserialize, Debug)]
pub struct PostCommentsPath {
    pub post_id: Uuid,
}

#[derive(Deserialize, Debug)]
pub struct ExpandPath {
    pub post_id: Uuid,
    pub comment_id: i64,
}

#[derive(Deserialize, Debug)]
pub struct ReplyPath {
    pub comment_id: i64,
}

#[tracing::instrument(
    skip(pool, query),
    fields(post_id=%path.post_id, sort_by=%query.sort_by, sort_order=%query.sort_order)
)]
pub async fn show_comments_for_post(
    path: web::Path<PostCommentsPath>,
    query: web::Query<ListCommentsQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, CommentError> {
    let sort = CommentSort::parse(&query.sort_by, &query.sort_order)
        .map_err(CommentError::ValidationError)?;

    let comments = repository::list_top_level_comments(path.post_id, &sort, &pool).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "comments": comments })))
}

#[tracing::instrument(
    skip(pool, query),
    fields(
        post_id=%path.post_id,
        comment_id=%path.comment_id,
        page=%query.page,
        page_size=%query.page_size
    )
)]
pub async fn expand_comment_replies(
    path: web::Path<ExpandPath>,
    query: web::Query<ExpandCommentsQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, CommentError> {
    let pagination =
        Pagination::parse(query.page, query.page_size).map_err(CommentError::ValidationError)?;

    let (comments, total) =
        repository::expand_comment_replies(path.post_id, path.comment_id, &pagination, &pool)
            .await?;

    let metadata = Metadata::calculate(total, &pagination);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "comments": comments,
        "metadata": metadata
    })))
}

#[tracing::instrument(skip(pool, payload), fields(user_id=%&*user_id))]
pub async fn create_comment(
    payload: web::Json<CreateCommentPayload>,
    pool: web::Data<PgPool>,
    user_id: web::ReqData<UserId>,
) -> Result<HttpResponse, CommentError> {
    let user_id = user_id.into_inner();

    let comment: NewComment = payload
        .0
        .try_into()
        .map_err(CommentError::ValidationError)?;

    let record = repository::insert_root_comment(&comment, user_id, &pool).await?;

    Ok(HttpResponse::Created().json(record))
}

#[tracing::instrument(
    skip(pool, payload),
    fields(user_id=%&*user_id, parent_comment_id=%path.comment_id)
)]
pub async fn reply_to_comment(
    path: web::Path<ReplyPath>,
    payload: web::Json<CreateCommentPayload>,
    pool: web::Data<PgPool>,
    user_id: web::ReqData<UserId>,
) -> Result<HttpResponse, CommentError> {
    let user_id = user_id.into_inner();

    let reply: NewComment = payload
        .0
        .try_into()
        .map_err(CommentError::ValidationError)?;

    let record = repository::insert_reply(path.comment_id, &reply, user_id, &pool).await?;

    Ok(HttpResponse::Created().json(record))
}
