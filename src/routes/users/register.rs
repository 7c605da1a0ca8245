use crate::authentication;
use crate::domain::{NewUser, UserData};
use crate::repository::{self, UserInsert};
use crate::telemetry;
use crate::utils;
use actix_web::ResponseError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use anyhow::Context;
use sqlx::PgPool;
use std::fmt;
use std::fmt::{Debug, Formatter};
use tracing::{Span, field};

#[derive(thiserror::Error)]
pub enum RegisterError {
    #[error("{0}")]
    ValidationError(String),

    #[error("user name or email is already taken")]
    Conflict,

    #[error("an unexpected error occurred")]
    UnexpectedError(#[from] anyhow::Error),
}

impl Debug for RegisterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        utils::error_chain_fmt(self, f)
    }
}

impl ResponseError for RegisterError {
    fn error_response(&self) -> HttpResponse {
        let status_code = match self {
            RegisterError::ValidationError(_) => StatusCode::BAD_REQUEST,
            RegisterError::Conflict => StatusCode::CONFLICT,
            RegisterError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        utils::build_error_response(status_code, self.to_string())
    }
}

#[tracing::instrument(
    skip_all,
    fields(
        user_name = tracing::field::Empty,
        user_email = tracing::field::Empty,
        user_id = tracing::field::Empty
    )
)]
pub async fn register_user(
    payload: web::Json<UserData>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, RegisterError> {
    let NewUser {
        user_name: name,
        email,
        password,
    } = payload
        .0
        .try_into()
        .map_err(RegisterError::ValidationError)?;

    Span::current().record("user_name", field::display(&name));
    Span::current().record("user_email", field::display(&email));

    let password_hash = telemetry::spawn_blocking_with_tracing(move || {
        authentication::compute_password_hash(password.into_secret())
    })
    .await
    .context("Failed to spawn blocking task.")?
    .context("Failed to hash password")?;

    match repository::insert_user(&name, &email, password_hash, &pool).await? {
        UserInsert::Created(user_id) => {
            Span::current().record("user_id", field::display(&user_id));
            Ok(HttpResponse::Created().json(serde_json::json!({ "id": user_id })))
        }
        UserInsert::AlreadyExists => Err(RegisterError::Conflict),
    }
}
