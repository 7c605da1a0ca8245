use anyhow::Context;
use secrecy::{ExposeSecret, Secret};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{UserEmail, UserName};

/// Outcome of a registration insert; name and email are both unique.
pub enum UserInsert {
    Created(Uuid),
    AlreadyExists,
}

#[tracing::instrument(skip_all, fields(user_name = %user_name))]
pub async fn insert_user(
    user_name: &UserName,
    email: &UserEmail,
    password_hash: Secret<String>,
    pool: &PgPool,
) -> Result<UserInsert, anyhow::Error> {
    let user_id = Uuid::new_v4();
    let result = sqlx::query(
        r#"
        INSERT INTO users (id, user_name, email, password_hash)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(user_id)
    .bind(user_name.as_ref())
    .bind(email.as_ref())
    .bind(password_hash.expose_secret())
    .execute(pool)
    .await;

    match result {
        Ok(_) => Ok(UserInsert::Created(user_id)),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(UserInsert::AlreadyExists),
        Err(e) => Err(anyhow::Error::new(e).context("Failed to insert new user")),
    }
}

#[tracing::instrument(skip_all)]
pub async fn get_stored_credentials(
    user_name: &str,
    pool: &PgPool,
) -> Result<Option<(Uuid, Secret<String>)>, anyhow::Error> {
    let row = sqlx::query_as::<_, (Uuid, String)>(
        r#"
        SELECT id, password_hash
        FROM users
        WHERE user_name = $1
        "#,
    )
    .bind(user_name)
    .fetch_optional(pool)
    .await
    .context("Failed to perform a query to retrieve stored credentials.")?
    .map(|(id, password_hash)| (id, Secret::new(password_hash)));

    Ok(row)
}
