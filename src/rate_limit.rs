//! Per-user limit on comment creation.
//!
//! A fixed window counter lives in Redis under one key per user. Creating the
//! key and counting the hit run in one `MULTI` block, so a key never exists
//! without its TTL and every window ends on time.
//! The middleware runs after [`crate::authentication::reject_anonymous_users`]
//! and before any comment is written, so a rejected request writes nothing.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::middleware::Next;
use actix_web::{HttpMessage, web};
use anyhow::Context;
use redis::aio::ConnectionManager;
use secrecy::{ExposeSecret, Secret};

use crate::authentication::UserId;
use crate::configuration::RateLimitConfigs;
use crate::utils::{build_error_response, e500};

pub const RATE_LIMITED_MESSAGE: &str = "Too many comments created, please try again later.";
pub const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";

#[derive(Clone)]
pub struct CommentRateLimiter {
    redis: ConnectionManager,
    limits: RateLimitConfigs,
}

#[derive(Debug, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed { remaining: u64 },
    Limited,
}

impl CommentRateLimiter {
    pub async fn connect(
        redis_uri: &Secret<String>,
        limits: RateLimitConfigs,
    ) -> Result<Self, anyhow::Error> {
        let client = redis::Client::open(redis_uri.expose_secret().as_str())
            .context("Invalid Redis URI for the comment rate limiter")?;
        let redis = ConnectionManager::new(client)
            .await
            .context("Failed to connect to Redis for the comment rate limiter")?;

        Ok(Self { redis, limits })
    }

    /// Counts one comment attempt for `user_id` and decides whether it may proceed.
    #[tracing::instrument(skip(self))]
    pub async fn check(&self, user_id: UserId) -> Result<RateLimitDecision, anyhow::Error> {
        let key = rate_limit_key(user_id);
        // ConnectionManager clones share one multiplexed connection
        let mut redis = self.redis.clone();

        let (count,): (u64,) = window_pipeline(&key, self.limits.window_seconds)
            .query_async(&mut redis)
            .await
            .context("Failed to count comment attempt")?;

        Ok(decide(count, self.limits.max_comments))
    }
}

/// `SET key 0 EX window NX` then `INCR key`, applied atomically. The TTL is
/// fixed when the window opens and never pushed forward by later hits.
fn window_pipeline(key: &str, window_seconds: u64) -> redis::Pipeline {
    let mut pipe = redis::pipe();
    pipe.atomic()
        .cmd("SET")
        .arg(key)
        .arg(0u64)
        .arg("EX")
        .arg(window_seconds)
        .arg("NX")
        .ignore()
        .incr(key, 1u64);
    pipe
}

fn rate_limit_key(user_id: UserId) -> String {
    format!("rate_limit:comments:{user_id}")
}

fn decide(count: u64, max_comments: u64) -> RateLimitDecision {
    if count > max_comments {
        RateLimitDecision::Limited
    } else {
        RateLimitDecision::Allowed {
            remaining: max_comments - count,
        }
    }
}

pub async fn limit_comment_creation(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let user_id = req
        .extensions()
        .get::<UserId>()
        .copied()
        .ok_or_else(|| e500("Rate limiting requires an authenticated user"))?;

    let limiter = req
        .app_data::<web::Data<CommentRateLimiter>>()
        .cloned()
        .ok_or_else(|| e500("Comment rate limiter is not registered"))?;

    let remaining = match limiter.check(user_id).await {
        Ok(RateLimitDecision::Limited) => {
            tracing::info!(%user_id, "Comment creation rate limited");
            let mut response = build_error_response(
                StatusCode::TOO_MANY_REQUESTS,
                RATE_LIMITED_MESSAGE.to_string(),
            );
            response.headers_mut().insert(
                HeaderName::from_static(RATE_LIMIT_REMAINING_HEADER),
                HeaderValue::from(0u64),
            );
            return Err(
                InternalError::from_response(anyhow::anyhow!(RATE_LIMITED_MESSAGE), response)
                    .into(),
            );
        }
        Ok(RateLimitDecision::Allowed { remaining }) => Some(remaining),
        // An unavailable Redis must not take comment creation down with it
        Err(e) => {
            tracing::warn!(error.cause_chain = ?e, "Rate limit check failed, allowing request");
            None
        }
    };

    let mut response = next.call(req).await?;
    if let Some(remaining) = remaining {
        response.headers_mut().insert(
            HeaderName::from_static(RATE_LIMIT_REMAINING_HEADER),
            HeaderValue::from(remaining),
        );
    }

    Ok(response)
}
