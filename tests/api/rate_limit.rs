use crate::helpers;
use serde_json::Value;
use std::time::Duration;
use threadhub::configuration::RateLimitConfigs;

#[tokio::test]
async fn comment_creation_beyond_the_budget_returns_429() {
    let app = helpers::spawn_app_with_comment_limit(3).await;
    app.login().await;

    let post_id = app.create_sample_post().await;
    let root = app.create_sample_comment(&post_id, "1").await;
    app.create_sample_reply(&post_id, root, "2").await;
    app.create_sample_comment(&post_id, "3").await;

    let payload = serde_json::json!({ "text": "4", "post_id": post_id.to_string() });
    let response = app.create_comment(&payload).await;
    assert_eq!(response.status().as_u16(), 429);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], 429);

    // replies share the same budget
    let response = app.reply_to_comment(root, &payload).await;
    assert_eq!(response.status().as_u16(), 429);

    assert_eq!(app.count_comments(&post_id).await, 3);
}

#[tokio::test]
async fn the_budget_is_tracked_per_user() {
    let app = helpers::spawn_app_with_comment_limit(1).await;
    app.login().await;

    let post_id = app.create_sample_post().await;
    app.create_sample_comment(&post_id, "mine").await;

    let payload = serde_json::json!({ "text": "again", "post_id": post_id.to_string() });
    assert_eq!(app.create_comment(&payload).await.status().as_u16(), 429);
    app.logout().await;

    let other = helpers::TestUser::generate();
    other.store(&app.db_pool).await.unwrap();
    let response = app
        .login_with(&serde_json::json!({
            "user_name": other.user_name,
            "password": other.password,
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    assert_eq!(app.create_comment(&payload).await.status().as_u16(), 201);
}

#[tokio::test]
async fn anonymous_requests_are_rejected_before_counting() {
    let app = helpers::spawn_app_with_comment_limit(1).await;
    app.login().await;
    let post_id = app.create_sample_post().await;
    app.logout().await;

    let payload = serde_json::json!({ "text": "anon", "post_id": post_id.to_string() });
    for _ in 0..3 {
        assert_eq!(app.create_comment(&payload).await.status().as_u16(), 401);
    }

    app.login().await;
    assert_eq!(app.create_comment(&payload).await.status().as_u16(), 201);
}

#[tokio::test]
async fn the_budget_is_restored_once_the_window_ends() {
    let app = helpers::spawn_app_with_rate_limit(RateLimitConfigs {
        max_comments: 1,
        window_seconds: 1,
    })
    .await;
    app.login().await;

    let post_id = app.create_sample_post().await;
    app.create_sample_comment(&post_id, "first").await;

    let payload = serde_json::json!({ "text": "too soon", "post_id": post_id.to_string() });
    assert_eq!(app.create_comment(&payload).await.status().as_u16(), 429);

    tokio::time::sleep(Duration::from_millis(2_100)).await;

    let payload = serde_json::json!({ "text": "new window", "post_id": post_id.to_string() });
    assert_eq!(app.create_comment(&payload).await.status().as_u16(), 201);
}

#[tokio::test]
async fn allowed_requests_report_the_remaining_budget() {
    let app = helpers::spawn_app_with_comment_limit(3).await;
    app.login().await;

    let post_id = app.create_sample_post().await;
    let payload = serde_json::json!({ "text": "counted", "post_id": post_id.to_string() });

    let response = app.create_comment(&payload).await;
    assert_eq!(response.status().as_u16(), 201);
    assert_eq!(response.headers()["x-ratelimit-remaining"], "2");

    app.create_comment(&payload).await;
    app.create_comment(&payload).await;

    let response = app.create_comment(&payload).await;
    assert_eq!(response.status().as_u16(), 429);
    assert_eq!(response.headers()["x-ratelimit-remaining"], "0");
}
