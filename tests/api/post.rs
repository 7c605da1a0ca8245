use crate::helpers;
use serde_json::Value;
use uuid::Uuid;

#[tokio::test]
async fn create_post_returns_201_with_the_stored_post() {
    let app = helpers::spawn_app().await;
    app.login().await;

    let payload = serde_json::json!({ "title": "Hello", "text": "World" });
    let response = app.create_post(&payload).await;
    assert_eq!(response.status().as_u16(), 201);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["title"], "Hello");
    assert_eq!(body["post_text"], "World");
    assert_eq!(body["created_by"], app.test_user.user_id.to_string());
}

#[tokio::test]
async fn create_post_returns_400_for_invalid_input() {
    let app = helpers::spawn_app().await;
    app.login().await;

    let test_cases = vec![
        (serde_json::json!({ "title": "", "text": "Body" }), "empty title"),
        (serde_json::json!({ "title": "Title", "text": "  " }), "blank text"),
        (
            serde_json::json!({ "title": "t".repeat(101), "text": "Body" }),
            "title over 100 characters",
        ),
    ];

    for (payload, description) in test_cases {
        let response = app.create_post(&payload).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Expected 400 for {description}"
        );
    }
}

#[tokio::test]
async fn create_post_returns_401_if_unauthenticated() {
    let app = helpers::spawn_app().await;

    let payload = serde_json::json!({ "title": "Hello", "text": "World" });
    let response = app.create_post(&payload).await;
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn get_post_returns_the_post() {
    let app = helpers::spawn_app().await;
    app.login().await;
    let post_id = app.create_sample_post().await;

    let response = app.get_post(&post_id).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["post"]["id"], post_id.to_string());
}

#[tokio::test]
async fn get_unknown_post_returns_404() {
    let app = helpers::spawn_app().await;

    let response = app.get_post(&Uuid::new_v4()).await;
    assert_eq!(response.status().as_u16(), 404);
}
