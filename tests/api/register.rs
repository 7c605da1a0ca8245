use crate::helpers;
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use serde_json::Value;
use uuid::Uuid;

#[tokio::test]
async fn register_returns_201_and_the_new_user_can_log_in() {
    let app = helpers::spawn_app().await;
    let email: String = SafeEmail().fake();
    let user_name = Uuid::new_v4().to_string();

    let payload = serde_json::json!({
        "user_name": user_name,
        "email": email,
        "password": "correct-horse-battery",
    });
    let response = app.register_user(&payload).await;
    assert_eq!(response.status().as_u16(), 201);

    let body: Value = response.json().await.unwrap();
    assert!(Uuid::parse_str(body["id"].as_str().unwrap()).is_ok());

    let response = app
        .login_with(&serde_json::json!({
            "user_name": user_name,
            "password": "correct-horse-battery",
        }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn register_returns_409_for_a_taken_user_name() {
    let app = helpers::spawn_app().await;

    let payload = serde_json::json!({
        "user_name": &app.test_user.user_name,
        "email": "someone-else@example.com",
        "password": "correct-horse-battery",
    });
    let response = app.register_user(&payload).await;
    assert_eq!(response.status().as_u16(), 409);
}

#[tokio::test]
async fn register_returns_400_for_invalid_data() {
    let app = helpers::spawn_app().await;

    let test_cases = vec![
        (
            serde_json::json!({ "user_name": "valid-name", "email": "not-an-email", "password": "long-enough-pw" }),
            "invalid email",
        ),
        (
            serde_json::json!({ "user_name": "", "email": "ok@example.com", "password": "long-enough-pw" }),
            "empty user name",
        ),
        (
            serde_json::json!({ "user_name": "valid-name", "email": "ok@example.com", "password": "short" }),
            "short password",
        ),
    ];

    for (payload, description) in test_cases {
        let response = app.register_user(&payload).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Expected 400 for {description}"
        );
    }
}
