use crate::helpers;

#[tokio::test]
async fn login_succeeds_with_valid_credentials() {
    let app = helpers::spawn_app().await;

    let response = app
        .login_with(&serde_json::json!({
            "user_name": &app.test_user.user_name,
            "password": &app.test_user.password,
        }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn login_fails_with_invalid_credentials() {
    let app = helpers::spawn_app().await;

    let test_cases = vec![
        (
            serde_json::json!({ "user_name": &app.test_user.user_name, "password": "wrong-password" }),
            "wrong password",
        ),
        (
            serde_json::json!({ "user_name": "nobody-here", "password": &app.test_user.password }),
            "unknown user",
        ),
        (
            serde_json::json!({ "user_name": "<script>", "password": "whatever-password" }),
            "malformed user name",
        ),
    ];

    for (payload, description) in test_cases {
        let response = app.login_with(&payload).await;
        assert_eq!(
            response.status().as_u16(),
            401,
            "Expected 401 for {description}"
        );
    }
}

#[tokio::test]
async fn logout_ends_the_session() {
    let app = helpers::spawn_app().await;
    app.login().await;

    let response = app.logout().await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app.logout().await;
    assert_eq!(response.status().as_u16(), 401);
}
