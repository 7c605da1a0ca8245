use crate::helpers::TestApp;
use reqwest::Response;
use serde_json::Value;
use uuid::Uuid;

impl TestApp {
    pub async fn create_comment(&self, payload: &Value) -> Response {
        self.send_post("v1/comment/me/create", payload).await
    }

    pub async fn reply_to_comment(&self, comment_id: i64, payload: &Value) -> Response {
        self.send_post(&format!("v1/comment/me/reply/{comment_id}"), payload)
            .await
    }

    pub async fn get_comments(&self, post_id: &Uuid) -> Response {
        self.send_get(&format!("v1/comment/get/posts/{post_id}"))
            .await
    }

    pub async fn get_comments_sorted(&self, post_id: &Uuid, sort_by: &str, order: &str) -> Response {
        self.send_get(&format!(
            "v1/comment/get/posts/{post_id}?sort_by={sort_by}&sort_order={order}"
        ))
        .await
    }

    pub async fn expand_comment(
        &self,
        post_id: &Uuid,
        comment_id: i64,
        page: i64,
        page_size: i64,
    ) -> Response {
        self.send_get(&format!(
            "v1/comment/get/posts/{post_id}/expand/{comment_id}?page={page}&page_size={page_size}"
        ))
        .await
    }

    /// Creates a root comment and returns its id.
    pub async fn create_sample_comment(&self, post_id: &Uuid, text: &str) -> i64 {
        let payload = serde_json::json!({ "text": text, "post_id": post_id.to_string() });
        let response = self.create_comment(&payload).await;
        assert_eq!(response.status().as_u16(), 201, "Failed to create comment");
        let body: Value = response.json().await.unwrap();
        body["id"].as_i64().unwrap()
    }

    /// Creates a reply under `parent_id` and returns its id.
    pub async fn create_sample_reply(&self, post_id: &Uuid, parent_id: i64, text: &str) -> i64 {
        let payload = serde_json::json!({ "text": text, "post_id": post_id.to_string() });
        let response = self.reply_to_comment(parent_id, &payload).await;
        assert_eq!(response.status().as_u16(), 201, "Failed to create reply");
        let body: Value = response.json().await.unwrap();
        body["id"].as_i64().unwrap()
    }

    pub async fn count_comments(&self, post_id: &Uuid) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments WHERE post_id = $1")
            .bind(post_id)
            .fetch_one(&self.db_pool)
            .await
            .expect("Failed to count comments")
    }
}
