mod comment_text;
mod display;
mod query;
mod types;

pub use comment_text::CommentText;
pub use display::*;
pub use query::*;
pub use types::*;
use uuid::Uuid;

/// A validated comment body together with the post it is attached to.
///
/// Used for both root comments and replies; a reply's parent is supplied
/// separately by the caller.
#[derive(Debug)]
pub struct NewComment {
    pub text: CommentText,
    pub post_id: Uuid,
}

impl NewComment {
    pub fn new(text: String, post_id: String) -> Result<Self, String> {
        let post_id = Uuid::parse_str(&post_id)
            .map_err(|_| "Invalid post_id: must be a valid UUID".to_string())?;

        Ok(Self {
            text: CommentText::parse(text)?,
            post_id,
        })
    }
}
