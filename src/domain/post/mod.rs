mod text;
mod title;
mod types;

pub use text::PostText;
pub use title::PostTitle;
pub use types::*;

#[derive(Debug)]
pub struct Post {
    pub title: PostTitle,
    pub text: PostText,
}

impl Post {
    pub fn new(title: String, text: String) -> Result<Self, String> {
        Ok(Self {
            title: PostTitle::parse(title)?,
            text: PostText::parse(text)?,
        })
    }
}
