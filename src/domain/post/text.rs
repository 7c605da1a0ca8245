#[derive(Debug)]
pub struct PostText(String);

impl PostText {
    pub fn parse(s: String) -> Result<Self, String> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err("Invalid text: cannot be empty.".to_string());
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for PostText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
