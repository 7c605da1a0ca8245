use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug)]
pub struct PostTitle(String);

impl PostTitle {
    pub fn parse(s: String) -> Result<Self, String> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err("Invalid title: cannot be empty.".to_string());
        }

        if trimmed.graphemes(true).count() > 100 {
            return Err("Invalid title: cannot exceed 100 characters.".to_string());
        }

        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for PostTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
