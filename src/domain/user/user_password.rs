use secrecy::Secret;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug)]
pub struct UserPassword(Secret<String>);

impl UserPassword {
    pub fn parse(s: String) -> Result<Self, String> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err("Invalid user password: cannot be empty or whitespace.".to_string());
        }

        let length = trimmed.graphemes(true).count();

        if length < 8 {
            return Err("Invalid user password: must be at least 8 characters long.".to_string());
        }

        if length > 128 {
            return Err("Invalid user password: cannot be longer than 128 characters.".to_string());
        }

        Ok(Self(Secret::new(trimmed.to_string())))
    }

    pub fn into_secret(self) -> Secret<String> {
        self.0
    }
}
