mod types;
mod user_email;
mod user_name;
mod user_password;

pub use types::*;
pub use user_email::UserEmail;
pub use user_name::UserName;
pub use user_password::UserPassword;

#[derive(Debug)]
pub struct NewUser {
    pub email: UserEmail,
    pub user_name: UserName,
    pub password: UserPassword,
}

impl NewUser {
    pub fn new(email: String, user_name: String, password: String) -> Result<Self, String> {
        Ok(Self {
            email: UserEmail::parse(email)?,
            user_name: UserName::parse(user_name)?,
            password: UserPassword::parse(password)?,
        })
    }
}
