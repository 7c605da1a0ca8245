use crate::authentication::Credentials;
use crate::domain::{NewUser, UserName};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct LoginData {
    user_name: String,
    password: Secret<String>,
}

impl TryFrom<LoginData> for Credentials {
    type Error = String;

    fn try_from(payload: LoginData) -> Result<Self, Self::Error> {
        let user_name = UserName::parse(payload.user_name)?;

        Ok(Credentials {
            user_name: user_name.as_ref().to_string(),
            password: payload.password,
        })
    }
}

#[derive(Deserialize)]
pub struct UserData {
    email: String,
    user_name: String,
    password: Secret<String>,
}

impl TryFrom<UserData> for NewUser {
    type Error = String;

    fn try_from(payload: UserData) -> Result<Self, Self::Error> {
        NewUser::new(
            payload.email,
            payload.user_name,
            payload.password.expose_secret().to_string(),
        )
    }
}
