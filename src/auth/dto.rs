use serde::Deserialize;

use crate::auth::repo::Role;

/// Form body for the signup page.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Form body for the signin page.
#[derive(Debug, Deserialize)]
pub struct SigninForm {
    pub email: String,
    pub password: String,
}
