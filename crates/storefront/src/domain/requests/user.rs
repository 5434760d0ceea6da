use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Fill the required fields"))]
    #[schema(example = "Jane Doe")]
    pub name: String,

    #[serde(default)]
    #[validate(
        length(min = 1, message = "Fill the required fields"),
        email(message = "Please provide a valid email")
    )]
    #[schema(example = "jane@example.com")]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = "validate_new_password"))]
    pub password: String,
}

fn validate_new_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::new("required")
            .with_message(Cow::from("Fill the required fields")));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::new("length")
            .with_message(Cow::from("Password must be at least 6 characters")));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email and Password are required"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Email and Password are required"))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,

    #[validate(email(message = "Please provide a valid email"))]
    pub email: Option<String>,

    pub phone: Option<String>,

    pub address: Option<String>,
}

/// Row to insert once the password is hashed and the email normalised.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}
