use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Serialize, Deserialize)]
pub struct SignupBody {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

impl SignupBody {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();

        if self.name.trim().is_empty() {
            field_errors.insert("name".to_string(), "Name cannot be empty".to_string());
        }
        if let Err(msg) = validate_email(&self.email) {
            field_errors.insert("email".to_string(), msg);
        }
        if self.password.len() < MIN_PASSWORD_LENGTH {
            field_errors.insert(
                "password".to_string(),
                format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH),
            );
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Invalid signup request", field_errors))
        }
    }
}

/// Basic shape check; deliverability is the mail system's problem.
fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() || !parts[1].contains('.') {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}
