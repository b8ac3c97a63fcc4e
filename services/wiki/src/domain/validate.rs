//! Input rules for accounts and catalog entries.

use crate::error::WikiServiceError;

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 20;
const EMAIL_MAX: usize = 120;
const PASSWORD_MIN: usize = 8;
const NAME_MAX: usize = 100;
const IMAGE_URL_MAX: usize = 200;

pub fn validate_username(username: &str) -> Result<(), WikiServiceError> {
    let len = username.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
        return Err(WikiServiceError::InvalidUsername);
    }
    Ok(())
}

/// Shape check only: one `@`, a non-empty local part, and a dotted domain
/// without empty labels.
pub fn validate_email(email: &str) -> Result<(), WikiServiceError> {
    let valid = email.len() <= EMAIL_MAX
        && !email.chars().any(char::is_whitespace)
        && match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.contains('@')
                    && domain.contains('.')
                    && domain.split('.').all(|label| !label.is_empty())
            }
            None => false,
        };
    if valid {
        Ok(())
    } else {
        Err(WikiServiceError::InvalidEmail)
    }
}

/// At least eight characters with one letter and one digit.
pub fn validate_password(password: &str) -> Result<(), WikiServiceError> {
    if password.chars().count() < PASSWORD_MIN
        || !password.chars().any(char::is_alphabetic)
        || !password.chars().any(|c| c.is_ascii_digit())
    {
        return Err(WikiServiceError::WeakPassword);
    }
    Ok(())
}

pub fn validate_password_confirmation(
    password: &str,
    confirmation: &str,
) -> Result<(), WikiServiceError> {
    if password != confirmation {
        return Err(WikiServiceError::PasswordMismatch);
    }
    Ok(())
}

/// Catalog entry name: non-blank, at most 100 characters.
pub fn validate_item_name(name: &str) -> Result<(), WikiServiceError> {
    if name.trim().is_empty() || name.chars().count() > NAME_MAX {
        return Err(WikiServiceError::InvalidValue("name"));
    }
    Ok(())
}

pub fn validate_image_url(image_url: Option<&str>) -> Result<(), WikiServiceError> {
    match image_url {
        Some(url) if url.chars().count() > IMAGE_URL_MAX => {
            Err(WikiServiceError::InvalidValue("image_url"))
        }
        _ => Ok(()),
    }
}

pub fn validate_hunger(value: i32) -> Result<(), WikiServiceError> {
    if value < 0 {
        return Err(WikiServiceError::InvalidValue("hunger"));
    }
    Ok(())
}

pub fn validate_saturation(value: f64) -> Result<(), WikiServiceError> {
    if !value.is_finite() || value < 0.0 {
        return Err(WikiServiceError::InvalidValue("saturation"));
    }
    Ok(())
}

/// Trim and drop blank optional text.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
