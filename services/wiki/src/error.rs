use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Wiki service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum WikiServiceError {
    #[error("crop not found")]
    CropNotFound,
    #[error("meal not found")]
    MealNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("authentication required")]
    Unauthenticated,
    #[error("invalid username/email or password")]
    InvalidCredentials,
    #[error("forbidden")]
    Forbidden,
    #[error("username already taken")]
    UsernameTaken,
    #[error("email already registered")]
    EmailTaken,
    #[error("name already taken")]
    NameTaken,
    #[error("username must be between 3-20 characters")]
    InvalidUsername,
    #[error("invalid email address")]
    InvalidEmail,
    #[error("password must be at least 8 characters and contain a letter and a number")]
    WeakPassword,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("terms of service not accepted")]
    TermsNotAccepted,
    #[error("invalid {0}")]
    InvalidValue(&'static str),
    #[error("missing data")]
    MissingData,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl WikiServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CropNotFound => "CROP_NOT_FOUND",
            Self::MealNotFound => "MEAL_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden => "FORBIDDEN",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::NameTaken => "NAME_TAKEN",
            Self::InvalidUsername => "INVALID_USERNAME",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::WeakPassword => "WEAK_PASSWORD",
            Self::PasswordMismatch => "PASSWORD_MISMATCH",
            Self::TermsNotAccepted => "TERMS_NOT_ACCEPTED",
            Self::InvalidValue(_) => "INVALID_VALUE",
            Self::MissingData => "MISSING_DATA",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for WikiServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::CropNotFound | Self::MealNotFound | Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::Unauthenticated | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UsernameTaken | Self::EmailTaken | Self::NameTaken => StatusCode::CONFLICT,
            Self::InvalidUsername
            | Self::InvalidEmail
            | Self::WeakPassword
            | Self::PasswordMismatch
            | Self::TermsNotAccepted
            | Self::InvalidValue(_)
            | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
