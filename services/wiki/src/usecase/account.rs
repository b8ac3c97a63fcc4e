use anyhow::Context;
use chrono::Utc;
use uuid::Uuid;

use delight_auth_types::cookie::{REMEMBERED_TOKEN_EXP, SESSION_TOKEN_EXP};
use delight_auth_types::password::{hash_password, verify_password};
use delight_auth_types::token::issue_session_token;
use delight_core::tracing::audit;
use delight_domain::user::UserRole;

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::domain::validate::{
    validate_email, validate_password, validate_password_confirmation, validate_username,
};
use crate::error::WikiServiceError;

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub agree_terms: bool,
}

pub struct RegisterUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> RegisterUseCase<U> {
    pub async fn execute(&self, input: RegisterInput) -> Result<User, WikiServiceError> {
        let username = input.username.trim().to_owned();
        let email = input.email.trim().to_owned();

        validate_username(&username)?;
        validate_email(&email)?;
        validate_password(&input.password)?;
        validate_password_confirmation(&input.password, &input.password_confirmation)?;
        if !input.agree_terms {
            return Err(WikiServiceError::TermsNotAccepted);
        }

        if self.users.username_taken(&username, None).await? {
            return Err(WikiServiceError::UsernameTaken);
        }
        if self.users.email_taken(&email, None).await? {
            return Err(WikiServiceError::EmailTaken);
        }

        let user = User {
            id: Uuid::now_v7(),
            username,
            email,
            password_hash: hash_password(&input.password).context("hash password")?,
            role: UserRole::Normal,
            created_at: Utc::now(),
        };
        self.users.create(&user).await?;

        audit(format_args!(
            "New user registered: {} ({})",
            user.username, user.email
        ));
        Ok(user)
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    /// Username or email.
    pub login: String,
    pub password: String,
    pub remember_me: bool,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub user: User,
    pub token: String,
    pub exp: u64,
}

pub struct LoginUseCase<'a, U: UserRepository> {
    pub users: U,
    pub jwt_secret: &'a str,
}

impl<U: UserRepository> LoginUseCase<'_, U> {
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, WikiServiceError> {
        let login = input.login.trim();
        if login.is_empty() || input.password.is_empty() {
            return Err(WikiServiceError::MissingData);
        }

        let user = match self.users.find_by_login(login).await? {
            Some(user) if verify_password(&input.password, &user.password_hash) => user,
            _ => {
                audit(format_args!("Failed login attempt for: {login}"));
                return Err(WikiServiceError::InvalidCredentials);
            }
        };

        let ttl = if input.remember_me {
            REMEMBERED_TOKEN_EXP
        } else {
            SESSION_TOKEN_EXP
        };
        let (token, exp) = issue_session_token(user.id, user.role.as_u8(), ttl, self.jwt_secret)
            .context("issue session token")?;

        audit(format_args!("User {} logged in successfully", user.username));
        Ok(LoginOutput { user, token, exp })
    }
}

// ── Logout ───────────────────────────────────────────────────────────────────

pub struct LogoutUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> LogoutUseCase<U> {
    /// Audits the logout of a known user. Clearing the cookie is the caller's
    /// job and happens whether or not the session was valid.
    pub async fn execute(&self, user_id: Option<Uuid>) -> Result<(), WikiServiceError> {
        let Some(user_id) = user_id else {
            return Ok(());
        };
        if let Some(user) = self.users.find_by_id(user_id).await? {
            audit(format_args!("User {} logged out", user.username));
        }
        Ok(())
    }
}
