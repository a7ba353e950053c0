//! Identity operations behind the auth endpoints

use chrono::{Duration, Utc};
use std::sync::Arc;
use validator::Validate;

use super::dto::{LoginDto, SessionUser, SignUpDto};
use super::model::{Claims, Role, User};
use super::password::PasswordService;
use super::token::TokenIssuer;
use crate::core::UserStore;
use crate::core::error::{ApiError, ApiResult, AuthError, ValidationError};
use crate::core::validation::validators::{collect_errors, sort_errors};

/// Consecutive failures allowed before an account is locked, and for how long
#[derive(Debug, Clone, Copy)]
pub struct LockoutPolicy {
    pub max_failed_attempts: i32,
    pub duration: Duration,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            max_failed_attempts: 5,
            duration: Duration::minutes(5),
        }
    }
}

pub struct AuthService {
    users: Arc<dyn UserStore>,
    passwords: PasswordService,
    tokens: TokenIssuer,
    lockout: LockoutPolicy,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        passwords: PasswordService,
        tokens: TokenIssuer,
        lockout: LockoutPolicy,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
            lockout,
        }
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// Create any role from [`Role::ALL`] the store does not know yet
    pub async fn seed_roles(&self) -> ApiResult<()> {
        let existing = self.users.roles().await?;
        for role in Role::ALL {
            if !existing.iter().any(|name| name == role.as_str()) {
                self.users.create_role(role.as_str()).await?;
                tracing::info!(role = %role, "role created");
            }
        }
        Ok(())
    }

    /// Register a user and open a session for them
    ///
    /// DTO rules and password policy violations are reported together, per
    /// field. Any failure to persist the user (a taken email included) is
    /// reported as a generic sign-up error.
    pub async fn sign_up(&self, dto: SignUpDto) -> ApiResult<SessionUser> {
        let mut fields = match dto.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => collect_errors(&errors),
        };
        if let Some(password) = dto.password.as_deref() {
            fields.extend(self.passwords.policy_errors(password));
        }
        if !fields.is_empty() {
            sort_errors(&mut fields);
            return Err(ValidationError::FieldErrors(fields).into());
        }

        let password = dto.password.unwrap_or_default();

        let role = dto
            .role
            .as_deref()
            .unwrap_or_default()
            .parse::<Role>()
            .map_err(|_| ApiError::SignUpFailed)?;
        let hash = self.passwords.hash(&password)?;

        let mut user = User::new(
            dto.name.unwrap_or_default(),
            dto.email.unwrap_or_default(),
            hash,
            role,
        );
        user.birth_date = dto.birth_date;

        let user = self.users.create(user).await.map_err(|e| {
            tracing::warn!(error = %e, "sign-up failed");
            ApiError::SignUpFailed
        })?;
        tracing::info!(user_id = %user.id, role = %user.role, "user signed up");

        self.open_session(user)
    }

    /// Check credentials, tracking failures toward a lockout
    pub async fn login(&self, dto: LoginDto) -> ApiResult<SessionUser> {
        let email = dto.email.unwrap_or_default();
        let password = dto.password.unwrap_or_default();

        let Some(mut user) = self.users.find_by_email(&email).await? else {
            tracing::debug!("login for unknown email");
            return Err(AuthError::InvalidCredentials.into());
        };

        let now = Utc::now();
        if user.is_locked_out(now) {
            tracing::warn!(user_id = %user.id, "login attempt on locked account");
            return Err(AuthError::LockedOut.into());
        }

        if !self.passwords.verify(&password, &user.password_hash)? {
            user.access_failed_count += 1;
            if user.access_failed_count >= self.lockout.max_failed_attempts {
                user.access_failed_count = 0;
                user.lockout_end = Some(now + self.lockout.duration);
                tracing::warn!(user_id = %user.id, "account locked out");
            }
            self.users.update(&user).await?;
            return Err(AuthError::InvalidCredentials.into());
        }

        if user.access_failed_count != 0 || user.lockout_end.is_some() {
            user.access_failed_count = 0;
            user.lockout_end = None;
            self.users.update(&user).await?;
        }
        tracing::info!(user_id = %user.id, "user logged in");

        self.open_session(user)
    }

    /// The user a verified token was issued to
    pub async fn profile(&self, claims: &Claims) -> ApiResult<User> {
        let id = claims
            .user_id()
            .ok_or_else(|| AuthError::unauthorized("Token subject is not a user id"))?;
        self.users
            .get(&id)
            .await?
            .ok_or_else(|| AuthError::unauthorized("User no longer exists").into())
    }

    fn open_session(&self, user: User) -> ApiResult<SessionUser> {
        let issued = self.tokens.issue(&user)?;
        Ok(SessionUser {
            user,
            token: issued.token,
            expires_at: issued.expires_at,
        })
    }
}
