//! Registration, login and profile service

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use uuid::Uuid;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{
        Account, AccountProfile, LoginRequest, LoginResponse, NewAccount, RegisterRequest,
        UserClaims, USER_ROLE,
    },
    repository::UserStore,
};

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

fn verify_password(account: &Account, password: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(&account.password_hash)
        .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserStore>,
    config: AuthConfig,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserStore>, config: AuthConfig) -> Self {
        Self { users, config }
    }

    /// Create an account holding the User role
    pub async fn register(&self, data: RegisterRequest) -> AppResult<AccountProfile> {
        let email = data.email.trim().to_string();
        if self.users.get_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict(format!("Email {} is already registered", email)));
        }

        let username = data
            .username
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| email.clone());

        let account = self
            .users
            .create(&NewAccount {
                email,
                username,
                password_hash: hash_password(&data.password)?,
            })
            .await?;
        self.users.add_role(account.id, USER_ROLE).await?;

        tracing::info!(user_id = %account.id, "Registered account {}", account.email);
        Ok(AccountProfile::new(account, vec![USER_ROLE.to_string()]))
    }

    /// Check credentials and issue a token
    pub async fn login(&self, data: LoginRequest) -> AppResult<LoginResponse> {
        let account = self
            .users
            .get_by_email(&data.email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

        if !verify_password(&account, &data.password)? {
            tracing::warn!(user_id = %account.id, "Failed login attempt");
            return Err(AppError::Authentication("Invalid email or password".to_string()));
        }

        let roles = self.users.roles_for(account.id).await?;
        let claims = UserClaims::new(&account, roles.clone(), self.config.jwt_expiration_hours);
        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        tracing::info!(user_id = %account.id, "User logged in");
        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: self.config.jwt_expiration_hours as i64 * 3600,
            user: AccountProfile::new(account, roles),
        })
    }

    /// Role names held by the account right now
    pub async fn current_roles(&self, user_id: Uuid) -> AppResult<Vec<String>> {
        self.users.roles_for(user_id).await
    }

    /// Current profile of the token holder
    pub async fn me(&self, claims: &UserClaims) -> AppResult<AccountProfile> {
        let account = self
            .users
            .get_by_id(claims.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Account no longer exists".to_string()))?;
        let roles = self.users.roles_for(account.id).await?;
        Ok(AccountProfile::new(account, roles))
    }
}
