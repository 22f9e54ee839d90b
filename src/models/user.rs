//! Account model, roles and authentication claims

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;

/// Role granting full administrative access
pub const ADMIN_ROLE: &str = "Admin";
/// Role every registered account receives
pub const USER_ROLE: &str = "User";

/// Account row from database
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Data needed to insert an account
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub username: String,
    pub password_hash: String,
}

/// Public account representation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccountProfile {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl AccountProfile {
    pub fn new(account: Account, roles: Vec<String>) -> Self {
        Self {
            id: account.id,
            email: account.email,
            username: account.username,
            roles,
            created_at: account.created_at,
        }
    }
}

/// Account annotated with admin membership (admin user list)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserWithRole {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
}

/// Result of toggling the admin role
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminRoleToggled {
    pub user_id: Uuid,
    pub is_admin: bool,
}

/// Registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// Display name; defaults to the email address
    #[validate(length(min = 2, max = 256, message = "Username must be between 2 and 256 characters"))]
    pub username: Option<String>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: AccountProfile,
}

/// The authenticated caller, as seen by ownership checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub is_admin: bool,
}

impl Actor {
    pub fn new(user_id: Uuid, is_admin: bool) -> Self {
        Self { user_id, is_admin }
    }

    /// Creator-or-admin rule
    pub fn can_modify(&self, owner_id: Uuid) -> bool {
        self.is_admin || self.user_id == owner_id
    }

    pub fn require_owner_or_admin(&self, owner_id: Uuid, what: &str) -> Result<(), AppError> {
        if self.can_modify(owner_id) {
            Ok(())
        } else {
            tracing::warn!(user_id = %self.user_id, owner_id = %owner_id, "Denied access to {}", what);
            Err(AppError::Authorization(format!(
                "Only the owner or an administrator may modify this {}",
                what
            )))
        }
    }
}

/// JWT Claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    /// Account email
    pub sub: String,
    pub user_id: Uuid,
    pub roles: Vec<String>,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    pub fn new(account: &Account, roles: Vec<String>, expiration_hours: u64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: account.email.clone(),
            user_id: account.id,
            roles,
            exp: now + (expiration_hours as i64 * 3600),
            iat: now,
        }
    }

    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    /// Check if user holds the Admin role
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == ADMIN_ROLE)
    }

    /// Require admin privileges
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Authorization("Administrator privileges required".to_string()))
        }
    }

    pub fn actor(&self) -> Actor {
        Actor::new(self.user_id, self.is_admin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account {
            id: Uuid::new_v4(),
            email: "reader@example.com".to_string(),
            username: "reader".to_string(),
            password_hash: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn token_carries_identity_and_roles() {
        let account = account();
        let claims = UserClaims::new(&account, vec![USER_ROLE.to_string()], 1);
        let token = claims.create_token("secret").unwrap();

        let decoded = UserClaims::from_token(&token, "secret").unwrap();
        assert_eq!(decoded.user_id, account.id);
        assert_eq!(decoded.sub, "reader@example.com");
        assert!(!decoded.is_admin());
        assert!(decoded.require_admin().is_err());
    }

    #[test]
    fn token_with_wrong_secret_is_rejected() {
        let claims = UserClaims::new(&account(), vec![], 1);
        let token = claims.create_token("secret").unwrap();
        assert!(UserClaims::from_token(&token, "other").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut claims = UserClaims::new(&account(), vec![], 1);
        claims.iat -= 10_000;
        claims.exp = claims.iat + 60;
        let token = claims.create_token("secret").unwrap();
        assert!(UserClaims::from_token(&token, "secret").is_err());
    }

    #[test]
    fn owner_or_admin_rule() {
        let owner = Uuid::new_v4();
        let stranger = Actor::new(Uuid::new_v4(), false);
        let admin = Actor::new(Uuid::new_v4(), true);

        assert!(Actor::new(owner, false).can_modify(owner));
        assert!(admin.can_modify(owner));
        assert!(!stranger.can_modify(owner));
        assert!(matches!(
            stranger.require_owner_or_admin(owner, "book"),
            Err(AppError::Authorization(_))
        ));
    }

    #[test]
    fn admin_claims_produce_admin_actor() {
        let claims = UserClaims::new(&account(), vec![USER_ROLE.into(), ADMIN_ROLE.into()], 1);
        assert!(claims.actor().is_admin);
        assert!(claims.require_admin().is_ok());
    }
}
