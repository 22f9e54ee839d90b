//! Users and roles repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::user::{Account, NewAccount, UserWithRole, ADMIN_ROLE},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Account>>;
    /// Case-insensitive email lookup
    async fn get_by_email(&self, email: &str) -> AppResult<Option<Account>>;
    async fn create(&self, account: &NewAccount) -> AppResult<Account>;
    async fn roles_for(&self, user_id: Uuid) -> AppResult<Vec<String>>;
    /// Every account with its Admin membership, ordered by username
    async fn list_with_admin_flag(&self) -> AppResult<Vec<UserWithRole>>;
    /// Create the role if missing; returns true when it was created
    async fn ensure_role(&self, name: &str) -> AppResult<bool>;
    async fn has_role(&self, user_id: Uuid, role: &str) -> AppResult<bool>;
    async fn add_role(&self, user_id: Uuid, role: &str) -> AppResult<()>;
    async fn remove_role(&self, user_id: Uuid, role: &str) -> AppResult<()>;
}

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UsersRepository {
    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(account)
    }

    async fn get_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            "SELECT * FROM users WHERE LOWER(email) = LOWER($1)",
        )
        .bind(email.trim())
        .fetch_optional(&self.pool)
        .await?;
        Ok(account)
    }

    async fn create(&self, account: &NewAccount) -> AppResult<Account> {
        let row = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO users (id, email, username, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&account.email)
        .bind(&account.username)
        .bind(&account.password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn roles_for(&self, user_id: Uuid) -> AppResult<Vec<String>> {
        let roles: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT r.name FROM roles r
            JOIN user_roles ur ON ur.role_id = r.id
            WHERE ur.user_id = $1
            ORDER BY r.name
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(roles)
    }

    async fn list_with_admin_flag(&self) -> AppResult<Vec<UserWithRole>> {
        let users = sqlx::query_as::<_, UserWithRole>(
            r#"
            SELECT u.id, u.username, u.email,
                   EXISTS (
                       SELECT 1 FROM user_roles ur
                       JOIN roles r ON r.id = ur.role_id
                       WHERE ur.user_id = u.id AND r.name = $1
                   ) AS is_admin
            FROM users u
            ORDER BY u.username, u.id
            "#,
        )
        .bind(ADMIN_ROLE)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn ensure_role(&self, name: &str) -> AppResult<bool> {
        let result = sqlx::query("INSERT INTO roles (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn has_role(&self, user_id: Uuid, role: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM user_roles ur
                JOIN roles r ON r.id = ur.role_id
                WHERE ur.user_id = $1 AND r.name = $2
            )
            "#,
        )
        .bind(user_id)
        .bind(role)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn add_role(&self, user_id: Uuid, role: &str) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO user_roles (user_id, role_id)
            SELECT $1, r.id FROM roles r WHERE r.name = $2
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(role)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 && !self.has_role(user_id, role).await? {
            return Err(AppError::NotFound(format!("Role {} not found", role)));
        }
        Ok(())
    }

    async fn remove_role(&self, user_id: Uuid, role: &str) -> AppResult<()> {
        sqlx::query(
            r#"
            DELETE FROM user_roles
            WHERE user_id = $1 AND role_id = (SELECT id FROM roles WHERE name = $2)
            "#,
        )
        .bind(user_id)
        .bind(role)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
