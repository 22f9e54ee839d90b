//! User administration service

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::user::{AdminRoleToggled, UserWithRole, ADMIN_ROLE},
    repository::UserStore,
};

#[derive(Clone)]
pub struct AdminService {
    users: Arc<dyn UserStore>,
}

impl AdminService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    pub async fn list_users(&self) -> AppResult<Vec<UserWithRole>> {
        self.users.list_with_admin_flag().await
    }

    /// Grant the Admin role if absent, revoke it if present
    pub async fn toggle_admin_role(&self, user_id: Uuid) -> AppResult<AdminRoleToggled> {
        if self.users.get_by_id(user_id).await?.is_none() {
            return Err(AppError::NotFound(format!("User {} not found", user_id)));
        }

        let is_admin = if self.users.has_role(user_id, ADMIN_ROLE).await? {
            self.users.remove_role(user_id, ADMIN_ROLE).await?;
            false
        } else {
            self.users.add_role(user_id, ADMIN_ROLE).await?;
            true
        };

        tracing::info!(user_id = %user_id, is_admin, "Toggled admin role");
        Ok(AdminRoleToggled { user_id, is_admin })
    }
}
