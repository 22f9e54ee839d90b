//! Startup seeding of roles and the default administrator

use crate::{
    config::SeedConfig,
    error::AppResult,
    models::user::{NewAccount, ADMIN_ROLE, USER_ROLE},
    repository::UserStore,
};

use super::accounts::hash_password;

/// Ensure both roles exist and the configured admin account holds Admin.
///
/// Safe to run on every start.
pub async fn seed_roles_and_admin(users: &dyn UserStore, config: &SeedConfig) -> AppResult<()> {
    for role in [ADMIN_ROLE, USER_ROLE] {
        if users.ensure_role(role).await? {
            tracing::info!("Created role {}", role);
        }
    }

    if users.get_by_email(&config.admin_email).await?.is_some() {
        return Ok(());
    }

    let admin = users
        .create(&NewAccount {
            email: config.admin_email.clone(),
            username: config.admin_email.clone(),
            password_hash: hash_password(&config.admin_password)?,
        })
        .await?;
    users.add_role(admin.id, ADMIN_ROLE).await?;
    users.add_role(admin.id, USER_ROLE).await?;

    tracing::info!(user_id = %admin.id, "Created administrator account {}", admin.email);
    Ok(())
}
