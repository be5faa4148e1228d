//! Dashboard credentials: one-shot default seeding and login verification

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use validator::Validate;

use crate::{
    config::DashboardConfig,
    error::{AppError, AppResult},
    models::stats_user::{DashboardUser, LoginForm},
    repository::Repository,
};

#[derive(Clone)]
pub struct DashboardService {
    repository: Repository,
    config: DashboardConfig,
}

impl DashboardService {
    pub fn new(repository: Repository, config: DashboardConfig) -> Self {
        Self { repository, config }
    }

    /// Create both tables and, while no credential exists, insert the
    /// configured default one. Returns whether a credential was inserted.
    pub async fn bootstrap(&self) -> AppResult<bool> {
        self.repository.visit_logs.ensure_schema().await?;
        self.repository.stats_users.ensure_schema().await?;

        let (username, password) = match self.default_credentials() {
            Some(credentials) => credentials,
            None => return Ok(false),
        };

        if self.repository.stats_users.any().await? {
            return Ok(false);
        }

        let hash = hash_password(password)?;
        let inserted = self
            .repository
            .stats_users
            .insert_if_empty(username, &hash)
            .await?;

        if inserted {
            tracing::info!("Seeded default dashboard user '{}'", username);
        }
        Ok(inserted)
    }

    fn default_credentials(&self) -> Option<(&str, &str)> {
        let username = self.config.default_username.as_deref()?.trim();
        let password = self.config.default_password.as_deref()?;
        if username.is_empty() || password.is_empty() {
            return None;
        }
        Some((username, password))
    }

    /// Check a login attempt. `Ok(None)` means the credentials were wrong,
    /// without saying which part.
    pub async fn authenticate(&self, form: &LoginForm) -> AppResult<Option<DashboardUser>> {
        let form = LoginForm {
            username: form.username.trim().to_string(),
            password: form.password.clone(),
        };
        if form.validate().is_err() {
            return Ok(None);
        }

        let user = match self.repository.stats_users.get_by_username(&form.username).await? {
            Some(user) => user,
            None => return Ok(None),
        };

        if !verify_password(&user.password_hash, &form.password)? {
            tracing::info!("Rejected dashboard login for '{}'", form.username);
            return Ok(None);
        }

        Ok(Some(DashboardUser {
            user_id: user.id,
            username: user.username,
        }))
    }
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored PHC hash
pub fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
