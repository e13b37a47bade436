//! Client authentication and registration service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::client::{Client, CreateClient, UserClaims},
    repository::Repository,
};

#[derive(Clone)]
pub struct ClientsService {
    repository: Repository,
    config: AuthConfig,
}

impl ClientsService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Authenticate by login and password, returning a JWT token whose
    /// authorities are the client's roles in canonical `ROLE_` form.
    ///
    /// The error message never reveals whether the login or the password
    /// was wrong.
    pub async fn authenticate(&self, login: &str, password: &str) -> AppResult<(String, Client)> {
        let client = self
            .repository
            .clients
            .find_by_login(login)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid login or password".to_string()))?;

        if !self.verify_password(&client, password)? {
            return Err(AppError::Authentication(
                "Invalid login or password".to_string(),
            ));
        }

        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            sub: client.login.clone(),
            client_id: client.id,
            authorities: client.authorities(),
            exp,
            iat: now,
        };

        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        Ok((token, client))
    }

    /// Register a new client with a hashed password. Login must be unique.
    pub async fn register(&self, client: CreateClient) -> AppResult<Client> {
        if self
            .repository
            .clients
            .find_by_login(&client.login)
            .await?
            .is_some()
        {
            return Err(AppError::Duplicate(format!(
                "Login {} is already registered",
                client.login
            )));
        }

        let hash = self.hash_password(&client.password)?;
        let created = self
            .repository
            .clients
            .create(&client.login, &hash, client.email.as_deref(), &client.roles)
            .await?;

        tracing::info!("Registered client {} ({})", created.id, created.login);
        Ok(created)
    }

    /// Get a client by id
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Client> {
        self.repository
            .clients
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Client {} not found", id)))
    }

    fn verify_password(&self, client: &Client, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&client.password)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}
