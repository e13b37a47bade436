//! Clients repository for database operations

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{error::AppResult, models::client::Client};

#[derive(Clone)]
pub struct ClientsRepository {
    pool: Pool<Postgres>,
}

impl ClientsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get a client by id
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(
            "SELECT id, login, password, email, roles FROM clients WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    /// Get a client by login
    pub async fn find_by_login(&self, login: &str) -> AppResult<Option<Client>> {
        let client = sqlx::query_as::<_, Client>(
            "SELECT id, login, password, email, roles FROM clients WHERE login = $1",
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    /// Insert a new client with an already-hashed password
    pub async fn create(
        &self,
        login: &str,
        password_hash: &str,
        email: Option<&str>,
        roles: &[String],
    ) -> AppResult<Client> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (login, password, email, roles)
            VALUES ($1, $2, $3, $4)
            RETURNING id, login, password, email, roles
            "#,
        )
        .bind(login)
        .bind(password_hash)
        .bind(email)
        .bind(roles)
        .fetch_one(&self.pool)
        .await?;

        Ok(client)
    }
}
