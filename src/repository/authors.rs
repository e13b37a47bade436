//! Authors repository for database operations

use chrono::{NaiveDate, Utc};
use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::author::{Author, AuthorQuery, CreateAuthor, UpdateAuthor},
};

const AUTHOR_COLUMNS: &str = "id, name, birth_date, nationality, created_at, updated_at";

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get an author by id
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>(&format!(
            "SELECT {} FROM authors WHERE id = $1",
            AUTHOR_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(author)
    }

    /// Lookup by the exact (name, birth date, nationality) triple,
    /// returning zero or one author
    pub async fn find_by_identity(
        &self,
        name: &str,
        birth_date: NaiveDate,
        nationality: &str,
    ) -> AppResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>(&format!(
            "SELECT {} FROM authors WHERE name = $1 AND birth_date = $2 AND nationality = $3",
            AUTHOR_COLUMNS
        ))
        .bind(name)
        .bind(birth_date)
        .bind(nationality)
        .fetch_optional(&self.pool)
        .await?;

        Ok(author)
    }

    /// Query-by-example search over name and nationality
    pub async fn search(&self, query: &AuthorQuery) -> AppResult<Vec<Author>> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM authors WHERE 1=1",
            AUTHOR_COLUMNS
        ));

        if let Some(ref name) = query.name {
            qb.push(" AND name ILIKE ");
            qb.push_bind(format!("%{}%", name));
        }
        if let Some(ref nationality) = query.nationality {
            qb.push(" AND nationality = ");
            qb.push_bind(nationality.clone());
        }
        qb.push(" ORDER BY name");

        let authors = qb.build_query_as::<Author>().fetch_all(&self.pool).await?;

        Ok(authors)
    }

    /// Insert a new author
    pub async fn create(&self, author: &CreateAuthor) -> AppResult<Author> {
        let now = Utc::now();

        let created = sqlx::query_as::<_, Author>(&format!(
            r#"
            INSERT INTO authors (name, birth_date, nationality, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING {}
            "#,
            AUTHOR_COLUMNS
        ))
        .bind(&author.name)
        .bind(author.birth_date)
        .bind(&author.nationality)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update an existing author
    pub async fn update(&self, id: Uuid, author: &UpdateAuthor) -> AppResult<Option<Author>> {
        let now = Utc::now();

        let updated = sqlx::query_as::<_, Author>(&format!(
            r#"
            UPDATE authors SET name = $1, birth_date = $2, nationality = $3, updated_at = $4
            WHERE id = $5
            RETURNING {}
            "#,
            AUTHOR_COLUMNS
        ))
        .bind(&author.name)
        .bind(author.birth_date)
        .bind(&author.nationality)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Delete an author. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Whether any book currently references the author
    pub async fn has_books(&self, id: Uuid) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE author_id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}
