//! Author management service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::author::{Author, AuthorQuery, CreateAuthor, UpdateAuthor},
    repository::Repository,
    services::validation,
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Query-by-example search over name and nationality
    pub async fn search_authors(&self, query: &AuthorQuery) -> AppResult<Vec<Author>> {
        self.repository.authors.search(query).await
    }

    /// Get an author by id
    pub async fn get_author(&self, id: Uuid) -> AppResult<Author> {
        self.repository
            .authors
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    /// Create a new author. The (name, birth date, nationality) triple
    /// must not already be registered.
    pub async fn create_author(&self, author: CreateAuthor) -> AppResult<Author> {
        let existing = self
            .repository
            .authors
            .find_by_identity(&author.name, author.birth_date, &author.nationality)
            .await?;
        validation::check_unique_author(None, existing.as_ref())?;

        let created = self.repository.authors.create(&author).await?;
        tracing::info!("Created author {} ({})", created.id, created.name);

        Ok(created)
    }

    /// Update an existing author, re-running the duplicate-triple check
    /// while tolerating the author's own prior identity.
    pub async fn update_author(&self, id: Uuid, author: UpdateAuthor) -> AppResult<Author> {
        self.get_author(id).await?;

        let existing = self
            .repository
            .authors
            .find_by_identity(&author.name, author.birth_date, &author.nationality)
            .await?;
        validation::check_unique_author(Some(id), existing.as_ref())?;

        self.repository
            .authors
            .update(id, &author)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    /// Delete an author, blocked while any book references it
    pub async fn delete_author(&self, id: Uuid) -> AppResult<()> {
        self.get_author(id).await?;

        let has_books = self.repository.authors.has_books(id).await?;
        validation::check_author_deletable(has_books)?;

        self.repository.authors.delete(id).await?;
        tracing::info!("Deleted author {}", id);
        Ok(())
    }
}
