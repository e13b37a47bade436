//! Book catalog service

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        author::Author,
        book::{Book, BookDetails, BookSearchQuery, CreateBook, UpdateBook},
    },
    repository::Repository,
    services::validation,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Search books with the composed filter and pagination
    pub async fn search_books(&self, query: &BookSearchQuery) -> AppResult<(Vec<BookDetails>, i64)> {
        query.validate_paging()?;
        self.repository.books.search(query).await
    }

    /// Get a book by id with its author
    pub async fn get_book(&self, id: Uuid) -> AppResult<BookDetails> {
        self.repository
            .books
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Create a new book.
    ///
    /// The referenced author must exist (checked first, short-circuiting
    /// validation), the ISBN must be free, and the price rule must hold.
    pub async fn create_book(&self, book: CreateBook) -> AppResult<BookDetails> {
        let author = self.resolve_author(book.author_id).await?;

        let existing = self.repository.books.find_by_isbn(&book.isbn).await?;
        validation::check_unique_isbn(None, existing.as_ref())?;
        validation::check_required_price(book.publication_date, book.price.as_ref())?;

        let created = self.repository.books.create(&book).await?;
        tracing::info!("Created book {} (isbn {})", created.id, created.isbn);

        Ok(with_author(created, &author))
    }

    /// Update an existing book, re-running the validation rules.
    ///
    /// A duplicate ISBN is tolerated only when it belongs to the book
    /// being updated.
    pub async fn update_book(&self, id: Uuid, book: UpdateBook) -> AppResult<BookDetails> {
        self.repository
            .books
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;

        let author = self.resolve_author(book.author_id).await?;

        let existing = self.repository.books.find_by_isbn(&book.isbn).await?;
        validation::check_unique_isbn(Some(id), existing.as_ref())?;
        validation::check_required_price(book.publication_date, book.price.as_ref())?;

        let updated = self
            .repository
            .books
            .update(id, &book)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;

        Ok(with_author(updated, &author))
    }

    /// Delete a book
    pub async fn delete_book(&self, id: Uuid) -> AppResult<()> {
        let deleted = self.repository.books.delete(id).await?;
        if !deleted {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        tracing::info!("Deleted book {}", id);
        Ok(())
    }

    async fn resolve_author(&self, author_id: Uuid) -> AppResult<Author> {
        self.repository
            .authors
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", author_id)))
    }
}

fn with_author(book: Book, author: &Author) -> BookDetails {
    BookDetails {
        id: book.id,
        isbn: book.isbn,
        title: book.title,
        publication_date: book.publication_date,
        genre: book.genre,
        price: book.price,
        author_id: book.author_id,
        author_name: author.name.clone(),
    }
}
