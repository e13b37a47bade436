//! Books repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::book::{Book, BookDetails, BookSearchQuery, CreateBook, UpdateBook},
    repository::specs::{compose_filter, BookSpec},
};

const BOOK_COLUMNS: &str =
    "id, isbn, title, publication_date, genre, price, author_id, created_at, updated_at";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get a book by id, joined with its author
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<BookDetails>> {
        let book = sqlx::query_as::<_, BookDetails>(
            r#"
            SELECT b.id, b.isbn, b.title, b.publication_date, b.genre, b.price,
                   b.author_id, a.name AS author_name
            FROM books b
            JOIN authors a ON a.id = b.author_id
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    /// Lookup by exact ISBN, returning zero or one book
    pub async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE isbn = $1",
            BOOK_COLUMNS
        ))
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    /// Search books with the composed filter and pagination.
    ///
    /// The filter is applied first, then results are sliced into the
    /// requested page. Returns the page plus the total match count.
    pub async fn search(&self, query: &BookSearchQuery) -> AppResult<(Vec<BookDetails>, i64)> {
        let specs = compose_filter(query);
        let limit = query.page_size();
        let offset = query.page() * limit;

        let mut count_qb = QueryBuilder::new(
            "SELECT COUNT(*) FROM books b JOIN authors a ON a.id = b.author_id WHERE 1=1",
        );
        push_conditions(&mut count_qb, &specs);
        let total: i64 = count_qb.build_query_scalar().fetch_one(&self.pool).await?;

        let mut select_qb = QueryBuilder::new(
            r#"
            SELECT b.id, b.isbn, b.title, b.publication_date, b.genre, b.price,
                   b.author_id, a.name AS author_name
            FROM books b
            JOIN authors a ON a.id = b.author_id
            WHERE 1=1
            "#,
        );
        push_conditions(&mut select_qb, &specs);
        select_qb.push(" ORDER BY b.title LIMIT ");
        select_qb.push_bind(limit);
        select_qb.push(" OFFSET ");
        select_qb.push_bind(offset);

        let books = select_qb
            .build_query_as::<BookDetails>()
            .fetch_all(&self.pool)
            .await?;

        Ok((books, total))
    }

    /// Insert a new book
    pub async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let now = Utc::now();

        let created = sqlx::query_as::<_, Book>(&format!(
            r#"
            INSERT INTO books (isbn, title, publication_date, genre, price, author_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(&book.isbn)
        .bind(&book.title)
        .bind(book.publication_date)
        .bind(book.genre)
        .bind(book.price)
        .bind(book.author_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Update an existing book (full replacement of mutable fields)
    pub async fn update(&self, id: Uuid, book: &UpdateBook) -> AppResult<Option<Book>> {
        let now = Utc::now();

        let updated = sqlx::query_as::<_, Book>(&format!(
            r#"
            UPDATE books SET
                isbn = $1, title = $2, publication_date = $3, genre = $4,
                price = $5, author_id = $6, updated_at = $7
            WHERE id = $8
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(&book.isbn)
        .bind(&book.title)
        .bind(book.publication_date)
        .bind(book.genre)
        .bind(book.price)
        .bind(book.author_id)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Delete a book. Returns whether a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn push_conditions(qb: &mut QueryBuilder<'_, Postgres>, specs: &[BookSpec]) {
    for spec in specs {
        spec.push_condition(qb);
    }
}
