//! Book (catalog entry) model and related types

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Book genre (stored as the `book_genre` Postgres enum)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(type_name = "book_genre", rename_all = "UPPERCASE")]
pub enum BookGenre {
    Fiction,
    Fantasy,
    Mystery,
    Romance,
    Biography,
    Science,
}

/// Full book model from database.
///
/// Invariants: isbn is unique among all books; a book published in 2020 or
/// later must carry a price; author_id always references an existing author.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: Uuid,
    pub isbn: String,
    pub title: String,
    pub publication_date: NaiveDate,
    pub genre: BookGenre,
    pub price: Option<Decimal>,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Year component of the publication date
    pub fn publication_year(&self) -> i32 {
        self.publication_date.year()
    }
}

/// Book row joined with its author, as returned by search and detail queries
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookDetails {
    pub id: Uuid,
    pub isbn: String,
    pub title: String,
    pub publication_date: NaiveDate,
    pub genre: BookGenre,
    pub price: Option<Decimal>,
    pub author_id: Uuid,
    pub author_name: String,
}

/// Create book request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 10, max = 17, message = "isbn must be 10 to 17 characters"))]
    pub isbn: String,
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    pub publication_date: NaiveDate,
    pub genre: BookGenre,
    pub price: Option<Decimal>,
    pub author_id: Uuid,
}

/// Update book request (full replacement of mutable fields)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 10, max = 17, message = "isbn must be 10 to 17 characters"))]
    pub isbn: String,
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    pub publication_date: NaiveDate,
    pub genre: BookGenre,
    pub price: Option<Decimal>,
    pub author_id: Uuid,
}

/// Default page index when the caller leaves it unset
pub const DEFAULT_PAGE: i64 = 0;
/// Default page size when the caller leaves it unset
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Optional search criteria for books.
///
/// Every field is optional; unset fields impose no constraint. Pagination is
/// independent of filtering (zero-based page index, page size ≥ 1).
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
pub struct BookSearchQuery {
    pub isbn: Option<String>,
    pub title: Option<String>,
    pub author_name: Option<String>,
    pub genre: Option<BookGenre>,
    pub year: Option<i32>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl BookSearchQuery {
    /// Zero-based page index, defaulting to 0
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }

    /// Page size, defaulting to 10
    pub fn page_size(&self) -> i64 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Reject negative page indexes and non-positive page sizes
    pub fn validate_paging(&self) -> Result<(), crate::error::AppError> {
        if self.page() < 0 {
            return Err(crate::error::AppError::Validation(
                "page must be >= 0".to_string(),
            ));
        }
        if self.page_size() < 1 {
            return Err(crate::error::AppError::Validation(
                "page_size must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}
