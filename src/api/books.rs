//! Book (catalog) endpoints

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{BookDetails, BookSearchQuery, CreateBook, UpdateBook},
        client::{ROLE_MANAGER, ROLE_OPERATOR},
    },
};

use super::AuthenticatedUser;

/// Paginated book search response
#[derive(Serialize, ToSchema)]
pub struct BookPage {
    /// Matched books for the requested page
    pub items: Vec<BookDetails>,
    /// Total number of matches across all pages
    pub total: i64,
    /// Zero-based page index
    pub page: i64,
    /// Page size
    pub page_size: i64,
}

/// Search books with dynamic filters and pagination
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    params(BookSearchQuery),
    responses(
        (status = 200, description = "Page of matching books", body = BookPage),
        (status = 400, description = "Invalid pagination parameters"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<BookSearchQuery>,
) -> AppResult<Json<BookPage>> {
    claims.require_any_role(&[ROLE_OPERATOR, ROLE_MANAGER])?;

    let (items, total) = state.services.catalog.search_books(&query).await?;

    Ok(Json(BookPage {
        items,
        total,
        page: query.page(),
        page_size: query.page_size(),
    }))
}

/// Get book details by id
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Book id")
    ),
    responses(
        (status = 200, description = "Book details", body = BookDetails),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookDetails>> {
    claims.require_any_role(&[ROLE_OPERATOR, ROLE_MANAGER])?;

    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = BookDetails),
        (status = 404, description = "Referenced author not found"),
        (status = 409, description = "ISBN already registered"),
        (status = 422, description = "Price missing for a recent book")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(book): Json<CreateBook>,
) -> AppResult<(StatusCode, [(header::HeaderName, String); 1], Json<BookDetails>)> {
    claims.require_role(ROLE_MANAGER)?;
    book.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let created = state.services.catalog.create_book(book).await?;
    let location = format!("/api/v1/books/{}", created.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

/// Update an existing book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Book id")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = BookDetails),
        (status = 404, description = "Book or referenced author not found"),
        (status = 409, description = "ISBN already registered to another book"),
        (status = 422, description = "Price missing for a recent book")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(book): Json<UpdateBook>,
) -> AppResult<Json<BookDetails>> {
    claims.require_role(ROLE_MANAGER)?;
    book.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let updated = state.services.catalog.update_book(id, book).await?;
    Ok(Json(updated))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Book id")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    claims.require_role(ROLE_MANAGER)?;

    state.services.catalog.delete_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
