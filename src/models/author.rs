//! Author model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Full author model from database.
///
/// The (name, birth_date, nationality) triple is unique among authors.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: Uuid,
    pub name: String,
    pub birth_date: NaiveDate,
    pub nationality: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create author request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAuthor {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub birth_date: NaiveDate,
    #[validate(length(min = 1, message = "nationality is required"))]
    pub nationality: String,
}

/// Update author request (full replacement of mutable fields)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateAuthor {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub birth_date: NaiveDate,
    #[validate(length(min = 1, message = "nationality is required"))]
    pub nationality: String,
}

/// Query-by-example parameters for author search
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
pub struct AuthorQuery {
    pub name: Option<String>,
    pub nationality: Option<String>,
}
