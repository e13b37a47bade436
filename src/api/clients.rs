//! Client registration endpoints

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::client::{Client, CreateClient, ROLE_MANAGER},
};

use super::AuthenticatedUser;

/// Register a new API client
#[utoipa::path(
    post,
    path = "/clients",
    tag = "clients",
    security(("bearer_auth" = [])),
    request_body = CreateClient,
    responses(
        (status = 201, description = "Client registered", body = Client),
        (status = 409, description = "Login already registered")
    )
)]
pub async fn create_client(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(client): Json<CreateClient>,
) -> AppResult<(StatusCode, Json<Client>)> {
    claims.require_role(ROLE_MANAGER)?;
    client
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let created = state.services.clients.register(client).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
