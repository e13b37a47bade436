//! API client (user account) model and JWT claims

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;

/// Role granting write access to authors, books and clients
pub const ROLE_MANAGER: &str = "MANAGER";
/// Role granting read access to the catalog
pub const ROLE_OPERATOR: &str = "OPERATOR";

const ROLE_PREFIX: &str = "ROLE_";

/// Normalize a stored role to its canonical `ROLE_`-prefixed authority form
pub fn to_authority(role: &str) -> String {
    if role.starts_with(ROLE_PREFIX) {
        role.to_string()
    } else {
        format!("{}{}", ROLE_PREFIX, role)
    }
}

/// Client account from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Client {
    pub id: Uuid,
    pub login: String,
    /// Argon2 password hash, never serialized in responses
    #[serde(skip_serializing)]
    pub password: String,
    pub email: Option<String>,
    pub roles: Vec<String>,
}

impl Client {
    /// Roles normalized to their authority form
    pub fn authorities(&self) -> Vec<String> {
        self.roles.iter().map(|r| to_authority(r)).collect()
    }
}

/// Create client request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateClient {
    #[validate(length(min = 1, message = "login is required"))]
    pub login: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    #[validate(email(message = "invalid email"))]
    pub email: Option<String>,
    pub roles: Vec<String>,
}

/// JWT claims carried by authenticated requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub client_id: Uuid,
    pub authorities: Vec<String>,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    fn has_role(&self, role: &str) -> bool {
        let authority = to_authority(role);
        self.authorities.iter().any(|a| *a == authority)
    }

    /// Require a single role
    pub fn require_role(&self, role: &str) -> Result<(), AppError> {
        if self.has_role(role) {
            Ok(())
        } else {
            Err(AppError::Authorization(format!(
                "Requires role {}",
                role
            )))
        }
    }

    /// Require at least one of the given roles
    pub fn require_any_role(&self, roles: &[&str]) -> Result<(), AppError> {
        if roles.iter().any(|r| self.has_role(r)) {
            Ok(())
        } else {
            Err(AppError::Authorization(format!(
                "Requires one of roles: {}",
                roles.join(", ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims_with(authorities: Vec<String>) -> UserClaims {
        UserClaims {
            sub: "admin".to_string(),
            client_id: Uuid::new_v4(),
            authorities,
            exp: 0,
            iat: 0,
        }
    }

    #[test]
    fn roles_are_normalized_to_authority_prefix() {
        let client = Client {
            id: Uuid::new_v4(),
            login: "admin".to_string(),
            password: "hash".to_string(),
            email: None,
            roles: vec!["MANAGER".to_string(), "ROLE_OPERATOR".to_string()],
        };
        assert_eq!(
            client.authorities(),
            vec!["ROLE_MANAGER".to_string(), "ROLE_OPERATOR".to_string()]
        );
    }

    #[test]
    fn require_role_accepts_matching_authority() {
        let claims = claims_with(vec!["ROLE_MANAGER".to_string()]);
        assert!(claims.require_role(ROLE_MANAGER).is_ok());
        assert!(claims.require_role(ROLE_OPERATOR).is_err());
    }

    #[test]
    fn require_any_role_accepts_either() {
        let claims = claims_with(vec!["ROLE_OPERATOR".to_string()]);
        assert!(claims
            .require_any_role(&[ROLE_OPERATOR, ROLE_MANAGER])
            .is_ok());
        assert!(claims.require_any_role(&[ROLE_MANAGER]).is_err());
    }

    #[test]
    fn token_round_trip_preserves_claims() {
        let claims = UserClaims {
            sub: "admin".to_string(),
            client_id: Uuid::new_v4(),
            authorities: vec!["ROLE_MANAGER".to_string()],
            exp: chrono::Utc::now().timestamp() + 3600,
            iat: chrono::Utc::now().timestamp(),
        };
        let token = claims.create_token("secret").unwrap();
        let parsed = UserClaims::from_token(&token, "secret").unwrap();
        assert_eq!(parsed.sub, claims.sub);
        assert_eq!(parsed.authorities, claims.authorities);
    }
}
