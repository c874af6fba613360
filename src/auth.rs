use crate::{errors::AppError, state::AppState};
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
use uuid::Uuid;

/// Claims carried by the identity provider's HS256 access tokens.
/// The provider stores display name and application role in user metadata.
#[derive(Debug, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Option<UserMetadata>,
    pub exp: usize,
}

#[derive(Debug, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Authenticated user extractor.
/// Add `auth: AuthUser` as a parameter in any handler that requires authentication.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let headers: &HeaderMap = &parts.headers;

        let auth_header = headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Invalid Authorization format".to_string()))?;

        let secret = state.config.identity_jwt_secret.as_bytes();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        let user_id =
            Uuid::parse_str(&token_data.claims.sub).map_err(|_| AppError::InvalidToken)?;

        let email = token_data.claims.email.unwrap_or_default();
        let metadata = token_data.claims.user_metadata;
        // Fall back to the mailbox name when the profile has no display name
        let name = metadata
            .as_ref()
            .and_then(|m| m.name.clone())
            .or_else(|| email.split('@').next().map(|s| s.to_string()))
            .unwrap_or_else(|| "User".to_string());
        let role = metadata
            .and_then(|m| m.role)
            .unwrap_or_else(|| "representative".to_string());

        Ok(AuthUser {
            id: user_id,
            email,
            name,
            role,
        })
    }
}
