// src/services/identity.rs
//
// Thin client for the hosted identity provider. Credential sign-in uses the
// public token endpoint; user administration goes through the admin API with
// the service key.

use crate::{config::Config, errors::AppError, models::IdentityUser};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Clone)]
pub struct IdentityService {
    client: Client,
    config: Arc<Config>,
}

// ─── Provider payloads ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ProviderUser {
    pub id: String,
    pub email: Option<String>,
    pub user_metadata: Option<ProviderUserMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct ProviderUserMetadata {
    pub name: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: ProviderUser,
}

#[derive(Debug, Deserialize)]
struct UserListResponse {
    users: Vec<ProviderUser>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    #[serde(alias = "message", alias = "error_description")]
    msg: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateUserPayload<'a> {
    email: &'a str,
    password: &'a str,
    email_confirm: bool,
    user_metadata: serde_json::Value,
}

impl IdentityService {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn admin_url(&self, path: &str) -> String {
        format!("{}/auth/v1/admin{}", self.config.identity_base_url, path)
    }

    /// Exchange credentials for an access token at the provider.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(String, IdentityUser), AppError> {
        let url = format!(
            "{}/auth/v1/token?grant_type=password",
            self.config.identity_base_url
        );

        let resp = self
            .client
            .post(&url)
            .header("apikey", &self.config.identity_service_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AppError::IdentityError(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(AppError::Unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        let token: TokenResponse = resp
            .json()
            .await
            .map_err(|e| AppError::IdentityError(e.to_string()))?;

        let user = map_user(&token.user);
        Ok((token.access_token, user))
    }

    /// Create a user with a confirmed email and the given app role.
    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        name: &str,
        role: &str,
    ) -> Result<IdentityUser, AppError> {
        let payload = CreateUserPayload {
            email,
            password,
            email_confirm: true,
            user_metadata: json!({ "name": name, "role": role }),
        };

        let resp = self
            .client
            .post(self.admin_url("/users"))
            .bearer_auth(&self.config.identity_service_key)
            .header("apikey", &self.config.identity_service_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::IdentityError(e.to_string()))?;

        let user: ProviderUser = read_provider_response(resp).await?;
        Ok(map_user(&user))
    }

    /// List every user the provider knows about.
    pub async fn list_users(&self) -> Result<Vec<IdentityUser>, AppError> {
        let resp = self
            .client
            .get(self.admin_url("/users"))
            .bearer_auth(&self.config.identity_service_key)
            .header("apikey", &self.config.identity_service_key)
            .send()
            .await
            .map_err(|e| AppError::IdentityError(e.to_string()))?;

        let list: UserListResponse = read_provider_response(resp).await?;
        Ok(list.users.iter().map(map_user).collect())
    }

    pub async fn get_user(&self, user_id: &str) -> Result<ProviderUser, AppError> {
        let resp = self
            .client
            .get(self.admin_url(&format!("/users/{}", user_id)))
            .bearer_auth(&self.config.identity_service_key)
            .header("apikey", &self.config.identity_service_key)
            .send()
            .await
            .map_err(|e| AppError::IdentityError(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        read_provider_response(resp).await
    }

    /// Change a user's app role, preserving the rest of their metadata.
    pub async fn update_user_role(&self, user_id: &str, new_role: &str) -> Result<(), AppError> {
        let existing = self.get_user(user_id).await?;
        let name = existing.user_metadata.as_ref().and_then(|m| m.name.clone());

        let resp = self
            .client
            .put(self.admin_url(&format!("/users/{}", user_id)))
            .bearer_auth(&self.config.identity_service_key)
            .header("apikey", &self.config.identity_service_key)
            .json(&json!({ "user_metadata": { "name": name, "role": new_role } }))
            .send()
            .await
            .map_err(|e| AppError::IdentityError(e.to_string()))?;

        let _: ProviderUser = read_provider_response(resp).await?;
        Ok(())
    }
}

async fn read_provider_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, AppError> {
    let status = resp.status();
    if status.is_success() {
        resp.json::<T>()
            .await
            .map_err(|e| AppError::IdentityError(e.to_string()))
    } else {
        let message = resp
            .json::<ProviderErrorBody>()
            .await
            .ok()
            .and_then(|b| b.msg)
            .unwrap_or_else(|| format!("provider returned {}", status));
        Err(AppError::IdentityError(message))
    }
}

fn map_user(user: &ProviderUser) -> IdentityUser {
    let email = user.email.clone().unwrap_or_default();
    let metadata = user.user_metadata.as_ref();
    // Prefer the profile name; fall back to the mailbox name
    let name = metadata
        .and_then(|m| m.name.clone())
        .or_else(|| {
            email
                .split('@')
                .next()
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
        })
        .unwrap_or_else(|| "User".to_string());
    let role = metadata
        .and_then(|m| m.role.clone())
        .unwrap_or_else(|| "representative".to_string());

    IdentityUser {
        id: user.id.clone(),
        name,
        email,
        role,
    }
}
