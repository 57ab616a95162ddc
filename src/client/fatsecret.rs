use super::oauth::{signed_params, OAuthCredentials};
use super::token_store::{TokenStore, UserToken};
use super::DiaryApi;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

/// Client for the FatSecret REST API (`server.api`), signing every call with OAuth 1.0.
#[derive(Debug, Clone)]
pub struct FatSecretClient {
    http: reqwest::Client,
    api_url: String,
    consumer_key: String,
    consumer_secret: SecretString,
    token: Option<UserToken>,
}

impl FatSecretClient {
    /// Creates an unauthorized client. Call [`FatSecretClient::authorize`] before
    /// fetching diary data.
    ///
    /// # Arguments
    ///
    /// * `api_url` - REST endpoint, e.g. `https://platform.fatsecret.com/rest/server.api`
    /// * `consumer_key` - Application key
    /// * `consumer_secret` - Application secret
    pub fn new(
        api_url: &str,
        consumer_key: impl Into<String>,
        consumer_secret: SecretString,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.to_string(),
            consumer_key: consumer_key.into(),
            consumer_secret,
            token: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.export.api_url,
            config.consumer.key.clone(),
            config.consumer.secret.clone(),
        )
    }

    /// Uses an already known access token.
    pub fn with_token(mut self, token: UserToken) -> Self {
        self.token = Some(token);
        self
    }

    pub fn is_authorized(&self) -> bool {
        self.token.is_some()
    }

    /// Obtains the access token for `user`, from the store when cached, otherwise
    /// from `profile.get_auth` (the new token is then saved to the store).
    ///
    /// # Errors
    ///
    /// Returns `AuthError` if the service refuses to issue a token, and `IoError`
    /// if the token cannot be persisted.
    pub async fn authorize(&mut self, user: &str, store: &mut TokenStore) -> AppResult<()> {
        if let Some(token) = store.get(user) {
            info!(user = user, "Using cached FatSecret token");
            self.token = Some(token.clone());
            return Ok(());
        }

        info!(user = user, "Requesting FatSecret token");
        let token = self
            .profile_auth(user)
            .await
            .map_err(|e| AppError::AuthError(format!("could not authorize '{user}': {e}")))?;
        store.insert(user, token.clone());
        store.save()?;
        debug!(path = %store.path().display(), "Token saved");
        self.token = Some(token);
        Ok(())
    }

    /// Calls `profile.get_auth` for `user`, signed with the consumer credentials only.
    pub async fn profile_auth(&self, user: &str) -> AppResult<UserToken> {
        let body = self
            .call("profile.get_auth", vec![("user_id", user.to_string())], None)
            .await?;
        let profile = body
            .get("profile")
            .ok_or_else(|| AppError::MalformedResponse("response has no 'profile'".into()))?;
        let field = |name: &str| {
            profile
                .get(name)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| AppError::MalformedResponse(format!("profile has no '{name}'")))
        };
        Ok(UserToken {
            auth_token: field("auth_token")?,
            auth_secret: field("auth_secret")?,
        })
    }

    async fn call_authorized(&self, method: &str, params: Vec<(&str, String)>) -> AppResult<Value> {
        let token = self
            .token
            .as_ref()
            .ok_or_else(|| AppError::AuthError("client is not authorized".into()))?;
        self.call(method, params, Some(token)).await
    }

    async fn call(
        &self,
        method: &str,
        params: Vec<(&str, String)>,
        token: Option<&UserToken>,
    ) -> AppResult<Value> {
        let mut query: Vec<(String, String)> = vec![
            ("method".into(), method.into()),
            ("format".into(), "json".into()),
        ];
        query.extend(params.into_iter().map(|(k, v)| (k.to_string(), v)));

        let credentials = OAuthCredentials {
            consumer_key: &self.consumer_key,
            consumer_secret: self.consumer_secret.expose_secret(),
            token: token.map(|t| t.auth_token.as_str()),
            token_secret: token.map(|t| t.auth_secret.as_str()).unwrap_or(""),
        };
        let nonce = Uuid::new_v4().simple().to_string();
        let signed = signed_params(
            "GET",
            &self.api_url,
            query,
            &credentials,
            &nonce,
            Utc::now().timestamp(),
        );

        debug!(method = method, "Calling FatSecret");
        let response = self
            .http
            .get(&self.api_url)
            .query(&signed)
            .send()
            .await
            .map_err(|e| AppError::NetworkError(format!("{method} request failed: {e}")))?;

        let status = response.status();
        let response = response.error_for_status().map_err(|e| {
            AppError::NetworkError(format!("HTTP {}: {method} failed: {e}", status.as_u16()))
        })?;

        let body: Value = response.json().await?;
        check_api_error(&body)?;
        Ok(body)
    }
}

/// FatSecret reports failures as HTTP 200 with `{"error": {"code": .., "message": ..}}`.
fn check_api_error(body: &Value) -> AppResult<()> {
    let Some(error) = body.get("error") else {
        return Ok(());
    };
    let code = match error.get("code") {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(-1),
        Some(Value::String(s)) => s.parse().unwrap_or(-1),
        _ => -1,
    };
    let message = error
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("unknown error")
        .to_string();
    Err(AppError::ApiError { code, message })
}

#[async_trait]
impl DiaryApi for FatSecretClient {
    async fn food_entries(&self, date_code: i64) -> AppResult<Value> {
        self.call_authorized("food_entries.get", vec![("date", date_code.to_string())])
            .await
    }

    async fn exercise_entries(&self, date_code: i64) -> AppResult<Value> {
        self.call_authorized("exercise_entries.get", vec![("date", date_code.to_string())])
            .await
    }

    async fn weight_month(&self, date_code: i64) -> AppResult<Value> {
        self.call_authorized("weights.get_month", vec![("date", date_code.to_string())])
            .await
    }
}
