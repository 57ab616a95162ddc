//! FatSecret REST client.
//!
//! [`DiaryApi`] is the seam between the export loops and the remote service:
//! [`FatSecretClient`] implements it over HTTP with OAuth 1.0 signing, and tests
//! substitute in-memory fakes.

mod fatsecret;
mod oauth;
mod token_store;

use crate::errors::AppResult;
use async_trait::async_trait;
use serde_json::Value;

// Re-export public API
pub use fatsecret::FatSecretClient;
pub use oauth::{percent_encode, signature_base_string, sign, OAuthCredentials};
pub use token_store::{TokenStore, UserToken};

/// Remote diary operations, each taking a day code and returning the raw JSON payload.
#[async_trait]
pub trait DiaryApi: Send + Sync {
    /// `food_entries.get` for one day.
    async fn food_entries(&self, date_code: i64) -> AppResult<Value>;
    /// `exercise_entries.get` for one day.
    async fn exercise_entries(&self, date_code: i64) -> AppResult<Value>;
    /// `weights.get_month` for the month containing the given day.
    async fn weight_month(&self, date_code: i64) -> AppResult<Value>;
}
