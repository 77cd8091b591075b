use async_trait::async_trait;

use crate::domain::user::{AccessToken, Credentials, Registration};
use crate::error::AppResult;

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> AppResult<AccessToken>;
    async fn register(&self, registration: &Registration) -> AppResult<AccessToken>;
}
