use async_trait::async_trait;
use reqwest::{
    Client, Response,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::ticket::{Ticket, TicketFilters};
use crate::domain::user::{AccessToken, Credentials, Registration};
use crate::error::{AppError, AppResult};
use crate::services::{AuthService, TicketSource};

/// Client for the support backend, which serves both `/auth/*` and
/// `/support/tickets` from the same endpoint.
pub struct SupportApiClient {
    http: Client,
    endpoint: Option<String>,
}

impl SupportApiClient {
    pub fn new(endpoint: Option<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint,
        }
    }

    fn endpoint(&self) -> AppResult<&str> {
        self.endpoint
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .ok_or_else(|| AppError::Configuration("API endpoint not configured".to_string()))
    }

    fn url(&self, path: &str) -> AppResult<String> {
        Ok(format!("{}{path}", self.endpoint()?))
    }

    async fn post_for_token<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<AccessToken> {
        let response = self
            .http
            .post(self.url(path)?)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| AppError::Auth(format!("failed to call auth API: {err}")))?;

        let response = ensure_success(response).await.map_err(AppError::Auth)?;

        response
            .json::<AccessToken>()
            .await
            .map_err(|err| AppError::Auth(format!("failed to parse auth response: {err}")))
    }
}

async fn ensure_success(response: Response) -> Result<Response, String> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<unable to read response>".to_string());
    Err(format!("server responded with {status}: {body}"))
}

fn tickets_from_payload(payload: Value) -> Vec<Ticket> {
    let Value::Array(items) = payload else {
        warn!("ticket listing was not a JSON array; treating it as empty");
        return Vec::new();
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            if !item.is_object() {
                warn!(index, "skipping ticket record that is not an object");
                return None;
            }
            match serde_json::from_value::<Ticket>(item) {
                Ok(ticket) => Some(ticket),
                Err(err) => {
                    warn!(index, error = %err, "skipping malformed ticket record");
                    None
                }
            }
        })
        .collect()
}

#[async_trait]
impl TicketSource for SupportApiClient {
    async fn fetch_tickets(&self, token: &str, filters: &TicketFilters) -> AppResult<Vec<Ticket>> {
        let url = self.url("/support/tickets")?;
        debug!(%url, ?filters, "fetching tickets");

        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header(ACCEPT, "application/json")
            .query(&filters.query_pairs())
            .send()
            .await
            .map_err(|err| AppError::SupportApi(format!("failed to call support API: {err}")))?;

        let response = ensure_success(response)
            .await
            .map_err(AppError::SupportApi)?;

        let payload: Value = response.json().await.map_err(|err| {
            AppError::SupportApi(format!("failed to parse ticket listing: {err}"))
        })?;

        let tickets = tickets_from_payload(payload);
        debug!(count = tickets.len(), "fetched tickets");
        Ok(tickets)
    }
}

#[async_trait]
impl AuthService for SupportApiClient {
    async fn login(&self, credentials: &Credentials) -> AppResult<AccessToken> {
        if credentials.email.trim().is_empty() {
            return Err(AppError::Auth("email must not be empty".to_string()));
        }
        self.post_for_token("/auth/login", credentials).await
    }

    async fn register(&self, registration: &Registration) -> AppResult<AccessToken> {
        if registration.email.trim().is_empty() {
            return Err(AppError::Auth("email must not be empty".to_string()));
        }
        self.post_for_token("/auth/signup", registration).await
    }
}
