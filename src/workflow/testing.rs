use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use crate::auth::SessionStore;
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::domain::ticket::{Ticket, TicketFilters, TicketStatus};
use crate::domain::user::{AccessToken, Credentials, Registration};
use crate::error::{AppError, AppResult};
use crate::services::{AuthService, TicketSource};

pub struct FakeAuth {
    token: Option<String>,
}

impl FakeAuth {
    pub fn issuing(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
        }
    }

    pub fn rejecting() -> Self {
        Self { token: None }
    }

    fn issue(&self) -> AppResult<AccessToken> {
        self.token
            .clone()
            .map(|access_token| AccessToken { access_token })
            .ok_or_else(|| AppError::Auth("rejected".to_string()))
    }
}

#[async_trait]
impl AuthService for FakeAuth {
    async fn login(&self, _credentials: &Credentials) -> AppResult<AccessToken> {
        self.issue()
    }

    async fn register(&self, _registration: &Registration) -> AppResult<AccessToken> {
        self.issue()
    }
}

#[derive(Clone)]
pub struct FakeTickets {
    tickets: Option<Vec<Ticket>>,
    calls: Arc<Mutex<Vec<(String, TicketFilters)>>>,
}

impl FakeTickets {
    pub fn empty() -> Self {
        Self::with_count(0)
    }

    pub fn with_count(count: usize) -> Self {
        let tickets = (0..count)
            .map(|id| Ticket {
                id: Some(id as i64),
                status: TicketStatus::Open,
                ..Ticket::default()
            })
            .collect();
        Self {
            tickets: Some(tickets),
            calls: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            tickets: None,
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<(String, TicketFilters)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TicketSource for FakeTickets {
    async fn fetch_tickets(&self, token: &str, filters: &TicketFilters) -> AppResult<Vec<Ticket>> {
        self.calls
            .lock()
            .unwrap()
            .push((token.to_string(), *filters));
        self.tickets
            .clone()
            .ok_or_else(|| AppError::SupportApi("connection refused".to_string()))
    }
}

pub fn context_with(auth: FakeAuth, tickets: FakeTickets) -> (AppContext, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let session = SessionStore::at(dir.path().join("session.json"));
    let ctx = AppContext::new(
        AppConfig::default(),
        session,
        Arc::new(auth),
        Arc::new(tickets),
    );
    (ctx, dir)
}

pub fn signed_in(ctx: &AppContext, token: &str) {
    ctx.session
        .save(&AccessToken {
            access_token: token.to_string(),
        })
        .unwrap();
}
