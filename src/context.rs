use std::sync::Arc;

use crate::auth::SessionStore;
use crate::config::AppConfig;
use crate::services::{AuthService, TicketSource};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub session: SessionStore,
    pub auth: Arc<dyn AuthService>,
    pub tickets: Arc<dyn TicketSource>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        session: SessionStore,
        auth: Arc<dyn AuthService>,
        tickets: Arc<dyn TicketSource>,
    ) -> Self {
        Self {
            config,
            session,
            auth,
            tickets,
        }
    }
}
