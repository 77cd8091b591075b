pub mod auth;
pub mod ticket_source;

pub use auth::AuthService;
pub use ticket_source::TicketSource;
