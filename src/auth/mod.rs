pub mod session;
pub mod token;

pub use session::SessionStore;
pub use token::verify_token;
