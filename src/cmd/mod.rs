pub mod config;
pub mod dashboard;
pub mod session;
pub mod tickets;
