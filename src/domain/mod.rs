pub mod summary;
pub mod ticket;
pub mod user;
