pub mod auth;
pub mod bills;
pub mod summary;
