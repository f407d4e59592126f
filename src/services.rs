pub mod auth;
pub mod bill_service;
pub mod charts;
pub mod summary_service;
