//! # Users Module
//!
//! Free-form user profile storage and account detail updates.

pub mod handlers;
pub mod models;
pub mod routes;

#[cfg(test)]
mod tests;

pub use routes::users_routes;
