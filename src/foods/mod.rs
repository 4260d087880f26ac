//! # Foods Module
//!
//! Food intake log: list, add and delete entries per user.

pub mod handlers;
pub mod models;
pub mod routes;

#[cfg(test)]
mod tests;

pub use routes::foods_routes;
