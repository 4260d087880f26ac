//! # Auth Module
//!
//! This module handles all authentication-related functionality including:
//! - Username/password registration and login
//! - Google OAuth login and account linking
//! - JWT token issuance and validation
//! - AuthedUser extractor for protected routes

pub mod extractors;
pub mod google;
pub mod handlers;
pub mod linker;
pub mod models;
pub mod password;
pub mod routes;
pub mod token;


pub use extractors::AuthedUser;
pub use models::User;
pub use routes::auth_routes;
