//! clipstream API service
//!
//! The HTTP backend of the clipstream platform. Its one engineered flow is
//! user registration: multipart extraction, validation, duplicate detection,
//! media upload with partial-failure handling, and a uniform success/error
//! envelope around every handler.

pub mod config;
pub mod error;
pub mod media;
pub mod models;
pub mod repositories;
pub mod response;
pub mod routes;
pub mod state;
