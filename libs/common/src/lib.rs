//! Shared infrastructure for the clipstream services
//!
//! This crate holds what a service needs before it can do anything useful:
//! PostgreSQL pool construction with environment-driven configuration, a
//! connectivity health check, and the error surface of that plumbing.

pub mod database;
pub mod error;
