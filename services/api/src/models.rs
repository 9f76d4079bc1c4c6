//! Domain models for the API service

pub mod user;

pub use user::{NewUser, PublicUser, UserRecord};
