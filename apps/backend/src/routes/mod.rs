//! HTTP route handlers.

pub mod audio;
pub mod auth;
pub mod languages;
pub mod translate;
pub mod user;
pub mod vocabulary;
