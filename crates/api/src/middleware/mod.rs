//! Request-scoped extractors used across handlers.

pub mod auth;
