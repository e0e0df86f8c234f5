//! Domain logic for the Artifex image-generation broker.
//!
//! This crate is pure: no I/O, no async. It holds the error taxonomy,
//! the size-class to pixel-dimension mapping, and the credit refill
//! policy that the API broker applies through the persistence layer.

pub mod credits;
pub mod error;
pub mod size;
pub mod types;
