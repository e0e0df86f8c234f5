//! Shared response envelope types for API handlers.
//!
//! Read endpoints use a `{ "data": ... }` envelope. The generate
//! endpoint is the exception: it returns the flat
//! `{ imageUrl, creditsRemaining }` object that is the external
//! contract of the broker.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
