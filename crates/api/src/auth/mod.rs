//! Authentication: JWT access-token validation.
//!
//! Token issuance belongs to the external identity provider; this
//! service only validates bearer tokens it is handed.

pub mod jwt;
