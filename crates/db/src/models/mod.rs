//! Entity models and DTOs for the persistence layer.

pub mod credit_ledger;
pub mod generated_image;
