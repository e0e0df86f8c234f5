//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod credit_ledger_repo;
pub mod generated_image_repo;

pub use credit_ledger_repo::CreditLedgerRepo;
pub use generated_image_repo::GeneratedImageRepo;
