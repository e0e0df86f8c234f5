//! HTTP handlers, grouped by resource.

pub mod credits;
pub mod images;
