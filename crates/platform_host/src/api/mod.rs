//! Desktop persistence API contract: wire records, errors, and the host service trait.

pub mod error;
pub mod memory;
pub mod service;
pub mod types;
