//! Shared errors, domain types and the exchange adapter trait

pub mod errors;
pub mod traits;
pub mod types;
