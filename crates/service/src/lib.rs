//! Service layer providing business-oriented operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod pagination;
pub mod auth;
pub mod account_service;
pub mod booking_service;
pub mod catalog_service;
pub mod contact_service;
#[cfg(test)]
pub mod test_support;
