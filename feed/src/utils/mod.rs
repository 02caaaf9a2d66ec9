//! # Utility Functions
//!
//! ## Modules
//!
//! - **[`validation`]**: Input validation (comment text, session usernames)
//!
//! ## Related Modules
//!
//! - [`shared::utils`]: URL helpers shared with the DTO crate
//! - [`crate::core`]: Core abstractions and error types

pub mod validation;
