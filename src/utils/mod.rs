//! Utility functions shared across layers.
//!
//! - [`url_validator`] - Long URL validation

pub mod url_validator;
