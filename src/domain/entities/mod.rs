//! Core domain entities.
//!
//! - [`UrlRecord`] - A stored long URL with its identifier, code and hit count
//! - [`Fetched`] - The pair returned by an atomic fetch-and-increment
//! - [`Resolution`] - Tagged outcome of resolving a short code
//! - [`CachedUrl`] - Value cached under a short-code key

pub mod resolution;
pub mod url_record;

pub use resolution::{CachedUrl, Resolution, ResolutionSource};
pub use url_record::{Fetched, UrlRecord};
