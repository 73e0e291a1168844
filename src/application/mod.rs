//! Application layer services implementing business logic.
//!
//! Services compose the domain codec, the durable store and the cache into the
//! operations HTTP handlers call.
//!
//! # Available Services
//!
//! - [`services::url_service::UrlService`] - Short URL creation and resolution

pub mod services;
