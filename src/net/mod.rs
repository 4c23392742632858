//! Network access
//!
//! - [`http`] - HTTP client used for remote resource fetches
//! - [`error`] - Classification of failed loads into user-facing messages

pub mod error;
pub mod http;
