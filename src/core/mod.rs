//! Request plumbing shared by every operation
//!
//! # Module Structure
//!
//! - [`auth`] - IAM API-key and bearer-token authentication
//! - [`http`] - reqwest wrapper performing single round trips
//! - [`request`] - request descriptors and path-parameter validation

pub mod auth;
pub mod http;
pub mod request;
