//! vpcbeta - typed client for the VPC beta REST API
//!
//! Every operation is an async method on [`VpcService`] that takes an
//! options struct and returns a [`DetailedResponse`] carrying the decoded
//! result, the status code and the response headers.
//!
//! ```no_run
//! # async fn example() -> vpcbeta::Result<()> {
//! use vpcbeta::{AsPatch, Authenticator, IamAuthenticator, ServiceConfig, VpcService};
//! use vpcbeta::{UpdateVpcOptions, VpcPatch};
//!
//! let iam = IamAuthenticator::new("my-api-key")?;
//! let service = VpcService::new(ServiceConfig::new(Authenticator::Iam(iam)))?;
//!
//! let patch = VpcPatch {
//!     name: "my-vpc-renamed".into(),
//!     ..Default::default()
//! }
//! .as_patch()?;
//! let vpc = service
//!     .update_vpc(&UpdateVpcOptions::new("r006-4727d842-f94f-4a2d-824a-9bc9b02c523b", patch))
//!     .await?;
//! println!("{} is now {}", vpc.result.id, vpc.result.name);
//! # Ok(())
//! # }
//! ```
//!
//! # Module Structure
//!
//! - [`api`] - models and operations, one module per resource family
//! - [`config`] - service configuration and external credential loading
//! - [`core`] - authentication, HTTP round trips and request descriptors
//! - [`error`] - the crate error type
//! - [`pager`] - continuation over paged list operations
//! - [`patch`] - merge-patch documents that tell null from absent
//! - [`service`] - the [`VpcService`] client

pub mod api;
pub mod config;
pub mod core;
pub mod error;
pub mod pager;
pub mod patch;
pub mod service;

pub use api::*;
pub use config::{ExternalConfig, ServiceConfig};
pub use crate::core::auth::{Authenticator, IamAuthenticator};
pub use error::{Error, Result, ServiceError};
pub use pager::{ListRequest, Page, Pager};
pub use patch::{AsPatch, Patch, PatchField};
pub use service::{DetailedResponse, VpcService};
