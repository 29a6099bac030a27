//! CAPA e2e fixtures
//!
//! Shared setup for the Cluster API Provider AWS end-to-end suites.
//!
//! # Modules
//!
//! - [`settings`] - Command-line flags and the e2e context that owns them
//! - [`multitenancy`] - Multi-tenancy roles and their IAM ARN resolution
//! - [`aws`] - AWS configuration loading
//!
//! Constants, errors and the service quota table live in
//! [`capa_e2e_common`] and are re-exported here.

#![deny(missing_docs)]

pub mod aws;
pub mod multitenancy;
pub mod settings;

pub use capa_e2e_common::{limited_resources, Error, Result, ServiceQuota};
pub use multitenancy::{MultitenancyRole, RoleResolver};
pub use settings::{E2eContext, E2eSettings};
