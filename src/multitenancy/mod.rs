//! Multi-tenancy roles
//!
//! The multi-tenancy suites run clusters whose AWSClusterRoleIdentity assumes
//! pre-created IAM roles. Each role is identified by a short tag; every other
//! name (IAM role, identity object, environment variables) derives from it.

mod resolver;

pub use resolver::{IamRoleDirectory, RoleArnCache, RoleDirectory, RoleResolver};

use std::fmt;
use std::str::FromStr;

use capa_e2e_common::{Error, MULTI_TENANCY};

/// Prefix of every multi-tenancy IAM role name
pub const ROLE_NAME_PREFIX: &str = "CAPAMultiTenancy";

/// A role used by the multi-tenancy tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MultitenancyRole {
    /// Role assumed directly by the simple multi-tenancy test
    Simple,
    /// First hop of the nested test
    Jump,
    /// Role assumed through the jump role
    Nested,
}

impl MultitenancyRole {
    /// Every registered role
    pub const ALL: [MultitenancyRole; 3] = [Self::Simple, Self::Jump, Self::Nested];

    /// Short tag for the role
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Simple => "Simple",
            Self::Jump => "Jump",
            Self::Nested => "Nested",
        }
    }

    /// IAM role name (e.g., "CAPAMultiTenancyJump")
    pub fn role_name(&self) -> String {
        format!("{}{}", ROLE_NAME_PREFIX, self.tag())
    }

    /// Name of the AWSClusterRoleIdentity object for the role
    pub fn identity_name(&self) -> String {
        self.role_name().to_lowercase()
    }

    /// Environment variable holding the role ARN
    pub fn env_var_arn(&self) -> String {
        self.env_var("ROLE_ARN")
    }

    /// Environment variable holding the role name
    pub fn env_var_name(&self) -> String {
        self.env_var("ROLE_NAME")
    }

    /// Environment variable holding the identity name
    pub fn env_var_identity(&self) -> String {
        self.env_var("IDENTITY_NAME")
    }

    fn env_var(&self, suffix: &str) -> String {
        format!("{}{}_{}", MULTI_TENANCY, self.tag().to_uppercase(), suffix)
    }
}

impl fmt::Display for MultitenancyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for MultitenancyRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.tag() == s)
            .ok_or_else(|| Error::UnknownRole { tag: s.to_string() })
    }
}
