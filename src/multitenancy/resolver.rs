//! IAM role ARN resolution for the multi-tenancy roles
//!
//! Each role is looked up in IAM at most once per cache. Concurrent callers
//! asking for the same role wait on a single lookup; callers for different
//! roles never wait on each other. A failed lookup leaves nothing behind, so
//! the next call tries again.

use std::future::Future;
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use aws_config::SdkConfig;
use dashmap::DashMap;
#[cfg(test)]
use mockall::automock;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use capa_e2e_common::env::{set_env_vars_if_unset, EnvVar};
use capa_e2e_common::{Error, Result};

use super::MultitenancyRole;

/// Directory that maps IAM role names to ARNs
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    /// Look up a role by its exact name and return its ARN
    async fn role_arn(&self, role_name: &str) -> Result<String>;
}

/// [`RoleDirectory`] backed by the IAM `GetRole` API
#[derive(Debug, Clone)]
pub struct IamRoleDirectory {
    client: aws_sdk_iam::Client,
}

impl IamRoleDirectory {
    /// Build an IAM client from the given AWS configuration
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_iam::Client::new(config),
        }
    }
}

#[async_trait]
impl RoleDirectory for IamRoleDirectory {
    async fn role_arn(&self, role_name: &str) -> Result<String> {
        let output = self
            .client
            .get_role()
            .role_name(role_name)
            .send()
            .await
            .map_err(|e| Error::role_lookup(role_name, e))?;

        output
            .role()
            .map(|role| role.arn())
            .filter(|arn| !arn.is_empty())
            .map(str::to_string)
            .ok_or_else(|| Error::MissingArn {
                role: role_name.to_string(),
            })
    }
}

/// Role name to ARN cache
///
/// Entries are written once, on the first successful lookup, and never
/// replaced or evicted.
#[derive(Debug, Default)]
pub struct RoleArnCache {
    entries: DashMap<String, Arc<OnceCell<String>>>,
}

impl RoleArnCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached ARN for a role name, if it has been resolved
    pub fn get(&self, role_name: &str) -> Option<String> {
        self.entries
            .get(role_name)
            .and_then(|cell| cell.get().cloned())
    }

    /// Number of resolved roles
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.value().initialized())
            .count()
    }

    /// Whether no role has been resolved yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the cached ARN or run `resolve` to fill it
    ///
    /// Only one `resolve` runs at a time for a given name. An error is returned
    /// to the caller whose `resolve` produced it and the entry stays empty.
    pub async fn get_or_resolve<F, Fut>(&self, role_name: &str, resolve: F) -> Result<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        // Shard guards are released here; only the cell is held across the await.
        let existing = self.entries.get(role_name).map(|cell| Arc::clone(&cell));
        let cell = match existing {
            Some(cell) => cell,
            None => Arc::clone(&self.entries.entry(role_name.to_string()).or_default()),
        };

        cell.get_or_try_init(resolve).await.cloned()
    }
}

/// Resolves multi-tenancy roles and publishes them to the environment
#[derive(Debug, Default)]
pub struct RoleResolver {
    cache: Arc<RoleArnCache>,
}

impl RoleResolver {
    /// Create a resolver over the given cache
    pub fn new(cache: Arc<RoleArnCache>) -> Self {
        Self { cache }
    }

    /// Process-wide resolver shared by every suite in this process
    pub fn shared() -> &'static RoleResolver {
        static SHARED: OnceLock<RoleResolver> = OnceLock::new();
        SHARED.get_or_init(RoleResolver::default)
    }

    /// The cache backing this resolver
    pub fn cache(&self) -> &RoleArnCache {
        &self.cache
    }

    /// Resolve a role's ARN with IAM credentials from `config`
    pub async fn role_arn(&self, role: MultitenancyRole, config: &SdkConfig) -> Result<String> {
        if let Some(arn) = self.cache.get(&role.role_name()) {
            debug!(role = %role, arn = %arn, "Using cached role ARN");
            return Ok(arn);
        }
        self.role_arn_with(role, &IamRoleDirectory::new(config)).await
    }

    /// Resolve a role's ARN through the given directory
    pub async fn role_arn_with<D>(&self, role: MultitenancyRole, directory: &D) -> Result<String>
    where
        D: RoleDirectory + ?Sized,
    {
        let role_name = role.role_name();
        let name = role_name.as_str();

        self.cache
            .get_or_resolve(name, || async move {
                debug!(role = %name, "Looking up IAM role");
                let arn = directory.role_arn(name).await?;
                info!(role = %name, arn = %arn, "Resolved IAM role");
                Ok(arn)
            })
            .await
    }

    /// Resolve a role and export its ARN, role name and identity name
    ///
    /// Nothing is exported if resolution fails. Variables that already have a
    /// value are left untouched.
    pub async fn set_env_vars(&self, role: MultitenancyRole, config: &SdkConfig) -> Result<()> {
        let arn = self.role_arn(role, config).await?;
        self.export(role, &arn);
        Ok(())
    }

    /// Like [`RoleResolver::set_env_vars`], resolving through the given directory
    pub async fn set_env_vars_with<D>(&self, role: MultitenancyRole, directory: &D) -> Result<()>
    where
        D: RoleDirectory + ?Sized,
    {
        let arn = self.role_arn_with(role, directory).await?;
        self.export(role, &arn);
        Ok(())
    }

    /// All three variables go out as one group, so racing resolvers in the
    /// same process cannot mix their values.
    fn export(&self, role: MultitenancyRole, arn: &str) {
        let (arn_key, name_key, identity_key) =
            (role.env_var_arn(), role.env_var_name(), role.env_var_identity());
        let (role_name, identity_name) = (role.role_name(), role.identity_name());

        set_env_vars_if_unset(&[
            EnvVar::public(&arn_key, arn),
            EnvVar::public(&name_key, &role_name),
            EnvVar::public(&identity_key, &identity_name),
        ]);
    }
}
