//! Flags shared by every e2e suite
//!
//! The flag names match the ones passed by the CAPA e2e make targets, so the
//! same invocation works against this harness.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser};
use tracing::debug;

use capa_e2e_common::{Error, Result};

/// Default cluster template used when no flavor-specific template is given
pub const DEFAULT_SOURCE_TEMPLATE: &str =
    "infrastructure-aws/withoutclusterclass/generated/cluster-template.yaml";

/// Settings bound from the e2e command line
#[derive(Args, Debug, Clone, PartialEq)]
pub struct E2eSettings {
    /// Path to the e2e config file
    #[arg(long = "config-path")]
    pub config_path: Option<PathBuf>,

    /// Folder where e2e test artifact should be stored
    #[arg(long = "artifacts-folder")]
    pub artifact_folder: Option<PathBuf>,

    /// Use the latest build from the main branch of the Kubernetes repository
    #[arg(long = "kubetest.use-ci-artifacts")]
    pub use_ci_artifacts: bool,

    /// Path to the kubetest configuration file
    #[arg(long = "kubetest.config-file")]
    pub kubetest_config_file_path: Option<PathBuf>,

    /// Number of ginkgo nodes to use
    #[arg(
        long = "kubetest.ginkgo-nodes",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub ginkgo_nodes: u32,

    /// Time in s before spec is marked as slow
    #[arg(long = "kubetest.ginkgo-slowSpecThreshold", default_value_t = 120)]
    pub ginkgo_slow_spec_threshold: u64,

    /// If true, the test uses the current cluster instead of creating a new one (default discovery rules apply)
    #[arg(long = "use-existing-cluster")]
    pub use_existing_cluster: bool,

    /// If true, the resource cleanup after tests will be skipped
    #[arg(long = "skip-cleanup")]
    pub skip_cleanup: bool,

    /// If true, an AWS CloudFormation stack will not be deleted
    #[arg(long = "skip-cloudformation-deletion")]
    pub skip_cloudformation_deletion: bool,

    /// If true, an AWS CloudFormation stack will not be created
    #[arg(long = "skip-cloudformation-creation")]
    pub skip_cloudformation_creation: bool,

    /// If true, the requesting of quotas for aws services will be skipped
    #[arg(long = "skip-quotas")]
    pub skip_quotas: bool,

    /// Path to the data folder
    #[arg(long = "data-folder")]
    pub data_folder: Option<PathBuf>,

    /// Path to the cluster template
    #[arg(long = "source-template", default_value = DEFAULT_SOURCE_TEMPLATE)]
    pub source_template: PathBuf,
}

impl E2eSettings {
    /// Time after which a spec is reported as slow
    pub fn slow_spec_threshold(&self) -> Duration {
        Duration::from_secs(self.ginkgo_slow_spec_threshold)
    }

    /// Check that every path flag that was given exists
    pub fn validate(&self) -> Result<()> {
        check_path("config-path", self.config_path.as_deref())?;
        check_path("kubetest.config-file", self.kubetest_config_file_path.as_deref())?;
        check_path("data-folder", self.data_folder.as_deref())?;
        Ok(())
    }
}

fn check_path(flag: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) if !path.exists() => Err(Error::missing_path(flag, path)),
        _ => Ok(()),
    }
}

#[derive(Parser, Debug)]
#[command(name = "capa-e2e", no_binary_name = true)]
struct SettingsParser {
    #[command(flatten)]
    settings: E2eSettings,
}

/// State shared by the suites of one e2e run
#[derive(Debug, Clone)]
pub struct E2eContext {
    /// Settings from the command line
    pub settings: E2eSettings,
}

impl E2eContext {
    /// Create a context from already-parsed settings
    pub fn new(settings: E2eSettings) -> Result<Self> {
        settings.validate()?;
        debug!(
            config_path = ?settings.config_path,
            ginkgo_nodes = settings.ginkgo_nodes,
            skip_quotas = settings.skip_quotas,
            "Created e2e context"
        );
        Ok(Self { settings })
    }

    /// Parse flags (without the binary name) and create a context
    pub fn from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let parsed =
            SettingsParser::try_parse_from(args).map_err(|e| Error::settings(e.to_string()))?;
        Self::new(parsed.settings)
    }
}
