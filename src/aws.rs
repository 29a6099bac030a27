//! AWS configuration for the e2e fixtures
//!
//! Credentials come from the default provider chain (environment, shared
//! profile, SSO, IMDS). The resulting config is passed explicitly to every
//! call that talks to AWS.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use tracing::debug;

/// Fallback region when neither the caller nor the environment sets one
pub const DEFAULT_REGION: &str = "us-west-2";

/// Load the AWS configuration, optionally overriding the region
pub async fn load_aws_config(region: Option<String>) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = region {
        loader = loader.region(Region::new(region));
    }

    let config = loader.load().await;
    if config.region().is_some() {
        debug!(region = ?config.region(), "Loaded AWS config");
        return config;
    }

    debug!(region = DEFAULT_REGION, "No AWS region configured, using default");
    config
        .into_builder()
        .region(Region::new(DEFAULT_REGION))
        .build()
}
