//! AWS service quotas the e2e suites need before provisioning
//!
//! Service codes and quota codes can be looked up in the Service Quotas
//! console: https://us-west-1.console.aws.amazon.com/servicequotas/home/services

use std::collections::BTreeMap;

use serde::Serialize;

/// A provider service quota and the minimum value the suites need
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceQuota {
    /// Service code (e.g., "ec2", "vpc")
    pub service_code: String,
    /// Human readable quota name as shown by the Service Quotas API
    pub quota_name: String,
    /// Quota code (e.g., "L-DB2E81BA")
    pub quota_code: String,
    /// Smallest applied value that lets the full suite run
    pub desired_minimum_value: i64,
}

impl ServiceQuota {
    fn new(service_code: &str, quota_name: &str, quota_code: &str, desired: i64) -> Self {
        Self {
            service_code: service_code.to_string(),
            quota_name: quota_name.to_string(),
            quota_code: quota_code.to_string(),
            desired_minimum_value: desired,
        }
    }

    /// Whether an applied quota value meets the desired minimum
    pub fn is_satisfied_by(&self, actual: f64) -> bool {
        actual >= self.desired_minimum_value as f64
    }

    /// How far an applied quota value falls short, or None if it is enough
    pub fn shortfall(&self, actual: f64) -> Option<f64> {
        if self.is_satisfied_by(actual) {
            None
        } else {
            Some(self.desired_minimum_value as f64 - actual)
        }
    }
}

/// The quotas to check, keyed by short resource id
///
/// Builds a new map on every call so callers are free to mutate their copy.
pub fn limited_resources() -> BTreeMap<String, ServiceQuota> {
    [
        (
            "igw",
            ServiceQuota::new("vpc", "Internet gateways per Region", "L-A4707A72", 20),
        ),
        (
            "ngw",
            ServiceQuota::new(
                "vpc",
                "NAT gateways per Availability Zone",
                "L-FE5A380F",
                20,
            ),
        ),
        (
            "vpc",
            ServiceQuota::new("vpc", "VPCs per Region", "L-F678F1CE", 25),
        ),
        (
            "ec2-normal",
            ServiceQuota::new(
                "ec2",
                "Running On-Demand Standard (A, C, D, H, I, M, R, T, Z) instances",
                "L-1216C47A",
                128,
            ),
        ),
        (
            "eip",
            ServiceQuota::new("ec2", "EC2-VPC Elastic IPs", "L-0263D0A3", 100),
        ),
        (
            "classiclb",
            ServiceQuota::new(
                "elasticloadbalancing",
                "Classic Load Balancers per Region",
                "L-E9E9831D",
                20,
            ),
        ),
        (
            "ec2-GPU",
            ServiceQuota::new(
                "ec2",
                "Running On-Demand G and VT instances",
                "L-DB2E81BA",
                8,
            ),
        ),
        (
            "volume-GP2",
            ServiceQuota::new(
                "ebs",
                "Storage for General Purpose SSD (gp2) volumes, in TiB",
                "L-D18FCD1D",
                50,
            ),
        ),
        (
            "eventBridge-rules",
            ServiceQuota::new(
                "events",
                "Maximum number of rules an account can have per event bus",
                "L-244521F2",
                500,
            ),
        ),
    ]
    .into_iter()
    .map(|(id, quota)| (id.to_string(), quota))
    .collect()
}
