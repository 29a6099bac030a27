//! Common types for the CAPA e2e fixtures: constants, errors, quotas and
//! environment helpers

#![deny(missing_docs)]

pub mod env;
pub mod error;
pub mod quota;
pub mod telemetry;

pub use error::Error;
pub use quota::{limited_resources, ServiceQuota};

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

// =============================================================================
// AWS defaults
// =============================================================================

/// EC2 key pair used by test clusters unless overridden
pub const DEFAULT_SSH_KEY_PAIR_NAME: &str = "cluster-api-provider-aws-sigs-k8s-io";

/// Name prefix of the published CAPA Ubuntu AMIs
pub const AMI_PREFIX: &str = "capa-ami-ubuntu-24.04-";

/// AWS account that owns the published CAPA AMIs
pub const DEFAULT_IMAGE_LOOKUP_ORG: &str = "819546954734";

/// Lock file tracking resource usage across parallel test processes
pub const RESOURCE_QUOTA_FILE_PATH: &str = "/tmp/capa-e2e-resource-usage.lock";

/// Topology label the out-of-tree EBS CSI driver puts on nodes
pub const STORAGE_CLASS_OUT_TREE_ZONE_LABEL: &str = "topology.ebs.csi.aws.com/zone";

// =============================================================================
// Environment variable keys
// =============================================================================
// Keys read from the e2e config or the process environment by the test suites.

/// Kubernetes version of workload clusters
pub const KUBERNETES_VERSION: &str = "KUBERNETES_VERSION";
/// Kubernetes version of the management cluster
pub const KUBERNETES_VERSION_MANAGEMENT: &str = "KUBERNETES_VERSION_MANAGEMENT";
/// Path to the CNI manifest
pub const CNI_PATH: &str = "CNI";
/// Name of the ClusterResourceSet resources carrying the CNI
pub const CNI_RESOURCES: &str = "CNI_RESOURCES";
/// EKS VPC CNI addon version
pub const CNI_ADDON_VERSION: &str = "VPC_ADDON_VERSION";
/// Path to the workload used by the garbage-collection tests
pub const GC_WORKLOAD_PATH: &str = "GC_WORKLOAD";
/// EKS kube-proxy addon version
pub const KUBE_PROXY_ADDON_VERSION: &str = "KUBE_PROXY_ADDON_VERSION";
/// Instance type of worker machines
pub const AWS_NODE_MACHINE_TYPE: &str = "AWS_NODE_MACHINE_TYPE";
/// First availability zone used by multi-AZ tests
pub const AWS_AVAILABILITY_ZONE_1: &str = "AWS_AVAILABILITY_ZONE_1";
/// Second availability zone used by multi-AZ tests
pub const AWS_AVAILABILITY_ZONE_2: &str = "AWS_AVAILABILITY_ZONE_2";
/// vCPU usage per machine, used for quota accounting
pub const INSTANCE_VCPU: &str = "AWS_MACHINE_TYPE_VCPU_USAGE";
/// Prefix of every multi-tenancy role variable
pub const MULTI_TENANCY: &str = "MULTI_TENANCY_";
/// EKS version an upgrade test starts from
pub const EKS_UPGRADE_FROM_VERSION: &str = "UPGRADE_FROM_VERSION";
/// EKS version an upgrade test ends on
pub const EKS_UPGRADE_TO_VERSION: &str = "UPGRADE_TO_VERSION";
/// Kubernetes version a classic ELB migration test starts from
pub const CLASSIC_ELB_TEST_KUBERNETES_FROM: &str = "CLASSICELB_TEST_KUBERNETES_VERSION_FROM";
/// Kubernetes version a classic ELB migration test ends on
pub const CLASSIC_ELB_TEST_KUBERNETES_TO: &str = "CLASSICELB_TEST_KUBERNETES_VERSION_TO";

// =============================================================================
// Cluster template flavors
// =============================================================================

/// Cluster spread across several availability zones
pub const MULTI_AZ_FLAVOR: &str = "multi-az";
/// Cluster restricted to a subset of availability zones
pub const LIMIT_AZ_FLAVOR: &str = "limit-az";
/// Workers on spot instances
pub const SPOT_INSTANCES_FLAVOR: &str = "spot-instances";
/// Nodes bootstrapped through SSM instead of SSH
pub const SSM_FLAVOR: &str = "ssm";
/// ClusterClass based topology
pub const TOPOLOGY_FLAVOR: &str = "topology";
/// Self-hosted cluster built from a ClusterClass
pub const SELF_HOSTED_CLUSTER_CLASS_FLAVOR: &str = "self-hosted-clusterclass";
/// Upgrade from the latest release to main
pub const UPGRADE_TO_MAIN: &str = "upgrade-to-main";
/// Out-of-tree cloud provider
pub const EXTERNAL_CLOUD_PROVIDER: &str = "external-cloud-provider";
/// Single assumed role
pub const SIMPLE_MULTITENANCY_FLAVOR: &str = "simple-multitenancy";
/// Role chained through a jump role
pub const NESTED_MULTITENANCY_FLAVOR: &str = "nested-multitenancy";
/// Chained roles with a ClusterClass
pub const NESTED_MULTITENANCY_CLUSTER_CLASS_FLAVOR: &str = "nested-multitenancy-clusterclass";
/// Control plane scale-in
pub const KCP_SCALE_IN_FLAVOR: &str = "kcp-scale-in";
/// Ignition bootstrap format
pub const IGNITION_FLAVOR: &str = "ignition";
/// GPU workers
pub const GPU_FLAVOR: &str = "gpu";
/// EFS CSI driver installed
pub const EFS_SUPPORT: &str = "efs-support";
/// In-tree cloud provider
pub const INTREE_CLOUD_PROVIDER: &str = "intree-cloud-provider";

/// Every cluster template flavor the suites know about
pub const FLAVORS: &[&str] = &[
    MULTI_AZ_FLAVOR,
    LIMIT_AZ_FLAVOR,
    SPOT_INSTANCES_FLAVOR,
    SSM_FLAVOR,
    TOPOLOGY_FLAVOR,
    SELF_HOSTED_CLUSTER_CLASS_FLAVOR,
    UPGRADE_TO_MAIN,
    EXTERNAL_CLOUD_PROVIDER,
    SIMPLE_MULTITENANCY_FLAVOR,
    NESTED_MULTITENANCY_FLAVOR,
    NESTED_MULTITENANCY_CLUSTER_CLASS_FLAVOR,
    KCP_SCALE_IN_FLAVOR,
    IGNITION_FLAVOR,
    GPU_FLAVOR,
    EFS_SUPPORT,
    INTREE_CLOUD_PROVIDER,
];
