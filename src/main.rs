//! capa-e2e
//!
//! Resolves the multi-tenancy IAM roles for an e2e run and prints them as
//! shell `export` lines, followed by the service quotas the run needs.

use clap::Parser;
use tracing::{info, warn};

use capa_e2e::aws::load_aws_config;
use capa_e2e::{limited_resources, E2eContext, E2eSettings, MultitenancyRole, Result, RoleResolver};
use capa_e2e_common::telemetry::init_tracing;

/// Prepare the environment for CAPA e2e suites
#[derive(Parser, Debug)]
#[command(name = "capa-e2e")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    settings: E2eSettings,

    /// AWS region to resolve roles in
    #[arg(long, env = "AWS_REGION")]
    region: Option<String>,

    /// Only resolve these roles (Simple, Jump, Nested); defaults to all
    #[arg(long = "role", value_parser = parse_role)]
    roles: Vec<MultitenancyRole>,
}

fn parse_role(s: &str) -> std::result::Result<MultitenancyRole, String> {
    s.parse().map_err(|e: capa_e2e::Error| e.to_string())
}

/// Single-quote a value for POSIX shells; embedded quotes become `'\''`
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let ctx = E2eContext::new(cli.settings)?;
    let config = load_aws_config(cli.region).await;

    let roles = if cli.roles.is_empty() {
        MultitenancyRole::ALL.to_vec()
    } else {
        cli.roles
    };

    let resolver = RoleResolver::shared();
    for role in &roles {
        resolver.set_env_vars(*role, &config).await?;
    }

    for role in &roles {
        for key in [role.env_var_arn(), role.env_var_name(), role.env_var_identity()] {
            if let Ok(value) = std::env::var(&key) {
                println!("export {}={}", key, shell_quote(&value));
            }
        }
    }
    info!(roles = roles.len(), "Multi-tenancy roles exported");

    if ctx.settings.skip_quotas {
        warn!("Skipping service quota listing");
        return Ok(());
    }

    // stdout carries only export lines so the output can be eval'd
    let quotas = limited_resources();
    eprintln!("{}", serde_json::to_string_pretty(&quotas)?);
    Ok(())
}
