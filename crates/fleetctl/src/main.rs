//! Fleetctl - operator CLI for fleet provisioning and remote jobs.

mod config;

use anyhow::bail;
use clap::{Parser, Subcommand};
use config::FleetConfig;
use fleetlink_dispatch::{Dispatcher, IntervalPacer, NoPacer, Pacer, RestTransport};
use fleetlink_provision::{BulkOutcome, DevicePreset, Provisioner, LAB_CLUSTER_ID};
use fleetlink_routing::{AddressRegistry, Stage};
use fleetlink_schema::{builtin_polling_configs, Job};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "fleetctl")]
#[command(
    author,
    version,
    about = "Provision fleet targets and run remote jobs"
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the remote service endpoint (overrides config file)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Delay between successive submissions in milliseconds (overrides
    /// config file; 0 disables pacing)
    #[arg(long, global = true)]
    pacing_ms: Option<u64>,

    /// Keep going after a failed submission instead of aborting the batch
    #[arg(long, global = true)]
    continue_on_error: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Provision the k8s cluster target
    AddCluster {
        /// Cluster id
        #[arg(long, default_value = LAB_CLUSTER_ID)]
        id: String,
    },

    /// Provision a preset of device targets as one bulk submission
    AddDevices {
        /// Preset name (base, cluster, site1..site3, 500, 1k..30k, all)
        #[arg(long)]
        preset: String,
    },

    /// Submit the built-in polling-configuration catalogue
    AddPolling,

    /// Execute a remote job and print its output
    Exec {
        /// Resource to operate on (node, pod, deployment, stateful-set,
        /// daemon-set, service, namespace, network-policy, logs)
        resource: String,

        /// Target id
        #[arg(long, default_value = LAB_CLUSTER_ID)]
        target: String,

        /// Host id within the target
        #[arg(long, default_value = LAB_CLUSTER_ID)]
        host: String,

        /// Namespace scope
        #[arg(long)]
        namespace: Option<String>,

        /// Resource name
        #[arg(long)]
        name: Option<String>,
    },

    /// Print the routing table
    Routes,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    let mut config = match &cli.config {
        Some(path) => FleetConfig::load(path)?,
        None => FleetConfig::default(),
    };
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(pacing_ms) = cli.pacing_ms {
        config.pacing_ms = pacing_ms;
    }
    if cli.continue_on_error {
        config.fail_fast = false;
    }

    if let Commands::Routes = cli.command {
        print_routes();
        return Ok(());
    }

    let transport = RestTransport::new(&config.base_url)?;
    let dispatcher = Dispatcher::new(Arc::new(transport));
    let pacer: Arc<dyn Pacer> = if config.pacing_ms == 0 {
        Arc::new(NoPacer)
    } else {
        Arc::new(IntervalPacer::new(Duration::from_millis(config.pacing_ms)))
    };
    let provisioner = Provisioner::new(dispatcher, pacer, config.fail_fast);

    match cli.command {
        Commands::AddCluster { id } => {
            provisioner.add_cluster(&id).await?;
        }

        Commands::AddDevices { preset } => {
            let preset = DevicePreset::from_str(&preset)?;
            match provisioner.add_devices(preset).await? {
                BulkOutcome::Empty => println!("No devices in preset"),
                BulkOutcome::Submitted { count, ack } => {
                    println!("Submitted {} targets, {} accepted", count, ack.accepted);
                }
            }
        }

        Commands::AddPolling => {
            let catalogue = builtin_polling_configs();
            info!("submitting {} polling configs", catalogue.len());
            let report = provisioner.add_polling_configs(&catalogue).await?;
            println!("Added {} polling configs", report.added.len());
            for (name, error) in &report.failed {
                println!("  failed {}: {}", name, error);
            }
        }

        Commands::Exec {
            resource,
            target,
            host,
            namespace,
            name,
        } => {
            let job = build_job(&resource, &target, &host, namespace, name)?;
            let result = provisioner.execute_job(&job).await?;
            println!("{}", String::from_utf8_lossy(&result));
        }

        Commands::Routes => unreachable!(),
    }

    Ok(())
}

fn build_job(
    resource: &str,
    target: &str,
    host: &str,
    namespace: Option<String>,
    name: Option<String>,
) -> anyhow::Result<Job> {
    let need_name = || {
        name.clone()
            .ok_or_else(|| anyhow::anyhow!("--name is required for {}", resource))
    };
    let need_namespace = || {
        namespace
            .clone()
            .ok_or_else(|| anyhow::anyhow!("--namespace is required for {}", resource))
    };

    let job = match resource {
        "node" => Job::node_details(target, host, &need_name()?),
        "pod" => Job::pod_details(target, host, &need_namespace()?, &need_name()?),
        "deployment" => Job::deployment_details(target, host, &need_namespace()?, &need_name()?),
        "stateful-set" => {
            Job::stateful_set_details(target, host, &need_namespace()?, &need_name()?)
        }
        "daemon-set" => Job::daemon_set_details(target, host, &need_namespace()?, &need_name()?),
        "service" => Job::service_details(target, host, &need_namespace()?, &need_name()?),
        "namespace" => Job::namespace_details(target, host, &need_namespace()?),
        "network-policy" => {
            Job::network_policy_details(target, host, &need_namespace()?, &need_name()?)
        }
        "logs" => Job::logs(target, host, &need_namespace()?, &need_name()?),
        _ => bail!("unknown resource: {}", resource),
    };
    Ok(job)
}

fn print_routes() {
    let registry = AddressRegistry::builtin();
    for link in registry.link_types() {
        println!("{}", link);
        for stage in Stage::ALL {
            println!("  {:<9} -> {}", stage.to_string(), registry.resolve(link, stage));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_job_requires_scope_args() {
        assert!(build_job("pod", "lab", "lab", None, None).is_err());
        assert!(build_job(
            "pod",
            "lab",
            "lab",
            Some("kube-system".to_string()),
            Some("kube-dns".to_string())
        )
        .is_ok());
        assert!(build_job("disk", "lab", "lab", None, None).is_err());
    }

    #[test]
    fn test_build_job_namespace_only_resources() {
        let job = build_job(
            "namespace",
            "lab",
            "lab",
            Some("kube-system".to_string()),
            None,
        )
        .unwrap();
        assert_eq!(job.name.as_deref(), Some("kube-system"));
    }
}
