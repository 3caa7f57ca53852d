//! influxjoin
//!
//! Derives the cluster join options for the local InfluxDB pod from the
//! set of running peer pods and writes them to the env file influxd reads
//! at startup.

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use influxjoin_cli::{envfile, hostip, registry::PodRegistry};
use influxjoin_core::{join_directive, select_peers, CLUSTER_PORT, MAX_JOIN_PEERS};
use kube::{Client, Config};
use std::path::{Path, PathBuf};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Env file read by influxd's startup script.
const DEFAULT_ENV_FILE: &str = "/etc/default/influxdb";

#[derive(Parser)]
#[command(name = "influxjoin")]
#[command(about = "Derive InfluxDB cluster join options from the Kubernetes pod registry")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the join options file for the local pod (in-cluster)
    Join {
        #[command(flatten)]
        discovery: DiscoveryArgs,

        /// Path of the env file to write
        #[arg(long, default_value = DEFAULT_ENV_FILE)]
        output: PathBuf,
    },
    /// Print the join options without writing them, via a kubectl proxy
    Test {
        #[command(flatten)]
        discovery: DiscoveryArgs,

        /// Local API proxy address (start one with "kubectl proxy --port 8080 &")
        #[arg(long, env = "LOCAL_PROXY")]
        proxy: Option<String>,
    },
}

#[derive(Args)]
struct DiscoveryArgs {
    /// Namespace the InfluxDB pods run in
    #[arg(long, env = "NAMESPACE")]
    namespace: String,

    /// Label selectors identifying the InfluxDB pods, e.g. "app=influxdb,type=raft"
    #[arg(long, env = "INFLUXDB_POD_SELECTORS")]
    selectors: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Install rustls crypto provider
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Join { discovery, output } => run_join(discovery, &output).await,
        Commands::Test { discovery, proxy } => run_test(discovery, proxy).await,
    }
}

/// In-cluster flow: derive the directive and replace the env file.
async fn run_join(discovery: DiscoveryArgs, output: &Path) -> anyhow::Result<()> {
    let config =
        Config::incluster().context("unable to load the in-cluster Kubernetes configuration")?;
    let client = Client::try_from(config).context("unable to build a Kubernetes client")?;

    let directive = derive_directive(client, &discovery).await?;
    envfile::write_env_file(output, &directive)?;
    Ok(())
}

/// Local debugging flow: same derivation through a kubectl proxy, printed
/// instead of written.
async fn run_test(discovery: DiscoveryArgs, proxy: Option<String>) -> anyhow::Result<()> {
    let Some(proxy) = proxy else {
        bail!(
            "LOCAL_PROXY is not set; point it at a local API proxy, \
             e.g. LOCAL_PROXY=\"http://localhost:8080\" after running \"kubectl proxy --port 8080 &\""
        );
    };

    let url = proxy
        .parse()
        .with_context(|| format!("invalid proxy address {proxy:?}"))?;
    let mut config = Config::new(url);
    config.accept_invalid_certs = true;
    let client = Client::try_from(config).context("unable to build a Kubernetes client")?;

    let directive = derive_directive(client, &discovery).await?;
    println!("Content of {DEFAULT_ENV_FILE}: {directive}");
    Ok(())
}

/// The one-shot pipeline both subcommands share: registry snapshot, local
/// address, peer selection, directive rendering.
async fn derive_directive(client: Client, discovery: &DiscoveryArgs) -> anyhow::Result<String> {
    let registry = PodRegistry::new(client, &discovery.namespace);
    let candidates = registry.running_pod_ips(&discovery.selectors).await?;

    let host_ip = hostip::external_ipv4()?.to_string();
    let peers = select_peers(&host_ip, candidates, MAX_JOIN_PEERS);
    info!(host_ip = %host_ip, peer_count = peers.len(), "Selected join peers");

    Ok(join_directive(&host_ip, &peers, CLUSTER_PORT))
}
