//! Kubernetes pod registry queries
//!
//! The set of running pods matching the configured label selector is the
//! registry snapshot the join directive is derived from.

use anyhow::{Context, Result};
use k8s_openapi::api::core::v1::Pod;
use kube::api::{Api, ListParams};
use kube::Client;
use tracing::{debug, info};

/// Phase reported for pods that are scheduled and have started.
const RUNNING_PHASE: &str = "Running";

/// Namespaced view of the InfluxDB pods backing one cluster.
pub struct PodRegistry {
    pods: Api<Pod>,
}

impl PodRegistry {
    pub fn new(client: Client, namespace: &str) -> Self {
        Self {
            pods: Api::namespaced(client, namespace),
        }
    }

    /// Addresses of all pods matching `selectors` that are currently in
    /// the `Running` phase, in API enumeration order.
    ///
    /// The order is whatever the API server returned and is not stable
    /// across calls. Running pods that have not been assigned an IP yet
    /// are skipped.
    pub async fn running_pod_ips(&self, selectors: &str) -> Result<Vec<String>> {
        let params = ListParams::default().labels(selectors);
        let pods = self
            .pods
            .list(&params)
            .await
            .context("unable to retrieve pods")?;

        let ips = collect_running_ips(pods.items);
        info!(
            candidate_count = ips.len(),
            selectors = %selectors,
            "Listed running pods"
        );
        Ok(ips)
    }
}

/// Keep only running pods with an assigned IP, preserving order.
fn collect_running_ips(pods: impl IntoIterator<Item = Pod>) -> Vec<String> {
    let mut ips = Vec::new();
    for pod in pods {
        let Some(status) = pod.status else { continue };
        if status.phase.as_deref() != Some(RUNNING_PHASE) {
            continue;
        }
        match status.pod_ip {
            Some(ip) => ips.push(ip),
            None => debug!(
                pod = pod.metadata.name.as_deref().unwrap_or("<unnamed>"),
                "Skipping running pod without an assigned IP"
            ),
        }
    }
    ips
}
