// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes client creation

use crate::constants::client::TIMEOUT_SECS;
use crate::error::{InjectorError, Result};
use kube::{Client, Config as KConfig};
use std::time::Duration;
use tracing::{debug, instrument};

/// Create a client from the in-cluster service account or the local kubeconfig.
///
/// Every API call made through it is bounded by [`TIMEOUT_SECS`].
#[instrument]
pub async fn create_client() -> Result<Client> {
    let mut config = KConfig::infer()
        .await
        .map_err(|e| InjectorError::KubeconfigError(format!("Failed to infer config: {}", e)))?;

    apply_timeouts(&mut config);
    debug!("Using Kubernetes API at {}", config.cluster_url);

    Client::try_from(config)
        .map_err(|e| InjectorError::KubeconfigError(format!("Failed to create client: {}", e)))
}

fn apply_timeouts(config: &mut KConfig) {
    let timeout = Some(Duration::from_secs(TIMEOUT_SECS));
    config.connect_timeout = timeout;
    config.read_timeout = timeout;
    config.write_timeout = timeout;
}
