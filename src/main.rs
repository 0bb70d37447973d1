// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use regcred_injector::admission::AdmissionHandler;
use regcred_injector::config::Config;
use regcred_injector::kubernetes::{create_client, KubeSecretStore};
use regcred_injector::server::serve;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting regcred-injector");

    // Any missing value is fatal; the server never starts half-configured
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: server_name={}, registry={}, username={}",
        config.server_name, config.credential.registry, config.credential.username
    );

    // kube and axum-server may pull in different rustls providers
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let client = create_client()
        .await
        .context("Failed to connect to Kubernetes")?;
    info!("Connected to Kubernetes cluster");

    let store = Arc::new(KubeSecretStore::new(client));
    let handler = AdmissionHandler::new(config.credential.clone(), store);

    serve(&config, handler).await?;

    Ok(())
}
