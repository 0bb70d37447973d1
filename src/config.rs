// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::constants::server::{DEFAULT_BIND_ADDRESS, DEFAULT_TLS_CERT_PATH, DEFAULT_TLS_KEY_PATH};
use crate::credentials::PullCredential;

/// Webhook configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Name the webhook's TLS certificate is issued for
    pub server_name: String,
    /// Registry credential written into every `regcred` Secret
    pub credential: PullCredential,
    pub tls_cert_path: PathBuf,
    pub tls_key_path: PathBuf,
    pub bind_address: SocketAddr,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    /// Required variables that are unset or empty are an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .with_context(|| format!("{} environment variable not set", key))
        };
        let optional = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let server_name = required("SERVER_NAME")?;
        let credential = PullCredential::new(
            required("DOCKER_USERNAME")?,
            required("DOCKER_PASSWORD")?,
            required("DOCKER_REGISTRY")?,
        );

        let bind_address = optional("BIND_ADDRESS", DEFAULT_BIND_ADDRESS);
        let bind_address = bind_address.parse::<SocketAddr>().with_context(|| {
            format!("BIND_ADDRESS '{}' is not a valid socket address", bind_address)
        })?;

        Ok(Config {
            server_name,
            credential,
            tls_cert_path: optional("TLS_CERT_PATH", DEFAULT_TLS_CERT_PATH).into(),
            tls_key_path: optional("TLS_KEY_PATH", DEFAULT_TLS_KEY_PATH).into(),
            bind_address,
        })
    }
}
