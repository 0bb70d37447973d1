// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Namespaced secret storage used by the reconciler.

use crate::error::Result;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;

/// A key-value store of Secrets partitioned by namespace.
///
/// The Kubernetes API is the production implementation; anything that can list, create and
/// replace Secrets within a namespace will do.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// All Secrets in `namespace`
    async fn list(&self, namespace: &str) -> Result<Vec<Secret>>;

    /// Create `secret` in `namespace`, failing if it already exists
    async fn create(&self, namespace: &str, secret: &Secret) -> Result<Secret>;

    /// Replace the stored Secret with the same name as `secret`
    async fn update(&self, namespace: &str, secret: &Secret) -> Result<Secret>;
}
