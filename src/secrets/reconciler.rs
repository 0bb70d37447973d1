// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Secret reconciler - converges the `regcred` Secret of a namespace to the configured credential.

use crate::constants::secret;
use crate::credentials::{encode, PullCredential};
use crate::error::Result;
use crate::secrets::SecretStore;
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::ByteString;
use kube::api::ObjectMeta;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Result of reconciling one namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The stored Secret already matched, nothing was written
    Unchanged,
    Created,
    /// The stored Secret was replaced in place
    Updated,
    /// The store could not be read or written
    Failed(String),
}

impl ReconcileOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, ReconcileOutcome::Failed(_))
    }
}

impl fmt::Display for ReconcileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconcileOutcome::Unchanged => write!(f, "unchanged"),
            ReconcileOutcome::Created => write!(f, "created"),
            ReconcileOutcome::Updated => write!(f, "updated"),
            ReconcileOutcome::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

pub struct SecretReconciler {
    store: Arc<dyn SecretStore>,
}

impl SecretReconciler {
    pub fn new(store: Arc<dyn SecretStore>) -> Self {
        Self { store }
    }

    /// Create, update or leave alone the `regcred` Secret in `namespace`.
    ///
    /// Errors never escape; they are reported as [`ReconcileOutcome::Failed`].
    #[instrument(skip(self, credential))]
    pub async fn reconcile(
        &self,
        namespace: &str,
        credential: &PullCredential,
    ) -> ReconcileOutcome {
        match self.try_reconcile(namespace, credential).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Reconciling credentials in {} failed: {}", namespace, e);
                ReconcileOutcome::Failed(e.to_string())
            }
        }
    }

    async fn try_reconcile(
        &self,
        namespace: &str,
        credential: &PullCredential,
    ) -> Result<ReconcileOutcome> {
        let desired = encode(credential).to_json()?;

        let existing = self
            .store
            .list(namespace)
            .await?
            .into_iter()
            .find(|s| s.metadata.name.as_deref() == Some(secret::NAME));

        let Some(existing) = existing else {
            info!("Creating credentials in {}", namespace);
            self.store
                .create(namespace, &credential_secret(namespace, desired, None))
                .await?;
            info!("Credential creation in {} succeeded", namespace);
            return Ok(ReconcileOutcome::Created);
        };

        if stored_docker_config(&existing) == Some(desired.as_slice()) {
            debug!("Skipping credentials in {}, already up to date", namespace);
            return Ok(ReconcileOutcome::Unchanged);
        }

        info!("Updating credentials in {}", namespace);
        let resource_version = existing.metadata.resource_version.clone();
        self.store
            .update(namespace, &credential_secret(namespace, desired, resource_version))
            .await?;
        info!("Credential update in {} succeeded", namespace);

        Ok(ReconcileOutcome::Updated)
    }
}

/// Build the `regcred` Secret holding `docker_config`.
///
/// `resource_version` is carried over from the stored object on update so that concurrent
/// writers are detected by the API server.
pub fn credential_secret(
    namespace: &str,
    docker_config: Vec<u8>,
    resource_version: Option<String>,
) -> Secret {
    Secret {
        metadata: ObjectMeta {
            name: Some(secret::NAME.to_string()),
            namespace: Some(namespace.to_string()),
            resource_version,
            ..Default::default()
        },
        data: Some(BTreeMap::from([(
            secret::DOCKER_CONFIG_KEY.to_string(),
            ByteString(docker_config),
        )])),
        type_: Some(secret::TYPE.to_string()),
        ..Default::default()
    }
}

fn stored_docker_config(existing: &Secret) -> Option<&[u8]> {
    existing
        .data
        .as_ref()
        .and_then(|d| d.get(secret::DOCKER_CONFIG_KEY))
        .map(|b| b.0.as_slice())
}
