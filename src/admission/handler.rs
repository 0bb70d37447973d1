// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Admission pipeline: decode, extract the Pod, reconcile the pull secret, patch, respond.

use crate::admission::patch::pull_secret_patch;
use crate::constants::admission::POD_KIND;
use crate::credentials::PullCredential;
use crate::error::{InjectorError, Result};
use crate::secrets::{ReconcileOutcome, SecretReconciler, SecretStore};
use k8s_openapi::api::core::v1::Pod;
use kube::core::admission::{AdmissionRequest, AdmissionResponse, AdmissionReview};
use kube::core::DynamicObject;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Handles Pod admission reviews with a fixed credential
pub struct AdmissionHandler {
    credential: PullCredential,
    reconciler: SecretReconciler,
}

impl AdmissionHandler {
    pub fn new(credential: PullCredential, store: Arc<dyn SecretStore>) -> Self {
        Self {
            credential,
            reconciler: SecretReconciler::new(store),
        }
    }

    /// Run one review through the pipeline.
    ///
    /// Returns [`InjectorError::InvalidReview`] for bodies that are not an AdmissionReview
    /// request and [`InjectorError::InvalidObject`] when the Pod cannot be read. A failed
    /// reconciliation does not fail the review.
    pub async fn review(&self, body: &[u8]) -> Result<AdmissionReview<DynamicObject>> {
        let review: AdmissionReview<DynamicObject> = serde_json::from_slice(body)
            .map_err(|e| InjectorError::InvalidReview(e.to_string()))?;
        let request: AdmissionRequest<DynamicObject> = review
            .try_into()
            .map_err(|e| InjectorError::InvalidReview(format!("{}", e)))?;
        let uid = request.uid.as_str();

        let kind = request.kind.kind.as_str();
        if !kind.is_empty() && kind != POD_KIND {
            debug!(uid, kind, "Not a Pod, admitting unchanged");
            return Ok(AdmissionResponse::from(&request).into_review());
        }

        let pod = pod_of(&request).inspect_err(|e| {
            warn!(uid, error = %e, "Failed to read Pod from admission request");
        })?;

        let namespace = request
            .namespace
            .clone()
            .filter(|ns| !ns.is_empty())
            .or_else(|| pod.metadata.namespace.clone())
            .filter(|ns| !ns.is_empty())
            .unwrap_or_else(|| "default".to_string());
        info!(uid, namespace = %namespace, "Received admission request");

        match self.reconciler.reconcile(&namespace, &self.credential).await {
            ReconcileOutcome::Failed(reason) => {
                warn!(
                    uid,
                    namespace = %namespace,
                    reason = %reason,
                    "Failed to reconcile pull secret, continuing to mutate"
                );
            }
            outcome => debug!(uid, namespace = %namespace, %outcome, "Pull secret reconciled"),
        }

        let existing = pod
            .spec
            .as_ref()
            .and_then(|s| s.image_pull_secrets.as_ref())
            .map_or(0, Vec::len);

        info!(uid, existing_pull_secrets = existing, "Mutating Pod with imagePullSecrets");
        Ok(AdmissionResponse::from(&request)
            .with_patch(pull_secret_patch(existing))?
            .into_review())
    }
}

fn pod_of(request: &AdmissionRequest<DynamicObject>) -> Result<Pod> {
    let object = request
        .object
        .clone()
        .ok_or_else(|| InjectorError::InvalidObject("request carries no object".to_string()))?;
    object
        .try_parse::<Pod>()
        .map_err(|e| InjectorError::InvalidObject(e.to_string()))
}
