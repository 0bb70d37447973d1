// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! JSON Patch generation for attaching the pull secret to a Pod.

use crate::constants::admission::IMAGE_PULL_SECRETS_PATH;
use crate::constants::secret;
use json_patch::jsonptr::PointerBuf;
use json_patch::{AddOperation, Patch};
use serde_json::json;

/// The two patch operations the webhook emits. Both become an RFC 6902 `add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOperation {
    /// Create `imagePullSecrets` holding only the pull secret
    AddArray,
    /// Insert the pull secret at `index` of an existing `imagePullSecrets`
    AppendElement { index: usize },
}

impl PatchOperation {
    pub fn path(&self) -> PointerBuf {
        let mut path = PointerBuf::from_tokens(IMAGE_PULL_SECRETS_PATH);
        if let PatchOperation::AppendElement { index } = self {
            path.push_back(index.to_string());
        }
        path
    }
}

impl From<PatchOperation> for json_patch::PatchOperation {
    fn from(op: PatchOperation) -> Self {
        let value = match op {
            PatchOperation::AddArray => json!([{ "name": secret::NAME }]),
            PatchOperation::AppendElement { .. } => json!({ "name": secret::NAME }),
        };
        json_patch::PatchOperation::Add(AddOperation {
            path: op.path(),
            value,
        })
    }
}

/// The patch for a Pod that currently references `existing_pull_secrets` pull secrets.
/// Always a single operation.
pub fn generate_patch(existing_pull_secrets: usize) -> Vec<PatchOperation> {
    let op = match existing_pull_secrets {
        0 => PatchOperation::AddArray,
        index => PatchOperation::AppendElement { index },
    };
    vec![op]
}

/// [`generate_patch`] as an RFC 6902 document
pub fn pull_secret_patch(existing_pull_secrets: usize) -> Patch {
    Patch(
        generate_patch(existing_pull_secrets)
            .into_iter()
            .map(Into::into)
            .collect(),
    )
}
