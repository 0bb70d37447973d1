// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Pull-credential Secret storage and reconciliation.

pub mod reconciler;
pub mod store;

pub use reconciler::{credential_secret, ReconcileOutcome, SecretReconciler};
pub use store::SecretStore;
