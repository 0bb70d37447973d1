// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes client creation and the API-backed secret store.

pub mod client;
pub mod secrets;

pub use client::create_client;
pub use secrets::KubeSecretStore;
