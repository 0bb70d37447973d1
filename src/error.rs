// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InjectorError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Failed to build Kubernetes client: {0}")]
    KubeconfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to build patch: {0}")]
    PatchError(#[from] kube::core::admission::SerializePatchError),

    #[error("Invalid admission review: {0}")]
    InvalidReview(String),

    #[error("Invalid admission object: {0}")]
    InvalidObject(String),

    /// Failure of a [`SecretStore`](crate::secrets::SecretStore) that is not backed by
    /// the kube client. `KubeSecretStore` reports [`InjectorError::KubeError`] instead.
    #[error("Secret store error: {0}")]
    StoreError(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("TLS error: {0}")]
    TlsError(String),

    #[error("Server error: {0}")]
    ServerError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, InjectorError>;
