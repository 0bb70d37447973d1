// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Secret store backed by the Kubernetes API

use crate::error::Result;
use crate::secrets::SecretStore;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use kube::{
    api::{ListParams, PostParams},
    Api, Client, ResourceExt,
};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct KubeSecretStore {
    client: Client,
}

impl KubeSecretStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api(&self, namespace: &str) -> Api<Secret> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

#[async_trait]
impl SecretStore for KubeSecretStore {
    #[instrument(skip(self))]
    async fn list(&self, namespace: &str) -> Result<Vec<Secret>> {
        let secret_list = self.api(namespace).list(&ListParams::default()).await?;
        debug!("Found {} secrets in {}", secret_list.items.len(), namespace);
        Ok(secret_list.items)
    }

    #[instrument(skip(self, secret), fields(name = %secret.name_any()))]
    async fn create(&self, namespace: &str, secret: &Secret) -> Result<Secret> {
        Ok(self
            .api(namespace)
            .create(&PostParams::default(), secret)
            .await?)
    }

    #[instrument(skip(self, secret), fields(name = %secret.name_any()))]
    async fn update(&self, namespace: &str, secret: &Secret) -> Result<Secret> {
        Ok(self
            .api(namespace)
            .replace(&secret.name_any(), &PostParams::default(), secret)
            .await?)
    }
}
