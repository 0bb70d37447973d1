// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test doubles for the Kubernetes API and the secret store.

use crate::error::{InjectorError, Result};
use crate::secrets::SecretStore;
use async_trait::async_trait;
use http::{Request, Response};
use k8s_openapi::api::core::v1::Secret;
use kube::client::Body;
use kube::{Client, ResourceExt};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// A mock HTTP service that returns predefined responses based on request method and path.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
    requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, status, body)
    }

    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.on("POST", path, status, body)
    }

    pub fn on_put(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PUT", path, status, body)
    }

    fn on(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    /// Method and path of every request received so far
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<
            dyn std::future::Future<Output = std::result::Result<Self::Response, Self::Error>>
                + Send,
        >,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        self.requests
            .lock()
            .unwrap()
            .push((method.clone(), path.clone()));
        let response = self
            .responses
            .lock()
            .unwrap()
            .get(&(method, path))
            .cloned();

        Box::pin(async move {
            let (status, body) = response
                .unwrap_or_else(|| (404, status_json(404, "NotFound", "not found")));
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// A Kubernetes `Status` failure body
pub fn status_json(code: u16, reason: &str, message: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "metadata": {},
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}

/// A `SecretList` body containing `secrets`
pub fn secret_list_json(secrets: &[Secret]) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "SecretList",
        "metadata": { "resourceVersion": "1" },
        "items": secrets
    })
    .to_string()
}

/// A single `Secret` body
pub fn secret_json(secret: &Secret) -> String {
    let mut value = serde_json::to_value(secret).unwrap();
    value["apiVersion"] = "v1".into();
    value["kind"] = "Secret".into();
    value.to_string()
}

/// An in-memory secret store keyed by namespace and name.
#[derive(Default)]
pub struct InMemorySecretStore {
    secrets: Mutex<BTreeMap<(String, String), Secret>>,
    calls: AtomicUsize,
    writes: AtomicUsize,
}

impl InMemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a secret without counting it as a write
    pub fn insert(&self, namespace: &str, secret: Secret) {
        self.secrets
            .lock()
            .unwrap()
            .insert((namespace.to_string(), secret.name_any()), secret);
    }

    pub fn get(&self, namespace: &str, name: &str) -> Option<Secret> {
        self.secrets
            .lock()
            .unwrap()
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
    }

    pub fn secrets_in(&self, namespace: &str) -> Vec<Secret> {
        self.secrets
            .lock()
            .unwrap()
            .iter()
            .filter(|((ns, _), _)| ns == namespace)
            .map(|(_, s)| s.clone())
            .collect()
    }

    /// Number of store operations of any kind
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of successful create and update operations
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecretStore for InMemorySecretStore {
    async fn list(&self, namespace: &str) -> Result<Vec<Secret>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.secrets_in(namespace))
    }

    async fn create(&self, namespace: &str, secret: &Secret) -> Result<Secret> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut secrets = self.secrets.lock().unwrap();
        let key = (namespace.to_string(), secret.name_any());
        if secrets.contains_key(&key) {
            return Err(InjectorError::StoreError(format!(
                "secret {}/{} already exists",
                key.0, key.1
            )));
        }
        secrets.insert(key, secret.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(secret.clone())
    }

    async fn update(&self, namespace: &str, secret: &Secret) -> Result<Secret> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut secrets = self.secrets.lock().unwrap();
        let key = (namespace.to_string(), secret.name_any());
        let Some(stored) = secrets.get_mut(&key) else {
            return Err(InjectorError::StoreError(format!(
                "secret {}/{} not found",
                key.0, key.1
            )));
        };
        *stored = secret.clone();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(secret.clone())
    }
}

/// A secret store that rejects every operation
pub struct FailingSecretStore;

#[async_trait]
impl SecretStore for FailingSecretStore {
    async fn list(&self, namespace: &str) -> Result<Vec<Secret>> {
        Err(InjectorError::StoreError(format!(
            "permission denied listing secrets in {}",
            namespace
        )))
    }

    async fn create(&self, namespace: &str, _secret: &Secret) -> Result<Secret> {
        Err(InjectorError::StoreError(format!(
            "permission denied creating secret in {}",
            namespace
        )))
    }

    async fn update(&self, namespace: &str, _secret: &Secret) -> Result<Secret> {
        Err(InjectorError::StoreError(format!(
            "permission denied updating secret in {}",
            namespace
        )))
    }
}

/// A secret store whose operations never complete
pub struct HangingSecretStore;

#[async_trait]
impl SecretStore for HangingSecretStore {
    async fn list(&self, _namespace: &str) -> Result<Vec<Secret>> {
        std::future::pending().await
    }

    async fn create(&self, _namespace: &str, _secret: &Secret) -> Result<Secret> {
        std::future::pending().await
    }

    async fn update(&self, _namespace: &str, _secret: &Secret) -> Result<Secret> {
        std::future::pending().await
    }
}

/// An AdmissionReview request for an object of `kind` in `namespace`
pub fn admission_review_json(
    uid: &str,
    kind: serde_json::Value,
    namespace: &str,
    object: serde_json::Value,
) -> serde_json::Value {
    serde_json::json!({
        "apiVersion": "admission.k8s.io/v1beta1",
        "kind": "AdmissionReview",
        "request": {
            "uid": uid,
            "kind": kind,
            "resource": { "group": "", "version": "v1", "resource": "pods" },
            "namespace": namespace,
            "operation": "CREATE",
            "userInfo": { "username": "system:serviceaccount:kube-system:replicaset-controller" },
            "object": object
        }
    })
}

/// The group/version/kind of a core Pod
pub fn pod_kind() -> serde_json::Value {
    serde_json::json!({ "group": "", "version": "v1", "kind": "Pod" })
}

/// An AdmissionReview request for a Pod in `namespace` with the given pull secrets
pub fn pod_review_json(uid: &str, namespace: &str, pull_secrets: &[&str]) -> String {
    let mut spec = serde_json::json!({
        "containers": [{ "name": "app", "image": "registry.example.com/team/app:1.0" }]
    });
    if !pull_secrets.is_empty() {
        spec["imagePullSecrets"] = pull_secrets
            .iter()
            .map(|name| serde_json::json!({ "name": name }))
            .collect();
    }

    let pod = serde_json::json!({
        "apiVersion": "v1",
        "kind": "Pod",
        "metadata": { "generateName": "app-", "namespace": namespace },
        "spec": spec
    });
    admission_review_json(uid, pod_kind(), namespace, pod).to_string()
}
