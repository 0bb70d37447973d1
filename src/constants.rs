// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// The pull-credential Secret maintained in every admitted namespace
pub mod secret {
    /// Fixed name of the Secret, also the name referenced from Pods
    pub const NAME: &str = "regcred";
    /// Secret type understood by the kubelet for image pulls
    pub const TYPE: &str = "kubernetes.io/dockerconfigjson";
    /// Data key holding the serialized registry auth document
    pub const DOCKER_CONFIG_KEY: &str = ".dockerconfigjson";
}

/// Admission constants
pub mod admission {
    /// Only objects of this kind are mutated
    pub const POD_KIND: &str = "Pod";
    /// Pointer tokens of the pull-secret list inside a Pod
    pub const IMAGE_PULL_SECRETS_PATH: [&str; 2] = ["spec", "imagePullSecrets"];
}

/// HTTPS server defaults
pub mod server {
    pub const ADMISSION_ROUTE: &str = "/admission";
    pub const STATUS_ROUTE: &str = "/status";
    pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8443";
    pub const DEFAULT_TLS_CERT_PATH: &str = "certs/regcred-injector-crt.pem";
    pub const DEFAULT_TLS_KEY_PATH: &str = "certs/regcred-injector-key.pem";
    /// Upper bound for handling one admission request
    pub const REQUEST_TIMEOUT_SECS: u64 = 15;
    /// Upper bound for a client to finish sending request headers
    pub const HEADER_READ_TIMEOUT_SECS: u64 = 15;
}

/// Kubernetes API client configuration
pub mod client {
    /// Upper bound for connecting to, reading from and writing to the API server
    pub const TIMEOUT_SECS: u64 = 15;
}
