// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Registry credential encoding into the `.dockerconfigjson` format.

use crate::error::Result;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Credential for a single container registry
#[derive(Clone, PartialEq, Eq)]
pub struct PullCredential {
    pub username: String,
    pub password: String,
    /// Registry host the credential applies to, used as the `auths` key
    pub registry: String,
}

impl PullCredential {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        registry: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            registry: registry.into(),
        }
    }
}

impl fmt::Debug for PullCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PullCredential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("registry", &self.registry)
            .finish()
    }
}

/// A single `auths` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryAuth {
    pub username: String,
    pub password: String,
    pub auth: String,
}

/// The registry credential file, keyed by registry host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryAuthDocument {
    pub auths: BTreeMap<String, RegistryAuth>,
}

impl RegistryAuthDocument {
    /// Serialize to the bytes stored under `.dockerconfigjson`
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Build the auth document for a credential
pub fn encode(credential: &PullCredential) -> RegistryAuthDocument {
    let auth = STANDARD.encode(format!("{}:{}", credential.username, credential.password));

    RegistryAuthDocument {
        auths: BTreeMap::from([(
            credential.registry.clone(),
            RegistryAuth {
                username: credential.username.clone(),
                password: credential.password.clone(),
                auth,
            },
        )]),
    }
}
