// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Mutating admission for Pods.

pub mod handler;
pub mod patch;

pub use handler::AdmissionHandler;
pub use patch::{generate_patch, pull_secret_patch, PatchOperation};
