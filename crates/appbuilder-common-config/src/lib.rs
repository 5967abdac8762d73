// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Configuration primitives shared by the AppBuilder crates.
//!
//! - [`Secret<T>`]: keeps API keys and bearer tokens out of logs
//! - [`load_secret_env`] / [`load_env`]: environment lookups with `*_FILE`
//!   support for secrets

pub mod env;
pub mod secret;

pub use env::{load_env, load_secret_env, SecretEnvError};
pub use secret::{Secret, SecretString, REDACTED};
