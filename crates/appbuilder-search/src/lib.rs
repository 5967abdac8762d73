// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Google AppBuilder datastore search client.
//!
//! Sends one query to a datastore search endpoint and flattens the
//! `document.derivedStructData` of each result into plain text that an
//! agent can summarize.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod types;

pub use appbuilder_common_http::RetryConfig;
pub use auth::{ApplicationDefaultCredentials, CredentialProvider, StaticToken};
pub use client::AppBuilderClient;
pub use config::{AppBuilderConfig, ConfigOverrides};
pub use error::{AppBuilderError, AuthError, ConfigError, FormatError};
pub use format::{compose_answer, flatten, format_details, format_entry, NO_RESULTS_MESSAGE};
pub use types::{SearchRequest, SearchResponse};
