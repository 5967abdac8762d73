// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error types for the AppBuilder search client.

use appbuilder_common_config::SecretEnvError;
use appbuilder_common_http::{is_retryable_status, RetryableError};
use reqwest::StatusCode;
use thiserror::Error;

/// Failure to obtain a bearer token.
#[derive(Debug, Error)]
pub enum AuthError {
	/// No usable credential chain was found in the environment.
	#[error("no application default credentials available: {0}")]
	Unavailable(String),

	/// A provider exists but refused to mint a token.
	#[error("failed to obtain access token: {0}")]
	Token(String),
}

/// Invalid or missing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("datastore URL not configured: pass it explicitly or set {0}")]
	MissingDatastoreUrl(&'static str),

	#[error("invalid value for {var}: {message}")]
	Invalid { var: &'static str, message: String },

	#[error(transparent)]
	Secret(#[from] SecretEnvError),
}

/// Errors returned by [`crate::AppBuilderClient`].
#[derive(Debug, Error)]
pub enum AppBuilderError {
	#[error("configuration error: {0}")]
	Config(#[from] ConfigError),

	#[error("authentication failed: {0}")]
	Auth(#[from] AuthError),

	/// Transport-level failure.
	#[error("Network error: {0}")]
	Network(#[from] reqwest::Error),

	#[error("Request timed out")]
	Timeout,

	/// The datastore rejected the credentials (401/403).
	#[error("Unauthorized: {0}")]
	Unauthorized(String),

	#[error("Rate limit exceeded")]
	RateLimited,

	#[error("AppBuilder API error: {status} - {message}")]
	ApiError { status: u16, message: String },

	/// The response body was not the expected envelope.
	#[error("Invalid response from AppBuilder: {0}")]
	InvalidResponse(String),
}

impl RetryableError for AppBuilderError {
	fn is_retryable(&self) -> bool {
		match self {
			AppBuilderError::Network(e) => e.is_retryable(),
			AppBuilderError::Timeout => true,
			AppBuilderError::RateLimited => true,
			AppBuilderError::ApiError { status, .. } => StatusCode::from_u16(*status)
				.map(is_retryable_status)
				.unwrap_or(false),
			AppBuilderError::Config(_)
			| AppBuilderError::Auth(_)
			| AppBuilderError::Unauthorized(_)
			| AppBuilderError::InvalidResponse(_) => false,
		}
	}
}

/// Shape problems in a single search result. These are logged and the
/// result is left out of the answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
	#[error("missing field `{0}`")]
	MissingField(&'static str),

	#[error("field `{field}` should be {expected}")]
	UnexpectedShape {
		field: &'static str,
		expected: &'static str,
	},
}
