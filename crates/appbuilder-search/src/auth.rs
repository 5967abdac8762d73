// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Bearer token sources.
//!
//! The client never reaches for ambient credentials itself; a
//! [`CredentialProvider`] is handed to it at construction.

use appbuilder_common_config::SecretString;
use async_trait::async_trait;
use gcp_auth::TokenProvider;
use tracing::{debug, error};

use crate::error::AuthError;

pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Supplies a bearer token for each search.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
	async fn access_token(&self) -> Result<SecretString, AuthError>;
}

/// Google Application Default Credentials: `GOOGLE_APPLICATION_CREDENTIALS`,
/// the gcloud user config, or the metadata server, whichever is found first.
///
/// Every call resolves the chain and fetches a token anew.
#[derive(Debug, Clone)]
pub struct ApplicationDefaultCredentials {
	scopes: Vec<String>,
}

impl ApplicationDefaultCredentials {
	pub fn new() -> Self {
		Self {
			scopes: vec![CLOUD_PLATFORM_SCOPE.to_string()],
		}
	}

	pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.scopes = scopes.into_iter().map(Into::into).collect();
		self
	}

	pub fn scopes(&self) -> &[String] {
		&self.scopes
	}
}

impl Default for ApplicationDefaultCredentials {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl CredentialProvider for ApplicationDefaultCredentials {
	async fn access_token(&self) -> Result<SecretString, AuthError> {
		debug!("Resolving GCP application default credentials");
		let provider = gcp_auth::provider().await.map_err(|e| {
			error!(error = %e, "No GCP credential chain available");
			AuthError::Unavailable(e.to_string())
		})?;

		let scopes: Vec<&str> = self.scopes.iter().map(String::as_str).collect();
		let token = provider.token(&scopes).await.map_err(|e| {
			error!(error = %e, "Failed to get GCP access token");
			AuthError::Token(e.to_string())
		})?;

		Ok(SecretString::new(token.as_str().to_string()))
	}
}

/// A fixed token, for callers that mint tokens elsewhere and for tests.
#[derive(Debug, Clone)]
pub struct StaticToken {
	token: SecretString,
}

impl StaticToken {
	pub fn new(token: impl Into<SecretString>) -> Self {
		Self {
			token: token.into(),
		}
	}
}

#[async_trait]
impl CredentialProvider for StaticToken {
	async fn access_token(&self) -> Result<SecretString, AuthError> {
		if self.token.is_blank() {
			return Err(AuthError::Token("static access token is empty".to_string()));
		}
		Ok(self.token.clone())
	}
}
