// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! AppBuilder datastore search client.

use std::fmt;
use std::sync::Arc;

use appbuilder_common_config::SecretString;
use appbuilder_common_http::{retry, RetryConfig};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, error, instrument, trace};

use crate::auth::{ApplicationDefaultCredentials, CredentialProvider};
use crate::config::AppBuilderConfig;
use crate::error::AppBuilderError;
use crate::format::compose_answer;
use crate::types::{SearchRequest, SearchResponse};

const JSON_UTF8: &str = "application/json; charset=UTF-8";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Runs one search per call and flattens the results for an agent.
#[derive(Clone)]
pub struct AppBuilderClient {
	http_client: Client,
	config: AppBuilderConfig,
	credentials: Arc<dyn CredentialProvider>,
	retry_config: RetryConfig,
}

impl fmt::Debug for AppBuilderClient {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AppBuilderClient")
			.field("config", &self.config)
			.field("retry_config", &self.retry_config)
			.finish_non_exhaustive()
	}
}

impl AppBuilderClient {
	pub fn new(
		config: AppBuilderConfig,
		credentials: Arc<dyn CredentialProvider>,
	) -> Result<Self, AppBuilderError> {
		config.validate()?;
		let http_client = appbuilder_common_http::client_with_timeout(config.request_timeout)?;

		Ok(Self {
			http_client,
			config,
			credentials,
			retry_config: RetryConfig::default(),
		})
	}

	/// Environment configuration with application default credentials.
	pub fn from_env() -> Result<Self, AppBuilderError> {
		Self::new(
			AppBuilderConfig::from_env()?,
			Arc::new(ApplicationDefaultCredentials::new()),
		)
	}

	pub fn with_retry_config(mut self, config: RetryConfig) -> Self {
		self.retry_config = config;
		self
	}

	pub fn config(&self) -> &AppBuilderConfig {
		&self.config
	}

	/// Fetch a fresh bearer token from the configured provider.
	pub async fn authenticate(&self) -> Result<SecretString, AppBuilderError> {
		Ok(self.credentials.access_token().await?)
	}

	/// Entry point for tool-calling frameworks. Same as [`Self::search`].
	pub async fn run(&self, query: &str) -> Result<String, AppBuilderError> {
		self.search(query).await
	}

	/// Search the datastore and return the flattened, agent-ready answer.
	#[instrument(skip(self), fields(datastore = %self.config.datastore_url))]
	pub async fn search(&self, query: &str) -> Result<String, AppBuilderError> {
		let results = self.fetch_results(query).await?;
		debug!(result_count = results.len(), "Search completed successfully");
		Ok(compose_answer(&results))
	}

	/// Raw result records for `query`, without any formatting.
	pub async fn fetch_results(&self, query: &str) -> Result<Vec<Value>, AppBuilderError> {
		let token = self.authenticate().await?;
		let request = SearchRequest::new(query);

		retry(&self.retry_config, || self.search_inner(&request, &token)).await
	}

	async fn search_inner(
		&self,
		request: &SearchRequest,
		token: &SecretString,
	) -> Result<Vec<Value>, AppBuilderError> {
		debug!(url = %self.config.datastore_url, "Sending search request to AppBuilder");
		trace!(
			query = %request.query,
			page_size = request.page_size,
			offset = request.offset,
			"Search parameters"
		);

		let mut builder = self
			.http_client
			.post(&self.config.datastore_url)
			.bearer_auth(token.expose())
			.header(CONTENT_TYPE, JSON_UTF8);
		if let Some(api_key) = &self.config.api_key {
			builder = builder.header(API_KEY_HEADER, api_key.expose());
		}

		let response = builder.json(request).send().await.map_err(|e| {
			if e.is_timeout() {
				error!("Request timed out");
				return AppBuilderError::Timeout;
			}
			error!(error = %e, "Network error during AppBuilder request");
			AppBuilderError::Network(e)
		})?;

		let status = response.status();
		debug!(status = %status, "Received response from AppBuilder");

		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			return Err(status_error(status, body));
		}

		let body = response.text().await.map_err(|e| {
			if e.is_timeout() {
				error!("Timed out reading response body");
				return AppBuilderError::Timeout;
			}
			error!(error = %e, "Failed to read response body");
			AppBuilderError::Network(e)
		})?;

		trace!(body = %body, "Response body");

		let parsed: SearchResponse = serde_json::from_str(&body).map_err(|e| {
			error!(error = %e, "Failed to parse AppBuilder response");
			AppBuilderError::InvalidResponse(format!("JSON parse error: {e}"))
		})?;

		Ok(parsed.into_results())
	}
}

fn status_error(status: StatusCode, body: String) -> AppBuilderError {
	match status {
		StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
			error!(status = status.as_u16(), "Unauthorized request");
			AppBuilderError::Unauthorized(body)
		}
		StatusCode::TOO_MANY_REQUESTS => {
			error!(status = status.as_u16(), "Rate limit exceeded");
			AppBuilderError::RateLimited
		}
		_ => {
			error!(status = status.as_u16(), body = %body, "AppBuilder API error");
			AppBuilderError::ApiError {
				status: status.as_u16(),
				message: body,
			}
		}
	}
}
