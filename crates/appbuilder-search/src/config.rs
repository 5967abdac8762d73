// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Client configuration.
//!
//! Every setting resolves from an explicit override first and the
//! environment second.

use std::time::Duration;

use appbuilder_common_config::{load_env, load_secret_env, SecretString};
use reqwest::Url;

use crate::error::ConfigError;

pub const API_KEY_ENV: &str = "GAPP_BUILDER_API_KEY";
pub const DATASTORE_URL_ENV: &str = "GAPP_BUILDER_DS_URL";
pub const REQUEST_TIMEOUT_ENV: &str = "GAPP_BUILDER_TIMEOUT_SECS";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct AppBuilderConfig {
	/// Full search endpoint, e.g.
	/// `https://discoveryengine.googleapis.com/v1alpha/projects/.../servingConfigs/default_search:search`.
	pub datastore_url: String,
	/// Sent as `x-goog-api-key` when present.
	pub api_key: Option<SecretString>,
	pub request_timeout: Duration,
}

/// Explicit values that take precedence over the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
	pub datastore_url: Option<String>,
	pub api_key: Option<SecretString>,
	pub request_timeout: Option<Duration>,
}

impl AppBuilderConfig {
	pub fn new(datastore_url: impl Into<String>) -> Self {
		Self {
			datastore_url: datastore_url.into(),
			api_key: None,
			request_timeout: DEFAULT_REQUEST_TIMEOUT,
		}
	}

	pub fn with_api_key(mut self, api_key: impl Into<SecretString>) -> Self {
		self.api_key = Some(api_key.into());
		self
	}

	pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = timeout;
		self
	}

	/// Configuration taken entirely from the environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::resolve(ConfigOverrides::default())
	}

	pub fn resolve(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
		let datastore_url = overrides
			.datastore_url
			.map(|url| url.trim().to_string())
			.filter(|url| !url.is_empty())
			.or_else(|| load_env(DATASTORE_URL_ENV))
			.ok_or(ConfigError::MissingDatastoreUrl(DATASTORE_URL_ENV))?;

		let api_key = match overrides.api_key {
			Some(key) => Some(key),
			None => load_secret_env(API_KEY_ENV)?,
		}
		.filter(|key| !key.is_blank());

		let request_timeout = match overrides.request_timeout {
			Some(timeout) => timeout,
			None => match load_env(REQUEST_TIMEOUT_ENV) {
				Some(raw) => parse_timeout_secs(&raw)?,
				None => DEFAULT_REQUEST_TIMEOUT,
			},
		};

		let config = Self {
			datastore_url,
			api_key,
			request_timeout,
		};
		config.validate()?;
		Ok(config)
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		let url = Url::parse(&self.datastore_url).map_err(|e| ConfigError::Invalid {
			var: DATASTORE_URL_ENV,
			message: e.to_string(),
		})?;
		if !matches!(url.scheme(), "http" | "https") {
			return Err(ConfigError::Invalid {
				var: DATASTORE_URL_ENV,
				message: format!("unsupported scheme `{}`", url.scheme()),
			});
		}
		if self.request_timeout.is_zero() {
			return Err(ConfigError::Invalid {
				var: REQUEST_TIMEOUT_ENV,
				message: "timeout must be greater than zero".to_string(),
			});
		}
		Ok(())
	}
}

fn parse_timeout_secs(raw: &str) -> Result<Duration, ConfigError> {
	let secs: u64 = raw.parse().map_err(|_| ConfigError::Invalid {
		var: REQUEST_TIMEOUT_ENV,
		message: format!("expected whole seconds, got `{raw}`"),
	})?;
	Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::env;

	const URL: &str = "https://discoveryengine.googleapis.com/v1alpha/search";

	fn explicit() -> ConfigOverrides {
		ConfigOverrides {
			datastore_url: Some(URL.to_string()),
			api_key: Some(SecretString::from("key")),
			request_timeout: Some(Duration::from_secs(5)),
		}
	}

	#[test]
	fn explicit_values_win() {
		let config = AppBuilderConfig::resolve(explicit()).unwrap();
		assert_eq!(config.datastore_url, URL);
		assert_eq!(config.api_key.unwrap().expose(), "key");
		assert_eq!(config.request_timeout, Duration::from_secs(5));
	}

	#[test]
	fn explicit_url_is_trimmed() {
		let config = AppBuilderConfig::resolve(ConfigOverrides {
			datastore_url: Some(format!("  {URL}\n")),
			..explicit()
		})
		.unwrap();
		assert_eq!(config.datastore_url, URL);
	}

	#[test]
	fn blank_api_key_is_dropped() {
		let config = AppBuilderConfig::resolve(ConfigOverrides {
			api_key: Some(SecretString::from("  ")),
			..explicit()
		})
		.unwrap();
		assert!(config.api_key.is_none());
	}

	#[test]
	fn invalid_url_is_rejected() {
		let err = AppBuilderConfig::resolve(ConfigOverrides {
			datastore_url: Some("not a url".to_string()),
			..explicit()
		})
		.unwrap_err();
		assert!(matches!(err, ConfigError::Invalid { var: DATASTORE_URL_ENV, .. }));

		let err = AppBuilderConfig::new("ftp://example.com/search")
			.validate()
			.unwrap_err();
		assert!(err.to_string().contains("unsupported scheme"));
	}

	#[test]
	fn zero_timeout_is_rejected() {
		let err = AppBuilderConfig::new(URL)
			.with_request_timeout(Duration::ZERO)
			.validate()
			.unwrap_err();
		assert!(matches!(err, ConfigError::Invalid { var: REQUEST_TIMEOUT_ENV, .. }));
	}

	#[test]
	fn timeout_parsing() {
		assert_eq!(parse_timeout_secs("12").unwrap(), Duration::from_secs(12));
		assert!(parse_timeout_secs("1.5").is_err());
		assert!(parse_timeout_secs("soon").is_err());
	}

	// The only test touching the GAPP_BUILDER_* variables, so the steps run
	// in sequence.
	#[test]
	fn environment_fallbacks() {
		env::remove_var(DATASTORE_URL_ENV);
		env::remove_var(API_KEY_ENV);
		env::remove_var(format!("{API_KEY_ENV}_FILE"));
		env::remove_var(REQUEST_TIMEOUT_ENV);

		assert!(matches!(
			AppBuilderConfig::from_env(),
			Err(ConfigError::MissingDatastoreUrl(DATASTORE_URL_ENV))
		));

		env::set_var(DATASTORE_URL_ENV, URL);
		let config = AppBuilderConfig::from_env().unwrap();
		assert_eq!(config.datastore_url, URL);
		assert!(config.api_key.is_none());
		assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);

		env::set_var(API_KEY_ENV, "env-key");
		env::set_var(REQUEST_TIMEOUT_ENV, "7");
		let config = AppBuilderConfig::from_env().unwrap();
		assert_eq!(config.api_key.unwrap().expose(), "env-key");
		assert_eq!(config.request_timeout, Duration::from_secs(7));

		env::set_var(REQUEST_TIMEOUT_ENV, "later");
		assert!(AppBuilderConfig::from_env().is_err());

		let config = AppBuilderConfig::resolve(ConfigOverrides {
			datastore_url: Some("https://override.example/search".to_string()),
			request_timeout: Some(Duration::from_secs(3)),
			..Default::default()
		})
		.unwrap();
		assert_eq!(config.datastore_url, "https://override.example/search");
		assert_eq!(config.api_key.unwrap().expose(), "env-key");

		env::remove_var(DATASTORE_URL_ENV);
		env::remove_var(API_KEY_ENV);
		env::remove_var(REQUEST_TIMEOUT_ENV);
	}
}
