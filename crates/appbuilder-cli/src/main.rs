// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! `appbuilder`: run one AppBuilder datastore search from the shell.
//!
//! The answer goes to stdout; logs go to stderr so the answer can be piped
//! straight into an agent.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use appbuilder_common_config::SecretString;
use appbuilder_search::{
	AppBuilderClient, AppBuilderConfig, ApplicationDefaultCredentials, ConfigOverrides,
	CredentialProvider, StaticToken,
};
use appbuilder_tools::AppBuilderSearchTool;
use clap::{Parser, ValueEnum};
use tracing::{debug, error};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "appbuilder", version, about, long_about = None)]
struct Args {
	/// Natural-language query
	#[arg(required_unless_present = "tool_schema", num_args = 1..)]
	query: Vec<String>,

	/// Datastore search endpoint
	#[arg(long, env = "GAPP_BUILDER_DS_URL")]
	datastore_url: Option<String>,

	/// API key sent alongside the bearer token (falls back to
	/// GAPP_BUILDER_API_KEY or GAPP_BUILDER_API_KEY_FILE)
	#[arg(long)]
	api_key: Option<String>,

	/// Use this bearer token instead of application default credentials
	#[arg(long, env = "GAPP_BUILDER_ACCESS_TOKEN", hide_env_values = true)]
	access_token: Option<String>,

	/// Request timeout in seconds
	#[arg(long, env = "GAPP_BUILDER_TIMEOUT_SECS")]
	timeout_secs: Option<u64>,

	/// Print the agent tool definitions as JSON and exit
	#[arg(long, conflicts_with = "query")]
	tool_schema: bool,

	/// Log level (RUST_LOG takes precedence)
	#[arg(short, long, value_enum, default_value_t = LogLevel::Warn)]
	log_level: LogLevel,

	/// Output logs as JSON
	#[arg(long)]
	json_logs: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LogLevel {
	Trace,
	Debug,
	Info,
	Warn,
	Error,
}

impl From<LogLevel> for tracing::Level {
	fn from(level: LogLevel) -> Self {
		match level {
			LogLevel::Trace => tracing::Level::TRACE,
			LogLevel::Debug => tracing::Level::DEBUG,
			LogLevel::Info => tracing::Level::INFO,
			LogLevel::Warn => tracing::Level::WARN,
			LogLevel::Error => tracing::Level::ERROR,
		}
	}
}

impl From<&Args> for ConfigOverrides {
	fn from(args: &Args) -> Self {
		Self {
			datastore_url: args.datastore_url.clone(),
			api_key: args.api_key.clone().map(SecretString::new),
			request_timeout: args.timeout_secs.map(Duration::from_secs),
		}
	}
}

fn init_tracing(level: LogLevel, json: bool) {
	let level = tracing::Level::from(level);
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		EnvFilter::new(format!(
			"appbuilder={level},appbuilder_search={level},appbuilder_tools={level},appbuilder_common_http={level}"
		))
	});

	if json {
		tracing_subscriber::registry()
			.with(filter)
			.with(fmt::layer().json().with_writer(std::io::stderr))
			.init();
	} else {
		tracing_subscriber::registry()
			.with(filter)
			.with(fmt::layer().compact().with_writer(std::io::stderr))
			.init();
	}
}

fn build_client(args: &Args) -> Result<AppBuilderClient> {
	let config = AppBuilderConfig::resolve(ConfigOverrides::from(args))
		.context("failed to load configuration")?;

	let credentials: Arc<dyn CredentialProvider> = match &args.access_token {
		Some(token) => {
			debug!("using static access token");
			Arc::new(StaticToken::new(token.as_str()))
		}
		None => Arc::new(ApplicationDefaultCredentials::new()),
	};

	AppBuilderClient::new(config, credentials).context("failed to create search client")
}

#[tokio::main]
async fn main() -> Result<()> {
	let args = Args::parse();
	init_tracing(args.log_level, args.json_logs);

	if args.tool_schema {
		let definitions = vec![AppBuilderSearchTool::definition()];
		println!("{}", serde_json::to_string_pretty(&definitions)?);
		return Ok(());
	}

	let client = build_client(&args)?;
	let query = args.query.join(" ");
	let answer = client.run(&query).await.map_err(|e| {
		error!(error = %e, "search failed");
		e
	})?;
	println!("{answer}");

	Ok(())
}
