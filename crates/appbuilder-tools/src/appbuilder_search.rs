// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Datastore search exposed as an agent tool.

use std::sync::Arc;

use appbuilder_search::AppBuilderClient;
use async_trait::async_trait;
use serde::Deserialize;

use crate::{Tool, ToolDefinition, ToolError};

#[derive(Debug, Deserialize)]
struct AppBuilderSearchArgs {
	query: String,
}

const NAME: &str = "appbuilder_search";
const DESCRIPTION: &str = "Search the Google AppBuilder datastore for apps matching a description. \
	 Returns the top matches as plain text with instructions for summarizing them.";

fn query_schema() -> serde_json::Value {
	serde_json::json!({
		"type": "object",
		"properties": {
			"query": {
				"type": "string",
				"description": "Natural-language description of what to look for."
			}
		},
		"required": ["query"]
	})
}

pub struct AppBuilderSearchTool {
	client: Arc<AppBuilderClient>,
}

impl AppBuilderSearchTool {
	pub fn new(client: Arc<AppBuilderClient>) -> Self {
		Self { client }
	}

	/// The advertised definition, available without a configured client.
	pub fn definition() -> ToolDefinition {
		ToolDefinition {
			name: NAME.to_string(),
			description: DESCRIPTION.to_string(),
			input_schema: query_schema(),
		}
	}
}

#[async_trait]
impl Tool for AppBuilderSearchTool {
	fn name(&self) -> &str {
		NAME
	}

	fn description(&self) -> &str {
		DESCRIPTION
	}

	fn input_schema(&self) -> serde_json::Value {
		query_schema()
	}

	async fn invoke(&self, args: serde_json::Value) -> Result<serde_json::Value, ToolError> {
		let args: AppBuilderSearchArgs =
			serde_json::from_value(args).map_err(|e| ToolError::Serialization(e.to_string()))?;

		let query = args.query.trim();
		if query.is_empty() {
			return Err(ToolError::InvalidArguments(
				"query must not be empty".to_string(),
			));
		}

		tracing::debug!(query = %query, "appbuilder_search: running query");

		let answer = self.client.run(query).await.map_err(|e| {
			tracing::warn!(error = %e, "appbuilder_search: search failed");
			ToolError::from(e)
		})?;

		tracing::debug!(
			answer_len = answer.len(),
			"appbuilder_search: received answer"
		);

		Ok(serde_json::Value::String(answer))
	}
}
