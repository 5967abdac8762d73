// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use appbuilder_search::AppBuilderError;
use thiserror::Error;

/// Errors that can occur during tool execution.
#[derive(Debug, Error)]
pub enum ToolError {
	#[error("Tool not found: {0}")]
	NotFound(String),

	#[error("Invalid arguments: {0}")]
	InvalidArguments(String),

	#[error("Serialization error: {0}")]
	Serialization(String),

	#[error("Tool execution timed out")]
	Timeout,

	#[error("Search failed: {0}")]
	Search(AppBuilderError),
}

impl From<AppBuilderError> for ToolError {
	fn from(err: AppBuilderError) -> Self {
		match err {
			AppBuilderError::Timeout => ToolError::Timeout,
			other => ToolError::Search(other),
		}
	}
}
