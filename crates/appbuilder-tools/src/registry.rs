// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ToolError;

/// Definition of a tool as advertised to the LLM.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
	pub name: String,
	pub description: String,
	pub input_schema: serde_json::Value,
}

#[async_trait]
pub trait Tool: Send + Sync {
	fn name(&self) -> &str;

	fn description(&self) -> &str;

	fn input_schema(&self) -> serde_json::Value;

	fn to_definition(&self) -> ToolDefinition {
		ToolDefinition {
			name: self.name().to_string(),
			description: self.description().to_string(),
			input_schema: self.input_schema(),
		}
	}

	async fn invoke(&self, args: serde_json::Value) -> Result<serde_json::Value, ToolError>;
}

/// Tools keyed by name. Definitions come back sorted by name.
pub struct ToolRegistry {
	tools: BTreeMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
	pub fn new() -> Self {
		Self {
			tools: BTreeMap::new(),
		}
	}

	pub fn register(&mut self, tool: Box<dyn Tool>) {
		let name = tool.name().to_string();
		tracing::debug!(tool_name = %name, "registering tool");
		self.tools.insert(name, tool);
	}

	pub fn get(&self, name: &str) -> Option<&dyn Tool> {
		self.tools.get(name).map(|t| t.as_ref())
	}

	pub fn definitions(&self) -> Vec<ToolDefinition> {
		self.tools.values().map(|t| t.to_definition()).collect()
	}

	/// Look up `name` and invoke it with `args`.
	pub async fn invoke(
		&self,
		name: &str,
		args: serde_json::Value,
	) -> Result<serde_json::Value, ToolError> {
		let tool = self
			.get(name)
			.ok_or_else(|| ToolError::NotFound(name.to_string()))?;
		tool.invoke(args).await
	}
}

impl Default for ToolRegistry {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	struct EchoTool {
		name: String,
	}

	#[async_trait]
	impl Tool for EchoTool {
		fn name(&self) -> &str {
			&self.name
		}

		fn description(&self) -> &str {
			"Echoes its arguments"
		}

		fn input_schema(&self) -> serde_json::Value {
			serde_json::json!({"type": "object", "properties": {}})
		}

		async fn invoke(&self, args: serde_json::Value) -> Result<serde_json::Value, ToolError> {
			Ok(args)
		}
	}

	proptest! {
		/// Any registered name can be looked up again.
		#[test]
		fn registered_tools_are_retrievable(name in "[a-zA-Z][a-zA-Z0-9_]{0,30}") {
			let mut registry = ToolRegistry::new();
			registry.register(Box::new(EchoTool { name: name.clone() }));

			prop_assert_eq!(registry.get(&name).map(|t| t.name().to_string()), Some(name));
		}

		/// One definition per distinct registered name.
		#[test]
		fn definitions_match_registered_tools(
			names in prop::collection::hash_set("[a-zA-Z][a-zA-Z0-9_]{0,20}", 0..10)
		) {
			let mut registry = ToolRegistry::new();
			for name in &names {
				registry.register(Box::new(EchoTool { name: name.clone() }));
			}

			prop_assert_eq!(registry.definitions().len(), names.len());
		}
	}

	#[test]
	fn definitions_are_sorted_by_name() {
		let mut registry = ToolRegistry::new();
		for name in ["zeta", "alpha", "mid"] {
			registry.register(Box::new(EchoTool { name: name.into() }));
		}
		let names: Vec<_> = registry.definitions().into_iter().map(|d| d.name).collect();
		assert_eq!(names, ["alpha", "mid", "zeta"]);
	}

	#[tokio::test]
	async fn invoke_dispatches_by_name() {
		let mut registry = ToolRegistry::new();
		registry.register(Box::new(EchoTool { name: "echo".into() }));

		let out = registry
			.invoke("echo", serde_json::json!({"x": 1}))
			.await
			.unwrap();
		assert_eq!(out, serde_json::json!({"x": 1}));
	}

	#[tokio::test]
	async fn invoke_unknown_tool_is_not_found() {
		let registry = ToolRegistry::new();
		let err = registry.invoke("missing", serde_json::json!({})).await;
		assert!(matches!(err, Err(ToolError::NotFound(name)) if name == "missing"));
	}
}
