// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Wire types for the datastore search endpoint.

use serde::{Deserialize, Serialize};

/// Number of results requested per query.
pub const PAGE_SIZE: u32 = 2;

/// Body of the search POST.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
	pub query: String,
	pub page_size: u32,
	pub offset: u32,
}

impl SearchRequest {
	/// First page of [`PAGE_SIZE`] results for `query`.
	pub fn new(query: impl Into<String>) -> Self {
		Self {
			query: query.into(),
			page_size: PAGE_SIZE,
			offset: 0,
		}
	}
}

/// Response envelope. Result records are kept as raw JSON because their
/// fields are defined by the datastore schema, not by this client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
	#[serde(default)]
	results: Option<Vec<serde_json::Value>>,
}

impl SearchResponse {
	pub fn into_results(self) -> Vec<serde_json::Value> {
		self.results.unwrap_or_default()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn request_uses_fixed_paging() {
		let body = serde_json::to_value(SearchRequest::new("weather")).unwrap();
		assert_eq!(
			body,
			json!({"query": "weather", "page_size": 2, "offset": 0})
		);
	}

	#[test]
	fn missing_or_null_results_are_empty() {
		let missing: SearchResponse = serde_json::from_value(json!({})).unwrap();
		assert!(missing.into_results().is_empty());

		let null: SearchResponse = serde_json::from_value(json!({"results": null})).unwrap();
		assert!(null.into_results().is_empty());
	}

	#[test]
	fn extra_envelope_fields_are_ignored() {
		let resp: SearchResponse = serde_json::from_value(json!({
			"results": [{"id": "1"}],
			"totalSize": 1,
			"attributionToken": "abc"
		}))
		.unwrap();
		assert_eq!(resp.into_results().len(), 1);
	}

	#[test]
	fn non_array_results_are_rejected() {
		let parsed = serde_json::from_value::<SearchResponse>(json!({"results": {"a": 1}}));
		assert!(parsed.is_err());
	}
}
