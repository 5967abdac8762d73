// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Flattening of search results into agent-readable text.
//!
//! Each result's `document.derivedStructData` becomes one entry:
//!
//! ```text
//! <title> \n  \n <key> : <value> \n <key> : <value>
//! ```
//!
//! Nested objects recurse, arrays are joined with `", "`, and any string
//! value containing `http` is left out of the text (it is logged at debug
//! level instead). Entries are numbered from 1 and wrapped in a short
//! instruction block for the agent.

use std::fmt::Write as _;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::FormatError;

/// Returned verbatim when the datastore has no matches.
pub const NO_RESULTS_MESSAGE: &str =
	"Google appbuilders did not find any appbuilders that match the description";

/// Upper bound on the length of a composed answer, template included.
pub const MAX_ANSWER_CHARS: usize = 1024;

const ANSWER_PREFIX: &str = "thought: I have found:\n";
const ANSWER_SUFFIX: &str = "\naction: summarize answer and provide url link\naction_input: ";

const LINK_MARKER: &str = "http";
const TITLE_KEY: &str = "title";

/// Build the final answer for a page of raw search results.
pub fn compose_answer(results: &[Value]) -> String {
	if results.is_empty() {
		return NO_RESULTS_MESSAGE.to_string();
	}

	let entries: Vec<String> = results
		.iter()
		.enumerate()
		.filter_map(|(index, result)| {
			let entry = format_details(result);
			if entry.is_none() {
				debug!(index, "skipping malformed search result");
			}
			entry
		})
		.collect();

	if entries.is_empty() {
		warn!(
			result_count = results.len(),
			"no search result could be formatted"
		);
	}

	let answer = entries
		.iter()
		.enumerate()
		.map(|(i, entry)| format!("{}. {entry}", i + 1))
		.collect::<Vec<_>>()
		.join("\n");

	let budget =
		MAX_ANSWER_CHARS - ANSWER_PREFIX.chars().count() - ANSWER_SUFFIX.chars().count();
	let truncated = truncate_chars(&answer, budget);
	if truncated.len() < answer.len() {
		debug!(
			original_chars = answer.chars().count(),
			budget,
			"answer truncated"
		);
	}

	format!("{ANSWER_PREFIX}{truncated}{ANSWER_SUFFIX}")
}

/// Format one raw result, or `None` if it lacks `document.derivedStructData`.
pub fn format_details(result: &Value) -> Option<String> {
	match derived_struct_data(result) {
		Ok(details) => format_entry(details),
		Err(e) => {
			warn!(error = %e, "failed to extract search result details");
			None
		}
	}
}

/// Format a `derivedStructData` object as `<title> \n <body>`.
///
/// The title is taken out of the body. A missing title renders as empty.
pub fn format_entry(details: &Value) -> Option<String> {
	match try_format_entry(details) {
		Ok(entry) => Some(entry),
		Err(e) => {
			warn!(error = %e, "failed to format search result details");
			None
		}
	}
}

/// Recursively flatten a JSON value to text.
pub fn flatten(value: &Value) -> String {
	match value {
		Value::String(s) if is_link(s) => {
			debug!(link = %s, "suppressing link from answer");
			String::new()
		}
		Value::String(s) => s.clone(),
		Value::Object(fields) => flatten_fields(fields.iter()),
		Value::Array(items) => items
			.iter()
			.filter(|item| match item {
				Value::String(s) if is_link(s) => {
					debug!(link = %s, "suppressing link from answer");
					false
				}
				_ => true,
			})
			.map(flatten)
			.collect::<Vec<_>>()
			.join(", "),
		Value::Null | Value::Bool(_) | Value::Number(_) => String::new(),
	}
}

fn derived_struct_data(result: &Value) -> Result<&Value, FormatError> {
	let record = as_object(result, "result")?;
	let document = record
		.get("document")
		.ok_or(FormatError::MissingField("document"))?;
	let document = as_object(document, "document")?;
	let details = document
		.get("derivedStructData")
		.ok_or(FormatError::MissingField("derivedStructData"))?;
	as_object(details, "derivedStructData")?;
	Ok(details)
}

fn try_format_entry(details: &Value) -> Result<String, FormatError> {
	let fields = as_object(details, "derivedStructData")?;

	let title = match fields.get(TITLE_KEY) {
		None | Some(Value::Null) => "",
		Some(Value::String(title)) => title.as_str(),
		Some(_) => {
			return Err(FormatError::UnexpectedShape {
				field: TITLE_KEY,
				expected: "a string",
			})
		}
	};

	let body = flatten_fields(fields.iter().filter(|(key, _)| key.as_str() != TITLE_KEY));
	Ok(format!("{title} \n {body}"))
}

fn flatten_fields<'a>(fields: impl Iterator<Item = (&'a String, &'a Value)>) -> String {
	let mut out = String::new();
	for (key, value) in fields {
		if let Value::String(s) = value {
			if is_link(s) {
				debug!(key = %key, link = %s, "suppressing link from answer");
				continue;
			}
		}
		let _ = write!(out, " \n {key} : {}", flatten(value));
	}
	out
}

fn as_object<'a>(value: &'a Value, field: &'static str) -> Result<&'a Map<String, Value>, FormatError> {
	value.as_object().ok_or(FormatError::UnexpectedShape {
		field,
		expected: "an object",
	})
}

fn is_link(s: &str) -> bool {
	s.contains(LINK_MARKER)
}

/// Keep at most `max_chars` characters of `s`.
fn truncate_chars(s: &str, max_chars: usize) -> &str {
	match s.char_indices().nth(max_chars) {
		Some((end, _)) => &s[..end],
		None => s,
	}
}
