// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Tool-calling surface for agents.

mod appbuilder_search;
mod error;
mod registry;

pub use appbuilder_search::AppBuilderSearchTool;
pub use error::ToolError;
pub use registry::{Tool, ToolDefinition, ToolRegistry};
