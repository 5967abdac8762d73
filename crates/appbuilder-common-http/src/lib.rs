// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities.
//!
//! - A `reqwest` client builder carrying the AppBuilder User-Agent
//! - Retry with exponential backoff for transient failures

mod client;
mod retry;

pub use client::{builder, client_with_timeout, user_agent};
pub use retry::{is_retryable_status, retry, RetryConfig, RetryableError};
