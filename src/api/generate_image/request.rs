// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image generation request types and validation

use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;

/// Characters of the prompt echoed into logs
const PREVIEW_CHARS: usize = 50;

/// Query string for GET /generate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateImageQuery {
    /// Text prompt describing the desired image
    #[serde(default)]
    pub prompt: Option<String>,
}

impl GenerateImageQuery {
    /// Validate the prompt and hand it back untouched.
    ///
    /// Length is counted in characters, not bytes.
    pub fn validate(&self, max_length: usize) -> Result<&str, ApiError> {
        let prompt = match self.prompt.as_deref() {
            Some(p) if !p.trim().is_empty() => p,
            _ => return Err(ApiError::PromptRequired),
        };

        if prompt.chars().count() > max_length {
            return Err(ApiError::PromptTooLong { max_length });
        }

        Ok(prompt)
    }
}

/// First 50 characters of a prompt, with `...` when cut
pub fn prompt_preview(prompt: &str) -> String {
    let mut chars = prompt.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
