// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::wavespeed::PredictionError;

pub const SUGGESTION_RETRY: &str = "Please try again later";
pub const SUGGESTION_SIZE: &str = "Invalid image size parameter";
pub const SUGGESTION_PROMPT: &str = "Please check your prompt text";

/// Failure body returned by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub details: String,
    pub suggestion: String,
}

#[derive(Debug, Clone)]
pub enum ApiError {
    /// Query string could not be parsed, e.g. a repeated `prompt`
    InvalidQuery(String),
    PromptRequired,
    PromptTooLong { max_length: usize },
    /// Anything that went wrong while creating or polling a prediction
    GenerationFailed(String),
}

/// Map a failure message to a status code and suggestion.
///
/// Upstream reports parameter problems only as text, so the message is
/// searched for `size`/`1024` first and `prompt` second.
pub fn classify_failure(message: &str) -> (StatusCode, &'static str) {
    if message.contains("size") || message.contains("1024") {
        (StatusCode::BAD_REQUEST, SUGGESTION_SIZE)
    } else if message.contains("prompt") {
        (StatusCode::BAD_REQUEST, SUGGESTION_PROMPT)
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, SUGGESTION_RETRY)
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidQuery(_)
            | ApiError::PromptRequired
            | ApiError::PromptTooLong { .. } => StatusCode::BAD_REQUEST,
            ApiError::GenerationFailed(msg) => classify_failure(msg).0,
        }
    }

    pub fn suggestion(&self) -> &'static str {
        match self {
            ApiError::InvalidQuery(_)
            | ApiError::PromptRequired
            | ApiError::PromptTooLong { .. } => SUGGESTION_PROMPT,
            ApiError::GenerationFailed(msg) => classify_failure(msg).1,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        let (error, details) = match self {
            ApiError::InvalidQuery(reason) => ("Invalid query", reason.clone()),
            ApiError::PromptRequired => (
                "Prompt required",
                "Add ?prompt=description to the URL".to_string(),
            ),
            ApiError::PromptTooLong { max_length } => (
                "Prompt too long",
                format!("Max {} characters allowed", max_length),
            ),
            ApiError::GenerationFailed(msg) => ("Generation failed", msg.clone()),
        };

        ErrorResponse {
            success: false,
            error: error.to_string(),
            details,
            suggestion: self.suggestion().to_string(),
        }
    }
}

impl From<PredictionError> for ApiError {
    fn from(e: PredictionError) -> Self {
        ApiError::GenerationFailed(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_response())).into_response()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidQuery(reason) => write!(f, "Invalid query: {}", reason),
            ApiError::PromptRequired => write!(f, "Prompt required"),
            ApiError::PromptTooLong { max_length } => {
                write!(f, "Prompt too long (max {} characters)", max_length)
            }
            ApiError::GenerationFailed(msg) => write!(f, "Generation failed: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}
