// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Wire types for the WaveSpeed prediction API

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body of the prediction creation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub num_images: u32,
    pub num_inference_steps: u32,
    pub prompt: String,
    /// `-1` lets upstream pick a random seed
    pub seed: i64,
    /// `WIDTH*HEIGHT`
    pub size: String,
}

/// Lifecycle state reported by upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    Created,
    Pending,
    Processing,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

impl PredictionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionStatus::Created => "created",
            PredictionStatus::Pending => "pending",
            PredictionStatus::Processing => "processing",
            PredictionStatus::Completed => "completed",
            PredictionStatus::Failed => "failed",
            PredictionStatus::Unknown => "unknown",
        }
    }
}

/// `{code, message, data}` envelope wrapped around every upstream reply
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Prediction>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timings {
    /// Milliseconds spent in inference
    #[serde(default)]
    pub inference: Option<f64>,
}

/// The `data` object of a creation or result reply
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<PredictionStatus>,
    #[serde(default)]
    pub outputs: Option<Vec<String>>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub timings: Option<Timings>,
}

impl Prediction {
    /// The prediction id, treating an empty string as absent
    pub fn require_id(&self) -> Result<String, PredictionError> {
        self.id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .ok_or(PredictionError::MissingPredictionId)
    }

    pub fn status_label(&self) -> &'static str {
        self.status.map(|s| s.as_str()).unwrap_or("unknown")
    }

    pub fn first_output(&self) -> Option<&str> {
        self.outputs
            .as_ref()
            .and_then(|outputs| outputs.first())
            .map(String::as_str)
    }

    /// Upstream error text, or a generic message when upstream gave none
    pub fn failure_message(&self) -> String {
        self.error
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or("API reported failure")
            .to_string()
    }

    /// Inference time as `"<N>ms"`, or `"unknownms"`
    pub fn inference_time_label(&self) -> String {
        match self.timings.as_ref().and_then(|t| t.inference) {
            Some(ms) if ms > 0.0 => format!("{}ms", ms),
            _ => "unknownms".to_string(),
        }
    }
}

/// Errors from creating or polling a prediction
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("API did not return prediction ID")]
    MissingPredictionId,

    #[error("No outputs in completed prediction")]
    NoOutputs,

    /// Upstream marked the prediction failed
    #[error("{0}")]
    Failed(String),

    #[error("Timeout waiting for image generation")]
    PollTimeout { attempts: u32 },

    /// Request timeout or dropped connection; safe to retry a poll
    #[error("Transient upstream error: {0}")]
    Transient(String),

    #[error("Upstream returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Request failed: {0}")]
    Http(String),

    #[error("Invalid upstream response: {0}")]
    Decode(String),
}

impl PredictionError {
    pub fn is_transient(&self) -> bool {
        matches!(self, PredictionError::Transient(_))
    }
}
