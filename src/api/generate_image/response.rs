// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image generation response types

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::wavespeed::CompletedPrediction;

/// Response from a successful generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateImageResponse {
    /// Always `true`; failures use `ErrorResponse`
    pub success: bool,
    /// URL of the first generated image
    pub image_url: String,
    pub metadata: GenerationMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationMetadata {
    pub prediction_id: String,
    /// Wall-clock time for create + poll, e.g. `"5123ms"`
    pub time_taken: String,
    /// Upstream inference time, e.g. `"850ms"` or `"unknownms"`
    pub inference_time: String,
    pub created_at: Option<String>,
}

impl GenerateImageResponse {
    pub fn from_completed(
        prediction_id: String,
        completed: CompletedPrediction,
        elapsed: Duration,
    ) -> Self {
        let inference_time = completed.prediction.inference_time_label();
        Self {
            success: true,
            image_url: completed.image_url,
            metadata: GenerationMetadata {
                prediction_id,
                time_taken: format!("{}ms", elapsed.as_millis()),
                inference_time,
                created_at: completed.prediction.created_at,
            },
        }
    }
}
