// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image generation endpoint handler

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use std::time::Instant;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::request::{prompt_preview, GenerateImageQuery};
use super::response::GenerateImageResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::wavespeed::{wait_for_completion, PredictionError};

/// GET /generate?prompt=... - Generate an image from a text prompt
///
/// Pipeline:
/// 1. Validate prompt (400 if unparseable, missing, blank or too long)
/// 2. Create the prediction upstream
/// 3. Poll until completed, failed or out of attempts
/// 4. Build and return GenerateImageResponse
pub async fn generate_image_handler(
    State(state): State<AppState>,
    query: Result<Query<GenerateImageQuery>, QueryRejection>,
) -> Result<Json<GenerateImageResponse>, ApiError> {
    // 1. Validate request
    let Query(query) = query.map_err(|rejection| {
        warn!("Rejected query string: {}", rejection.body_text());
        ApiError::InvalidQuery(rejection.body_text())
    })?;
    let prompt = query
        .validate(state.config.max_prompt_length)
        .map_err(|e| {
            warn!("Image generation validation failed: {}", e);
            e
        })?;

    let request_id = Uuid::new_v4();
    info!(%request_id, "Starting generation: {}", prompt_preview(prompt));
    let start = Instant::now();

    let outcome: Result<GenerateImageResponse, PredictionError> = async {
        // 2. Create prediction
        let created = state.backend.create_prediction(prompt).await?;
        let prediction_id = created.require_id().map_err(|e| {
            error!(%request_id, "Invalid creation response: {:?}", created);
            e
        })?;
        info!(%request_id, "Prediction {} created via {}", prediction_id, state.backend.name());

        // 3. Wait for completion
        let completed = wait_for_completion(
            state.backend.as_ref(),
            &prediction_id,
            state.config.poll_config(),
        )
        .await?;

        // 4. Build response
        Ok(GenerateImageResponse::from_completed(
            prediction_id,
            completed,
            start.elapsed(),
        ))
    }
    .await;

    match outcome {
        Ok(response) => {
            info!(
                %request_id,
                "Image generated: prediction={}, {}",
                response.metadata.prediction_id, response.metadata.time_taken
            );
            Ok(Json(response))
        }
        Err(e) => {
            error!(%request_id, "Final error: {}", e);
            Err(ApiError::from(e))
        }
    }
}
