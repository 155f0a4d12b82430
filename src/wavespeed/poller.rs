// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Bounded poll loop that waits for a prediction to finish

use std::time::Duration;
use tracing::{error, info, warn};

use super::backend::PredictionBackend;
use super::types::{Prediction, PredictionError, PredictionStatus};

/// How often and how long to poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_attempts: 60,
        }
    }
}

/// A prediction that reached `completed` with at least one output
#[derive(Debug, Clone)]
pub struct CompletedPrediction {
    pub image_url: String,
    pub prediction: Prediction,
    /// Polls spent, including retried ones
    pub attempts: u32,
}

/// Poll `prediction_id` until it completes, fails, or the attempt cap runs out.
///
/// A transient error on one poll uses up that attempt and the loop carries on
/// after the usual interval. Any other error ends the loop.
pub async fn wait_for_completion(
    backend: &dyn PredictionBackend,
    prediction_id: &str,
    config: PollConfig,
) -> Result<CompletedPrediction, PredictionError> {
    for attempt in 1..=config.max_attempts {
        match backend.fetch_result(prediction_id).await {
            Ok(prediction) => {
                info!("Poll {}: Status {}", attempt, prediction.status_label());
                match prediction.status {
                    Some(PredictionStatus::Completed) => {
                        let image_url = prediction
                            .first_output()
                            .ok_or(PredictionError::NoOutputs)?
                            .to_string();
                        return Ok(CompletedPrediction {
                            image_url,
                            prediction,
                            attempts: attempt,
                        });
                    }
                    Some(PredictionStatus::Failed) => {
                        return Err(PredictionError::Failed(prediction.failure_message()));
                    }
                    _ => {}
                }
            }
            Err(e) if e.is_transient() => {
                warn!("Poll {} error, retrying: {}", attempt, e);
            }
            Err(e) => {
                error!("Poll {} error: {}", attempt, e);
                return Err(e);
            }
        }

        if attempt < config.max_attempts {
            tokio::time::sleep(config.interval).await;
        }
    }

    Err(PredictionError::PollTimeout {
        attempts: config.max_attempts,
    })
}
