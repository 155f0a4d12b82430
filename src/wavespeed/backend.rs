// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prediction backend trait definition

use async_trait::async_trait;

use super::types::{Prediction, PredictionError};

/// Anything that can start a prediction and report on it
///
/// The HTTP handler and the poll loop only see this trait, so tests can
/// drive them with a scripted backend instead of the live API.
#[async_trait]
pub trait PredictionBackend: Send + Sync {
    /// Submit a prompt and return the freshly created prediction
    async fn create_prediction(&self, prompt: &str) -> Result<Prediction, PredictionError>;

    /// Fetch the current state of a prediction
    async fn fetch_result(&self, prediction_id: &str) -> Result<Prediction, PredictionError>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}
