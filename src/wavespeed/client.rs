// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! WaveSpeed AI REST client for prediction creation and result polling

use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, info};

use super::backend::PredictionBackend;
use super::types::{ApiEnvelope, Prediction, PredictionError, PredictionRequest};
use crate::config::RelayConfig;

/// One image per prediction
const NUM_IMAGES: u32 = 1;

/// Upstream chooses the seed
const RANDOM_SEED: i64 = -1;

/// Client for the WaveSpeed prediction API
pub struct WaveSpeedClient {
    client: Client,
    api_key: String,
    api_url: String,
    result_base_url: String,
    image_size: String,
    inference_steps: u32,
    create_timeout: Duration,
    poll_timeout: Duration,
}

impl WaveSpeedClient {
    /// Create a new WaveSpeedClient from relay configuration
    pub fn new(config: &RelayConfig) -> Result<Self, PredictionError> {
        let client = Client::builder()
            .build()
            .map_err(|e| PredictionError::Http(e.to_string()))?;

        let result_base_url = config.result_base_url.trim_end_matches('/').to_string();
        info!(
            "WaveSpeed client configured: model endpoint={}, results={}",
            config.api_url, result_base_url
        );

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_url: config.api_url.clone(),
            result_base_url,
            image_size: config.image_size.clone(),
            inference_steps: config.inference_steps,
            create_timeout: config.create_timeout,
            poll_timeout: config.poll_timeout,
        })
    }

    /// Creation body for a prompt, with the fixed generation parameters
    pub fn prediction_request(&self, prompt: &str) -> PredictionRequest {
        PredictionRequest {
            num_images: NUM_IMAGES,
            num_inference_steps: self.inference_steps,
            prompt: prompt.to_string(),
            seed: RANDOM_SEED,
            size: self.image_size.clone(),
        }
    }

    /// Result-polling URL for a prediction
    pub fn result_url(&self, prediction_id: &str) -> String {
        format!(
            "{}/predictions/{}/result",
            self.result_base_url, prediction_id
        )
    }

    async fn read_prediction(response: Response) -> Result<Prediction, PredictionError> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiEnvelope>(&text)
                .ok()
                .and_then(|envelope| envelope.message)
                .filter(|m| !m.is_empty())
                .unwrap_or(text);
            return Err(PredictionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ApiEnvelope = response.json().await.map_err(transport_error)?;
        Ok(envelope.data.unwrap_or_default())
    }
}

/// Sort a reqwest failure into retryable and fatal buckets
pub fn transport_error(e: reqwest::Error) -> PredictionError {
    if e.is_timeout() || e.is_connect() || e.is_body() {
        PredictionError::Transient(e.to_string())
    } else if e.is_decode() {
        PredictionError::Decode(e.to_string())
    } else {
        PredictionError::Http(e.to_string())
    }
}

#[async_trait]
impl PredictionBackend for WaveSpeedClient {
    async fn create_prediction(&self, prompt: &str) -> Result<Prediction, PredictionError> {
        let body = self.prediction_request(prompt);
        debug!("WaveSpeed create POST {}", self.api_url);

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .timeout(self.create_timeout)
            .send()
            .await
            .map_err(transport_error)?;

        Self::read_prediction(response).await
    }

    async fn fetch_result(&self, prediction_id: &str) -> Result<Prediction, PredictionError> {
        let url = self.result_url(prediction_id);
        debug!("WaveSpeed result GET {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .timeout(self.poll_timeout)
            .send()
            .await
            .map_err(transport_error)?;

        Self::read_prediction(response).await
    }

    fn name(&self) -> &'static str {
        "wavespeed"
    }
}
