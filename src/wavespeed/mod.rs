// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! WaveSpeed AI image generation
//!
//! - `client`: reqwest client for prediction creation and result polling
//! - `backend`: the trait the HTTP layer talks to
//! - `poller`: bounded wait for a prediction to finish

pub mod backend;
pub mod client;
pub mod poller;
pub mod types;

pub use backend::PredictionBackend;
pub use client::WaveSpeedClient;
pub use poller::{wait_for_completion, CompletedPrediction, PollConfig};
pub use types::{
    ApiEnvelope, Prediction, PredictionError, PredictionRequest, PredictionStatus, Timings,
};
