// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Scripted prediction backend shared by the integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wavespeed_relay::{
    api::AppState,
    config::RelayConfig,
    wavespeed::{Prediction, PredictionBackend, PredictionError, PredictionStatus, Timings},
};

type Reply = Result<Prediction, PredictionError>;

/// Backend that replays canned replies; polls past the script stay `processing`
pub struct ScriptedBackend {
    create: Mutex<Option<Reply>>,
    polls: Mutex<VecDeque<Reply>>,
    pub create_calls: AtomicU32,
    pub poll_calls: AtomicU32,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    /// Creation succeeds with `id`
    pub fn created(id: &str) -> Self {
        Self::with_create(Ok(Prediction {
            id: Some(id.to_string()),
            status: Some(PredictionStatus::Created),
            ..Default::default()
        }))
    }

    pub fn with_create(reply: Reply) -> Self {
        Self {
            create: Mutex::new(Some(reply)),
            polls: Mutex::new(VecDeque::new()),
            create_calls: AtomicU32::new(0),
            poll_calls: AtomicU32::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn then_poll(self, reply: Reply) -> Self {
        self.polls.lock().unwrap().push_back(reply);
        self
    }

    pub fn create_count(&self) -> u32 {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn poll_count(&self) -> u32 {
        self.poll_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PredictionBackend for ScriptedBackend {
    async fn create_prediction(&self, prompt: &str) -> Result<Prediction, PredictionError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.create
            .lock()
            .unwrap()
            .take()
            .unwrap_or(Err(PredictionError::Http("create called twice".to_string())))
    }

    async fn fetch_result(&self, prediction_id: &str) -> Result<Prediction, PredictionError> {
        self.poll_calls.fetch_add(1, Ordering::SeqCst);
        self.polls
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(status(prediction_id, PredictionStatus::Processing)))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

pub fn status(id: &str, status: PredictionStatus) -> Prediction {
    Prediction {
        id: Some(id.to_string()),
        status: Some(status),
        ..Default::default()
    }
}

pub fn completed(id: &str, url: &str) -> Prediction {
    Prediction {
        id: Some(id.to_string()),
        status: Some(PredictionStatus::Completed),
        outputs: Some(vec![url.to_string()]),
        created_at: Some("2025-03-01T10:00:00.000Z".to_string()),
        timings: Some(Timings {
            inference: Some(850.0),
        }),
        ..Default::default()
    }
}

pub fn failed(id: &str, error: &str) -> Prediction {
    Prediction {
        id: Some(id.to_string()),
        status: Some(PredictionStatus::Failed),
        error: Some(error.to_string()),
        ..Default::default()
    }
}

/// Config with a fast poll loop
pub fn test_config(max_poll_attempts: u32) -> RelayConfig {
    let mut config = RelayConfig::default().with_api_key("test-key");
    config.poll_interval = Duration::from_millis(1);
    config.max_poll_attempts = max_poll_attempts;
    config
}

pub fn test_state(backend: Arc<ScriptedBackend>, max_poll_attempts: u32) -> AppState {
    AppState::new(
        backend,
        test_config(max_poll_attempts),
        "http://localhost:3000",
    )
}
