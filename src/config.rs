// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Relay configuration loaded from the environment

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::wavespeed::PollConfig;

pub const DEFAULT_API_URL: &str =
    "https://api.wavespeed.ai/api/v2/wavespeed-ai/flux-dev-ultra-fast";
pub const DEFAULT_RESULT_BASE_URL: &str = "https://api.wavespeed.ai/api/v2";

/// Upstream expects `WIDTH*HEIGHT`, not `WIDTHxHEIGHT`
pub const DEFAULT_IMAGE_SIZE: &str = "1024*1024";

/// Errors reported by [`RelayConfig::validate`]
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("WAVESPEED_API_KEY is not set")]
    MissingApiKey,

    #[error("{name} is not a valid URL ({value}): {reason}")]
    InvalidUrl {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0}")]
    Invalid(String),
}

/// Everything the relay needs to talk to WaveSpeed and shape its replies
#[derive(Clone)]
pub struct RelayConfig {
    /// Bearer token for the upstream API
    pub api_key: String,
    /// Model endpoint that creates predictions
    pub api_url: String,
    /// Base for `/predictions/{id}/result`
    pub result_base_url: String,
    /// Longest accepted prompt, in characters
    pub max_prompt_length: usize,
    pub image_size: String,
    pub inference_steps: u32,
    pub poll_interval: Duration,
    pub max_poll_attempts: u32,
    /// Timeout for the creation call
    pub create_timeout: Duration,
    /// Timeout for a single result poll
    pub poll_timeout: Duration,
    /// Base URL advertised in the documentation root
    pub public_url: Option<String>,
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl RelayConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: env::var("WAVESPEED_API_KEY").unwrap_or_default(),
            api_url: env::var("WAVESPEED_API_URL").unwrap_or(defaults.api_url),
            result_base_url: env::var("WAVESPEED_RESULT_BASE_URL")
                .unwrap_or(defaults.result_base_url),
            max_prompt_length: env_or("MAX_PROMPT_LENGTH", defaults.max_prompt_length),
            image_size: env::var("IMAGE_SIZE").unwrap_or(defaults.image_size),
            inference_steps: env_or("INFERENCE_STEPS", defaults.inference_steps),
            poll_interval: Duration::from_millis(env_or("POLL_INTERVAL_MS", 2000)),
            max_poll_attempts: env_or("MAX_POLL_ATTEMPTS", defaults.max_poll_attempts),
            create_timeout: Duration::from_millis(env_or("CREATE_TIMEOUT_MS", 30_000)),
            poll_timeout: Duration::from_millis(env_or("POLL_TIMEOUT_MS", 10_000)),
            public_url: env::var("PUBLIC_URL").ok().filter(|v| !v.trim().is_empty()),
        }
    }

    /// Builder-style override of the API key, mostly for tests and embedding
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        check_url("WAVESPEED_API_URL", &self.api_url)?;
        check_url("WAVESPEED_RESULT_BASE_URL", &self.result_base_url)?;
        if let Some(ref public_url) = self.public_url {
            check_url("PUBLIC_URL", public_url)?;
        }
        if self.max_prompt_length == 0 {
            return Err(ConfigError::Invalid(
                "MAX_PROMPT_LENGTH must be greater than 0".to_string(),
            ));
        }
        if self.max_poll_attempts == 0 {
            return Err(ConfigError::Invalid(
                "MAX_POLL_ATTEMPTS must be greater than 0".to_string(),
            ));
        }
        if self.inference_steps == 0 {
            return Err(ConfigError::Invalid(
                "INFERENCE_STEPS must be greater than 0".to_string(),
            ));
        }
        let mut dims = self.image_size.split('*');
        let valid_size = matches!(
            (dims.next(), dims.next(), dims.next()),
            (Some(w), Some(h), None) if w.parse::<u32>().is_ok() && h.parse::<u32>().is_ok()
        );
        if !valid_size {
            return Err(ConfigError::Invalid(format!(
                "IMAGE_SIZE must look like WIDTH*HEIGHT, got '{}'",
                self.image_size
            )));
        }
        Ok(())
    }

    pub fn poll_config(&self) -> PollConfig {
        PollConfig {
            interval: self.poll_interval,
            max_attempts: self.max_poll_attempts,
        }
    }

    /// Image size as people write it, e.g. `1024x1024`
    pub fn image_size_label(&self) -> String {
        self.image_size.replace('*', "x")
    }

    /// Public base URL, falling back to localhost on the bound port
    pub fn public_url_for(&self, port: u16) -> String {
        match self.public_url {
            Some(ref url) => url.trim_end_matches('/').to_string(),
            None => format!("http://localhost:{}", port),
        }
    }
}

fn check_url(name: &'static str, value: &str) -> Result<(), ConfigError> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidUrl {
            name,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            result_base_url: DEFAULT_RESULT_BASE_URL.to_string(),
            max_prompt_length: 500,
            image_size: DEFAULT_IMAGE_SIZE.to_string(),
            inference_steps: 28,
            poll_interval: Duration::from_secs(2),
            max_poll_attempts: 60,
            create_timeout: Duration::from_secs(30),
            poll_timeout: Duration::from_secs(10),
            public_url: None,
        }
    }
}

// Keeps the API key out of logs.
impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("result_base_url", &self.result_base_url)
            .field("max_prompt_length", &self.max_prompt_length)
            .field("image_size", &self.image_size)
            .field("inference_steps", &self.inference_steps)
            .field("poll_interval", &self.poll_interval)
            .field("max_poll_attempts", &self.max_poll_attempts)
            .field("create_timeout", &self.create_timeout)
            .field("poll_timeout", &self.poll_timeout)
            .field("public_url", &self.public_url)
            .finish()
    }
}
