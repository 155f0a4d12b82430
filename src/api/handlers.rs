// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::api::http_server::AppState;
use crate::version::{SERVICE_NAME, VERSION_NUMBER};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Self-description served at `/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    pub endpoints: Endpoints,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoints {
    pub generate: EndpointInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointInfo {
    pub method: String,
    pub url: String,
    pub parameters: GenerateParameters,
    pub example: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateParameters {
    pub prompt: String,
    pub notes: String,
}

impl ServiceInfo {
    pub fn describe(state: &AppState) -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
            version: VERSION_NUMBER.to_string(),
            endpoints: Endpoints {
                generate: EndpointInfo {
                    method: "GET".to_string(),
                    url: "/generate?prompt=YOUR_TEXT".to_string(),
                    parameters: GenerateParameters {
                        prompt: "Description of desired image".to_string(),
                        notes: format!(
                            "Max {} characters, generates {} images",
                            state.config.max_prompt_length,
                            state.config.image_size_label()
                        ),
                    },
                    example: format!(
                        "{}/generate?prompt=a%20sunset%20over%20mountains",
                        state.public_url
                    ),
                },
            },
        }
    }
}

/// GET / - service documentation
pub async fn root_handler(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(ServiceInfo::describe(&state))
}

/// GET /health - liveness only, never touches upstream
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
