// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image generation API endpoint module
//!
//! Provides GET /generate?prompt=... for text-to-image generation.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::generate_image_handler;
pub use request::{prompt_preview, GenerateImageQuery};
pub use response::{GenerateImageResponse, GenerationMetadata};
