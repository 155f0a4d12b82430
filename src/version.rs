// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the relay

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Human-readable service name shown on the documentation root
pub const SERVICE_NAME: &str = "Wavespeed AI Image API";

/// Get the full version string
pub fn get_version_string() -> String {
    format!("{} v{}", SERVICE_NAME, VERSION_NUMBER)
}
