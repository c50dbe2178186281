// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for Persona Chat

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-persona-chat-2026-10-16";

/// Semantic version number
pub const VERSION_NUMBER: &str = "0.1.0";

/// Major version number
pub const VERSION_MAJOR: u32 = 0;

/// Minor version number
pub const VERSION_MINOR: u32 = 1;

/// Patch version number
pub const VERSION_PATCH: u32 = 0;

/// Build date
pub const BUILD_DATE: &str = "2026-10-16";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "persona-catalog",
    "custom-persona-files",
    "streaming-replies",
    "single-flight-input",
    "gemma-turn-format",
    "partial-result-coalescing",
];

/// Whether this build carries the llama.cpp engine
pub fn has_native_engine() -> bool {
    cfg!(feature = "llama")
}

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Persona Chat {} ({})", VERSION_NUMBER, BUILD_DATE)
}

/// Get full version info as JSON
pub fn get_version_info() -> serde_json::Value {
    serde_json::json!({
        "version": VERSION_NUMBER,
        "build": VERSION,
        "date": BUILD_DATE,
        "features": FEATURES,
        "native_engine": has_native_engine(),
    })
}
