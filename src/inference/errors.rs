// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error types for the inference session
//!
//! - Model artifact missing at session start (terminal, no retry)
//! - Engine construction failures
//! - Failures surfaced while a response is generating

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the inference session and its result stream
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    /// No model artifact at the configured path
    #[error("Model not found at path: {}", path.display())]
    ModelNotFound { path: PathBuf },

    /// The engine refused to build from the model artifact
    #[error("Failed to initialize inference engine: {0}")]
    EngineInit(String),

    /// The engine failed to start or complete a generation
    #[error("Generation failed: {0}")]
    Generation(String),

    /// The result stream ended before a final increment arrived
    #[error("Result stream closed before the response completed")]
    Closed,
}

impl SessionError {
    /// Whether the error ends the session rather than a single response
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ModelNotFound { .. } | Self::EngineInit(_))
    }
}
