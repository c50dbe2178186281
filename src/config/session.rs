// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the inference session

use std::env;
use std::path::PathBuf;
use thiserror::Error;

use crate::inference::OverflowPolicy;

/// Location the model artifact is provisioned to on device
pub const DEFAULT_MODEL_PATH: &str = "/data/local/tmp/llm/gemma-2b-it-cpu-int4.bin";

/// Output token budget handed to the engine
pub const DEFAULT_MAX_TOKENS: usize = 1024;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("max_tokens must be greater than 0")]
    ZeroMaxTokens,
    #[error("context_size must be greater than 0")]
    ZeroContextSize,
    #[error("temperature must be within [0, 2], got {0}")]
    Temperature(f32),
    #[error("top_p must be within (0, 1], got {0}")]
    TopP(f32),
}

/// Settings used to build the inference session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Path of the pre-provisioned model artifact
    pub model_path: PathBuf,
    /// Maximum tokens generated per response
    pub max_tokens: usize,
    /// Layers offloaded to the GPU (0 = CPU only)
    pub gpu_layers: u32,
    /// Context window in tokens
    pub context_size: usize,
    pub temperature: f32,
    pub top_p: f32,
    /// How unconsumed partial results are overwritten
    pub overflow_policy: OverflowPolicy,
}

impl SessionConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            model_path: env::var("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),
            max_tokens: parse_env("MAX_TOKENS").unwrap_or(defaults.max_tokens),
            gpu_layers: parse_env("GPU_LAYERS").unwrap_or(defaults.gpu_layers),
            context_size: parse_env("MAX_CONTEXT_LENGTH").unwrap_or(defaults.context_size),
            temperature: parse_env("LLM_TEMPERATURE").unwrap_or(defaults.temperature),
            top_p: parse_env("LLM_TOP_P").unwrap_or(defaults.top_p),
            overflow_policy: env::var("PARTIAL_OVERFLOW")
                .ok()
                .and_then(|v| OverflowPolicy::from_str(&v))
                .unwrap_or(defaults.overflow_policy),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_tokens == 0 {
            return Err(ConfigError::ZeroMaxTokens);
        }
        if self.context_size == 0 {
            return Err(ConfigError::ZeroContextSize);
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::Temperature(self.temperature));
        }
        if !(self.top_p > 0.0 && self.top_p <= 1.0) {
            return Err(ConfigError::TopP(self.top_p));
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            max_tokens: DEFAULT_MAX_TOKENS,
            gpu_layers: 0,
            context_size: 2048,
            temperature: 0.8,
            top_p: 0.95,
            overflow_policy: OverflowPolicy::Coalesce,
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
