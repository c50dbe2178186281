// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Boundary to the native inference engine
//!
//! The engine is an opaque capability: it is built from a model artifact and
//! a token budget, accepts a prompt, and reports partial results through a
//! callback until it signals completion.

use anyhow::Result;
use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Invoked zero or more times per generation with `(partial_text, is_done)`
pub type ResultListener = Arc<dyn Fn(String, bool) + Send + Sync>;

/// Invoked when a generation fails after it was started
pub type ErrorListener = Arc<dyn Fn(String) + Send + Sync>;

/// Options handed to the engine at construction
#[derive(Clone)]
pub struct EngineOptions {
    pub model_path: PathBuf,
    pub max_tokens: usize,
    pub context_size: usize,
    pub gpu_layers: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub result_listener: ResultListener,
    pub error_listener: ErrorListener,
}

impl fmt::Debug for EngineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineOptions")
            .field("model_path", &self.model_path)
            .field("max_tokens", &self.max_tokens)
            .field("context_size", &self.context_size)
            .field("gpu_layers", &self.gpu_layers)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .finish_non_exhaustive()
    }
}

/// A constructed engine instance
///
/// `generate_response_async` must return without waiting for the response.
/// Calling it again while a generation is running is undefined; callers
/// gate it themselves.
pub trait LlmBackend: Send + Sync {
    fn generate_response_async(&self, prompt: &str) -> Result<()>;
}

/// Builds engine instances from options
#[async_trait]
pub trait BackendFactory: Send + Sync {
    async fn create(&self, options: EngineOptions) -> Result<Arc<dyn LlmBackend>>;
}

/// Factory used when the crate is built without a native engine
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableBackendFactory;

#[async_trait]
impl BackendFactory for UnavailableBackendFactory {
    async fn create(&self, _options: EngineOptions) -> Result<Arc<dyn LlmBackend>> {
        Err(anyhow::anyhow!(
            "persona-chat was built without an inference engine (enable the `llama` feature)"
        ))
    }
}

/// The factory for the engine compiled into this build
pub fn default_backend_factory() -> Arc<dyn BackendFactory> {
    #[cfg(feature = "llama")]
    {
        Arc::new(crate::inference::llama::LlamaBackendFactory)
    }
    #[cfg(not(feature = "llama"))]
    {
        Arc::new(UnavailableBackendFactory)
    }
}
