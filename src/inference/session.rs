// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! The inference session: one engine instance per application
//!
//! [`SessionSlot`] gates construction. The first `get_instance` call checks
//! the model artifact and builds the engine; every later call hands back the
//! same [`InferenceSession`] without touching the filesystem again.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, error, info};

use super::engine::{BackendFactory, EngineOptions, ErrorListener, LlmBackend, ResultListener};
use super::errors::SessionError;
use super::partial::{PartialResults, PartialResultsHub};
use super::prompt::format_for_engine;
use crate::config::SessionConfig;

pub struct InferenceSession {
    backend: Arc<dyn LlmBackend>,
    hub: Arc<PartialResultsHub>,
    model_path: PathBuf,
    max_tokens: usize,
}

impl InferenceSession {
    /// Validate the model artifact and build the engine
    pub async fn start(
        config: &SessionConfig,
        factory: &dyn BackendFactory,
    ) -> Result<Self, SessionError> {
        if !model_exists(&config.model_path).await {
            error!("Model not found at path: {}", config.model_path.display());
            return Err(SessionError::ModelNotFound {
                path: config.model_path.clone(),
            });
        }

        let hub = Arc::new(PartialResultsHub::new(config.overflow_policy));

        let result_hub = Arc::clone(&hub);
        let result_listener: ResultListener = Arc::new(move |partial, done| {
            result_hub.publish(partial, done);
        });
        let error_hub = Arc::clone(&hub);
        let error_listener: ErrorListener = Arc::new(move |message| {
            error_hub.publish_error(SessionError::Generation(message));
        });

        let options = EngineOptions {
            model_path: config.model_path.clone(),
            max_tokens: config.max_tokens,
            context_size: config.context_size,
            gpu_layers: config.gpu_layers,
            temperature: config.temperature,
            top_p: config.top_p,
            result_listener,
            error_listener,
        };

        info!(
            "Building inference engine: model={}, max_tokens={}, overflow={}",
            config.model_path.display(),
            config.max_tokens,
            config.overflow_policy.as_str()
        );
        let backend = factory
            .create(options)
            .await
            .map_err(|e| SessionError::EngineInit(format!("{:#}", e)))?;

        Ok(Self {
            backend,
            hub,
            model_path: config.model_path.clone(),
            max_tokens: config.max_tokens,
        })
    }

    /// Shape the prompt and start a generation; results arrive on
    /// [`partial_results`](Self::partial_results)
    pub fn generate_response_async(&self, prompt: &str) -> Result<(), SessionError> {
        let formatted = format_for_engine(prompt);
        debug!("Generating response for prompt: {:?}", formatted);
        self.backend
            .generate_response_async(&formatted)
            .map_err(|e| SessionError::Generation(format!("{:#}", e)))
    }

    /// Live subscription to `(text, is_final)` increments
    pub fn partial_results(&self) -> PartialResults {
        self.hub.subscribe()
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }
}

impl fmt::Debug for InferenceSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceSession")
            .field("model_path", &self.model_path)
            .field("max_tokens", &self.max_tokens)
            .field("overflow_policy", &self.hub.policy())
            .finish_non_exhaustive()
    }
}

impl Drop for InferenceSession {
    fn drop(&mut self) {
        self.hub.close();
    }
}

async fn model_exists(path: &Path) -> bool {
    tokio::fs::metadata(path).await.is_ok()
}

/// Owner of the application's single inference session
pub struct SessionSlot {
    config: SessionConfig,
    factory: Arc<dyn BackendFactory>,
    cell: OnceCell<Arc<InferenceSession>>,
}

impl SessionSlot {
    pub fn new(config: SessionConfig, factory: Arc<dyn BackendFactory>) -> Self {
        Self {
            config,
            factory,
            cell: OnceCell::new(),
        }
    }

    /// Return the session, building it on first use
    ///
    /// Concurrent first calls share one construction. A failed construction
    /// is not cached.
    pub async fn get_instance(&self) -> Result<Arc<InferenceSession>, SessionError> {
        let session = self
            .cell
            .get_or_try_init(|| async {
                InferenceSession::start(&self.config, self.factory.as_ref())
                    .await
                    .map(Arc::new)
            })
            .await?;
        Ok(Arc::clone(session))
    }

    /// The session if it was already built
    pub fn get(&self) -> Option<Arc<InferenceSession>> {
        self.cell.get().cloned()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}
