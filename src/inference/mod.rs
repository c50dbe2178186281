// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Export all submodules and their public types
pub mod engine;
pub mod errors;
#[cfg(feature = "llama")]
pub mod llama;
pub mod partial;
pub mod prompt;
pub mod session;

// Re-export main types for convenience
pub use engine::{
    default_backend_factory, BackendFactory, EngineOptions, ErrorListener, LlmBackend,
    ResultListener, UnavailableBackendFactory,
};
pub use errors::SessionError;
#[cfg(feature = "llama")]
pub use llama::LlamaBackendFactory;
pub use partial::{Increment, OverflowPolicy, PartialFrame, PartialResults, PartialResultsHub};
pub use prompt::{clean_prompt, compose_prompt, format_for_engine, TURN_DELIMITER};
pub use session::{InferenceSession, SessionSlot};
