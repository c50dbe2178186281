// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod app;
pub mod cli;
pub mod config;
pub mod conversation;
pub mod inference;
pub mod persona;
pub mod version;

// Re-export main types
pub use app::{App, AppError, Route};
pub use config::SessionConfig;
pub use conversation::{Author, ConversationController, ControllerError, Message, Transcript};
pub use inference::{
    BackendFactory, Increment, InferenceSession, LlmBackend, OverflowPolicy, SessionError,
    SessionSlot,
};
pub use persona::{PersonaCatalog, PersonaDescriptor};
