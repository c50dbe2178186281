// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Persona catalog
//!
//! One table maps persona names to system prompts and portraits. It is
//! loaded once at startup and shared read-only by the selection route and
//! every conversation.

mod builtin;
mod catalog;

pub use catalog::{
    PersonaCatalog, PersonaDescriptor, PersonaError, DEFAULT_PERSONA, FALLBACK_CONTEXT,
};
