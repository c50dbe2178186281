// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod session;

pub use session::{ConfigError, SessionConfig, DEFAULT_MAX_TOKENS, DEFAULT_MODEL_PATH};
