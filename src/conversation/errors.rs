// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use thiserror::Error;

/// Reasons a send action is not accepted
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerError {
    #[error("Message is empty")]
    EmptyMessage,

    #[error("A response is still being generated")]
    GenerationInFlight,
}
