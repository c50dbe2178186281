// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod controller;
pub mod errors;
pub mod message;
pub mod transcript;

pub use controller::ConversationController;
pub use errors::ControllerError;
pub use message::{Author, Message};
pub use transcript::Transcript;
