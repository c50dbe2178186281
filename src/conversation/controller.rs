// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Conversation controller
//!
//! Turns a send action into a transcript entry, starts a generation and
//! stitches the streamed increments into the model's reply. While a reply is
//! streaming, input is disabled; that flag is the only thing keeping a second
//! generation from starting.

use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::errors::ControllerError;
use super::message::Author;
use super::transcript::Transcript;
use crate::inference::{compose_prompt, InferenceSession, PartialResults, SessionError};
use crate::persona::PersonaCatalog;

/// Observable UI state shared with the streaming task
struct ChatState {
    transcript: watch::Sender<Transcript>,
    input_enabled: watch::Sender<bool>,
}

impl ChatState {
    fn set_input_enabled(&self, enabled: bool) {
        self.input_enabled.send_replace(enabled);
    }

    fn fail(&self, message_id: &str, error: &SessionError) {
        warn!("Response failed: {}", error);
        let text = error.to_string();
        self.transcript.send_modify(|t| {
            t.complete_with_error(message_id, &text);
        });
        self.set_input_enabled(true);
    }
}

pub struct ConversationController {
    session: Arc<InferenceSession>,
    persona_name: String,
    persona_context: String,
    state: Arc<ChatState>,
}

impl ConversationController {
    pub fn new(
        session: Arc<InferenceSession>,
        persona_name: impl Into<String>,
        persona_context: impl Into<String>,
    ) -> Self {
        let (transcript, _) = watch::channel(Transcript::new());
        let (input_enabled, _) = watch::channel(true);
        Self {
            session,
            persona_name: persona_name.into(),
            persona_context: persona_context.into(),
            state: Arc::new(ChatState {
                transcript,
                input_enabled,
            }),
        }
    }

    /// Bind a conversation to a persona from the catalog
    pub fn for_persona(
        session: Arc<InferenceSession>,
        catalog: &PersonaCatalog,
        persona_name: &str,
    ) -> Self {
        let context = catalog.context_for(persona_name);
        Self::new(session, persona_name, context)
    }

    /// Send with the bound persona's context
    pub fn send(&self, user_message: &str) -> Result<JoinHandle<()>, ControllerError> {
        self.send_message(user_message, &self.persona_context)
    }

    /// Accept a user message and start streaming the reply
    ///
    /// Must be called from within a Tokio runtime. The returned task ends once
    /// the reply is complete or has failed; errors never escape it.
    pub fn send_message(
        &self,
        user_message: &str,
        persona_context: &str,
    ) -> Result<JoinHandle<()>, ControllerError> {
        if user_message.trim().is_empty() {
            return Err(ControllerError::EmptyMessage);
        }
        if !self.is_input_enabled() {
            return Err(ControllerError::GenerationInFlight);
        }

        let mut placeholder = None;
        self.state.transcript.send_if_modified(|t| {
            if t.in_progress().is_some() {
                return false;
            }
            t.add_message(user_message, Author::User);
            placeholder = t.create_loading_message();
            true
        });
        let message_id = placeholder.ok_or(ControllerError::GenerationInFlight)?;
        self.state.set_input_enabled(false);

        info!("Sending message to {}", self.persona_name);
        let prompt = compose_prompt(persona_context, user_message);
        // Subscribe before starting so no increment can slip past
        let results = self.session.partial_results();
        let session = Arc::clone(&self.session);
        let state = Arc::clone(&self.state);
        Ok(tokio::spawn(stream_response(
            session, state, results, prompt, message_id,
        )))
    }

    pub fn persona_name(&self) -> &str {
        &self.persona_name
    }

    pub fn persona_context(&self) -> &str {
        &self.persona_context
    }

    pub fn transcript(&self) -> Transcript {
        self.state.transcript.borrow().clone()
    }

    pub fn subscribe_transcript(&self) -> watch::Receiver<Transcript> {
        self.state.transcript.subscribe()
    }

    pub fn is_input_enabled(&self) -> bool {
        *self.state.input_enabled.borrow()
    }

    pub fn subscribe_input_enabled(&self) -> watch::Receiver<bool> {
        self.state.input_enabled.subscribe()
    }
}

async fn stream_response(
    session: Arc<InferenceSession>,
    state: Arc<ChatState>,
    mut results: PartialResults,
    prompt: String,
    message_id: String,
) {
    if let Err(e) = session.generate_response_async(&prompt) {
        state.fail(&message_id, &e);
        return;
    }

    let mut index = 0usize;
    loop {
        match results.recv().await {
            Some(Ok(increment)) => {
                state.transcript.send_modify(|t| {
                    if index == 0 {
                        t.append_first_message(&message_id, &increment.text, increment.is_final);
                    } else {
                        t.append_message(&message_id, &increment.text, increment.is_final);
                    }
                });
                index += 1;

                if increment.is_final {
                    debug!(
                        "Response complete after {} increments ({} overwritten)",
                        index,
                        results.overwritten()
                    );
                    state.set_input_enabled(true);
                    // Dropping the subscription ignores anything that arrives late
                    return;
                }
            }
            Some(Err(e)) => {
                state.fail(&message_id, &e);
                return;
            }
            None => {
                state.fail(&message_id, &SessionError::Closed);
                return;
            }
        }
    }
}
