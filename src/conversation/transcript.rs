// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Ordered record of one conversation
//!
//! Messages are only ever appended. The one exception is the message the
//! model is currently streaming into, which is edited in place until it is
//! complete. At most one message is incomplete at any time.

use serde::{Deserialize, Serialize};

use super::message::{Author, Message};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a complete message and return its id
    pub fn add_message(&mut self, text: &str, author: Author) -> String {
        let message = Message::new(author, text, true);
        let id = message.id.clone();
        self.messages.push(message);
        id
    }

    /// Append an empty, incomplete model message
    ///
    /// Returns `None` while another message is still streaming.
    pub fn create_loading_message(&mut self) -> Option<String> {
        if self.in_progress().is_some() {
            return None;
        }
        let message = Message::new(Author::Model, "", false);
        let id = message.id.clone();
        self.messages.push(message);
        Some(id)
    }

    /// Set the text of an in-progress message from its first increment
    pub fn append_first_message(&mut self, id: &str, text: &str, done: bool) -> bool {
        self.update_in_progress(id, |message| {
            message.text = text.to_string();
            message.is_complete = done;
        })
    }

    /// Extend an in-progress message with a later increment
    pub fn append_message(&mut self, id: &str, text: &str, done: bool) -> bool {
        self.update_in_progress(id, |message| {
            message.text.push_str(text);
            message.is_complete = done;
        })
    }

    /// Replace an in-progress message's text with an error and close it
    pub fn complete_with_error(&mut self, id: &str, error: &str) -> bool {
        self.update_in_progress(id, |message| {
            message.text = error.to_string();
            message.is_complete = true;
        })
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn get(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn in_progress(&self) -> Option<&Message> {
        self.messages.iter().find(|m| !m.is_complete)
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    // Completed messages are immutable
    fn update_in_progress(&mut self, id: &str, update: impl FnOnce(&mut Message)) -> bool {
        match self
            .messages
            .iter_mut()
            .find(|m| m.id == id && !m.is_complete)
        {
            Some(message) => {
                update(message);
                true
            }
            None => false,
        }
    }
}
