// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use std::fmt;

use crate::persona::DEFAULT_PERSONA;

pub const START_SCREEN: &str = "start_screen";
pub const CHARACTER_SELECTION_SCREEN: &str = "character_selection_screen";
const CHAT_SCREEN_PREFIX: &str = "chat_screen/";

/// Screens of the application, keyed like the mobile navigation graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Loads the model, then moves on to selection
    Start,
    CharacterSelection,
    Chat { persona: String },
}

impl Route {
    pub fn chat(persona: impl Into<String>) -> Self {
        Self::Chat {
            persona: persona.into(),
        }
    }

    pub fn key(&self) -> String {
        match self {
            Self::Start => START_SCREEN.to_string(),
            Self::CharacterSelection => CHARACTER_SELECTION_SCREEN.to_string(),
            Self::Chat { persona } => format!("{}{}", CHAT_SCREEN_PREFIX, persona),
        }
    }

    /// Parse a route key; a chat route without a name opens the default persona
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            START_SCREEN => Some(Self::Start),
            CHARACTER_SELECTION_SCREEN => Some(Self::CharacterSelection),
            "chat_screen" => Some(Self::chat(DEFAULT_PERSONA)),
            _ => key.strip_prefix(CHAT_SCREEN_PREFIX).map(|name| {
                if name.is_empty() {
                    Self::chat(DEFAULT_PERSONA)
                } else {
                    Self::chat(name)
                }
            }),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Back stack of routes
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            stack: vec![Route::Start],
        }
    }

    pub fn current(&self) -> &Route {
        // The stack is never empty
        self.stack.last().unwrap_or(&Route::Start)
    }

    /// Push a route. Leaving the start screen removes it from the stack, and
    /// navigating to the current route is a no-op.
    pub fn navigate(&mut self, route: Route) {
        if *self.current() == route {
            return;
        }
        if *self.current() == Route::Start {
            self.stack.clear();
        }
        tracing::info!("Navigating to {}", route);
        self.stack.push(route);
    }

    /// Pop the current route; the bottom route stays
    pub fn back(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
