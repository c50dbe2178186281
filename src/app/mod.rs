// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Application shell: owns the session slot and the persona catalog for the
//! lifetime of the process and drives the loading, selection and chat routes.

pub mod route;
pub mod terminal;

use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

use crate::conversation::ConversationController;
use crate::inference::{InferenceSession, SessionError, SessionSlot};
use crate::persona::PersonaCatalog;

pub use route::{Navigator, Route};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Unknown persona: {0}")]
    UnknownPersona(String),

    #[error("The model has not been loaded")]
    NotLoaded,
}

pub struct App {
    slot: SessionSlot,
    catalog: Arc<PersonaCatalog>,
    navigator: Navigator,
}

impl App {
    pub fn new(slot: SessionSlot, catalog: Arc<PersonaCatalog>) -> Self {
        Self {
            slot,
            catalog,
            navigator: Navigator::new(),
        }
    }

    /// Loading route: build the session, then move on to persona selection
    ///
    /// On failure the route stays on the start screen.
    pub async fn load(&mut self) -> Result<Arc<InferenceSession>, AppError> {
        match self.slot.get_instance().await {
            Ok(session) => {
                info!("Model ready: {}", session.model_path().display());
                self.navigator.navigate(Route::CharacterSelection);
                Ok(session)
            }
            Err(e) => {
                error!("Model loading failed: {}", e);
                Err(e.into())
            }
        }
    }

    /// Selection route: open the chat route for a catalog persona
    pub fn select_persona(&mut self, name: &str) -> Result<(), AppError> {
        if self.catalog.get(name).is_none() {
            return Err(AppError::UnknownPersona(name.to_string()));
        }
        self.navigator.navigate(Route::chat(name));
        Ok(())
    }

    /// Chat route: a fresh conversation bound to `persona`
    pub fn open_chat(&self, persona: &str) -> Result<ConversationController, AppError> {
        let session = self.slot.get().ok_or(AppError::NotLoaded)?;
        Ok(ConversationController::for_persona(
            session,
            &self.catalog,
            persona,
        ))
    }

    pub fn back(&mut self) -> bool {
        self.navigator.back()
    }

    pub fn route(&self) -> &Route {
        self.navigator.current()
    }

    pub fn catalog(&self) -> &Arc<PersonaCatalog> {
        &self.catalog
    }

    pub fn slot(&self) -> &SessionSlot {
        &self.slot
    }
}
