// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use super::builtin::BUILTIN_PERSONAS;

/// Context used for a persona name that is not in the catalog
pub const FALLBACK_CONTEXT: &str = "You are an assistant.";

/// Persona opened when a chat route carries no name
pub const DEFAULT_PERSONA: &str = "Gandalf";

#[derive(Error, Debug)]
pub enum PersonaError {
    #[error("Failed to read persona file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse persona file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Duplicate persona name: {0}")]
    Duplicate(String),

    #[error("Persona catalog is empty")]
    Empty,
}

/// A selectable character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaDescriptor {
    pub name: String,
    pub system_prompt: String,
    /// Opaque image reference for the selection list
    #[serde(default)]
    pub portrait: String,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(rename = "persona")]
    personas: Vec<PersonaDescriptor>,
}

/// Immutable, ordered persona table shared by selection and chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaCatalog {
    personas: Vec<PersonaDescriptor>,
}

impl PersonaCatalog {
    pub fn new(personas: Vec<PersonaDescriptor>) -> Result<Self, PersonaError> {
        if personas.is_empty() {
            return Err(PersonaError::Empty);
        }
        {
            let mut seen = HashSet::new();
            for persona in &personas {
                if !seen.insert(persona.name.as_str()) {
                    return Err(PersonaError::Duplicate(persona.name.clone()));
                }
            }
        }
        Ok(Self { personas })
    }

    /// The personas shipped with the application
    pub fn builtin() -> Self {
        let personas = BUILTIN_PERSONAS
            .iter()
            .map(|(name, portrait, prompt)| PersonaDescriptor {
                name: name.to_string(),
                system_prompt: prompt.to_string(),
                portrait: portrait.to_string(),
            })
            .collect();
        Self { personas }
    }

    /// Parse a catalog of `[[persona]]` tables
    pub fn from_toml_str(source: &str) -> Result<Self, PersonaError> {
        let file: CatalogFile = toml::from_str(source)?;
        Self::new(file.personas)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PersonaError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| PersonaError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn get(&self, name: &str) -> Option<&PersonaDescriptor> {
        self.personas.iter().find(|p| p.name == name)
    }

    /// System prompt for `name`, or the generic assistant context
    pub fn context_for(&self, name: &str) -> &str {
        self.get(name)
            .map(|p| p.system_prompt.as_str())
            .unwrap_or(FALLBACK_CONTEXT)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PersonaDescriptor> {
        self.personas.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.personas.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }
}

impl Default for PersonaCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
