// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::app::{terminal, App};
use crate::config::SessionConfig;
use crate::inference::{default_backend_factory, OverflowPolicy, SessionSlot};
use crate::persona::PersonaCatalog;
use crate::version;

/// Persona Chat CLI
#[derive(Parser, Debug)]
#[command(name = "persona-chat")]
#[command(version = version::VERSION_NUMBER)]
#[command(about = "Chat with fictional characters on an on-device LLM", long_about = None)]
pub struct Cli {
    /// Path to the model artifact
    #[arg(long, env = "MODEL_PATH", global = true)]
    pub model_path: Option<PathBuf>,

    /// Maximum tokens generated per reply
    #[arg(long, env = "MAX_TOKENS", global = true)]
    pub max_tokens: Option<usize>,

    /// Layers offloaded to the GPU
    #[arg(long, env = "GPU_LAYERS", global = true)]
    pub gpu_layers: Option<u32>,

    /// Persona catalog file (TOML, `[[persona]]` tables)
    #[arg(long, global = true)]
    pub personas: Option<PathBuf>,

    /// How unread partial results are overwritten: coalesce | drop_oldest
    #[arg(long, env = "PARTIAL_OVERFLOW", global = true)]
    pub overflow: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load the model and start chatting (default)
    Chat {
        /// Skip selection and open this persona directly
        #[arg(long)]
        persona: Option<String>,
    },

    /// List the available personas
    Personas,

    /// Print version information as JSON
    Version,
}

impl Cli {
    /// Environment configuration with command-line overrides applied
    pub fn session_config(&self) -> Result<SessionConfig> {
        let mut config = SessionConfig::from_env();
        if let Some(path) = &self.model_path {
            config.model_path = path.clone();
        }
        if let Some(max_tokens) = self.max_tokens {
            config.max_tokens = max_tokens;
        }
        if let Some(gpu_layers) = self.gpu_layers {
            config.gpu_layers = gpu_layers;
        }
        if let Some(overflow) = &self.overflow {
            config.overflow_policy = OverflowPolicy::from_str(overflow)
                .ok_or_else(|| anyhow!("Unknown overflow policy: {}", overflow))?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn catalog(&self) -> Result<PersonaCatalog> {
        match &self.personas {
            Some(path) => Ok(PersonaCatalog::load(path)?),
            None => Ok(PersonaCatalog::builtin()),
        }
    }
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let catalog = cli.catalog()?;
    match &cli.command {
        Some(Commands::Personas) => {
            for persona in catalog.iter() {
                println!("{}", persona.name);
            }
            Ok(())
        }
        Some(Commands::Version) => {
            println!("{}", serde_json::to_string_pretty(&version::get_version_info())?);
            Ok(())
        }
        Some(Commands::Chat { persona }) => chat(&cli, catalog, persona.as_deref()).await,
        None => chat(&cli, catalog, None).await,
    }
}

async fn chat(cli: &Cli, catalog: PersonaCatalog, persona: Option<&str>) -> Result<()> {
    let config = cli.session_config()?;
    info!("{}", version::get_version_string());

    let slot = SessionSlot::new(config, default_backend_factory());
    let mut app = App::new(slot, Arc::new(catalog));

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    terminal::run(&mut app, stdin, &mut stdout, persona).await
}
