// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! llama.cpp engine behind the [`LlmBackend`] boundary

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use llama_cpp_2::{
    context::params::LlamaContextParams,
    llama_backend::LlamaBackend,
    llama_batch::LlamaBatch,
    model::{params::LlamaModelParams, AddBos, LlamaModel, Special},
    sampling::LlamaSampler,
};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::engine::{BackendFactory, EngineOptions, LlmBackend};

/// Sanitize prompt text for tokenization
///
/// llama.cpp takes C strings: NUL terminates them early and other C0 control
/// characters confuse the tokenizer. Tab, newline and carriage return stay.
fn sanitize_prompt_for_tokenizer(prompt: &str) -> String {
    prompt
        .chars()
        .filter(|c| *c != '\0' && (*c >= ' ' || *c == '\t' || *c == '\n' || *c == '\r'))
        .collect()
}

struct LoadedModel {
    backend: LlamaBackend,
    model: LlamaModel,
}

pub struct LlamaEngine {
    loaded: Arc<LoadedModel>,
    options: EngineOptions,
    runtime: tokio::runtime::Handle,
}

impl LlamaEngine {
    fn load(options: EngineOptions, runtime: tokio::runtime::Handle) -> Result<Self> {
        let backend =
            LlamaBackend::init().map_err(|e| anyhow!("Failed to initialize backend: {:?}", e))?;

        let model_params = LlamaModelParams::default().with_n_gpu_layers(options.gpu_layers);
        let model = LlamaModel::load_from_file(&backend, &options.model_path, &model_params)
            .map_err(|e| anyhow!("Failed to load model: {:?}", e))?;

        info!(
            "Model loaded: {} (gpu_layers={}, context={})",
            options.model_path.display(),
            options.gpu_layers,
            options.context_size
        );

        Ok(Self {
            loaded: Arc::new(LoadedModel { backend, model }),
            options,
            runtime,
        })
    }
}

impl LlmBackend for LlamaEngine {
    fn generate_response_async(&self, prompt: &str) -> Result<()> {
        let sanitized = sanitize_prompt_for_tokenizer(prompt);
        if sanitized.len() != prompt.len() {
            warn!(
                "Sanitized prompt: removed {} problematic bytes",
                prompt.len() - sanitized.len()
            );
        }

        let loaded = Arc::clone(&self.loaded);
        let options = self.options.clone();
        self.runtime.spawn_blocking(move || {
            if let Err(e) = generate(&loaded, &options, &sanitized) {
                error!("Generation failed: {:#}", e);
                (options.error_listener)(format!("{:#}", e));
            }
        });
        Ok(())
    }
}

/// Run one generation, reporting every decoded piece to the result listener
fn generate(loaded: &LoadedModel, options: &EngineOptions, prompt: &str) -> Result<()> {
    let model = &loaded.model;
    let prompt_tokens = model
        .str_to_token(prompt, AddBos::Always)
        .map_err(|e| anyhow!("Failed to tokenize: {:?}", e))?;

    if prompt_tokens.is_empty() {
        return Err(anyhow!("Prompt produced no tokens"));
    }
    let context_size = options.context_size;
    if prompt_tokens.len() >= context_size {
        return Err(anyhow!(
            "Prompt is {} tokens, context holds {}",
            prompt_tokens.len(),
            context_size
        ));
    }

    let ctx_params = LlamaContextParams::default()
        .with_n_ctx(NonZeroU32::new(context_size as u32))
        .with_n_batch(context_size as u32);
    let mut context = model
        .new_context(&loaded.backend, ctx_params)
        .map_err(|e| anyhow!("Failed to create context: {:?}", e))?;

    let mut batch = LlamaBatch::new(context_size, 1);
    let last = prompt_tokens.len() - 1;
    for (i, &token) in prompt_tokens.iter().enumerate() {
        batch
            .add(token, i as i32, &[0], i == last)
            .map_err(|e| anyhow!("Failed to add token to batch: {:?}", e))?;
    }
    context
        .decode(&mut batch)
        .map_err(|e| anyhow!("Decode failed: {:?}", e))
        .context("prompt evaluation")?;

    let eos_token = model.token_eos();
    let limit = (prompt_tokens.len() + options.max_tokens).min(context_size);
    let mut sampler = LlamaSampler::chain_simple([
        LlamaSampler::temp(options.temperature),
        LlamaSampler::top_p(options.top_p, 1),
        LlamaSampler::greedy(),
    ]);

    let mut n_cur = prompt_tokens.len();
    let mut pieces = 0usize;
    while n_cur < limit {
        let token = sampler.sample(&context, -1);
        if token == eos_token {
            debug!("EOS after {} pieces", pieces);
            break;
        }

        // Invalid UTF-8 pieces are skipped but still advance the model
        match model.token_to_str(token, Special::Plaintext) {
            Ok(piece) if !piece.is_empty() => {
                pieces += 1;
                (options.result_listener)(piece, false);
            }
            Ok(_) => {}
            Err(e) => warn!("Token {} is not valid UTF-8: {:?}", token, e),
        }

        batch.clear();
        batch
            .add(token, n_cur as i32, &[0], true)
            .map_err(|e| anyhow!("Failed to add token: {:?}", e))?;
        context
            .decode(&mut batch)
            .map_err(|e| anyhow!("Decode failed: {:?}", e))?;
        n_cur += 1;
    }

    info!(
        "Generation ended: prompt_tokens={}, generated={}, pieces={}",
        prompt_tokens.len(),
        n_cur - prompt_tokens.len(),
        pieces
    );
    (options.result_listener)(String::new(), true);
    Ok(())
}

/// Loads GGUF models through llama.cpp
#[derive(Debug, Default, Clone, Copy)]
pub struct LlamaBackendFactory;

#[async_trait]
impl BackendFactory for LlamaBackendFactory {
    async fn create(&self, options: EngineOptions) -> Result<Arc<dyn LlmBackend>> {
        let runtime = tokio::runtime::Handle::current();
        let engine_runtime = runtime.clone();
        let engine = runtime
            .spawn_blocking(move || LlamaEngine::load(options, engine_runtime))
            .await
            .map_err(|e| anyhow!("Model loading task failed: {}", e))??;
        Ok(Arc::new(engine))
    }
}
