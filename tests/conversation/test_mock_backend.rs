// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use mockall::mock;
use mockall::predicate::*;
use persona_chat::conversation::ConversationController;
use persona_chat::inference::{BackendFactory, EngineOptions, LlmBackend, SessionSlot};
use std::sync::{Arc, Mutex};

use crate::common::{artifact, config_for};

mock! {
    pub Engine {}

    impl LlmBackend for Engine {
        fn generate_response_async(&self, prompt: &str) -> Result<()>;
    }
}

/// Hands out one prepared mock engine
struct MockFactory {
    engine: Mutex<Option<MockEngine>>,
}

#[async_trait]
impl BackendFactory for MockFactory {
    async fn create(&self, _options: EngineOptions) -> Result<Arc<dyn LlmBackend>> {
        let engine = self
            .engine
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| anyhow!("engine already built"))?;
        Ok(Arc::new(engine))
    }
}

#[tokio::test]
async fn test_engine_called_once_with_shaped_prompt() {
    let mut engine = MockEngine::new();
    engine
        .expect_generate_response_async()
        .with(eq("You are Zeus.\nUser: Hurl a bolt<start_of_turn>model\n"))
        .times(1)
        .returning(|_| Err(anyhow!("device lost")));

    let file = artifact();
    let slot = SessionSlot::new(
        config_for(file.path()),
        Arc::new(MockFactory {
            engine: Mutex::new(Some(engine)),
        }),
    );
    let session = slot.get_instance().await.expect("session");
    let controller = ConversationController::new(session, "Zeus", "You are Zeus.");

    controller
        .send("Hurl a bolt")
        .expect("message accepted")
        .await
        .expect("streaming task");

    let reply = controller.transcript().last().cloned().expect("reply");
    assert!(reply.text.contains("device lost"));
    assert!(reply.is_complete);
    assert!(controller.is_input_enabled());
}
