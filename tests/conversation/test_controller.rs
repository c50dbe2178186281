// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use crate::common::{gravity_script, partial, session_with, ScriptedFactory, Step};
use persona_chat::conversation::{Author, ControllerError, ConversationController};
use persona_chat::inference::{SessionError, TURN_DELIMITER};
use persona_chat::persona::{PersonaCatalog, FALLBACK_CONTEXT};
use std::time::Duration;

const YODA_CONTEXT: &str = "You are Yoda.";

async fn finish(task: tokio::task::JoinHandle<()>) {
    tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("response finished in time")
        .expect("streaming task");
}

#[tokio::test]
async fn test_gravity_reply_streams_into_one_message() {
    let factory = ScriptedFactory::new(gravity_script());
    let (session, _file) = session_with(&factory).await;
    let controller = ConversationController::new(session, "Yoda", YODA_CONTEXT);

    let task = controller
        .send_message("Explain gravity", YODA_CONTEXT)
        .expect("message accepted");
    finish(task).await;

    let transcript = controller.transcript();
    assert_eq!(transcript.len(), 2);

    let user = &transcript.messages()[0];
    assert_eq!(user.author, Author::User);
    assert_eq!(user.text, "Explain gravity");
    assert!(user.is_complete);

    let reply = &transcript.messages()[1];
    assert_eq!(reply.author, Author::Model);
    assert_eq!(reply.text, "Gravity pulls masses.");
    assert!(reply.is_complete);
    assert!(controller.is_input_enabled());
}

#[tokio::test]
async fn test_input_disabled_while_reply_streams() {
    let (factory, gate) = ScriptedFactory::new(gravity_script()).gated();
    let (session, _file) = session_with(&factory).await;
    let controller = ConversationController::new(session, "Yoda", YODA_CONTEXT);

    let task = controller.send("Explain gravity").expect("message accepted");
    assert!(!controller.is_input_enabled());

    let transcript = controller.transcript();
    let placeholder = transcript.last().expect("placeholder");
    assert_eq!(placeholder.author, Author::Model);
    assert_eq!(placeholder.text, "");
    assert!(!placeholder.is_complete);

    assert_eq!(
        controller.send("And magnetism?").err(),
        Some(ControllerError::GenerationInFlight)
    );
    assert_eq!(controller.transcript().len(), 2);

    gate.notify_one();
    finish(task).await;
    assert!(controller.is_input_enabled());
    assert_eq!(factory.recorded_prompts().len(), 1);
}

#[tokio::test]
async fn test_input_flag_is_observable() {
    let (factory, gate) = ScriptedFactory::new(gravity_script()).gated();
    let (session, _file) = session_with(&factory).await;
    let controller = ConversationController::new(session, "Yoda", YODA_CONTEXT);
    let mut enabled = controller.subscribe_input_enabled();
    assert!(*enabled.borrow_and_update());

    let task = controller.send("Explain gravity").expect("message accepted");
    enabled.changed().await.expect("flag sender alive");
    assert!(!*enabled.borrow_and_update());

    gate.notify_one();
    enabled.changed().await.expect("flag sender alive");
    assert!(*enabled.borrow_and_update());
    finish(task).await;
}

#[tokio::test]
async fn test_empty_message_is_rejected() {
    let factory = ScriptedFactory::new(gravity_script());
    let (session, _file) = session_with(&factory).await;
    let controller = ConversationController::new(session, "Yoda", YODA_CONTEXT);

    assert_eq!(controller.send("   ").err(), Some(ControllerError::EmptyMessage));
    assert!(controller.transcript().is_empty());
    assert!(controller.is_input_enabled());
    assert!(factory.recorded_prompts().is_empty());
}

#[tokio::test]
async fn test_yoda_prompt_reaches_engine_shaped() {
    let factory = ScriptedFactory::new(gravity_script());
    let (session, _file) = session_with(&factory).await;
    let catalog = PersonaCatalog::builtin();
    let controller = ConversationController::for_persona(session, &catalog, "Yoda");
    assert_eq!(controller.persona_context(), catalog.context_for("Yoda"));

    let task = controller
        .send("Could you explain gravity?")
        .expect("message accepted");
    finish(task).await;

    let prompts = factory.recorded_prompts();
    assert_eq!(prompts.len(), 1);
    let prompt = &prompts[0];
    assert!(!prompt.contains("Could you"));
    assert!(prompt.contains("User:"));
    assert!(prompt.ends_with(&format!("explain gravity?{}", TURN_DELIMITER)));

    // The transcript keeps what the user typed
    assert_eq!(
        controller.transcript().messages()[0].text,
        "Could you explain gravity?"
    );
}

#[tokio::test]
async fn test_unknown_persona_uses_fallback_context() {
    let factory = ScriptedFactory::new(gravity_script());
    let (session, _file) = session_with(&factory).await;
    let controller =
        ConversationController::for_persona(session, &PersonaCatalog::builtin(), "Bilbo");

    assert_eq!(controller.persona_context(), FALLBACK_CONTEXT);
    finish(controller.send("Hello").expect("message accepted")).await;
    assert!(factory.recorded_prompts()[0].starts_with(FALLBACK_CONTEXT));
}

#[tokio::test]
async fn test_engine_error_becomes_error_message() {
    let factory = ScriptedFactory::new(vec![
        partial("Gravity", false),
        Step::Error("out of memory".to_string()),
    ]);
    let (session, _file) = session_with(&factory).await;
    let controller = ConversationController::new(session, "Yoda", YODA_CONTEXT);

    finish(controller.send("Explain gravity").expect("message accepted")).await;

    let transcript = controller.transcript();
    let reply = transcript.last().expect("reply");
    assert_eq!(reply.author, Author::Model);
    assert_eq!(
        reply.text,
        SessionError::Generation("out of memory".to_string()).to_string()
    );
    assert!(reply.is_complete);
    assert!(controller.is_input_enabled());
}

#[tokio::test]
async fn test_refused_generation_becomes_error_message() {
    let factory = ScriptedFactory {
        refuse_generate: Some("engine busy".to_string()),
        ..ScriptedFactory::new(gravity_script())
    };
    let (session, _file) = session_with(&factory).await;
    let controller = ConversationController::new(session, "Yoda", YODA_CONTEXT);

    finish(controller.send("Explain gravity").expect("message accepted")).await;

    let reply = controller.transcript().last().cloned().expect("reply");
    assert!(reply.text.contains("engine busy"));
    assert!(reply.is_complete);
    assert!(controller.is_input_enabled());
}

#[tokio::test]
async fn test_single_final_increment_completes_reply() {
    let factory = ScriptedFactory::new(vec![partial("Hmm.", true)]);
    let (session, _file) = session_with(&factory).await;
    let controller = ConversationController::new(session, "Yoda", YODA_CONTEXT);

    finish(controller.send("Explain gravity").expect("message accepted")).await;

    let reply = controller.transcript().last().cloned().expect("reply");
    assert_eq!(reply.text, "Hmm.");
    assert!(reply.is_complete);
    assert!(controller.is_input_enabled());
}

#[tokio::test]
async fn test_follow_up_after_completion() {
    let factory = ScriptedFactory::new(gravity_script());
    let (session, _file) = session_with(&factory).await;
    let controller = ConversationController::new(session, "Yoda", YODA_CONTEXT);

    finish(controller.send("Explain gravity").expect("first accepted")).await;
    finish(controller.send("Again, please").expect("second accepted")).await;

    let transcript = controller.transcript();
    let authors: Vec<Author> = transcript.messages().iter().map(|m| m.author).collect();
    assert_eq!(
        authors,
        vec![Author::User, Author::Model, Author::User, Author::Model]
    );
    assert!(transcript.messages().iter().all(|m| m.is_complete));
    assert_eq!(transcript.messages()[3].text, "Gravity pulls masses.");
    assert!(transcript.in_progress().is_none());
}

#[tokio::test]
async fn test_transcript_watch_sees_reply_grow() {
    let (factory, gate) = ScriptedFactory::new(gravity_script()).gated();
    let (session, _file) = session_with(&factory).await;
    let controller = ConversationController::new(session, "Yoda", YODA_CONTEXT);
    let mut transcript = controller.subscribe_transcript();

    let task = controller.send("Explain gravity").expect("message accepted");
    gate.notify_one();

    let mut seen = Vec::new();
    loop {
        let (text, complete) = {
            let current = transcript.borrow_and_update();
            let reply = current.last().expect("placeholder exists");
            (reply.text.clone(), reply.is_complete)
        };
        seen.push(text);
        if complete {
            break;
        }
        transcript.changed().await.expect("controller alive");
    }
    finish(task).await;

    // Every observed state is a prefix of the final reply
    let last = seen.last().cloned().unwrap_or_default();
    assert_eq!(last, "Gravity pulls masses.");
    assert!(seen.iter().all(|s| last.starts_with(s.as_str())));
}
