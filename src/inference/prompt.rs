// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prompt shaping before it reaches the engine
//!
//! Gemma instruction-tuned models continue a conversation that ends with an
//! open model turn. User phrasing such as "Could you" tends to make the model
//! answer with a canned preamble, so those phrases are removed first.

/// Phrases removed from every prompt (case sensitive, every occurrence)
pub const PREAMBLE_PHRASES: &[&str] = &[
    "Please tell me",
    "Can you",
    "Could you",
    "Sure, here is the response",
    "Sure, here's the response",
];

/// Opens the model's turn in the Gemma chat format
pub const TURN_DELIMITER: &str = "<start_of_turn>model\n";

/// Remove the preamble phrases and surrounding whitespace
pub fn clean_prompt(prompt: &str) -> String {
    PREAMBLE_PHRASES
        .iter()
        .fold(prompt.to_string(), |acc, phrase| acc.replace(phrase, ""))
        .trim()
        .to_string()
}

/// The exact string handed to the engine
pub fn format_for_engine(prompt: &str) -> String {
    let mut formatted = clean_prompt(prompt);
    formatted.push_str(TURN_DELIMITER);
    formatted
}

/// Join a persona's context and the user's message into one prompt
pub fn compose_prompt(persona_context: &str, user_message: &str) -> String {
    format!("{}\nUser: {}", persona_context, user_message)
}
