// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Line-oriented front end
//!
//! Reads commands from any async line source and renders to any writer, so
//! the same loop serves stdin/stdout and scripted tests.

use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use super::{App, Route};
use crate::conversation::{ControllerError, ConversationController};
use crate::persona::PersonaCatalog;

pub const QUIT: &str = "/quit";
pub const BACK: &str = "/back";

/// Drive the application until the user quits or input ends
///
/// Returns the loading error if the model cannot be loaded; the start route
/// is never left in that case.
pub async fn run<R, W>(
    app: &mut App,
    input: R,
    out: &mut W,
    start_persona: Option<&str>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut start_persona = start_persona;

    loop {
        match app.route().clone() {
            Route::Start => {
                writeln!(out, "Loading model...")?;
                if let Err(e) = app.load().await {
                    writeln!(out, "{}", e)?;
                    return Err(e.into());
                }
                if let Some(name) = start_persona.take() {
                    app.select_persona(name)?;
                }
            }
            Route::CharacterSelection => {
                render_selection(app.catalog(), out)?;
                let Some(line) = lines.next_line().await? else {
                    return Ok(());
                };
                let choice = line.trim();
                if choice == QUIT {
                    return Ok(());
                }
                match resolve_choice(app.catalog(), choice) {
                    Some(name) => app.select_persona(&name)?,
                    None => writeln!(out, "No persona matches {:?}", choice)?,
                }
            }
            Route::Chat { persona } => {
                if !chat(app, &persona, &mut lines, out).await? {
                    return Ok(());
                }
            }
        }
    }
}

fn render_selection<W: Write>(catalog: &PersonaCatalog, out: &mut W) -> Result<()> {
    writeln!(out, "Choose a character:")?;
    for (i, persona) in catalog.iter().enumerate() {
        writeln!(out, "  {}. {}", i + 1, persona.name)?;
    }
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

/// A 1-based list position or a persona name (case-insensitive)
fn resolve_choice(catalog: &PersonaCatalog, choice: &str) -> Option<String> {
    if let Ok(position) = choice.parse::<usize>() {
        return position
            .checked_sub(1)
            .and_then(|i| catalog.iter().nth(i))
            .map(|p| p.name.clone());
    }
    catalog
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(choice))
        .map(|p| p.name.clone())
}

/// Returns `false` when the user quits or input ends
async fn chat<R, W>(app: &mut App, persona: &str, lines: &mut Lines<R>, out: &mut W) -> Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let controller = app.open_chat(persona)?;
    writeln!(
        out,
        "Chatting with {} ({} to choose again, {} to exit)",
        persona, BACK, QUIT
    )?;

    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            return Ok(false);
        };
        match line.trim() {
            QUIT => return Ok(false),
            BACK => {
                app.back();
                return Ok(true);
            }
            _ => {}
        }

        match controller.send(&line) {
            Ok(task) => {
                render_reply(&controller, out).await?;
                task.await?;
            }
            Err(ControllerError::EmptyMessage) => continue,
            Err(e) => writeln!(out, "{}", e)?,
        }
    }
}

/// Print the model's reply as it streams in
async fn render_reply<W: Write>(controller: &ConversationController, out: &mut W) -> Result<()> {
    let mut transcript = controller.subscribe_transcript();
    let mut shown = String::new();
    write!(out, "{}: ", controller.persona_name())?;

    loop {
        let (text, complete) = {
            let current = transcript.borrow_and_update();
            match current.last() {
                Some(message) if !message.is_from_user() => {
                    (message.text.clone(), message.is_complete)
                }
                _ => (String::new(), false),
            }
        };

        match text.strip_prefix(shown.as_str()) {
            Some(rest) => write!(out, "{}", rest)?,
            // Replaced rather than extended, e.g. by an error
            None => write!(out, "\n{}", text)?,
        }
        out.flush()?;
        shown = text;

        if complete || transcript.changed().await.is_err() {
            writeln!(out)?;
            return Ok(());
        }
    }
}
