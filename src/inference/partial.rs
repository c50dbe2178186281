// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Multicast delivery of partial results
//!
//! The engine callback publishes into a hub; every subscriber owns a slot of
//! capacity 1. Publishing never blocks: a frame that arrives while the
//! previous one is still unconsumed overwrites it according to the
//! [`OverflowPolicy`]. A buffered final frame is never downgraded, so an
//! active consumer always sees the end of a response.

use futures::stream::{self, Stream};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tokio::sync::Notify;
use tracing::debug;

use super::errors::SessionError;

/// One unit of streamed output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Increment {
    pub text: String,
    pub is_final: bool,
}

impl Increment {
    pub fn new(text: impl Into<String>, is_final: bool) -> Self {
        Self {
            text: text.into(),
            is_final,
        }
    }
}

/// What a subscriber receives
pub type PartialFrame = Result<Increment, SessionError>;

/// How an unconsumed frame is overwritten by a newer one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Newer frame replaces the buffered one, carrying its text along
    #[default]
    Coalesce,
    /// Newer frame replaces the buffered one; the buffered text is lost
    DropOldest,
}

impl OverflowPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "coalesce" | "merge" => Some(Self::Coalesce),
            "drop_oldest" | "drop-oldest" => Some(Self::DropOldest),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Coalesce => "coalesce",
            Self::DropOldest => "drop_oldest",
        }
    }

    fn overwrite(&self, buffered: Increment, newer: Increment) -> Increment {
        let is_final = buffered.is_final || newer.is_final;
        match self {
            Self::Coalesce => Increment {
                text: buffered.text + &newer.text,
                is_final,
            },
            Self::DropOldest => Increment {
                text: newer.text,
                is_final,
            },
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Default)]
struct SlotState {
    pending: Option<PartialFrame>,
    closed: bool,
    overwritten: u64,
}

#[derive(Default)]
struct Slot {
    state: Mutex<SlotState>,
    notify: Notify,
}

impl Slot {
    fn push(&self, frame: PartialFrame, policy: OverflowPolicy) {
        {
            let mut state = lock(&self.state);
            if state.closed {
                return;
            }
            let next = match (state.pending.take(), frame) {
                (None, frame) => frame,
                // An error ends the response; nothing replaces it
                (Some(Err(err)), _) => Err(err),
                (Some(Ok(_)), Err(err)) => Err(err),
                (Some(Ok(buffered)), Ok(newer)) => {
                    state.overwritten += 1;
                    Ok(policy.overwrite(buffered, newer))
                }
            };
            state.pending = Some(next);
        }
        self.notify.notify_one();
    }

    fn close(&self) {
        lock(&self.state).closed = true;
        self.notify.notify_one();
    }
}

/// Fan-out point fed by the engine callback
pub struct PartialResultsHub {
    slots: Mutex<Vec<Weak<Slot>>>,
    policy: OverflowPolicy,
    closed: AtomicBool,
}

impl PartialResultsHub {
    pub fn new(policy: OverflowPolicy) -> Self {
        Self {
            slots: Mutex::new(Vec::new()),
            policy,
            closed: AtomicBool::new(false),
        }
    }

    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Register a live subscriber; frames published earlier are not replayed
    pub fn subscribe(&self) -> PartialResults {
        let slot = Arc::new(Slot::default());
        if self.closed.load(Ordering::Acquire) {
            slot.close();
        } else {
            lock(&self.slots).push(Arc::downgrade(&slot));
        }
        PartialResults { slot }
    }

    pub fn publish(&self, text: String, is_final: bool) {
        self.dispatch(Ok(Increment { text, is_final }));
    }

    pub fn publish_error(&self, error: SessionError) {
        self.dispatch(Err(error));
    }

    /// End every subscriber's stream
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
        let slots = std::mem::take(&mut *lock(&self.slots));
        for slot in slots.iter().filter_map(Weak::upgrade) {
            slot.close();
        }
    }

    pub fn subscriber_count(&self) -> usize {
        let mut slots = lock(&self.slots);
        slots.retain(|slot| slot.strong_count() > 0);
        slots.len()
    }

    fn dispatch(&self, frame: PartialFrame) {
        let live: Vec<Arc<Slot>> = {
            let mut slots = lock(&self.slots);
            slots.retain(|slot| slot.strong_count() > 0);
            slots.iter().filter_map(Weak::upgrade).collect()
        };
        if live.is_empty() {
            debug!("Partial result published with no subscribers");
            return;
        }
        for slot in live {
            slot.push(frame.clone(), self.policy);
        }
    }
}

/// One subscriber's view of the hub
pub struct PartialResults {
    slot: Arc<Slot>,
}

impl PartialResults {
    /// Wait for the next frame; `None` once the hub is closed and drained
    pub async fn recv(&mut self) -> Option<PartialFrame> {
        loop {
            {
                let mut state = lock(&self.slot.state);
                if let Some(frame) = state.pending.take() {
                    return Some(frame);
                }
                if state.closed {
                    return None;
                }
            }
            self.slot.notify.notified().await;
        }
    }

    /// Number of frames that were overwritten before this subscriber read them
    pub fn overwritten(&self) -> u64 {
        lock(&self.slot.state).overwritten
    }

    pub fn into_stream(self) -> impl Stream<Item = PartialFrame> + Send + Unpin {
        Box::pin(stream::unfold(self, |mut results| async move {
            results.recv().await.map(|frame| (frame, results))
        }))
    }
}
