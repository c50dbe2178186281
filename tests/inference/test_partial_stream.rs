// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use futures_util::StreamExt;
use persona_chat::inference::{
    Increment, OverflowPolicy, PartialFrame, PartialResultsHub, SessionError,
};
use std::sync::Arc;
use std::time::Duration;

fn concat(frames: &[PartialFrame]) -> String {
    frames
        .iter()
        .filter_map(|f| f.as_ref().ok())
        .map(|i| i.text.as_str())
        .collect()
}

#[tokio::test]
async fn test_publisher_never_waits_for_slow_reader() {
    let hub = PartialResultsHub::new(OverflowPolicy::Coalesce);
    let mut results = hub.subscribe();

    // Nobody reads while these are published
    for word in ["The", " quick", " brown", " fox"] {
        hub.publish(word.to_string(), false);
    }
    hub.publish(".".to_string(), true);

    let frame = results.recv().await.expect("frame").expect("increment");
    assert_eq!(frame, Increment::new("The quick brown fox.", true));
    assert_eq!(results.overwritten(), 4);
}

#[tokio::test]
async fn test_drop_oldest_keeps_latest_and_final_flag() {
    let hub = PartialResultsHub::new(OverflowPolicy::DropOldest);
    let mut results = hub.subscribe();

    hub.publish("first".to_string(), false);
    hub.publish("last".to_string(), true);
    hub.publish("late".to_string(), false);

    let frame = results.recv().await.expect("frame").expect("increment");
    assert_eq!(frame.text, "late");
    assert!(frame.is_final);
}

#[tokio::test]
async fn test_concurrent_reader_sees_whole_text() {
    let hub = Arc::new(PartialResultsHub::new(OverflowPolicy::Coalesce));
    let results = hub.subscribe();

    let reader = tokio::spawn(async move {
        let mut frames = Vec::new();
        let mut stream = results.into_stream();
        while let Some(frame) = stream.next().await {
            let done = matches!(&frame, Ok(i) if i.is_final);
            frames.push(frame);
            if done {
                break;
            }
        }
        frames
    });

    let words: Vec<String> = (0..50).map(|i| format!("w{} ", i)).collect();
    for word in &words {
        hub.publish(word.clone(), false);
        tokio::task::yield_now().await;
    }
    hub.publish(String::new(), true);

    let frames = tokio::time::timeout(Duration::from_secs(5), reader)
        .await
        .expect("reader finished")
        .expect("reader task");
    assert_eq!(concat(&frames), words.concat());
}

#[tokio::test]
async fn test_error_frame_is_terminal() {
    let hub = PartialResultsHub::new(OverflowPolicy::Coalesce);
    let mut results = hub.subscribe();

    hub.publish("partial".to_string(), false);
    hub.publish_error(SessionError::Generation("out of memory".to_string()));
    hub.publish("ignored".to_string(), true);

    let frame = results.recv().await.expect("frame");
    assert_eq!(
        frame,
        Err(SessionError::Generation("out of memory".to_string()))
    );
}

#[tokio::test]
async fn test_late_subscriber_gets_no_replay() {
    let hub = PartialResultsHub::new(OverflowPolicy::Coalesce);
    hub.publish("before".to_string(), false);

    let mut results = hub.subscribe();
    hub.publish("after".to_string(), true);

    let frame = results.recv().await.expect("frame").expect("increment");
    assert_eq!(frame.text, "after");
}

#[tokio::test]
async fn test_close_ends_streams() {
    let hub = PartialResultsHub::new(OverflowPolicy::Coalesce);
    let mut results = hub.subscribe();
    hub.close();

    assert!(results.recv().await.is_none());
    assert!(hub.subscribe().into_stream().next().await.is_none());
}
