//! Chat feed reader
//!
//! Reads JSON-lines chat events from stdin or a file on a background thread
//! and forwards them over a channel. A file feed can be followed like
//! `tail -f`, so another process can keep appending to it.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;
use std::time::Duration;

use super::message::{ChatEvent, Message};
use crate::error::ReplykitError;

/// Pause between polls while following a file at EOF
const FOLLOW_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Where chat events come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Stdin,
    File { path: PathBuf, follow: bool },
}

/// Parse one feed line
///
/// Accepts tagged events (`{"type":"message",...}`) and bare messages
/// (`{"role":"client","text":"..."}`). Blank lines and lines starting
/// with `#` yield `Ok(None)`.
pub fn parse_feed_line(line: &str) -> Result<Option<ChatEvent>, ReplykitError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    match serde_json::from_str::<ChatEvent>(line) {
        Ok(event) => Ok(Some(event)),
        Err(tagged_err) => serde_json::from_str::<Message>(line)
            .map(|message| Some(ChatEvent::Message(message)))
            .map_err(|_| ReplykitError::InvalidEvent(tagged_err.to_string())),
    }
}

/// Spawn the feed reader thread
///
/// The thread stops at end of input (unless following a file), on a read
/// error, or once the receiving side of `tx` is dropped.
pub fn spawn_feed_reader(
    source: FeedSource,
    tx: Sender<ChatEvent>,
) -> Result<JoinHandle<()>, ReplykitError> {
    let handle = match source {
        FeedSource::Stdin => std::thread::spawn(move || {
            let stdin = io::stdin();
            read_events(stdin.lock(), &tx, false);
        }),
        FeedSource::File { path, follow } => {
            let file = File::open(&path)?;
            std::thread::spawn(move || {
                read_events(BufReader::new(file), &tx, follow);
            })
        }
    };
    Ok(handle)
}

/// Forward every parsable line from `reader` to `tx`
///
/// Returns the number of events forwarded.
pub(crate) fn read_events<R: BufRead>(mut reader: R, tx: &Sender<ChatEvent>, follow: bool) -> usize {
    let mut forwarded = 0;
    let mut line = String::new();

    loop {
        match reader.read_line(&mut line) {
            Ok(0) => {
                if !follow {
                    break;
                }
                // Following threads are not joined; they end with the
                // process or on the next failed send.
                std::thread::sleep(FOLLOW_POLL_INTERVAL);
            }
            Ok(_) => {
                // A writer may still be appending the rest of this line
                if follow && !line.ends_with('\n') {
                    continue;
                }
                if !forward_line(&line, tx, &mut forwarded) {
                    break;
                }
                line.clear();
            }
            Err(e) => {
                log::error!("Feed read failed: {}", e);
                break;
            }
        }
    }

    log::debug!("Feed reader finished after {} events", forwarded);
    forwarded
}

/// Parse and forward one line; returns false once the receiver is gone
fn forward_line(line: &str, tx: &Sender<ChatEvent>, forwarded: &mut usize) -> bool {
    match parse_feed_line(line) {
        Ok(Some(event)) => {
            if tx.send(event).is_err() {
                return false;
            }
            *forwarded += 1;
        }
        Ok(None) => {}
        Err(e) => log::warn!("Skipping feed line: {}", e),
    }
    true
}

#[cfg(test)]
#[path = "feed_tests.rs"]
mod feed_tests;
