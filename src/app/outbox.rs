//! Outbox for sent replies
//!
//! Every reply the operator sends is appended to a JSON-lines file in the
//! same shape the chat feed accepts, so a host bridge can pick it up.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::chat::Role;

#[derive(Serialize)]
struct OutboxRecord<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    role: Role,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    chat_id: Option<&'a str>,
    sent_at: String,
}

pub struct Outbox {
    path: PathBuf,
    file: File,
}

impl Outbox {
    /// Open `path` for appending, creating it if needed
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one sent reply
    pub fn append(&mut self, text: &str, chat_id: Option<&str>) -> io::Result<()> {
        let record = OutboxRecord {
            kind: "message",
            role: Role::Operator,
            text,
            chat_id,
            sent_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        };
        let line = serde_json::to_string(&record).map_err(io::Error::other)?;
        writeln!(self.file, "{line}")?;
        self.file.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::feed::parse_feed_line;
    use crate::chat::{ChatEvent, Message};
    use tempfile::TempDir;

    #[test]
    fn test_append_writes_one_line_per_reply() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.jsonl");
        let mut outbox = Outbox::open(&path).unwrap();
        outbox.append("Hello!", Some("42")).unwrap();
        outbox.append("Bye", None).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["type"], "message");
        assert_eq!(first["role"], "operator");
        assert_eq!(first["text"], "Hello!");
        assert_eq!(first["chat_id"], "42");
        assert!(first["sent_at"].as_str().unwrap().ends_with('Z'));

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert!(second.get("chat_id").is_none());
    }

    #[test]
    fn test_records_read_back_as_feed_events() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.jsonl");
        let mut outbox = Outbox::open(&path).unwrap();
        outbox.append("On its way", None).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let event = parse_feed_line(content.lines().next().unwrap()).unwrap();
        assert_eq!(
            event,
            Some(ChatEvent::Message(Message::operator("On its way")))
        );
    }

    #[test]
    fn test_open_appends_to_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.jsonl");
        std::fs::write(&path, "{\"type\":\"message\",\"role\":\"operator\",\"text\":\"old\"}\n").unwrap();

        let mut outbox = Outbox::open(&path).unwrap();
        outbox.append("new", None).unwrap();
        assert_eq!(outbox.path(), path.as_path());

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }
}
