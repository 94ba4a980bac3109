//! Tests for the chat feed reader

use super::*;
use crate::chat::Role;
use std::io::Cursor;
use std::io::Write;
use std::sync::mpsc;

#[test]
fn test_parse_tagged_message() {
    let event = parse_feed_line(r#"{"type":"message","role":"client","text":"Hi"}"#)
        .unwrap()
        .unwrap();
    assert_eq!(event, ChatEvent::Message(Message::client("Hi")));
}

#[test]
fn test_parse_bare_message() {
    let event = parse_feed_line(r#"{"role":"operator","text":"Hello!"}"#)
        .unwrap()
        .unwrap();
    assert_eq!(event, ChatEvent::Message(Message::operator("Hello!")));
}

#[test]
fn test_parse_manager_alias() {
    let event = parse_feed_line(r#"{"role":"manager","text":"On it"}"#)
        .unwrap()
        .unwrap();
    match event {
        ChatEvent::Message(m) => assert_eq!(m.role, Role::Operator),
        other => panic!("unexpected event {:?}", other),
    }
}

#[test]
fn test_parse_switch_chat() {
    let event = parse_feed_line(r#"{"type":"switch_chat","chat_id":"99"}"#)
        .unwrap()
        .unwrap();
    assert_eq!(
        event,
        ChatEvent::SwitchChat {
            chat_id: Some("99".to_string())
        }
    );
}

#[test]
fn test_parse_switch_chat_without_id() {
    let event = parse_feed_line(r#"{"type":"switch_chat"}"#).unwrap().unwrap();
    assert_eq!(event, ChatEvent::SwitchChat { chat_id: None });
}

#[test]
fn test_blank_and_comment_lines_skipped() {
    assert!(parse_feed_line("").unwrap().is_none());
    assert!(parse_feed_line("   ").unwrap().is_none());
    assert!(parse_feed_line("# recorded 2024-05-01").unwrap().is_none());
}

#[test]
fn test_invalid_line_is_error() {
    let err = parse_feed_line(r#"{"role":"robot","text":"beep"}"#).unwrap_err();
    assert!(matches!(err, ReplykitError::InvalidEvent(_)));

    let err = parse_feed_line("not json").unwrap_err();
    assert!(matches!(err, ReplykitError::InvalidEvent(_)));
}

#[test]
fn test_read_events_skips_bad_lines() {
    let input = concat!(
        "{\"role\":\"client\",\"text\":\"first\"}\n",
        "garbage\n",
        "\n",
        "{\"role\":\"operator\",\"text\":\"second\"}\n",
    );
    let (tx, rx) = mpsc::channel();

    let forwarded = read_events(Cursor::new(input), &tx, false);

    assert_eq!(forwarded, 2);
    let events: Vec<ChatEvent> = rx.try_iter().collect();
    assert_eq!(
        events,
        vec![
            ChatEvent::Message(Message::client("first")),
            ChatEvent::Message(Message::operator("second")),
        ]
    );
}

#[test]
fn test_read_events_stops_when_receiver_dropped() {
    let input = "{\"role\":\"client\",\"text\":\"a\"}\n{\"role\":\"client\",\"text\":\"b\"}\n";
    let (tx, rx) = mpsc::channel();
    drop(rx);

    assert_eq!(read_events(Cursor::new(input), &tx, false), 0);
}

#[test]
fn test_spawn_feed_reader_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, r#"{{"role":"client","text":"from file"}}"#).unwrap();
    file.flush().unwrap();
    let (tx, rx) = mpsc::channel();

    let handle = spawn_feed_reader(
        FeedSource::File {
            path: file.path().to_path_buf(),
            follow: false,
        },
        tx,
    )
    .unwrap();
    handle.join().unwrap();

    assert_eq!(
        rx.try_iter().collect::<Vec<_>>(),
        vec![ChatEvent::Message(Message::client("from file"))]
    );
}

#[test]
fn test_spawn_feed_reader_missing_file() {
    let (tx, _rx) = mpsc::channel();
    let result = spawn_feed_reader(
        FeedSource::File {
            path: PathBuf::from("/definitely/not/here.jsonl"),
            follow: false,
        },
        tx,
    );
    assert!(matches!(result, Err(ReplykitError::Io(_))));
}
