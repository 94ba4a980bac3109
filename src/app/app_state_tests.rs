//! Tests for app_state

use super::*;
use crate::ai::ai_state::{AiRequest, AiResponse};
use crate::ai::controller::PanelView;
use crate::ai::selection::Composer;
use crate::ai::suggestion::SuggestionSet;
use crate::chat::Role;
use std::fs;
use std::time::SystemTime;
use tempfile::TempDir;
use tokio::sync::mpsc::UnboundedReceiver;

struct Console {
    app: App,
    feed: mpsc::Sender<ChatEvent>,
    requests: UnboundedReceiver<AiRequest>,
    responses: mpsc::Sender<AiResponse>,
    now: Instant,
}

impl Console {
    fn new(settings: Settings) -> Self {
        Self::with_store(settings, None)
    }

    fn with_store(settings: Settings, store: Option<SettingsStore>) -> Self {
        let (feed, feed_rx) = mpsc::channel();
        let (request_tx, requests) = tokio::sync::mpsc::unbounded_channel();
        let (responses, response_rx) = mpsc::channel();
        let mut app = App::new(settings, store).with_feed(feed_rx);
        app.controller.set_channels(request_tx, response_rx);
        Self {
            app,
            feed,
            requests,
            responses,
            now: Instant::now(),
        }
    }

    fn client(&mut self, text: &str) {
        self.feed
            .send(ChatEvent::Message(Message::client(text)))
            .unwrap();
        self.app.tick(self.now);
    }

    fn generate_ids(&mut self) -> Vec<u64> {
        let mut ids = Vec::new();
        while let Ok(request) = self.requests.try_recv() {
            if let AiRequest::Generate { request_id, .. } = request {
                ids.push(request_id);
            }
        }
        ids
    }

    fn answer(&mut self, request_id: u64) {
        self.responses
            .send(AiResponse::Suggestions {
                request_id,
                set: SuggestionSet::canned(),
                usage: None,
            })
            .unwrap();
        self.app.tick(self.now);
    }
}

fn configured() -> Settings {
    Settings {
        api_key: "sk-test".to_string(),
        ..Settings::default()
    }
}

#[test]
fn test_new_app_is_idle() {
    let app = App::new(Settings::default(), None);
    assert!(app.transcript.is_empty());
    assert!(app.composer.is_empty());
    assert!(!app.controller.is_generating());
    assert!(!app.should_quit());
}

#[test]
fn test_client_message_reaches_transcript_and_worker() {
    let mut console = Console::new(configured());
    console.client("Is the Mini 4 in stock?");

    assert_eq!(console.app.transcript.len(), 1);
    assert!(console.app.controller.is_generating());

    match console.requests.try_recv().unwrap() {
        AiRequest::Generate { job, request_id } => {
            assert_eq!(request_id, 1);
            assert_eq!(job.message, "Is the Mini 4 in stock?");
            assert_eq!(job.context.last(), Some(&Message::client("Is the Mini 4 in stock?")));
        }
        other => panic!("unexpected request {other:?}"),
    }
}

#[test]
fn test_operator_message_does_not_trigger() {
    let mut console = Console::new(configured());
    console
        .feed
        .send(ChatEvent::Message(Message::operator("Hello, how can I help?")))
        .unwrap();
    console.app.tick(console.now);

    assert_eq!(console.app.transcript.len(), 1);
    assert!(!console.app.controller.is_generating());
    assert!(console.generate_ids().is_empty());
}

#[test]
fn test_markup_only_message_is_skipped() {
    let mut console = Console::new(configured());
    console.client("   ");
    assert!(console.app.transcript.is_empty());
    assert!(console.generate_ids().is_empty());
}

#[test]
fn test_busy_message_is_dropped_with_notice() {
    let mut console = Console::new(configured());
    console.client("first");
    console.client("second");

    assert_eq!(console.generate_ids(), vec![1]);
    assert_eq!(console.app.transcript.len(), 2);
    assert_eq!(
        console.app.notification.current_message(),
        Some("Still generating, new message skipped")
    );
}

#[test]
fn test_chat_switch_clears_transcript_and_cancels() {
    let mut console = Console::new(configured());
    console.client("hello");
    console
        .feed
        .send(ChatEvent::SwitchChat {
            chat_id: Some("7".to_string()),
        })
        .unwrap();
    console.app.tick(console.now);

    assert!(console.app.transcript.is_empty());
    assert_eq!(console.app.transcript.chat_id(), Some("7"));
    assert!(!console.app.controller.is_generating());

    // Same wording in the new chat is answered again
    console.client("hello");
    assert_eq!(console.generate_ids(), vec![1, 2]);
}

#[test]
fn test_events_apply_in_arrival_order() {
    let mut console = Console::new(configured());
    console
        .feed
        .send(ChatEvent::Message(Message::client("old chat")))
        .unwrap();
    console
        .feed
        .send(ChatEvent::SwitchChat { chat_id: None })
        .unwrap();
    console
        .feed
        .send(ChatEvent::Message(Message::client("new chat")))
        .unwrap();
    console.app.tick(console.now);

    assert_eq!(console.app.transcript.messages(), &[Message::client("new chat")]);
    let mut last_job = None;
    while let Ok(request) = console.requests.try_recv() {
        if let AiRequest::Generate { job, .. } = request {
            last_job = Some(job);
        }
    }
    let job = last_job.unwrap();
    assert_eq!(job.message, "new chat");
    assert_eq!(job.context, vec![Message::client("new chat")]);
}

#[test]
fn test_suggestions_shown_without_auto_insert() {
    let mut console = Console::new(configured());
    console.client("hello");
    console.answer(1);

    assert!(matches!(console.app.controller.view(), PanelView::Ready(_)));
    assert!(console.app.composer.is_empty());
}

#[test]
fn test_auto_insert_fills_composer() {
    let mut console = Console::new(Settings {
        auto_insert: true,
        ..configured()
    });
    console.client("hello");
    console.answer(1);

    let first = SuggestionSet::canned().items[0].text.clone();
    assert_eq!(console.app.composer.text(), first);
    assert_eq!(console.app.transcript.len(), 1);
}

#[test]
fn test_auto_send_records_reply_and_writes_outbox() {
    let dir = TempDir::new().unwrap();
    let outbox_path = dir.path().join("out.jsonl");

    let mut console = Console::new(Settings {
        auto_send: true,
        ..configured()
    });
    console.app.outbox = Some(Outbox::open(&outbox_path).unwrap());
    console.client("hello");
    console.answer(1);

    let first = SuggestionSet::canned().items[0].text.clone();
    assert!(console.app.composer.is_empty());
    let last = console.app.transcript.messages().last().unwrap();
    assert_eq!(last.role, Role::Operator);
    assert_eq!(last.text, first);

    let written = fs::read_to_string(&outbox_path).unwrap();
    assert_eq!(written.lines().count(), 1);
    assert!(written.contains("\"role\":\"operator\""));
}

#[test]
fn test_sent_reply_does_not_trigger_generation() {
    let mut console = Console::new(configured());
    console.app.record_sent("We ship tomorrow".to_string());

    assert_eq!(
        console.app.transcript.messages(),
        &[Message::operator("We ship tomorrow")]
    );
    assert!(console.generate_ids().is_empty());
}

#[test]
fn test_deadline_times_out_request() {
    let mut console = Console::new(Settings {
        timeout_secs: 5,
        ..configured()
    });
    console.client("hello");
    console.app.tick(console.now + Duration::from_secs(6));

    assert!(!console.app.controller.is_generating());
    assert_eq!(
        console.app.notification.current_message(),
        Some("Reply generation timed out")
    );
}

#[test]
fn test_closed_feed_is_dropped() {
    let (feed, feed_rx) = mpsc::channel();
    let mut app = App::new(configured(), None).with_feed(feed_rx);
    feed.send(ChatEvent::Message(Message::operator("last words")))
        .unwrap();
    drop(feed);

    app.tick(Instant::now());

    assert_eq!(app.transcript.len(), 1);
    assert!(app.feed_rx.is_none());
}

#[test]
fn test_missing_worker_reported() {
    let (feed, feed_rx) = mpsc::channel();
    let mut app = App::new(configured(), None).with_feed(feed_rx);
    feed.send(ChatEvent::Message(Message::client("hello"))).unwrap();

    app.tick(Instant::now());

    assert_eq!(
        app.notification.current_message(),
        Some("AI worker is not running")
    );
}

#[test]
fn test_regenerate_without_messages_warns() {
    let mut console = Console::new(configured());
    console.app.regenerate(console.now);
    assert_eq!(
        console.app.notification.current_message(),
        Some("No customer message to reply to")
    );
}

#[test]
fn test_regenerate_reissues_latest_message() {
    let mut console = Console::new(configured());
    console.client("hello");
    console.answer(1);
    console.app.regenerate(console.now);
    assert_eq!(console.generate_ids(), vec![1, 2]);
}

#[test]
fn test_settings_reloaded_after_external_edit() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");
    fs::write(&path, "api_key = \"sk-test\"\n").unwrap();
    // Backdate the file so the edit below gets a different mtime
    fs::File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(SystemTime::now() - Duration::from_secs(60))
        .unwrap();

    let mut store = SettingsStore::new(path.clone());
    let settings = store.load().unwrap();
    let mut console = Console::with_store(settings, Some(store));
    assert!(console.app.settings.enabled);

    fs::write(&path, "api_key = \"sk-test\"\nenabled = false\n").unwrap();
    console.app.tick(console.now + SETTINGS_RELOAD_INTERVAL * 2);

    assert!(!console.app.settings.enabled);
    assert_eq!(
        console.app.notification.current_message(),
        Some("Settings reloaded")
    );
}

/// Settings file whose mtime is a minute old, so a rewrite is always seen
fn backdated_settings(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("settings.toml");
    fs::write(&path, contents).unwrap();
    fs::File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(SystemTime::now() - Duration::from_secs(60))
        .unwrap();
    path
}

#[test]
fn test_out_of_range_edit_keeps_previous_settings() {
    let dir = TempDir::new().unwrap();
    let path = backdated_settings(&dir, "api_key = \"sk-test\"\ntimeout_secs = 20\n");
    let mut store = SettingsStore::new(path.clone());
    let settings = store.load_checked().unwrap();
    let mut console = Console::with_store(settings, Some(store));

    fs::write(&path, "api_key = \"sk-test\"\ntimeout_secs = 0\n").unwrap();
    console.app.tick(console.now + SETTINGS_RELOAD_INTERVAL * 2);

    assert_eq!(console.app.settings.timeout_secs, 20);
    let notice = console.app.notification.current_message().unwrap();
    assert!(notice.starts_with("Settings not reloaded"));
    assert!(notice.contains("timeout_secs"));

    // A message after the rejected edit still gets the full deadline
    console.client("hello");
    assert!(console.app.controller.is_generating());
    console.app.tick(console.now + Duration::from_secs(5));
    assert!(console.app.controller.is_generating());
}

#[test]
fn test_from_store_falls_back_to_defaults_on_invalid_file() {
    let dir = TempDir::new().unwrap();
    let path = backdated_settings(&dir, "api_key = \"sk-test\"\ncontext_messages = 0\n");

    let app = App::from_store(SettingsStore::new(path));

    assert_eq!(app.settings, Settings::default());
    let notice = app.notification.current_message().unwrap();
    assert!(notice.starts_with("Settings invalid, using defaults"));
    assert!(notice.contains("context_messages"));
}

#[test]
fn test_from_store_uses_valid_file() {
    let dir = TempDir::new().unwrap();
    let path = backdated_settings(&dir, "api_key = \"sk-test\"\nmax_tokens = 300\n");

    let app = App::from_store(SettingsStore::new(path));

    assert_eq!(app.settings.max_tokens, 300);
    assert_eq!(app.notification.current_message(), None);
}

#[test]
fn test_disabled_assistant_is_not_subscribed() {
    let mut console = Console::new(Settings {
        enabled: false,
        ..configured()
    });
    assert!(console.app.assistant_events.is_none());

    console.client("hello");

    assert_eq!(console.app.transcript.len(), 1);
    assert!(console.generate_ids().is_empty());
    assert_eq!(console.app.notification.current_message(), None);
}

#[test]
fn test_disabling_detaches_assistant_and_enabling_reattaches() {
    let dir = TempDir::new().unwrap();
    let path = backdated_settings(&dir, "api_key = \"sk-test\"\n");
    let mut store = SettingsStore::new(path.clone());
    let settings = store.load_checked().unwrap();
    let mut console = Console::with_store(settings, Some(store));

    console.client("first");
    assert!(console.app.controller.is_generating());

    fs::write(&path, "api_key = \"sk-test\"\nenabled = false\n").unwrap();
    console.app.tick(console.now + SETTINGS_RELOAD_INTERVAL * 2);

    assert!(console.app.assistant_events.is_none());
    assert!(!console.app.controller.is_generating());
    assert_eq!(console.app.controller.view(), &PanelView::Waiting);

    console.client("while disabled");
    assert_eq!(console.app.transcript.len(), 2);
    assert_eq!(console.generate_ids(), vec![1]);

    // Move the mtime forward so the second edit is seen as new
    fs::write(&path, "api_key = \"sk-test\"\n").unwrap();
    fs::File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(SystemTime::now() + Duration::from_secs(60))
        .unwrap();
    console.app.tick(console.now + SETTINGS_RELOAD_INTERVAL * 4);
    assert!(console.app.assistant_events.is_some());

    console.client("first");
    assert_eq!(console.generate_ids(), vec![2]);
    assert!(console.app.controller.is_generating());
}
