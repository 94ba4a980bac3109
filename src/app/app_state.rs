use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::ai::controller::{SuggestionController, Trigger};
use crate::ai::selection::{ApplyMode, apply_suggestion};
use crate::ai::worker::spawn_worker;
use crate::chat::{ChatEvent, EventBus, EventFilter, Message, Subscription, Transcript};
use crate::notification::NotificationState;
use crate::settings::{Settings, SettingsStore};

use super::composer::ComposerBox;
use super::outbox::Outbox;

/// How often the settings file is checked for outside edits
const SETTINGS_RELOAD_INTERVAL: Duration = Duration::from_secs(1);

/// Application state
pub struct App {
    pub transcript: Transcript,
    pub composer: ComposerBox,
    pub controller: SuggestionController,
    pub settings: Settings,
    pub notification: NotificationState,
    store: Option<SettingsStore>,
    bus: EventBus,
    /// Everything, for the transcript
    chat_events: Subscription,
    /// Customer messages and chat switches for the assistant; detached
    /// while the assistant is disabled
    assistant_events: Option<Subscription>,
    feed_rx: Option<Receiver<ChatEvent>>,
    outbox: Option<Outbox>,
    last_settings_check: Instant,
    pub should_quit: bool,
}

impl App {
    /// Create a console with no feed, outbox or worker attached
    pub fn new(settings: Settings, store: Option<SettingsStore>) -> Self {
        let mut bus = EventBus::new();
        let chat_events = bus.subscribe(EventFilter::All);
        let assistant_events = settings
            .enabled
            .then(|| bus.subscribe(EventFilter::Inbound));

        Self {
            transcript: Transcript::new(),
            composer: ComposerBox::new(),
            controller: SuggestionController::new(),
            settings,
            notification: NotificationState::new(),
            store,
            bus,
            chat_events,
            assistant_events,
            feed_rx: None,
            outbox: None,
            last_settings_check: Instant::now(),
            should_quit: false,
        }
    }

    /// Create a console from the settings file
    ///
    /// A file that cannot be used falls back to the defaults so the console
    /// still opens; the next valid edit is picked up by the reload check.
    pub fn from_store(mut store: SettingsStore) -> Self {
        match store.load_checked() {
            Ok(settings) => Self::new(settings, Some(store)),
            Err(e) => {
                log::warn!("Using default settings: {}", e);
                let mut app = Self::new(Settings::default(), Some(store));
                app.notification
                    .show_error(format!("Settings invalid, using defaults: {e}"));
                app
            }
        }
    }

    pub fn with_feed(mut self, feed_rx: Receiver<ChatEvent>) -> Self {
        self.feed_rx = Some(feed_rx);
        self
    }

    pub fn with_outbox(mut self, outbox: Outbox) -> Self {
        self.outbox = Some(outbox);
        self
    }

    /// Start the AI worker thread and wire it to the controller
    pub fn start_worker(&mut self) -> std::io::Result<JoinHandle<()>> {
        let (request_tx, request_rx) = tokio::sync::mpsc::unbounded_channel();
        let (response_tx, response_rx) = mpsc::channel();
        let handle = spawn_worker(request_rx, response_tx)?;
        self.controller.set_channels(request_tx, response_rx);
        Ok(handle)
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Advance everything that does not depend on a key press
    pub fn tick(&mut self, now: Instant) {
        self.drain_feed(now);

        if self.controller.poll_responses() {
            self.auto_apply();
        }

        if self.controller.on_tick(now) {
            self.notification.show_warning("Reply generation timed out");
        }

        self.notification.clear_if_expired(now);

        if now.saturating_duration_since(self.last_settings_check) >= SETTINGS_RELOAD_INTERVAL {
            self.last_settings_check = now;
            self.reload_settings();
        }
    }

    fn drain_feed(&mut self, now: Instant) {
        let Some(rx) = &self.feed_rx else {
            return;
        };

        let mut events = Vec::new();
        let mut disconnected = false;
        loop {
            match rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }

        for event in events {
            self.publish(event, now);
        }
        if disconnected {
            log::info!("Chat feed closed");
            self.feed_rx = None;
        }
    }

    /// Publish one event and let each subscriber handle it
    ///
    /// The transcript sees the event before the assistant does, so the
    /// context sent with a message always matches the conversation it
    /// arrived in.
    fn publish(&mut self, event: ChatEvent, now: Instant) {
        if self.bus.publish(event) == 0 {
            return;
        }

        for event in self.chat_events.drain() {
            match event {
                ChatEvent::Message(message) => self.transcript.push(message),
                ChatEvent::SwitchChat { chat_id } => {
                    log::info!("Switched to chat {}", chat_id.as_deref().unwrap_or("(unnamed)"));
                    self.transcript.switch_to(chat_id);
                }
            }
        }

        let assistant_events = self
            .assistant_events
            .as_ref()
            .map(Subscription::drain)
            .unwrap_or_default();
        for event in assistant_events {
            match event {
                ChatEvent::Message(message) => {
                    let trigger = self.controller.on_inbound(
                        &message.text,
                        &self.transcript,
                        &self.settings,
                        now,
                    );
                    self.report_trigger(trigger);
                }
                ChatEvent::SwitchChat { .. } => self.controller.on_chat_switched(),
            }
        }
    }

    /// Attach or detach the assistant from the chat feed
    fn set_assistant_enabled(&mut self, enabled: bool) {
        if enabled && self.assistant_events.is_none() {
            log::info!("Assistant enabled");
            self.assistant_events = Some(self.bus.subscribe(EventFilter::Inbound));
        } else if !enabled && let Some(subscription) = self.assistant_events.take() {
            log::info!("Assistant disabled");
            self.bus.unsubscribe(subscription.id());
            self.controller.on_chat_switched();
        }
    }

    fn report_trigger(&mut self, trigger: Trigger) {
        match trigger {
            Trigger::Busy => self
                .notification
                .show_warning("Still generating, new message skipped"),
            Trigger::WorkerUnavailable => self.notification.show_error("AI worker is not running"),
            _ => {}
        }
    }

    /// Write fresh suggestions into the composer when configured to
    fn auto_apply(&mut self) {
        if !self.settings.inserts_automatically() {
            return;
        }
        let Some(first) = self
            .controller
            .suggestions()
            .and_then(|set| set.items.first())
            .cloned()
        else {
            return;
        };

        let mode = if self.settings.auto_send {
            ApplyMode::InsertAndSend
        } else {
            ApplyMode::Insert
        };
        let result = apply_suggestion(&first, &mut self.composer, mode);
        if let Some(sent) = result.sent {
            self.record_sent(sent);
        }
    }

    /// Ask again for the latest customer message
    pub fn regenerate(&mut self, now: Instant) {
        let trigger = self
            .controller
            .regenerate(&self.transcript, &self.settings, now);
        match trigger {
            Trigger::Started(_) => {}
            Trigger::Empty => self.notification.show_warning("No customer message to reply to"),
            Trigger::Disabled => self.notification.show_warning("Assistant is disabled"),
            Trigger::Busy => self.notification.show_warning("Already generating"),
            other => self.report_trigger(other),
        }
    }

    /// Put a reply the operator sent into the conversation and the outbox
    pub(super) fn record_sent(&mut self, text: String) {
        if let Some(outbox) = &mut self.outbox {
            if let Err(e) = outbox.append(&text, self.transcript.chat_id()) {
                log::error!("Failed to write outbox {}: {}", outbox.path().display(), e);
                self.notification.show_error(format!("Outbox write failed: {e}"));
            }
        }
        self.publish(ChatEvent::Message(Message::operator(text)), Instant::now());
    }

    fn reload_settings(&mut self) {
        let Some(store) = &mut self.store else {
            return;
        };
        match store.reload_if_changed() {
            Ok(Some(settings)) => {
                log::info!("Settings reloaded from {}", store.path().display());
                let enabled = settings.enabled;
                self.settings = settings;
                self.set_assistant_enabled(enabled);
                self.notification.show("Settings reloaded");
            }
            Ok(None) => {}
            Err(e) => {
                log::warn!("Keeping previous settings: {}", e);
                self.notification.show_error(format!("Settings not reloaded: {e}"));
            }
        }
    }
}

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod app_state_tests;
