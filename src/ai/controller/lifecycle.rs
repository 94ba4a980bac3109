//! Controller transitions driven by chat activity and the clock

use std::time::{Duration, Instant};

use super::{FailureKind, PanelView, Phase, SuggestionController, Trigger};
use crate::ai::ai_state::{AiRequest, GenerationJob};
use crate::ai::provider::AiError;
use crate::chat::Transcript;
use crate::settings::Settings;

/// Longest wait the controller will schedule, whatever the settings say
const MAX_DEADLINE: Duration = Duration::from_secs(24 * 60 * 60);

const MISSING_KEY_MESSAGE: &str =
    "API key is not configured. Set it with `replykit settings set api_key sk-...`";

impl SuggestionController {
    /// Offer a freshly received customer message
    ///
    /// Generation starts only for non-empty text that differs from the last
    /// processed message while nothing is in flight. Anything else is dropped.
    pub fn on_inbound(
        &mut self,
        text: &str,
        transcript: &Transcript,
        settings: &Settings,
        now: Instant,
    ) -> Trigger {
        let text = text.trim();
        if text.is_empty() {
            return Trigger::Empty;
        }

        if !settings.enabled {
            log::debug!("Assistant disabled, ignoring message");
            return Trigger::Disabled;
        }

        if self.last_processed.as_deref() == Some(text) {
            log::debug!("Duplicate message ignored");
            return Trigger::Duplicate;
        }

        if let Phase::Generating { request_id, .. } = self.phase {
            log::debug!("Request {} in flight, dropping new message", request_id);
            return Trigger::Busy;
        }

        if !settings.has_api_key() {
            log::warn!("No API key configured, skipping generation");
            self.view = PanelView::Failed {
                kind: FailureKind::Config,
                message: MISSING_KEY_MESSAGE.to_string(),
            };
            return Trigger::NotConfigured;
        }

        let request_id = self.request_id.wrapping_add(1);
        let job = GenerationJob {
            message: text.to_string(),
            context: transcript.context(settings.context_messages),
            settings: settings.clone(),
        };

        let sent = self
            .request_tx
            .as_ref()
            .is_some_and(|tx| tx.send(AiRequest::Generate { job, request_id }).is_ok());
        if !sent {
            log::error!("AI worker unavailable");
            self.view = PanelView::Failed {
                kind: FailureKind::Remote,
                message: "AI worker is not running".to_string(),
            };
            return Trigger::WorkerUnavailable;
        }

        self.request_id = request_id;
        self.last_processed = Some(text.to_string());
        self.phase = Phase::Generating {
            request_id,
            message: text.to_string(),
            deadline: deadline_after(now, settings.timeout_secs),
            timeout_secs: settings.timeout_secs,
        };
        self.view = PanelView::Loading {
            message: text.to_string(),
        };
        self.selection.clear();
        log::info!("Started request {}", request_id);
        Trigger::Started(request_id)
    }

    /// Ask again for the latest customer message, bypassing the duplicate check
    pub fn regenerate(
        &mut self,
        transcript: &Transcript,
        settings: &Settings,
        now: Instant,
    ) -> Trigger {
        if self.is_generating() {
            return Trigger::Busy;
        }
        let Some(latest) = transcript.last_inbound() else {
            return Trigger::Empty;
        };
        let latest = latest.to_string();
        let previous = self.last_processed.take();
        let trigger = self.on_inbound(&latest, transcript, settings, now);
        if !matches!(trigger, Trigger::Started(_)) {
            self.last_processed = previous;
        }
        trigger
    }

    /// The operator opened a different conversation
    ///
    /// Abandons any in-flight request and forgets the last processed text so
    /// the same wording in the new chat is answered again.
    pub fn on_chat_switched(&mut self) {
        self.cancel_in_flight();
        self.last_processed = None;
        self.view = PanelView::Waiting;
        self.selection.clear();
    }

    /// Advance the clock; fails the in-flight request once its deadline passes
    ///
    /// Returns true when a timeout was reported.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        let Phase::Generating {
            deadline,
            timeout_secs,
            ..
        } = self.phase
        else {
            return false;
        };
        if now < deadline {
            return false;
        }

        self.cancel_in_flight();
        self.view = PanelView::Failed {
            kind: FailureKind::Timeout,
            message: AiError::Timeout(timeout_secs).to_string(),
        };
        true
    }

    /// Drop the in-flight request, telling the worker to stop
    ///
    /// The panel goes back to waiting. Returns true if a request was in
    /// flight.
    pub fn cancel_in_flight(&mut self) -> bool {
        let Phase::Generating { request_id, .. } = self.phase else {
            return false;
        };
        if let Some(tx) = &self.request_tx
            && tx.send(AiRequest::Cancel { request_id }).is_err()
        {
            log::debug!("Worker gone while cancelling request {}", request_id);
        }
        log::debug!("Cancelled request {}", request_id);
        self.phase = Phase::Idle;
        self.view = PanelView::Waiting;
        true
    }
}

/// `now + timeout_secs`, capped so an oversized value cannot overflow
fn deadline_after(now: Instant, timeout_secs: u64) -> Instant {
    let wait = Duration::from_secs(timeout_secs).min(MAX_DEADLINE);
    now.checked_add(wait).unwrap_or(now)
}
