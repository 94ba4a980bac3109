//! Suggestion controller
//!
//! Owns the generation state machine (`Idle` / `Generating`) and the panel
//! view derived from it. All transitions go through event methods:
//! inbound messages, worker responses, chat switches and clock ticks.

use std::sync::mpsc::Receiver;
use std::time::Instant;

use tokio::sync::mpsc::UnboundedSender;

use super::ai_state::{AiRequest, AiResponse};
use super::provider::Usage;
use super::selection::SelectionState;
use super::suggestion::SuggestionSet;

mod lifecycle;
mod response;

/// Where the generation cycle currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Generating {
        request_id: u64,
        /// The customer message being answered
        message: String,
        deadline: Instant,
        timeout_secs: u64,
    },
}

/// Error classes the panel distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Missing key or disabled assistant; fix the settings
    Config,
    /// The API or the network failed
    Remote,
    /// No reply within the budget
    Timeout,
}

/// What the suggestion panel shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelView {
    /// Nothing requested yet
    Waiting,
    Loading { message: String },
    Ready(SuggestionSet),
    Failed { kind: FailureKind, message: String },
}

/// Outcome of offering a message to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// A request with this id went to the worker
    Started(u64),
    /// Same text as the last processed message
    Duplicate,
    /// A generation is already in flight; the message is dropped
    Busy,
    /// Nothing left after trimming
    Empty,
    /// Assistant switched off in settings
    Disabled,
    /// No API key; nothing was sent
    NotConfigured,
    /// The worker thread is gone
    WorkerUnavailable,
}

/// Drives one generation cycle at a time and filters stale replies
#[derive(Debug)]
pub struct SuggestionController {
    phase: Phase,
    /// Trimmed text of the last message a request was issued for
    last_processed: Option<String>,
    /// Monotonic id of the most recent request
    request_id: u64,
    view: PanelView,
    /// Whether the panel is shown
    pub visible: bool,
    pub selection: SelectionState,
    /// Completed generation cycles
    generations: u64,
    last_usage: Option<Usage>,
    request_tx: Option<UnboundedSender<AiRequest>>,
    response_rx: Option<Receiver<AiResponse>>,
}

impl Default for SuggestionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionController {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            last_processed: None,
            request_id: 0,
            view: PanelView::Waiting,
            visible: true,
            selection: SelectionState::new(),
            generations: 0,
            last_usage: None,
            request_tx: None,
            response_rx: None,
        }
    }

    /// Connect the controller to a worker
    pub fn set_channels(
        &mut self,
        request_tx: UnboundedSender<AiRequest>,
        response_rx: Receiver<AiResponse>,
    ) {
        self.request_tx = Some(request_tx);
        self.response_rx = Some(response_rx);
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_generating(&self) -> bool {
        matches!(self.phase, Phase::Generating { .. })
    }

    /// Id of the in-flight request, if any
    pub fn in_flight_request_id(&self) -> Option<u64> {
        match self.phase {
            Phase::Generating { request_id, .. } => Some(request_id),
            Phase::Idle => None,
        }
    }

    pub fn last_processed(&self) -> Option<&str> {
        self.last_processed.as_deref()
    }

    pub fn view(&self) -> &PanelView {
        &self.view
    }

    /// Current suggestions, when the panel shows a result
    pub fn suggestions(&self) -> Option<&SuggestionSet> {
        match &self.view {
            PanelView::Ready(set) => Some(set),
            _ => None,
        }
    }

    pub fn generations(&self) -> u64 {
        self.generations
    }

    pub fn last_usage(&self) -> Option<Usage> {
        self.last_usage
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod controller_tests;
