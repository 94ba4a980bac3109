//! Worker response handling

use std::sync::mpsc::TryRecvError;

use super::{FailureKind, PanelView, Phase, SuggestionController};
use crate::ai::ai_state::AiResponse;
use crate::ai::provider::AiError;

impl SuggestionController {
    /// Apply a worker response
    ///
    /// Only the response to the in-flight request is accepted; anything
    /// else is stale and ignored. Returns true when fresh suggestions
    /// became ready.
    pub fn handle_response(&mut self, response: AiResponse) -> bool {
        let in_flight = self.in_flight_request_id();
        if in_flight != Some(response.request_id()) {
            log::debug!(
                "Ignoring stale response for request {} (in flight: {:?})",
                response.request_id(),
                in_flight
            );
            return false;
        }

        self.phase = Phase::Idle;
        match response {
            AiResponse::Suggestions { set, usage, .. } => {
                self.generations += 1;
                self.last_usage = usage;
                self.selection.clear();
                self.view = PanelView::Ready(set);
                true
            }
            AiResponse::Error { message, .. } => {
                self.view = PanelView::Failed {
                    kind: FailureKind::Remote,
                    message,
                };
                false
            }
            AiResponse::TimedOut { secs, .. } => {
                self.view = PanelView::Failed {
                    kind: FailureKind::Timeout,
                    message: AiError::Timeout(secs).to_string(),
                };
                false
            }
            AiResponse::Cancelled { .. } => {
                self.view = PanelView::Waiting;
                false
            }
        }
    }

    /// Drain every pending worker response
    ///
    /// Returns true when fresh suggestions became ready.
    pub fn poll_responses(&mut self) -> bool {
        let mut pending = Vec::new();
        let mut disconnected = false;
        if let Some(rx) = &self.response_rx {
            loop {
                match rx.try_recv() {
                    Ok(response) => pending.push(response),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        disconnected = true;
                        break;
                    }
                }
            }
        }
        if disconnected {
            log::warn!("AI worker disconnected");
            self.response_rx = None;
        }

        let mut ready = false;
        for response in pending {
            ready |= self.handle_response(response);
        }
        ready
    }
}
