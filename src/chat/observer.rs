//! Chat event fan-out
//!
//! Subscribers receive events over their own channel, so the feed reader,
//! the transcript and the suggestion controller stay decoupled. Text is
//! extracted once at publish time; messages with no visible text never
//! reach any subscriber.

use std::sync::mpsc::{self, Receiver, Sender};

use super::extract::extract_text;
use super::message::{ChatEvent, Message};

/// Which events a subscription receives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFilter {
    /// Every event
    All,
    /// Customer messages plus conversation switches
    Inbound,
}

impl EventFilter {
    fn accepts(&self, event: &ChatEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Inbound => match event {
                ChatEvent::Message(message) => message.is_inbound(),
                ChatEvent::SwitchChat { .. } => true,
            },
        }
    }
}

/// Identifies a subscription for later removal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Receiving end of a subscription
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    rx: Receiver<ChatEvent>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Take every event delivered so far without blocking
    pub fn drain(&self) -> Vec<ChatEvent> {
        self.rx.try_iter().collect()
    }
}

struct Subscriber {
    id: SubscriptionId,
    filter: EventFilter,
    tx: Sender<ChatEvent>,
}

/// Publishes chat events to subscribers
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, filter: EventFilter) -> Subscription {
        let (tx, rx) = mpsc::channel();
        self.next_id = self.next_id.wrapping_add(1);
        let id = SubscriptionId(self.next_id);
        self.subscribers.push(Subscriber { id, filter, tx });
        Subscription { id, rx }
    }

    /// Remove a subscription; returns false if it was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    /// Deliver an event to every interested subscriber
    ///
    /// Returns how many subscribers received it. Subscribers whose
    /// receiving end was dropped are removed.
    pub fn publish(&mut self, event: ChatEvent) -> usize {
        let event = match event {
            ChatEvent::Message(message) => match extract_text(&message.text) {
                Some(text) => ChatEvent::Message(Message {
                    role: message.role,
                    text,
                }),
                None => {
                    log::debug!("Skipping {} message with no visible text", message.role.speaker());
                    return 0;
                }
            },
            other => other,
        };

        let mut delivered = 0;
        self.subscribers.retain(|subscriber| {
            if !subscriber.filter.accepts(&event) {
                return true;
            }
            match subscriber.tx.send(event.clone()) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                Err(_) => {
                    log::debug!("Dropping closed subscription {:?}", subscriber.id);
                    false
                }
            }
        });
        delivered
    }
}

#[cfg(test)]
#[path = "observer_tests.rs"]
mod observer_tests;
