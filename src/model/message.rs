//! Message definitions shared by every sample.
//!
//! `Message` is the single in-memory representation of an inbound or
//! outbound message. Fields are chosen to cover both best-effort and
//! persistent delivery, plus the reply-address used by request/reply.
//!
//! Notes on fields:
//! - `destination`: topic or queue the message is addressed to
//! - `payload`: text body
//! - `timestamp`: milliseconds since UNIX epoch
//! - `message_id`: opaque unique id; for inbound messages this is the handle
//!   passed back to the broker when acknowledging
//! - `delivery_mode`: `Direct` = at-most-once, `Persistent` = acknowledged

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a message is routed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Destination {
    Topic(String),
    Queue(String),
}

impl Destination {
    pub fn topic(name: impl Into<String>) -> Self {
        Destination::Topic(name.into())
    }

    pub fn queue(name: impl Into<String>) -> Self {
        Destination::Queue(name.into())
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Topic(name) => write!(f, "topic '{name}'"),
            Destination::Queue(name) => write!(f, "queue '{name}'"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Best-effort, never acknowledged.
    #[default]
    Direct,
    /// Spooled by the broker and acknowledged.
    Persistent,
}

impl DeliveryMode {
    /// The qos level carried on the wire.
    pub fn qos(self) -> u8 {
        match self {
            DeliveryMode::Direct => 0,
            DeliveryMode::Persistent => 1,
        }
    }

    pub fn from_qos(qos: u8) -> Self {
        if qos >= 1 {
            DeliveryMode::Persistent
        } else {
            DeliveryMode::Direct
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub destination: Destination,
    pub payload: String,
    pub delivery_mode: DeliveryMode,
    pub reply_to: Option<Destination>,
    pub correlation_id: Option<String>,
    pub message_id: String,
    pub timestamp: i64,
}

impl Message {
    /// Creates a direct text message with a fresh id.
    pub fn text(destination: Destination, payload: impl Into<String>) -> Self {
        Self {
            destination,
            payload: payload.into(),
            delivery_mode: DeliveryMode::Direct,
            reply_to: None,
            correlation_id: None,
            message_id: Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn with_delivery_mode(mut self, mode: DeliveryMode) -> Self {
        self.delivery_mode = mode;
        self
    }

    pub fn with_reply_to(mut self, reply_to: Destination) -> Self {
        self.reply_to = Some(reply_to);
        self
    }

    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }

    /// Builds the reply to `self`, addressed to its reply-address.
    ///
    /// Returns `None` when the request carries no reply-address. The reply
    /// reuses the request's correlation id, falling back to its message id.
    pub fn reply(&self, payload: impl Into<String>) -> Option<Message> {
        let reply_to = self.reply_to.clone()?;
        let correlation_id = self
            .correlation_id
            .clone()
            .unwrap_or_else(|| self.message_id.clone());
        Some(Message::text(reply_to, payload).with_correlation_id(correlation_id))
    }

    pub fn is_persistent(&self) -> bool {
        self.delivery_mode == DeliveryMode::Persistent
    }
}
