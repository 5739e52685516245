//! Session abstraction
//!
//! Every sample program is written against the [`Session`] trait rather than a
//! concrete client. The production implementation is
//! [`WsSession`](crate::transport::WsSession); tests use an in-memory double.
//!
//! A session moves through a single forward-only lifecycle:
//! `Disconnected -> Connected -> Subscribed/Bound -> Closed`. There is no
//! recovery transition: once closed (or once the transport is lost) the
//! session stays that way. A session whose transport was lost reports
//! `Disconnected`.

pub mod gate;
pub mod handler;
pub mod properties;
pub(crate) mod routes;

use std::sync::Arc;

use async_trait::async_trait;

use crate::model::Message;
use crate::utils::Result;

pub use gate::OneShotGate;
pub use handler::{MessageListener, PublishEventHandler};
pub use properties::{SessionProperties, UserVpn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connected,
    Subscribed,
    Bound,
    Closed,
}

impl SessionState {
    /// State after a successful subscribe or bind. A bound session stays
    /// bound when it later adds a topic subscription.
    pub(crate) fn after(self, next: SessionState) -> SessionState {
        match (self, next) {
            (SessionState::Closed, _) => SessionState::Closed,
            (SessionState::Bound, SessionState::Subscribed) => SessionState::Bound,
            (_, next) => next,
        }
    }
}

/// Outcome of an idempotent queue provisioning request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provision {
    Created,
    AlreadyExists,
}

/// Properties of a queue to provision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueSpec {
    pub name: String,
    pub durable: bool,
    pub exclusive: bool,
}

impl QueueSpec {
    /// A durable, exclusive-access queue.
    pub fn durable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            durable: true,
            exclusive: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckMode {
    /// The broker considers a message consumed as soon as it is delivered.
    Auto,
    /// The receiver must acknowledge each message explicitly.
    Client,
}

impl AckMode {
    pub fn as_str(self) -> &'static str {
        match self {
            AckMode::Auto => "auto",
            AckMode::Client => "client",
        }
    }
}

/// Properties of a receiver bound to a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowProperties {
    pub exclusive: bool,
    pub ack_mode: AckMode,
}

impl FlowProperties {
    pub fn exclusive_client_ack() -> Self {
        Self {
            exclusive: true,
            ack_mode: AckMode::Client,
        }
    }
}

/// The capability handed to callbacks: fire-and-forget sends and acks.
///
/// Both operations only enqueue work for the connection and never block.
pub trait Outbound: Send + Sync {
    fn send(&self, message: Message) -> Result<()>;

    fn ack(&self, message_id: &str) -> Result<()>;
}

#[async_trait]
pub trait Session: Outbound {
    /// Adds a topic subscription and routes matching messages to `listener`.
    async fn subscribe(&self, topic: &str, listener: Arc<dyn MessageListener>) -> Result<()>;

    /// Drops a topic subscription. Messages on `topic` are no longer routed.
    async fn unsubscribe(&self, topic: &str) -> Result<()>;

    /// Creates the queue on the broker unless it already exists.
    async fn provision_queue(&self, spec: &QueueSpec) -> Result<Provision>;

    /// Binds a receiver to `queue`; its messages are routed to `listener`.
    async fn bind(
        &self,
        queue: &str,
        flow: FlowProperties,
        listener: Arc<dyn MessageListener>,
    ) -> Result<()>;

    /// Releases the connection. Only the first call has any effect.
    async fn close(&self) -> Result<()>;

    fn state(&self) -> SessionState;
}

#[cfg(test)]
pub(crate) mod mock;
