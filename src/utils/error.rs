//! The `error` module defines the error type shared by every sample.
//!
//! All fallible operations in the crate return [`Result`], so errors can be
//! propagated with `?` up to the program's `main`, where they are logged.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("websocket error: {0}")]
    Transport(#[from] tungstenite::Error),

    #[error("malformed frame: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("broker refused subscription to '{topic}': {message}")]
    Subscription { topic: String, message: String },

    #[error("failed to provision queue '{queue}': {message}")]
    Provisioning { queue: String, message: String },

    #[error("failed to bind to queue '{queue}': {message}")]
    Bind { queue: String, message: String },

    #[error("unexpected reply from broker: {0}")]
    UnexpectedFrame(String),

    #[error("message {message_id} rejected by broker: {reason}")]
    Rejected { message_id: String, reason: String },

    #[error("delivery failed: {0}")]
    Delivery(String),

    #[error("connection to broker lost")]
    Disconnected,

    #[error("session is closed")]
    Closed,

    #[error("no reply received within {0:?}")]
    Timeout(Duration),
}

pub type Result<T> = std::result::Result<T, SampleError>;
