//! Callback roles
//!
//! Callbacks run on the session's reader task, one at a time. They must not
//! block: anything they need to send goes through the [`Outbound`] handle,
//! which only enqueues.

use tracing::{debug, error};

use crate::model::Message;
use crate::session::Outbound;
use crate::utils::SampleError;

/// Receives messages for a subscription or a bound queue.
pub trait MessageListener: Send + Sync {
    fn on_message(&self, message: Message, outbound: &dyn Outbound);

    fn on_error(&self, error: &SampleError);
}

/// Receives broker acknowledgements for persistent sends.
pub trait PublishEventHandler: Send + Sync {
    fn on_ack(&self, message_id: &str);

    fn on_error(&self, message_id: Option<&str>, error: &SampleError);
}

/// Publish event handler that only logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingPublishEvents;

impl PublishEventHandler for LoggingPublishEvents {
    fn on_ack(&self, message_id: &str) {
        debug!("Broker acknowledged message {message_id}");
    }

    fn on_error(&self, message_id: Option<&str>, error: &SampleError) {
        match message_id {
            Some(id) => error!("Producer received error for message {id}: {error}"),
            None => error!("Producer received error: {error}"),
        }
    }
}
