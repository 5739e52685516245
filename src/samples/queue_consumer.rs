//! Durable queue consumer.
//!
//! Binds an exclusive, client-acknowledged receiver to the queue and consumes
//! exactly one message.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, error, info};

use crate::config::Settings;
use crate::model::Message;
use crate::samples::ensure_queue;
use crate::session::{FlowProperties, MessageListener, OneShotGate, Outbound, Session};
use crate::utils::{Result, SampleError};

/// Acknowledges the first delivered message, then opens the gate.
///
/// Anything delivered after that is left unacknowledged for redelivery.
pub struct AckingListener {
    gate: Arc<OneShotGate>,
    consumed: AtomicBool,
    received: Mutex<Option<Message>>,
}

impl AckingListener {
    pub fn new(gate: Arc<OneShotGate>) -> Self {
        Self {
            gate,
            consumed: AtomicBool::new(false),
            received: Mutex::new(None),
        }
    }

    pub fn take_received(&self) -> Option<Message> {
        self.received.lock().ok()?.take()
    }
}

impl MessageListener for AckingListener {
    fn on_message(&self, message: Message, outbound: &dyn Outbound) {
        if self.consumed.swap(true, Ordering::SeqCst) {
            debug!("Ignoring message {}; one already consumed", message.message_id);
            return;
        }

        println!("Received message: {}", message.payload);
        if let Err(e) = outbound.ack(&message.message_id) {
            error!("Failed to acknowledge message {}: {e}", message.message_id);
        } else {
            info!("Acknowledged message {}", message.message_id);
        }

        if let Ok(mut received) = self.received.lock() {
            *received = Some(message);
        }
        self.gate.signal();
    }

    fn on_error(&self, error: &SampleError) {
        error!("Consumer received exception: {error}");
        self.gate.signal();
    }
}

/// Consumes one message from the queue; `None` if the wait ended on an error.
pub async fn run<S: Session + ?Sized>(
    session: &S,
    settings: &Settings,
) -> Result<Option<Message>> {
    let outcome = consume(session, &settings.names.queue).await;
    session.close().await?;
    outcome
}

async fn consume<S: Session + ?Sized>(session: &S, queue: &str) -> Result<Option<Message>> {
    ensure_queue(session, queue).await?;

    let gate = Arc::new(OneShotGate::new());
    let listener = Arc::new(AckingListener::new(gate.clone()));
    session
        .bind(queue, FlowProperties::exclusive_client_ack(), listener.clone())
        .await?;

    info!("Awaiting message on queue {queue}...");
    gate.wait().await;
    Ok(listener.take_received())
}
