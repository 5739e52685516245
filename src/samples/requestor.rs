//! Requestor: sends one request to the request topic and waits for the reply
//! on a private inbox topic.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, error, info};
use uuid::Uuid;

use crate::config::Settings;
use crate::model::{Destination, Message};
use crate::session::{MessageListener, OneShotGate, Outbound, Session};
use crate::utils::{Result, SampleError};

pub const REQUEST_TEXT: &str = "Sample Request";

/// A topic only this requestor subscribes to.
pub fn inbox_topic() -> String {
    format!("#P2P/inbox/{}", Uuid::new_v4())
}

/// Waits for the reply whose correlation id matches the request.
pub struct ReplyListener {
    correlation_id: String,
    gate: Arc<OneShotGate>,
    reply: Mutex<Option<Result<Message>>>,
}

impl ReplyListener {
    pub fn new(correlation_id: impl Into<String>, gate: Arc<OneShotGate>) -> Self {
        Self {
            correlation_id: correlation_id.into(),
            gate,
            reply: Mutex::new(None),
        }
    }

    fn complete(&self, outcome: Result<Message>) {
        if self.gate.is_signalled() {
            return;
        }
        if let Ok(mut reply) = self.reply.lock() {
            *reply = Some(outcome);
        }
        self.gate.signal();
    }

    fn take(&self) -> Option<Result<Message>> {
        self.reply.lock().ok()?.take()
    }
}

impl MessageListener for ReplyListener {
    fn on_message(&self, message: Message, _outbound: &dyn Outbound) {
        if message.correlation_id.as_deref() != Some(self.correlation_id.as_str()) {
            debug!(
                "Ignoring message {} with unexpected correlation id",
                message.message_id
            );
            return;
        }
        self.complete(Ok(message));
    }

    fn on_error(&self, error: &SampleError) {
        error!("Requestor received exception: {error}");
        let outcome = match error {
            SampleError::Disconnected => SampleError::Disconnected,
            other => SampleError::Delivery(other.to_string()),
        };
        self.complete(Err(outcome));
    }
}

/// Sends one request and returns its reply. Closes the session in every case.
pub async fn run<S: Session + ?Sized>(session: &S, settings: &Settings) -> Result<Message> {
    let inbox = inbox_topic();
    let request = Message::text(Destination::topic(&settings.names.request_topic), REQUEST_TEXT)
        .with_reply_to(Destination::topic(&inbox));
    let correlation_id = request.message_id.clone();
    let request = request.with_correlation_id(correlation_id.clone());

    let gate = Arc::new(OneShotGate::new());
    let listener = Arc::new(ReplyListener::new(correlation_id, gate.clone()));

    let outcome = exchange(session, &inbox, request, listener.clone(), &gate, settings).await;
    session.close().await?;

    let reply = outcome?;
    println!("Received reply:\n{}", reply.payload);
    Ok(reply)
}

async fn exchange<S: Session + ?Sized>(
    session: &S,
    inbox: &str,
    request: Message,
    listener: Arc<ReplyListener>,
    gate: &OneShotGate,
    settings: &Settings,
) -> Result<Message> {
    session.subscribe(inbox, listener.clone()).await?;

    info!("Sending request to {}", request.destination);
    session.send(request)?;

    let timeout = Duration::from_secs(settings.requestor.timeout_secs);
    if tokio::time::timeout(timeout, gate.wait()).await.is_err() {
        return Err(SampleError::Timeout(timeout));
    }

    let reply = listener.take().unwrap_or(Err(SampleError::Disconnected))?;
    session.unsubscribe(inbox).await?;
    Ok(reply)
}
