//! Topic subscriber: prints the first message published on the topic.

use std::sync::{Arc, Mutex};

use tracing::{error, info};

use crate::config::Settings;
use crate::model::Message;
use crate::session::{MessageListener, OneShotGate, Outbound, Session};
use crate::utils::{Result, SampleError};

pub struct PrintingListener {
    gate: Arc<OneShotGate>,
    received: Mutex<Option<Message>>,
}

impl PrintingListener {
    pub fn new(gate: Arc<OneShotGate>) -> Self {
        Self {
            gate,
            received: Mutex::new(None),
        }
    }

    pub fn take_received(&self) -> Option<Message> {
        self.received.lock().ok()?.take()
    }
}

impl MessageListener for PrintingListener {
    fn on_message(&self, message: Message, _outbound: &dyn Outbound) {
        if self.gate.is_signalled() {
            return;
        }

        println!("Received message:\n{}", message.payload);
        if let Ok(mut received) = self.received.lock() {
            *received = Some(message);
        }
        self.gate.signal();
    }

    fn on_error(&self, error: &SampleError) {
        error!("Subscriber received exception: {error}");
        self.gate.signal();
    }
}

pub async fn run<S: Session + ?Sized>(
    session: &S,
    settings: &Settings,
) -> Result<Option<Message>> {
    let topic = &settings.names.topic;
    let gate = Arc::new(OneShotGate::new());
    let listener = Arc::new(PrintingListener::new(gate.clone()));
    session.subscribe(topic, listener.clone()).await?;

    info!("Awaiting message on {topic}...");
    gate.wait().await;

    session.close().await?;
    Ok(listener.take_received())
}
