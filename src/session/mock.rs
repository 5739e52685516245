//! In-memory session double used by the sample tests.
//!
//! Records every call in order so tests can assert on sequencing (ack before
//! close, close exactly once), and lets a test push messages or errors into
//! whatever listener a sample registered.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::model::{Destination, Message};
use crate::session::routes::Routes;
use crate::session::{
    FlowProperties, MessageListener, Outbound, Provision, QueueSpec, Session, SessionState,
};
use crate::utils::{Result, SampleError};

#[derive(Debug, Clone, PartialEq)]
pub enum MockEvent {
    Subscribed(String),
    Unsubscribed(String),
    Provisioned(String),
    Bound(String, FlowProperties),
    Sent(Message),
    Acked(String),
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionBehavior {
    Create,
    AlreadyExists,
    Fail,
}

pub struct MockSession {
    events: Mutex<Vec<MockEvent>>,
    routes: Routes,
    state: Mutex<SessionState>,
    registered: Notify,
    provision: ProvisionBehavior,
    fail_sends: bool,
}

impl MockSession {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            routes: Routes::default(),
            state: Mutex::new(SessionState::Connected),
            registered: Notify::new(),
            provision: ProvisionBehavior::Create,
            fail_sends: false,
        }
    }

    pub fn with_provision(mut self, behavior: ProvisionBehavior) -> Self {
        self.provision = behavior;
        self
    }

    pub fn failing_sends(mut self) -> Self {
        self.fail_sends = true;
        self
    }

    pub fn events(&self) -> Vec<MockEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<Message> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                MockEvent::Sent(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&MockEvent) -> bool) -> usize {
        self.events().iter().filter(|e| pred(e)).count()
    }

    pub fn closes(&self) -> usize {
        self.count(|e| matches!(e, MockEvent::Closed))
    }

    fn record(&self, event: MockEvent) {
        self.events.lock().unwrap().push(event);
    }

    /// Resolves once a listener covering `destination` is registered.
    pub async fn listening(&self, destination: &Destination) {
        loop {
            let notified = self.registered.notified();
            if self.routes.lookup(destination).is_some() {
                return;
            }
            notified.await;
        }
    }

    /// Delivers `message` to the listener registered for its destination.
    pub fn deliver(&self, message: Message) {
        if let Some(listener) = self.routes.lookup(&message.destination) {
            listener.on_message(message, self);
        }
    }

    /// Reports `error` to every registered listener.
    pub fn fail(&self, error: SampleError) {
        for listener in self.routes.listeners() {
            listener.on_error(&error);
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if *self.state.lock().unwrap() == SessionState::Closed {
            return Err(SampleError::Closed);
        }
        Ok(())
    }

    fn register(&self, destination: Destination, listener: Arc<dyn MessageListener>) {
        self.routes.add(destination, listener);
        self.registered.notify_waiters();
    }
}

impl Outbound for MockSession {
    fn send(&self, message: Message) -> Result<()> {
        self.ensure_open()?;
        if self.fail_sends {
            return Err(SampleError::Disconnected);
        }
        self.record(MockEvent::Sent(message));
        Ok(())
    }

    fn ack(&self, message_id: &str) -> Result<()> {
        self.ensure_open()?;
        self.record(MockEvent::Acked(message_id.to_string()));
        Ok(())
    }
}

#[async_trait]
impl Session for MockSession {
    async fn subscribe(&self, topic: &str, listener: Arc<dyn MessageListener>) -> Result<()> {
        self.ensure_open()?;
        self.record(MockEvent::Subscribed(topic.to_string()));
        self.register(Destination::topic(topic), listener);
        let mut state = self.state.lock().unwrap();
        *state = state.after(SessionState::Subscribed);
        Ok(())
    }

    async fn unsubscribe(&self, topic: &str) -> Result<()> {
        self.ensure_open()?;
        self.routes.remove(&Destination::topic(topic));
        self.record(MockEvent::Unsubscribed(topic.to_string()));
        Ok(())
    }

    async fn provision_queue(&self, spec: &QueueSpec) -> Result<Provision> {
        self.ensure_open()?;
        match self.provision {
            ProvisionBehavior::Create => {
                self.record(MockEvent::Provisioned(spec.name.clone()));
                Ok(Provision::Created)
            }
            ProvisionBehavior::AlreadyExists => Ok(Provision::AlreadyExists),
            ProvisionBehavior::Fail => Err(SampleError::Provisioning {
                queue: spec.name.clone(),
                message: "permission denied".to_string(),
            }),
        }
    }

    async fn bind(
        &self,
        queue: &str,
        flow: FlowProperties,
        listener: Arc<dyn MessageListener>,
    ) -> Result<()> {
        self.ensure_open()?;
        self.record(MockEvent::Bound(queue.to_string(), flow));
        self.register(Destination::queue(queue), listener);
        *self.state.lock().unwrap() = SessionState::Bound;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if *state == SessionState::Closed {
            return Ok(());
        }
        *state = SessionState::Closed;
        drop(state);
        self.routes.clear();
        self.record(MockEvent::Closed);
        Ok(())
    }

    fn state(&self) -> SessionState {
        *self.state.lock().unwrap()
    }
}
