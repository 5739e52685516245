//! WebSocket session
//!
//! `WsSession` is the production [`Session`]: it speaks the PopSub JSON frame
//! protocol over a single WebSocket connection. Responsibilities:
//! - Connect and run the login -> auth handshake before anything else
//! - Own a writer task that drains an unbounded channel into the socket, so
//!   callbacks can send and ack without blocking
//! - Own a reader task that decodes server frames, routes `message` frames to
//!   the listener registered for their destination, reports publish outcomes
//!   to the publish event handler and hands every other frame to the pending
//!   control request
//!
//! Control requests (login, subscribe, provision, bind) are serialized behind
//! a lock and each one parks a oneshot sender for its reply. Control frames
//! that arrive with no request pending are never handed to a later request.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures_util::{SinkExt, Stream, StreamExt};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tracing::{debug, error, info, warn};
use tungstenite::protocol::Message as WsMessage;

use crate::model::{Destination, Message};
use crate::session::routes::Routes;
use crate::session::{
    FlowProperties, MessageListener, Outbound, Provision, PublishEventHandler, QueueSpec, Session,
    SessionProperties, SessionState,
};
use crate::transport::message::{ALREADY_EXISTS, ClientFrame, ServerFrame};
use crate::utils::{Result, SampleError};

/// Sending half shared by the session and every callback.
#[derive(Clone)]
struct FrameSender {
    tx: mpsc::UnboundedSender<WsMessage>,
    closing: Arc<AtomicBool>,
    lost: Arc<AtomicBool>,
}

impl FrameSender {
    fn push(&self, frame: &ClientFrame) -> Result<()> {
        if self.closing.load(Ordering::SeqCst) {
            return Err(SampleError::Closed);
        }
        if self.lost.load(Ordering::SeqCst) {
            return Err(SampleError::Disconnected);
        }
        let text = serde_json::to_string(frame)?;
        self.tx
            .send(WsMessage::text(text))
            .map_err(|_| SampleError::Disconnected)
    }
}

impl Outbound for FrameSender {
    fn send(&self, message: Message) -> Result<()> {
        debug!(
            "Sending message {} to {}",
            message.message_id, message.destination
        );
        self.push(&ClientFrame::from(message))
    }

    fn ack(&self, message_id: &str) -> Result<()> {
        self.push(&ClientFrame::Ack {
            message_id: message_id.to_string(),
        })
    }
}

/// Reply slot of the control request in flight, if any.
type PendingReply = Arc<Mutex<Option<oneshot::Sender<ServerFrame>>>>;

/// State owned by the reader task.
struct Dispatcher {
    outbound: FrameSender,
    routes: Arc<Routes>,
    events: Arc<dyn PublishEventHandler>,
    pending: PendingReply,
}

impl Dispatcher {
    fn dispatch(&self, text: &str) {
        let frame: ServerFrame = match serde_json::from_str(text) {
            Ok(frame) => frame,
            Err(err) => {
                warn!(
                    "Invalid server frame: {err} | {}",
                    text.chars().take(100).collect::<String>()
                );
                return;
            }
        };

        match frame.into_message() {
            Ok(message) => match self.routes.lookup(&message.destination) {
                Some(listener) => listener.on_message(message, &self.outbound),
                None => debug!("No listener for message on {}", message.destination),
            },
            Err(ServerFrame::Published { message_id }) => self.events.on_ack(&message_id),
            Err(ServerFrame::Rejected {
                message_id,
                message,
            }) => {
                let err = SampleError::Rejected {
                    message_id: message_id.clone(),
                    reason: message,
                };
                self.events.on_error(Some(&message_id), &err);
            }
            Err(other) => {
                let waiting = self.pending.lock().unwrap().take();
                match (waiting, other) {
                    (Some(reply), frame) => {
                        let _ = reply.send(frame);
                    }
                    (None, ServerFrame::Error { message, .. }) => {
                        self.events.on_error(None, &SampleError::Delivery(message));
                    }
                    (None, frame) => debug!("Dropping unsolicited control frame {frame:?}"),
                }
            }
        }
    }

    async fn run<S>(self, mut stream: S)
    where
        S: Stream<Item = std::result::Result<WsMessage, tungstenite::Error>> + Unpin,
    {
        while let Some(frame) = stream.next().await {
            match frame {
                Ok(msg) if msg.is_text() => match msg.to_text() {
                    Ok(text) => self.dispatch(text),
                    Err(err) => warn!("Unreadable text frame: {err}"),
                },
                Ok(msg) if msg.is_close() => break,
                Ok(_) => {}
                Err(err) => {
                    if !self.outbound.closing.load(Ordering::SeqCst) {
                        warn!("WebSocket read failed: {err}");
                    }
                    break;
                }
            }
        }

        // set before the slot is emptied so a request parked afterwards fails its push
        self.outbound.lost.store(true, Ordering::SeqCst);
        self.pending.lock().unwrap().take();

        if !self.outbound.closing.load(Ordering::SeqCst) {
            error!("Connection to broker lost");
            for listener in self.routes.listeners() {
                listener.on_error(&SampleError::Disconnected);
            }
        }
        debug!("Receive loop closed");
    }
}

pub struct WsSession {
    outbound: FrameSender,
    requests: tokio::sync::Mutex<()>,
    pending: PendingReply,
    routes: Arc<Routes>,
    state: Mutex<SessionState>,
    writer: Mutex<Option<JoinHandle<()>>>,
    reader: Mutex<Option<JoinHandle<()>>>,
}

impl WsSession {
    /// Connects to the broker and authenticates.
    pub async fn connect(
        props: &SessionProperties,
        events: Arc<dyn PublishEventHandler>,
    ) -> Result<Self> {
        info!(
            "Connecting to {} as {}@{}",
            props.endpoint, props.username, props.vpn
        );
        let (ws_stream, _response) = connect_async(props.endpoint.as_str()).await?;
        let (mut ws_sender, ws_receiver) = ws_stream.split();

        let (tx, mut rx) = mpsc::unbounded_channel::<WsMessage>();
        let lost = Arc::new(AtomicBool::new(false));
        let writer_lost = lost.clone();
        let writer = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                let last = msg.is_close();
                if let Err(e) = ws_sender.send(msg).await {
                    if !last {
                        warn!("Failed to write frame: {e}");
                        writer_lost.store(true, Ordering::SeqCst);
                    }
                    break;
                }
                if last {
                    break;
                }
            }
            debug!("Send loop closed");
        });

        let outbound = FrameSender {
            tx,
            closing: Arc::new(AtomicBool::new(false)),
            lost,
        };
        let routes = Arc::new(Routes::default());
        let pending = PendingReply::default();

        let dispatcher = Dispatcher {
            outbound: outbound.clone(),
            routes: routes.clone(),
            events,
            pending: pending.clone(),
        };
        let reader = tokio::spawn(dispatcher.run(ws_receiver));

        let session = Self {
            outbound,
            requests: tokio::sync::Mutex::new(()),
            pending,
            routes,
            state: Mutex::new(SessionState::Disconnected),
            writer: Mutex::new(Some(writer)),
            reader: Mutex::new(Some(reader)),
        };

        if let Err(err) = session.login(props).await {
            let _ = session.close().await;
            return Err(err);
        }

        session.advance(SessionState::Connected);
        info!("Connected to {}", props.endpoint);
        Ok(session)
    }

    async fn login(&self, props: &SessionProperties) -> Result<()> {
        let login = ClientFrame::Login {
            username: props.username.clone(),
            password: props.password.clone(),
            vpn: props.vpn.clone(),
        };
        let token = match self.request(login).await? {
            ServerFrame::LoginResponse { token } => token,
            ServerFrame::Error { message, .. } => return Err(SampleError::Auth(message)),
            other => return Err(unexpected(other)),
        };

        match self.request(ClientFrame::Auth { token }).await? {
            ServerFrame::Authenticated {} => Ok(()),
            ServerFrame::Error { message, .. } => Err(SampleError::Auth(message)),
            other => Err(unexpected(other)),
        }
    }

    async fn request(&self, frame: ClientFrame) -> Result<ServerFrame> {
        let _turn = self.requests.lock().await;
        let (reply_tx, reply_rx) = oneshot::channel();
        *self.pending.lock().unwrap() = Some(reply_tx);

        if let Err(err) = self.outbound.push(&frame) {
            self.pending.lock().unwrap().take();
            return Err(err);
        }
        reply_rx.await.map_err(|_| SampleError::Disconnected)
    }

    fn advance(&self, next: SessionState) {
        let mut state = self.state.lock().unwrap();
        *state = state.after(next);
    }
}

fn unexpected(frame: ServerFrame) -> SampleError {
    SampleError::UnexpectedFrame(format!("{frame:?}"))
}

impl Outbound for WsSession {
    fn send(&self, message: Message) -> Result<()> {
        self.outbound.send(message)
    }

    fn ack(&self, message_id: &str) -> Result<()> {
        self.outbound.ack(message_id)
    }
}

#[async_trait]
impl Session for WsSession {
    async fn subscribe(&self, topic: &str, listener: Arc<dyn MessageListener>) -> Result<()> {
        let route = Destination::topic(topic);
        // registered first so nothing published right after the reply is lost
        self.routes.add(route.clone(), listener);

        let result = match self
            .request(ClientFrame::Subscribe {
                topic: topic.to_string(),
            })
            .await
        {
            Ok(ServerFrame::Subscribed { .. }) => Ok(()),
            Ok(ServerFrame::Error { message, .. }) => Err(SampleError::Subscription {
                topic: topic.to_string(),
                message,
            }),
            Ok(other) => Err(unexpected(other)),
            Err(err) => Err(err),
        };

        match result {
            Ok(()) => {
                self.advance(SessionState::Subscribed);
                info!("Subscribed to topic {topic}");
                Ok(())
            }
            Err(err) => {
                self.routes.remove(&route);
                Err(err)
            }
        }
    }

    async fn unsubscribe(&self, topic: &str) -> Result<()> {
        self.routes.remove(&Destination::topic(topic));
        self.outbound.push(&ClientFrame::Unsubscribe {
            topic: topic.to_string(),
        })?;
        info!("Unsubscribed from topic {topic}");
        Ok(())
    }

    async fn provision_queue(&self, spec: &QueueSpec) -> Result<Provision> {
        let frame = ClientFrame::ProvisionQueue {
            queue: spec.name.clone(),
            durable: spec.durable,
            exclusive: spec.exclusive,
        };

        match self.request(frame).await? {
            ServerFrame::Provisioned { .. } => Ok(Provision::Created),
            ServerFrame::Error { code, .. } if code.as_deref() == Some(ALREADY_EXISTS) => {
                Ok(Provision::AlreadyExists)
            }
            ServerFrame::Error { message, .. } => Err(SampleError::Provisioning {
                queue: spec.name.clone(),
                message,
            }),
            other => Err(unexpected(other)),
        }
    }

    async fn bind(
        &self,
        queue: &str,
        flow: FlowProperties,
        listener: Arc<dyn MessageListener>,
    ) -> Result<()> {
        let route = Destination::queue(queue);
        self.routes.add(route.clone(), listener);

        let frame = ClientFrame::Bind {
            queue: queue.to_string(),
            exclusive: flow.exclusive,
            ack_mode: flow.ack_mode.as_str().to_string(),
        };
        let result = match self.request(frame).await {
            Ok(ServerFrame::Bound { .. }) => Ok(()),
            Ok(ServerFrame::Error { message, .. }) => Err(SampleError::Bind {
                queue: queue.to_string(),
                message,
            }),
            Ok(other) => Err(unexpected(other)),
            Err(err) => Err(err),
        };

        match result {
            Ok(()) => {
                self.advance(SessionState::Bound);
                info!("Bound to queue {queue}");
                Ok(())
            }
            Err(err) => {
                self.routes.remove(&route);
                Err(err)
            }
        }
    }

    async fn close(&self) -> Result<()> {
        if self.outbound.closing.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        info!("Closing session");

        // queued behind any pending sends and acks
        let _ = self.outbound.tx.send(WsMessage::Close(None));

        let writer = self.writer.lock().unwrap().take();
        if let Some(writer) = writer {
            let _ = writer.await;
        }

        let reader = self.reader.lock().unwrap().take();
        if let Some(reader) = reader {
            reader.abort();
            let _ = reader.await;
        }

        self.routes.clear();
        self.pending.lock().unwrap().take();
        *self.state.lock().unwrap() = SessionState::Closed;
        Ok(())
    }

    fn state(&self) -> SessionState {
        let state = *self.state.lock().unwrap();
        if state != SessionState::Closed && self.outbound.lost.load(Ordering::SeqCst) {
            return SessionState::Disconnected;
        }
        state
    }
}

impl Drop for WsSession {
    fn drop(&mut self) {
        for handle in [&self.writer, &self.reader] {
            if let Ok(mut handle) = handle.lock() {
                if let Some(handle) = handle.take() {
                    handle.abort();
                }
            }
        }
    }
}
