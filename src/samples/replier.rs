//! Request/reply responder.
//!
//! Subscribes to the request topic and answers every request that carries a
//! reply-address with a fixed text. Requests without one are logged and
//! dropped. A failed reply never stops the replier.

use std::future::Future;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::config::Settings;
use crate::model::Message;
use crate::session::{MessageListener, Outbound, Session};
use crate::utils::{Result, SampleError};

pub const REPLY_TEXT: &str = "Sample response";

#[derive(Debug, Default)]
pub struct RequestListener;

impl MessageListener for RequestListener {
    fn on_message(&self, request: Message, outbound: &dyn Outbound) {
        info!(
            "Received request {} on {}: {}",
            request.message_id, request.destination, request.payload
        );

        let Some(reply) = request.reply(REPLY_TEXT) else {
            warn!(
                "Received message {} without reply-to field, ignoring",
                request.message_id
            );
            return;
        };

        let reply_to = reply.destination.clone();
        match outbound.send(reply) {
            Ok(()) => info!("Sent reply to {reply_to}"),
            Err(e) => error!("Failed to send reply to {reply_to}: {e}"),
        }
    }

    fn on_error(&self, error: &SampleError) {
        error!("Replier received error: {error}");
    }
}

/// Serves requests until `shutdown` resolves, then closes the session.
pub async fn run<S, F>(session: &S, settings: &Settings, shutdown: F) -> Result<()>
where
    S: Session + ?Sized,
    F: Future<Output = ()>,
{
    let topic = &settings.names.request_topic;
    session
        .subscribe(topic, Arc::new(RequestListener))
        .await?;

    info!("Listening for requests on {topic}. Press Enter to exit.");
    shutdown.await;

    session.close().await
}
