//! Durable queue producer.
//!
//! Ensures the queue exists, sends one persistent message to it and closes.

use chrono::{DateTime, Local};
use tracing::info;

use crate::config::Settings;
use crate::model::{DeliveryMode, Destination, Message};
use crate::samples::ensure_queue;
use crate::session::Session;
use crate::utils::Result;

pub const BODY_PREFIX: &str = "Persistent Queue Tutorial!";

/// The single message this sample sends.
pub fn tutorial_message(queue: &str, now: DateTime<Local>) -> Message {
    let body = format!("{BODY_PREFIX} {}", now.format("%Y-%m-%d %H:%M:%S"));
    Message::text(Destination::queue(queue), body).with_delivery_mode(DeliveryMode::Persistent)
}

/// Sends one persistent message. Provisioning and send failures are
/// returned after closing.
pub async fn run<S: Session + ?Sized>(session: &S, settings: &Settings) -> Result<Message> {
    let outcome = produce(session, &settings.names.queue).await;
    session.close().await?;

    let message = outcome?;
    info!("Sent message {}. Exiting.", message.message_id);
    Ok(message)
}

async fn produce<S: Session + ?Sized>(session: &S, queue: &str) -> Result<Message> {
    ensure_queue(session, queue).await?;

    let message = tutorial_message(queue, Local::now());
    info!("Sending message '{}' to queue {queue}", message.payload);
    session.send(message.clone())?;
    Ok(message)
}
