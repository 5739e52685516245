use tracing::info;

use crate::config::Settings;
use crate::model::{Destination, Message};
use crate::session::Session;
use crate::utils::Result;

pub const GREETING: &str = "Hello world!";

/// Publishes one direct message to the topic and closes.
pub async fn run<S: Session + ?Sized>(session: &S, settings: &Settings) -> Result<Message> {
    let message = Message::text(Destination::topic(&settings.names.topic), GREETING);
    info!("Publishing '{GREETING}' to {}", message.destination);
    let sent = session.send(message.clone());

    session.close().await?;
    sent?;
    Ok(message)
}
