//! The sample programs.
//!
//! Each sample is a `run` function written against [`Session`], so the
//! binaries under `src/bin` only parse arguments, connect a
//! [`WsSession`](crate::transport::WsSession) and hand it over. Every run
//! follows the same shape: register one callback, wait for one event, close.

pub mod args;
pub mod queue_consumer;
pub mod queue_producer;
pub mod replier;
pub mod requestor;
pub mod topic_publisher;
pub mod topic_subscriber;

use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::{error, info};

use crate::config::{Settings, load_config};
use crate::session::handler::LoggingPublishEvents;
use crate::session::{Provision, QueueSpec, Session, SessionProperties};
use crate::transport::WsSession;
use crate::utils::{Result, logging};

/// Loads configuration and installs logging. Exits with status 1 if the
/// configuration cannot be read.
pub fn init() -> Settings {
    match load_config() {
        Ok(settings) => {
            logging::init(&settings.logging.level);
            settings
        }
        Err(e) => {
            logging::init("info");
            error!("Failed to load configuration: {e}");
            std::process::exit(1)
        }
    }
}

/// Opens a WebSocket session whose publish events are only logged.
pub async fn connect(props: &SessionProperties) -> Result<WsSession> {
    WsSession::connect(props, Arc::new(LoggingPublishEvents)).await
}

/// Provisions the durable queue, treating an existing queue as success.
pub async fn ensure_queue<S: Session + ?Sized>(session: &S, name: &str) -> Result<()> {
    match session.provision_queue(&QueueSpec::durable(name)).await? {
        Provision::Created => info!("Provisioned queue {name}"),
        Provision::AlreadyExists => info!("Queue {name} already exists"),
    }
    Ok(())
}

/// Resolves when the operator presses Enter, stdin closes, or Ctrl-C arrives.
pub async fn wait_for_operator() {
    // detached: a pending read must not block runtime shutdown
    let (tx, rx) = oneshot::channel();
    std::thread::spawn(move || {
        let mut line = String::new();
        let _ = std::io::stdin().read_line(&mut line);
        let _ = tx.send(());
    });

    tokio::select! {
        _ = rx => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received.");
        }
    }
}
