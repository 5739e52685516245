//! Binds to the durable tutorial queue and consumes, printing and
//! acknowledging, exactly one message.
//!
//! ```bash
//! cargo run --bin queue_consumer -- <host:port> <message-vpn> <client-username> <client-password>
//! ```

use popsub_samples::config::Settings;
use popsub_samples::samples::{self, args::QueueArgs, queue_consumer};
use popsub_samples::utils::Result;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let args: QueueArgs = samples::args::parse_or_exit();
    let settings = samples::init();

    if let Err(e) = run(&args, &settings).await {
        error!("Queue consumer failed: {e}");
        std::process::exit(1);
    }
}

async fn run(args: &QueueArgs, settings: &Settings) -> Result<()> {
    let props = args.session_properties(settings)?;
    let session = samples::connect(&props).await?;
    if queue_consumer::run(&session, settings).await?.is_none() {
        info!("Exiting without consuming a message.");
    }
    Ok(())
}
