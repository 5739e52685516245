//! Provisions the durable tutorial queue and sends one persistent message to it.
//!
//! ```bash
//! cargo run --bin queue_producer -- <host:port> <message-vpn> <client-username> <client-password>
//! ```

use popsub_samples::config::Settings;
use popsub_samples::samples::{self, args::QueueArgs, queue_producer};
use popsub_samples::utils::Result;
use tracing::error;

#[tokio::main]
async fn main() {
    let args: QueueArgs = samples::args::parse_or_exit();
    let settings = samples::init();

    if let Err(e) = run(&args, &settings).await {
        error!("Queue producer failed: {e}");
        std::process::exit(1);
    }
}

async fn run(args: &QueueArgs, settings: &Settings) -> Result<()> {
    let props = args.session_properties(settings)?;
    let session = samples::connect(&props).await?;
    queue_producer::run(&session, settings).await?;
    Ok(())
}
