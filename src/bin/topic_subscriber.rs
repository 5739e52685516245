//! Subscribes to the tutorial topic, prints the first message received and exits.
//!
//! ```bash
//! # Terminal 1 - start the subscriber first
//! cargo run --bin topic_subscriber -- <host:port> <client-username@message-vpn> [client-password]
//!
//! # Terminal 2
//! cargo run --bin topic_publisher -- <host:port> <client-username@message-vpn> [client-password]
//! ```

use popsub_samples::config::Settings;
use popsub_samples::samples::{self, args::TopicArgs, topic_subscriber};
use popsub_samples::utils::Result;
use tracing::error;

#[tokio::main]
async fn main() {
    let args: TopicArgs = samples::args::parse_or_exit();
    let settings = samples::init();

    if let Err(e) = run(&args, &settings).await {
        error!("Topic subscriber failed: {e}");
        std::process::exit(1);
    }
}

async fn run(args: &TopicArgs, settings: &Settings) -> Result<()> {
    let props = args.session_properties(settings)?;
    let session = samples::connect(&props).await?;
    topic_subscriber::run(&session, settings).await?;
    Ok(())
}
