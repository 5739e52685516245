//! Sends one request to the request topic and prints the reply.
//!
//! ```bash
//! cargo run --bin basic_requestor -- <host:port> <client-username@message-vpn> [client-password]
//! ```

use popsub_samples::config::Settings;
use popsub_samples::samples::{self, args::TopicArgs, requestor};
use popsub_samples::utils::Result;
use tracing::error;

#[tokio::main]
async fn main() {
    let args: TopicArgs = samples::args::parse_or_exit();
    let settings = samples::init();

    if let Err(e) = run(&args, &settings).await {
        error!("Requestor failed: {e}");
        std::process::exit(1);
    }
}

async fn run(args: &TopicArgs, settings: &Settings) -> Result<()> {
    let props = args.session_properties(settings)?;
    let session = samples::connect(&props).await?;
    requestor::run(&session, settings).await?;
    Ok(())
}
