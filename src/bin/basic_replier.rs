//! Replies with a fixed text to every request published on the request topic.
//!
//! ```bash
//! cargo run --bin basic_replier -- <host:port>
//! ```
//!
//! Username, VPN and password come from configuration. Press Enter to exit.

use popsub_samples::config::Settings;
use popsub_samples::samples::{self, args::ReplierArgs, replier};
use popsub_samples::utils::Result;
use tracing::error;

#[tokio::main]
async fn main() {
    let args: ReplierArgs = samples::args::parse_or_exit();
    let settings = samples::init();

    if let Err(e) = run(&args, &settings).await {
        error!("Replier failed: {e}");
        std::process::exit(1);
    }
}

async fn run(args: &ReplierArgs, settings: &Settings) -> Result<()> {
    let props = args.session_properties(settings)?;
    let session = samples::connect(&props).await?;
    replier::run(&session, settings, samples::wait_for_operator()).await
}
