//! Werewolf terminal client.
//!
//! Composition root: loads configuration, installs file logging, builds the
//! runtime with the seeded random provider for every AI seat, and hands the
//! terminal to [`app::App`].
//!
//! ```bash
//! WEREWOLF_HUMAN_ROLE=seer WEREWOLF_SEED=7 cargo run -p werewolf-client
//! ```

mod app;
mod command;
mod config;
mod logging;

use anyhow::Result;
use runtime::Runtime;

use crate::app::App;
use crate::config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env();
    let log_path = logging::setup_logging(config.log_dir.as_deref())?;
    println!("Logging to {}", log_path.display());

    tracing::info!(
        target: "client",
        seed = ?config.seed,
        role = ?config.human_role,
        seat = ?config.human_seat,
        "starting werewolf client"
    );

    let runtime = Runtime::builder()
        .config(config.runtime.clone())
        .build()
        .await?;

    App::new(runtime.handle(), config).run().await?;

    runtime.shutdown().await?;
    tracing::info!(target: "client", "client shutdown complete");
    Ok(())
}
