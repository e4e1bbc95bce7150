//! taxrelay binary entry point.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taxrelay::cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    // Initialize logging based on verbosity
    let default_filter = if cli::is_verbose() {
        "taxrelay=debug,tower_http=debug"
    } else {
        "taxrelay=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // The only place panics are logged, including those the request panic
    // layer turns into a 500. Tokio confines them to the task that panicked.
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("Unhandled panic: {}", info);
    }));

    // Run CLI
    cli::run().await
}
