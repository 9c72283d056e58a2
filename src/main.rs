//! release-feed command-line entry point.
//!
//! Registers every configured consumer with the event loop and prints the
//! resulting consumer events, standing in for a real display layer.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use release_feed::config::Cli;
use release_feed::poll::{self, ConsumerEvent};
use release_feed::source::{HttpTransport, RssParser};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let consumers = cli.consumers()?;
    let transport = HttpTransport::new().context("building HTTP client")?;
    let (hub, mut events) = poll::spawn(transport, Box::new(RssParser));

    for consumer in consumers {
        info!(consumer = ?consumer.name, "registering consumer");
        if !hub.register(consumer) {
            anyhow::bail!("event loop stopped before registration");
        }
    }

    while let Some(event) = events.recv().await {
        match event {
            ConsumerEvent::ItemsUpdated { consumer, items } => {
                println!("[{consumer}] {} releases", items.len());
                for item in &items {
                    println!(
                        "  {}  {}  {}",
                        item.published_at.format("%Y-%m-%d"),
                        item.title,
                        item.url
                    );
                }
            }
            ConsumerEvent::UpdateDelta { consumer, items } => {
                for item in &items {
                    println!("[{consumer}] new: {}", item.title);
                }
            }
            ConsumerEvent::Error {
                consumer,
                error_type,
                error,
            } => {
                warn!(%consumer, error_type, %error, "feed error");
            }
        }
    }

    Ok(())
}
