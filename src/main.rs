// SPDX-License-Identifier: MPL-2.0
//! Console demo: runs a tracked operation through a queue and prints every
//! change of the active set.
//!
//! ```text
//! toast_queue [--config <settings.toml>] [--fail]
//! ```

use std::path::PathBuf;
use std::time::Duration;

use toast_queue::config::{self, DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY};
use toast_queue::diagnostics::{BufferCapacity, DiagnosticsCollector};
use toast_queue::error::{Error, Result};
use toast_queue::{global, Lifetime, LifetimePolicy, Notification, NotificationQueue, ResolveMessages};
use tracing_subscriber::EnvFilter;

struct Flags {
    config_path: Option<PathBuf>,
    fail: bool,
}

fn parse_flags() -> Result<Flags> {
    let mut args = pico_args::Arguments::from_env();
    let flags = Flags {
        fail: args.contains("--fail"),
        config_path: args
            .opt_value_from_str("--config")
            .map_err(|e| Error::Config(e.to_string()))?,
    };
    let rest = args.finish();
    if !rest.is_empty() {
        return Err(Error::Config(format!("unexpected arguments: {rest:?}")));
    }
    Ok(flags)
}

fn render(active: &[Notification]) {
    println!("--- {} active ---", active.len());
    for toast in active {
        let expiry = match toast.lifetime() {
            Lifetime::After(d) => format!("{:.1}s", d.as_secs_f32()),
            Lifetime::Unbounded => "until resolved".to_string(),
        };
        match toast.message() {
            Some(message) => println!("[{}] {}: {} ({expiry})", toast.kind(), toast.title(), message),
            None => println!("[{}] {} ({expiry})", toast.kind(), toast.title()),
        }
    }
}

async fn publish_listing(fail: bool) -> std::result::Result<u32, String> {
    tokio::time::sleep(Duration::from_millis(800)).await;
    if fail {
        Err("storage bucket rejected the upload".to_string())
    } else {
        Ok(42)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let flags = parse_flags()?;
    let config = match &flags.config_path {
        Some(path) => config::load_from_path(path)?,
        None => config::load()?,
    };

    let mut collector = DiagnosticsCollector::new(BufferCapacity::new(
        config
            .diagnostics
            .buffer_capacity
            .unwrap_or(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY),
    ));
    let queue = NotificationQueue::builder()
        .policy(LifetimePolicy::from_config(&config.notifications))
        .diagnostics(collector.handle())
        .build();
    global::register(queue.clone());

    let mut active = queue.subscribe();
    let renderer = tokio::spawn(async move {
        while active.changed().await.is_ok() {
            let snapshot = active.borrow_and_update().clone();
            render(&snapshot);
        }
    });

    global::info("Marketplace loaded");
    let outcome = queue
        .resolve(
            publish_listing(flags.fail),
            ResolveMessages::new("Publishing listing", "Listing published", "Publish failed"),
        )
        .await;
    match outcome {
        Ok(listing) => tracing::info!(listing, "listing published"),
        Err(err) => tracing::warn!("publish failed: {err}"),
    }

    while !queue.is_empty() {
        tokio::time::sleep(Duration::from_millis(250)).await;
    }

    global::unregister();
    renderer.abort();
    collector.process_pending();
    println!("{} diagnostic events recorded", collector.len());
    Ok(())
}
