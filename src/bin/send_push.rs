// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Broadcast a push notification to every registered device.

use anyhow::Context;
use clap::Parser;
use expense_splitter::{
    config::Config, db::JsonStore, services::PushService, telemetry::init_logging,
};

#[derive(Debug, Parser)]
#[command(name = "send_push", about = "Send a push message to all registered tokens")]
struct Args {
    /// Message body
    message: String,

    /// Notification title (defaults to PUSH_TITLE)
    #[arg(long)]
    title: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    let db = JsonStore::open(&config.data_dir)
        .await
        .context("Failed to open data directory")?;

    let tokens = db.tokens().await;
    if tokens.is_empty() {
        tracing::warn!(dir = %config.data_dir.display(), "No tokens registered, nothing to send");
        return Ok(());
    }

    let push = PushService::from_config(&config);
    let title = args.title.as_deref().unwrap_or(push.title());
    let response = push
        .send_with_title(&tokens, title, &args.message)
        .await
        .context("Push request failed")?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
