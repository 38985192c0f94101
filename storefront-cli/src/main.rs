//! Storefront terminal client
//!
//! Renders catalogue listings in the terminal. Usage:
//!
//! ```text
//! storefront [link] [--once]
//! ```
//!
//! `link` is the starting location (default `/`). With `--once` the starting page is
//! printed and the program exits; otherwise commands are read from stdin.

mod app;
mod command;
mod config;
mod session_store;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use storefront_api::StorefrontClient;
use storefront_core::types::Location;
use storefront_core::{InMemoryHistory, ServiceContext};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use app::{App, Outcome};
use command::Command;
use config::AppConfig;
use session_store::FileSessionStore;

#[tokio::main]
async fn main() -> ExitCode {
    // 日志输出到 stderr，stdout 留给页面内容；log 记录经由 tracing-log 转发
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        tracing::error!("{e:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let once = args.iter().any(|a| a == "--once");
    let start = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .map_or("/", String::as_str);

    let config = AppConfig::load()?;
    tracing::debug!("API root: {}", config.api.api_root());

    let client = Arc::new(StorefrontClient::new(config.api.clone())?);
    let history = Arc::new(InMemoryHistory::new(Location::parse(start)?));
    let sessions = Arc::new(FileSessionStore::new(config.session_path()));
    let ctx = Arc::new(ServiceContext::new(
        client.clone(),
        client,
        history,
        sessions,
        config.listing,
    ));

    let app = App::new(ctx);
    println!("{}", app.start().await?);
    if once {
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };
        match app.execute(command).await {
            Ok(Outcome::Print(text)) => println!("{text}\n"),
            Ok(Outcome::Quit) => break,
            Err(e) => {
                tracing::warn!("Command failed: {e:#}");
                println!("Something went wrong: {e}");
            }
        }
    }
    Ok(())
}
