// SPDX-License-Identifier: MIT
// Copyright 2026 Eventure Dev Team <dev@eventure.app>

//! Eventure command-line client.

use clap::Parser;
use eventure::{cli, config::Config, App};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    init_logging();

    let cli = cli::Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };

    let result = async {
        let app = App::new(config)?;
        app.load_session().await?;
        cli::run(&app, cli).await
    }
    .await;

    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

/// Logging goes to stderr so command output stays clean on stdout.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("eventure=warn".parse().unwrap()),
        )
        .with(format)
        .init();
}
