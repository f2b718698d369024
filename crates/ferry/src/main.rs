// SPDX-FileCopyrightText: 2026 Ferry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ferry - incoming short-message ingestion.
//!
//! This is the binary entry point. It loads configuration, installs logging,
//! and drives the ingestion receiver from recorded events.

mod replay;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ferry_config::FerryConfig;
use ferry_core::types::SubscriberId;
use ferry_receiver::{ConfiguredApnResolver, require_apn};

/// Ferry - incoming short-message ingestion.
#[derive(Parser, Debug)]
#[command(name = "ferry", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run recorded inbound events through the receiver.
    Replay {
        /// JSON-lines file with one inbound event per line.
        #[arg(long)]
        events: PathBuf,
        /// Act as the secondary execution context.
        #[arg(long)]
        secondary: bool,
        /// Report messaging as disabled for this context.
        #[arg(long)]
        messaging_disabled: bool,
    },
    /// Print the effective configuration.
    Config,
    /// Resolve the APN used for a subscriber.
    Apn {
        /// Subscriber id; negative means unspecified.
        #[arg(long, allow_hyphen_values = true)]
        subscriber: i32,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ferry_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            ferry_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.receiver.log_level);
    ferry_receiver::metrics::register_metrics();

    match cli.command {
        Some(Commands::Replay {
            events,
            secondary,
            messaging_disabled,
        }) => {
            let options = replay::ReplayOptions {
                secondary,
                messaging_enabled: !messaging_disabled,
            };
            match replay::run_replay(&config, &events, options).await {
                Ok(summary) => println!("{summary}"),
                Err(e) => {
                    eprintln!("error: {e}");
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Config) => {
            if let Err(e) = print_config(&config) {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Apn { subscriber }) => {
            let resolver = ConfiguredApnResolver::from_config(&config);
            let subscriber = ferry_receiver::subscriber::resolve(Some(subscriber));
            match require_apn(&resolver, subscriber) {
                Ok(apn) => print_apn(subscriber, &apn),
                Err(e) => {
                    eprintln!("error: {e}");
                    std::process::exit(1);
                }
            }
        }
        None => {
            println!("ferry: use --help for available commands");
        }
    }
}

fn print_config(config: &FerryConfig) -> Result<(), toml::ser::Error> {
    let rendered = toml::to_string_pretty(config)?;
    print!("{rendered}");
    Ok(())
}

fn print_apn(subscriber: SubscriberId, apn: &ferry_core::types::ApnSettings) {
    println!("subscriber: {subscriber}");
    println!("apn:        {}", apn.name);
    println!("mmsc:       {}", apn.mmsc);
    if let Some(proxy) = &apn.proxy {
        match apn.proxy_port {
            Some(port) => println!("proxy:      {proxy}:{port}"),
            None => println!("proxy:      {proxy}"),
        }
    }
}

/// Initialize the tracing subscriber with an env filter.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ferry={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
