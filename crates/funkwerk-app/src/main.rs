// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Funkwerk — uniform SMS send routing over fragmented radio firmware.
//
// Entry point. Initialises logging, loads settings, resolves the send
// strategy once, and dispatches the requested send against the loopback
// radio. Which firmware profile the loopback emulates comes from the
// settings file, so the full fallback chain is demonstrable from the
// command line.

use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use clap::{Parser, Subcommand};

use funkwerk_core::config::AppConfig;
use funkwerk_core::error::Result;
use funkwerk_core::types::CompletionToken;
use funkwerk_radio::{LoopbackRadio, RadioPlatform};
use funkwerk_sms::Selector;

/// Send SMS through whichever radio tier this device supports.
#[derive(Debug, Parser)]
#[command(name = "funkwerk", version, about)]
struct Cli {
    /// Path to a JSON settings file. Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Send a text message.
    Send {
        destination: String,
        text: String,
        /// Override the configured service-centre address.
        #[arg(long)]
        service_center: Option<String>,
        /// Print sent/delivered reports as the radio emits them.
        #[arg(long)]
        track: bool,
    },
    /// Send a hex-encoded binary payload to an application port.
    SendData {
        destination: String,
        /// Payload bytes, hex encoded (e.g. `deadbeef`).
        payload: HexPayload,
        #[arg(long, default_value_t = 16962)]
        port: u16,
        #[arg(long)]
        service_center: Option<String>,
        #[arg(long)]
        track: bool,
    },
    /// Show how the active tier splits a text into transport parts.
    Divide { text: String },
}

/// Hex-encoded payload argument.
#[derive(Debug, Clone)]
struct HexPayload(Vec<u8>);

impl FromStr for HexPayload {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(hex::decode(s)?))
    }
}

static SELECTOR: Selector = Selector::new();

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    let radio = if config.reject_sends {
        LoopbackRadio::rejecting(config.firmware_profile)
    } else {
        LoopbackRadio::new(config.firmware_profile)
    };
    let strategy = SELECTOR.get(&radio);
    tracing::info!(
        tier = %strategy.tier(),
        platform = radio.platform_name(),
        "send strategy resolved"
    );

    match cli.command {
        Command::Send {
            destination,
            text,
            service_center,
            track,
        } => {
            let sc = service_center.or_else(|| config.service_center.clone());
            strategy.send_text_message(
                &destination,
                sc.as_deref(),
                &text,
                tracking_token("sent", track),
                tracking_token("delivered", track),
            )?;
            println!("message handed off to {destination}");
        }
        Command::SendData {
            destination,
            payload,
            port,
            service_center,
            track,
        } => {
            let sc = service_center.or_else(|| config.service_center.clone());
            strategy.send_data_message(
                &destination,
                sc.as_deref(),
                port,
                &payload.0,
                tracking_token("sent", track),
                tracking_token("delivered", track),
            )?;
            println!(
                "{} byte(s) handed off to {destination} port {port}",
                payload.0.len()
            );
        }
        Command::Divide { text } => {
            let parts = strategy.divide_message(&text);
            println!("{} part(s)", parts.len());
            for (index, part) in parts.iter().enumerate() {
                println!("  [{index}] ({} chars) {part}", part.chars().count());
            }
        }
    }
    Ok(())
}

/// A completion token that prints the radio's report, or nothing when
/// tracking is off.
fn tracking_token(label: &'static str, enabled: bool) -> Option<CompletionToken> {
    enabled.then(|| {
        CompletionToken::new(move |report| {
            println!(
                "{label}: message {} {:?} at {}",
                report.message_id, report.status, report.at
            );
        })
    })
}
