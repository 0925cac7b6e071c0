//! Pincode Panel - drive a PIN-entry keypad from a signal script
//!
//! Each script line is one panel signal: a keypad button name such as `7`
//! or `Misc_2`, or `join:<n>` for a digital join. Display updates and submit
//! results are printed to stdout as they happen.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pincode_panel::{spawn_session, PanelConfig, PanelOutput, PanelSignal, SessionHandle};

#[derive(Parser)]
#[command(name = "pincode-panel")]
#[command(about = "Touch-panel PIN-entry keypad host", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the panel configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Feed panel signals through a keypad session
    Run {
        /// Signal script to read instead of stdin
        #[arg(short, long)]
        script: Option<PathBuf>,
    },

    /// Validate the configuration file
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only panel output
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pincode_panel=info,pincode_core=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => PanelConfig::default_path()?,
    };
    let config = PanelConfig::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    match cli.command {
        Commands::Run { script } => run(&config, script.as_deref()).await,
        Commands::CheckConfig => {
            check_config(&config, &config_path);
            Ok(())
        }
    }
}

/// Run one keypad session over a script or stdin
async fn run(config: &PanelConfig, script: Option<&Path>) -> Result<()> {
    let SessionHandle {
        signals,
        mut outputs,
        task,
    } = spawn_session(config)?;

    let printer = tokio::spawn(async move {
        while let Some(output) = outputs.recv().await {
            match output {
                PanelOutput::Display(text) => println!("display: {}", text),
                PanelOutput::Outcome { matched } => {
                    println!("result: {}", if matched { "correct" } else { "incorrect" })
                }
            }
        }
    });

    let reader: Box<dyn AsyncBufRead + Unpin + Send> = match script {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            info!("Reading panel signals from {}", path.display());
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(tokio::io::stdin())),
    };

    // Split on raw bytes so a line that is not UTF-8 is skipped like any
    // other malformed line
    let mut lines = reader.split(b'\n');
    let mut line_number = 0usize;
    while let Some(line) = lines.next_segment().await? {
        line_number += 1;
        match PanelSignal::parse_bytes(&line) {
            Ok(Some(signal)) => {
                if signals.send(signal).is_err() {
                    warn!("Keypad session ended early");
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => warn!(line = line_number, "Skipping script line: {}", e),
        }
    }

    // Closing the queue lets the session drain and finish
    drop(signals);
    task.await.context("Keypad session task failed")?;
    printer.await.context("Output task failed")?;

    Ok(())
}

/// Print a summary of the configuration without any secrets
fn check_config(config: &PanelConfig, path: &Path) {
    let pincode = &config.pincode;
    let panel = &config.panel;

    println!("Configuration OK: {}", path.display());
    println!("  digit limit:     {}", pincode.digit_limit);
    println!("  masking:         {}", on_off(pincode.masking_enabled));
    println!("  backdoor:        {}", on_off(pincode.backdoor_enabled));
    println!("  clear signal:    {}", panel.clear_signal);
    println!("  submit signal:   {}", panel.submit_signal);
    println!("  backspace join:  {}", panel.backspace_join);
    println!("  banner reset:    {}", on_off(panel.clear_banner_on_input));
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}
