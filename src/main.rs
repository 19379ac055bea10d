mod commands;
mod gateway;
mod reacjilator;
mod registry;
mod runner;
mod server;

use clap::{Parser, Subcommand};
use reacji_channels::slack::SlackChannel;
use reacji_core::config::{self, BackendKind};
use registry::{generate_backend, BackendRegistry};
use std::{path::Path, sync::Arc};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "reacjilator",
    version,
    about = "Slack translation bot: react with a flag, get a translation"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, env = "REACJI_CONFIG", default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Slack receiver.
    Start,
    /// Show configuration and which backends have credentials.
    Status,
    /// Translate text once and print the result.
    Translate {
        /// Target language code (e.g. `ja`, `en`).
        #[arg(long)]
        to: String,
        /// Backend to use instead of the configured default.
        #[arg(long)]
        backend: Option<BackendKind>,
        /// The text to translate.
        #[arg(trailing_var_arg = true)]
        text: Vec<String>,
    },
}

/// Startup notice when `path` is absent and defaults are in use.
fn missing_config_notice(path: &str) -> Option<String> {
    (!Path::new(path).exists()).then(|| format!("Config file not found at {path}, using defaults"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_with_env(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.reacjilator.log_level)),
        )
        .init();
    if let Some(notice) = missing_config_notice(&cli.config) {
        info!("{notice}");
    }

    match cli.command {
        Commands::Start => {
            let registry = BackendRegistry::from_config(cfg.backend.clone())
                .map_err(|e| anyhow::anyhow!("default backend unavailable: {e}"))?;

            if cfg.slack.bot_token.is_empty() {
                anyhow::bail!("SLACK_BOT_TOKEN is missing! Set it in config.toml or the environment.");
            }
            let slack = SlackChannel::new(cfg.slack.clone());

            let gw = Arc::new(gateway::Gateway::new(
                Arc::new(slack),
                Arc::new(registry),
                cfg.slack.shortcut_callback_id.clone(),
            ));
            let state = server::ServerState::new(gw, &cfg.slack.signing_secret);

            println!("⚡️ {} is running on port {}", cfg.reacjilator.name, cfg.server.port);
            server::serve(&cfg.server, state).await?;
        }
        Commands::Status => {
            println!("reacjilator status\n");
            println!("Config: {}", cli.config);
            println!("Listen: {}:{}", cfg.server.host, cfg.server.port);
            println!("Default backend: {}", cfg.backend.default.display_name());
            println!(
                "Slack: bot token {}, signing secret {}",
                if cfg.slack.bot_token.is_empty() { "missing" } else { "set" },
                if cfg.slack.signing_secret.is_empty() { "missing" } else { "set" },
            );
            println!();
            for kind in BackendKind::ALL {
                println!(
                    "  {:<7} {}",
                    kind.as_str(),
                    if cfg.backend.is_configured(kind) {
                        "configured"
                    } else {
                        "missing credentials"
                    }
                );
            }
        }
        Commands::Translate { to, backend, text } => {
            if text.is_empty() {
                anyhow::bail!("no text provided. Usage: reacjilator translate --to <lang> <text>");
            }
            let kind = backend.unwrap_or(cfg.backend.default);
            let translator = generate_backend(kind, &cfg.backend)?;
            let text = text.join(" ");
            match translator.translate(&text, &to.to_lowercase()).await {
                Ok(translated) => println!("{translated}"),
                Err(e) => anyhow::bail!("{} translation failed: {e}", kind.display_name()),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_notice() {
        assert_eq!(
            missing_config_notice("/nonexistent/__reacji_config__.toml").as_deref(),
            Some("Config file not found at /nonexistent/__reacji_config__.toml, using defaults")
        );
        let manifest = concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml");
        assert_eq!(missing_config_notice(manifest), None);
    }
}
