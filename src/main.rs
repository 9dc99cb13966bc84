mod banner;
mod commands;
mod gateway;
mod i18n;
mod logging;

use clap::{Parser, Subcommand};
use i18n::Translations;
use notshop_channels::telegram::TelegramChannel;
use notshop_core::{config, traits::Channel};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "notshop",
    version,
    about = "notshop: Telegram storefront bot with paginated menus"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot.
    Start,
    /// Check configuration, channels, and translations.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Start => {
            banner::print();

            let cfg = config::load(&cli.config)?;
            let _log_guard = logging::init(&cfg.notshop)?;
            info!("starting {} with config {}", cfg.notshop.name, cli.config);

            let translations =
                Translations::load_dir(Path::new(&cfg.locale.dir), &cfg.locale.base)?;

            let mut channels: HashMap<String, Arc<dyn Channel>> = HashMap::new();

            if let Some(ref tg) = cfg.channel.telegram {
                if tg.enabled {
                    if tg.bot_token.is_empty() {
                        anyhow::bail!(
                            "Telegram is enabled but bot_token is empty. \
                             Set it in {} or the {} env var.",
                            cli.config,
                            config::BOT_TOKEN_ENV
                        );
                    }
                    let channel = TelegramChannel::new(tg.clone());
                    channels.insert("telegram".to_string(), Arc::new(channel));
                }
            }

            if channels.is_empty() {
                anyhow::bail!("No channels enabled. Enable at least one channel in {}.", cli.config);
            }

            let gw = gateway::Gateway::new(channels, Arc::new(translations), cfg.menu.clone());
            Arc::new(gw).run().await?;
        }
        Commands::Status => {
            let cfg = config::load(&cli.config)?;
            println!("notshop status check\n");
            println!("Config: {}", cli.config);
            println!("Name: {}", cfg.notshop.name);
            println!();

            if let Some(ref tg) = cfg.channel.telegram {
                println!(
                    "  telegram: {}",
                    if tg.enabled && !tg.bot_token.is_empty() {
                        "configured"
                    } else if tg.enabled {
                        "enabled but missing bot_token"
                    } else {
                        "disabled"
                    }
                );
            } else {
                println!("  telegram: not configured");
            }

            match Translations::load_dir(Path::new(&cfg.locale.dir), &cfg.locale.base) {
                Ok(tr) => println!(
                    "  locales: {} (base: {}{})",
                    tr.locales().join(", "),
                    tr.base(),
                    if tr.has_locale(tr.base()) { "" } else { ", missing" }
                ),
                Err(e) => println!("  locales: {e}"),
            }

            println!(
                "  menu: {} items, {} per page",
                cfg.menu.items.len(),
                cfg.menu.items_per_page
            );
        }
    }

    Ok(())
}
