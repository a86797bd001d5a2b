mod bot;
mod gateway;
mod i18n;

use bot::session::{MemorySessionStore, SessionStore};
use bot::Bot;
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use uniflow_channels::telegram::TelegramChannel;
use uniflow_core::{config, service::Service, shellexpand, traits::Channel};
use uniflow_memory::Store;

#[derive(Parser)]
#[command(
    name = "uniflow",
    version,
    about = "UniFlow: study and task planner chat bot"
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
    /// Show configuration and channel readiness.
    Status,
    /// Open the database, apply pending migrations, and exit.
    Migrate,
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
///
/// The returned guard flushes the file writer and must live until exit.
fn init_tracing(cfg: &config::UniflowConfig) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    if cfg.log_to_file {
        let dir = format!("{}/logs", shellexpand(&cfg.data_dir));
        let appender = tracing_appender::rolling::daily(dir, "uniflow.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .init();
        Some(guard)
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
        None
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli.config)?;
    let _log_guard = init_tracing(&cfg.uniflow);

    if !i18n::SUPPORTED_LANGUAGES.contains(&cfg.uniflow.language.as_str()) {
        tracing::warn!(
            "language {:?} is not translated, replies fall back to English",
            cfg.uniflow.language
        );
    }

    match cli.command {
        Commands::Start => {
            let mut channels: HashMap<String, Arc<dyn Channel>> = HashMap::new();

            if let Some(ref tg) = cfg.channel.telegram {
                if tg.enabled {
                    if tg.bot_token.is_empty() {
                        anyhow::bail!(
                            "Telegram is enabled but bot_token is empty. \
                             Set it in config.toml or TELEGRAM_BOT_TOKEN env var."
                        );
                    }
                    let channel = TelegramChannel::new(tg.clone());
                    channels.insert("telegram".to_string(), Arc::new(channel));
                }
            }

            if channels.is_empty() {
                anyhow::bail!("No channels enabled. Enable at least one channel in config.toml.");
            }

            let store = Store::new(&cfg.storage).await?;
            let service = Service::new(Arc::new(store));
            let sessions: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
            let bot = Bot::new(
                service,
                sessions.clone(),
                &cfg.uniflow.language,
                &cfg.bot.default_context_color,
            );

            println!("{} is starting...", cfg.uniflow.name);
            let gw = Arc::new(gateway::Gateway::new(
                bot,
                channels,
                sessions,
                cfg.session.clone(),
            ));
            gw.run().await?;
        }
        Commands::Status => {
            println!("{} status\n", cfg.uniflow.name);
            println!("Config: {}", cli.config);
            println!("Data dir: {}", shellexpand(&cfg.uniflow.data_dir));
            println!("Database: {}", shellexpand(&cfg.storage.db_path));
            println!("Language: {}", cfg.uniflow.language);
            println!(
                "Sessions: ttl {}m, swept every {}s",
                cfg.session.ttl_minutes, cfg.session.sweep_interval_secs
            );
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

            // Report counts only for an existing database; opening creates one.
            let db_path = shellexpand(&cfg.storage.db_path);
            if std::path::Path::new(&db_path).exists() {
                let store = Store::new(&cfg.storage).await?;
                println!();
                println!("Users: {}", store.count_users().await?);
                println!("Tasks: {}", store.count_tasks().await?);
            } else {
                println!();
                println!("Database not created yet (run `uniflow migrate`)");
            }
        }
        Commands::Migrate => {
            let store = Store::new(&cfg.storage).await?;
            println!(
                "Database ready at {} ({} bytes)",
                shellexpand(&cfg.storage.db_path),
                store.db_size().await?
            );
        }
    }

    Ok(())
}
