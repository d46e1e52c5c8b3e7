//! yizi CLI - lookup for 陳國昭老師趙孟頫每日一字 calligraphy lesson videos
//!
//! Find the lesson video for a character, either by typing the character or
//! by browsing the 214 Kangxi radicals:
//! - Full-screen TUI (`tui`, the default)
//! - One-shot lookups (`search`, `radical`)
//! - Offline radical table (`radicals`)

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};

use yizi_core::config;
use yizi_core::StoreConfig;
use yizi_search::{RadicalArgs, RadicalsArgs, SearchArgs, SupabaseStore};

mod tracing_setup;
mod tui;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "yizi",
    author,
    version,
    about = "陳國昭老師趙孟頫每日一字教學影片查詢",
    long_about = "Look up calligraphy lesson videos by character or by Kangxi radical. \
                  Reads SUPABASE_URL and SUPABASE_KEY from the environment, a .env file \
                  or ~/.yizi/.env."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Suppress progress spinners (for script consumption)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive lookup (default)
    Tui,
    /// Find characters whose glyph contains TEXT
    Search(SearchArgs),
    /// Find characters filed under a radical
    Radical(RadicalArgs),
    /// List the Kangxi radical table (no network needed)
    Radicals(RadicalsArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let tracing_config = TracingConfig { debug: cli.debug };

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => run_tui(&tracing_config).await?,
        Commands::Search(args) => {
            tracing_setup::init_console(&tracing_config).ok();
            yizi_search::run_search(args, cli.quiet).await?
        }
        Commands::Radical(args) => {
            tracing_setup::init_console(&tracing_config).ok();
            yizi_search::run_radical(args, cli.quiet).await?
        }
        Commands::Radicals(args) => yizi_search::run_radicals(args)?,
        Commands::Completions(args) => run_completions(args)?,
    }
    Ok(())
}

async fn run_tui(tracing_config: &TracingConfig) -> Result<()> {
    // The terminal belongs to the UI, so logs go to a file
    let _guard = match config::log_dir() {
        Some(dir) => tracing_setup::init_file(tracing_config, &dir).ok(),
        None => None,
    };

    // Fail before touching the terminal when the store is not configured
    let store_config = StoreConfig::load().context("Failed to load store configuration")?;
    debug!(?store_config, "store configuration loaded");
    let store = SupabaseStore::new(store_config).context("Failed to create store client")?;

    info!("starting TUI");
    tui::run(Arc::new(store)).await
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
