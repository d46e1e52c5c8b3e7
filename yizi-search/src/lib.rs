//! yizi-search - remote character lookup for yizi
//!
//! This crate provides:
//! - `SupabaseStore`, a PostgREST client implementing `CharacterStore`
//! - CLI argument handling for the `yizi search`, `yizi radical` and
//!   `yizi radicals` subcommands
//!
//! ## Architecture
//!
//! ```text
//! args → SearchController → SupabaseStore (GET /rest/v1/{table}) → view() → stdout
//! ```

pub mod render;
pub mod supabase;

use std::io::IsTerminal;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, instrument};

use yizi_core::radicals;
use yizi_core::{CharacterStore, SearchController, SearchMode, SearchView, StoreConfig};

pub use render::NO_MATCHES;
pub use supabase::SupabaseStore;

/// Search subcommand arguments
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Character (or part of one) to look up
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Output format (text, json)
    #[arg(long, short = 'f', default_value = "text")]
    pub format: OutputFormat,
}

/// Radical subcommand arguments
#[derive(Args, Debug)]
pub struct RadicalArgs {
    /// Radical number (1-214) or glyph, e.g. 64 or 手
    #[arg(value_name = "NUMBER|GLYPH")]
    pub radical: String,

    /// Output format (text, json)
    #[arg(long, short = 'f', default_value = "text")]
    pub format: OutputFormat,
}

/// Radicals subcommand arguments
#[derive(Args, Debug)]
pub struct RadicalsArgs {
    /// Only list radicals with this many strokes
    #[arg(long, short = 's', value_parser = clap::value_parser!(u8).range(1..=17))]
    pub strokes: Option<u8>,

    /// Output format (text, json)
    #[arg(long, short = 'f', default_value = "text")]
    pub format: OutputFormat,
}

/// Output format options
#[derive(Debug, Clone, Copy, clap::ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// JSON for machine consumption
    Json,
}

/// Helper to create a spinner (respects quiet mode and TTY)
fn spinner(msg: &str, quiet: bool) -> Option<ProgressBar> {
    if quiet || !std::io::stderr().is_terminal() {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    Some(pb)
}

fn connect() -> Result<SupabaseStore> {
    let config = StoreConfig::load().context("Failed to load store configuration")?;
    debug!(?config, "store configuration loaded");
    SupabaseStore::new(config).context("Failed to create store client")
}

/// Execute the search command
#[instrument(skip_all, fields(text = %args.text))]
pub async fn run_search(args: SearchArgs, quiet: bool) -> Result<()> {
    if args.text.is_empty() {
        anyhow::bail!("No search text provided.");
    }
    let store = connect()?;
    let output = search_with(store, &args, quiet).await?;
    println!("{}", output);
    Ok(())
}

/// Execute the radical command
#[instrument(skip_all, fields(radical = %args.radical))]
pub async fn run_radical(args: RadicalArgs, quiet: bool) -> Result<()> {
    let store = connect()?;
    let output = radical_with(store, &args, quiet).await?;
    println!("{}", output);
    Ok(())
}

/// Execute the radicals command (offline)
pub fn run_radicals(args: RadicalsArgs) -> Result<()> {
    println!("{}", list_radicals(&args)?);
    Ok(())
}

/// Run a text search against `store` and return what to print
pub async fn search_with<S: CharacterStore>(store: S, args: &SearchArgs, quiet: bool) -> Result<String> {
    if args.text.is_empty() {
        anyhow::bail!("No search text provided.");
    }
    let mut controller = SearchController::new(store);

    let pb = spinner(&format!("Searching for {}...", args.text), quiet);
    controller.search_by_text(&args.text).await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    render_outcome(&controller, args.format)
}

/// Run a radical search against `store` and return what to print
pub async fn radical_with<S: CharacterStore>(
    store: S,
    args: &RadicalArgs,
    quiet: bool,
) -> Result<String> {
    let entry = *radicals::resolve(&args.radical)
        .with_context(|| format!("Unknown radical '{}' (expected 1-214 or a radical glyph)", args.radical))?;

    let mut controller = SearchController::new(store);
    controller.set_mode(SearchMode::Radical);
    controller.select_stroke_count(entry.stroke_count);

    let pb = spinner(
        &format!("Searching radical {} {}...", entry.number, entry.glyph),
        quiet,
    );
    controller.select_radical(entry).await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    render_outcome(&controller, args.format)
}

/// Render the static radical table
pub fn list_radicals(args: &RadicalsArgs) -> Result<String> {
    let entries = match args.strokes {
        Some(count) => radicals::by_stroke_count(count),
        None => radicals::RADICALS.to_vec(),
    };
    match args.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&entries)?),
        OutputFormat::Text => Ok(render::format_radicals(&entries)),
    }
}

/// Turn the controller's settled view into output, or an error for the error view
fn render_outcome<S>(controller: &SearchController<S>, format: OutputFormat) -> Result<String> {
    let view = controller.view();
    if let SearchView::Error(message) = view {
        anyhow::bail!("{}", message);
    }
    match format {
        OutputFormat::Json => Ok(render::format_records_json(&controller.state().results)?),
        OutputFormat::Text => Ok(render::format_view(&view).unwrap_or_default()),
    }
}
