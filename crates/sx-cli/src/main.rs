mod render;
mod session;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sx_core::Page;
use sx_store::{ProfileStore, resolve_data_dir};

#[derive(Parser)]
#[command(name = "sx", about = "Space Express: unlock technologies, browse tabs")]
struct Cli {
    /// Save slot to use
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the page as a fresh session sees it
    Show,

    /// Unlock a technology, then render the page
    Unlock {
        /// Technology name
        tech: String,
    },

    /// List unlocked technologies
    Techs,

    /// Interactive session reading one command per line from stdin
    Play,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

/// Open the profile's page, or `None` when the environment cannot hold
/// durable state. Callers then produce no output at all.
fn open_page(cli: &Cli) -> Option<Page<ProfileStore>> {
    let override_dir = std::env::var_os("SX_DATA_DIR").map(PathBuf::from);
    let Some(base_dir) = resolve_data_dir(override_dir.as_deref()) else {
        tracing::debug!("no durable data directory available; nothing to render");
        return None;
    };

    match ProfileStore::open(cli.profile.as_deref(), &base_dir) {
        Ok(store) => {
            tracing::debug!(
                "profile '{}' at {}",
                store.profile_id(),
                base_dir.display()
            );
            Some(Page::open(store))
        }
        Err(e) => {
            tracing::warn!("durable store unavailable at {}: {e}", base_dir.display());
            None
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(mut page) = open_page(&cli) else {
        return Ok(());
    };

    match &cli.command {
        Commands::Show => cmd_show(&page),
        Commands::Unlock { tech } => cmd_unlock(&mut page, tech),
        Commands::Techs => cmd_techs(&page),
        Commands::Play => cmd_play(&mut page),
    }
}

fn cmd_show(page: &Page<ProfileStore>) -> Result<()> {
    let mut out = std::io::stdout().lock();
    render::write_screen(&mut out, &page.render()).context("failed to write screen")
}

fn cmd_unlock(page: &mut Page<ProfileStore>, tech: &str) -> Result<()> {
    let tech = tech.trim();
    anyhow::ensure!(!tech.is_empty(), "technology name must not be empty");

    let already = page.techs().has_tech(tech);
    page.unlock(tech);

    let mut out = std::io::stdout().lock();
    if already {
        writeln!(out, "{tech} was already unlocked")?;
    } else {
        writeln!(out, "unlocked {tech}")?;
    }
    writeln!(out)?;
    render::write_screen(&mut out, &page.render()).context("failed to write screen")
}

fn cmd_techs(page: &Page<ProfileStore>) -> Result<()> {
    let mut out = std::io::stdout().lock();
    let state = page.techs().state();
    if state.unlocked_count() == 0 {
        writeln!(out, "(no technologies unlocked)")?;
    } else {
        for name in state.unlocked() {
            writeln!(out, "{name}")?;
        }
    }
    Ok(())
}

fn cmd_play(page: &mut Page<ProfileStore>) -> Result<()> {
    let stdin = std::io::stdin().lock();
    let mut out = std::io::stdout().lock();
    session::run(page, stdin, &mut out)
}
