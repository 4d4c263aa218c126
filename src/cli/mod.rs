//! CLI module
//!
//! Command-line interface for gamedeck.

mod args;

pub use args::{Args, Commands};

use anyhow::{Context, Result, bail};
use gamedeck::core::library::GameEntry;
use gamedeck::core::theme::Theme;
use gamedeck::core::{LauncherContext, NoticeLevel};
use gamedeck::Config;

/// Run one command against the library
pub fn run(command: Commands, config: Config) -> Result<()> {
    let mut ctx = LauncherContext::headless(config).context("Failed to open the game library")?;

    let ok = match command {
        Commands::List => {
            list_games(&ctx);
            true
        }
        Commands::Add { path, name } => {
            let entry = match name {
                Some(name) => GameEntry::new(name, path),
                None => GameEntry::from_executable(path),
            };
            ctx.add_entry(entry).is_some()
        }
        Commands::Remove { id } => {
            require_game(&ctx, id)?;
            ctx.remove(id);
            true
        }
        Commands::Cover { id, source } => {
            require_game(&ctx, id)?;
            ctx.change_cover_for(id, &source)
        }
        Commands::Launch { id } => {
            require_game(&ctx, id)?;
            ctx.launch(id);
            true
        }
        Commands::Themes => {
            list_themes();
            true
        }
    };

    let mut failed = !ok;
    for notice in ctx.drain_notices() {
        match notice.level {
            NoticeLevel::Info => println!("✅ {}", notice.message),
            NoticeLevel::Warning => {
                failed = true;
                eprintln!("⚠️  {}", notice.message)
            }
        }
    }

    if failed {
        bail!("command did not complete");
    }
    Ok(())
}

fn require_game(ctx: &LauncherContext, id: u64) -> Result<()> {
    if ctx.library().find(id).is_none() {
        bail!("No game with id {}. Use 'gamedeck list' to see ids.", id);
    }
    Ok(())
}

/// List all registered games
fn list_games(ctx: &LauncherContext) {
    let library = ctx.library();

    if library.is_empty() {
        println!("🎮 No games yet.");
        println!("   Use 'gamedeck add <path>' to register one.");
        return;
    }

    println!("🎮 Games ({}):", library.len());
    println!();

    for game in library.entries() {
        let cover = if game.cover.is_some() { " 🖼" } else { "" };
        println!("   [{}] {} - {}{}", game.id, game.name, game.path.display(), cover);
    }
}

fn list_themes() {
    for theme in Theme::ALL {
        let style = theme.style();
        let marker = if theme == Theme::default() { " (default)" } else { "" };
        println!("   {} - {}{}", theme, style.background, marker);
    }
}
