mod categories;
mod classify;
mod config;
mod model;
mod save;

use anyhow::{Result, bail};
use clap::Parser;
use log::warn;
use std::path::{Path, PathBuf};

use crate::categories::Category;
use crate::config::load_config;
use crate::model::Entry;
use crate::save::SaveOptions;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Display name for the launcher
    #[arg(short, long)]
    name: String,

    /// Short description shown by the desktop shell
    #[arg(short, long)]
    comment: Option<String>,

    /// Executable, script, or binary the launcher should run
    #[arg(short, long)]
    exec: String,

    /// Icon file path
    #[arg(short, long)]
    icon: Option<String>,

    /// Open the launcher in a terminal
    #[arg(short, long)]
    terminal: bool,

    /// Category token, repeatable: Utility, Graphics, Network, Office,
    /// Development, AudioVideo, System, Settings, Games
    #[arg(short = 'C', long = "category")]
    categories: Vec<String>,

    /// Save to the desktop directory
    #[arg(long)]
    desktop: bool,

    /// Save to the local applications directory
    #[arg(long)]
    local_apps: bool,

    /// Save into a custom directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing files
    #[arg(short, long)]
    force: bool,

    /// Print the generated entry instead of saving it
    #[arg(long)]
    dry_run: bool,

    /// Terminal emulator override for Terminal=true launchers
    #[arg(long)]
    terminal_command: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config()?;

    let mut entry = Entry::new();
    entry.name = args.name;
    entry.comment = args.comment.unwrap_or_default();
    entry.exec_path = args.exec;
    entry.icon_path = args.icon.unwrap_or_default();
    entry.terminal = args.terminal;
    for token in &args.categories {
        match Category::from_token(token) {
            Some(category) => entry.categories.set(category, true),
            None => bail!("unknown category token '{}'", token),
        }
    }

    entry.validate()?;

    // A bad executable path is worth flagging, but the user may be writing
    // the launcher ahead of installing the program.
    if let Err(issue) = save::check_executable(Path::new(&entry.exec_path)) {
        warn!("{}", issue);
    }

    let terminal_launcher = args
        .terminal_command
        .unwrap_or_else(|| config.general.terminal.clone());
    let content = entry.generate(&terminal_launcher);

    if args.dry_run {
        print!("{}", content);
        return Ok(());
    }

    let mut options = SaveOptions {
        desktop: args.desktop,
        local_apps: args.local_apps,
        custom_dir: args.output,
    };
    if !options.desktop && !options.local_apps && options.custom_dir.is_none() {
        options.desktop = config.targets.desktop;
        options.local_apps = config.targets.local_apps;
    }

    if let Some(dir) = &options.custom_dir {
        if let Err(err) = save::validate_custom_dir(dir) {
            bail!(err);
        }
    }

    let filename = format!("{}.desktop", save::sanitize_filename(&entry.name));
    let targets = save::resolve_targets(&options, &filename);
    if targets.is_empty() {
        bail!("no save target selected");
    }

    let existing = save::existing_targets(&targets);
    if !existing.is_empty() && !args.force {
        for path in &existing {
            eprintln!("already exists: {}", path.display());
        }
        bail!("refusing to overwrite existing files (pass --force)");
    }

    let outcomes = save::save_to_targets(&content, &targets);
    let mut saved = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(()) => {
                println!("saved {}", outcome.path.display());
                saved += 1;
            }
            Err(err) => eprintln!("error: {}", err),
        }
    }

    if saved == 0 {
        bail!("no targets were saved");
    }
    Ok(())
}
