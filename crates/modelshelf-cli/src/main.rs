//! Modelshelf CLI: browse and like 3D/AR educational models

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use modelshelf::app::{AppContext, OpenOptions};
use modelshelf::catalog::ContentFilter;
use modelshelf::data::{ContentItem, KeyValueStore, Toggle};
use modelshelf::share::{ShareError, SharePlatform, ShareOutcome, ShareRequest};

#[derive(Parser)]
#[command(name = "modelshelf", about = "Browse and like 3D/AR educational models", version)]
struct Cli {
    /// Use only the built-in sample catalog
    #[arg(long, global = true)]
    offline: bool,

    /// Data directory (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// List catalog models
    List {
        /// Only models in this category
        #[arg(short, long)]
        category: Option<String>,
        /// Text to look for in title, category or description
        #[arg(short, long)]
        search: Option<String>,
    },
    /// List catalog categories
    Categories,
    /// Show one model with related models
    Show { id: String },
    /// Like a model, or unlike it if already liked
    Like { id: String },
    /// Remove a model from the liked list
    Unlike { id: String },
    /// List liked models
    Liked,
    /// Print the number of liked models
    Count,
    /// Remove every liked model
    Clear,
    /// Print a share link for a model
    Share { id: String },
    /// Show the theme, or switch it
    Theme {
        #[arg(value_parser = ["toggle"])]
        action: Option<String>,
    },
}

/// Terminals have no share sheet; the link is printed for copying
struct TerminalShare;

impl SharePlatform for TerminalShare {
    fn can_share(&self) -> bool {
        false
    }

    fn share(&self, _request: &ShareRequest) -> Result<(), ShareError> {
        Err(ShareError::Cancelled)
    }

    fn copy_link(&self, url: &str) -> modelshelf::Result<()> {
        println!("{url}");
        Ok(())
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = OpenOptions {
        data_dir: cli.data_dir,
        offline: cli.offline,
    };

    let mut ctx = match AppContext::open(options) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = run(&mut ctx, cli.command);
    ctx.shutdown();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run<S: KeyValueStore>(ctx: &mut AppContext<S>, command: Command) -> modelshelf::Result<()> {
    debug!(?command, "Running command");
    match command {
        Command::List { category, search } => {
            let mut filter = ContentFilter::new();
            filter.category = category;
            filter.search = search;

            let listing = ctx.catalog().browse(&filter)?;
            if listing.degraded {
                eprintln!("(catalog API unreachable, showing built-in samples)");
            }
            for item in &listing.items {
                print_item(item, ctx.favorites().contains(&item.id));
            }
            println!(
                "{} {}",
                listing.items.len(),
                if listing.items.len() == 1 { "model" } else { "models" }
            );
        }
        Command::Categories => {
            for category in ctx.catalog().categories()? {
                println!("{category}");
            }
        }
        Command::Show { id } => {
            let detail = ctx
                .catalog()
                .detail(&id)?
                .ok_or_else(|| modelshelf::AppError::NotFound(format!("Content with ID '{id}'")))?;
            let item = &detail.item;
            print_item(item, ctx.favorites().contains(&item.id));
            println!("  {}", item.description);
            println!("  model:     {}", item.model_url);
            println!("  thumbnail: {}", item.thumbnail_url);
            if !detail.related.is_empty() {
                println!("Related:");
                for related in &detail.related {
                    print_item(related, ctx.favorites().contains(&related.id));
                }
            }
        }
        Command::Like { id } => match ctx.toggle_like(&id)? {
            Toggle::Added => println!("Liked {id}"),
            Toggle::Removed => println!("Unliked {id}"),
        },
        Command::Unlike { id } => match ctx.favorites_mut().remove(&id) {
            Some(item) => println!("Unliked {} ({})", item.id, item.title),
            None => println!("{id} was not liked"),
        },
        Command::Liked => {
            let favorites = ctx.favorites();
            if favorites.is_empty() {
                println!("No liked models yet");
            }
            for item in favorites.items() {
                println!("♥ {:>4}  {:<32} {}", item.id, item.title, item.category);
            }
        }
        Command::Count => println!("{}", ctx.favorites().count()),
        Command::Clear => {
            let count = ctx.favorites().count();
            ctx.favorites_mut().clear();
            println!("Removed {count} liked {}", if count == 1 { "model" } else { "models" });
        }
        Command::Share { id } => {
            if ctx.share_item(&id, &TerminalShare)? == ShareOutcome::Cancelled {
                println!("Share cancelled");
            }
        }
        Command::Theme { action } => {
            if action.is_some() {
                ctx.settings_mut().toggle_theme();
                ctx.save_settings()?;
            }
            println!("{}", ctx.settings().theme.as_str());
        }
    }

    if ctx.favorites().is_dirty() {
        eprintln!("warning: liked models could not be saved; changes last until exit");
    }
    Ok(())
}

fn print_item(item: &ContentItem, liked: bool) {
    let mark = if liked { "♥" } else { " " };
    println!("{mark} {:>4}  {:<32} {}", item.id, item.title, item.category);
}
