use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;

use folio::clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
use folio::config::Config;
use folio::logging::init_tracing;
use folio::mail::{MailtoLink, Outbox};
use folio::scenario::Scenario;
use folio::storage::{FileStore, KeyValueStore, MemoryStore};
use folio::ui::theme::load_theme;
use folio::Page;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Portfolio page interaction controller", long_about = None)]
struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a scenario against an in-memory page and print the result
    Simulate {
        scenario: PathBuf,
        /// Keep the clock running this long after the last event
        #[arg(long, default_value_t = 0)]
        run_ms: u64,
        /// Copy contact details to the real system clipboard
        #[arg(long)]
        system_clipboard: bool,
    },
    /// Show or flip the stored theme preference
    Theme {
        #[arg(value_enum, default_value_t = ThemeAction::Show)]
        action: ThemeAction,
        /// Preferences file (defaults to the platform data dir)
        #[arg(long)]
        store: Option<PathBuf>,
    },
    /// Print the mailto link the contact form would open
    Mailto {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ThemeAction {
    Show,
    Toggle,
}

fn main() {
    init_tracing();
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Command::Simulate {
            scenario,
            run_ms,
            system_clipboard,
        } => simulate(config, &scenario, run_ms, system_clipboard),
        Command::Theme { action, store } => theme(&config, action, store),
        Command::Mailto {
            name,
            email,
            subject,
            message,
        } => {
            let link = MailtoLink::compose(&config.contact.recipient, &name, &email, &subject, &message);
            println!("{link}");
            Ok(())
        }
    }
}

fn simulate(config: Config, path: &Path, run_ms: u64, system_clipboard: bool) -> Result<()> {
    let scenario = Scenario::load(path)?;
    let store = match scenario.stored_theme {
        Some(theme) => MemoryStore::with_entry(&config.theme.storage_key, theme.as_str()),
        None => MemoryStore::new(),
    };
    let (surface, mut events) = scenario.into_parts();
    let outbox = Outbox::new();
    let primary: Option<Box<dyn Clipboard>> = if system_clipboard {
        Some(Box::new(SystemClipboard::new()))
    } else {
        None
    };

    let mut page = Page::new(surface, config)
        .with_store(Box::new(store))
        .with_clipboards(primary, Box::new(MemoryClipboard::new()))
        .with_mail(Box::new(outbox.clone()))
        .mount();
    page.run(&mut events);
    page.advance(Duration::from_millis(run_ms));

    let mail: Vec<String> = outbox.links().iter().map(ToString::to_string).collect();
    let report = json!({
        "state": page.snapshot(),
        "mail": mail,
        "document": page.surface(),
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("failed to serialize report")?
    );
    Ok(())
}

fn theme(config: &Config, action: ThemeAction, store: Option<PathBuf>) -> Result<()> {
    let mut store = FileStore::new(store.unwrap_or_else(FileStore::default_path));
    let key = &config.theme.storage_key;
    let current = load_theme(&store, key, config.theme.default);
    let shown = match action {
        ThemeAction::Show => current,
        ThemeAction::Toggle => {
            let next = current.toggled();
            store
                .set(key, next.as_str())
                .with_context(|| format!("failed to save theme to {}", store.path().display()))?;
            next
        }
    };
    println!("{}", shown.as_str());
    Ok(())
}
