use aisle_core::{AisleConfig, Catalog, JsonFileStore, Resolver, CONFIG_FILE_NAME};
use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use std::io;
use std::path::PathBuf;

mod command;
mod paths;
mod port;

pub use paths::{resolve_data_dir, DATA_DIR_ENV};
pub use port::{DecliningPort, TerminalPort};

pub(crate) fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "aisle")]
#[command(about = "Sort a shopping list into store order", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding items.json, sections.json and config.toml
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sort a shopping list (one item per line) read from FILE or stdin
    Sort(SortArgs),

    /// Manage the ordered section list
    #[command(subcommand)]
    Sections(SectionsCommand),

    /// Manage item to section mappings
    #[command(subcommand)]
    Items(ItemsCommand),

    /// Write a JSON backup of all items and sections
    Export(ExportArgs),

    /// Replace all items and sections with a JSON backup
    Import(ImportArgs),
}

#[derive(Args)]
pub(crate) struct SortArgs {
    /// File with one item per line (defaults to stdin)
    pub file: Option<PathBuf>,

    /// Never prompt: skip suggestions and leave unknown items unsorted
    #[arg(long)]
    pub no_prompt: bool,

    /// Prefix each line with its section
    #[arg(long, conflicts_with = "json")]
    pub show_sections: bool,

    /// Print the sorted entries as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub(crate) enum SectionsCommand {
    /// Print sections in store order
    List,

    /// Add a section (at the front unless --at/--back is given)
    Add {
        name: String,
        /// Zero-based position
        #[arg(long, conflicts_with = "back")]
        at: Option<usize>,
        /// Append instead of prepending
        #[arg(long)]
        back: bool,
    },

    /// Rename a section; its items follow
    Rename { old: String, new: String },

    /// Delete a section together with every item mapped to it
    Delete {
        name: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Set the section order; must name every current section exactly once
    Reorder {
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Remove all sections (items stay but become unsorted)
    Clear {
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum ItemsCommand {
    /// List items alphabetically
    List {
        /// Only items containing this text
        #[arg(long)]
        search: Option<String>,
        /// Only items in this section
        #[arg(long)]
        section: Option<String>,
    },

    /// Print items grouped by section, in store order
    Grouped,

    /// Add a new item
    Add { name: String, section: String },

    /// Rename an item and/or move it to another section
    Edit {
        old: String,
        new: String,
        #[arg(long)]
        section: Option<String>,
    },

    /// Delete an item
    Delete {
        name: String,
        #[arg(long)]
        yes: bool,
    },

    /// Remove every item
    Clear {
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args)]
pub(crate) struct ExportArgs {
    /// Output file (defaults to shopping-list-backup-YYYY-MM-DD.json)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub(crate) struct ImportArgs {
    /// Backup file produced by `aisle export`
    pub file: PathBuf,

    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

/// Everything a command needs
pub(crate) struct Session {
    pub catalog: Catalog<JsonFileStore>,
    pub resolver: Resolver,
}

pub async fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let data_dir = resolve_data_dir(cli.data_dir);
    let config_path = data_dir.join(CONFIG_FILE_NAME);
    let config = AisleConfig::load(&config_path)
        .await
        .with_context(|| format!("loading {}", config_path.display()))?;

    let catalog = Catalog::load(JsonFileStore::new(&data_dir), config.seed_defaults).await;
    log::debug!("Data directory: {}", catalog.store().dir().display());
    let mut session = Session {
        catalog,
        resolver: Resolver::new(config.resolver()),
    };

    match cli.command {
        Commands::Sort(args) => command::sort::run(&mut session, args).await?,
        Commands::Sections(cmd) => command::sections::run(&mut session, cmd).await?,
        Commands::Items(cmd) => command::items::run(&mut session, cmd).await?,
        Commands::Export(args) => command::backup::export(&session, args).await?,
        Commands::Import(args) => command::backup::import(&mut session, args).await?,
    }
    Ok(())
}
