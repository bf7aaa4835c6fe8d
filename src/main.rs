use anyhow::{Context, Result};
use book_finder::config::{default_config_path, find_config_file, get_config, load_config, Config};
use book_finder::models::{SearchField, SearchQuery, SearchResult};
use book_finder::session::{Pager, SearchController};
use book_finder::sources::BookSource;
use book_finder::tui::App;
use book_finder::ui::{self, Spinner, Status};
use book_finder::utils::CoverSize;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Book Finder - Search the Open Library catalogue from the terminal
#[derive(Parser, Debug)]
#[command(name = "book-finder")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search Open Library by title, author or ISBN", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Request timeout in seconds (overrides the configuration file)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Write logs to this file (the interactive UI logs nowhere otherwise)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Show all environment variables
    #[arg(long, global = true)]
    env: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// Book cards
    Cards,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

/// Catalogue field to match against
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Title,
    Author,
    Isbn,
}

impl From<Field> for SearchField {
    fn from(field: Field) -> Self {
        match field {
            Field::Title => SearchField::Title,
            Field::Author => SearchField::Author,
            Field::Isbn => SearchField::Isbn,
        }
    }
}

/// Cover image size
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Size {
    #[value(name = "S", alias = "s")]
    Small,
    #[value(name = "M", alias = "m")]
    Medium,
    #[value(name = "L", alias = "l")]
    Large,
}

impl From<Size> for CoverSize {
    fn from(size: Size) -> Self {
        match size {
            Size::Small => CoverSize::Small,
            Size::Medium => CoverSize::Medium,
            Size::Large => CoverSize::Large,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch one page of results and print it
    #[command(alias = "s")]
    Search {
        /// Search text
        text: String,

        /// Field to search (default: from config, usually title)
        #[arg(long, short, value_enum)]
        field: Option<Field>,

        /// Page number (20 results per page)
        #[arg(long, short, default_value_t = 1)]
        page: u32,
    },

    /// Print the cover image URL for a cover identifier
    Cover {
        /// Numeric cover identifier (`cover_i`)
        id: u64,

        /// Image size
        #[arg(long, short, value_enum, default_value_t = Size::Medium)]
        size: Size,
    },

    /// Interactive search (default when no command is given)
    #[command(alias = "i")]
    Tui {
        /// Initial search text
        text: Option<String>,

        /// Initial field
        #[arg(long, short, value_enum)]
        field: Option<Field>,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Write the default configuration to a file
    Init {
        /// Destination (default: user config directory)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

/// Print all available environment variables
fn print_env_vars() {
    println!("Book Finder - Environment Variables");
    println!();
    println!("API:");
    println!("  BOOK_FINDER__API__SEARCH_BASE     Host serving search.json (default: https://openlibrary.org)");
    println!("  BOOK_FINDER__API__COVERS_BASE     Host serving cover images (default: https://covers.openlibrary.org)");
    println!("  BOOK_FINDER__API__SITE_BASE       Host for book pages (default: https://openlibrary.org)");
    println!("  BOOK_FINDER__API__USER_AGENT      Custom User-Agent header");
    println!("  BOOK_FINDER__API__TIMEOUT_SECS    Request timeout in seconds (default: 30)");
    println!();
    println!("Search:");
    println!("  BOOK_FINDER__SEARCH__DEBOUNCE_MS    Delay before a typed query is sent (default: 300)");
    println!("  BOOK_FINDER__SEARCH__DEFAULT_FIELD  title, author or isbn (default: title)");
    println!();
    println!("Logging:");
    println!("  BOOK_FINDER__LOGGING__LEVEL       Default log level (default: info)");
    println!("  BOOK_FINDER__LOGGING__FILE        Log file path");
    println!("  RUST_LOG                          Rust logging filter (e.g., debug, book_finder=trace)");
    println!();
    println!("Example:");
    println!("  export BOOK_FINDER__SEARCH__DEFAULT_FIELD=\"author\"");
    std::process::exit(0);
}

fn load_settings(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        load_config(config_path)
            .with_context(|| format!("failed to load {}", config_path.display()))?
    } else if let Some(config_path) = find_config_file() {
        load_config(&config_path)
            .with_context(|| format!("failed to load {}", config_path.display()))?
    } else {
        get_config()?
    };

    if let Some(timeout) = cli.timeout {
        config.api.timeout_secs = timeout;
    }
    if let Some(log_file) = &cli.log_file {
        config.logging.file = Some(log_file.clone());
    }
    Ok(config)
}

fn init_logging(cli: &Cli, config: &Config, interactive: bool) -> Result<()> {
    let log_level = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let level = if cli.quiet { "error" } else { log_level };

    let env_filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("book_finder={}", level)),
    );

    match &config.logging.file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        // Anything written to the terminal would tear the interface
        None if interactive => {}
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Show environment variables and exit if requested
    if cli.env {
        print_env_vars();
    }

    let config = load_settings(&cli)?;
    let interactive = matches!(cli.command, None | Some(Commands::Tui { .. }));
    init_logging(&cli, &config, interactive)?;

    if let Some(path) = &cli.config {
        tracing::info!("Using config file: {}", path.display());
    }

    match cli.command {
        Some(Commands::Search { text, field, page }) => {
            let field = field.map(SearchField::from).unwrap_or(config.search.default_field);
            let query = SearchQuery::new(text).field(field).page(page);
            run_search(&config, &query, cli.output, cli.quiet).await?;
        }

        Some(Commands::Cover { id, size }) => {
            println!("{}", config.links().cover(id, size.into()));
        }

        Some(Commands::Config { command }) => match command {
            ConfigCommands::Init { path, force } => {
                let path = path
                    .or_else(default_config_path)
                    .context("no configuration directory on this platform; pass --path")?;
                Config::init_file(&path, force)?;
                if !cli.quiet {
                    ui::print_status(
                        Status::Success,
                        &format!("Wrote default configuration to {}", path.display()),
                    );
                }
            }
            ConfigCommands::Show => {
                print!("{}", toml::to_string_pretty(&config)?);
            }
        },

        Some(Commands::Tui { text, field }) => {
            let field = field.map(SearchField::from);
            run_tui(&config, text, field)?;
        }

        None => run_tui(&config, None, None)?,
    }

    Ok(())
}

fn run_tui(config: &Config, text: Option<String>, field: Option<SearchField>) -> Result<()> {
    let source: Arc<dyn BookSource> = Arc::new(config.source()?);
    let field = field.unwrap_or(config.search.default_field);
    let debounce = config.debounce();
    let links = config.links();

    // The UI loop blocks on terminal input; searches keep running on the other workers
    tokio::task::block_in_place(move || {
        let mut controller = SearchController::new(source, field, debounce);
        if let Some(text) = text {
            controller.set_text(text);
        }
        book_finder::tui::run(App::new(controller, links))
    })?;
    Ok(())
}

async fn run_search(
    config: &Config,
    query: &SearchQuery,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    if query.is_empty() {
        if !quiet {
            ui::print_status(Status::Warning, "Nothing to search for");
        }
        return Ok(());
    }

    let source = config.source()?;
    let spinner = if quiet || !std::io::stderr().is_terminal() {
        Spinner::hidden()
    } else {
        Spinner::new(&format!(
            "Searching {} for {} \"{}\"",
            source.name(),
            query.field,
            query.text
        ))
    };

    let started = Instant::now();
    let result = match source.search(query).await {
        Ok(result) => {
            spinner.finish_and_clear();
            result
        }
        Err(e) => {
            spinner.finish_with_error(&format!("Search failed: {}", e));
            return Err(e.into());
        }
    };

    output_results(config, query, &result, format, started.elapsed());
    Ok(())
}

fn output_results(
    config: &Config,
    query: &SearchQuery,
    result: &SearchResult,
    format: OutputFormat,
    elapsed: std::time::Duration,
) {
    let actual_format = if format == OutputFormat::Auto {
        if ui::is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        format
    };

    let links = config.links();
    let pager = Pager::new(query.page, result.total_found);

    match actual_format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "query": query,
                "page": pager.page,
                "total_pages": pager.total_pages,
                "total_found": result.total_found,
                "docs": result.documents,
            });
            println!("{}", value);
        }
        OutputFormat::Plain => {
            for doc in &result.documents {
                println!("{} - {} ({})", doc.title, doc.authors_display(), ui::year_label(doc));
                println!("  Link:  {}", doc.work_url(&links));
                println!("  Cover: {}", ui::cover_label(doc, &links, CoverSize::Medium));
                println!();
            }
            println!("{}", ui::pager_line(&pager));
        }
        OutputFormat::Cards => {
            ui::print_search_header(query, result, elapsed);
            for doc in &result.documents {
                ui::print_book_box(doc, &links);
            }
            ui::print_divider();
            println!("{}", ui::pager_line(&pager));
        }
        OutputFormat::Table => {
            use comfy_table::{Attribute, Cell, Table};
            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.set_header(vec!["Title", "Authors", "Year", "Editions", "Cover"]);

            let title_width = (ui::terminal_width() / 3).max(20);
            for doc in &result.documents {
                let editions = doc
                    .edition_count
                    .map(|n| ui::format_number(n as usize))
                    .unwrap_or_default();
                let cover = doc
                    .cover_id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| ui::COVER_PLACEHOLDER.to_string());

                table.add_row(vec![
                    Cell::new(ui::truncate_with_ellipsis(&doc.title, title_width))
                        .add_attribute(Attribute::Bold),
                    Cell::new(ui::truncate_with_ellipsis(&doc.authors_display(), 30)),
                    Cell::new(ui::year_label(doc)),
                    Cell::new(editions),
                    Cell::new(cover),
                ]);
            }
            println!("{table}");
            println!(
                "{} · {} found",
                ui::pager_line(&pager),
                ui::format_number(result.total_found as usize)
            );
        }
        OutputFormat::Auto => unreachable!(),
    }
}
