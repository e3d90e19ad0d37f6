//! resizetable - Terminal table with drag-resizable, persisted column widths.
//!
//! Usage:
//!   resizetable                          # view the built-in demo table
//!   resizetable view --columns cols.json # view a table with custom columns
//!   resizetable --table users show       # print saved widths as JSON
//!   resizetable --table users reset      # forget saved widths

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{Level, debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use resizetable::store::{FileStore, WidthStore};
use resizetable::table::{ResizeTable, TableConfig};
use resizetable::tui::{App, AppState, default_columns, load_columns, sample_rows};

/// Default directory for saved widths.
const DEFAULT_STORE_DIR: &str = "./.resizetable";

/// Terminal table with drag-resizable, persisted column widths.
#[derive(Parser)]
#[command(name = "resizetable", about = "Resizable table viewer", version)]
struct Args {
    /// Table identity. Widths are saved under `table_size::<ID>`.
    #[arg(long, global = true, default_value = "demo", value_parser = parse_table_id)]
    table: String,

    /// Directory holding saved widths.
    #[arg(long, global = true, env = "RESIZETABLE_STORE_DIR", default_value = DEFAULT_STORE_DIR)]
    store_dir: PathBuf,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Write logs to this file. The viewer discards logs without it.
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show the table and resize columns with the mouse (default).
    View(ViewArgs),
    /// Print saved widths as JSON.
    Show,
    /// Remove saved widths.
    Reset,
}

#[derive(clap::Args)]
struct ViewArgs {
    /// JSON file with the column spec. Built-in demo columns when omitted.
    #[arg(long, value_name = "FILE")]
    columns: Option<PathBuf>,

    /// Number of generated rows.
    #[arg(long, default_value_t = 50)]
    rows: usize,

    /// Narrowest width a resize can commit.
    #[arg(long, default_value_t = 1)]
    min_width: u16,

    /// Redraw interval in milliseconds.
    #[arg(long, default_value_t = 250)]
    tick_ms: u64,
}

impl Default for ViewArgs {
    fn default() -> Self {
        Self {
            columns: None,
            rows: 50,
            min_width: 1,
            tick_ms: 250,
        }
    }
}

/// Rejects empty table identities.
fn parse_table_id(s: &str) -> Result<String, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("table identity must not be empty".to_string());
    }
    Ok(s.to_string())
}

/// Initializes the tracing subscriber.
///
/// The viewer owns the terminal, so it logs to `log_file` or nowhere. The
/// other commands log to stderr.
fn init_logging(
    verbose: u8,
    quiet: bool,
    log_file: Option<&Path>,
    to_stderr: bool,
) -> io::Result<()> {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("resizetable={}", level).parse::<Directive>() {
        filter = filter.add_directive(directive);
    }

    let (writer, ansi) = match log_file {
        Some(path) => {
            let file = File::options().create(true).append(true).open(path)?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None if to_stderr => (BoxMakeWriter::new(io::stderr), true),
        None => (BoxMakeWriter::new(io::sink), false),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(writer)
        .init();
    Ok(())
}

fn open_store(dir: &Path) -> Result<WidthStore, String> {
    let backend = FileStore::open(dir)
        .map_err(|e| format!("cannot open store '{}': {}", dir.display(), e))?;
    debug!(path = %dir.display(), "width store opened");
    Ok(WidthStore::new(backend))
}

fn run_view(args: &Args, view: ViewArgs) -> Result<(), String> {
    let store = open_store(&args.store_dir)?;

    let spec = match &view.columns {
        Some(path) => load_columns(path)
            .map_err(|e| format!("cannot read columns '{}': {}", path.display(), e))?,
        None => default_columns(),
    };
    let rows = sample_rows(&spec, view.rows);

    let table = ResizeTable::with_config(
        Some(&args.table),
        &spec,
        store.clone(),
        TableConfig::new(view.min_width),
    );
    info!(table = %args.table, columns = spec.len(), "starting viewer");

    let app = App::new(AppState::new(table, spec, rows), store, view.columns);
    app.run(Duration::from_millis(view.tick_ms.max(1)))
        .map_err(|e| format!("running TUI: {}", e))
}

fn run_show(args: &Args) -> Result<(), String> {
    let store = open_store(&args.store_dir)?;
    match store.try_load(&args.table) {
        Ok(Some(widths)) => {
            let json = serde_json::to_string_pretty(&widths).map_err(|e| e.to_string())?;
            println!("{}", json);
            Ok(())
        }
        Ok(None) => {
            eprintln!("No saved widths for table '{}'", args.table);
            Ok(())
        }
        Err(e) => Err(format!("reading widths for '{}': {}", args.table, e)),
    }
}

fn run_reset(args: &Args) -> Result<(), String> {
    let store = open_store(&args.store_dir)?;
    store
        .clear(&args.table)
        .map_err(|e| format!("clearing widths for '{}': {}", args.table, e))?;
    info!(table = %args.table, "saved widths removed");
    Ok(())
}

fn main() {
    let mut args = Args::parse();
    let command = args.command.take().unwrap_or(Command::View(ViewArgs::default()));

    let to_stderr = !matches!(command, Command::View(_));
    if let Err(e) = init_logging(args.verbose, args.quiet, args.log_file.as_deref(), to_stderr) {
        eprintln!("Error: cannot open log file: {}", e);
        std::process::exit(1);
    }

    let result = match command {
        Command::View(view) => run_view(&args, view),
        Command::Show => run_show(&args),
        Command::Reset => run_reset(&args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
