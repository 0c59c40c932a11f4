mod calendar;
mod cmd;
mod data;
mod error;
mod ui;

use clap::{Parser, Subcommand};
use data::AppSettings;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "moodbits", about = "a year of moods, notes and tasks")]
struct Cli {
    /// Path to the data directory containing config and data files (default: ./config)
    #[arg(long, default_value = "./config")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize data files with defaults
    Init,
    /// Show a day, optionally updating it first
    Day {
        /// Day key (e.g. 2026-3-7)
        key: String,
        /// One of coreMemory, goodDay, neutral, badDay, nightmare, or none
        #[arg(long)]
        mood: Option<String>,
        /// Replace the work log
        #[arg(long)]
        work: Option<String>,
        /// Replace the journal
        #[arg(long)]
        journal: Option<String>,
        /// Remove everything recorded for the day
        #[arg(long)]
        clear: bool,
    },
    /// List tasks, optionally adding one first
    Tasks {
        /// Text of a task to add
        #[arg(long)]
        add: Option<String>,
    },
    /// Write every record to a dated JSON backup file
    Backup {
        /// The directory to write the backup into
        #[arg(short, long, default_value = ".")]
        output_dir: String,
    },
    /// Replace records with the contents of a backup file
    Restore {
        /// Backup file written by `backup` or exported from the browser widget
        file: PathBuf,
        /// Validate the file and list what would change without writing
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Resolve data_dir to an absolute path so file I/O works regardless of
    // future directory changes within the process.
    let data_dir = if cli.data_dir.is_absolute() {
        cli.data_dir.clone()
    } else {
        std::env::current_dir()?.join(&cli.data_dir)
    };

    // Checked before the log file is created, which would make the dir non-empty.
    let needs_init = dir_needs_init(&data_dir);
    let settings = AppSettings::load_or_default(&data_dir);
    // A dry run must leave the data directory untouched, log file included.
    if !matches!(cli.command, Some(Commands::Restore { dry_run: true, .. })) {
        init_logging(&data_dir, &settings);
    }

    if should_auto_init(cli.command.as_ref(), needs_init) {
        eprintln!(
            "Data directory '{}' is missing or empty, running init...",
            data_dir.display()
        );
        cmd::init::run(&data_dir)?;
    }

    match cli.command {
        None => cmd::root::run(&data_dir, &settings),
        Some(Commands::Init) => cmd::init::run(&data_dir),
        Some(Commands::Day {
            key,
            mood,
            work,
            journal,
            clear,
        }) => {
            let mood = mood.as_deref().map(cmd::day::parse_mood_arg).transpose()?;
            cmd::day::run(
                &data_dir,
                &settings,
                &key,
                cmd::day::DayEdit {
                    mood,
                    work,
                    journal,
                    clear,
                },
            )
        }
        Some(Commands::Tasks { add }) => cmd::tasks::run(&data_dir, add.as_deref()),
        Some(Commands::Backup { output_dir }) => cmd::backup::run(&data_dir, &output_dir),
        Some(Commands::Restore { file, dry_run }) => cmd::restore::run(&data_dir, &file, dry_run),
    }
}

/// Auto-init when the data directory is missing or empty, unless the command
/// is `init` itself or a restore that brings its own records.
fn should_auto_init(command: Option<&Commands>, needs_init: bool) -> bool {
    needs_init && !matches!(command, Some(Commands::Init | Commands::Restore { .. }))
}

/// Returns true when `dir` does not exist or exists but contains no files.
fn dir_needs_init(dir: &Path) -> bool {
    if !dir.exists() {
        return true;
    }
    dir.read_dir()
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}

/// Logs go to a file in the data directory; the terminal belongs to the
/// dashboard. If the file cannot be opened, logging is discarded.
fn init_logging(data_dir: &Path, settings: &AppSettings) {
    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let file = std::fs::create_dir_all(data_dir).and_then(|_| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(data_dir.join(&settings.log_file))
    });
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false);
    let _ = match file {
        Ok(file) => builder.with_writer(Mutex::new(file)).try_init(),
        Err(_) => builder.with_writer(std::io::sink).try_init(),
    };
}
