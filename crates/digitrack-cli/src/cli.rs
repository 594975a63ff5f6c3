use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "digitrack")]
#[command(about = "Catalog and digitization tracker for a library archive")]
#[command(version)]
pub struct Cli {
    /// Config file path (defaults to ~/.digitrack/digitrack.json when present)
    #[arg(short, long, global = true, env = "DIGITRACK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Catalog database file (overrides the config file)
    #[arg(short, long, global = true, env = "DIGITRACK_DATABASE")]
    pub database: Option<PathBuf>,

    /// Name recorded as creator/last editor of changed records
    #[arg(short, long, global = true, env = "DIGITRACK_USER")]
    pub user: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show how a file name is split into book, author, year and stage
    Parse {
        /// File name, with or without extension
        name: String,
    },

    /// Split a file name into English and Sindhi title/author fields
    Translate {
        name: String,
    },

    /// Add one record to the catalog
    Add {
        /// File name of the work
        name: String,
        /// Book name (overrides the parsed value)
        #[arg(long)]
        book: Option<String>,
        /// Author name (overrides the parsed value)
        #[arg(long)]
        author: Option<String>,
        /// Publication year (overrides the parsed value)
        #[arg(long)]
        year: Option<String>,
        /// Initial stage (overrides the parsed/default value)
        #[arg(long)]
        stage: Option<String>,
    },

    /// Bulk-import catalog rows from a .csv, .xlsx, .xls or .ods file
    Import {
        file: PathBuf,
    },

    /// List catalog records
    List {
        /// Case-insensitive search over file, book and author names
        #[arg(short, long)]
        search: Option<String>,
        /// Only records at this stage
        #[arg(long)]
        stage: Option<String>,
        /// Only records assigned to this person
        #[arg(long)]
        assignee: Option<String>,
        /// Maximum number of records to show
        #[arg(short, long)]
        limit: Option<usize>,
        /// Number of records to skip
        #[arg(long)]
        offset: Option<usize>,
    },

    /// Move a record to the given stage
    Stage {
        file: String,
        stage: String,
    },

    /// Move a record to the next pipeline stage
    Advance {
        file: String,
    },

    /// Set the people and deadline for a record
    Assign {
        file: String,
        #[arg(long)]
        assignee: Option<String>,
        #[arg(long)]
        scanned_by: Option<String>,
        #[arg(long)]
        digitized_by: Option<String>,
        /// Deadline as YYYY-MM-DD
        #[arg(long)]
        deadline: Option<NaiveDate>,
    },
}
