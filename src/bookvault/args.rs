use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bookvault")]
#[command(about = "Personal book catalogue for the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Override the data directory
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a book to the vault
    #[command(alias = "a")]
    Add {
        title: String,
        author: String,

        /// Page count (up to 2 decimals allowed)
        #[arg(short, long)]
        pages: String,

        /// Category label, e.g. "Sci-Fi" or "Young Adult"
        #[arg(short, long)]
        tag: String,

        /// Date added (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// ISBN-10 or ISBN-13
        #[arg(long, default_value = "")]
        isbn: String,

        #[arg(short, long, default_value = "")]
        notes: String,
    },

    /// List books
    #[command(alias = "ls")]
    List {
        /// Regex search over title, author, tag, and notes
        #[arg(short, long)]
        search: Option<String>,

        /// Match the search pattern case-sensitively
        #[arg(long)]
        case_sensitive: bool,

        /// Show only books with this exact tag
        #[arg(short, long)]
        tag: Option<String>,

        /// date-desc, date-asc, title-asc, title-desc, pages-desc, pages-asc
        #[arg(long)]
        sort: Option<String>,
    },

    /// Edit fields of a book
    #[command(alias = "e")]
    Edit {
        /// Id of the book (as shown by list)
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        author: Option<String>,

        #[arg(long)]
        pages: Option<String>,

        #[arg(long)]
        tag: Option<String>,

        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        isbn: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a book
    #[command(alias = "rm")]
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List every tag in use
    Tags,

    /// Show the reading dashboard
    Stats,

    /// Get or set configuration (page-cap, unit, theme)
    Settings {
        key: Option<String>,

        /// Value to set (if omitted, prints the current value)
        value: Option<String>,
    },

    /// Export the vault as JSON or CSV
    Export {
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import a JSON file, replacing the entire vault
    Import {
        file: PathBuf,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete all books and settings
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ExportFormat {
    Json,
    Csv,
}
