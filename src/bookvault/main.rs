use bookvault::commands::{self, CmdResult};
use bookvault::error::{Result, VaultError};
use bookvault::store::fs::FileStore;
use bookvault::validate::RawFields;
use bookvault::vault::Vault;
use chrono::Utc;
use clap::Parser;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod args;
mod print;
use args::{Cli, Commands, ExportFormat};
use print::{print_messages, print_records, print_settings, print_stats, print_tags};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = resolve_data_dir(&cli);
    let mut vault = Vault::open(FileStore::new(data_dir));

    match cli.command {
        Some(Commands::Add {
            title,
            author,
            pages,
            tag,
            date,
            isbn,
            notes,
        }) => handle_add(&mut vault, title, author, pages, tag, date, isbn, notes),
        Some(Commands::List {
            search,
            case_sensitive,
            tag,
            sort,
        }) => handle_list(&mut vault, search, case_sensitive, tag, sort),
        Some(Commands::Edit {
            id,
            title,
            author,
            pages,
            tag,
            date,
            isbn,
            notes,
        }) => {
            let fields = commands::update::EditFields {
                title,
                author,
                pages,
                date_added: date,
                tag,
                isbn,
                notes,
            };
            finish(commands::update::run(&mut vault, &id, fields)?)
        }
        Some(Commands::Delete { id, yes }) => finish(commands::delete::run(&mut vault, &id, yes)?),
        Some(Commands::Tags) => {
            let result = commands::tags::run(&vault)?;
            print_tags(&result.tags);
            finish(result)
        }
        Some(Commands::Stats) => {
            let result = commands::stats::run(&vault)?;
            if let (Some(report), Some(settings)) = (&result.stats, &result.settings) {
                print_stats(report, settings);
            }
            Ok(())
        }
        Some(Commands::Settings { key, value }) => {
            let result = commands::settings::run(&mut vault, key, value)?;
            if let Some(settings) = &result.settings {
                print_settings(settings);
            }
            finish(result)
        }
        Some(Commands::Export { format, output }) => handle_export(&vault, format, output),
        Some(Commands::Import { file, yes }) => finish(commands::import::run(&mut vault, &file, yes)?),
        Some(Commands::Clear { yes }) => finish(commands::clear::run(&mut vault, yes)?),
        None => handle_list(&mut vault, None, false, None, None),
    }
}

// --data-dir wins, then the env override (used by tests), then the
// platform data directory.
fn resolve_data_dir(cli: &Cli) -> PathBuf {
    if let Some(dir) = &cli.data_dir {
        return dir.clone();
    }
    if let Ok(home) = std::env::var("BOOKVAULT_HOME") {
        return PathBuf::from(home);
    }
    let proj_dirs = ProjectDirs::from("com", "bookvault", "bookvault")
        .expect("Could not determine data dir");
    proj_dirs.data_dir().to_path_buf()
}

#[allow(clippy::too_many_arguments)]
fn handle_add(
    vault: &mut Vault<FileStore>,
    title: String,
    author: String,
    pages: String,
    tag: String,
    date: Option<String>,
    isbn: String,
    notes: String,
) -> Result<()> {
    let fields = RawFields {
        title,
        author,
        pages,
        date_added: date.unwrap_or_else(|| Utc::now().date_naive().to_string()),
        tag,
        isbn,
        notes,
    };
    finish(commands::add::run(vault, fields)?)
}

fn handle_list(
    vault: &mut Vault<FileStore>,
    search: Option<String>,
    case_sensitive: bool,
    tag: Option<String>,
    sort: Option<String>,
) -> Result<()> {
    let result = commands::list::run(
        vault,
        commands::list::ListQuery {
            pattern: search,
            case_sensitive,
            tag,
            sort,
        },
    )?;
    let settings = vault.settings().clone();
    print_records(&result.records, vault.query_state().pattern.as_ref(), &settings);
    finish(result)
}

fn handle_export(
    vault: &Vault<FileStore>,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let format = match format {
        ExportFormat::Json => commands::export::Format::Json,
        ExportFormat::Csv => commands::export::Format::Csv,
    };
    let result = commands::export::run(vault, format)?;
    if let Some(payload) = &result.payload {
        match &output {
            Some(path) => {
                std::fs::write(path, payload).map_err(VaultError::Io)?;
                print_messages(&result.messages);
            }
            None => println!("{payload}"),
        }
    }
    Ok(())
}

// Print whatever the command had to say; a blocking error means the
// action was prevented, so the process should exit nonzero.
fn finish(result: CmdResult) -> Result<()> {
    print_messages(&result.messages);
    if result.has_errors() {
        return Err(VaultError::Api("Command aborted.".into()));
    }
    Ok(())
}
