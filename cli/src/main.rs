use std::path::PathBuf;
use std::process::exit;
use std::env;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use anyhow::Result;

use sanatan_backend::db::VersesDbHandle;
use sanatan_backend::db::verses_models::VerseRow;
use sanatan_backend::{PipelinePaths, SEARCH_RESULTS_CAP, get_project_dir};

use sanatan_cli::bootstrap;

#[derive(Parser, Debug)]
#[command(author, version, about = "Sanatan Texts CLI", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Optional path to the project root, containing raw_data/ and app/.
    /// If not provided, the SANATAN_PROJECT_DIR environment variable or the
    /// current directory is used.
    #[arg(long, global = true, value_name = "DIRECTORY_PATH", env = "SANATAN_PROJECT_DIR")]
    project_dir: Option<PathBuf>,

    /// Without a command, runs the bootstrap.
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the merged JSON corpus and the verses database from raw_data/DharmicData
    Bootstrap,

    /// List the verses of a book from the generated database
    #[command(arg_required_else_help = true)]
    Book {
        /// Book name in Devanagari, e.g. ऋग्वेद
        name: String,

        /// Only the verses of this major division, e.g. "मण्डल 1"
        #[arg(long)]
        division: Option<String>,

        /// Print the rows as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// List the book names in the generated database
    Books,

    /// Substring search in the original text of all books
    #[command(arg_required_else_help = true)]
    Search {
        /// The search query string
        query: String,

        /// Maximum number of results
        #[arg(long, default_value_t = SEARCH_RESULTS_CAP)]
        limit: i64,

        /// Print the rows as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn print_rows(rows: &[VerseRow], as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    }

    for row in rows {
        let labels: Vec<&str> = [
            row.major_division.as_deref(),
            row.minor_division.as_deref(),
            row.verse_identifier.as_deref(),
        ].into_iter().flatten().collect();
        let first_line = row.original_text.lines().next().unwrap_or_default();
        println!("{}: {} | {}", row.id, labels.join(" / "), first_line);
    }
    println!("{}", rows.len());

    Ok(())
}

fn open_database(paths: &PipelinePaths) -> Result<VersesDbHandle> {
    VersesDbHandle::open(&paths.database)
}

fn main() {
    if dotenv().is_err() {
        println!("Info: No .env file found or failed to load.");
    }

    let cli = Cli::parse();

    // The logger reads the project dir from the environment
    if let Some(dir) = &cli.project_dir {
        unsafe { env::set_var("SANATAN_PROJECT_DIR", dir); }
    }

    let project_dir = get_project_dir();
    if !project_dir.is_dir() {
        eprintln!("Error: Directory does not exist or is not a directory: {:?}", project_dir);
        exit(1);
    }

    let paths = PipelinePaths::new(&project_dir);

    let command_result = match cli.command {
        None | Some(Commands::Bootstrap) => {
            bootstrap::bootstrap(&paths).map(|_| ())
        }

        Some(Commands::Book { name, division, json }) => {
            open_database(&paths).and_then(|db| {
                let rows = match division {
                    Some(d) => db.get_verses_by_division(&name, &d)?,
                    None => db.get_verses_by_book(&name)?,
                };
                print_rows(&rows, json)
            })
        }

        Some(Commands::Books) => {
            open_database(&paths).and_then(|db| {
                for name in db.get_book_names()? {
                    println!("{}", name);
                }
                Ok(())
            })
        }

        Some(Commands::Search { query, limit, json }) => {
            open_database(&paths).and_then(|db| {
                let rows = db.search_verses_with_limit(&query, limit)?;
                print_rows(&rows, json)
            })
        }
    };

    if let Err(e) = command_result {
        eprintln!("Error executing command: {:?}", e);
        exit(1);
    }
}
