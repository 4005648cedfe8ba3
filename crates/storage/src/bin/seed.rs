//! Seeds the K53 question bank into a SQLite database.
//!
//! Usage: `cargo run -p storage --bin seed -- [--db <sqlite_url>]`

use std::fmt;

use storage::repository::Storage;
use storage::seed::{is_seeded, seed_default_bank};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn parse_db_url(mut args: impl Iterator<Item = String>) -> Result<String, ArgsError> {
    let mut db_url = std::env::var("K53_DB_URL")
        .ok()
        .unwrap_or_else(|| "sqlite://k53.sqlite3".into());

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--db" => {
                db_url = args.next().ok_or(ArgsError::MissingValue { flag: "--db" })?;
            }
            "--help" | "-h" => {
                eprintln!("Usage: seed [--db <sqlite_url>]");
                std::process::exit(0);
            }
            other => return Err(ArgsError::UnknownArg(other.to_string())),
        }
    }
    Ok(db_url)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let db_url = parse_db_url(std::env::args().skip(1))?;

    let storage = Storage::sqlite(&db_url).await?;
    if is_seeded(&storage).await? {
        eprintln!("bank already seeded ({db_url}); nothing to do");
        return Ok(());
    }

    seed_default_bank(&storage).await?;
    let count = storage.questions.count_questions(None).await?;
    eprintln!("seeded {count} questions into {db_url}");
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
