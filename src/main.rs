//! Doclite CLI - inspect and exercise a document store

use clap::{Parser, Subcommand};
use doclite::config::{self, DocliteConfig};
use doclite::{DocumentStore, SqliteConnector, Connector, or, and, ui};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "doclite")]
#[command(version)]
#[command(about = "Typed document persistence over SQLite")]
#[command(long_about = r#"
Doclite stores records as JSON documents, one table per record type, with
declared fields copied into filterable columns.

Example usage:
  doclite init --database app.db
  doclite demo --count 20
  doclite tables
  doclite dump --table User
"#)]
struct Cli {
    /// Enable verbose logging (prints every SQL statement)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the database file (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default doclite.toml
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Insert generated users and run the example filters
    Demo {
        /// Number of users to insert
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,
    },

    /// List the tables in the database
    Tables,

    /// Print the stored documents of a table
    Dump {
        /// Table (record type) name
        #[arg(short, long)]
        table: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct User {
    id: i64,
    name: String,
    lang: String,
    city: City,
    age: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct City {
    name: String,
    location: Vec<f32>,
}

doclite::meta! {
    /// Filterable fields of [`User`]
    struct UserMeta: User {
        age: i64,
        lang: String,
        name: String,
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);

    match cli.command {
        Commands::Init { force } => {
            let db_path = cli
                .database
                .clone()
                .unwrap_or_else(|| config::default_database_path_in(Path::new(".")));
            config::write_config(&config_path, &DocliteConfig::with_database(&db_path), force)?;
            ui::success(&format!("Wrote {}", config_path.display()));
            ui::info("database", &db_path.display().to_string());
        }

        Commands::Demo { count } => {
            let settings = load_settings(&config_path, cli.database.as_deref())?;
            run_demo(&settings, count)?;
        }

        Commands::Tables => {
            let settings = load_settings(&config_path, cli.database.as_deref())?;
            let connector = SqliteConnector::from_config(&settings)?;
            let tables = connector.tables()?;
            ui::section(&format!("{} tables", tables.len()));
            for table in tables {
                ui::item(&table);
            }
        }

        Commands::Dump { table } => {
            let settings = load_settings(&config_path, cli.database.as_deref())?;
            let connector = SqliteConnector::from_config(&settings)?;
            if !connector.tables()?.contains(&table) {
                ui::error(&format!("No table named {}", table));
                anyhow::bail!("unknown table {}", table);
            }
            // table was matched against sqlite_master above
            let documents =
                connector.select_column(&format!("SELECT json FROM [{}]", table), "json", &[])?;
            ui::section(&format!("{} ({} documents)", table, documents.len()));
            for document in documents {
                ui::item(&document);
            }
        }
    }

    Ok(())
}

/// Effective settings, logging where the store lives
fn load_settings(config_path: &Path, database: Option<&Path>) -> anyhow::Result<DocliteConfig> {
    let settings = config::settings(config_path, database)?;
    match settings.database_file() {
        Some(file) => tracing::info!("Opening {}", file.display()),
        None => tracing::info!("Opening an in-memory store"),
    }
    Ok(settings)
}

fn run_demo(settings: &DocliteConfig, count: usize) -> anyhow::Result<()> {
    let store = DocumentStore::from_config(settings)?;
    let users: Vec<User> = (0..count).map(demo_user).collect();
    store.insert_all::<UserMeta>(&users)?;
    ui::success(&format!("Inserted {} users", users.len()));

    let matched = store.query::<UserMeta>(|u| {
        or([
            u.name.eq("alice"),
            and([u.age.gt(50), u.lang.eq("ru")]),
        ])
    })?;
    ui::section("name = 'alice' OR (age > 50 AND lang = 'ru')");
    for user in &matched {
        ui::item(&format!("{:?}", user));
    }

    let older = store.query::<UserMeta>(|u| u.age.gt(50))?;
    ui::section("age > 50");
    for user in &older {
        ui::item(&format!("{:?}", user));
    }

    let total = store.query_all::<UserMeta>()?.len();
    ui::info("stored users", &total.to_string());
    Ok(())
}

/// Deterministic spread of ids, ages and languages
fn demo_user(i: usize) -> User {
    let n = i as i64;
    let langs = ["ru", "en", "lv", "de"];
    User {
        id: (n * 7919) % 10_000,
        name: if i == 0 { "alice".to_string() } else { format!("name #{}", (n * 104_729) % 10_000) },
        lang: langs[i % langs.len()].to_string(),
        city: City {
            name: format!("city #{}", (n * 31) % 100),
            location: Vec::new(),
        },
        age: (n * 37) % 150,
    }
}
