//! `doclite.toml` settings
//!
//! Precedence, lowest first: the config file, `DOCLITE_DATABASE`, `--database`.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the configured database path
pub const DATABASE_ENV: &str = "DOCLITE_DATABASE";

/// Database name that selects an in-memory store
pub const IN_MEMORY: &str = ":memory:";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct DocliteConfig {
    /// Database file; `:memory:` or unset for an in-memory store
    pub database: Option<String>,
    /// How long SQLite waits on a locked database before failing
    pub busy_timeout_ms: Option<u64>,
}

impl DocliteConfig {
    pub fn with_database(path: &Path) -> Self {
        Self {
            database: Some(path.to_string_lossy().to_string()),
            busy_timeout_ms: None,
        }
    }

    /// Database file on disk, `None` for an in-memory store
    pub fn database_file(&self) -> Option<&Path> {
        self.database
            .as_deref()
            .filter(|db| *db != IN_MEMORY)
            .map(Path::new)
    }

    /// Layer the environment and command-line database over the file's
    pub fn overridden(mut self, env: Option<String>, cli: Option<&Path>) -> Self {
        if let Some(db) = env.filter(|db| !db.is_empty()) {
            self.database = Some(db);
        }
        if let Some(path) = cli {
            self.database = Some(path.to_string_lossy().to_string());
        }
        self
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("doclite.toml")
}

pub fn default_database_path_in(base: &Path) -> PathBuf {
    base.join(".doclite").join("doclite.db")
}

/// Read a config file. A missing file is not an error.
pub fn load_config(path: &Path) -> anyhow::Result<Option<DocliteConfig>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config = toml::from_str(&contents)
        .with_context(|| format!("invalid doclite config in {}", path.display()))?;
    Ok(Some(config))
}

/// Effective settings for a run: file, then `DOCLITE_DATABASE`, then `cli`.
/// Creates the database directory when the store is file-backed.
pub fn settings(config_path: &Path, cli: Option<&Path>) -> anyhow::Result<DocliteConfig> {
    let settings = load_config(config_path)?
        .unwrap_or_default()
        .overridden(std::env::var(DATABASE_ENV).ok(), cli);
    if let Some(file) = settings.database_file() {
        ensure_db_dir(file)?;
    }
    Ok(settings)
}

pub fn write_config(path: &Path, config: &DocliteConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (pass --force to replace it)", path.display());
    }
    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

/// Create the parent directory of a database file if it is missing
pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    match db_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display())),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join("nope.toml")).unwrap().is_none());
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doclite.toml");
        let config = DocliteConfig {
            database: Some("data/app.db".to_string()),
            busy_timeout_ms: Some(500),
        };

        write_config(&path, &config, false).unwrap();
        assert_eq!(load_config(&path).unwrap(), Some(config.clone()));

        assert!(write_config(&path, &config, false).is_err());
        write_config(&path, &DocliteConfig::default(), true).unwrap();
        assert_eq!(load_config(&path).unwrap(), Some(DocliteConfig::default()));
    }

    #[test]
    fn test_malformed_config_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doclite.toml");
        std::fs::write(&path, "busy_timeout_ms = \"soon\"").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(format!("{}", err).contains("doclite.toml"));
    }

    #[test]
    fn test_overrides() {
        let file = DocliteConfig {
            database: Some("file.db".to_string()),
            busy_timeout_ms: Some(100),
        };

        let from_env = file.clone().overridden(Some("env.db".to_string()), None);
        assert_eq!(from_env.database.as_deref(), Some("env.db"));
        assert_eq!(from_env.busy_timeout_ms, Some(100));

        let from_cli = file.clone().overridden(Some("env.db".to_string()), Some(Path::new("cli.db")));
        assert_eq!(from_cli.database.as_deref(), Some("cli.db"));

        assert_eq!(file.clone().overridden(Some(String::new()), None), file);
    }

    #[test]
    fn test_in_memory_has_no_file() {
        assert!(DocliteConfig::default().database_file().is_none());
        let memory = DocliteConfig { database: Some(IN_MEMORY.to_string()), busy_timeout_ms: None };
        assert!(memory.database_file().is_none());
        assert_eq!(
            DocliteConfig::with_database(Path::new("a/b.db")).database_file(),
            Some(Path::new("a/b.db"))
        );
    }

    #[test]
    fn test_ensure_db_dir() {
        let dir = tempfile::tempdir().unwrap();
        let db = default_database_path_in(dir.path());
        ensure_db_dir(&db).unwrap();
        assert!(db.parent().unwrap().is_dir());
        ensure_db_dir(Path::new("bare.db")).unwrap();
    }
}
