//! Command-line interface for confkit
//!
//! Provides CLI commands for querying a configuration file through the
//! same store and parser the library exposes, plus a `check` command for
//! validating files before deploying them.

use crate::logging::{init_logging, LogConfig, LogLevel};
use crate::store::Store;
use crate::Result;
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, warn};

/// confkit command-line interface
#[derive(Parser)]
#[command(name = "confkit")]
#[command(about = "Query and check line-oriented configuration files")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct ConfkitCli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable JSON output for machine-readable results
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print the value of a parameter
    Get {
        /// Parameter name (matched case-insensitively)
        key: String,
    },

    /// Test whether a parameter exists
    Has {
        /// Parameter name (matched case-insensitively)
        key: String,
    },

    /// Append a programmatic override for this invocation
    Set {
        /// Parameter name
        key: String,

        /// Value to assign; omit for a bare key
        value: Option<String>,
    },

    /// List all entries in file order
    List,

    /// Parse the file and report problems without loading it anywhere
    Check,
}

/// Executes CLI commands against a loaded store
pub struct CliExecutor {
    store: Store,
    json: bool,
}

impl CliExecutor {
    pub fn new(store: Store, json: bool) -> Self {
        Self { store, json }
    }

    /// Execute the given command
    pub fn execute(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Get { key } => self.execute_get(&key),
            Commands::Has { key } => self.execute_has(&key),
            Commands::Set { key, value } => self.execute_set(&key, value.as_deref()),
            Commands::List => self.execute_list(),
            Commands::Check => self.execute_check(),
        }
    }

    fn execute_get(&self, key: &str) -> Result<()> {
        match self.store.get(key) {
            Some(Some(value)) => println!("{}", value),
            Some(None) => println!(),
            None => anyhow::bail!("parameter '{}' not found", key),
        }
        Ok(())
    }

    fn execute_has(&self, key: &str) -> Result<()> {
        println!("{}", self.store.has(key));
        Ok(())
    }

    fn execute_set(&mut self, key: &str, value: Option<&str>) -> Result<()> {
        self.store.set(key, value);

        // The store never persists; the append only lives for this
        // invocation, and an earlier entry with the same parameter keeps
        // shadowing it. Report the value lookups actually see.
        match self.store.get(key) {
            Some(Some(effective)) => println!("{} = {}", key, effective),
            Some(None) => println!("{}", key),
            None => unreachable!("just-appended parameter must be present"),
        }
        Ok(())
    }

    fn execute_list(&self) -> Result<()> {
        let entries = self.store.snapshot();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&entries)?);
            return Ok(());
        }

        for entry in &entries {
            match &entry.value {
                Some(value) => println!("{} = {}", entry.parameter, value),
                None => println!("{}", entry.parameter),
            }
        }
        Ok(())
    }

    fn execute_check(&self) -> Result<()> {
        let entries = self.store.snapshot();

        // Duplicate parameters are legal but shadowed; worth flagging.
        let mut seen: HashMap<String, usize> = HashMap::new();
        for entry in &entries {
            *seen.entry(entry.parameter.to_ascii_lowercase()).or_insert(0) += 1;
        }
        let mut duplicates: Vec<_> = seen
            .iter()
            .filter(|(_, &count)| count > 1)
            .map(|(parameter, &count)| (parameter.clone(), count))
            .collect();
        duplicates.sort();

        for (parameter, count) in &duplicates {
            warn!(
                parameter = %parameter,
                occurrences = count,
                "duplicate parameter; only the first occurrence is visible to lookups"
            );
        }

        println!(
            "ok: {} entries, {} shadowed duplicate parameter(s)",
            entries.len(),
            duplicates.len()
        );
        Ok(())
    }
}

/// Resolve the configuration file path: `--config` wins, otherwise the
/// per-user default location.
fn resolve_config_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("confkit").join("confkit.conf")
    })
}

/// CLI entry point: parse arguments, initialize logging, load the store
/// and dispatch the command.
pub fn run_cli() -> Result<()> {
    let cli = ConfkitCli::parse();

    let mut log_config = LogConfig::from_env();
    if cli.verbose {
        log_config.level = LogLevel::Debug;
    }
    init_logging(&log_config).map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    let path = resolve_config_path(cli.config);
    debug!(path = %path.display(), "loading configuration");

    let mut store = Store::new();
    store.reload(&path)?;

    let mut executor = CliExecutor::new(store, cli.json);
    executor.execute(cli.command)
}
