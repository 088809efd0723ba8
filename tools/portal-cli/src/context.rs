//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use portal_cache::FileStore;
use portal_commerce::cart::{CartStore, ScopeKey};

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the config came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Cart scope for this invocation.
    pub scope: ScopeKey,
}

impl Context {
    /// Load context from a config file and the `--customer` flag.
    pub fn load(config_path: Option<&str>, customer: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = PathBuf::from(path);
            (CliConfig::load(&path)?, Some(path))
        } else {
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        let scope = ScopeKey::for_session(customer.or(config.session.customer.as_deref()));
        tracing::debug!(%scope, config = ?config_path, "context loaded");

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            scope,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match CliConfig::load(&config_path) {
                        Ok(config) => return Some((config, config_path)),
                        Err(e) => tracing::warn!(path = %config_path.display(), error = %e, "skipping config"),
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Open the cart store configured for this invocation.
    pub fn cart_store(&self) -> Result<CartStore<FileStore>> {
        let dir = self.resolve_path(&self.config.store.dir);
        let store = FileStore::open(&dir)
            .with_context(|| format!("Failed to open cart store at {}", dir.display()))?;
        Ok(CartStore::new(store))
    }
}
