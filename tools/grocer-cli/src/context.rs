//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use grocer_commerce::storefront::Storefront;
use grocer_data::{FetchClient, RestCartStore, RestCatalog};

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;
use crate::session::{StoredSession, SESSION_FILE};

/// Storefront wired to the configured backend.
pub type Shop = Storefront<RestCatalog, RestCartStore>;

/// Execution context for CLI commands.
pub struct Context {
    pub config: CliConfig,
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Config file in use, if one was found.
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Load context from `--config`, or the nearest config file above the
    /// working directory, or defaults.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = resolve(&cwd, path);
                (CliConfig::load(&path)?, Some(path))
            }
            None => match find_config(&cwd) {
                Some((path, config)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        Ok(Self {
            config,
            output,
            cwd,
            config_path,
        })
    }

    /// Build a storefront against the configured backend.
    pub fn shop(&self) -> Shop {
        let client = FetchClient::new(&self.config.store.base_url)
            .with_timeout(self.config.timeout());
        Storefront::new(RestCatalog::new(client.clone()), RestCartStore::new(client))
    }

    /// Session file path: beside the config file, else in the working
    /// directory.
    pub fn session_path(&self) -> PathBuf {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(self.cwd.as_path())
            .join(SESSION_FILE)
    }

    pub fn load_session(&self) -> Result<StoredSession> {
        StoredSession::load(&self.session_path())
    }
}

fn resolve(cwd: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

/// Find a config file in the directory tree, starting at `start`.
fn find_config(start: &Path) -> Option<(PathBuf, CliConfig)> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_FILE_NAMES {
            let candidate = current.join(name);
            if candidate.exists() {
                if let Ok(config) = CliConfig::load(&candidate) {
                    return Some((candidate, config));
                }
            }
        }

        if !current.pop() {
            return None;
        }
    }
}
