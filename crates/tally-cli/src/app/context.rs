//! Application context for the Tally CLI.
//!
//! Bundles the parsed CLI arguments with the config file so handlers can
//! open the ledger and resolve the acting user without threading several
//! parameters around.

use std::path::PathBuf;

use tally_core::{Ledger, User};
use tracing::debug;

use crate::cli::Cli;
use crate::config::{read_config, write_config, TallyConfig};
use crate::errors::CliError;
use crate::ui::UiContext;

use super::resolver::{
    missing_config_message, missing_ledger_message, resolve_config_path, resolve_ledger_path,
    resolve_username, INIT_HINT, USER_HINT,
};

pub struct AppContext<'a> {
    cli: &'a Cli,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self { cli }
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Build the UI context for a command.
    pub fn ui_context(&self, json: bool, format: Option<&str>) -> UiContext {
        UiContext::from_env(json, format, self.cli.no_color, self.cli.ascii)
    }

    pub fn config_path(&self) -> anyhow::Result<PathBuf> {
        resolve_config_path()
    }

    /// Read the config file if it exists.
    pub fn config(&self) -> anyhow::Result<Option<TallyConfig>> {
        let path = self.config_path()?;
        if !path.exists() {
            return Ok(None);
        }
        read_config(&path).map(Some)
    }

    /// Ledger path from the flags or config, if either names one.
    pub fn configured_ledger_path(&self) -> anyhow::Result<Option<PathBuf>> {
        let config = self.config()?;
        Ok(resolve_ledger_path(self.cli, config.as_ref()))
    }

    /// Path of the ledger the command should act on.
    pub fn ledger_path(&self) -> anyhow::Result<PathBuf> {
        match self.configured_ledger_path()? {
            Some(path) => Ok(path),
            None => {
                let config_path = self.config_path()?;
                Err(CliError::not_found(missing_config_message(&config_path), INIT_HINT).into())
            }
        }
    }

    /// Open an existing ledger, migrating it if needed.
    ///
    /// Only `init` may create a new file; every other command reports a
    /// missing ledger instead of silently starting an empty one.
    pub fn open_ledger(&self) -> anyhow::Result<Ledger> {
        let path = self.ledger_path()?;
        if !path.exists() {
            return Err(CliError::not_found(missing_ledger_message(&path), INIT_HINT).into());
        }
        debug!(path = %path.display(), "opening ledger");
        Ok(Ledger::open(&path)?)
    }

    /// The user commands act as.
    pub fn current_user(&self, ledger: &Ledger) -> anyhow::Result<User> {
        let config = self.config()?;
        let username = resolve_username(self.cli, config.as_ref())
            .ok_or_else(|| CliError::not_found("No user selected", USER_HINT))?;
        ledger.find_user_by_username(&username)?.ok_or_else(|| {
            CliError::not_found(format!("User \"{}\" not found", username), USER_HINT).into()
        })
    }

    /// Record `username` as the default user, creating the config if needed.
    pub fn remember_user(&self, ledger_path: PathBuf, username: &str) -> anyhow::Result<PathBuf> {
        let config_path = self.config_path()?;
        let mut config = self
            .config()?
            .unwrap_or_else(|| TallyConfig::new(&ledger_path, None));
        config.user.default = Some(username.to_string());
        write_config(&config_path, &config)?;
        Ok(config_path)
    }
}
