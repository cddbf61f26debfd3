//! Load configuration from the XDG `config.toml` `[env]` table and a project `.env`, then
//! apply it to the process environment with priority **existing env > .env > XDG**.
//!
//! ```toml
//! # ~/.config/helpdesk/config.toml
//! [env]
//! OPENAI_MODEL = "gpt-4"
//! HELPDESK_TOOL_CALL_POLICY = "first_only"
//! ```
//!
//! Call [`load_and_apply`] once at process start, before anything reads the environment.

mod dotenv;
mod xdg_toml;

use std::collections::BTreeMap;
use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("[env].{key} in {path} must be a string, number or boolean")]
    XdgValue { key: String, path: String },
    #[error("read .env: {0}")]
    DotenvRead(std::io::Error),
}

/// Where an applied value came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    Dotenv,
    Xdg,
}

/// Key/value pairs read from both config sources, not yet applied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigSources {
    pub dotenv: BTreeMap<String, String>,
    pub xdg: BTreeMap<String, String>,
}

impl ConfigSources {
    /// Reads `<config_home>/<app_name>/config.toml` (skipped when `config_home` is `None`)
    /// and `.env` from `dotenv_dir` (current directory when `None`).
    pub fn read(
        config_home: Option<&Path>,
        app_name: &str,
        dotenv_dir: Option<&Path>,
    ) -> Result<Self, LoadError> {
        let xdg = match config_home {
            Some(home) => xdg_toml::read(home, app_name)?,
            None => BTreeMap::new(),
        };
        let dotenv = dotenv::read(dotenv_dir).map_err(LoadError::DotenvRead)?;
        Ok(Self { dotenv, xdg })
    }

    /// Values to set, in key order: for each key not reported present by `is_set`, the
    /// `.env` value, else the XDG value.
    pub fn resolve<F>(&self, is_set: F) -> Vec<(String, String, Source)>
    where
        F: Fn(&str) -> bool,
    {
        let mut merged: BTreeMap<&str, (&str, Source)> = self
            .xdg
            .iter()
            .map(|(k, v)| (k.as_str(), (v.as_str(), Source::Xdg)))
            .collect();
        for (k, v) in &self.dotenv {
            merged.insert(k.as_str(), (v.as_str(), Source::Dotenv));
        }
        merged
            .into_iter()
            .filter(|(key, _)| !is_set(*key))
            .map(|(key, (value, source))| (key.to_string(), value.to_string(), source))
            .collect()
    }
}

/// Loads both sources for `app_name` and sets every key that is **not** already in the
/// process environment. Returns the applied `(key, source)` pairs.
///
/// * `app_name`: e.g. `"helpdesk"`, giving `~/.config/helpdesk/config.toml`.
/// * `override_dir`: directory holding `.env`; current directory when `None`.
pub fn load_and_apply(
    app_name: &str,
    override_dir: Option<&Path>,
) -> Result<Vec<(String, Source)>, LoadError> {
    let home = xdg_toml::config_home();
    let sources = ConfigSources::read(home.as_deref(), app_name, override_dir)?;
    let applied = sources
        .resolve(|key| std::env::var_os(key).is_some())
        .into_iter()
        .map(|(key, value, source)| {
            std::env::set_var(&key, value);
            (key, source)
        })
        .collect();
    Ok(applied)
}
