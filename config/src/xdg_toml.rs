//! `[env]` table of `<config home>/<app>/config.toml`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::LoadError;

/// Config home: `$XDG_CONFIG_HOME` when set, else the platform config dir.
pub fn config_home() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
}

pub fn config_file(config_home: &Path, app_name: &str) -> PathBuf {
    config_home.join(app_name).join("config.toml")
}

#[derive(serde::Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    env: BTreeMap<String, toml::Value>,
}

/// Reads the `[env]` table for `app_name` under `config_home`. Missing file or section →
/// empty map. Scalar values (numbers, booleans) are converted to their TOML text; tables and
/// arrays are rejected.
pub fn read(config_home: &Path, app_name: &str) -> Result<BTreeMap<String, String>, LoadError> {
    let path = config_file(config_home, app_name);
    if !path.is_file() {
        return Ok(BTreeMap::new());
    }
    let content = std::fs::read_to_string(&path).map_err(LoadError::XdgRead)?;
    let file: ConfigFile = toml::from_str(&content)?;
    file.env
        .into_iter()
        .map(|(key, value)| {
            let text = match value {
                toml::Value::String(s) => s,
                toml::Value::Integer(_) | toml::Value::Float(_) | toml::Value::Boolean(_) => {
                    value.to_string()
                }
                _ => {
                    return Err(LoadError::XdgValue {
                        key,
                        path: path.display().to_string(),
                    })
                }
            };
            Ok((key, text))
        })
        .collect()
}
