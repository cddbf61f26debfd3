//! `.env` file reader.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// `.env` in `dir`, or in the current directory when `dir` is `None`. `None` if absent.
pub fn dotenv_file(dir: Option<&Path>) -> Option<PathBuf> {
    let dir = match dir {
        Some(d) => d.to_path_buf(),
        None => std::env::current_dir().ok()?,
    };
    let path = dir.join(".env");
    path.is_file().then_some(path)
}

/// Parses `.env` text into a map; later lines win.
///
/// Accepted lines: `KEY=value`, `export KEY=value`. Blank lines and `#` comment lines are
/// skipped, as are lines without `=` or with an empty key.
///
/// Values: `"..."` unquoted with `\"`, `\n` and `\\` escapes; `'...'` taken literally;
/// unquoted values are trimmed and lose a trailing ` # comment`.
pub fn parse(content: &str) -> BTreeMap<String, String> {
    content
        .lines()
        .filter_map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, raw) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), parse_value(raw.trim())))
}

fn parse_value(raw: &str) -> String {
    if let Some(inner) = raw.strip_prefix('"').and_then(|r| r.rfind('"').map(|end| &r[..end])) {
        return unescape_double_quoted(inner);
    }
    if let Some(inner) = raw.strip_prefix('\'').and_then(|r| r.rfind('\'').map(|end| &r[..end])) {
        return inner.to_string();
    }
    match raw.find(" #") {
        Some(pos) => raw[..pos].trim_end().to_string(),
        None => raw.to_string(),
    }
}

fn unescape_double_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Reads and parses the `.env` in `dir` (or the current directory). Missing file → empty map.
pub fn read(dir: Option<&Path>) -> std::io::Result<BTreeMap<String, String>> {
    match dotenv_file(dir) {
        Some(path) => Ok(parse(&std::fs::read_to_string(path)?)),
        None => Ok(BTreeMap::new()),
    }
}
