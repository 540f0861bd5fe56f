//! Per-directory `.satmonrc` configuration.
//!
//! The file is INI-style:
//!
//! ```text
//! [all]
//! move = nephews
//! schedule = saturday
//!
//! ; only while "Season 3" is the directory being drained
//! [Season 3]
//! schedule = daily
//! ```
//!
//! Options resolve in layers: built-in defaults, then `[DEFAULT]`, then
//! `[all]`, then the section named after the selected subject directory.

use crate::error::{Result, SatmonError};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Name of the marker file that turns a directory into a scope.
pub const CONF_NAME: &str = ".satmonrc";

/// Section holding the scope-wide options.
pub const DEFAULT_SECTION: &str = "all";

/// Section whose keys sit beneath every other section.
pub const INHERITED_SECTION: &str = "DEFAULT";

pub const KEY_MOVE: &str = "move";
pub const KEY_SCHEDULE: &str = "schedule";

/// Raw key/value pairs of one section.
pub type Section = BTreeMap<String, String>;

/// Which generation below the scope holds the items to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    /// Direct children of the scope.
    Siblings,
    /// Children of the scope's children.
    Nephews,
}

impl Subject {
    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Siblings => "siblings",
            Subject::Nephews => "nephews",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "siblings" => Ok(Subject::Siblings),
            "nephews" => Ok(Subject::Nephews),
            _ => Err(SatmonError::UnknownSubject(value.to_string())),
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options in effect for one scope, after all layers are merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveOptions {
    values: BTreeMap<String, String>,
}

impl EffectiveOptions {
    /// Built-in defaults: `move = nephews`, no schedule.
    pub fn builtin() -> Self {
        let mut values = BTreeMap::new();
        values.insert(KEY_MOVE.to_string(), Subject::Nephews.as_str().to_string());
        values.insert(KEY_SCHEDULE.to_string(), String::new());
        Self { values }
    }

    /// New options with `overlay` taking precedence on every key it sets.
    pub fn merge(&self, overlay: &Section) -> Self {
        let mut values = self.values.clone();
        for (key, value) in overlay {
            values.insert(key.clone(), value.clone());
        }
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn subject(&self) -> Result<Subject> {
        Subject::parse(self.get(KEY_MOVE).unwrap_or_default())
    }

    /// The schedule, or `None` when unset or blank.
    pub fn schedule(&self) -> Option<&str> {
        self.get(KEY_SCHEDULE)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

impl Default for EffectiveOptions {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Parsed contents of one `.satmonrc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeConfig {
    inherited: Section,
    sections: BTreeMap<String, Section>,
}

impl ScopeConfig {
    /// Parse the file text. `path` is only used in error messages.
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        let mut config = ScopeConfig::default();
        let mut current: Option<String> = None;
        let mut last_key: Option<String> = None;

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let syntax_error = |message: &str| SatmonError::ConfigSyntax {
                path: path.to_path_buf(),
                line: line_no,
                message: message.to_string(),
            };

            let trimmed = raw.trim();
            if trimmed.is_empty() {
                last_key = None;
                continue;
            }
            if trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            // Indented line directly after a key continues its value.
            if raw.starts_with(char::is_whitespace) {
                if let (Some(section), Some(key)) = (current.as_deref(), last_key.as_deref()) {
                    let section = config.section_mut(section);
                    if let Some(value) = section.get_mut(key) {
                        value.push('\n');
                        value.push_str(trimmed);
                    }
                    continue;
                }
            }

            if let Some(rest) = trimmed.strip_prefix('[') {
                let end = rest
                    .find(']')
                    .ok_or_else(|| syntax_error("unterminated section header"))?;
                let name = rest[..end].trim();
                if name.is_empty() {
                    return Err(syntax_error("empty section name"));
                }
                config.section_mut(name);
                current = Some(name.to_string());
                last_key = None;
                continue;
            }

            let section = current
                .as_deref()
                .ok_or_else(|| syntax_error("option found before any [section] header"))?;
            let (key, value) =
                split_option(trimmed).ok_or_else(|| syntax_error("expected 'key = value'"))?;
            if key.is_empty() {
                return Err(syntax_error("missing option name"));
            }
            config.section_mut(section).insert(key.clone(), value);
            last_key = Some(key);
        }

        Ok(config)
    }

    /// Built-ins, then `[DEFAULT]`, then `[all]`.
    pub fn base_options(&self) -> EffectiveOptions {
        let mut options = EffectiveOptions::builtin().merge(&self.inherited);
        if let Some(all) = self.sections.get(DEFAULT_SECTION) {
            options = options.merge(all);
        }
        options
    }

    /// `base` with the section named after `subject_dir` laid over it, if any.
    pub fn options_for_subject(&self, base: &EffectiveOptions, subject_dir: &str) -> EffectiveOptions {
        match self.sections.get(subject_dir) {
            Some(section) if subject_dir != DEFAULT_SECTION => base.merge(section),
            _ => base.clone(),
        }
    }

    fn section_mut(&mut self, name: &str) -> &mut Section {
        if name == INHERITED_SECTION {
            return &mut self.inherited;
        }
        self.sections.entry(name.to_string()).or_default()
    }
}

/// Split `key = value` or `key: value` at whichever separator comes first.
fn split_option(line: &str) -> Option<(String, String)> {
    let split_at = line.find(|c| c == '=' || c == ':')?;
    let key = line[..split_at].trim().to_lowercase();
    let value = strip_inline_comment(line[split_at + 1..].trim());
    let value = if value == "\"\"" { "" } else { value };
    Some((key, value.to_string()))
}

/// Drop a trailing `; comment` (the `;` must follow whitespace).
fn strip_inline_comment(value: &str) -> &str {
    let bytes = value.as_bytes();
    for (idx, byte) in bytes.iter().enumerate() {
        if *byte == b';' && idx > 0 && bytes[idx - 1].is_ascii_whitespace() {
            return value[..idx].trim_end();
        }
    }
    value
}
