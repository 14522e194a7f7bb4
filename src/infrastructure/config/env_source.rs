//! Environment snapshot with dotenv defaults and typed lookups.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::loader::ConfigError;

/// Point-in-time copy of the environment the configuration is resolved from.
///
/// Dotenv files only ever contribute defaults: a key already present in the
/// snapshot is never overwritten by a file entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the process environment. Entries that are not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }

    /// Snapshot holding exactly `pairs`
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect()
    }

    /// Merge a dotenv file beneath the current entries.
    ///
    /// A missing file is not an error.
    pub fn with_dotenv_defaults(self, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match dotenvy::from_path_iter(path) {
            Ok(entries) => self.merge_defaults(path, entries),
            Err(err) if err.not_found() => Ok(self),
            Err(err) => Err(ConfigError::dotenv(path, &err)),
        }
    }

    /// Merge the first `.env` found in the working directory or its parents.
    pub fn with_discovered_dotenv(self) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(|err| ConfigError::Dotenv {
            path: PathBuf::from(DOTENV_FILE),
            message: err.to_string(),
        })?;
        self.with_dotenv_discovered_from(&cwd)
    }

    pub(crate) fn with_dotenv_discovered_from(self, start: &Path) -> Result<Self, ConfigError> {
        match find_dotenv(start) {
            Some(path) => self.with_dotenv_defaults(path),
            None => Ok(self),
        }
    }

    fn merge_defaults(
        mut self,
        path: &Path,
        entries: dotenvy::Iter<File>,
    ) -> Result<Self, ConfigError> {
        for entry in entries {
            let (key, value) = entry.map_err(|err| ConfigError::dotenv(path, &err))?;
            self.vars.entry(key).or_insert(value);
        }
        Ok(self)
    }

    /// Raw value of `name`, empty strings included
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Number of variables in the snapshot
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether the snapshot holds no variables
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Value if set to something other than the empty string
    pub(crate) fn non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|value| !value.is_empty())
    }

    pub(crate) fn required(&self, name: &str) -> Result<&str, ConfigError> {
        self.get(name)
            .ok_or_else(|| ConfigError::MissingVariable(name.to_string()))
    }

    pub(crate) fn parsed<T>(&self, name: &str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.get(name).map(|raw| parse_value(name, raw)).transpose()
    }

    /// Like [`parsed`](Self::parsed) but an empty value counts as unset.
    pub(crate) fn parsed_non_empty<T>(&self, name: &str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.non_empty(name)
            .map(|raw| parse_value(name, raw))
            .transpose()
    }

    pub(crate) fn parsed_required<T>(&self, name: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        parse_value(name, self.required(name)?)
    }
}

const DOTENV_FILE: &str = ".env";

/// Nearest `.env` file in `start` or one of its ancestors
fn find_dotenv(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(DOTENV_FILE))
        .find(|candidate| candidate.is_file())
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|err: T::Err| ConfigError::InvalidValue {
            name: name.to_string(),
            reason: format!("'{raw}' is not valid: {err}"),
        })
}

impl FromIterator<(String, String)> for EnvSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().collect(),
        }
    }
}

impl ConfigError {
    fn dotenv(path: &Path, err: &dotenvy::Error) -> Self {
        Self::Dotenv {
            path: PathBuf::from(path),
            message: err.to_string(),
        }
    }
}
