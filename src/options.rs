// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Option bags for entry definitions.
//!
//! An entry definition is an ordered mapping from option key to [`Value`].
//! Recognized keys are checked against a per-category table when the entry is
//! added; unknown keys pass through opaquely so backend-specific options keep
//! working.

use serde::Serialize;

use crate::error::ConfigError;
use crate::level::Level;
use crate::refs::Names;
use crate::section::SectionKind;

/// A single option value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A boolean switch, e.g. `delay` or `propagate`.
    Bool(bool),
    /// An integer, e.g. `max_bytes`.
    Int(i64),
    /// A string, e.g. a format string or a backend class path.
    Str(String),
    /// An ordered list of names, e.g. a `filters` reference list.
    List(Vec<String>),
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Level> for Value {
    fn from(level: Level) -> Self {
        Value::Str(level.as_str().to_owned())
    }
}

impl From<Names> for Value {
    fn from(names: Names) -> Self {
        Value::List(names.into_vec())
    }
}

impl From<Vec<String>> for Value {
    fn from(names: Vec<String>) -> Self {
        Value::List(names)
    }
}

/// An ordered bag of options defining one entry.
///
/// Keys keep their insertion order, which is also their serialization order.
/// Setting a key again replaces the value in place.
///
/// # Examples
///
/// ```
/// use logplan::Level;
/// use logplan::Options;
///
/// let definition = Options::new()
///     .class_name("logging.StreamHandler")
///     .level(Level::Info)
///     .formatter("minimal");
/// assert_eq!(definition.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Options {
    items: Vec<(String, Value)>,
}

impl Options {
    /// Create an empty bag.
    pub fn new() -> Self {
        Options::default()
    }

    /// Set an arbitrary option key.
    pub fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value.into());
        self
    }

    /// Set the `format` string. An empty string is permitted and means "no
    /// explicit format".
    pub fn format(self, format: &str) -> Self {
        self.set("format", format)
    }

    /// Set the `datefmt` string.
    pub fn date_format(self, datefmt: &str) -> Self {
        self.set("datefmt", datefmt)
    }

    /// Set the backend `class` selector.
    pub fn class_name(self, class: &str) -> Self {
        self.set("class", class)
    }

    /// Set the `()` factory reference, the alternate backend-selector form.
    pub fn factory(self, factory: &str) -> Self {
        self.set("()", factory)
    }

    /// Set the `level` option.
    pub fn level(self, level: Level) -> Self {
        self.set("level", level)
    }

    /// Set the `formatter` name reference.
    pub fn formatter(self, name: &str) -> Self {
        self.set("formatter", name)
    }

    /// Set the `filters` reference list.
    pub fn filters(self, names: impl Into<Names>) -> Self {
        self.set("filters", names.into())
    }

    /// Set the `handlers` reference list.
    pub fn handlers(self, names: impl Into<Names>) -> Self {
        self.set("handlers", names.into())
    }

    /// Set the `propagate` switch (loggers only).
    pub fn propagate(self, propagate: bool) -> Self {
        self.set("propagate", propagate)
    }

    /// Set the `stream` target.
    pub fn stream(self, stream: &str) -> Self {
        self.set("stream", stream)
    }

    /// Set the `filename` path.
    pub fn filename(self, filename: &str) -> Self {
        self.set("filename", filename)
    }

    /// Set the file open `mode`.
    pub fn mode(self, mode: &str) -> Self {
        self.set("mode", mode)
    }

    /// Set the `delay` switch (defer file creation until first write).
    pub fn delay(self, delay: bool) -> Self {
        self.set("delay", delay)
    }

    /// Set the `max_bytes` rotation threshold.
    pub fn max_bytes(self, max_bytes: i64) -> Self {
        self.set("max_bytes", max_bytes)
    }

    /// Set the `backup_count` rotation threshold.
    pub fn backup_count(self, backup_count: i64) -> Self {
        self.set("backup_count", backup_count)
    }

    /// Set the `create_lock` switch of the factory form.
    pub fn create_lock(self, create_lock: bool) -> Self {
        self.set("create_lock", create_lock)
    }

    /// Look up an option by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.items.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Whether the key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate options in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The number of options set.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no options are set.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn insert(&mut self, key: &str, value: Value) {
        match self.items.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value,
            None => self.items.push((key.to_owned(), value)),
        }
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<Value> {
        let index = self.items.iter().position(|(k, _)| k == key)?;
        Some(self.items.remove(index).1)
    }

    pub(crate) fn rename(&mut self, from: &str, to: &str) {
        if let Some(value) = self.remove(from) {
            self.insert(to, value);
        }
    }

    /// The reference list stored under `key`, created empty when absent.
    ///
    /// Callers validate beforehand that the key, if present, holds a list.
    pub(crate) fn list_mut(&mut self, key: &str) -> &mut Vec<String> {
        if !self.contains(key) {
            self.items.push((key.to_owned(), Value::List(Vec::new())));
        }
        match self.items.iter_mut().find(|(k, _)| k == key) {
            Some((_, Value::List(list))) => list,
            _ => unreachable!("reference lists always hold Value::List; this is a bug in logplan"),
        }
    }
}

/// Definitions are equal when they hold the same keys with equal values,
/// regardless of insertion order.
impl PartialEq for Options {
    fn eq(&self, other: &Self) -> bool {
        self.items.len() == other.items.len()
            && self.items.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Serialize for Options {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.items.len()))?;
        for (key, value) in &self.items {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Check every recognized option of a definition against the per-category
/// table. Unknown keys pass through untouched.
pub(crate) fn check_definition(
    kind: SectionKind,
    name: &str,
    definition: &Options,
) -> Result<(), ConfigError> {
    for (key, value) in definition.iter() {
        check_option(kind, name, key, value)?;
    }
    Ok(())
}

fn check_option(
    kind: SectionKind,
    name: &str,
    key: &str,
    value: &Value,
) -> Result<(), ConfigError> {
    use SectionKind::*;

    let expected = match (kind, key) {
        (Formatters, "format" | "datefmt" | "style" | "class" | "()")
        | (Filters, "class" | "()" | "name")
        | (Handlers, "class" | "()" | "formatter" | "stream" | "filename" | "mode" | "target") => {
            match value {
                Value::Str(_) => return Ok(()),
                _ => "a string",
            }
        }
        (Handlers | Loggers, "level") => {
            return match value {
                Value::Str(level) => level.parse::<Level>().map(|_| ()),
                Value::Int(level) => Level::from_value(*level).map(|_| ()),
                _ => Err(ConfigError::InvalidOption {
                    key: key.to_owned(),
                    kind: kind.singular(),
                    name: name.to_owned(),
                    expected: "a level name or value",
                }),
            };
        }
        (Handlers, "filters") | (Loggers, "filters" | "handlers") => match value {
            Value::Str(_) | Value::List(_) => return Ok(()),
            _ => "a name or list of names",
        },
        (Handlers, "delay" | "create_lock") | (Loggers, "propagate") => match value {
            Value::Bool(_) => return Ok(()),
            _ => "a boolean",
        },
        (Handlers, "max_bytes" | "backup_count") => match value {
            Value::Int(_) => return Ok(()),
            _ => "an integer",
        },
        _ => return Ok(()),
    };

    Err(ConfigError::InvalidOption {
        key: key.to_owned(),
        kind: kind.singular(),
        name: name.to_owned(),
        expected,
    })
}
