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

use serde::Serialize;

use crate::options::Options;
use crate::warn::WarningChannel;

/// The category of entries a [`Section`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Named formatter definitions.
    Formatters,
    /// Named filter definitions.
    Filters,
    /// Named handler definitions.
    Handlers,
    /// Named logger definitions.
    Loggers,
}

impl SectionKind {
    /// The category name for one entry, as used in warning texts.
    pub const fn singular(&self) -> &'static str {
        match self {
            SectionKind::Formatters => "formatter",
            SectionKind::Filters => "filter",
            SectionKind::Handlers => "handler",
            SectionKind::Loggers => "logger",
        }
    }

    /// The section name, as used as a document key and warning category.
    pub const fn plural(&self) -> &'static str {
        match self {
            SectionKind::Formatters => "formatters",
            SectionKind::Filters => "filters",
            SectionKind::Handlers => "handlers",
            SectionKind::Loggers => "loggers",
        }
    }
}

/// An insertion-ordered registry of named entry definitions for one category.
///
/// Re-adding a name overwrites the stored definition; when the new definition
/// differs from the old one, a redefinition warning is reported. Entries are
/// never deleted in normal use.
#[derive(Debug, Clone)]
pub struct Section {
    kind: SectionKind,
    entries: Vec<(String, Options)>,
}

impl Section {
    pub(crate) fn new(kind: SectionKind) -> Self {
        Section {
            kind,
            entries: Vec::new(),
        }
    }

    /// The category this section holds.
    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    /// Look up an entry by name. Absence is not an error at this layer:
    /// consumers resolve references at activation time, so an attach can
    /// precede the definition it names.
    pub fn get(&self, name: &str) -> Option<&Options> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, d)| d)
    }

    /// Whether an entry with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Entry names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Options)> {
        self.entries.iter().map(|(n, d)| (n.as_str(), d))
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the section has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Options> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, d)| d)
    }

    pub(crate) fn add(&mut self, name: &str, definition: Options, warnings: &mut WarningChannel) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => {
                if *existing != definition {
                    warnings.emit(
                        self.kind.plural(),
                        format_args!("redefinition of {} '{}'", self.kind.singular(), name),
                    );
                }
                *existing = definition;
            }
            None => self.entries.push((name.to_owned(), definition)),
        }
    }
}

impl Serialize for Section {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, definition) in &self.entries {
            map.serialize_entry(name, definition)?;
        }
        map.end()
    }
}
