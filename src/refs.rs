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

//! Cross-reference lists and the attach algorithm.
//!
//! An entity's `filters` or `handlers` list is an ordered sequence of names
//! in which each name appears at most once, first occurrence winning. The
//! same algorithm runs whether the list is supplied when the entity is first
//! defined or extended by a dedicated attach call afterwards.

use crate::options::Value;
use crate::warn::WarningChannel;

/// One or more entry names to attach.
///
/// Most builder operations accept `impl Into<Names>`, so a single name, an
/// array, a slice, or a vector all work:
///
/// ```
/// use logplan::Names;
///
/// let one = Names::from("console");
/// let two = Names::from(["console", "logfile"]);
/// assert_eq!(one.len(), 1);
/// assert_eq!(two.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Names(Vec<String>);

impl Names {
    /// The names in supplied order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|n| n.as_str())
    }

    /// The number of names.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no names.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Unwrap into the underlying list.
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    /// Build from a stored option value. Callers validate beforehand that
    /// the value is a name or a list of names.
    pub(crate) fn from_value(value: Value) -> Names {
        match value {
            Value::Str(name) => Names(vec![name]),
            Value::List(names) => Names(names),
            _ => Names(Vec::new()),
        }
    }
}

impl From<&str> for Names {
    fn from(name: &str) -> Self {
        Names(vec![name.to_owned()])
    }
}

impl From<String> for Names {
    fn from(name: String) -> Self {
        Names(vec![name])
    }
}

impl From<Vec<String>> for Names {
    fn from(names: Vec<String>) -> Self {
        Names(names)
    }
}

impl From<Vec<&str>> for Names {
    fn from(names: Vec<&str>) -> Self {
        Names(names.into_iter().map(str::to_owned).collect())
    }
}

impl From<&[&str]> for Names {
    fn from(names: &[&str]) -> Self {
        Names(names.iter().map(|n| (*n).to_owned()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Names {
    fn from(names: [&str; N]) -> Self {
        Names(names.iter().map(|n| (*n).to_owned()).collect())
    }
}

impl<const N: usize> From<[String; N]> for Names {
    fn from(names: [String; N]) -> Self {
        Names(names.into_iter().collect())
    }
}

impl FromIterator<String> for Names {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Names(iter.into_iter().collect())
    }
}

/// Which reference list of an entity is being extended.
#[derive(Debug, Clone, Copy)]
pub(crate) enum RefKind {
    Filters,
    Handlers,
}

impl RefKind {
    pub(crate) const fn as_str(&self) -> &'static str {
        match self {
            RefKind::Filters => "filters",
            RefKind::Handlers => "handlers",
        }
    }
}

/// The kind of entity owning the list, for warning texts. The root entity
/// reads as `logger ''`.
#[derive(Debug, Clone, Copy)]
pub(crate) enum TargetKind {
    Handler,
    Logger,
}

impl TargetKind {
    pub(crate) const fn label(&self) -> &'static str {
        match self {
            TargetKind::Handler => "handler",
            TargetKind::Logger => "logger",
        }
    }
}

/// Append `incoming` to `existing`, deduplicating per the documented policy.
///
/// Duplicates within `incoming` are dropped first (first occurrence wins, one
/// warning per call, names in first-seen order). Names already present in
/// `existing` are dropped next with a second, distinct warning. Survivors are
/// appended in order.
pub(crate) fn extend_references(
    existing: &mut Vec<String>,
    incoming: Names,
    refs: RefKind,
    target: TargetKind,
    target_name: &str,
    category: &'static str,
    warnings: &mut WarningChannel,
) {
    let mut seen: Vec<String> = Vec::new();
    let mut dups: Vec<String> = Vec::new();
    for name in incoming.into_vec() {
        if seen.contains(&name) {
            if !dups.contains(&name) {
                dups.push(name);
            }
        } else {
            seen.push(name);
        }
    }

    if !dups.is_empty() {
        warnings.emit(
            category,
            format_args!(
                "list of {} to attach to {} '{}' contains duplicates: {}",
                refs.as_str(),
                target.label(),
                target_name,
                quote_names(&dups)
            ),
        );
    }

    let mut stale: Vec<String> = Vec::new();
    for name in seen {
        if existing.contains(&name) {
            stale.push(name);
        } else {
            existing.push(name);
        }
    }

    if !stale.is_empty() {
        warnings.emit(
            category,
            format_args!(
                "these {} are already attached to {} '{}': {}",
                refs.as_str(),
                target.label(),
                target_name,
                quote_names(&stale)
            ),
        );
    }
}

fn quote_names(names: &[String]) -> String {
    let mut out = String::new();
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push('\'');
        out.push_str(name);
        out.push('\'');
    }
    out
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use super::Names;
    use super::RefKind;
    use super::TargetKind;
    use super::extend_references;
    use crate::warn::WarningChannel;

    #[derive(Clone, Default)]
    struct SharedSink(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for SharedSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedSink {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn attach(existing: &mut Vec<String>, names: Names) -> String {
        let sink = SharedSink::default();
        let mut warnings = WarningChannel::with_sink(true, Box::new(sink.clone()));
        extend_references(
            existing,
            names,
            RefKind::Filters,
            TargetKind::Handler,
            "h",
            "handlers",
            &mut warnings,
        );
        sink.text()
    }

    #[test]
    fn test_input_duplicates_keep_first_occurrence() {
        let mut list = Vec::new();
        let output = attach(&mut list, Names::from(["a", "b", "a", "b"]));
        assert_eq!(list, ["a", "b"]);
        assert_eq!(
            output,
            "Warning (handlers): list of filters to attach to handler 'h' \
             contains duplicates: 'a', 'b'.\n"
        );
    }

    #[test]
    fn test_already_attached_names_are_skipped() {
        let mut list = vec!["a".to_owned()];
        let output = attach(&mut list, Names::from("a"));
        assert_eq!(list, ["a"]);
        assert_eq!(
            output,
            "Warning (handlers): these filters are already attached to handler 'h': 'a'.\n"
        );
    }

    #[test]
    fn test_duplicate_then_already_attached_warns_twice_in_order() {
        let mut list = vec!["a".to_owned()];
        let output = attach(&mut list, Names::from(["a", "a"]));
        assert_eq!(list, ["a"]);
        assert_eq!(
            output,
            "Warning (handlers): list of filters to attach to handler 'h' \
             contains duplicates: 'a'.\n\
             Warning (handlers): these filters are already attached to handler 'h': 'a'.\n"
        );
    }

    #[test]
    fn test_order_of_survivors_is_preserved() {
        let mut list = vec!["b".to_owned()];
        attach(&mut list, Names::from(["c", "b", "a"]));
        assert_eq!(list, ["b", "c", "a"]);
    }

    #[test]
    fn test_empty_input_is_a_no_op() {
        let mut list = vec!["a".to_owned()];
        let output = attach(&mut list, Names::default());
        assert_eq!(list, ["a"]);
        assert_eq!(output, "");
    }
}
