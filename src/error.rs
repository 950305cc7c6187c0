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

/// Errors raised by builder calls that reject their input.
///
/// Every error is local to the call that caused it: the call either fully
/// applies its effect or fully rejects it, and construction can continue
/// afterwards. Consistency findings that do not reject the call are reported
/// through [`WarningChannel`](crate::WarningChannel) instead.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A severity name other than the six recognized ones.
    #[error("unrecognized level name '{0}'")]
    InvalidLevelName(String),
    /// A numeric severity other than the six recognized values.
    #[error("unrecognized level value {0}")]
    InvalidLevelValue(i64),
    /// An operation addressed a handler that was never defined.
    #[error("no handler named '{0}'")]
    UnknownHandler(String),
    /// An operation addressed a logger that was never defined.
    #[error("no logger named '{0}'")]
    UnknownLogger(String),
    /// A recognized option key carried a value of the wrong shape.
    #[error("option '{key}' of {kind} '{name}' must be {expected}")]
    InvalidOption {
        /// The offending option key.
        key: String,
        /// The entry category, e.g. `handler`.
        kind: &'static str,
        /// The entry name.
        name: String,
        /// What the recognized-key table expects for this key.
        expected: &'static str,
    },
}
