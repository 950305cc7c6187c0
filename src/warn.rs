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

use std::fmt;
use std::io::Write;

/// Reports non-fatal consistency findings to a diagnostic stream.
///
/// Each document owns its channel, so enabling warnings on one document does
/// not affect any other. The channel is disabled by default; when enabled,
/// every finding writes one line of the form:
///
/// ```text
/// Warning (<category>): <message>.
/// ```
///
/// where `<category>` names the section the offending call mutates
/// (`formatters`, `filters`, `handlers`, `loggers`, or `root`). The sink is
/// stderr unless replaced with [`WarningChannel::with_sink`].
///
/// # Examples
///
/// ```
/// use logplan::WarningChannel;
///
/// let mut channel = WarningChannel::new(false);
/// assert!(channel.set_enabled(true));
/// assert!(channel.enabled());
/// ```
pub struct WarningChannel {
    enabled: bool,
    sink: Box<dyn Write + Send>,
}

impl fmt::Debug for WarningChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WarningChannel")
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

impl Default for WarningChannel {
    fn default() -> Self {
        Self::new(false)
    }
}

impl WarningChannel {
    /// Create a channel writing to stderr.
    pub fn new(enabled: bool) -> Self {
        Self::with_sink(enabled, Box::new(std::io::stderr()))
    }

    /// Create a channel writing to the given sink.
    pub fn with_sink(enabled: bool, sink: Box<dyn Write + Send>) -> Self {
        WarningChannel { enabled, sink }
    }

    /// Whether findings are currently reported.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable reporting, returning the new state.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        self.enabled = enabled;
        self.enabled
    }

    /// Replace the sink, keeping the enabled state.
    pub fn set_sink(&mut self, sink: Box<dyn Write + Send>) {
        self.sink = sink;
    }

    pub(crate) fn emit(&mut self, category: &str, message: fmt::Arguments<'_>) {
        if !self.enabled {
            return;
        }
        // the write is advisory only
        let _ = writeln!(self.sink, "Warning ({category}): {message}.");
    }
}
