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

//! Batteries for common configurations: stock formatters and shorthand
//! constructors for console, file, and rotating-file handlers.
//!
//! Everything here goes through the document's public contract
//! ([`add_handler`](ConfigDocument::add_handler) and the attach operations),
//! so redefinition and dedup rules apply to shorthand-built entries exactly
//! as to hand-built ones.

use crate::document::ConfigDocument;
use crate::error::ConfigError;
use crate::level::Level;
use crate::options::Options;
use crate::options::Value;

/// The stock formatters registered by
/// [`add_stock_formatters`](ConfigDocument::add_stock_formatters), their
/// names making it fairly obvious what their format strings are.
pub const STOCK_FORMATTERS: &[(&str, &str)] = &[
    ("minimal", "%(message)s"),
    ("process_msg", "%(processName)-10s: %(message)s"),
    ("logger_process_msg", "%(name)-20s: %(processName)-10s: %(message)s"),
    ("logger_level_msg", "%(name)-20s: %(levelname)-8s: %(message)s"),
    ("logger_msg", "%(name)-20s: %(message)s"),
    ("process_level_msg", "%(processName)-10s: %(levelname)-8s: %(message)s"),
    (
        "process_time_level_msg",
        "%(processName)-10s: %(asctime)s: %(levelname)-8s: %(message)s",
    ),
    (
        "process_logger_level_msg",
        "%(processName)-10s: %(name)-20s: %(levelname)-8s: %(message)s",
    ),
    (
        "process_time_logger_level_msg",
        "%(processName)-10s: %(asctime)s: %(name)-20s: %(levelname)-8s: %(message)s",
    ),
    (
        "time_logger_level_msg",
        "%(asctime)s: %(name)-20s: %(levelname)-8s: %(message)s",
    ),
];

// Factory references for the mutual-exclusion-wrapped writer variants. The
// consumer resolves these at activation time.
const LOCKING_STREAM_HANDLER: &str = "ext://logplan.LockingStreamHandler";
const LOCKING_FILE_HANDLER: &str = "ext://logplan.LockingFileHandler";
const LOCKING_ROTATING_FILE_HANDLER: &str = "ext://logplan.LockingRotatingFileHandler";

/// Shorthand definition of a console handler.
///
/// The default formatter names refer to the stock formatters, so pair these
/// shorthands with [`add_stock_formatters`](ConfigDocument::add_stock_formatters)
/// unless an explicit formatter is set.
///
/// # Examples
///
/// ```
/// use logplan::ConsoleHandler;
/// use logplan::Level;
///
/// let mut doc = logplan::builder().stock_formatters(true).finish();
/// doc.add_console_handler("console", ConsoleHandler::stdout().level(Level::Info))?;
/// # Ok::<(), logplan::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConsoleHandler {
    stream: &'static str,
    level: Level,
    formatter: Option<String>,
    locking: Option<bool>,
    attach_to_root: Option<bool>,
    extra: Options,
}

impl ConsoleHandler {
    /// A console handler writing to stdout.
    pub fn stdout() -> Self {
        Self::with_stream("ext://sys.stdout")
    }

    /// A console handler writing to stderr.
    pub fn stderr() -> Self {
        Self::with_stream("ext://sys.stderr")
    }

    fn with_stream(stream: &'static str) -> Self {
        ConsoleHandler {
            stream,
            level: Level::Warning,
            formatter: None,
            locking: None,
            attach_to_root: None,
            extra: Options::new(),
        }
    }

    /// Set the handler level. Defaults to WARNING.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set the formatter name. Defaults to `logger_level_msg`, or
    /// `process_logger_level_msg` when locking resolves true.
    pub fn formatter(mut self, name: &str) -> Self {
        self.formatter = Some(name.to_owned());
        self
    }

    /// Override the document's locking default for this handler.
    pub fn locking(mut self, locking: bool) -> Self {
        self.locking = Some(locking);
        self
    }

    /// Override the document's attach-to-root default for this handler.
    pub fn attach_to_root(mut self, attach: bool) -> Self {
        self.attach_to_root = Some(attach);
        self
    }

    /// Set an extra backend-specific option.
    pub fn option(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra = self.extra.set(key, value);
        self
    }
}

/// Shorthand definition of a file handler.
///
/// The configured filename is the document's
/// [`log_dir`](ConfigDocument::log_dir) joined with the supplied name. The
/// directory must already exist; the builder never creates it.
#[derive(Debug, Clone)]
pub struct FileHandler {
    filename: String,
    mode: String,
    level: Level,
    delay: bool,
    formatter: Option<String>,
    locking: Option<bool>,
    attach_to_root: Option<bool>,
    extra: Options,
}

impl FileHandler {
    /// A file handler writing to `filename`, truncating on open.
    pub fn new(filename: &str) -> Self {
        FileHandler {
            filename: filename.to_owned(),
            mode: "w".to_owned(),
            level: Level::Notset,
            delay: false,
            formatter: None,
            locking: None,
            attach_to_root: None,
            extra: Options::new(),
        }
    }

    /// Set the open mode. Defaults to `w`.
    pub fn mode(mut self, mode: &str) -> Self {
        self.mode = mode.to_owned();
        self
    }

    /// Set the handler level. Defaults to NOTSET so everything is written.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Defer creating the file until the first record is written.
    pub fn delay(mut self, delay: bool) -> Self {
        self.delay = delay;
        self
    }

    /// Set the formatter name. Defaults to `time_logger_level_msg`, or
    /// `process_time_logger_level_msg` when locking resolves true.
    pub fn formatter(mut self, name: &str) -> Self {
        self.formatter = Some(name.to_owned());
        self
    }

    /// Override the document's locking default for this handler.
    pub fn locking(mut self, locking: bool) -> Self {
        self.locking = Some(locking);
        self
    }

    /// Override the document's attach-to-root default for this handler.
    pub fn attach_to_root(mut self, attach: bool) -> Self {
        self.attach_to_root = Some(attach);
        self
    }

    /// Set an extra backend-specific option.
    pub fn option(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra = self.extra.set(key, value);
        self
    }
}

/// Shorthand definition of a size-rotated file handler.
///
/// When a write would push the file past `max_bytes`, the consumer's writer
/// renames it aside and starts a new one, keeping at most `backup_count`
/// old files. Both thresholds default to 0, which disables rotation, as the
/// consumer's writer does.
#[derive(Debug, Clone)]
pub struct RotatingFileHandler {
    filename: String,
    max_bytes: i64,
    backup_count: i64,
    mode: String,
    level: Level,
    delay: bool,
    formatter: Option<String>,
    locking: Option<bool>,
    attach_to_root: Option<bool>,
    extra: Options,
}

impl RotatingFileHandler {
    /// A rotating file handler writing to `filename`, appending on open.
    pub fn new(filename: &str) -> Self {
        RotatingFileHandler {
            filename: filename.to_owned(),
            max_bytes: 0,
            backup_count: 0,
            mode: "a".to_owned(),
            level: Level::Notset,
            delay: false,
            formatter: None,
            locking: None,
            attach_to_root: None,
            extra: Options::new(),
        }
    }

    /// Set the size threshold that triggers rotation.
    pub fn max_bytes(mut self, max_bytes: i64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Set how many rotated files to keep.
    pub fn backup_count(mut self, backup_count: i64) -> Self {
        self.backup_count = backup_count;
        self
    }

    /// Set the open mode. Defaults to `a`.
    pub fn mode(mut self, mode: &str) -> Self {
        self.mode = mode.to_owned();
        self
    }

    /// Set the handler level. Defaults to NOTSET.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Defer creating the file until the first record is written.
    pub fn delay(mut self, delay: bool) -> Self {
        self.delay = delay;
        self
    }

    /// Set the formatter name. Defaults to `time_logger_level_msg`, or
    /// `process_time_logger_level_msg` when locking resolves true.
    pub fn formatter(mut self, name: &str) -> Self {
        self.formatter = Some(name.to_owned());
        self
    }

    /// Override the document's locking default for this handler. Locking is
    /// mandatory when multiple processes share the logfile.
    pub fn locking(mut self, locking: bool) -> Self {
        self.locking = Some(locking);
        self
    }

    /// Override the document's attach-to-root default for this handler.
    pub fn attach_to_root(mut self, attach: bool) -> Self {
        self.attach_to_root = Some(attach);
        self
    }

    /// Set an extra backend-specific option.
    pub fn option(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra = self.extra.set(key, value);
        self
    }
}

impl ConfigDocument {
    /// Add a console handler from a shorthand definition.
    pub fn add_console_handler(
        &mut self,
        name: &str,
        console: ConsoleHandler,
    ) -> Result<&mut Self, ConfigError> {
        let locking = console.locking.unwrap_or(self.locking());
        let to_root = console.attach_to_root.unwrap_or(self.attach_handlers_to_root());
        let formatter = console.formatter.unwrap_or_else(|| {
            let name = if locking {
                "process_logger_level_msg"
            } else {
                "logger_level_msg"
            };
            name.to_owned()
        });

        let mut definition = Options::new()
            .level(console.level)
            .formatter(&formatter)
            .stream(console.stream);
        for (key, value) in console.extra.iter() {
            definition = definition.set(key, value.clone());
        }
        definition = if locking {
            definition.factory(LOCKING_STREAM_HANDLER).create_lock(true)
        } else {
            definition.class_name("logging.StreamHandler")
        };

        self.add_handler(name, definition)?;
        if to_root {
            self.attach_root_handlers(name);
        }
        Ok(self)
    }

    /// Add a file handler from a shorthand definition.
    pub fn add_file_handler(
        &mut self,
        name: &str,
        file: FileHandler,
    ) -> Result<&mut Self, ConfigError> {
        let locking = file.locking.unwrap_or(self.locking());
        let to_root = file.attach_to_root.unwrap_or(self.attach_handlers_to_root());
        let formatter = file.formatter.unwrap_or_else(|| {
            let name = if locking {
                "process_time_logger_level_msg"
            } else {
                "time_logger_level_msg"
            };
            name.to_owned()
        });
        let filename = self.log_dir().join(&file.filename);

        let mut definition = Options::new()
            .filename(&filename.to_string_lossy())
            .mode(&file.mode)
            .level(file.level)
            .formatter(&formatter)
            .delay(file.delay);
        for (key, value) in file.extra.iter() {
            definition = definition.set(key, value.clone());
        }
        definition = if locking {
            definition.factory(LOCKING_FILE_HANDLER).create_lock(true)
        } else {
            definition.class_name("logging.FileHandler")
        };

        self.add_handler(name, definition)?;
        if to_root {
            self.attach_root_handlers(name);
        }
        Ok(self)
    }

    /// Add a size-rotated file handler from a shorthand definition.
    pub fn add_rotating_file_handler(
        &mut self,
        name: &str,
        file: RotatingFileHandler,
    ) -> Result<&mut Self, ConfigError> {
        let locking = file.locking.unwrap_or(self.locking());
        let to_root = file.attach_to_root.unwrap_or(self.attach_handlers_to_root());
        let formatter = file.formatter.unwrap_or_else(|| {
            let name = if locking {
                "process_time_logger_level_msg"
            } else {
                "time_logger_level_msg"
            };
            name.to_owned()
        });
        let filename = self.log_dir().join(&file.filename);

        let mut definition = Options::new()
            .filename(&filename.to_string_lossy())
            .mode(&file.mode)
            .level(file.level)
            .formatter(&formatter)
            .delay(file.delay)
            .max_bytes(file.max_bytes)
            .backup_count(file.backup_count);
        for (key, value) in file.extra.iter() {
            definition = definition.set(key, value.clone());
        }
        definition = if locking {
            definition
                .factory(LOCKING_ROTATING_FILE_HANDLER)
                .create_lock(true)
        } else {
            definition.class_name("logging.handlers.RotatingFileHandler")
        };

        self.add_handler(name, definition)?;
        if to_root {
            self.attach_root_handlers(name);
        }
        Ok(self)
    }

    /// Add a handler that discards every record, useful for silencing a
    /// library's logger until its client configures a real one.
    pub fn add_null_handler(
        &mut self,
        name: &str,
        options: Options,
    ) -> Result<&mut Self, ConfigError> {
        let mut definition = options;
        if !definition.contains("class") && !definition.contains("()") {
            definition = definition.class_name("logging.NullHandler");
        }
        self.add_handler(name, definition)
    }

    /// Define a new handler as an independent deep copy of an existing one.
    ///
    /// The copy goes through the normal [`add_handler`](ConfigDocument::add_handler)
    /// path, so redefinition and dedup rules apply; mutating the clone never
    /// affects the source. When the document's attach-to-root default is on,
    /// the clone is also attached to root.
    pub fn clone_handler(&mut self, clone: &str, source: &str) -> Result<&mut Self, ConfigError> {
        let definition = self
            .handlers()
            .get(source)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownHandler(source.to_owned()))?;
        self.add_handler(clone, definition)?;
        if self.attach_handlers_to_root() {
            self.attach_root_handlers(clone);
        }
        Ok(self)
    }
}
