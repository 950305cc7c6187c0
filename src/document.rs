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

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::ConfigError;
use crate::level::Level;
use crate::options::Options;
use crate::options::Value;
use crate::options::check_definition;
use crate::preset;
use crate::refs;
use crate::refs::Names;
use crate::refs::RefKind;
use crate::refs::TargetKind;
use crate::section::Section;
use crate::section::SectionKind;
use crate::warn::WarningChannel;

/// Create a new [builder][DocumentBuilder] for a [`ConfigDocument`].
///
/// ```
/// use logplan::Level;
///
/// let doc = logplan::builder()
///     .root_level(Level::Debug)
///     .stock_formatters(true)
///     .finish();
/// assert!(doc.formatters().contains("minimal"));
/// ```
pub fn builder() -> DocumentBuilder {
    DocumentBuilder::new()
}

/// The configuration document under construction.
///
/// A document accumulates named formatter, filter, handler, and logger
/// definitions plus root-logger settings, one builder call at a time. Each
/// call validates its input against the current state, applies its effect,
/// and returns the document again so calls can be chained. When construction
/// is complete, [`config`](ConfigDocument::config) hands the finished
/// structure to the external consumer verbatim; referential consistency
/// across sections is resolved by that consumer at activation time, not here.
///
/// # Examples
///
/// ```
/// use logplan::ConfigDocument;
/// use logplan::Level;
/// use logplan::Options;
///
/// let mut doc = ConfigDocument::new();
/// doc.add_formatter("minimal", Options::new().format("%(message)s"))?
///     .add_handler(
///         "console",
///         Options::new()
///             .class_name("logging.StreamHandler")
///             .level(Level::Info)
///             .formatter("minimal"),
///     )?
///     .add_logger(
///         "app",
///         Options::new()
///             .level(Level::Debug)
///             .handlers("console")
///             .propagate(false),
///     )?;
/// # Ok::<(), logplan::ConfigError>(())
/// ```
#[derive(Debug, Serialize)]
pub struct ConfigDocument {
    version: u32,
    root: Options,
    loggers: Section,
    disable_existing_loggers: bool,
    formatters: Section,
    incremental: bool,
    filters: Section,
    handlers: Section,

    #[serde(skip)]
    warnings: WarningChannel,
    #[serde(skip)]
    log_dir: PathBuf,
    #[serde(skip)]
    locking: bool,
    #[serde(skip)]
    attach_handlers_to_root: bool,
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigDocument {
    /// Create a document with default settings: root level WARNING, existing
    /// loggers kept, warnings off.
    pub fn new() -> Self {
        builder().finish()
    }

    /// Create a new [`DocumentBuilder`].
    pub fn builder() -> DocumentBuilder {
        builder()
    }

    /// The formatters section.
    pub fn formatters(&self) -> &Section {
        &self.formatters
    }

    /// The filters section.
    pub fn filters(&self) -> &Section {
        &self.filters
    }

    /// The handlers section.
    pub fn handlers(&self) -> &Section {
        &self.handlers
    }

    /// The loggers section.
    pub fn loggers(&self) -> &Section {
        &self.loggers
    }

    /// The root entity: a single unnamed logger entry, addressed elsewhere by
    /// the empty name.
    pub fn root(&self) -> &Options {
        &self.root
    }

    /// The warning channel.
    pub fn warnings(&self) -> &WarningChannel {
        &self.warnings
    }

    /// The warning channel, for toggling or sink replacement.
    pub fn warnings_mut(&mut self) -> &mut WarningChannel {
        &mut self.warnings
    }

    /// The base directory joined onto file-handler filenames.
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Whether handler shorthands default to the locking factory form.
    pub fn locking(&self) -> bool {
        self.locking
    }

    /// Whether handler shorthands also attach the new handler to root.
    pub fn attach_handlers_to_root(&self) -> bool {
        self.attach_handlers_to_root
    }

    /// Change the base directory for file-handler filenames. The directory
    /// must already exist; the builder never creates it.
    pub fn set_log_dir(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.log_dir = dir.into();
        self
    }

    /// Change the locking default for handler shorthands.
    pub fn set_locking(&mut self, locking: bool) -> &mut Self {
        self.locking = locking;
        self
    }

    /// Change the attach-to-root default for handler shorthands.
    pub fn set_attach_handlers_to_root(&mut self, attach: bool) -> &mut Self {
        self.attach_handlers_to_root = attach;
        self
    }

    /// Change the `disable_existing_loggers` switch of the finished document.
    pub fn set_disable_existing_loggers(&mut self, disable: bool) -> &mut Self {
        self.disable_existing_loggers = disable;
        self
    }

    /// Define (or redefine) a formatter.
    ///
    /// The backend class defaults to `logging.Formatter` when neither a
    /// `class` nor a `()` factory reference is given. An empty `format`
    /// string is permitted and means "no explicit format".
    pub fn add_formatter(
        &mut self,
        name: &str,
        mut definition: Options,
    ) -> Result<&mut Self, ConfigError> {
        definition.rename("class_", "class");
        check_definition(SectionKind::Formatters, name, &definition)?;
        self.add_formatter_def(name, definition);
        Ok(self)
    }

    /// Register the stock formatter presets. See [`STOCK_FORMATTERS`] for
    /// the names and format strings.
    ///
    /// [`STOCK_FORMATTERS`]: crate::STOCK_FORMATTERS
    pub fn add_stock_formatters(&mut self) -> &mut Self {
        for &(name, format) in preset::STOCK_FORMATTERS {
            self.add_formatter_def(name, Options::new().format(format));
        }
        self
    }

    fn add_formatter_def(&mut self, name: &str, mut definition: Options) {
        if !definition.contains("class") && !definition.contains("()") {
            definition.insert("class", Value::Str("logging.Formatter".to_owned()));
        }
        self.formatters.add(name, definition, &mut self.warnings);
    }

    /// Define (or redefine) a filter.
    pub fn add_filter(&mut self, name: &str, mut definition: Options) -> Result<&mut Self, ConfigError> {
        definition.rename("class_", "class");
        check_definition(SectionKind::Filters, name, &definition)?;
        self.filters.add(name, definition, &mut self.warnings);
        Ok(self)
    }

    /// Define (or redefine) a handler.
    ///
    /// A `filters` option is routed through the attach algorithm rather than
    /// stored as given, so in-call duplicates are dropped with a warning.
    pub fn add_handler(&mut self, name: &str, mut definition: Options) -> Result<&mut Self, ConfigError> {
        definition.rename("class_", "class");
        check_definition(SectionKind::Handlers, name, &definition)?;
        if let Some(value) = definition.remove("filters") {
            let mut list = Vec::new();
            refs::extend_references(
                &mut list,
                Names::from_value(value),
                RefKind::Filters,
                TargetKind::Handler,
                name,
                SectionKind::Handlers.plural(),
                &mut self.warnings,
            );
            definition.insert("filters", Value::List(list));
        }
        self.handlers.add(name, definition, &mut self.warnings);
        Ok(self)
    }

    /// Define (or redefine) a logger.
    ///
    /// `handlers` and `filters` options are routed through the attach
    /// algorithm rather than stored as given.
    pub fn add_logger(&mut self, name: &str, mut definition: Options) -> Result<&mut Self, ConfigError> {
        check_definition(SectionKind::Loggers, name, &definition)?;
        for kind in [RefKind::Handlers, RefKind::Filters] {
            if let Some(value) = definition.remove(kind.as_str()) {
                let mut list = Vec::new();
                refs::extend_references(
                    &mut list,
                    Names::from_value(value),
                    kind,
                    TargetKind::Logger,
                    name,
                    SectionKind::Loggers.plural(),
                    &mut self.warnings,
                );
                definition.insert(kind.as_str(), Value::List(list));
            }
        }
        self.loggers.add(name, definition, &mut self.warnings);
        Ok(self)
    }

    /// Attach filters to a handler. Referenced filter names need not be
    /// defined yet; the consumer resolves them at activation time.
    pub fn attach_handler_filters(
        &mut self,
        handler: &str,
        filters: impl Into<Names>,
    ) -> Result<&mut Self, ConfigError> {
        let entry = self
            .handlers
            .get_mut(handler)
            .ok_or_else(|| ConfigError::UnknownHandler(handler.to_owned()))?;
        refs::extend_references(
            entry.list_mut("filters"),
            filters.into(),
            RefKind::Filters,
            TargetKind::Handler,
            handler,
            SectionKind::Handlers.plural(),
            &mut self.warnings,
        );
        Ok(self)
    }

    /// Attach filters to a logger. The empty name addresses the root entity,
    /// equivalent to [`attach_root_filters`](ConfigDocument::attach_root_filters).
    pub fn attach_logger_filters(
        &mut self,
        logger: &str,
        filters: impl Into<Names>,
    ) -> Result<&mut Self, ConfigError> {
        if logger.is_empty() {
            return Ok(self.attach_root_filters(filters));
        }
        let entry = self
            .loggers
            .get_mut(logger)
            .ok_or_else(|| ConfigError::UnknownLogger(logger.to_owned()))?;
        refs::extend_references(
            entry.list_mut("filters"),
            filters.into(),
            RefKind::Filters,
            TargetKind::Logger,
            logger,
            SectionKind::Loggers.plural(),
            &mut self.warnings,
        );
        Ok(self)
    }

    /// Attach handlers to a logger. The empty name addresses the root entity,
    /// equivalent to [`attach_root_handlers`](ConfigDocument::attach_root_handlers).
    pub fn attach_logger_handlers(
        &mut self,
        logger: &str,
        handlers: impl Into<Names>,
    ) -> Result<&mut Self, ConfigError> {
        if logger.is_empty() {
            return Ok(self.attach_root_handlers(handlers));
        }
        let entry = self
            .loggers
            .get_mut(logger)
            .ok_or_else(|| ConfigError::UnknownLogger(logger.to_owned()))?;
        refs::extend_references(
            entry.list_mut("handlers"),
            handlers.into(),
            RefKind::Handlers,
            TargetKind::Logger,
            logger,
            SectionKind::Loggers.plural(),
            &mut self.warnings,
        );
        Ok(self)
    }

    /// Attach filters to the root entity.
    pub fn attach_root_filters(&mut self, filters: impl Into<Names>) -> &mut Self {
        refs::extend_references(
            self.root.list_mut("filters"),
            filters.into(),
            RefKind::Filters,
            TargetKind::Logger,
            "",
            "root",
            &mut self.warnings,
        );
        self
    }

    /// Attach handlers to the root entity.
    pub fn attach_root_handlers(&mut self, handlers: impl Into<Names>) -> &mut Self {
        refs::extend_references(
            self.root.list_mut("handlers"),
            handlers.into(),
            RefKind::Handlers,
            TargetKind::Logger,
            "",
            "root",
            &mut self.warnings,
        );
        self
    }

    /// Attach a formatter to a handler. Unlike filter and handler lists this
    /// is single-valued: attaching a different formatter replaces the current
    /// one with a warning, re-attaching the same one warns and changes
    /// nothing.
    pub fn attach_handler_formatter(
        &mut self,
        handler: &str,
        formatter: &str,
    ) -> Result<&mut Self, ConfigError> {
        let entry = self
            .handlers
            .get_mut(handler)
            .ok_or_else(|| ConfigError::UnknownHandler(handler.to_owned()))?;
        let current = match entry.get("formatter") {
            Some(Value::Str(current)) => Some(current.clone()),
            _ => None,
        };
        match current {
            Some(current) if current == formatter => {
                self.warnings.emit(
                    SectionKind::Handlers.plural(),
                    format_args!(
                        "formatter '{formatter}' already attached to handler '{handler}'"
                    ),
                );
            }
            Some(current) => {
                self.warnings.emit(
                    SectionKind::Handlers.plural(),
                    format_args!(
                        "formatter '{formatter}' replaces '{current}' in handler '{handler}'"
                    ),
                );
                entry.insert("formatter", Value::Str(formatter.to_owned()));
            }
            None => entry.insert("formatter", Value::Str(formatter.to_owned())),
        }
        Ok(self)
    }

    /// Set the root entity's level.
    pub fn set_root_level(&mut self, level: Level) -> &mut Self {
        self.root.insert("level", Value::from(level));
        self
    }

    /// Set a logger's level.
    pub fn set_logger_level(&mut self, logger: &str, level: Level) -> Result<&mut Self, ConfigError> {
        let entry = self
            .loggers
            .get_mut(logger)
            .ok_or_else(|| ConfigError::UnknownLogger(logger.to_owned()))?;
        entry.insert("level", Value::from(level));
        Ok(self)
    }

    /// Set a handler's level.
    pub fn set_handler_level(
        &mut self,
        handler: &str,
        level: Level,
    ) -> Result<&mut Self, ConfigError> {
        let entry = self
            .handlers
            .get_mut(handler)
            .ok_or_else(|| ConfigError::UnknownHandler(handler.to_owned()))?;
        entry.insert("level", Value::from(level));
        Ok(self)
    }

    /// Finish construction: hand the document structure to the external
    /// consumer. No further validation happens here; any referential
    /// inconsistency surfaces as the consumer's error when it instantiates
    /// the real objects. The document should not be mutated after this point.
    pub fn config(&self) -> &ConfigDocument {
        self
    }

    /// The wire form of the document, pretty-printed.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self)
            .expect("document serialization cannot fail; this is a bug in logplan")
    }

    /// Pretty-print the document, for troubleshooting a configuration while
    /// building it.
    pub fn dump(&self) {
        println!("{}", self.to_json());
    }
}

/// A builder for the document-wide settings of a [`ConfigDocument`].
///
/// # Examples
///
/// ```
/// use logplan::Level;
///
/// let doc = logplan::builder()
///     .root_level(Level::Debug)
///     .disable_existing_loggers(false)
///     .log_dir("logs")
///     .locking(true)
///     .finish();
/// assert!(doc.locking());
/// ```
#[must_use = "call `finish` to obtain the configured document"]
#[derive(Debug)]
pub struct DocumentBuilder {
    root_level: Level,
    disable_existing_loggers: bool,
    log_dir: PathBuf,
    locking: bool,
    attach_handlers_to_root: bool,
    stock_formatters: bool,
    warnings: WarningChannel,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        DocumentBuilder {
            root_level: Level::Warning,
            disable_existing_loggers: false,
            log_dir: PathBuf::new(),
            locking: false,
            attach_handlers_to_root: false,
            stock_formatters: false,
            warnings: WarningChannel::default(),
        }
    }

    /// Set the root entity's initial level. Defaults to WARNING.
    pub fn root_level(mut self, level: Level) -> Self {
        self.root_level = level;
        self
    }

    /// Set the `disable_existing_loggers` switch. Defaults to false so that
    /// libraries can configure their own loggers before or after their
    /// clients configure theirs.
    pub fn disable_existing_loggers(mut self, disable: bool) -> Self {
        self.disable_existing_loggers = disable;
        self
    }

    /// Set the base directory joined onto file-handler filenames. The
    /// directory must already exist.
    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    /// Make handler shorthands default to the locking factory form, for
    /// configurations whose handlers will be shared across processes.
    pub fn locking(mut self, locking: bool) -> Self {
        self.locking = locking;
        self
    }

    /// Make handler shorthands also attach each new handler to root.
    pub fn attach_handlers_to_root(mut self, attach: bool) -> Self {
        self.attach_handlers_to_root = attach;
        self
    }

    /// Register the stock formatter presets on build.
    pub fn stock_formatters(mut self, stock: bool) -> Self {
        self.stock_formatters = stock;
        self
    }

    /// Enable or disable consistency warnings. Defaults to off.
    pub fn warnings(mut self, enabled: bool) -> Self {
        self.warnings.set_enabled(enabled);
        self
    }

    /// Replace the warning sink, keeping the enabled state.
    pub fn warning_sink(mut self, sink: Box<dyn Write + Send>) -> Self {
        self.warnings.set_sink(sink);
        self
    }

    /// Build the document.
    pub fn finish(self) -> ConfigDocument {
        let root = Options::new()
            .level(self.root_level)
            .set("handlers", Value::List(Vec::new()));
        let mut doc = ConfigDocument {
            version: 1,
            root,
            loggers: Section::new(SectionKind::Loggers),
            disable_existing_loggers: self.disable_existing_loggers,
            formatters: Section::new(SectionKind::Formatters),
            incremental: false,
            filters: Section::new(SectionKind::Filters),
            handlers: Section::new(SectionKind::Handlers),
            warnings: self.warnings,
            log_dir: self.log_dir,
            locking: self.locking,
            attach_handlers_to_root: self.attach_handlers_to_root,
        };
        if self.stock_formatters {
            doc.add_stock_formatters();
        }
        doc
    }
}
