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

//! Logplan builds declarative logging configuration documents through a
//! fluent, incremental API.
//!
//! # Overview
//!
//! A [`ConfigDocument`] accumulates named formatter, filter, handler, and
//! logger definitions plus root-logger settings. Each builder call validates
//! its input against the current document state: duplicate references are
//! dropped and redefinitions overwrite, with optional diagnostics reported
//! through a per-document [`WarningChannel`]. The finished document is handed
//! verbatim to an external logging runtime, which instantiates the real
//! writers and resolves name references at activation time. Logplan itself
//! never formats records or performs I/O.
//!
//! # Examples
//!
//! Building a console configuration by hand:
//!
//! ```
//! use logplan::ConfigDocument;
//! use logplan::Level;
//! use logplan::Options;
//!
//! let mut doc = ConfigDocument::new();
//! doc.add_formatter("minimal", Options::new().format("%(message)s"))?
//!     .add_handler(
//!         "console",
//!         Options::new()
//!             .class_name("logging.StreamHandler")
//!             .level(Level::Info)
//!             .formatter("minimal"),
//!     )?
//!     .add_logger(
//!         "app",
//!         Options::new()
//!             .level(Level::Debug)
//!             .handlers("console")
//!             .propagate(false),
//!     )?;
//! println!("{}", doc.to_json());
//! # Ok::<(), logplan::ConfigError>(())
//! ```
//!
//! The same configuration with the stock formatters and a shorthand:
//!
//! ```
//! use logplan::ConsoleHandler;
//! use logplan::Level;
//!
//! let mut doc = logplan::builder()
//!     .root_level(Level::Debug)
//!     .stock_formatters(true)
//!     .finish();
//! doc.add_console_handler(
//!     "console",
//!     ConsoleHandler::stdout().level(Level::Info).formatter("minimal"),
//! )?;
//! doc.attach_root_handlers("console");
//! # Ok::<(), logplan::ConfigError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod document;
mod error;
mod level;
mod options;
mod preset;
mod refs;
mod registry;
mod section;
mod warn;

pub use document::ConfigDocument;
pub use document::DocumentBuilder;
pub use document::builder;
pub use error::ConfigError;
pub use level::Level;
pub use options::Options;
pub use options::Value;
pub use preset::ConsoleHandler;
pub use preset::FileHandler;
pub use preset::RotatingFileHandler;
pub use preset::STOCK_FORMATTERS;
pub use refs::Names;
pub use registry::Registry;
pub use section::Section;
pub use section::SectionKind;
pub use warn::WarningChannel;
