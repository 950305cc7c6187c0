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

use crate::document::ConfigDocument;
use crate::document::DocumentBuilder;

type Callback = Box<dyn Fn(&mut ConfigDocument) -> anyhow::Result<()>>;

/// Multi-module configuration without global discovery.
///
/// Every package or module that wants a say in the configuration registers a
/// callback at startup; the coordinator then runs all callbacks against one
/// shared document, in registration order, which makes the outcome
/// deterministic. Callbacks return `anyhow::Result` so contributing modules
/// can surface their own failure types.
///
/// # Examples
///
/// ```
/// use logplan::Level;
/// use logplan::Options;
/// use logplan::Registry;
///
/// let mut registry = Registry::new();
/// registry.register(|doc| {
///     doc.add_logger("app.db", Options::new().level(Level::Info))?;
///     Ok(())
/// });
/// registry.register(|doc| {
///     doc.add_logger("app.web", Options::new().level(Level::Debug))?;
///     Ok(())
/// });
///
/// let doc = registry.build(logplan::builder())?;
/// assert!(doc.loggers().contains("app.db"));
/// assert!(doc.loggers().contains("app.web"));
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Default)]
pub struct Registry {
    callbacks: Vec<Callback>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Registry::default()
    }

    /// Register a configuration callback. Callbacks run in registration
    /// order.
    pub fn register(
        &mut self,
        callback: impl Fn(&mut ConfigDocument) -> anyhow::Result<()> + 'static,
    ) -> &mut Self {
        self.callbacks.push(Box::new(callback));
        self
    }

    /// The number of registered callbacks.
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Whether no callbacks are registered.
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Run all callbacks against an existing document, stopping at the first
    /// failure.
    pub fn configure(&self, doc: &mut ConfigDocument) -> anyhow::Result<()> {
        for callback in &self.callbacks {
            callback(doc)?;
        }
        Ok(())
    }

    /// Build a document from the given settings, run all callbacks, and
    /// return the finished document.
    pub fn build(&self, builder: DocumentBuilder) -> anyhow::Result<ConfigDocument> {
        let mut doc = builder.finish();
        self.configure(&mut doc)?;
        Ok(doc)
    }
}
