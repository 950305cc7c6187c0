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

//! Several modules contributing to one configuration through a registry.

use logplan::ConsoleHandler;
use logplan::Level;
use logplan::Options;
use logplan::Registry;

mod web {
    use super::*;

    pub fn register(registry: &mut Registry) {
        registry.register(|doc| {
            doc.add_logger("app.web", Options::new().level(Level::Info).handlers("console"))?;
            Ok(())
        });
    }
}

mod db {
    use super::*;

    pub fn register(registry: &mut Registry) {
        registry.register(|doc| {
            doc.add_logger("app.db", Options::new().level(Level::Warning).handlers("console"))?;
            Ok(())
        });
    }
}

fn main() -> anyhow::Result<()> {
    let mut registry = Registry::new();
    registry.register(|doc| {
        doc.add_console_handler("console", ConsoleHandler::stdout().level(Level::Info))?;
        Ok(())
    });
    web::register(&mut registry);
    db::register(&mut registry);

    let doc = registry.build(logplan::builder().stock_formatters(true))?;
    doc.dump();
    Ok(())
}
