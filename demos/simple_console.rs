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

use logplan::ConfigError;
use logplan::ConsoleHandler;
use logplan::Level;
use logplan::Options;

fn main() -> Result<(), ConfigError> {
    let mut doc = logplan::builder()
        .root_level(Level::Debug)
        .stock_formatters(true)
        .warnings(true)
        .finish();

    doc.add_console_handler(
        "console",
        ConsoleHandler::stdout().level(Level::Info).formatter("minimal"),
    )?
    .add_logger(
        "app",
        Options::new()
            .level(Level::Debug)
            .handlers("console")
            .propagate(false),
    )?;

    // hand doc.config() to the logging runtime; here we just show the wire form
    doc.dump();
    Ok(())
}
