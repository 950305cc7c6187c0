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
use logplan::Level;
use logplan::RotatingFileHandler;

fn main() -> Result<(), ConfigError> {
    // locking handlers, for logfiles shared between processes
    let mut doc = logplan::builder()
        .stock_formatters(true)
        .log_dir("logs")
        .locking(true)
        .attach_handlers_to_root(true)
        .finish();

    doc.add_rotating_file_handler(
        "logfile",
        RotatingFileHandler::new("app.log")
            .max_bytes(10 * 1024 * 1024)
            .backup_count(5)
            .level(Level::Info),
    )?;

    doc.dump();
    Ok(())
}
