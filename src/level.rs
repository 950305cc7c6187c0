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
use std::str::FromStr;

use serde::Serialize;

use crate::error::ConfigError;

/// A severity level as understood by the configuration consumer.
///
/// The document stores levels by name (`"DEBUG"`, `"INFO"`, ...). Each name
/// also has a numeric equivalent accepted wherever a level option is set:
///
/// | Name       | Value |
/// |------------|-------|
/// | `NOTSET`   | 0     |
/// | `DEBUG`    | 10    |
/// | `INFO`     | 20    |
/// | `WARNING`  | 30    |
/// | `ERROR`    | 40    |
/// | `CRITICAL` | 50    |
///
/// Anything else is rejected with a hard error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    /// Defer to the parent entity's level.
    Notset,
    /// Detailed diagnostics.
    Debug,
    /// Routine operational records.
    Info,
    /// Something unexpected but recoverable.
    Warning,
    /// A failed operation.
    Error,
    /// A failure the process may not survive.
    Critical,
}

impl Level {
    /// The level name as the consumer spells it.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Level::Notset => "NOTSET",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }

    /// The numeric equivalent of this level.
    pub const fn value(&self) -> i64 {
        match self {
            Level::Notset => 0,
            Level::Debug => 10,
            Level::Info => 20,
            Level::Warning => 30,
            Level::Error => 40,
            Level::Critical => 50,
        }
    }

    /// Resolve a numeric equivalent back to a level.
    pub fn from_value(value: i64) -> Result<Level, ConfigError> {
        match value {
            0 => Ok(Level::Notset),
            10 => Ok(Level::Debug),
            20 => Ok(Level::Info),
            30 => Ok(Level::Warning),
            40 => Ok(Level::Error),
            50 => Ok(Level::Critical),
            _ => Err(ConfigError::InvalidLevelValue(value)),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NOTSET" => Ok(Level::Notset),
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "WARNING" => Ok(Level::Warning),
            "ERROR" => Ok(Level::Error),
            "CRITICAL" => Ok(Level::Critical),
            _ => Err(ConfigError::InvalidLevelName(s.to_owned())),
        }
    }
}

impl TryFrom<i64> for Level {
    type Error = ConfigError;

    fn try_from(value: i64) -> Result<Self, ConfigError> {
        Level::from_value(value)
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warning,
            log::Level::Info => Level::Info,
            // the consumer has no severity below DEBUG
            log::Level::Debug | log::Level::Trace => Level::Debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Level;
    use crate::error::ConfigError;

    #[test]
    fn test_parse_names() {
        assert_eq!("NOTSET".parse::<Level>().unwrap(), Level::Notset);
        assert_eq!("WARNING".parse::<Level>().unwrap(), Level::Warning);
        assert_eq!("CRITICAL".parse::<Level>().unwrap(), Level::Critical);

        let err = "warning".parse::<Level>().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLevelName(name) if name == "warning"));
    }

    #[test]
    fn test_numeric_equivalents() {
        for level in [
            Level::Notset,
            Level::Debug,
            Level::Info,
            Level::Warning,
            Level::Error,
            Level::Critical,
        ] {
            assert_eq!(Level::from_value(level.value()).unwrap(), level);
        }

        let err = Level::from_value(15).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLevelValue(15)));
    }

    #[test]
    fn test_from_log_level() {
        assert_eq!(Level::from(log::Level::Warn), Level::Warning);
        assert_eq!(Level::from(log::Level::Trace), Level::Debug);
    }
}
