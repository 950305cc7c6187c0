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

//! The wire shape of finished documents, as the external consumer sees it.

use logplan::ConfigDocument;
use logplan::ConsoleHandler;
use logplan::FileHandler;
use logplan::Level;
use logplan::Options;
use logplan::RotatingFileHandler;
use logplan::Value;
use serde_json::json;

fn wire(doc: &ConfigDocument) -> serde_json::Value {
    serde_json::to_value(doc).unwrap()
}

#[test]
fn test_incremental_build_matches_reference_shape() {
    let mut doc = logplan::builder()
        .root_level(Level::Debug)
        .disable_existing_loggers(false)
        .finish();

    doc.add_formatter("minimal", Options::new().format("%(message)s"))
        .unwrap()
        .add_formatter(
            "process_msg",
            Options::new().format("%(processName)-10s: %(message)s"),
        )
        .unwrap()
        .add_formatter(
            "logger_process_msg",
            Options::new().format("%(name)-15s: %(processName)-10s: %(message)s"),
        )
        .unwrap();

    assert_eq!(
        wire(&doc),
        json!({
            "version": 1,
            "root": {"level": "DEBUG", "handlers": []},
            "loggers": {},
            "disable_existing_loggers": false,
            "formatters": {
                "minimal": {"class": "logging.Formatter", "format": "%(message)s"},
                "process_msg": {
                    "class": "logging.Formatter",
                    "format": "%(processName)-10s: %(message)s",
                },
                "logger_process_msg": {
                    "class": "logging.Formatter",
                    "format": "%(name)-15s: %(processName)-10s: %(message)s",
                },
            },
            "incremental": false,
            "filters": {},
            "handlers": {},
        })
    );

    doc.add_handler(
        "console",
        Options::new()
            .class_name("logging.StreamHandler")
            .level(Level::Info)
            .formatter("minimal"),
    )
    .unwrap()
    .add_file_handler(
        "default_file",
        FileHandler::new("blather.log")
            .level(Level::Debug)
            .formatter("minimal"),
    )
    .unwrap();

    assert_eq!(
        wire(&doc)["handlers"],
        json!({
            "console": {
                "formatter": "minimal",
                "level": "INFO",
                "class": "logging.StreamHandler",
            },
            "default_file": {
                "formatter": "minimal",
                "level": "DEBUG",
                "class": "logging.FileHandler",
                "filename": "blather.log",
                "delay": false,
                "mode": "w",
            },
        })
    );

    doc.add_logger(
        "default",
        Options::new()
            .handlers(["console", "default_file"])
            .level(Level::Debug),
    )
    .unwrap();
    doc.set_logger_level("default", Level::Debug).unwrap();

    assert_eq!(
        wire(&doc)["loggers"],
        json!({
            "default": {"level": "DEBUG", "handlers": ["console", "default_file"]},
        })
    );
}

#[test]
fn test_end_to_end_document() {
    let mut doc = ConfigDocument::new();
    doc.add_formatter("minimal", Options::new().format("%(message)s"))
        .unwrap()
        .add_handler(
            "console",
            Options::new()
                .class_name("logging.StreamHandler")
                .level(Level::Info)
                .formatter("minimal"),
        )
        .unwrap()
        .add_logger(
            "app",
            Options::new()
                .level(Level::Debug)
                .handlers("console")
                .propagate(false),
        )
        .unwrap();

    assert_eq!(
        wire(doc.config()),
        json!({
            "version": 1,
            "root": {"level": "WARNING", "handlers": []},
            "loggers": {
                "app": {"level": "DEBUG", "handlers": ["console"], "propagate": false},
            },
            "disable_existing_loggers": false,
            "formatters": {
                "minimal": {"class": "logging.Formatter", "format": "%(message)s"},
            },
            "incremental": false,
            "filters": {},
            "handlers": {
                "console": {
                    "class": "logging.StreamHandler",
                    "level": "INFO",
                    "formatter": "minimal",
                },
            },
        })
    );
}

#[test]
fn test_top_level_keys_serialize_in_document_order() {
    let doc = ConfigDocument::new();
    let json = doc.to_json();

    // top-level keys sit at two-space indentation in the pretty form
    let pos = |key: &str| {
        json.find(&format!("\n  \"{key}\":"))
            .unwrap_or_else(|| panic!("missing top-level key '{key}'"))
    };
    let order = [
        pos("version"),
        pos("root"),
        pos("loggers"),
        pos("disable_existing_loggers"),
        pos("formatters"),
        pos("incremental"),
        pos("filters"),
        pos("handlers"),
    ];
    assert!(order.windows(2).all(|w| w[0] < w[1]), "key order: {order:?}");
}

#[test]
fn test_config_is_an_identity_handoff() {
    let doc = ConfigDocument::new();
    assert!(std::ptr::eq(doc.config(), &doc));
}

#[test]
fn test_stock_formatters() {
    let doc = logplan::builder().stock_formatters(true).finish();
    assert_eq!(doc.formatters().len(), 10);

    let minimal = doc.formatters().get("minimal").unwrap();
    assert_eq!(
        minimal.get("format"),
        Some(&Value::Str("%(message)s".to_owned()))
    );
    let time = doc.formatters().get("time_logger_level_msg").unwrap();
    assert_eq!(
        time.get("format"),
        Some(&Value::Str(
            "%(asctime)s: %(name)-20s: %(levelname)-8s: %(message)s".to_owned()
        ))
    );
}

#[test]
fn test_console_handler_defaults() {
    let mut doc = ConfigDocument::new();
    doc.add_console_handler("console", ConsoleHandler::stdout())
        .unwrap();

    assert_eq!(
        wire(&doc)["handlers"]["console"],
        json!({
            "level": "WARNING",
            "formatter": "logger_level_msg",
            "stream": "ext://sys.stdout",
            "class": "logging.StreamHandler",
        })
    );
    // nothing attached to root unless the default says so
    assert_eq!(wire(&doc)["root"]["handlers"], json!([]));
}

#[test]
fn test_locking_console_handler_uses_factory_form() {
    let mut doc = logplan::builder().locking(true).finish();
    doc.add_console_handler("console", ConsoleHandler::stderr().level(Level::Error))
        .unwrap();

    let handler = doc.handlers().get("console").unwrap();
    assert_eq!(
        handler.get("()"),
        Some(&Value::Str("ext://logplan.LockingStreamHandler".to_owned()))
    );
    assert_eq!(handler.get("create_lock"), Some(&Value::Bool(true)));
    assert_eq!(handler.get("class"), None);
    assert_eq!(
        handler.get("formatter"),
        Some(&Value::Str("process_logger_level_msg".to_owned()))
    );
    assert_eq!(
        handler.get("stream"),
        Some(&Value::Str("ext://sys.stderr".to_owned()))
    );

    // per-handler override beats the document default
    doc.add_console_handler("plain", ConsoleHandler::stdout().locking(false))
        .unwrap();
    let plain = doc.handlers().get("plain").unwrap();
    assert_eq!(plain.get("()"), None);
    assert_eq!(
        plain.get("class"),
        Some(&Value::Str("logging.StreamHandler".to_owned()))
    );
}

#[test]
fn test_file_handler_joins_log_dir() {
    let mut doc = logplan::builder().log_dir("var/log").finish();
    doc.add_file_handler("logfile", FileHandler::new("app.log"))
        .unwrap();

    let expected = std::path::Path::new("var/log")
        .join("app.log")
        .to_string_lossy()
        .into_owned();
    let handler = doc.handlers().get("logfile").unwrap();
    assert_eq!(handler.get("filename"), Some(&Value::Str(expected)));
    assert_eq!(handler.get("mode"), Some(&Value::Str("w".to_owned())));
    assert_eq!(handler.get("level"), Some(&Value::Str("NOTSET".to_owned())));
    assert_eq!(handler.get("delay"), Some(&Value::Bool(false)));
    assert_eq!(
        handler.get("formatter"),
        Some(&Value::Str("time_logger_level_msg".to_owned()))
    );
}

#[test]
fn test_rotating_file_handler_defaults() {
    let mut doc = ConfigDocument::new();
    doc.add_rotating_file_handler(
        "rotating",
        RotatingFileHandler::new("app.log")
            .max_bytes(1024 * 1024)
            .backup_count(5),
    )
    .unwrap();

    assert_eq!(
        wire(&doc)["handlers"]["rotating"],
        json!({
            "filename": "app.log",
            "mode": "a",
            "level": "NOTSET",
            "formatter": "time_logger_level_msg",
            "delay": false,
            "max_bytes": 1048576,
            "backup_count": 5,
            "class": "logging.handlers.RotatingFileHandler",
        })
    );
}

#[test]
fn test_locking_rotating_file_handler() {
    let mut doc = ConfigDocument::new();
    doc.add_rotating_file_handler(
        "rotating",
        RotatingFileHandler::new("app.log").locking(true),
    )
    .unwrap();

    let handler = doc.handlers().get("rotating").unwrap();
    assert_eq!(
        handler.get("()"),
        Some(&Value::Str(
            "ext://logplan.LockingRotatingFileHandler".to_owned()
        ))
    );
    assert_eq!(handler.get("create_lock"), Some(&Value::Bool(true)));
    assert_eq!(handler.get("class"), None);
    assert_eq!(
        handler.get("formatter"),
        Some(&Value::Str("process_time_logger_level_msg".to_owned()))
    );
}

#[test]
fn test_attach_handlers_to_root_default() {
    let mut doc = logplan::builder().attach_handlers_to_root(true).finish();
    doc.add_console_handler("console", ConsoleHandler::stdout())
        .unwrap()
        .add_file_handler("logfile", FileHandler::new("app.log"))
        .unwrap()
        .add_console_handler("local", ConsoleHandler::stderr().attach_to_root(false))
        .unwrap();

    assert_eq!(wire(&doc)["root"]["handlers"], json!(["console", "logfile"]));
}

#[test]
fn test_null_handler() {
    let mut doc = ConfigDocument::new();
    doc.add_null_handler("null", Options::new().level(Level::Info))
        .unwrap();
    doc.set_handler_level("null", Level::Debug).unwrap();

    assert_eq!(
        wire(&doc)["handlers"]["null"],
        json!({"level": "DEBUG", "class": "logging.NullHandler"})
    );
}

#[test]
fn test_clone_handler_is_independent() {
    let mut doc = ConfigDocument::new();
    doc.add_handler(
        "console",
        Options::new()
            .class_name("logging.StreamHandler")
            .level(Level::Info)
            .filters("noise"),
    )
    .unwrap();
    doc.clone_handler("console2", "console").unwrap();

    doc.set_handler_level("console2", Level::Error).unwrap();
    doc.attach_handler_filters("console2", "extra").unwrap();

    let source = doc.handlers().get("console").unwrap();
    assert_eq!(source.get("level"), Some(&Value::Str("INFO".to_owned())));
    assert_eq!(
        source.get("filters"),
        Some(&Value::List(vec!["noise".to_owned()]))
    );
    let clone = doc.handlers().get("console2").unwrap();
    assert_eq!(clone.get("level"), Some(&Value::Str("ERROR".to_owned())));
    assert_eq!(
        clone.get("filters"),
        Some(&Value::List(vec!["noise".to_owned(), "extra".to_owned()]))
    );

    let err = doc.clone_handler("c3", "missing").unwrap_err();
    assert!(matches!(err, logplan::ConfigError::UnknownHandler(name) if name == "missing"));
}

#[test]
fn test_operations_on_unknown_targets_fail_fast() {
    use logplan::ConfigError;

    let mut doc = ConfigDocument::new();

    let err = doc.attach_logger_handlers("missing", "console").unwrap_err();
    assert!(matches!(err, ConfigError::UnknownLogger(name) if name == "missing"));

    let err = doc.attach_handler_filters("missing", "f").unwrap_err();
    assert!(matches!(err, ConfigError::UnknownHandler(name) if name == "missing"));

    let err = doc.attach_handler_formatter("missing", "f").unwrap_err();
    assert!(matches!(err, ConfigError::UnknownHandler(name) if name == "missing"));

    let err = doc.set_handler_level("missing", Level::Info).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownHandler(name) if name == "missing"));

    // the empty-name equivalence covers attach operations only
    let err = doc.set_logger_level("", Level::Info).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownLogger(name) if name.is_empty()));
}

#[test]
fn test_invalid_options_are_rejected_without_effect() {
    use logplan::ConfigError;

    let mut doc = ConfigDocument::new();

    let err = doc
        .add_handler("console", Options::new().set("level", "LOUD"))
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidLevelName(name) if name == "LOUD"));
    assert!(!doc.handlers().contains("console"));

    let err = doc
        .add_logger("app", Options::new().set("propagate", 1i64))
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidOption { key, .. } if key == "propagate"));
    assert!(!doc.loggers().contains("app"));
}

#[test]
fn test_class_underscore_is_normalized() {
    let mut doc = ConfigDocument::new();
    doc.add_handler(
        "console",
        Options::new().set("class_", "logging.StreamHandler"),
    )
    .unwrap();

    let handler = doc.handlers().get("console").unwrap();
    assert_eq!(handler.get("class_"), None);
    assert_eq!(
        handler.get("class"),
        Some(&Value::Str("logging.StreamHandler".to_owned()))
    );
}

#[test]
fn test_set_root_level() {
    let mut doc = ConfigDocument::new();
    assert_eq!(wire(&doc)["root"]["level"], json!("WARNING"));
    doc.set_root_level(Level::Debug);
    assert_eq!(wire(&doc)["root"]["level"], json!("DEBUG"));
}

#[test]
fn test_forward_references_are_not_an_error() {
    // references may precede the definitions they name; the consumer
    // resolves them at activation time
    let mut doc = ConfigDocument::new();
    doc.add_logger("app", Options::new().handlers("not_yet_defined"))
        .unwrap();
    doc.attach_root_handlers("also_not_defined");

    assert_eq!(
        wire(&doc)["loggers"]["app"]["handlers"],
        json!(["not_yet_defined"])
    );
}
