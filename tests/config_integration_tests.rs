//! Tests for file-based configuration
use std::fs;

use clap::Parser;
use scpi_interpreter::config::{Args, Config, ConfigFile};
use scpi_interpreter::Kind;

fn write_config(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).expect("write config");
    (dir, path)
}

#[test]
fn test_config_file_drives_interpreter() {
    let (_dir, path) = write_config(
        r#"
identification = "Positioner; Example Antenna Lab; v2"

[replies]
command = "OK_CMD"
query = "OK_QUERY"
error = "ERROR"
partial_error = "ERROR_PARTIAL"
"#,
    );

    let file = ConfigFile::load(&path).expect("load config");
    let config = Config::from_file(file).expect("valid config");
    let interpreter = config.interpreter();

    let idn = interpreter.interpret(b"*IDN?");
    assert_eq!(idn.kind(), Kind::Query);
    assert_eq!(idn.reply, "Positioner; Example Antenna Lab; v2");

    assert_eq!(interpreter.interpret(b"*RST").reply, "OK_CMD");
    assert_eq!(interpreter.interpret(b"*OPC?").reply, "OK_QUERY");
    assert_eq!(interpreter.interpret(b":IN:").reply, "ERROR");
    assert_eq!(interpreter.interpret(b":INP:").reply, "ERROR_PARTIAL");
}

#[test]
fn test_input_bound_from_file() {
    let (_dir, path) = write_config("max_input_len = 4\n");

    let args = Args::parse_from(["scpi-ctl", "--config", path.to_str().expect("utf-8 path")]);
    let config = Config::from_args(args).expect("create config");
    assert_eq!(config.max_input_len, 4);

    let interpreter = config.interpreter();
    assert_eq!(interpreter.interpret(b"*RST trailing").kind(), Kind::Command);
    assert_eq!(interpreter.interpret(b"*IDN?").kind(), Kind::Error);
}

#[test]
fn test_invalid_reply_rejected() {
    let long = "x".repeat(300);
    let (_dir, path) = write_config(&format!("identification = \"{}\"\n", long));

    let args = Args::parse_from(["scpi-ctl", "--config", path.to_str().expect("utf-8 path")]);
    let err = Config::from_args(args).expect_err("identification too long");
    assert!(err.to_string().contains("identification"));
}

#[test]
fn test_malformed_toml_reports_path() {
    let (_dir, path) = write_config("identification = ");

    let err = ConfigFile::load(&path).expect_err("malformed toml");
    assert!(format!("{:#}", err).contains("config.toml"));
}
