//! Unit tests for CLI commands

use crate::cli::commands::form_fields;
use crate::cli::{Cli, Commands};
use crate::submit::PayloadMode;
use clap::Parser;

#[test]
fn test_serve_defaults() {
    let cli = Cli::try_parse_from(["burnit", "serve"]).unwrap();
    match cli.command {
        Commands::Serve {
            addr,
            max_text_bytes,
            ..
        } => {
            // BURNIT_ADDR may be set in the environment running the tests
            if std::env::var("BURNIT_ADDR").is_err() {
                assert_eq!(addr, "0.0.0.0:8080");
            }
            assert_eq!(max_text_bytes, None);
        }
        _ => panic!("Expected Serve command"),
    }
}

#[test]
fn test_send_with_file() {
    let cli = Cli::try_parse_from([
        "burnit",
        "send",
        "--server",
        "http://burn.example",
        "--text",
        "hi",
        "--file",
        "notes.txt",
    ])
    .unwrap();
    match cli.command {
        Commands::Send {
            server, text, file, ..
        } => {
            assert_eq!(server.as_str(), "http://burn.example/");
            assert_eq!(text.as_deref(), Some("hi"));
            assert_eq!(file.unwrap().to_string_lossy(), "notes.txt");
        }
        _ => panic!("Expected Send command"),
    }
}

#[test]
fn test_send_text_conflicts_with_stdin() {
    let result = Cli::try_parse_from(["burnit", "send", "--text", "a", "--stdin"]);
    assert!(result.is_err());
}

#[test]
fn test_send_rejects_bad_url() {
    let result = Cli::try_parse_from(["burnit", "send", "--server", "not a url", "--text", "a"]);
    assert!(result.is_err());
}

#[test]
fn test_form_fields_plain() {
    let (fields, mode) = form_fields(Some("s".into()), false, None).unwrap();
    assert_eq!(mode, PayloadMode::Plain);
    assert_eq!(fields.text, "s");
    assert!(fields.file.is_none());
}

#[test]
fn test_form_fields_with_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.bin");
    std::fs::write(&path, [1u8, 2, 3]).unwrap();

    let (fields, mode) = form_fields(Some("s".into()), false, Some(path)).unwrap();
    assert_eq!(mode, PayloadMode::Multipart);
    let file = fields.file.unwrap();
    assert_eq!(file.file_name, "a.bin");
    assert_eq!(file.bytes, vec![1, 2, 3]);
}

#[test]
fn test_form_fields_requires_text() {
    assert!(form_fields(None, false, None).is_err());
}

#[test]
fn test_form_fields_missing_file() {
    let err = form_fields(Some("s".into()), false, Some("/no/such/file".into())).unwrap_err();
    assert!(err.to_string().contains("failed to read attachment"));
}
