//! # Configuration Tests
//!
//! Deserialization, defaults, and file loading for session configuration.

use std::io::Write;

use pretty_assertions::assert_eq;
use rvext_core::Error;
use rvext_core::config::*;
use rvext_core::isa::encoding::EncodingKey;
use rvext_core::isa::format::InstructionFormat;
use tempfile::NamedTempFile;

const SAMPLE: &str = r#"{
    "general": {
        "trace_instructions": true,
        "strict_custom_opcodes": true
    },
    "extensions": [
        { "name": "vadd", "format": "R", "opcode": 10, "funct3": 0, "funct7": 0, "semantics": "add" },
        { "name": "hi", "format": "UType", "opcode": 22, "cycles": 2, "semantics": "lui" }
    ]
}"#;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(!config.general.trace_instructions);
    assert!(!config.general.strict_custom_opcodes);
    assert!(config.general.builtin_extensions);
    assert!(config.extensions.is_empty());
}

#[test]
fn test_parse_sample() {
    let config = Config::from_json(SAMPLE).unwrap();
    assert!(config.general.trace_instructions);
    assert!(config.general.strict_custom_opcodes);
    assert!(config.general.builtin_extensions);
    assert_eq!(
        config.extensions,
        vec![
            ExtensionConfig {
                name: "vadd".into(),
                format: InstructionFormat::R,
                opcode: 10,
                funct3: 0,
                funct7: Some(0),
                cycles: 1,
                semantics: "add".into(),
            },
            ExtensionConfig {
                name: "hi".into(),
                format: InstructionFormat::U,
                opcode: 22,
                funct3: 0,
                funct7: None,
                cycles: 2,
                semantics: "lui".into(),
            },
        ]
    );
    assert_eq!(config.extensions[0].encoding(), EncodingKey::reg(10, 0, 0));
    assert_eq!(config.extensions[1].encoding(), EncodingKey::upper(22));
}

#[test]
fn test_builtin_extensions_can_be_disabled() {
    let config = Config::from_json(r#"{"general": {"builtin_extensions": false}}"#).unwrap();
    assert!(!config.general.builtin_extensions);
}

#[test]
fn test_malformed_json() {
    assert!(matches!(Config::from_json("{"), Err(Error::Json(_))));
    assert!(matches!(
        Config::from_json(r#"{"extensions": [{"name": "x"}]}"#),
        Err(Error::Json(_))
    ));
}

#[test]
fn test_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SAMPLE.as_bytes()).unwrap();
    file.flush().unwrap();
    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.extensions.len(), 2);
}

#[test]
fn test_missing_file() {
    assert!(matches!(
        Config::from_file("/nonexistent/rvext.json"),
        Err(Error::Io { .. })
    ));
}

#[test]
fn test_round_trips_through_json() {
    let config = Config::from_json(SAMPLE).unwrap();
    let text = serde_json::to_string(&config).unwrap();
    assert_eq!(Config::from_json(&text).unwrap(), config);
}
