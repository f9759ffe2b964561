//! Tests for CLI command execution
//!
//! These tests verify:
//! - `encode` prints hex, or `null` for an absent value
//! - `decode` accepts hex with or without `0x` and the `null` literal
//! - `types` lists only the primitives available at the version
//! - strict and lenient handling of unresolvable types

use cqlwire::cli::{lookup, run, Commands, NULL_OUTPUT};
use cqlwire::{CodecError, CodecRegistry, Config};

// =============================================================================
// Helper Functions
// =============================================================================

fn lenient(protocol_version: u8) -> Config {
    Config::builder().protocol_version(protocol_version).build()
}

fn strict(protocol_version: u8) -> Config {
    Config::builder()
        .protocol_version(protocol_version)
        .strict_resolution(true)
        .build()
}

fn encode(config: &Config, cql_type: &str, value: &str) -> cqlwire::Result<String> {
    run(
        config,
        Commands::Encode {
            cql_type: cql_type.to_string(),
            value: value.to_string(),
        },
    )
}

fn decode(config: &Config, cql_type: &str, encoded: &str) -> cqlwire::Result<String> {
    run(
        config,
        Commands::Decode {
            cql_type: cql_type.to_string(),
            encoded: encoded.to_string(),
        },
    )
}

// =============================================================================
// encode
// =============================================================================

#[test]
fn test_encode_prints_hex() {
    let config = lenient(4);

    assert_eq!(encode(&config, "int", "1").unwrap(), "00000001");
    assert_eq!(encode(&config, "text", "\"ab\"").unwrap(), "6162");
    assert_eq!(
        encode(&config, "list<int>", "[1, 2]").unwrap(),
        "0000000200000004000000010000000400000002"
    );
}

#[test]
fn test_encode_null_prints_null() {
    assert_eq!(encode(&lenient(4), "text", "null").unwrap(), NULL_OUTPUT);
}

#[test]
fn test_encode_rejects_malformed_json() {
    assert!(matches!(
        encode(&lenient(4), "int", "{not json"),
        Err(CodecError::Json(_))
    ));
}

// =============================================================================
// decode
// =============================================================================

#[test]
fn test_decode_prints_json() {
    let config = lenient(4);

    assert_eq!(decode(&config, "int", "0000002a").unwrap(), "42");
    assert_eq!(decode(&config, "int", "0x0000002a").unwrap(), "42");
    assert_eq!(
        decode(&config, "set<text>", "00000002000000016100000001620000000161").unwrap(),
        "[\"a\",\"b\"]"
    );
}

#[test]
fn test_decode_null_literal_is_a_null_buffer() {
    let config = lenient(4);

    assert_eq!(decode(&config, "text", "null").unwrap(), "null");
    assert_eq!(decode(&config, "int", "null").unwrap(), "0");
    assert_eq!(decode(&config, "list<int>", "null").unwrap(), "[]");
}

#[test]
fn test_decode_rejects_bad_hex() {
    assert!(matches!(
        decode(&lenient(4), "int", "zz"),
        Err(CodecError::InvalidEncoding(_))
    ));
}

#[test]
fn test_encode_then_decode_through_commands() {
    let config = lenient(4);
    let encoded = encode(&config, "list<frozen<set<bigint>>>", "[[1, 2], [3]]").unwrap();

    assert_eq!(
        decode(&config, "list<frozen<set<bigint>>>", &encoded).unwrap(),
        "[[1,2],[3]]"
    );
}

// =============================================================================
// types
// =============================================================================

#[test]
fn test_types_lists_primitives_for_version() {
    let v4 = run(&lenient(4), Commands::Types).unwrap();
    let v3 = run(&lenient(3), Commands::Types).unwrap();

    assert_eq!(v4.lines().count(), 19);
    assert_eq!(v3.lines().count(), 15);

    let date = v4.lines().find(|line| line.starts_with("date ")).unwrap();
    assert!(date.contains("0x0011"));
    assert!(date.ends_with("since v4"));

    for newer in ["date ", "time ", "smallint ", "tinyint "] {
        assert!(!v3.lines().any(|line| line.starts_with(newer)), "{}", newer);
    }
    assert!(v3.lines().any(|line| line.starts_with("int ") && line.ends_with("since v1")));
}

// =============================================================================
// Strict vs. Lenient Resolution
// =============================================================================

#[test]
fn test_unresolvable_type_prints_null_when_lenient() {
    let config = lenient(4);

    assert_eq!(encode(&config, "map<text, int>", "{}").unwrap(), NULL_OUTPUT);
    assert_eq!(decode(&config, "tuple<int>", "00").unwrap(), NULL_OUTPUT);
    assert_eq!(encode(&lenient(3), "smallint", "1").unwrap(), NULL_OUTPUT);
}

#[test]
fn test_unresolvable_type_fails_when_strict() {
    let config = strict(4);

    assert!(matches!(
        encode(&config, "map<text, int>", "{}"),
        Err(CodecError::UnsupportedType(_))
    ));
    assert!(matches!(
        decode(&strict(3), "date", "80000000"),
        Err(CodecError::UnsupportedType(_))
    ));
    assert_eq!(encode(&config, "int", "1").unwrap(), "00000001");
}

#[test]
fn test_lookup_modes() {
    let registry = CodecRegistry::new(4);

    assert!(lookup(&registry, "'org.example.Point'", &lenient(4)).unwrap().is_none());
    assert!(lookup(&registry, "'org.example.Point'", &strict(4)).is_err());
    assert!(lookup(&registry, "set<uuid>", &strict(4)).unwrap().is_some());
    assert!(matches!(
        lookup(&registry, "list<", &lenient(4)),
        Err(CodecError::TypeSyntax(_))
    ));
}
