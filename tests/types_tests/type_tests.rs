//! Tests for type descriptors and the value model
//!
//! These tests verify:
//! - Structural equality and hashing of descriptors
//! - Native protocol type ids
//! - Type expression parsing and display
//! - Value accessors and conversions

use std::collections::HashSet;

use chrono::NaiveDate;
use cqlwire::types::{LIST_TYPE_ID, MAP_TYPE_ID, SET_TYPE_ID, TUPLE_TYPE_ID, UDT_TYPE_ID};
use cqlwire::{CodecError, CqlDate, CqlValue, DataType, PrimitiveType};

// =============================================================================
// Helper Functions
// =============================================================================

fn parse(expression: &str) -> DataType {
    expression
        .parse()
        .unwrap_or_else(|e| panic!("'{}' should parse: {}", expression, e))
}

// =============================================================================
// Descriptor Identity
// =============================================================================

#[test]
fn test_descriptors_compare_structurally() {
    let a = DataType::list(DataType::set(PrimitiveType::Int.into()));
    let b = DataType::list(DataType::set(PrimitiveType::Int.into()));
    let c = DataType::set(DataType::list(PrimitiveType::Int.into()));

    assert_eq!(a, b);
    assert_ne!(a, c);

    let keys: HashSet<DataType> = [a, b, c].into_iter().collect();
    assert_eq!(keys.len(), 2);
}

#[test]
fn test_element_type() {
    let list = DataType::list(PrimitiveType::Uuid.into());

    assert_eq!(list.element_type(), Some(&DataType::Primitive(PrimitiveType::Uuid)));
    assert!(list.is_collection());
    assert!(DataType::Primitive(PrimitiveType::Uuid).element_type().is_none());
    assert!(!DataType::map(PrimitiveType::Int.into(), PrimitiveType::Int.into()).is_collection());
}

// =============================================================================
// Type Ids
// =============================================================================

#[test]
fn test_primitive_type_ids() {
    assert_eq!(PrimitiveType::Ascii.id(), 0x0001);
    assert_eq!(PrimitiveType::Int.id(), 0x0009);
    assert_eq!(PrimitiveType::Timestamp.id(), 0x000B);
    assert_eq!(PrimitiveType::Varchar.id(), 0x000D);
    assert_eq!(PrimitiveType::TinyInt.id(), 0x0014);
}

#[test]
fn test_type_ids_are_unique_and_reversible() {
    let ids: HashSet<u16> = PrimitiveType::ALL.iter().map(|kind| kind.id()).collect();
    assert_eq!(ids.len(), PrimitiveType::ALL.len());

    for kind in PrimitiveType::ALL {
        assert_eq!(PrimitiveType::from_id(kind.id()), Some(kind));
    }
    // 0x000A was text in protocol v1 and is not a distinct kind
    assert_eq!(PrimitiveType::from_id(0x000A), None);
}

#[test]
fn test_composite_type_ids() {
    let int: DataType = PrimitiveType::Int.into();

    assert_eq!(DataType::list(int.clone()).id(), LIST_TYPE_ID);
    assert_eq!(DataType::set(int.clone()).id(), SET_TYPE_ID);
    assert_eq!(DataType::map(int.clone(), int.clone()).id(), MAP_TYPE_ID);
    assert_eq!(DataType::Tuple(vec![int]).id(), TUPLE_TYPE_ID);
    assert_eq!(parse("ks.address").id(), UDT_TYPE_ID);
    assert_eq!(parse("'org.example.Point'").id(), 0x0000);
}

// =============================================================================
// Parsing and Display
// =============================================================================

#[test]
fn test_parse_every_primitive_name() {
    for kind in PrimitiveType::ALL {
        assert_eq!(parse(kind.name()), DataType::Primitive(kind));
    }
}

#[test]
fn test_parse_composites() {
    assert_eq!(
        parse("map<text, list<int>>"),
        DataType::map(
            PrimitiveType::Varchar.into(),
            DataType::list(PrimitiveType::Int.into())
        )
    );
    assert_eq!(
        parse("tuple<int, text, uuid>"),
        DataType::Tuple(vec![
            PrimitiveType::Int.into(),
            PrimitiveType::Varchar.into(),
            PrimitiveType::Uuid.into(),
        ])
    );
    assert_eq!(
        parse("'org.example.Point'"),
        DataType::Custom("org.example.Point".to_string())
    );
}

#[test]
fn test_display_round_trips_through_parse() {
    for expression in [
        "int",
        "list<varchar>",
        "set<list<bigint>>",
        "map<varchar, set<uuid>>",
        "tuple<int, varchar>",
        "ks.address",
        "'org.example.Point'",
    ] {
        assert_eq!(parse(expression).to_string(), expression);
    }
}

#[test]
fn test_parse_errors() {
    for expression in ["", "list<", "list<int", "integer", "set<int>>", "'unterminated", "list<>"] {
        assert!(
            matches!(expression.parse::<DataType>(), Err(CodecError::TypeSyntax(_))),
            "'{}' should be rejected",
            expression
        );
    }
}

#[test]
fn test_parse_primitive_aliases_and_case() {
    assert_eq!(parse("text"), DataType::Primitive(PrimitiveType::Varchar));
    assert_eq!(parse(" INT "), DataType::Primitive(PrimitiveType::Int));
}

#[test]
fn test_parse_frozen_is_transparent() {
    assert_eq!(
        parse("list<frozen<set<int>>>"),
        DataType::list(DataType::set(PrimitiveType::Int.into()))
    );
}

#[test]
fn test_parse_rejects_wrong_arity() {
    for expression in ["map<int>", "list<int, int>", "set<int, text>"] {
        assert!(
            matches!(expression.parse::<DataType>(), Err(CodecError::TypeSyntax(_))),
            "'{}' should be rejected",
            expression
        );
    }
}

// =============================================================================
// Values
// =============================================================================

#[test]
fn test_value_accessors() {
    assert_eq!(CqlValue::Int(7).as_int(), Some(7));
    assert_eq!(CqlValue::BigInt(7).as_int(), None);
    assert_eq!(CqlValue::from("abc").as_text(), Some("abc"));
    assert_eq!(
        CqlValue::List(vec![CqlValue::Int(1)]).as_elements(),
        Some(&[CqlValue::Int(1)][..])
    );
    assert!(CqlValue::from(None::<i32>).is_null());
    assert_eq!(CqlValue::from(Some(5i64)), CqlValue::BigInt(5));
}

#[test]
fn test_value_kind_names() {
    assert_eq!(CqlValue::Null.kind(), "null");
    assert_eq!(CqlValue::Int(0).kind(), "int");
    assert_eq!(CqlValue::Set(vec![]).kind(), "set");
}

#[test]
fn test_cql_date_calendar_conversion() {
    let date = NaiveDate::from_ymd_opt(2017, 3, 14).unwrap();
    let cql = CqlDate::from(date);

    assert_eq!(cql.days_since_epoch(), 17_239);
    assert_eq!(cql.to_naive_date(), Some(date));
    assert_eq!(cql.to_string(), "2017-03-14");
    assert_eq!(CqlDate::EPOCH.to_string(), "1970-01-01");
}

#[test]
fn test_cql_date_outside_calendar_range() {
    let far = CqlDate::from_days_since_epoch(i32::MAX);

    assert_eq!(far.to_naive_date(), None);
    assert_eq!(far.to_string(), i32::MAX.to_string());
}
