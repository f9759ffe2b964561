//! Tests for codec resolution and the per-version registry cache
//!
//! These tests verify:
//! - Primitive seeding per protocol version
//! - Recursive collection resolution and idempotence
//! - Unresolvable descriptors
//! - Explicit registration
//! - One registry per version from the cache

use std::sync::Arc;

use cqlwire::codec::{IntCodec, StringCodec};
use cqlwire::registry::PrimitiveCodecs;
use cqlwire::{
    Codec, CodecError, CodecRegistry, CqlValue, DataType, PrimitiveType, RegistryCache,
    SharedCodec,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn primitive(kind: PrimitiveType) -> DataType {
    DataType::Primitive(kind)
}

fn unresolvable_types() -> Vec<DataType> {
    vec![
        DataType::map(primitive(PrimitiveType::Varchar), primitive(PrimitiveType::Int)),
        DataType::Tuple(vec![primitive(PrimitiveType::Int), primitive(PrimitiveType::Varchar)]),
        DataType::Udt {
            keyspace: "ks".to_string(),
            name: "address".to_string(),
            fields: vec![("street".to_string(), primitive(PrimitiveType::Varchar))],
        },
        DataType::Custom("org.example.Point".to_string()),
    ]
}

// =============================================================================
// Primitive Seeding
// =============================================================================

#[test]
fn test_v4_registry_resolves_every_primitive() {
    let registry = CodecRegistry::new(4);

    for kind in PrimitiveType::ALL {
        let codec = registry.resolve(&primitive(kind));
        assert!(codec.is_some(), "{} should resolve on v4", kind);
        assert_eq!(codec.unwrap().cql_type(), &primitive(kind));
    }
    assert_eq!(registry.len(), PrimitiveType::ALL.len());
}

#[test]
fn test_v3_registry_omits_newer_primitives() {
    let registry = CodecRegistry::new(3);
    let newer = [
        PrimitiveType::Date,
        PrimitiveType::Time,
        PrimitiveType::SmallInt,
        PrimitiveType::TinyInt,
    ];

    for kind in PrimitiveType::ALL {
        let resolved = registry.resolve(&primitive(kind)).is_some();
        assert_eq!(resolved, !newer.contains(&kind), "{} on v3", kind);
    }
    assert_eq!(registry.len(), PrimitiveType::ALL.len() - newer.len());
}

#[test]
fn test_primitive_codecs_build_filters_by_version() {
    let v3 = PrimitiveCodecs::build(3);
    let v4 = PrimitiveCodecs::build(4);

    assert_eq!(v3.protocol_version(), 3);
    assert_eq!(v3.len(), 15);
    assert_eq!(v4.len(), 19);
    assert!(v3.get(PrimitiveType::Date).is_none());
    assert!(v4.get(PrimitiveType::Date).is_some());
}

#[test]
fn test_primitive_codecs_keep_registration_order() {
    let names: Vec<String> = PrimitiveCodecs::build(4)
        .iter()
        .map(|codec| codec.cql_type().to_string())
        .collect();

    assert_eq!(names.first().map(String::as_str), Some("ascii"));
    assert_eq!(names.last().map(String::as_str), Some("tinyint"));
}

#[test]
fn test_all_primitives_include_gated_codecs() {
    let all = PrimitiveCodecs::all(3);
    assert_eq!(all.len(), 19);

    let date = all
        .iter()
        .find(|codec| *codec.cql_type() == primitive(PrimitiveType::Date))
        .unwrap();
    assert!(matches!(
        date.decode(None),
        Err(CodecError::ProtocolVersion { version: 3, min_version: 4, .. })
    ));
}

#[test]
fn test_aliases_share_layout() {
    let registry = CodecRegistry::new(4);
    let bigint = registry.codec_for(&primitive(PrimitiveType::BigInt)).unwrap();
    let counter = registry.codec_for(&primitive(PrimitiveType::Counter)).unwrap();
    let value = CqlValue::BigInt(42);

    assert_eq!(bigint.encode(&value).unwrap(), counter.encode(&value).unwrap());
}

// =============================================================================
// Collection Resolution
// =============================================================================

#[test]
fn test_resolve_list_of_int() {
    let registry = CodecRegistry::new(4);
    let list_type = DataType::list(primitive(PrimitiveType::Int));

    let codec = registry.resolve(&list_type).unwrap();

    assert_eq!(codec.cql_type(), &list_type);
    assert!(registry.contains(&list_type));
}

#[test]
fn test_resolve_is_idempotent() {
    let registry = CodecRegistry::new(4);
    let list_type = DataType::list(DataType::set(primitive(PrimitiveType::Uuid)));

    let first = registry.resolve(&list_type).unwrap();
    let second = registry.resolve(&list_type).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(registry.collection_builds(), 2);
}

#[test]
fn test_nested_resolution_caches_inner_collection() {
    let registry = CodecRegistry::new(4);
    let inner = DataType::list(primitive(PrimitiveType::Int));
    let outer = DataType::list(inner.clone());

    registry.resolve(&outer).unwrap();
    assert!(registry.contains(&inner));

    registry.resolve(&inner).unwrap();
    assert_eq!(registry.collection_builds(), 2);
}

#[test]
fn test_list_and_set_of_same_element_are_distinct() {
    let registry = CodecRegistry::new(4);
    let element = primitive(PrimitiveType::Varchar);

    let list = registry.resolve(&DataType::list(element.clone())).unwrap();
    let set = registry.resolve(&DataType::set(element)).unwrap();

    assert!(!Arc::ptr_eq(&list, &set));
    assert_eq!(registry.collection_builds(), 2);
}

#[test]
fn test_collection_of_unavailable_element_is_unresolvable() {
    let registry = CodecRegistry::new(3);
    let list_type = DataType::list(primitive(PrimitiveType::SmallInt));

    assert!(registry.resolve(&list_type).is_none());
    assert!(!registry.contains(&list_type));
    assert_eq!(registry.collection_builds(), 0);
}

#[test]
fn test_collection_of_map_is_unresolvable() {
    let registry = CodecRegistry::new(4);
    let map = DataType::map(primitive(PrimitiveType::Int), primitive(PrimitiveType::Int));

    assert!(registry.resolve(&DataType::set(map)).is_none());
}

// =============================================================================
// Unresolvable Descriptors
// =============================================================================

#[test]
fn test_unresolvable_types_resolve_to_none() {
    let registry = CodecRegistry::new(4);
    let before = registry.len();

    for cql_type in unresolvable_types() {
        assert!(registry.resolve(&cql_type).is_none(), "{}", cql_type);
    }
    // Misses are not cached
    assert_eq!(registry.len(), before);
}

#[test]
fn test_codec_for_reports_unsupported_type() {
    let registry = CodecRegistry::new(4);

    for cql_type in unresolvable_types() {
        match registry.codec_for(&cql_type) {
            Err(CodecError::UnsupportedType(reported)) => assert_eq!(reported, cql_type),
            other => panic!("Expected UnsupportedType for {}, got {:?}", cql_type, other),
        }
    }
}

// =============================================================================
// Registration
// =============================================================================

#[test]
fn test_register_replaces_existing_codec() {
    let registry = CodecRegistry::new(4);
    let int_type = primitive(PrimitiveType::Int);
    let original = registry.resolve(&int_type).unwrap();

    let replacement: SharedCodec = Arc::new(IntCodec::new(4));
    let previous = registry.register(Arc::clone(&replacement)).unwrap();

    assert!(Arc::ptr_eq(&previous, &original));
    assert!(Arc::ptr_eq(&registry.resolve(&int_type).unwrap(), &replacement));
}

#[test]
fn test_register_new_descriptor() {
    let registry = CodecRegistry::new(3);
    let list_type = DataType::list(primitive(PrimitiveType::Varchar));
    let element: SharedCodec = Arc::new(StringCodec::varchar(3));
    let list: SharedCodec = Arc::new(cqlwire::codec::CollectionCodec::list(element, 3));

    assert!(registry.register(Arc::clone(&list)).is_none());
    assert!(Arc::ptr_eq(&registry.resolve(&list_type).unwrap(), &list));
    assert_eq!(registry.collection_builds(), 0);
}

// =============================================================================
// Registry Cache
// =============================================================================

#[test]
fn test_cache_returns_same_registry_per_version() {
    let cache = RegistryCache::new();
    assert!(cache.is_empty());

    let first = cache.for_version(4);
    let second = cache.for_version(4);
    let other = cache.for_version(3);

    assert!(Arc::ptr_eq(&first, &second));
    assert!(!Arc::ptr_eq(&first, &other));
    assert_eq!(first.protocol_version(), 4);
    assert_eq!(other.protocol_version(), 3);
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_cached_registry_keeps_built_codecs() {
    let cache = RegistryCache::new();
    let list_type = DataType::list(primitive(PrimitiveType::Int));

    let built = cache.for_version(4).resolve(&list_type).unwrap();
    let again = cache.for_version(4).resolve(&list_type).unwrap();

    assert!(Arc::ptr_eq(&built, &again));
}

#[test]
fn test_global_for_version() {
    let first = cqlwire::for_version(5);
    let second = RegistryCache::global().for_version(5);

    assert!(Arc::ptr_eq(&first, &second));
}
