//! Per-version codec registry
//!
//! Maps type descriptors to codecs. Primitives are seeded at construction;
//! collection codecs are built on first request and cached.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, warn};

use super::PrimitiveCodecs;
use crate::codec::{CollectionCodec, CollectionKind, SharedCodec};
use crate::error::{CodecError, Result};
use crate::types::{DataType, ProtocolVersion};

/// Codec cache for one protocol version
///
/// ## Concurrency
/// The cache is a sharded `DashMap`: hits take a shard read lock only,
/// misses on keys in different shards do not contend.
///
/// A collection miss resolves its element type first with no lock held,
/// then builds the collection codec inside `entry().or_insert_with`. The
/// shard write lock is held only for that non-recursive build, so each
/// descriptor is built at most once and nesting depth never holds more
/// than one lock.
#[derive(Debug)]
pub struct CodecRegistry {
    protocol_version: ProtocolVersion,
    codecs: DashMap<DataType, SharedCodec>,
    /// Collection codecs built so far
    collection_builds: AtomicUsize,
}

impl CodecRegistry {
    /// Create a registry seeded with the primitives available at `protocol_version`
    pub fn new(protocol_version: ProtocolVersion) -> Self {
        Self::with_primitives(PrimitiveCodecs::build(protocol_version))
    }

    /// Create a registry from an already-built primitive table
    pub fn with_primitives(primitives: PrimitiveCodecs) -> Self {
        let protocol_version = primitives.protocol_version();
        let codecs = DashMap::with_capacity(primitives.len());
        for codec in primitives {
            codecs.insert(codec.cql_type().clone(), codec);
        }

        debug!(
            protocol_version,
            primitives = codecs.len(),
            "Codec registry created"
        );

        Self {
            protocol_version,
            codecs,
            collection_builds: AtomicUsize::new(0),
        }
    }

    pub fn protocol_version(&self) -> ProtocolVersion {
        self.protocol_version
    }

    /// Register a codec under its own descriptor
    ///
    /// Replaces and returns any codec previously stored for that descriptor.
    pub fn register(&self, codec: SharedCodec) -> Option<SharedCodec> {
        self.codecs.insert(codec.cql_type().clone(), codec)
    }

    /// Resolve the codec for `cql_type`
    ///
    /// Returns `None` when no codec exists for the descriptor: primitives
    /// unavailable at this version, maps, tuples, user-defined and custom
    /// types. Callers must treat `None` as a usage error.
    pub fn resolve(&self, cql_type: &DataType) -> Option<SharedCodec> {
        if let Some(codec) = self.cached(cql_type) {
            return Some(codec);
        }

        let kind = match cql_type {
            DataType::List(_) => CollectionKind::List,
            DataType::Set(_) => CollectionKind::Set,
            _ => {
                warn!(
                    protocol_version = self.protocol_version,
                    %cql_type,
                    "Could not resolve codec, returning none"
                );
                return None;
            }
        };

        // Resolved before touching this key's entry, no lock held.
        let element_type = cql_type.element_type()?;
        let element = self.resolve(element_type)?;

        let codec = self
            .codecs
            .entry(cql_type.clone())
            .or_insert_with(|| {
                self.collection_builds.fetch_add(1, Ordering::Relaxed);
                debug!(
                    protocol_version = self.protocol_version,
                    %cql_type,
                    "Built collection codec"
                );
                Arc::new(CollectionCodec::new(kind, element, self.protocol_version))
            })
            .value()
            .clone();

        Some(codec)
    }

    /// Resolve the codec for `cql_type`, failing with `UnsupportedType`
    pub fn codec_for(&self, cql_type: &DataType) -> Result<SharedCodec> {
        self.resolve(cql_type)
            .ok_or_else(|| CodecError::UnsupportedType(cql_type.clone()))
    }

    /// True if a codec is already cached for `cql_type`
    pub fn contains(&self, cql_type: &DataType) -> bool {
        self.codecs.contains_key(cql_type)
    }

    /// Number of cached codecs
    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }

    /// Number of collection codecs this registry has built
    pub fn collection_builds(&self) -> usize {
        self.collection_builds.load(Ordering::Relaxed)
    }

    fn cached(&self, cql_type: &DataType) -> Option<SharedCodec> {
        self.codecs.get(cql_type).map(|entry| Arc::clone(entry.value()))
    }
}
