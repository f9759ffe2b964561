//! Registry cache
//!
//! One `CodecRegistry` per protocol version, created on first request and
//! kept for the life of the cache.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use super::CodecRegistry;
use crate::types::ProtocolVersion;

static GLOBAL: Lazy<RegistryCache> = Lazy::new(RegistryCache::new);

/// Version-keyed get-or-create cache of registries
///
/// The process-wide instance is `RegistryCache::global()`. Tests build
/// their own with `RegistryCache::new()` to stay isolated.
#[derive(Debug, Default)]
pub struct RegistryCache {
    registries: RwLock<HashMap<ProtocolVersion, Arc<CodecRegistry>>>,
}

impl RegistryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache
    pub fn global() -> &'static RegistryCache {
        &GLOBAL
    }

    /// Registry for `protocol_version`, created on the first call
    pub fn for_version(&self, protocol_version: ProtocolVersion) -> Arc<CodecRegistry> {
        if let Some(registry) = self.registries.read().get(&protocol_version) {
            return Arc::clone(registry);
        }

        let mut registries = self.registries.write();
        Arc::clone(
            registries
                .entry(protocol_version)
                .or_insert_with(|| Arc::new(CodecRegistry::new(protocol_version))),
        )
    }

    /// Number of registries created so far
    pub fn len(&self) -> usize {
        self.registries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.registries.read().is_empty()
    }
}
