//! Registry Module
//!
//! Resolves type descriptors to codecs, one registry per protocol version.
//!
//! ## Responsibilities
//! - Build the primitive codec table for a version
//! - Cache descriptor → codec, building collection codecs on demand
//! - Hand out one shared registry per version for the process lifetime
//!
//! ## Resolution
//! ```text
//! resolve(list<set<int>>)
//!   ├─ cache hit?            → return cached codec
//!   ├─ resolve(set<int>)
//!   │    ├─ cache hit?       → return cached codec
//!   │    ├─ resolve(int)     → seeded primitive
//!   │    └─ build + cache set<int>
//!   └─ build + cache list<set<int>>
//! ```
//! Maps, tuples, user-defined and custom types never resolve.

mod cache;
mod primitives;
mod resolver;

use std::sync::Arc;

pub use cache::RegistryCache;
pub use primitives::PrimitiveCodecs;
pub use resolver::CodecRegistry;

use crate::types::ProtocolVersion;

/// Process-wide registry for `protocol_version`
pub fn for_version(protocol_version: ProtocolVersion) -> Arc<CodecRegistry> {
    RegistryCache::global().for_version(protocol_version)
}
