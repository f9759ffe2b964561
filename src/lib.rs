//! # cqlwire
//!
//! Binary value codecs for a Cassandra-style native protocol:
//! - Bit-exact encode/decode for every scalar CQL type
//! - Recursive list/set codecs over any element codec
//! - Protocol-version gating of type availability
//! - Per-version codec registries with at-most-once, lock-light resolution
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Caller (request handler)                    │
//! │         for_version(v).codec_for(&data_type)?               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    RegistryCache                            │
//! │             (one CodecRegistry per version)                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    CodecRegistry                            │
//! │     DataType → Codec   (DashMap, built on first use)        │
//! └──────────┬──────────────────────────────┬───────────────────┘
//!            │                              │
//!            ▼                              ▼
//!   ┌─────────────────┐            ┌─────────────────┐
//!   │ PrimitiveCodecs │◄───────────│ CollectionCodec │
//!   │ (seeded table)  │  element   │  (list / set)   │
//!   └────────┬────────┘            └────────┬────────┘
//!            │                              │
//!            └──────────────┬───────────────┘
//!                           ▼
//!                   ┌───────────────┐
//!                   │    framing    │
//!                   └───────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod types;
pub mod codec;
pub mod registry;
pub mod json;
pub mod cli;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CodecError, Result};
pub use config::Config;
pub use codec::{Codec, SharedCodec};
pub use registry::{for_version, CodecRegistry, RegistryCache};
pub use types::{CqlDate, CqlValue, DataType, PrimitiveType, ProtocolVersion};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of cqlwire
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
