//! Command execution for `cqlwire-cli`
//!
//! The binary parses arguments and sets up logging; everything a command
//! does lives here so it returns its output instead of printing it.

use bytes::Bytes;
use clap::Subcommand;

use crate::codec::SharedCodec;
use crate::config::Config;
use crate::error::{CodecError, Result};
use crate::json;
use crate::registry::{self, CodecRegistry, PrimitiveCodecs};
use crate::types::DataType;

/// Output printed for an absent value
pub const NULL_OUTPUT: &str = "null";

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Encode a JSON value, print the bytes as hex
    Encode {
        /// CQL type, e.g. "list<int>"
        #[arg(short = 't', long = "type")]
        cql_type: String,

        /// Value as JSON, e.g. "[1, 2, 3]"
        value: String,
    },

    /// Decode hex bytes, print the value as JSON
    Decode {
        /// CQL type, e.g. "set<text>"
        #[arg(short = 't', long = "type")]
        cql_type: String,

        /// Hex bytes, or "null" for a null buffer
        encoded: String,
    },

    /// List the primitive types available at the protocol version
    Types,
}

/// Run one command against the process-wide registry for the configured version
pub fn run(config: &Config, command: Commands) -> Result<String> {
    let registry = registry::for_version(config.protocol_version);

    match command {
        Commands::Encode { cql_type, value } => {
            let Some(codec) = lookup(&registry, &cql_type, config)? else {
                return Ok(NULL_OUTPUT.to_string());
            };
            let tree: serde_json::Value = serde_json::from_str(&value)
                .map_err(|e| CodecError::Json(format!("Invalid JSON '{}': {}", value, e)))?;
            let value = json::from_json(codec.cql_type(), &tree)?;
            Ok(match codec.encode(&value)? {
                Some(bytes) => hex::encode(bytes),
                None => NULL_OUTPUT.to_string(),
            })
        }
        Commands::Decode { cql_type, encoded } => {
            let Some(codec) = lookup(&registry, &cql_type, config)? else {
                return Ok(NULL_OUTPUT.to_string());
            };
            let input = if encoded == NULL_OUTPUT {
                None
            } else {
                let digits = encoded.strip_prefix("0x").unwrap_or(&encoded);
                let raw = hex::decode(digits)
                    .map_err(|e| CodecError::InvalidEncoding(format!("Invalid hex input: {}", e)))?;
                Some(Bytes::from(raw))
            };
            let value = codec.decode(input)?;
            Ok(json::to_json(&value).to_string())
        }
        Commands::Types => {
            let lines: Vec<String> = PrimitiveCodecs::build(config.protocol_version)
                .iter()
                .map(|codec| {
                    format!(
                        "{:<10} 0x{:04x}  since v{}",
                        codec.cql_type().to_string(),
                        codec.cql_type().id(),
                        codec.min_protocol_version().max(1)
                    )
                })
                .collect();
            Ok(lines.join("\n"))
        }
    }
}

/// Resolve a type expression; unresolvable types degrade to `None` unless strict
pub fn lookup(
    registry: &CodecRegistry,
    expression: &str,
    config: &Config,
) -> Result<Option<SharedCodec>> {
    let cql_type: DataType = expression.parse()?;
    if config.strict_resolution {
        return registry.codec_for(&cql_type).map(Some);
    }
    Ok(registry.resolve(&cql_type))
}
