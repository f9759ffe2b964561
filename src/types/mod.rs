//! Types Module
//!
//! Type descriptors and the dynamic value model.
//!
//! ## Responsibilities
//! - Describe wire types as immutable, structurally comparable values
//! - Map primitive kinds to native protocol type ids
//! - Parse and print CQL type expressions (`list<set<int>>`)
//! - Carry decoded values between codecs and callers
//!
//! ## Type Ids (native protocol `[option]`)
//! ```text
//! 0x0001 ascii    0x0008 float      0x000F timeuuid   0x0020 list
//! 0x0002 bigint   0x0009 int        0x0010 inet       0x0021 map
//! 0x0003 blob     0x000B timestamp  0x0011 date       0x0022 set
//! 0x0004 boolean  0x000C uuid       0x0012 time       0x0030 udt
//! 0x0005 counter  0x000D varchar    0x0013 smallint   0x0031 tuple
//! 0x0006 decimal  0x000E varint     0x0014 tinyint    0x0000 custom
//! 0x0007 double
//! ```

mod parse;
mod value;

use std::fmt;

pub use value::{CqlDate, CqlValue};

/// Native protocol version number
pub type ProtocolVersion = u8;

/// Protocol type id of a list descriptor
pub const LIST_TYPE_ID: u16 = 0x0020;
/// Protocol type id of a map descriptor
pub const MAP_TYPE_ID: u16 = 0x0021;
/// Protocol type id of a set descriptor
pub const SET_TYPE_ID: u16 = 0x0022;
/// Protocol type id of a user-defined type descriptor
pub const UDT_TYPE_ID: u16 = 0x0030;
/// Protocol type id of a tuple descriptor
pub const TUPLE_TYPE_ID: u16 = 0x0031;
/// Protocol type id of a custom (class-named) descriptor
pub const CUSTOM_TYPE_ID: u16 = 0x0000;

/// Scalar CQL types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveType {
    Ascii,
    BigInt,
    Blob,
    Boolean,
    Counter,
    Decimal,
    Double,
    Float,
    Int,
    Timestamp,
    Uuid,
    Varchar,
    Varint,
    TimeUuid,
    Inet,
    Date,
    Time,
    SmallInt,
    TinyInt,
}

impl PrimitiveType {
    /// Every primitive kind, in registration order
    pub const ALL: [PrimitiveType; 19] = [
        PrimitiveType::Ascii,
        PrimitiveType::BigInt,
        PrimitiveType::Blob,
        PrimitiveType::Boolean,
        PrimitiveType::Counter,
        PrimitiveType::Decimal,
        PrimitiveType::Double,
        PrimitiveType::Float,
        PrimitiveType::Int,
        PrimitiveType::Timestamp,
        PrimitiveType::Uuid,
        PrimitiveType::Varchar,
        PrimitiveType::Varint,
        PrimitiveType::TimeUuid,
        PrimitiveType::Inet,
        PrimitiveType::Date,
        PrimitiveType::Time,
        PrimitiveType::SmallInt,
        PrimitiveType::TinyInt,
    ];

    /// Native protocol type id
    pub fn id(self) -> u16 {
        match self {
            PrimitiveType::Ascii => 0x0001,
            PrimitiveType::BigInt => 0x0002,
            PrimitiveType::Blob => 0x0003,
            PrimitiveType::Boolean => 0x0004,
            PrimitiveType::Counter => 0x0005,
            PrimitiveType::Decimal => 0x0006,
            PrimitiveType::Double => 0x0007,
            PrimitiveType::Float => 0x0008,
            PrimitiveType::Int => 0x0009,
            PrimitiveType::Timestamp => 0x000B,
            PrimitiveType::Uuid => 0x000C,
            PrimitiveType::Varchar => 0x000D,
            PrimitiveType::Varint => 0x000E,
            PrimitiveType::TimeUuid => 0x000F,
            PrimitiveType::Inet => 0x0010,
            PrimitiveType::Date => 0x0011,
            PrimitiveType::Time => 0x0012,
            PrimitiveType::SmallInt => 0x0013,
            PrimitiveType::TinyInt => 0x0014,
        }
    }

    /// Look up a primitive kind by its protocol type id
    pub fn from_id(id: u16) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.id() == id)
    }

    /// CQL name of the type
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Ascii => "ascii",
            PrimitiveType::BigInt => "bigint",
            PrimitiveType::Blob => "blob",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Counter => "counter",
            PrimitiveType::Decimal => "decimal",
            PrimitiveType::Double => "double",
            PrimitiveType::Float => "float",
            PrimitiveType::Int => "int",
            PrimitiveType::Timestamp => "timestamp",
            PrimitiveType::Uuid => "uuid",
            PrimitiveType::Varchar => "varchar",
            PrimitiveType::Varint => "varint",
            PrimitiveType::TimeUuid => "timeuuid",
            PrimitiveType::Inet => "inet",
            PrimitiveType::Date => "date",
            PrimitiveType::Time => "time",
            PrimitiveType::SmallInt => "smallint",
            PrimitiveType::TinyInt => "tinyint",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type descriptor for a wire type
///
/// Descriptors are plain values: two descriptors are equal iff they have
/// the same shape all the way down. They double as codec cache keys.
///
/// Only primitives, lists and sets have codecs. The remaining composite
/// kinds exist so that any descriptor the protocol metadata can produce is
/// representable; they always resolve to "unresolvable".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    Primitive(PrimitiveType),
    List(Box<DataType>),
    Set(Box<DataType>),
    Map(Box<DataType>, Box<DataType>),
    Tuple(Vec<DataType>),
    Udt {
        keyspace: String,
        name: String,
        fields: Vec<(String, DataType)>,
    },
    Custom(String),
}

impl DataType {
    pub fn list(element: DataType) -> Self {
        DataType::List(Box::new(element))
    }

    pub fn set(element: DataType) -> Self {
        DataType::Set(Box::new(element))
    }

    pub fn map(key: DataType, value: DataType) -> Self {
        DataType::Map(Box::new(key), Box::new(value))
    }

    /// Native protocol type id of the outermost kind
    pub fn id(&self) -> u16 {
        match self {
            DataType::Primitive(kind) => kind.id(),
            DataType::List(_) => LIST_TYPE_ID,
            DataType::Set(_) => SET_TYPE_ID,
            DataType::Map(..) => MAP_TYPE_ID,
            DataType::Tuple(_) => TUPLE_TYPE_ID,
            DataType::Udt { .. } => UDT_TYPE_ID,
            DataType::Custom(_) => CUSTOM_TYPE_ID,
        }
    }

    /// Element type of a list or set
    pub fn element_type(&self) -> Option<&DataType> {
        match self {
            DataType::List(element) | DataType::Set(element) => Some(element),
            _ => None,
        }
    }

    pub fn is_collection(&self) -> bool {
        self.element_type().is_some()
    }
}

impl From<PrimitiveType> for DataType {
    fn from(kind: PrimitiveType) -> Self {
        DataType::Primitive(kind)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Primitive(kind) => write!(f, "{}", kind),
            DataType::List(element) => write!(f, "list<{}>", element),
            DataType::Set(element) => write!(f, "set<{}>", element),
            DataType::Map(key, value) => write!(f, "map<{}, {}>", key, value),
            DataType::Tuple(components) => {
                f.write_str("tuple<")?;
                for (i, component) in components.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", component)?;
                }
                f.write_str(">")
            }
            DataType::Udt { keyspace, name, .. } => write!(f, "{}.{}", keyspace, name),
            DataType::Custom(class_name) => write!(f, "'{}'", class_name),
        }
    }
}
