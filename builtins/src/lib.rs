use std::fmt;

use serde::{Deserialize, Serialize};

/// The XML Schema namespace (pt. 1, §1.3.1)
pub const XS_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// Target scalar kinds the built-in datatypes collapse into.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    String,
    Integer,
    Float,
    Boolean,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Integer => "int",
            Self::Float => "float",
            Self::Boolean => "bool",
        };
        f.write_str(name)
    }
}

/// Built-in datatypes (pt. 2, §3) grouped by the scalar kind they map to.
pub const STRING_TYPES: &[&str] = &[
    "string",
    "duration",
    "dateTime",
    "time",
    "date",
    "gYearMonth",
    "gYear",
    "gMonthDay",
    "gDay",
    "gMonth",
    "hexBinary",
    "base64Binary",
    "anyURI",
    "QName",
    "NOTATION",
    "normalizedString",
    "token",
    "language",
    "IDREFS",
    "ENTITIES",
    "NMTOKEN",
    "NMTOKENS",
    "Name",
    "NCName",
    "ID",
    "IDREF",
    "ENTITY",
    "yearMonthDuration",
    "dayTimeDuration",
    "dateTimeStamp",
];

pub const INTEGER_TYPES: &[&str] = &[
    "integer",
    "nonPositiveInteger",
    "negativeInteger",
    "long",
    "int",
    "short",
    "byte",
    "nonNegativeInteger",
    "unsignedLong",
    "unsignedInt",
    "unsignedShort",
    "unsignedByte",
    "positiveInteger",
];

pub const FLOAT_TYPES: &[&str] = &["float", "double", "decimal"];

pub const BOOLEAN_TYPES: &[&str] = &["boolean"];

/// Looks up the scalar kind of a built-in datatype by its local name.
///
/// Returns `None` for names outside the fixed table, including the special types
/// `anyType`, `anySimpleType` and `anyAtomicType`.
pub fn scalar_kind(local_name: &str) -> Option<ScalarKind> {
    if STRING_TYPES.contains(&local_name) {
        Some(ScalarKind::String)
    } else if INTEGER_TYPES.contains(&local_name) {
        Some(ScalarKind::Integer)
    } else if FLOAT_TYPES.contains(&local_name) {
        Some(ScalarKind::Float)
    } else if BOOLEAN_TYPES.contains(&local_name) {
        Some(ScalarKind::Boolean)
    } else {
        None
    }
}
