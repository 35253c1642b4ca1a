use std::{collections::BTreeMap, fmt};

use dt_builtins::ScalarKind;
use serde::{Serialize, Serializer};

/// Session-wide identity of a declaration: the namespace URI plus the local name.
///
/// Declarations and references use the same key, so a reference resolves by plain map
/// lookup regardless of which document declared the target.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct QualifiedKey {
    pub namespace: String,
    pub name: String,
}

impl QualifiedKey {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for QualifiedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{{{}}}{}", self.namespace, self.name)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "lowercase")]
pub enum ResolvedType {
    Scalar(ScalarKind),
    Reference(QualifiedKey),
    Array(Box<ResolvedType>),
}

impl ResolvedType {
    pub fn array_of(self) -> Self {
        Self::Array(Box::new(self))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// The type with all array layers removed.
    pub fn item(&self) -> &ResolvedType {
        match self {
            Self::Array(inner) => inner.item(),
            other => other,
        }
    }

    /// The referenced declaration, looking through arrays.
    pub fn reference(&self) -> Option<&QualifiedKey> {
        match self.item() {
            Self::Reference(key) => Some(key),
            _ => None,
        }
    }
}

impl From<ScalarKind> for ResolvedType {
    fn from(kind: ScalarKind) -> Self {
        Self::Scalar(kind)
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => write!(f, "{kind}"),
            Self::Reference(key) => write!(f, "{key}"),
            Self::Array(inner) => write!(f, "array<{inner}>"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PropertyDescriptor {
    pub name: String,
    pub resolved_type: ResolvedType,
    /// The schema type name as written in the document (`xs:string`, `tns:Address`).
    pub source_schema_type: String,
    pub nullable: bool,
    pub restrictions: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
}

impl PropertyDescriptor {
    pub fn new(
        name: impl Into<String>,
        resolved_type: ResolvedType,
        source_schema_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            resolved_type,
            source_schema_type: source_schema_type.into(),
            nullable: false,
            restrictions: BTreeMap::new(),
            enum_values: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
    pub key: QualifiedKey,
    pub source_location: String,
    /// Hierarchical namespace path derived from `key.namespace`; empty for flat output.
    pub namespace: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<QualifiedKey>,
    pub properties: Vec<PropertyDescriptor>,
}

impl TypeDescriptor {
    pub fn new(
        key: QualifiedKey,
        namespace: impl Into<String>,
        source_location: impl Into<String>,
    ) -> Self {
        Self {
            name: key.name.clone(),
            key,
            source_location: source_location.into(),
            namespace: namespace.into(),
            documentation: None,
            parent: None,
            properties: Vec::new(),
        }
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Folds a later declaration of the same key into this one.
    ///
    /// Single-valued fields take the newer value unless it is empty; properties are
    /// appended after the existing ones.
    pub fn merge(&mut self, newer: TypeDescriptor) {
        if !newer.source_location.is_empty() {
            self.source_location = newer.source_location;
        }
        if !newer.namespace.is_empty() {
            self.namespace = newer.namespace;
        }
        if newer.documentation.is_some() {
            self.documentation = newer.documentation;
        }
        if newer.parent.is_some() {
            self.parent = newer.parent;
        }
        self.properties.extend(newer.properties);
    }
}

/// Resolved declarations, ordered by key.
pub type TypeMap = BTreeMap<QualifiedKey, TypeDescriptor>;

pub(crate) fn serialize_type_map<S: Serializer>(
    types: &TypeMap,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(types.values())
}

/// A type as seen from an operation: its key and the name a generator would emit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TypeReference {
    pub key: QualifiedKey,
    pub qualified_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub resolved_type: ResolvedType,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OperationDescriptor {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub wrapper_type: TypeReference,
    pub return_type: TypeReference,
}

impl OperationDescriptor {
    pub fn parameter(&self, name: &str) -> Option<&ResolvedType> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.resolved_type)
    }

    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|p| p.name.as_str())
    }
}
