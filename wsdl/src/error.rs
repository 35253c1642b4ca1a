use thiserror::Error;

use crate::model::QualifiedKey;

/// Failure to bring a document into the session.
///
/// Fatal for the root document; for an imported document it only ends that branch and
/// is recorded as a diagnostic.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid document location {0:?}")]
    InvalidLocation(String),
    #[error("failed to read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to fetch {location}: {source}")]
    Http {
        location: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to parse {location}: {source}")]
    Xml {
        location: String,
        #[source]
        source: roxmltree::Error,
    },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum NamespaceError {
    #[error("Failed to resolve prefix {0:?} to a namespace URI")]
    PrefixNotResolved(String),
}

/// Failure to resolve a single WSDL operation. The session records it and moves on.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("<{element}> is missing the '{attribute}' attribute")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
    #[error("operation '{operation}' has no {direction} message")]
    MissingMessage {
        operation: String,
        direction: &'static str,
    },
    #[error("message '{0}' is not declared in any loaded WSDL document")]
    UnknownMessage(QualifiedKey),
    #[error("message '{0}' has no part")]
    MissingPart(QualifiedKey),
    #[error("the part of message '{0}' does not reference an element; only document-literal wrapped messages are supported")]
    PartWithoutElement(QualifiedKey),
    #[error("type '{0}' is not present in the type map")]
    UnknownType(QualifiedKey),
    #[error("inheritance cycle through type '{0}'")]
    InheritanceCycle(QualifiedKey),
    #[error(transparent)]
    Namespace(#[from] NamespaceError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration file {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
