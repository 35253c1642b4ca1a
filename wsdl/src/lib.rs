//! Resolves a WSDL document and the XML schemas it embeds, imports and includes into a
//! flat map of type descriptors and a list of operation descriptors.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod loader;
pub mod model;
pub mod namespace;
pub mod query;
pub mod session;

mod context;
mod documents;
mod operations;
mod types;
mod walker;

pub use config::{ResolverConfig, SoapVersion};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use error::{ConfigError, LoadError, NamespaceError, ResolveError};
pub use loader::{DocumentLoader, LoadOutcome, Location};
pub use model::{
    OperationDescriptor, Parameter, PropertyDescriptor, QualifiedKey, ResolvedType,
    TypeDescriptor, TypeMap, TypeReference,
};
pub use namespace::{NamespaceResolver, NamespaceStyle};
pub use session::{Resolution, Session};

pub use dt_builtins::ScalarKind;

/// Resolves `location` in a fresh session.
pub fn resolve(location: &str, config: ResolverConfig) -> Result<Resolution, LoadError> {
    let mut session = Session::new(config);
    session.resolve(location)?;
    Ok(session.finish())
}
