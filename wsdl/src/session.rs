use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::{
    config::{ResolverConfig, SoapVersion},
    context::ResolveContext,
    diagnostics::{Diagnostic, DiagnosticKind, Diagnostics},
    documents::{self, DocumentSet, ParsedDocument},
    error::LoadError,
    loader::{DocumentId, DocumentLoader, LoadOutcome, Location},
    model::{OperationDescriptor, TypeMap},
    namespace::NamespaceResolver,
    operations::OperationResolver,
    walker::SchemaWalker,
};

/// Everything a resolution produced, handed to a generator by value.
#[derive(Debug, Serialize)]
pub struct Resolution {
    pub soap_version: SoapVersion,
    #[serde(serialize_with = "crate::model::serialize_type_map")]
    pub types: TypeMap,
    pub operations: Vec<OperationDescriptor>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Resolution {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// One resolution session: the loaded-document set, the type map, the resolved
/// operations and the diagnostics collected along the way.
///
/// Documents are loaded at most once, so resolving the same location again is a no-op.
pub struct Session {
    config: ResolverConfig,
    namespaces: NamespaceResolver,
    loader: DocumentLoader,
    inherited_namespaces: HashMap<DocumentId, String>,
    types: TypeMap,
    operations: Vec<OperationDescriptor>,
    diagnostics: Diagnostics,
}

impl Session {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            namespaces: NamespaceResolver::from_config(&config),
            loader: DocumentLoader::new(config.allow_dtd),
            config,
            inherited_namespaces: HashMap::new(),
            types: TypeMap::new(),
            operations: Vec::new(),
            diagnostics: Diagnostics::default(),
        }
    }

    /// Loads `location` with everything it imports or includes and merges the result into
    /// the session.
    ///
    /// Only a failure to load `location` itself is an error; problems further down are
    /// recorded as diagnostics.
    pub fn resolve(&mut self, location: &str) -> Result<LoadOutcome, LoadError> {
        let root = Location::parse(location)?;
        let outcome = self.loader.load(&root)?;
        let LoadOutcome::Loaded(root_id) = outcome else {
            return Ok(outcome);
        };

        let mut order = Vec::new();
        self.load_references(root_id, &mut order);
        debug!(
            "{} new document(s) reachable from {location}, using SOAP binding namespace {}",
            order.len(),
            self.config.soap_version.binding_namespace()
        );
        self.walk(&order);
        Ok(outcome)
    }

    /// Depth-first over imports; `order` receives each document after the documents it
    /// references.
    fn load_references(&mut self, id: DocumentId, order: &mut Vec<DocumentId>) {
        let document = self.loader.document(id);
        let base = document.location.clone();
        let references = match document.parse(self.loader.parsing_options()) {
            Ok(parsed) => documents::document_references(&parsed),
            Err(error) => {
                self.diagnostics.record(
                    DiagnosticKind::LoadError,
                    error.to_string(),
                    base.to_string(),
                    0,
                );
                Vec::new()
            }
        };

        for reference in references {
            let loaded = base
                .join(&reference.location)
                .and_then(|location| self.loader.load(&location));
            match loaded {
                Ok(LoadOutcome::Loaded(child)) => {
                    if let Some(namespace) = reference.include_namespace {
                        self.inherited_namespaces.insert(child, namespace);
                    }
                    self.load_references(child, order);
                }
                Ok(LoadOutcome::AlreadyLoaded) => {}
                Err(error) => self.diagnostics.record(
                    DiagnosticKind::LoadError,
                    error.to_string(),
                    base.to_string(),
                    reference.line,
                ),
            }
        }
        order.push(id);
    }

    fn walk(&mut self, order: &[DocumentId]) {
        let options = self.loader.parsing_options();
        // every loaded document stays visible so references into earlier passes resolve
        let parsed: Vec<ParsedDocument> = self
            .loader
            .documents()
            .iter()
            .filter_map(|loaded| {
                let document = loaded.parse(options).ok()?;
                Some(ParsedDocument {
                    id: loaded.id,
                    location: loaded.location.to_string(),
                    inherited_namespace: self.inherited_namespaces.get(&loaded.id).cloned(),
                    document,
                })
            })
            .collect();
        let documents = DocumentSet::new(&parsed);

        {
            let context = ResolveContext::new(
                &self.config,
                &self.namespaces,
                &documents,
                &mut self.diagnostics,
            );
            let mut walker = SchemaWalker::new(context, &mut self.types);
            walker.walk(order);
            walker.check_references();
        }

        let operations = OperationResolver::new(&self.namespaces, &documents, &self.types)
            .resolve_all(order, &mut self.diagnostics);
        self.operations.extend(operations);
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn namespaces(&self) -> &NamespaceResolver {
        &self.namespaces
    }

    pub fn types(&self) -> &TypeMap {
        &self.types
    }

    pub fn operations(&self) -> &[OperationDescriptor] {
        &self.operations
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn finish(self) -> Resolution {
        info!(
            types = self.types.len(),
            operations = self.operations.len(),
            diagnostics = self.diagnostics.len(),
            "resolution finished"
        );
        Resolution {
            soap_version: self.config.soap_version,
            types: self.types,
            operations: self.operations,
            diagnostics: self.diagnostics.into_vec(),
        }
    }
}
