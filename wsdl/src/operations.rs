use std::collections::HashSet;

use roxmltree::Node;

use crate::{
    diagnostics::{DiagnosticKind, Diagnostics},
    documents::{Definitions, DocumentSet},
    error::ResolveError,
    loader::DocumentId,
    model::{OperationDescriptor, Parameter, QualifiedKey, TypeDescriptor, TypeMap, TypeReference},
    namespace::NamespaceResolver,
    query::{self, WSDL_NAMESPACE},
};

/// Resolves `portType` operations of document-literal wrapped services against the type map.
pub(crate) struct OperationResolver<'s, 'a, 'input> {
    namespaces: &'s NamespaceResolver,
    documents: &'s DocumentSet<'a, 'input>,
    types: &'s TypeMap,
}

impl<'s, 'a, 'input: 'a> OperationResolver<'s, 'a, 'input> {
    pub fn new(
        namespaces: &'s NamespaceResolver,
        documents: &'s DocumentSet<'a, 'input>,
        types: &'s TypeMap,
    ) -> Self {
        Self {
            namespaces,
            documents,
            types,
        }
    }

    /// Resolves every operation of every `portType` in `documents`. Operations that fail
    /// are recorded in `diagnostics` and left out.
    pub fn resolve_all(
        &self,
        documents: &[DocumentId],
        diagnostics: &mut Diagnostics,
    ) -> Vec<OperationDescriptor> {
        let mut operations = Vec::new();
        for definitions in self.documents.definitions_of(documents) {
            for port_type in query::children(definitions.node, WSDL_NAMESPACE, "portType") {
                for operation in query::children(port_type, WSDL_NAMESPACE, "operation") {
                    match self.resolve(operation, definitions) {
                        Ok(descriptor) => operations.push(descriptor),
                        Err(error) => diagnostics.record(
                            DiagnosticKind::UnresolvableReference,
                            error.to_string(),
                            definitions.location.as_str(),
                            query::line_of(operation),
                        ),
                    }
                }
            }
        }
        operations
    }

    pub fn resolve(
        &self,
        operation: Node,
        definitions: &Definitions,
    ) -> Result<OperationDescriptor, ResolveError> {
        let name = operation
            .attribute("name")
            .ok_or(ResolveError::MissingAttribute {
                element: "operation",
                attribute: "name",
            })?;

        let input = self.message_type(operation, definitions, name, "input")?;
        let output = self.message_type(operation, definitions, name, "output")?;

        Ok(OperationDescriptor {
            name: name.to_string(),
            parameters: self.flatten_parameters(input)?,
            wrapper_type: self.type_reference(input),
            return_type: self.type_reference(output),
        })
    }

    /// The descriptor of the element carried by the `direction` message's part.
    fn message_type(
        &self,
        operation: Node,
        definitions: &Definitions,
        operation_name: &str,
        direction: &'static str,
    ) -> Result<&'s TypeDescriptor, ResolveError> {
        let missing = || ResolveError::MissingMessage {
            operation: operation_name.to_string(),
            direction,
        };
        let reference =
            query::first_child(operation, WSDL_NAMESPACE, direction).ok_or_else(missing)?;
        let message_name = reference.attribute("message").ok_or_else(missing)?;

        let message_key =
            self.namespaces
                .expand(message_name, reference, &definitions.target_namespace)?;
        let (message_definitions, message) = self
            .documents
            .find_message(&message_key)
            .ok_or_else(|| ResolveError::UnknownMessage(message_key.clone()))?;

        let part = query::first_child(message, WSDL_NAMESPACE, "part")
            .ok_or_else(|| ResolveError::MissingPart(message_key.clone()))?;
        let element = part
            .attribute("element")
            .ok_or_else(|| ResolveError::PartWithoutElement(message_key.clone()))?;
        let element_key =
            self.namespaces
                .expand(element, part, &message_definitions.target_namespace)?;

        self.types
            .get(&element_key)
            .ok_or(ResolveError::UnknownType(element_key))
    }

    /// Own properties first, then each ancestor's; a name already seen is not repeated.
    fn flatten_parameters(&self, input: &TypeDescriptor) -> Result<Vec<Parameter>, ResolveError> {
        let mut parameters: Vec<Parameter> = Vec::new();
        let mut visited: HashSet<&QualifiedKey> = HashSet::new();
        let mut current = Some(input);

        while let Some(descriptor) = current {
            if !visited.insert(&descriptor.key) {
                return Err(ResolveError::InheritanceCycle(descriptor.key.clone()));
            }
            for property in &descriptor.properties {
                if parameters.iter().all(|p| p.name != property.name) {
                    parameters.push(Parameter {
                        name: property.name.clone(),
                        resolved_type: property.resolved_type.clone(),
                    });
                }
            }
            current = match &descriptor.parent {
                Some(parent) => Some(
                    self.types
                        .get(parent)
                        .ok_or_else(|| ResolveError::UnknownType(parent.clone()))?,
                ),
                None => None,
            };
        }
        Ok(parameters)
    }

    fn type_reference(&self, descriptor: &TypeDescriptor) -> TypeReference {
        TypeReference {
            key: descriptor.key.clone(),
            qualified_name: self.namespaces.qualified_name(&descriptor.key),
        }
    }
}
