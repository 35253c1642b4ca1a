use std::collections::{btree_map::Entry, HashSet};

use roxmltree::Node;
use tracing::debug;

use crate::{
    context::{ResolveContext, TypeName},
    diagnostics::DiagnosticKind,
    documents::Schema,
    loader::DocumentId,
    model::{QualifiedKey, TypeDescriptor, TypeMap},
    query::{self, XS_NAMESPACE},
    types,
};

/// Merges the top-level declarations of newly loaded schemas into the session's type map.
pub(crate) struct SchemaWalker<'s, 'a, 'input> {
    context: ResolveContext<'s, 'a, 'input>,
    types: &'s mut TypeMap,
    inserted: Vec<QualifiedKey>,
}

impl<'s, 'a, 'input: 'a> SchemaWalker<'s, 'a, 'input> {
    pub fn new(context: ResolveContext<'s, 'a, 'input>, types: &'s mut TypeMap) -> Self {
        Self {
            context,
            types,
            inserted: Vec::new(),
        }
    }

    /// Walks the schemas of `documents` in order: elements, then complex types, then
    /// simple types of each schema.
    pub fn walk(&mut self, documents: &[DocumentId]) {
        let set = self.context.documents;
        for schema in set.schemas_of(documents) {
            self.walk_schema(schema);
        }
    }

    fn walk_schema(&mut self, schema: &Schema) {
        debug!(
            "walking schema {:?} in {}",
            schema.target_namespace, schema.location
        );

        for element in query::children(schema.node, XS_NAMESPACE, "element") {
            if let Some(descriptor) = self.map_element(element, schema) {
                self.insert(descriptor, element, schema);
            }
        }
        for tag in ["complexType", "simpleType"] {
            for node in query::children(schema.node, XS_NAMESPACE, tag) {
                let Some(name) = node.attribute("name") else {
                    continue;
                };
                let descriptor =
                    TypeDescriptor::map_from_xml(&mut self.context, node, schema, name);
                self.insert(descriptor, node, schema);
            }
        }
    }

    fn map_element(&mut self, element: Node, schema: &Schema) -> Option<TypeDescriptor> {
        let name = element.attribute("name")?;
        let has_inline_type = query::first_child(element, XS_NAMESPACE, "complexType").is_some()
            || query::first_child(element, XS_NAMESPACE, "simpleType").is_some();

        let type_name = match element.attribute("type") {
            Some(type_name) if !has_inline_type => type_name,
            _ => {
                return Some(TypeDescriptor::map_from_xml(
                    &mut self.context,
                    element,
                    schema,
                    name,
                ))
            }
        };

        match self.context.resolve_type_name(type_name, element, schema) {
            TypeName::Builtin(_) => {
                debug!("skipping element {name} of built-in type {type_name}");
                None
            }
            TypeName::Declared(target) => {
                let key = QualifiedKey::new(schema.target_namespace.as_str(), name);
                if target == key {
                    debug!("element {name} shares its key with its type");
                    return None;
                }
                debug!("element {name} is an alias of {target}");
                let namespace = self
                    .context
                    .namespaces
                    .to_hierarchical_namespace(&schema.target_namespace);
                let mut alias = TypeDescriptor::new(key, namespace, schema.location.as_str());
                alias.documentation = types::documentation(element);
                alias.parent = Some(target);
                Some(alias)
            }
        }
    }

    fn insert(&mut self, descriptor: TypeDescriptor, node: Node, schema: &Schema) {
        match self.types.entry(descriptor.key.clone()) {
            Entry::Vacant(entry) => {
                self.inserted.push(descriptor.key.clone());
                entry.insert(descriptor);
            }
            Entry::Occupied(mut entry) => {
                let qualified = self.context.namespaces.qualified_name(&descriptor.key);
                let message = format!(
                    "Type '{qualified}' in file '{}' already exists",
                    descriptor.source_location
                );
                self.context
                    .record(DiagnosticKind::DuplicateTypeDefinition, message, schema, node);

                let merged = entry.get_mut();
                merged.merge(descriptor);
                let sentinel = self.context.config.empty_parameter_name.as_str();
                if merged.property(sentinel).is_some() {
                    // a simple-content value and a parent never coexist
                    if let Some(parent) = merged.parent.take() {
                        let message = format!(
                            "Type '{qualified}' has simple content and cannot also extend '{parent}'"
                        );
                        self.context.record(
                            DiagnosticKind::UnsupportedSchemaConstruct,
                            message,
                            schema,
                            node,
                        );
                    }
                }
            }
        }
    }

    /// Reports references from this pass's descriptors that nothing declares, and parent
    /// chains that loop.
    pub fn check_references(&mut self) {
        for key in &self.inserted {
            let Some(descriptor) = self.types.get(key) else {
                continue;
            };

            let mut references: Vec<(&str, &QualifiedKey)> = descriptor
                .parent
                .iter()
                .map(|parent| ("parent", parent))
                .collect();
            references.extend(
                descriptor
                    .properties
                    .iter()
                    .filter_map(|p| p.resolved_type.reference().map(|r| (p.name.as_str(), r))),
            );
            for (referrer, target) in references {
                if !self.types.contains_key(target) {
                    self.context.diagnostics.record(
                        DiagnosticKind::UnresolvableReference,
                        format!(
                            "Type '{target}' referenced by '{referrer}' of type '{}' is not declared",
                            descriptor.name
                        ),
                        descriptor.source_location.as_str(),
                        0,
                    );
                }
            }

            if let Some(cycle_at) = parent_cycle(self.types, key) {
                self.context.diagnostics.record(
                    DiagnosticKind::InheritanceCycle,
                    format!(
                        "Inheritance chain of type '{}' loops at '{cycle_at}'",
                        descriptor.name
                    ),
                    descriptor.source_location.as_str(),
                    0,
                );
            }
        }
    }
}

/// The first key revisited while following `parent` links from `start`.
pub(crate) fn parent_cycle(types: &TypeMap, start: &QualifiedKey) -> Option<QualifiedKey> {
    let mut visited = HashSet::new();
    let mut current = Some(start);
    while let Some(key) = current {
        if !visited.insert(key) {
            return Some(key.clone());
        }
        current = types.get(key).and_then(|d| d.parent.as_ref());
    }
    None
}
