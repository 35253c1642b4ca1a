use std::collections::HashSet;

use dt_builtins::ScalarKind;
use roxmltree::Node;
use tracing::debug;

use crate::{
    config::ResolverConfig,
    diagnostics::{DiagnosticKind, Diagnostics},
    documents::{DocumentSet, Schema},
    model::{QualifiedKey, ResolvedType},
    namespace::NamespaceResolver,
    query::{self, XS_NAMESPACE},
};

/// What a `type`/`base` attribute names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum TypeName {
    Builtin(ScalarKind),
    Declared(QualifiedKey),
}

impl From<TypeName> for ResolvedType {
    fn from(name: TypeName) -> Self {
        match name {
            TypeName::Builtin(kind) => Self::Scalar(kind),
            TypeName::Declared(key) => Self::Reference(key),
        }
    }
}

/// State shared by everything that maps schema nodes during one resolution pass.
pub(crate) struct ResolveContext<'s, 'a, 'input> {
    pub config: &'s ResolverConfig,
    pub namespaces: &'s NamespaceResolver,
    pub documents: &'s DocumentSet<'a, 'input>,
    pub diagnostics: &'s mut Diagnostics,
}

impl<'s, 'a, 'input: 'a> ResolveContext<'s, 'a, 'input> {
    pub fn new(
        config: &'s ResolverConfig,
        namespaces: &'s NamespaceResolver,
        documents: &'s DocumentSet<'a, 'input>,
        diagnostics: &'s mut Diagnostics,
    ) -> Self {
        Self {
            config,
            namespaces,
            documents,
            diagnostics,
        }
    }

    pub fn record(
        &mut self,
        kind: DiagnosticKind,
        message: impl Into<String>,
        schema: &Schema,
        node: Node,
    ) {
        self.diagnostics
            .record(kind, message, schema.location.as_str(), query::line_of(node));
    }

    /// Expands a QName in the scope of `node`. An unbound prefix is recorded and the
    /// name is placed in the schema's target namespace.
    pub fn expand(&mut self, qname: &str, node: Node, schema: &Schema) -> QualifiedKey {
        match self
            .namespaces
            .expand(qname, node, &schema.target_namespace)
        {
            Ok(key) => key,
            Err(error) => {
                self.record(
                    DiagnosticKind::UnresolvableReference,
                    format!("{error} in '{qname}'"),
                    schema,
                    node,
                );
                let (_, local) = crate::namespace::split_qname(qname);
                QualifiedKey::new(schema.target_namespace.as_str(), local)
            }
        }
    }

    pub fn resolve_type_name(&mut self, qname: &str, node: Node, schema: &Schema) -> TypeName {
        let key = self.expand(qname, node, schema);
        if key.namespace == XS_NAMESPACE {
            TypeName::Builtin(builtin_kind(&key.name))
        } else {
            TypeName::Declared(key)
        }
    }

    /// Built-in type of the global element `key`. Such elements get no entry in the type
    /// map, so a `ref` to one has to carry the scalar itself.
    pub fn builtin_element_type(&self, key: &QualifiedKey) -> Option<ScalarKind> {
        let (schema, element) = self.documents.find_declaration("element", key)?;
        if query::first_child(element, XS_NAMESPACE, "complexType").is_some()
            || query::first_child(element, XS_NAMESPACE, "simpleType").is_some()
        {
            return None;
        }
        let type_name = element.attribute("type")?;
        let target = self
            .namespaces
            .expand(type_name, element, &schema.target_namespace)
            .ok()?;
        (target.namespace == XS_NAMESPACE).then(|| builtin_kind(&target.name))
    }

    /// Follows named simple types down to the built-in they restrict.
    pub fn scalar_base(&mut self, key: &QualifiedKey) -> Option<ScalarKind> {
        let documents = self.documents;
        let mut visited = HashSet::new();
        let mut current = key.clone();

        loop {
            if current.namespace == XS_NAMESPACE {
                return Some(builtin_kind(&current.name));
            }
            if !visited.insert(current.clone()) {
                return None;
            }

            let (schema, simple_type) = documents.find_declaration("simpleType", &current)?;
            let base = query::descendants(simple_type, XS_NAMESPACE, "restriction")
                .find_map(|restriction| Some((restriction, restriction.attribute("base")?)));
            match base {
                Some((restriction, base)) => current = self.expand(base, restriction, schema),
                // lists and unions are carried as text
                None => return Some(ScalarKind::String),
            }
        }
    }
}

fn builtin_kind(local_name: &str) -> ScalarKind {
    dt_builtins::scalar_kind(local_name).unwrap_or_else(|| {
        debug!("{local_name} is not a mapped built-in, using string");
        ScalarKind::String
    })
}
