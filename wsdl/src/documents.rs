use roxmltree::{Document, Node};

use crate::{
    loader::DocumentId,
    model::QualifiedKey,
    query::{self, WSDL_NAMESPACE, XS_NAMESPACE},
};

/// A loaded document parsed for one resolution pass.
pub(crate) struct ParsedDocument<'input> {
    pub id: DocumentId,
    pub location: String,
    /// Target namespace taken over from the including schema (chameleon include).
    pub inherited_namespace: Option<String>,
    pub document: Document<'input>,
}

/// An `xsd:schema` element, standalone or embedded in `wsdl:types`.
pub(crate) struct Schema<'a, 'input> {
    pub document: DocumentId,
    pub location: String,
    pub node: Node<'a, 'input>,
    pub target_namespace: String,
}

impl Schema<'_, '_> {
    pub const TAG_NAME: &'static str = "schema";
}

/// A `wsdl:definitions` root element.
pub(crate) struct Definitions<'a, 'input> {
    pub document: DocumentId,
    pub location: String,
    pub node: Node<'a, 'input>,
    pub target_namespace: String,
}

impl Definitions<'_, '_> {
    pub const TAG_NAME: &'static str = "definitions";
}

/// A reference from one document to another.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DocumentReference {
    pub location: String,
    pub line: u32,
    /// Set for `xsd:include`: the includer's target namespace.
    pub include_namespace: Option<String>,
}

/// Every `xsd:import`/`xsd:include` with a `schemaLocation` and every `wsdl:import`
/// with a `location`, in document order.
pub(crate) fn document_references(document: &Document) -> Vec<DocumentReference> {
    let root = document.root_element();
    let mut references = Vec::new();

    if root.has_tag_name((WSDL_NAMESPACE, Definitions::TAG_NAME)) {
        for import in query::children(root, WSDL_NAMESPACE, "import") {
            if let Some(location) = import.attribute("location") {
                references.push(DocumentReference {
                    location: location.to_string(),
                    line: query::line_of(import),
                    include_namespace: None,
                });
            }
        }
    }

    for schema in query::descendants(root, XS_NAMESPACE, Schema::TAG_NAME) {
        let target_namespace = schema.attribute("targetNamespace").unwrap_or_default();
        for child in schema.children().filter(|c| c.is_element()) {
            let include_namespace = if child.has_tag_name((XS_NAMESPACE, "include")) {
                Some(target_namespace.to_string())
            } else if child.has_tag_name((XS_NAMESPACE, "import")) {
                None
            } else {
                continue;
            };
            if let Some(location) = child.attribute("schemaLocation") {
                references.push(DocumentReference {
                    location: location.to_string(),
                    line: query::line_of(child),
                    include_namespace,
                });
            }
        }
    }

    references
}

/// All schemas and WSDL definitions visible to a resolution pass.
pub(crate) struct DocumentSet<'a, 'input> {
    schemas: Vec<Schema<'a, 'input>>,
    definitions: Vec<Definitions<'a, 'input>>,
}

impl<'a, 'input: 'a> DocumentSet<'a, 'input> {
    pub fn new(parsed: &'a [ParsedDocument<'input>]) -> Self {
        let mut schemas = Vec::new();
        let mut definitions = Vec::new();

        for document in parsed {
            let root = document.document.root_element();
            if root.has_tag_name((WSDL_NAMESPACE, Definitions::TAG_NAME)) {
                definitions.push(Definitions {
                    document: document.id,
                    location: document.location.clone(),
                    node: root,
                    target_namespace: root
                        .attribute("targetNamespace")
                        .unwrap_or_default()
                        .to_string(),
                });
            }
            for schema in query::descendants(root, XS_NAMESPACE, Schema::TAG_NAME) {
                let target_namespace = match schema.attribute("targetNamespace") {
                    Some(namespace) => namespace.to_string(),
                    None => document.inherited_namespace.clone().unwrap_or_default(),
                };
                schemas.push(Schema {
                    document: document.id,
                    location: document.location.clone(),
                    node: schema,
                    target_namespace,
                });
            }
        }

        Self {
            schemas,
            definitions,
        }
    }

    #[cfg(test)]
    pub fn schemas(&self) -> &[Schema<'a, 'input>] {
        &self.schemas
    }

    /// Schemas of the given documents, in the order the documents are listed.
    pub fn schemas_of<'s>(
        &'s self,
        documents: &'s [DocumentId],
    ) -> impl Iterator<Item = &'s Schema<'a, 'input>> {
        documents
            .iter()
            .flat_map(move |id| self.schemas.iter().filter(move |s| s.document == *id))
    }

    pub fn definitions_of<'s>(
        &'s self,
        documents: &'s [DocumentId],
    ) -> impl Iterator<Item = &'s Definitions<'a, 'input>> {
        documents
            .iter()
            .flat_map(move |id| self.definitions.iter().filter(move |d| d.document == *id))
    }

    /// Top-level schema declaration `tag` named by `key`, searched across all schemas.
    pub fn find_declaration(
        &self,
        tag: &'static str,
        key: &QualifiedKey,
    ) -> Option<(&Schema<'a, 'input>, Node<'a, 'input>)> {
        self.schemas
            .iter()
            .filter(|schema| schema.target_namespace == key.namespace)
            .find_map(|schema| {
                query::children(schema.node, XS_NAMESPACE, tag)
                    .find(|node| node.attribute("name") == Some(key.name.as_str()))
                    .map(|node| (schema, node))
            })
    }

    pub fn find_message(
        &self,
        key: &QualifiedKey,
    ) -> Option<(&Definitions<'a, 'input>, Node<'a, 'input>)> {
        self.definitions
            .iter()
            .filter(|definitions| definitions.target_namespace == key.namespace)
            .find_map(|definitions| {
                query::children(definitions.node, WSDL_NAMESPACE, "message")
                    .find(|node| node.attribute("name") == Some(key.name.as_str()))
                    .map(|node| (definitions, node))
            })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn parse<'input>(location: &str, text: &'input str) -> ParsedDocument<'input> {
        ParsedDocument {
            id: 0,
            location: location.to_string(),
            inherited_namespace: None,
            document: Document::parse(text).unwrap(),
        }
    }

    const SERVICE: &str = r#"<wsdl:definitions xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/"
    xmlns:xs="http://www.w3.org/2001/XMLSchema" targetNamespace="urn:svc">
  <wsdl:import namespace="urn:more" location="more.wsdl"/>
  <wsdl:types>
    <xs:schema targetNamespace="urn:svc">
      <xs:include schemaLocation="common.xsd"/>
      <xs:import namespace="urn:ext" schemaLocation="ext.xsd"/>
      <xs:import namespace="urn:builtin"/>
      <xs:attribute name="lang" type="xs:string"/>
    </xs:schema>
  </wsdl:types>
  <wsdl:message name="Ping"/>
</wsdl:definitions>"#;

    #[test]
    fn collects_references_in_document_order() {
        let parsed = parse("svc.wsdl", SERVICE);
        let references = document_references(&parsed.document);
        let locations: Vec<_> = references.iter().map(|r| r.location.as_str()).collect();
        assert_eq!(locations, ["more.wsdl", "common.xsd", "ext.xsd"]);
        assert_eq!(references[1].include_namespace.as_deref(), Some("urn:svc"));
        assert_eq!(references[2].include_namespace, None);
        assert_eq!(references[0].line, 3);
    }

    #[test]
    fn finds_embedded_schemas_and_declarations() {
        let parsed = [parse("svc.wsdl", SERVICE)];
        let documents = DocumentSet::new(&parsed);

        assert_eq!(documents.schemas().len(), 1);
        assert_eq!(documents.schemas()[0].target_namespace, "urn:svc");
        assert!(documents
            .find_declaration("attribute", &QualifiedKey::new("urn:svc", "lang"))
            .is_some());
        assert!(documents
            .find_declaration("attribute", &QualifiedKey::new("urn:other", "lang"))
            .is_none());
        assert!(documents
            .find_message(&QualifiedKey::new("urn:svc", "Ping"))
            .is_some());
    }

    #[test]
    fn schema_without_target_namespace_inherits_from_includer() {
        let mut parsed = parse(
            "common.xsd",
            r#"<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema"/>"#,
        );
        parsed.inherited_namespace = Some("urn:main".to_string());
        let parsed = [parsed];
        let documents = DocumentSet::new(&parsed);
        assert_eq!(documents.schemas()[0].target_namespace, "urn:main");
    }
}
