use dt_builtins::ScalarKind;
use roxmltree::Node;

use crate::{
    context::{ResolveContext, TypeName},
    diagnostics::DiagnosticKind,
    documents::Schema,
    model::{PropertyDescriptor, QualifiedKey, ResolvedType, TypeDescriptor},
    query::{self, XML_NAMESPACE, XS_NAMESPACE},
};

impl TypeDescriptor {
    /// Maps a named `complexType` or `simpleType`, or a top-level `element` declaring its
    /// type inline, to a descriptor called `name`.
    pub(crate) fn map_from_xml(
        context: &mut ResolveContext,
        node: Node,
        schema: &Schema,
        name: &str,
    ) -> Self {
        let config = context.config;
        let key = QualifiedKey::new(schema.target_namespace.as_str(), name);
        let namespace = context
            .namespaces
            .to_hierarchical_namespace(&schema.target_namespace);
        let mut descriptor = Self::new(key, namespace, schema.location.as_str());
        descriptor.documentation = documentation(node);

        if query::descendants(node, XS_NAMESPACE, "complexType").count() > 1 {
            context.record(
                DiagnosticKind::UnsupportedSchemaConstruct,
                format!(
                    "Nested complexType element declaration in XML schema for type '{name}' not supported."
                ),
                schema,
                node,
            );
            return descriptor;
        }

        let sentinel = config.empty_parameter_name.as_str();
        descriptor.properties = if let Some(simple_content) =
            query::first_descendant(node, XS_NAMESPACE, "simpleContent")
        {
            simple_content_properties(context, simple_content, schema, sentinel)
        } else if let Some(complex_content) =
            query::first_descendant(node, XS_NAMESPACE, "complexContent")
        {
            if let Some(extension) = query::first_child(complex_content, XS_NAMESPACE, "extension")
            {
                descriptor.parent = extension.attribute("base").and_then(|base| {
                    match context.resolve_type_name(base, extension, schema) {
                        TypeName::Declared(key) => Some(key),
                        TypeName::Builtin(_) => None,
                    }
                });
            }
            let mut properties = element_properties(context, complex_content, schema);
            properties.extend(attribute_properties(context, complex_content, schema));
            properties
        } else {
            let mut properties = element_properties(context, node, schema);
            if properties.is_empty() {
                properties.extend(PropertyDescriptor::map_from_simple_type(
                    context, node, schema, sentinel,
                ));
            }
            properties.extend(attribute_properties(context, node, schema));
            properties
        };

        descriptor.check_self_references(context, node, schema);
        descriptor
    }

    fn check_self_references(&self, context: &mut ResolveContext, node: Node, schema: &Schema) {
        for property in &self.properties {
            if matches!(&property.resolved_type, ResolvedType::Reference(key) if *key == self.key) {
                context.record(
                    DiagnosticKind::SelfReferencingProperty,
                    format!(
                        "Property '{}' of type '{}' references its own type",
                        property.name, self.name
                    ),
                    schema,
                    node,
                );
            }
        }
    }
}

impl PropertyDescriptor {
    fn map_from_element(context: &mut ResolveContext, element: Node, schema: &Schema) -> Self {
        let mut property = if let Some(reference) = element.attribute("ref") {
            let key = context.expand(reference, element, schema);
            let resolved_type = match context.builtin_element_type(&key) {
                Some(kind) => kind.into(),
                None => ResolvedType::Reference(key.clone()),
            };
            Self::new(key.name.clone(), resolved_type, reference)
        } else {
            let name = element.attribute("name").unwrap_or_default();
            match element.attribute("type") {
                Some(type_name) => Self::new(
                    name,
                    context.resolve_type_name(type_name, element, schema).into(),
                    type_name,
                ),
                None => Self::map_from_simple_type(context, element, schema, name)
                    .unwrap_or_else(|| Self::new(name, ScalarKind::String.into(), "")),
            }
        };

        property.nullable = matches!(element.attribute("nillable"), Some("true" | "1"));
        if is_repeated(element) {
            property.resolved_type = property.resolved_type.array_of();
        }
        property
    }

    fn map_from_attribute(
        context: &mut ResolveContext,
        attribute: Node,
        schema: &Schema,
    ) -> Option<Self> {
        let Some(reference) = attribute.attribute("ref") else {
            return Some(Self::map_from_attribute_decl(context, attribute, schema));
        };

        let key = context.expand(reference, attribute, schema);
        let documents = context.documents;
        if let Some((declaring_schema, declaration)) = documents.find_declaration("attribute", &key)
        {
            return Some(Self::map_from_attribute_decl(
                context,
                declaration,
                declaring_schema,
            ));
        }
        if key.namespace == XML_NAMESPACE {
            // xml:lang and friends, usually without xml.xsd loaded
            return Some(Self::new(key.name, ScalarKind::String.into(), reference));
        }

        context.record(
            DiagnosticKind::UnresolvableReference,
            format!("Attribute reference '{reference}' could not be resolved"),
            schema,
            attribute,
        );
        None
    }

    fn map_from_attribute_decl(
        context: &mut ResolveContext,
        attribute: Node,
        schema: &Schema,
    ) -> Self {
        let name = attribute.attribute("name").unwrap_or_default();
        match attribute.attribute("type") {
            Some(type_name) => Self::new(
                name,
                context.resolve_type_name(type_name, attribute, schema).into(),
                type_name,
            ),
            None => Self::map_from_simple_type(context, attribute, schema, name)
                .unwrap_or_else(|| Self::new(name, ScalarKind::String.into(), "")),
        }
    }

    /// Value property of a simple type, either `node` itself or the anonymous
    /// `simpleType` child of an element or attribute.
    fn map_from_simple_type(
        context: &mut ResolveContext,
        node: Node,
        schema: &Schema,
        name: &str,
    ) -> Option<Self> {
        let derivation = simple_derivation(node)?;
        let property = match derivation.tag_name().name() {
            "restriction" => Self::map_from_restriction(context, derivation, schema, name),
            "list" => {
                let (item, source): (ResolvedType, &str) = match derivation.attribute("itemType") {
                    Some(item_type) => (
                        context.resolve_type_name(item_type, derivation, schema).into(),
                        item_type,
                    ),
                    None => (
                        Self::map_from_simple_type(context, derivation, schema, name)
                            .map_or(ScalarKind::String.into(), |p| p.resolved_type),
                        "",
                    ),
                };
                Self::new(name, item.array_of(), source)
            }
            _ => Self::new(
                name,
                ScalarKind::String.into(),
                derivation.attribute("memberTypes").unwrap_or_default(),
            ),
        };
        Some(property)
    }

    fn map_from_restriction(
        context: &mut ResolveContext,
        restriction: Node,
        schema: &Schema,
        name: &str,
    ) -> Self {
        let mut property = match restriction.attribute("base") {
            Some(base) => Self::new(
                name,
                context.resolve_type_name(base, restriction, schema).into(),
                base,
            ),
            None => Self::map_from_simple_type(context, restriction, schema, name)
                .map(|inner| Self::new(name, inner.resolved_type, inner.source_schema_type))
                .unwrap_or_else(|| Self::new(name, ScalarKind::String.into(), "")),
        };

        let mut enum_values = Vec::new();
        for facet in restriction
            .children()
            .filter(|c| c.is_element() && c.tag_name().namespace() == Some(XS_NAMESPACE))
        {
            let Some(value) = facet.attribute("value") else {
                continue;
            };
            match facet.tag_name().name() {
                "enumeration" => enum_values.push(value.to_string()),
                facet_name => {
                    property
                        .restrictions
                        .insert(facet_name.to_string(), value.to_string());
                }
            }
        }

        if !enum_values.is_empty() {
            if let ResolvedType::Reference(base) = property.resolved_type.clone() {
                let kind = context.scalar_base(&base).unwrap_or_else(|| {
                    context.record(
                        DiagnosticKind::UnresolvableReference,
                        format!("Enumeration base type '{base}' could not be resolved to a built-in type"),
                        schema,
                        restriction,
                    );
                    ScalarKind::String
                });
                property.resolved_type = kind.into();
            }
            property.enum_values = Some(enum_values);
        }
        property
    }
}

/// Properties for the `xsd:element` particles under `scope`, in document order.
fn element_properties(
    context: &mut ResolveContext,
    scope: Node,
    schema: &Schema,
) -> Vec<PropertyDescriptor> {
    query::descendants(scope, XS_NAMESPACE, "element")
        .filter(|element| *element != scope)
        .map(|element| PropertyDescriptor::map_from_element(context, element, schema))
        .collect()
}

fn attribute_properties(
    context: &mut ResolveContext,
    scope: Node,
    schema: &Schema,
) -> Vec<PropertyDescriptor> {
    query::descendants(scope, XS_NAMESPACE, "attribute")
        .filter(|attribute| attribute.attribute("use") != Some("prohibited"))
        .filter_map(|attribute| PropertyDescriptor::map_from_attribute(context, attribute, schema))
        .collect()
}

fn simple_content_properties(
    context: &mut ResolveContext,
    simple_content: Node,
    schema: &Schema,
    sentinel: &str,
) -> Vec<PropertyDescriptor> {
    let Some(derivation) = simple_content.children().find(|c| {
        c.has_tag_name((XS_NAMESPACE, "extension")) || c.has_tag_name((XS_NAMESPACE, "restriction"))
    }) else {
        return Vec::new();
    };

    let value = if derivation.has_tag_name((XS_NAMESPACE, "restriction")) {
        PropertyDescriptor::map_from_restriction(context, derivation, schema, sentinel)
    } else {
        match derivation.attribute("base") {
            Some(base) => PropertyDescriptor::new(
                sentinel,
                context.resolve_type_name(base, derivation, schema).into(),
                base,
            ),
            None => PropertyDescriptor::new(sentinel, ScalarKind::String.into(), ""),
        }
    };

    let mut properties = vec![value];
    properties.extend(attribute_properties(context, derivation, schema));
    properties
}

/// The `restriction`, `list` or `union` defining a simple type. It sits under `node`
/// itself, under an anonymous `simpleType` child, or directly under a `complexType`.
fn simple_derivation<'a, 'input>(node: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
    let simple_type = if node.has_tag_name((XS_NAMESPACE, "simpleType")) {
        node
    } else {
        query::first_child(node, XS_NAMESPACE, "simpleType").unwrap_or(node)
    };
    simple_type.children().find(|c| {
        ["restriction", "list", "union"]
            .iter()
            .any(|tag| c.has_tag_name((XS_NAMESPACE, *tag)))
    })
}

fn is_repeated(element: Node) -> bool {
    match element.attribute("maxOccurs") {
        Some("unbounded") => true,
        Some(max) => max.trim().parse::<u64>().map_or(false, |max| max > 1),
        None => false,
    }
}

/// Text of the first `xsd:documentation` under `node`, trimmed.
pub(crate) fn documentation(node: Node) -> Option<String> {
    let documentation = query::first_descendant(node, XS_NAMESPACE, "documentation")?;
    let text: String = documentation
        .descendants()
        .filter_map(|n| if n.is_text() { n.text() } else { None })
        .collect();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::ResolverConfig,
        diagnostics::{Diagnostic, Diagnostics},
        documents::{tests::parse, DocumentSet},
        namespace::NamespaceResolver,
    };

    fn schema(body: &str) -> String {
        format!(
            "<xs:schema xmlns:xs=\"http://www.w3.org/2001/XMLSchema\" xmlns:tns=\"urn:test\" targetNamespace=\"urn:test\">\n{body}\n</xs:schema>"
        )
    }

    fn resolve(body: &str, name: &str) -> (TypeDescriptor, Vec<Diagnostic>) {
        let text = schema(body);
        let parsed = [parse("types.xsd", &text)];
        let documents = DocumentSet::new(&parsed);
        let config = ResolverConfig::default();
        let namespaces = NamespaceResolver::from_config(&config);
        let mut diagnostics = Diagnostics::default();

        let schema = &documents.schemas()[0];
        let node = schema
            .node
            .children()
            .find(|n| n.is_element() && n.attribute("name") == Some(name))
            .unwrap();
        let descriptor = {
            let mut context =
                ResolveContext::new(&config, &namespaces, &documents, &mut diagnostics);
            TypeDescriptor::map_from_xml(&mut context, node, schema, name)
        };
        (descriptor, diagnostics.into_vec())
    }

    fn key(name: &str) -> QualifiedKey {
        QualifiedKey::new("urn:test", name)
    }

    #[test]
    fn enumeration_becomes_sentinel_property() {
        let (descriptor, diagnostics) = resolve(
            r#"<xs:simpleType name="ACHAccountType">
  <xs:restriction base="xs:string">
    <xs:enumeration value="Unassigned"/>
    <xs:enumeration value="Personal"/>
    <xs:enumeration value="Business"/>
  </xs:restriction>
</xs:simpleType>"#,
            "ACHAccountType",
        );

        assert!(diagnostics.is_empty());
        assert_eq!(descriptor.key, key("ACHAccountType"));
        assert_eq!(descriptor.namespace, "urn_test");
        assert_eq!(descriptor.properties.len(), 1);
        let value = &descriptor.properties[0];
        assert_eq!(value.name, "_");
        assert_eq!(value.resolved_type, ResolvedType::Scalar(ScalarKind::String));
        assert_eq!(
            value.enum_values.as_deref(),
            Some(&["Unassigned".to_string(), "Personal".to_string(), "Business".to_string()][..])
        );
        assert!(value.restrictions.is_empty());
    }

    #[test]
    fn facets_become_restrictions() {
        let (descriptor, _) = resolve(
            r#"<xs:simpleType name="Quantity">
  <xs:restriction base="xs:int">
    <xs:annotation><xs:documentation>ignored</xs:documentation></xs:annotation>
    <xs:minInclusive value="1"/>
    <xs:maxInclusive value="99"/>
  </xs:restriction>
</xs:simpleType>"#,
            "Quantity",
        );

        let value = &descriptor.properties[0];
        assert_eq!(value.resolved_type, ResolvedType::Scalar(ScalarKind::Integer));
        assert_eq!(value.source_schema_type, "xs:int");
        assert_eq!(value.enum_values, None);
        assert_eq!(value.restrictions.len(), 2);
        assert_eq!(value.restrictions["minInclusive"], "1");
        assert_eq!(value.restrictions["maxInclusive"], "99");
    }

    #[test]
    fn enumeration_over_named_simple_type_uses_its_builtin_base() {
        let (descriptor, diagnostics) = resolve(
            r#"<xs:simpleType name="Code"><xs:restriction base="xs:short"/></xs:simpleType>
<xs:simpleType name="RetryCode">
  <xs:restriction base="tns:Code">
    <xs:enumeration value="1"/>
    <xs:enumeration value="2"/>
  </xs:restriction>
</xs:simpleType>"#,
            "RetryCode",
        );

        assert!(diagnostics.is_empty());
        let value = &descriptor.properties[0];
        assert_eq!(value.resolved_type, ResolvedType::Scalar(ScalarKind::Integer));
        assert_eq!(value.source_schema_type, "tns:Code");
    }

    #[test]
    fn simple_content_has_value_then_attributes() {
        let (descriptor, diagnostics) = resolve(
            r#"<xs:attribute name="unit">
  <xs:simpleType>
    <xs:restriction base="xs:string">
      <xs:enumeration value="kg"/>
      <xs:enumeration value="lb"/>
    </xs:restriction>
  </xs:simpleType>
</xs:attribute>
<xs:complexType name="Weight">
  <xs:simpleContent>
    <xs:extension base="xs:decimal">
      <xs:attribute ref="tns:unit"/>
      <xs:attribute name="estimated" type="xs:boolean"/>
      <xs:attribute ref="xml:lang"/>
    </xs:extension>
  </xs:simpleContent>
</xs:complexType>"#,
            "Weight",
        );

        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        let names: Vec<_> = descriptor.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["_", "unit", "estimated", "lang"]);
        assert_eq!(
            descriptor.properties[0].resolved_type,
            ResolvedType::Scalar(ScalarKind::Float)
        );
        let unit = descriptor.property("unit").unwrap();
        assert_eq!(unit.resolved_type, ResolvedType::Scalar(ScalarKind::String));
        assert_eq!(unit.enum_values.as_ref().map(Vec::len), Some(2));
        assert_eq!(descriptor.parent, None);
    }

    #[test]
    fn prohibited_attributes_are_skipped() {
        let (descriptor, diagnostics) = resolve(
            r#"<xs:complexType name="Price">
  <xs:simpleContent>
    <xs:restriction base="xs:decimal">
      <xs:attribute name="currency" type="xs:string"/>
      <xs:attribute name="legacyCode" type="xs:string" use="prohibited"/>
    </xs:restriction>
  </xs:simpleContent>
</xs:complexType>"#,
            "Price",
        );

        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        let names: Vec<_> = descriptor.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["_", "currency"]);
        assert!(descriptor.property("legacyCode").is_none());
    }

    #[test]
    fn restriction_directly_under_complex_type_becomes_sentinel_property() {
        let (descriptor, diagnostics) = resolve(
            r#"<xs:complexType name="Code">
  <xs:restriction base="xs:string">
    <xs:maxLength value="3"/>
  </xs:restriction>
</xs:complexType>"#,
            "Code",
        );

        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        assert_eq!(descriptor.properties.len(), 1);
        let value = &descriptor.properties[0];
        assert_eq!(value.name, "_");
        assert_eq!(value.resolved_type, ResolvedType::Scalar(ScalarKind::String));
        assert_eq!(value.restrictions["maxLength"], "3");
    }

    #[test]
    fn element_reference_to_builtin_element_carries_the_scalar() {
        let (descriptor, diagnostics) = resolve(
            r#"<xs:element name="Name" type="xs:string"/>
<xs:element name="Tag" type="xs:token"/>
<xs:element name="Address" type="tns:AddressType"/>
<xs:complexType name="Person">
  <xs:sequence>
    <xs:element ref="tns:Name"/>
    <xs:element ref="tns:Tag" maxOccurs="unbounded"/>
    <xs:element ref="tns:Address"/>
  </xs:sequence>
</xs:complexType>"#,
            "Person",
        );

        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        let types: Vec<_> = descriptor
            .properties
            .iter()
            .map(|p| (p.name.as_str(), p.resolved_type.to_string()))
            .collect();
        assert_eq!(
            types,
            [
                ("Name", "string".to_string()),
                ("Tag", "array<string>".to_string()),
                ("Address", "{urn:test}Address".to_string()),
            ]
        );
        assert_eq!(descriptor.properties[0].source_schema_type, "tns:Name");
    }

    #[test]
    fn unresolved_attribute_reference_is_reported_and_skipped() {
        let (descriptor, diagnostics) = resolve(
            r#"<xs:complexType name="Tagged">
  <xs:sequence><xs:element name="value" type="xs:string"/></xs:sequence>
  <xs:attribute ref="tns:missing"/>
</xs:complexType>"#,
            "Tagged",
        );

        assert_eq!(descriptor.properties.len(), 1);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::UnresolvableReference);
        assert_eq!(diagnostics[0].line, 4);
        assert_eq!(diagnostics[0].file, "types.xsd");
    }

    #[test]
    fn complex_content_extension_sets_parent() {
        let (descriptor, _) = resolve(
            r#"<xs:complexType name="Employee">
  <xs:complexContent>
    <xs:extension base="tns:Person">
      <xs:sequence>
        <xs:element name="employer" type="xs:string"/>
      </xs:sequence>
      <xs:attribute name="active" type="xs:boolean"/>
    </xs:extension>
  </xs:complexContent>
</xs:complexType>"#,
            "Employee",
        );

        assert_eq!(descriptor.parent, Some(key("Person")));
        let names: Vec<_> = descriptor.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["employer", "active"]);
    }

    #[test]
    fn groups_are_flattened_and_cardinality_applied() {
        let (descriptor, _) = resolve(
            r#"<xs:complexType name="Order">
  <xs:sequence>
    <xs:element name="id" type="xs:long"/>
    <xs:choice>
      <xs:element name="note" type="xs:string" nillable="true"/>
      <xs:element name="lines" type="tns:Line" maxOccurs="unbounded"/>
    </xs:choice>
    <xs:element name="tags" type="xs:string" maxOccurs="5"/>
    <xs:element name="total" type="xs:decimal" maxOccurs="1"/>
    <xs:element ref="tns:Customer"/>
    <xs:element name="any"/>
  </xs:sequence>
</xs:complexType>"#,
            "Order",
        );

        let types: Vec<_> = descriptor
            .properties
            .iter()
            .map(|p| (p.name.as_str(), p.resolved_type.to_string()))
            .collect();
        assert_eq!(
            types,
            [
                ("id", "int".to_string()),
                ("note", "string".to_string()),
                ("lines", "array<{urn:test}Line>".to_string()),
                ("tags", "array<string>".to_string()),
                ("total", "float".to_string()),
                ("Customer", "{urn:test}Customer".to_string()),
                ("any", "string".to_string()),
            ]
        );
        assert!(descriptor.property("note").unwrap().nullable);
        assert!(!descriptor.property("id").unwrap().nullable);
    }

    #[test]
    fn nested_complex_type_is_rejected() {
        let (descriptor, diagnostics) = resolve(
            r#"<xs:complexType name="persons">
  <xs:sequence>
    <xs:element name="person">
      <xs:complexType>
        <xs:sequence><xs:element name="name" type="xs:string"/></xs:sequence>
      </xs:complexType>
    </xs:element>
  </xs:sequence>
</xs:complexType>"#,
            "persons",
        );

        assert!(descriptor.properties.is_empty());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::UnsupportedSchemaConstruct);
        assert_eq!(
            diagnostics[0].message,
            "Nested complexType element declaration in XML schema for type 'persons' not supported."
        );
        assert_eq!(diagnostics[0].line, 2);
    }

    #[test]
    fn element_with_inline_type_is_resolved_like_a_complex_type() {
        let (descriptor, diagnostics) = resolve(
            r#"<xs:element name="GetQuote">
  <xs:annotation>
    <xs:documentation>
      Requests a quote.
    </xs:documentation>
  </xs:annotation>
  <xs:complexType>
    <xs:sequence><xs:element name="symbol" type="xs:string"/></xs:sequence>
  </xs:complexType>
</xs:element>"#,
            "GetQuote",
        );

        assert!(diagnostics.is_empty());
        assert_eq!(descriptor.documentation.as_deref(), Some("Requests a quote."));
        assert_eq!(descriptor.properties.len(), 1);
        assert_eq!(descriptor.properties[0].name, "symbol");
    }

    #[test]
    fn direct_self_reference_is_reported() {
        let (_, diagnostics) = resolve(
            r#"<xs:complexType name="Node">
  <xs:sequence>
    <xs:element name="next" type="tns:Node"/>
    <xs:element name="children" type="tns:Node" maxOccurs="unbounded"/>
  </xs:sequence>
</xs:complexType>"#,
            "Node",
        );

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::SelfReferencingProperty);
        assert!(diagnostics[0].message.contains("'next'"));
    }

    #[test]
    fn lists_and_unions() {
        let (list, _) = resolve(
            r#"<xs:simpleType name="Ids"><xs:list itemType="xs:unsignedInt"/></xs:simpleType>"#,
            "Ids",
        );
        assert_eq!(list.properties[0].resolved_type.to_string(), "array<int>");

        let (union, _) = resolve(
            r#"<xs:simpleType name="Size"><xs:union memberTypes="xs:int xs:string"/></xs:simpleType>"#,
            "Size",
        );
        assert_eq!(
            union.properties[0].resolved_type,
            ResolvedType::Scalar(ScalarKind::String)
        );
    }

    #[test]
    fn unbound_prefix_falls_back_to_target_namespace() {
        let (descriptor, diagnostics) = resolve(
            r#"<xs:complexType name="Box">
  <xs:sequence><xs:element name="item" type="x:Item"/></xs:sequence>
</xs:complexType>"#,
            "Box",
        );

        assert_eq!(
            descriptor.properties[0].resolved_type,
            ResolvedType::Reference(key("Item"))
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::UnresolvableReference);
    }
}
