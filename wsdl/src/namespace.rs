use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Url;
use roxmltree::Node;

use crate::{config::ResolverConfig, error::NamespaceError, model::QualifiedKey, query};

lazy_static! {
    static ref NON_IDENTIFIER: Regex = Regex::new(r"[^\w]").expect("identifier regex must compile");
}

/// Splits `prefix:local`; a name without a colon has an empty prefix.
pub fn split_qname(qname: &str) -> (&str, &str) {
    qname.split_once(':').unwrap_or(("", qname))
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NamespaceStyle {
    /// Reversed host, then the path: `http://soap.example.com/shop` -> `com\example\soap\shop`.
    Hierarchical,
    /// Everything in the root namespace.
    Flat,
}

#[derive(Clone, Debug)]
pub struct NamespaceResolver {
    style: NamespaceStyle,
    separator: String,
}

impl NamespaceResolver {
    pub fn new(style: NamespaceStyle, separator: impl Into<String>) -> Self {
        Self {
            style,
            separator: separator.into(),
        }
    }

    pub fn from_config(config: &ResolverConfig) -> Self {
        let style = if config.wsdl2java_style {
            NamespaceStyle::Hierarchical
        } else {
            NamespaceStyle::Flat
        };
        Self::new(style, config.namespace_separator.as_str())
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Nearest in-scope declaration of `prefix`, seen from `scope`.
    pub fn namespace_uri_for_prefix<'a>(
        &self,
        prefix: &str,
        scope: Node<'a, '_>,
    ) -> Option<&'a str> {
        match prefix {
            // bound by definition (Namespaces in XML 1.0, §3)
            "xml" => Some(query::XML_NAMESPACE),
            "" => scope.lookup_namespace_uri(None),
            prefix => scope.lookup_namespace_uri(Some(prefix)),
        }
    }

    /// Expands a QName written in a schema or WSDL document into a session key.
    ///
    /// Unprefixed names without a default namespace in scope, and names using an
    /// undeclared `tns` prefix, belong to the enclosing `target_namespace`.
    pub fn expand(
        &self,
        qname: &str,
        scope: Node,
        target_namespace: &str,
    ) -> Result<QualifiedKey, NamespaceError> {
        let (prefix, local) = split_qname(qname);
        let namespace = match self.namespace_uri_for_prefix(prefix, scope) {
            Some(uri) => uri,
            None if prefix.is_empty() || prefix == "tns" => target_namespace,
            None => return Err(NamespaceError::PrefixNotResolved(prefix.to_string())),
        };
        Ok(QualifiedKey::new(namespace, local))
    }

    pub fn to_hierarchical_namespace(&self, uri: &str) -> String {
        if self.style == NamespaceStyle::Flat {
            return String::new();
        }

        let segments: Vec<String> = match Url::parse(uri) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {
                let host = url.host_str().unwrap_or_default();
                host.rsplit('.')
                    .chain(url.path().split('/'))
                    .map(str::to_owned)
                    .collect()
            }
            _ => uri.split('/').map(str::to_owned).collect(),
        };

        segments
            .iter()
            .filter(|segment| !segment.is_empty())
            .map(|segment| NON_IDENTIFIER.replace_all(segment, "_").into_owned())
            .collect::<Vec<_>>()
            .join(&self.separator)
    }

    /// `namespace<separator>name`, or just the name when the namespace is empty.
    pub fn qualified_name(&self, key: &QualifiedKey) -> String {
        let namespace = self.to_hierarchical_namespace(&key.namespace);
        if namespace.is_empty() {
            key.name.clone()
        } else {
            format!("{namespace}{}{}", self.separator, key.name)
        }
    }
}
