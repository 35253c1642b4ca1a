use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, query};

/// Options that shape how documents are resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Derive hierarchical namespaces from namespace URIs (`http://a.b/c` -> `b\a\c`).
    /// When disabled every type lands in the root namespace.
    pub wsdl2java_style: bool,
    /// Name of the single value property of simple-content types.
    pub empty_parameter_name: String,
    pub namespace_separator: String,
    pub soap_version: SoapVersion,
    pub allow_dtd: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            wsdl2java_style: true,
            empty_parameter_name: "_".to_string(),
            namespace_separator: "\\".to_string(),
            soap_version: SoapVersion::default(),
            allow_dtd: false,
        }
    }
}

impl ResolverConfig {
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Toml {
            path: path.display().to_string(),
            source,
        })
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoapVersion {
    #[default]
    #[serde(rename = "1.1")]
    V1_1,
    #[serde(rename = "1.2")]
    V1_2,
}

impl SoapVersion {
    /// Namespace of the SOAP binding extension elements for this version.
    pub fn binding_namespace(self) -> &'static str {
        match self {
            Self::V1_1 => query::SOAP_1_1_NAMESPACE,
            Self::V1_2 => query::SOAP_1_2_NAMESPACE,
        }
    }
}
