use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use dt_wsdl::{ConfigError, ResolverConfig};

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum SoapVersion {
    #[value(name = "1.1")]
    V1_1,
    #[value(name = "1.2")]
    V1_2,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    Json,
    Summary,
}

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[arg(help = "The WSDL or XSD source file or URL")]
    pub input: String,

    #[arg(long, help = "Read resolver options from a TOML file")]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, help = "SOAP version of the service bindings")]
    pub soap_version: Option<SoapVersion>,

    #[arg(long, help = "Allow a XML Document Type Definition (DTD) to occur")]
    pub allow_dtd: bool,

    #[arg(long, help = "Put every type into the root namespace")]
    pub flat_namespaces: bool,

    #[arg(long, help = "Name of the value property of simple-content types")]
    pub empty_parameter_name: Option<String>,

    #[arg(long, help = "Separator between namespace segments")]
    pub namespace_separator: Option<String>,

    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    #[arg(long, help = "Exit with a failure status if any diagnostic was recorded")]
    pub strict: bool,
}

impl Cli {
    /// Defaults, then the `--config` file, then flags.
    pub fn resolver_config(&self) -> Result<ResolverConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => ResolverConfig::read(path)?,
            None => ResolverConfig::default(),
        };

        if let Some(version) = self.soap_version {
            config.soap_version = match version {
                SoapVersion::V1_1 => dt_wsdl::SoapVersion::V1_1,
                SoapVersion::V1_2 => dt_wsdl::SoapVersion::V1_2,
            };
        }
        if self.allow_dtd {
            config.allow_dtd = true;
        }
        if self.flat_namespaces {
            config.wsdl2java_style = false;
        }
        if let Some(name) = &self.empty_parameter_name {
            config.empty_parameter_name = name.clone();
        }
        if let Some(separator) = &self.namespace_separator {
            config.namespace_separator = separator.clone();
        }
        Ok(config)
    }
}
