mod cli;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use dt_wsdl as wsdl;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use wsdl::{NamespaceResolver, Resolution};

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();
    let config = cli
        .resolver_config()
        .context("failed to load the resolver configuration")?;
    debug!(?config, "resolver configuration");
    let namespaces = NamespaceResolver::from_config(&config);

    info!(input = %cli.input, soap_version = ?config.soap_version, "resolving");
    let resolution = wsdl::resolve(&cli.input, config)
        .with_context(|| format!("failed to resolve {}", cli.input))?;

    match cli.format {
        cli::OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&resolution)
                .context("failed to serialize the resolution")?;
            println!("{json}");
        }
        cli::OutputFormat::Summary => print_summary(&resolution, &namespaces),
    }

    for diagnostic in &resolution.diagnostics {
        eprintln!("{diagnostic}");
    }

    if cli.strict && resolution.has_errors() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_summary(resolution: &Resolution, namespaces: &NamespaceResolver) {
    for descriptor in resolution.types.values() {
        print!("type {}", namespaces.qualified_name(&descriptor.key));
        if let Some(parent) = &descriptor.parent {
            print!(" extends {}", namespaces.qualified_name(parent));
        }
        println!();
        for property in &descriptor.properties {
            let nullable = if property.nullable { "?" } else { "" };
            print!("    {}: {}{nullable}", property.name, property.resolved_type);
            if let Some(values) = &property.enum_values {
                print!(" = {}", values.join(" | "));
            }
            println!();
        }
    }

    for operation in &resolution.operations {
        let parameters: Vec<_> = operation
            .parameters
            .iter()
            .map(|p| format!("{}: {}", p.name, p.resolved_type))
            .collect();
        println!(
            "operation {}({}) -> {}",
            operation.name,
            parameters.join(", "),
            operation.return_type.qualified_name
        );
    }

    println!(
        "{} types, {} operations, {} diagnostics",
        resolution.types.len(),
        resolution.operations.len(),
        resolution.diagnostics.len()
    );
}
