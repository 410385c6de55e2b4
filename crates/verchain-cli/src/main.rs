//! Verchain - registry version resolver
//!
//! Usage:
//!   verchain                          # Read INPUT_* variables, write $GITHUB_OUTPUT
//!   verchain --driver-name python --cdi-version 2.21
//!   verchain --list-edges             # Show every chain without network calls

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use verchain_core::config::{ActionsEnv, ApiKey, InputField, Inputs, Layered, RegistrySettings};
use verchain_core::output::{GithubOutputFile, OutputSink, StdoutSink, error_command};
use verchain_core::registry::{ParamValue, RegistryClient, ReqwestTransport};
use verchain_core::resolver::{Chain, ChainResolver, EdgeInput, Resolution, chains};

#[derive(Parser)]
#[command(name = "verchain")]
#[command(about = "Resolve core, plugin-interface and frontend versions from the version registry", long_about = None)]
struct Cli {
    /// Driver requesting the versions (required here or as INPUT_DRIVER-NAME)
    #[arg(long)]
    driver_name: Option<String>,

    /// Core driver interface version seeding the core chain
    #[arg(long)]
    cdi_version: Option<String>,

    /// Core mode sent with core lookups
    #[arg(long)]
    core_mode: Option<String>,

    /// Core plan type sent with core lookups
    #[arg(long)]
    core_plan_type: Option<String>,

    /// Frontend mode sent with frontend lookups
    #[arg(long)]
    frontend_mode: Option<String>,

    /// Frontend driver interface version seeding the frontend chain
    #[arg(long)]
    fdi_version: Option<String>,

    /// Web-js interface version seeding the web-js chain
    #[arg(long)]
    web_js_interface_version: Option<String>,

    /// Registry base URL (defaults to $VERCHAIN_REGISTRY_URL, then the public registry)
    #[arg(long)]
    registry_url: Option<String>,

    /// File to append outputs to (defaults to $GITHUB_OUTPUT, stdout when unset)
    #[arg(long)]
    output_file: Option<PathBuf>,

    /// Print a summary of all outputs after a successful run
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Print every chain and its edges, then exit
    #[arg(long)]
    list_edges: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable table
    Table,
    /// Machine-readable JSON
    Json,
}

impl Cli {
    /// Flags given on the command line, keyed by input name.
    fn input_overrides(&self) -> HashMap<String, String> {
        let flags = [
            (InputField::DriverName, &self.driver_name),
            (InputField::CdiVersion, &self.cdi_version),
            (InputField::CoreMode, &self.core_mode),
            (InputField::CorePlanType, &self.core_plan_type),
            (InputField::FrontendMode, &self.frontend_mode),
            (InputField::FdiVersion, &self.fdi_version),
            (InputField::WebJsInterfaceVersion, &self.web_js_interface_version),
        ];

        flags
            .into_iter()
            .filter_map(|(field, value)| value.clone().map(|value| (field.key().to_string(), value)))
            .collect()
    }
}

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "verchain=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Surface the failure to the pipeline as an error annotation.
            println!("{}", error_command(&format!("{:#}", err)));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if cli.list_edges {
        print_chains(&chains::all());
        return Ok(());
    }

    let inputs = Inputs::load(&Layered::new(cli.input_overrides(), ActionsEnv))?;
    let settings = RegistrySettings::resolve(cli.registry_url.as_deref())?;
    let client = RegistryClient::new(
        ReqwestTransport::new()?,
        settings.base_url().clone(),
        ApiKey::from_env(),
    );
    let resolver = ChainResolver::new(&client);

    let output_file = cli
        .output_file
        .clone()
        .map(GithubOutputFile::new)
        .or_else(GithubOutputFile::from_env);

    let mut sink: Box<dyn OutputSink> = match output_file {
        Some(file) => {
            tracing::debug!("writing outputs to {}", file.path().display());
            Box::new(file)
        }
        None => Box::new(StdoutSink),
    };

    let runtime = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    let resolution = runtime.block_on(resolver.run(&inputs, sink.as_mut()))?;

    if let Some(format) = cli.format {
        print_summary(&resolution, format)?;
    }

    Ok(())
}

fn print_summary(resolution: &Resolution, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            if resolution.outputs.is_empty() {
                println!("No chains were run.");
            }
            let width = resolution
                .outputs
                .iter()
                .map(|output| output.name.len())
                .max()
                .unwrap_or(0);
            for output in &resolution.outputs {
                println!("{:width$}  {}", output.name, output.value, width = width);
            }
            if !resolution.skipped.is_empty() {
                println!("Skipped: {}", resolution.skipped.join(", "));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(resolution)?);
        }
    }
    Ok(())
}

fn print_chains(chains: &[Chain]) {
    for chain in chains {
        println!("{} (seed: {})", chain.name, chain.seed.key());
        for step in &chain.steps {
            let consumes = match step.input {
                EdgeInput::Seed => chain.seed.key(),
                EdgeInput::Output(source) => source,
            };
            let params: Vec<String> = step
                .edge
                .params
                .iter()
                .map(|(name, value)| match value {
                    ParamValue::Literal(literal) => format!("{}={}", name, literal),
                    ParamValue::Input(field) => format!("{}=<{}>", name, field.key()),
                    ParamValue::Upstream => format!("{}=<{}>", name, consumes),
                })
                .collect();
            println!(
                "  {} <- {} [{}] .{}",
                step.output,
                step.edge.path,
                params.join(", "),
                step.edge.output_key
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verchain_core::config::InputSource;

    #[test]
    fn overrides_only_contain_given_flags() {
        let cli = Cli::parse_from(["verchain", "--driver-name", "node", "--fdi-version", "1.17"]);
        let overrides = cli.input_overrides();
        assert_eq!(overrides.len(), 2);
        assert_eq!(overrides.get("driver-name").map(String::as_str), Some("node"));
        assert_eq!(overrides.get("fdi-version").map(String::as_str), Some("1.17"));
    }

    #[test]
    fn flags_load_into_inputs() {
        let cli = Cli::parse_from([
            "verchain",
            "--driver-name",
            "python",
            "--cdi-version",
            "2.21",
            "--core-mode",
            "DEV",
        ]);
        let overrides = cli.input_overrides();
        assert_eq!(overrides.get("core-mode").map(String::as_str), Some("DEV"));

        let inputs = Inputs::load(&overrides).unwrap();
        assert_eq!(inputs.driver_name, "python");
        assert_eq!(inputs.cdi_version.as_deref(), Some("2.21"));
        assert_eq!(InputSource::get(&overrides, "frontend-mode"), None);
    }

    #[test]
    fn parses_format_and_output_file() {
        let cli = Cli::parse_from(["verchain", "--format", "json", "--output-file", "/tmp/out"]);
        assert!(matches!(cli.format, Some(OutputFormat::Json)));
        assert_eq!(cli.output_file, Some(PathBuf::from("/tmp/out")));
    }

    #[test]
    fn list_edges_needs_no_inputs() {
        let cli = Cli::parse_from(["verchain", "--list-edges"]);
        assert!(run(cli).is_ok());
    }
}
