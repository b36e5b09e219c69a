use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use dome9_config::ProviderConfig;
use dome9_provider::{Dome9Provider, Operation, ResourceData};
use dome9_sdk::Client;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "dome9")]
#[command(about = "Manage Dome9 resources one at a time", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Refresh a resource from the API
    Read {
        #[command(flatten)]
        target: Target,
    },
    /// Create a resource from an attribute file
    Create {
        #[command(flatten)]
        target: Target,
    },
    /// Apply changed attributes to an existing resource
    Update {
        #[command(flatten)]
        target: Target,
        /// JSON file with the last known attributes (change detection)
        #[arg(short, long)]
        prior: Option<PathBuf>,
    },
    /// Delete a resource
    Delete {
        #[command(flatten)]
        target: Target,
    },
    /// Read a data source
    Data {
        #[command(flatten)]
        target: Target,
    },
    /// Show version
    Version,
}

#[derive(Args)]
struct Target {
    /// Resource or data source type (e.g. dome9_ip_list)
    type_name: String,
    /// Resource id
    #[arg(long)]
    id: Option<String>,
    /// JSON file with the configured attributes
    #[arg(short, long)]
    attributes: Option<PathBuf>,
}

impl Target {
    fn resource_data(&self, prior: Option<&Path>) -> anyhow::Result<ResourceData> {
        let attributes = match &self.attributes {
            Some(path) => read_attributes(path)?,
            None => Map::new(),
        };
        let mut d = ResourceData::from_attributes(attributes);
        if let Some(id) = &self.id {
            d.set_id(id.clone());
        }
        if let Some(path) = prior {
            d = d.with_prior(read_attributes(path)?);
        }
        Ok(d)
    }
}

fn read_attributes(path: &Path) -> anyhow::Result<Map<String, Value>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    match serde_json::from_str::<Value>(&content)
        .with_context(|| format!("invalid JSON in {}", path.display()))?
    {
        Value::Object(map) => Ok(map),
        _ => anyhow::bail!("{} must contain a JSON object", path.display()),
    }
}

fn build_provider() -> anyhow::Result<Dome9Provider> {
    let config = ProviderConfig::load()?;
    let http = config.to_http_config()?;
    tracing::debug!("Using Dome9 API at {}", http.base_url);
    let client = Client::from_config(http)?;
    Ok(Dome9Provider::new(client))
}

async fn run_resource(
    type_name: &str,
    operation: Operation,
    mut d: ResourceData,
) -> anyhow::Result<()> {
    let provider = build_provider()?;
    provider.apply(type_name, operation, &mut d).await?;

    match operation {
        Operation::Delete => eprintln!("{} deleted {}", "✓".green(), type_name.cyan()),
        _ if d.is_present() => eprintln!("{} {} {}", "✓".green(), operation, type_name.cyan()),
        _ => eprintln!(
            "{} {} no longer exists in Dome9",
            "!".yellow(),
            type_name.cyan()
        ),
    }
    println!("{}", serde_json::to_string_pretty(&d)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries the resulting JSON, logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    match cli.command {
        Commands::Version => {
            println!("dome9 {}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Read { target } => {
            let d = target.resource_data(None)?;
            run_resource(&target.type_name, Operation::Read, d).await?;
        }
        Commands::Create { target } => {
            let d = target.resource_data(None)?;
            run_resource(&target.type_name, Operation::Create, d).await?;
        }
        Commands::Update { target, prior } => {
            let d = target.resource_data(prior.as_deref())?;
            run_resource(&target.type_name, Operation::Update, d).await?;
        }
        Commands::Delete { target } => {
            let d = target.resource_data(None)?;
            run_resource(&target.type_name, Operation::Delete, d).await?;
        }
        Commands::Data { target } => {
            let mut d = target.resource_data(None)?;
            let provider = build_provider()?;
            provider.read_data_source(&target.type_name, &mut d).await?;
            println!("{}", serde_json::to_string_pretty(&d)?);
        }
    }

    Ok(())
}
