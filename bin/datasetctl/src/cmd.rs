//! Built-in `datasetctl` commands.
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use clap::Parser;
use clap::Subcommand;

use replicore_context::Context;
use replidataset_client::models::DatasetId;
use replidataset_client::Client;

use crate::input;

/// Perform administrative operations on datasets managed by executor services.
#[derive(Debug, Parser)]
#[command(version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file to use.
    #[arg(short = 'c', long = "config", global = true)]
    #[arg(default_value_t = String::from("datasetctl.yaml"))]
    pub config: String,

    /// Name of the dataset to operate on.
    #[arg(long, global = true)]
    pub name: Option<String>,

    /// Namespace the dataset belongs to.
    #[arg(short = 'n', long, global = true)]
    pub namespace: Option<String>,

    /// Name of the user to perform operations for.
    #[arg(long, global = true)]
    pub principal: Option<String>,

    /// Select the administrative operation to perform.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Identifier of the dataset selected with `--namespace` and `--name`.
    pub fn dataset(&self) -> Result<DatasetId> {
        let namespace = match &self.namespace {
            None => anyhow::bail!(MissingDatasetArgument("--namespace")),
            Some(namespace) => namespace,
        };
        let name = match &self.name {
            None => anyhow::bail!(MissingDatasetArgument("--name")),
            Some(name) => name,
        };
        DatasetId::new(namespace, name)
    }
}

/// A required dataset selection argument was not provided.
#[derive(Debug, thiserror::Error)]
#[error("the {0} argument is required to select a dataset")]
pub struct MissingDatasetArgument(pub &'static str);

/// Select the administrative operation to perform.
#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Create a new dataset instance.
    Create(DefineArgs),

    /// Drop a dataset instance.
    Drop(DropArgs),

    /// Check if a dataset instance exists.
    Exists,

    /// Remove all data from a dataset instance.
    Truncate,

    /// Update the properties of a dataset instance.
    Update(UpdateArgs),

    /// Upgrade a dataset instance to the latest version of its type.
    Upgrade,
}

/// Arguments to define a dataset instance.
#[derive(Args, Clone, Debug)]
pub struct DefineArgs {
    /// Optional description of the dataset.
    #[arg(long)]
    pub description: Option<String>,

    /// Dataset property in the `key=value` format.
    #[arg(short = 'p', long = "property", value_parser = input::parse_property)]
    pub properties: Vec<(String, String)>,

    /// Path to a JSON file with the dataset type metadata.
    #[arg(long = "type-meta")]
    pub type_meta: PathBuf,
}

/// Arguments to drop a dataset instance.
#[derive(Args, Clone, Debug)]
pub struct DropArgs {
    /// Path to a JSON file with the current dataset specification.
    #[arg(long)]
    pub spec: PathBuf,

    /// Path to a JSON file with the dataset type metadata.
    #[arg(long = "type-meta")]
    pub type_meta: PathBuf,
}

/// Arguments to update a dataset instance.
#[derive(Args, Clone, Debug)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub define: DefineArgs,

    /// Path to a JSON file with the existing dataset specification.
    #[arg(long)]
    pub spec: PathBuf,
}

/// Execute the selected command against the dataset and print its result.
pub async fn run(
    context: &Context,
    client: &Client,
    dataset: &DatasetId,
    command: &Command,
) -> Result<i32> {
    match command {
        Command::Create(args) => {
            let type_meta = input::type_meta(&args.type_meta)?;
            let properties = input::properties(&args.properties, args.description.as_deref());
            let response = client
                .create(context, dataset, type_meta, properties)
                .await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Drop(args) => {
            let type_meta = input::type_meta(&args.type_meta)?;
            let spec = input::spec(&args.spec)?;
            client.drop(context, dataset, type_meta, spec).await?;
            slog::info!(context.logger, "Dataset dropped");
        }
        Command::Exists => {
            let exists = client.exists(context, dataset).await?;
            println!("{}", serde_json::json!({ "exists": exists }));
        }
        Command::Truncate => {
            client.truncate(context, dataset).await?;
            slog::info!(context.logger, "Dataset truncated");
        }
        Command::Update(args) => {
            let type_meta = input::type_meta(&args.define.type_meta)?;
            let properties =
                input::properties(&args.define.properties, args.define.description.as_deref());
            let existing = input::spec(&args.spec)?;
            let response = client
                .update(context, dataset, type_meta, properties, existing)
                .await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Upgrade => {
            client.upgrade(context, dataset).await?;
            slog::info!(context.logger, "Dataset upgraded");
        }
    };
    Ok(0)
}
