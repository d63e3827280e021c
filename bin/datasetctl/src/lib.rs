//! Perform administrative operations on remote datasets from a Command Line Interface.
use anyhow::Result;
use clap::Parser;

use replicore_conf::Conf;
use replicore_context::Context;
use replicore_discovery::Discovery;
use replicore_discovery::StaticDiscovery;
use replidataset_client::Client;
use replidataset_client_http::HttpClient;

mod cmd;
mod input;
mod logging;

pub use self::cmd::Cli;
pub use self::cmd::Command;
pub use self::cmd::MissingDatasetArgument;
pub use self::input::InvalidJsonFile;

// Re-export errors so main can provide more accurate messages.
pub use replidataset_client::errors::DatasetNotFound;
pub use repliclient_utils::Conflict;
pub use repliclient_utils::ServerError;
pub use repliclient_utils::TransportError;

/// Initialise the datasetctl process and invoke a command implementation.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();
    let conf = replicore_conf::load(&cli.config)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(execute(cli, conf))
}

/// Execute the command selected on the command line with the given configuration.
pub async fn execute(cli: Cli, conf: Conf) -> Result<i32> {
    let logger = logging::configure(conf.logging.level);
    let context = Context::root(logger);
    let context = match &cli.principal {
        None => context.anonymous(),
        Some(principal) => context.principal(principal),
    };
    let context = context.build();

    let discovery = Discovery::from(StaticDiscovery::from(&conf.discovery));
    let backend = HttpClient::with(discovery, conf.dataset_executor)?;
    let client = Client::from(backend);
    let dataset = cli.dataset()?;
    slog::debug!(
        context.logger, "Executing datasetctl command";
        "dataset" => dataset.to_string(),
    );
    cmd::run(&context, &client, &dataset, &cli.command).await
}
