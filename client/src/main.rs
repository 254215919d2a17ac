use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt, EnvFilter};

use cdng_client::{ConfigManager, ConfigOverrides, Envelope, Operation, RemoteClient};

/// Command-line client for the cdng NGINX proxy backend
#[derive(Parser, Debug)]
#[clap(name = "cdng")]
#[clap(about = "Manage NGINX domains, ports and service state on a cdng backend", long_about = None)]
struct Args {
    /// Path to the config file (defaults to ./cdng.toml when present)
    #[clap(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Backend base URL, overrides config and CDNG_URL
    #[clap(long, value_name = "URL")]
    url: Option<String>,

    /// API key, overrides config, secrets file and CDNG_API_KEY
    #[clap(long, value_name = "KEY")]
    api_key: Option<String>,

    /// Skip TLS certificate and hostname verification
    #[clap(long)]
    insecure: bool,

    /// Print the raw JSON envelope
    #[clap(long)]
    json: bool,

    /// Log requests and responses to stderr
    #[clap(short, long)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a new domain
    AddDomain { domain: String, ip: String },
    /// Delete a domain
    DeleteDomain { domain: String },
    /// Add a new listen port
    AddPort {
        #[clap(value_parser = clap::value_parser!(u16).range(1..))]
        port: u16,
    },
    /// Delete a listen port
    DeletePort {
        #[clap(value_parser = clap::value_parser!(u16).range(1..))]
        port: u16,
    },
    /// Show whether nginx is running
    Status,
    /// Reload nginx configuration
    Reload,
    /// Stop nginx
    Stop,
    /// Restart nginx
    Restart,
    /// Get system statistics
    Stats,
}

impl Command {
    fn into_operation(self) -> Operation {
        match self {
            Command::AddDomain { domain, ip } => Operation::AddDomain { domain, ip },
            Command::DeleteDomain { domain } => Operation::DeleteDomain { domain },
            Command::AddPort { port } => Operation::AddPort {
                port: port.to_string(),
            },
            Command::DeletePort { port } => Operation::DeletePort {
                port: port.to_string(),
            },
            Command::Status => Operation::Status,
            Command::Reload => Operation::Reload,
            Command::Stop => Operation::Stop,
            Command::Restart => Operation::Restart,
            Command::Stats => Operation::Stats,
        }
    }
}

impl Args {
    /// Connection settings given on the command line
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            url: self.url.clone(),
            api_key: self.api_key.clone(),
            insecure: self.insecure,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let crate_level = if args.verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::from_default_env()
        .add_directive(format!("cdng={}", crate_level).parse()?)
        .add_directive(format!("cdng_client={}", crate_level).parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let config_manager = ConfigManager::load(args.config.as_deref(), args.overrides()).await?;
    let config = config_manager.get_current_config();

    let client = RemoteClient::from_config((*config).clone())?;
    let operation = args.command.into_operation();

    info!("Running {} against {}", operation.name(), client.base_url());

    let envelope = client
        .execute(&operation)
        .await
        .with_context(|| format!("{} failed", operation.name()))?;

    debug!("Envelope: {:?}", envelope);

    println!("{}", render(&operation, &envelope, args.json)?);
    Ok(())
}

/// Text printed to stdout for a successful operation
fn render(operation: &Operation, envelope: &Envelope, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(envelope)?);
    }

    let text = match operation {
        Operation::Status => format!("nginx: {}", envelope.nginx_status()?),
        Operation::Stats => envelope.stats()?.to_string(),
        _ => envelope
            .message()
            .unwrap_or_else(|| operation.success_message().to_string()),
    };
    Ok(text)
}
