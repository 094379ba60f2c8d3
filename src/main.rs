//! Command-line client for the resilient REST transport.
//!
//! Issues one call through the retry loop and prints the response.
//! Ctrl+C cancels the call, including any pending backoff.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use url::Url;

use resilient_rest::config::{load_config, TransportConfig};
use resilient_rest::lifecycle::signals::cancel_on_ctrl_c;
use resilient_rest::observability::logging::init_logging;
use resilient_rest::{CancelToken, RestClient, RestError, RestRequest, RestResponse};

#[derive(Parser)]
#[command(name = "resilient-rest")]
#[command(about = "Issue REST calls with retry, backoff and dual timeouts", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Value for the Authorization header.
    #[arg(short, long)]
    token: Option<String>,

    /// Whole-call timeout in seconds, 0 for none (overrides config).
    #[arg(long)]
    rest_timeout_secs: Option<u64>,

    /// Per-attempt timeout in seconds, 0 for none (overrides config).
    #[arg(long)]
    http_timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// GET a JSON resource
    Get { url: Url },
    /// POST a JSON body
    Post {
        url: Url,
        /// JSON request body.
        #[arg(short, long)]
        data: String,
    },
    /// Download a result chunk
    Download {
        url: Url,
        /// Query result master key.
        #[arg(long)]
        qrmk: Option<String>,
        /// Write the chunk here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => TransportConfig::default(),
    };
    if let Some(secs) = cli.rest_timeout_secs {
        config.timeouts.rest_timeout_secs = secs;
    }
    if let Some(secs) = cli.http_timeout_secs {
        config.timeouts.http_timeout_secs = secs;
    }

    init_logging(&config.observability)?;

    tracing::debug!(
        rest_timeout = ?config.timeouts.rest_timeout(),
        http_timeout = ?config.timeouts.http_timeout(),
        "Configuration loaded"
    );

    let client = RestClient::from_config(&config)?;
    let cancel = CancelToken::new();
    cancel_on_ctrl_c(cancel.clone());

    let result = match cli.command {
        Commands::Get { url } => {
            let request = authorize(client.get(url), cli.token.as_deref())?;
            client.execute(&request, &cancel).await
        }
        Commands::Post { url, data } => {
            let payload: serde_json::Value = serde_json::from_str(&data)?;
            let request = authorize(client.post(url, &payload)?, cli.token.as_deref())?;
            client.execute(&request, &cancel).await
        }
        Commands::Download { url, qrmk, output } => {
            let mut request = client.download_request(url);
            request.qrmk = qrmk;
            match client.download(request, &cancel).await {
                Ok(response) => {
                    if let Some(path) = output {
                        tokio::fs::write(&path, &response.body).await?;
                        println!("Wrote {} bytes to {}", response.body.len(), path.display());
                        return Ok(ExitCode::SUCCESS);
                    }
                    Ok(response)
                }
                Err(e) => Err(e),
            }
        }
    };

    match result {
        Ok(response) => {
            print_response(&response)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(RestError::Cancelled) => {
            eprintln!("Cancelled");
            Ok(ExitCode::from(130))
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn authorize(
    request: RestRequest,
    token: Option<&str>,
) -> Result<RestRequest, Box<dyn std::error::Error>> {
    match token {
        Some(token) => Ok(request.with_authorization(token)?),
        None => Ok(request),
    }
}

fn print_response(response: &RestResponse) -> Result<(), Box<dyn std::error::Error>> {
    match response.json::<serde_json::Value>() {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", response.text()),
    }
    Ok(())
}
