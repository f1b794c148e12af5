use std::path::PathBuf;

use clap::{Parser, Subcommand};
use drive_relay::upstream::{ListFilesQuery, DEFAULT_PAGE_SIZE};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "drive-cli")]
#[command(about = "Command-line client for the Drive relay", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080", env = "RELAY_URL")]
    url: String,

    /// Google OAuth access token
    #[arg(short, long, env = "GOOGLE_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the relay is up
    Health,
    /// Show the token owner's profile
    Me,
    /// List files
    Ls {
        /// Drive search expression, e.g. "name contains 'report'"
        #[arg(short, long)]
        query: Option<String>,

        #[arg(short = 'n', long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: u32,

        /// `nextPageToken` from a previous listing
        #[arg(short, long)]
        page_token: Option<String>,
    },
    /// Show one file's metadata
    Stat { file_id: String },
    /// Download a file's content
    Get {
        file_id: String,

        /// Destination path; defaults to the file ID
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    if let Some(token) = &cli.token {
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token))?,
        );
    }

    match cli.command {
        Commands::Health => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Me => {
            let res = client
                .get(format!("{}/me", cli.url))
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Ls {
            query,
            page_size,
            page_token,
        } => {
            let params = ListFilesQuery {
                q: query,
                page_token,
                page_size,
            };
            let res = client
                .get(format!("{}/drive/files", cli.url))
                .headers(headers)
                .query(&params)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Stat { file_id } => {
            let res = client
                .get(file_url(&cli.url, &file_id, None)?)
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Get { file_id, output } => {
            let res = client
                .get(file_url(&cli.url, &file_id, Some("download"))?)
                .headers(headers)
                .send()
                .await?;
            let status = res.status();
            if !status.is_success() {
                return report_error(res).await;
            }
            let dest = output.unwrap_or_else(|| PathBuf::from(&file_id));
            let bytes = res.bytes().await?;
            tokio::fs::write(&dest, &bytes).await?;
            println!("Wrote {} bytes to {}", bytes.len(), dest.display());
        }
    }

    Ok(())
}

fn file_url(
    base: &str,
    file_id: &str,
    suffix: Option<&str>,
) -> Result<url::Url, Box<dyn std::error::Error>> {
    let mut url = url::Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| format!("relay URL cannot be a base: {}", base))?
        .pop_if_empty()
        .extend(["drive", "files", file_id])
        .extend(suffix);
    Ok(url)
}

async fn report_error(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Error: relay returned status {}", res.status());
    if let Ok(text) = res.text().await {
        eprintln!("Response: {}", text);
    }
    std::process::exit(1);
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    if !res.status().is_success() {
        return report_error(res).await;
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
