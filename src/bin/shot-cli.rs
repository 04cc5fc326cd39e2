use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use reqwest::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use serde_json::Value;
use shot_list_service::http::X_SHOT_LIST_DEGRADED;
use shot_list_service::shots::ShotRequest;

#[derive(Parser)]
#[command(name = "shot-cli")]
#[command(about = "Client for the shot-list service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a script file ("-" for stdin) and print the shot list
    Generate { script: PathBuf },
    /// Send a CORS preflight and print the allowed origin, headers and methods
    Preflight,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Generate { script } => {
            let script = read_script(&script)?;
            let res = client
                .post(&cli.url)
                .json(&ShotRequest { script })
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Preflight => {
            let res = client
                .request(reqwest::Method::OPTIONS, &cli.url)
                .send()
                .await?;
            println!("Status: {}", res.status());
            for name in [
                ACCESS_CONTROL_ALLOW_ORIGIN,
                ACCESS_CONTROL_ALLOW_HEADERS,
                ACCESS_CONTROL_ALLOW_METHODS,
            ] {
                let value = res
                    .headers()
                    .get(&name)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("<missing>");
                println!("{}: {}", name, value);
            }
        }
    }

    Ok(())
}

fn read_script(path: &Path) -> std::io::Result<String> {
    if path.as_os_str() == "-" {
        let mut script = String::new();
        std::io::stdin().read_to_string(&mut script)?;
        Ok(script)
    } else {
        std::fs::read_to_string(path)
    }
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let degraded = res.headers().contains_key(X_SHOT_LIST_DEGRADED.as_str());

    if !status.is_success() {
        let text = res.text().await.unwrap_or_default();
        return Err(status_error(status, &text).into());
    }

    if degraded {
        eprintln!("Warning: the model returned no usable shot list");
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

/// Error for a non-success reply, carrying the service's `error` message
/// when the body has one.
fn status_error(status: reqwest::StatusCode, body: &str) -> String {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| json.get("error").and_then(Value::as_str).map(str::to_owned))
        .unwrap_or_else(|| body.to_string());
    format!("service returned status {}: {}", status, message)
}
