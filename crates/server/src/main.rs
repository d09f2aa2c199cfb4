mod session_loop;

use std::net::TcpListener;
use std::process;
use std::thread;

use clap::Parser;

use posecoach_core::detection::infrastructure::gateway_factory::{create_gateway, GatewayConfig};

/// Websocket server that guides a user through a two-pose face capture.
#[derive(Parser)]
#[command(name = "posecoach")]
struct Cli {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:3000")]
    listen: String,

    /// Replay recorded detection fixtures instead of calling a detection
    /// service.
    #[arg(long)]
    fixtures: bool,

    /// Detection service endpoint URL (required unless --fixtures).
    #[arg(long)]
    endpoint: Option<String>,

    /// API key sent to the detection service.
    #[arg(long)]
    api_key: Option<String>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = gateway_config(&cli)?;

    let listener = TcpListener::bind(&cli.listen)?;
    log::info!("Listening at {}...", cli.listen);

    for stream in listener.incoming() {
        let stream = match stream {
            Ok(stream) => stream,
            Err(e) => {
                log::warn!("accept failed: {e}");
                continue;
            }
        };
        let config = config.clone();
        thread::spawn(move || {
            let peer = stream
                .peer_addr()
                .map(|addr| addr.to_string())
                .unwrap_or_else(|_| "<unknown>".to_string());
            log::info!("connection from {peer}");

            let gateway = match create_gateway(&config) {
                Ok(gateway) => gateway,
                Err(e) => {
                    log::warn!("could not build detection gateway for {peer}: {e}");
                    return;
                }
            };
            if let Err(e) = session_loop::run_session(stream, gateway) {
                log::warn!("session for {peer} ended: {e}");
            } else {
                log::info!("session for {peer} finished");
            }
        });
    }

    Ok(())
}

fn gateway_config(cli: &Cli) -> Result<GatewayConfig, Box<dyn std::error::Error>> {
    if cli.fixtures {
        if cli.endpoint.is_some() {
            return Err("--fixtures and --endpoint are mutually exclusive".into());
        }
        return Ok(GatewayConfig::Fixtures);
    }
    match &cli.endpoint {
        Some(endpoint) => Ok(GatewayConfig::Http {
            endpoint: endpoint.clone(),
            api_key: cli.api_key.clone(),
        }),
        None => Err("--endpoint is required unless --fixtures is used".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(fixtures: bool, endpoint: Option<&str>) -> Cli {
        Cli {
            listen: "127.0.0.1:3000".to_string(),
            fixtures,
            endpoint: endpoint.map(str::to_string),
            api_key: None,
        }
    }

    #[test]
    fn test_fixtures_flag_selects_fixture_gateway() {
        let config = gateway_config(&cli(true, None)).unwrap();
        assert!(matches!(config, GatewayConfig::Fixtures));
    }

    #[test]
    fn test_endpoint_selects_http_gateway() {
        let config = gateway_config(&cli(false, Some("http://localhost:8080/detect"))).unwrap();
        assert!(matches!(config, GatewayConfig::Http { .. }));
    }

    #[test]
    fn test_endpoint_required_without_fixtures() {
        assert!(gateway_config(&cli(false, None)).is_err());
    }

    #[test]
    fn test_fixtures_and_endpoint_conflict() {
        assert!(gateway_config(&cli(true, Some("http://localhost:8080"))).is_err());
    }
}
