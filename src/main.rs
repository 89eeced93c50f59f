use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use pharmgate::config::Config;
use pharmgate::proxy::{ProxyState, router};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// pharmgate - API proxy for the Meridian Instruments website
///
/// Sits between the public website and the private backend: forwards API
/// calls, preserves multipart job applications, and serves backend images
/// with client-side caching.
///
/// The backend base URL can also be set via the PHARMGATE_API_URL
/// environment variable.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Address to listen on (also via PHARMGATE_LISTEN)
    #[arg(
        long = "listen",
        short = 'l',
        env = "PHARMGATE_LISTEN",
        value_name = "ADDR",
        default_value = "0.0.0.0:8080"
    )]
    listen: String,

    /// Backend API base URL (defaults to the production backend)
    #[arg(long = "api-url", env = "PHARMGATE_API_URL", value_name = "URL")]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pharmgate=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = match cli.api_url {
        Some(url) => Config::new(url),
        None => Config::from_env(),
    };

    info!("Proxying requests to {}", config.base_url);

    let state = ProxyState::new(&config.base_url, config.timeout)?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&cli.listen)
        .await
        .with_context(|| format!("Failed to bind {}", cli.listen))?;
    info!("Listening on {}", cli.listen);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["pharmgate"]).unwrap();
        assert_eq!(cli.listen, "0.0.0.0:8080");
    }

    #[test]
    fn test_cli_listen_flag() {
        let cli = Cli::try_parse_from(["pharmgate", "--listen", "127.0.0.1:9000"]).unwrap();
        assert_eq!(cli.listen, "127.0.0.1:9000");
    }

    #[test]
    fn test_cli_api_url_flag() {
        let cli = Cli::try_parse_from(["pharmgate", "--api-url", "http://localhost:8000/api/v1"])
            .unwrap();
        assert_eq!(cli.api_url, Some("http://localhost:8000/api/v1".to_string()));
    }

    #[test]
    fn test_cli_rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["pharmgate", "--port", "9090"]).is_err());
    }
}
