use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Result;
use clap::Parser;
use hyper::{server::conn::http1, service::service_fn};
use hyper_util::rt::TokioIo;
use log::{debug, info, warn};
use tokio::net::{TcpListener, TcpStream};
use weekcal_service::{
    http::{self, AppState},
    limit::RateLimiter,
};

/// weekcal-service: renders weekly calendars over HTTP.
///
/// POST a JSON list of events to /calendar and get the week back as a PNG image.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Opts {
    /// Address to bind the HTTP listener to.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to bind the HTTP listener to.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Requests admitted per client within one rate limit window.
    #[arg(long, env = "RATE_LIMIT", default_value_t = 5)]
    rate_limit: u32,

    /// Length of the rate limit window, in seconds.
    #[arg(long, env = "RATE_WINDOW_SECS", default_value_t = 60)]
    rate_window_secs: u64,

    /// Largest accepted request body, in bytes.
    #[arg(long, env = "MAX_BODY_BYTES", default_value_t = 1024 * 1024)]
    max_body_bytes: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    let opts = Opts::parse();
    env_logger::init();

    if opts.rate_limit == 0 || opts.rate_window_secs == 0 {
        anyhow::bail!("rate limit and rate limit window must both be greater than zero");
    }

    info!("weekcal-service starting...");
    let limiter = RateLimiter::new(opts.rate_limit, Duration::from_secs(opts.rate_window_secs));
    info!(
        "Rate limit: {} requests per {:?} per client",
        limiter.limit(),
        limiter.window()
    );
    let state = Arc::new(AppState::new(limiter, opts.max_body_bytes));

    let listener = TcpListener::bind((opts.host.as_str(), opts.port)).await?;
    info!("HTTP service listening on {}", listener.local_addr()?);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                info!("Received Ctrl+C signal");
                break;
            }
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((socket, addr)) => {
                        debug!("New connection from {}", addr);
                        let state = state.clone();
                        tokio::spawn(async move {
                            if let Err(e) = handle_connection(socket, addr, state).await {
                                warn!("Error handling connection from {}: {}", addr, e);
                            }
                        });
                    }
                    Err(e) => {
                        warn!("Failed to accept connection: {}", e);
                    }
                }
            }
        }
    }

    info!("weekcal-service shutting down.");
    Ok(())
}

/// Serve HTTP/1 requests on an individual connection
async fn handle_connection(socket: TcpStream, addr: SocketAddr, state: Arc<AppState>) -> Result<()> {
    let io = TokioIo::new(socket);
    let service = service_fn(move |req| http::handle(req, addr, state.clone()));
    http1::Builder::new().serve_connection(io, service).await?;
    Ok(())
}
