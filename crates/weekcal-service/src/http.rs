//! HTTP front end: routes requests, applies the rate limit and renders calendars.

use std::{
    convert::Infallible,
    error::Error as StdError,
    net::{IpAddr, SocketAddr},
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use http_body_util::{BodyExt, Full, Limited};
use hyper::{
    HeaderMap, Method, Request, Response, StatusCode,
    body::{Body, Bytes},
    header,
};
use log::{info, warn};
use weekcal_render::{Event, RenderError};

use crate::limit::{RateLimitError, RateLimiter};

pub const CALENDAR_PATH: &str = "/calendar";

const DECODE_ERROR_MESSAGE: &str = "there was an error decoding your events. please make sure they are in a correctly formatted json list.";
const RENDER_FAULT_MESSAGE: &str = "there was an error generating the calendar";

/// State shared by every connection.
#[derive(Debug)]
pub struct AppState {
    limiter: Mutex<RateLimiter>,
    max_body_bytes: usize,
}

impl AppState {
    pub fn new(limiter: RateLimiter, max_body_bytes: usize) -> Self {
        AppState {
            limiter: Mutex::new(limiter),
            max_body_bytes,
        }
    }

    fn admit(&self, client: IpAddr) -> Result<(), RateLimitError> {
        let mut limiter = self
            .limiter
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        limiter.check(client, Instant::now())
    }
}

/// Handle one request and log its outcome.
pub async fn handle<B>(
    req: Request<B>,
    peer: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn StdError + Send + Sync>>,
{
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let client = client_ip(req.headers(), peer);

    let response = route(req, client, &state).await;

    info!(
        "{} {} {} from {} in {:?}",
        method,
        path,
        response.status().as_u16(),
        client,
        started.elapsed()
    );
    Ok(response)
}

async fn route<B>(req: Request<B>, client: IpAddr, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<Box<dyn StdError + Send + Sync>>,
{
    if let Err(RateLimitError::Exhausted { retry_after }) = state.admit(client) {
        return too_many_requests(retry_after);
    }

    match (req.method(), req.uri().path()) {
        (&Method::POST, CALENDAR_PATH) => render_calendar(req, state).await,
        (_, CALENDAR_PATH) => {
            let mut response = text_response(StatusCode::METHOD_NOT_ALLOWED, "method not allowed");
            response
                .headers_mut()
                .insert(header::ALLOW, header::HeaderValue::from_static("POST"));
            response
        }
        _ => text_response(StatusCode::NOT_FOUND, "not found"),
    }
}

async fn render_calendar<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Into<Box<dyn StdError + Send + Sync>>,
{
    let body = match Limited::new(req.into_body(), state.max_body_bytes)
        .collect()
        .await
    {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.is::<http_body_util::LengthLimitError>() => {
            return text_response(StatusCode::PAYLOAD_TOO_LARGE, "request body too large");
        }
        Err(e) => {
            warn!("Failed to read request body: {}", e);
            return text_response(StatusCode::BAD_REQUEST, DECODE_ERROR_MESSAGE);
        }
    };

    let events: Vec<Event> = match serde_json::from_slice(&body) {
        Ok(events) => events,
        Err(e) => {
            info!("Rejected event list: {}", e);
            return text_response(StatusCode::BAD_REQUEST, DECODE_ERROR_MESSAGE);
        }
    };

    // Rendering is CPU bound, keep it off the reactor threads
    let rendered = tokio::task::spawn_blocking(move || weekcal_render::render_calendar(&events)).await;

    match rendered {
        Ok(Ok(png)) => {
            let mut response = Response::new(Full::new(Bytes::from(png)));
            response.headers_mut().insert(
                header::CONTENT_TYPE,
                header::HeaderValue::from_static("image/png"),
            );
            response
        }
        Ok(Err(e)) => render_error_response(&e),
        Err(e) => {
            warn!("Render task failed: {}", e);
            text_response(StatusCode::INTERNAL_SERVER_ERROR, RENDER_FAULT_MESSAGE)
        }
    }
}

fn render_error_response(err: &RenderError) -> Response<Full<Bytes>> {
    if err.is_client_error() {
        info!("Rejected calendar: {}", err);
        text_response(StatusCode::BAD_REQUEST, &err.to_string())
    } else {
        warn!("Failed to render calendar: {}", err);
        text_response(StatusCode::INTERNAL_SERVER_ERROR, RENDER_FAULT_MESSAGE)
    }
}

/// Resolve the client address, preferring proxy headers over the TCP peer.
///
/// `X-Real-IP` wins over the first `X-Forwarded-For` entry. Unparseable
/// header values are ignored.
pub fn client_ip(headers: &HeaderMap, peer: SocketAddr) -> IpAddr {
    let header_ip = |name: &str, first_only: bool| {
        let value = headers.get(name)?.to_str().ok()?;
        let value = if first_only {
            value.split(',').next()?
        } else {
            value
        };
        value.trim().parse::<IpAddr>().ok()
    };

    header_ip("x-real-ip", false)
        .or_else(|| header_ip("x-forwarded-for", true))
        .unwrap_or_else(|| peer.ip())
}

fn too_many_requests(retry_after: Duration) -> Response<Full<Bytes>> {
    let mut response = text_response(StatusCode::TOO_MANY_REQUESTS, "too many requests");
    // Round up so clients never retry before the window resets
    let seconds = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
    response
        .headers_mut()
        .insert(header::RETRY_AFTER, header::HeaderValue::from(seconds));
    response
}

fn text_response(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(format!("{message}\n"))));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}
