//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the dispatching handler
//! - Wire up middleware (request ID, tracing, timeout, CORS backstop)
//! - Bind server to listener and serve until shutdown
//! - Record per-request metrics

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::handlers;
use crate::http::request::{IncomingRequest, MakeRequestUuidV4, X_REQUEST_ID};
use crate::lifecycle::shutdown::triggered;
use crate::observability::metrics;
use crate::routing::Capability;
use crate::security::CorsPolicy;
use crate::upstream::{UpstreamClient, UpstreamResult};

/// Application state injected into handlers.
///
/// Everything here is read-only; requests share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProxyConfig>,
    pub upstream: UpstreamClient,
    pub cors: CorsPolicy,
}

impl AppState {
    pub fn new(config: ProxyConfig) -> UpstreamResult<Self> {
        let upstream = UpstreamClient::new(&config.upstream, &config.timeouts)?;
        Ok(Self {
            config: Arc::new(config),
            upstream,
            cors: CorsPolicy::for_capabilities(&Capability::ALL),
        })
    }
}

/// HTTP server for the cat proxy.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> UpstreamResult<Self> {
        if config.upstream.api_key.is_empty() {
            tracing::warn!("No upstream credential configured; upstream will reject calls");
        }

        let state = AppState::new(config)?;
        let router = Self::build_router(&state);
        Ok(Self { router, state })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: &AppState) -> Router {
        let [origin, methods, headers] = state.cors.header_pairs();

        Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state.clone())
            .layer(TimeoutLayer::new(Duration::from_secs(
                state.config.timeouts.request_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get(X_REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id,
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
            .layer(SetResponseHeaderLayer::if_not_present(origin.0, origin.1))
            .layer(SetResponseHeaderLayer::if_not_present(methods.0, methods.1))
            .layer(SetResponseHeaderLayer::if_not_present(headers.0, headers.1))
    }

    /// A clone of the fully layered router, for driving without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.state.upstream.base_url(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(triggered(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.state.config
    }
}

/// Entry point for every request: resolve, dispatch, record.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request = IncomingRequest::from(request);
    let method = request.method.clone();

    tracing::debug!(
        request_id = %request.request_id,
        method = %method,
        path = %request.path,
        "Dispatching request"
    );

    let (route, response) = handlers::dispatch(&state, request).await;

    metrics::record_request(
        route.label(),
        &method,
        response.status().as_u16(),
        start_time,
    );

    response
}
