//! Preview server with live update support.

mod lifecycle;
mod path;
mod response;

use crate::{
    config::PreviewConfig,
    debug,
    document::{resolve::resolve_document_path, scan, state::PreviewState},
    log,
};
use anyhow::Result;
use crossbeam::channel;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU16, Ordering};
use tiny_http::{Request, Server};

/// Default WebSocket port for live updates
pub const DEFAULT_WS_PORT: u16 = 35729;

/// Actual WebSocket port (may differ from DEFAULT_WS_PORT if port was in use)
/// Updated by coordinator after the WebSocket listener binds successfully
static ACTUAL_WS_PORT: AtomicU16 = AtomicU16::new(DEFAULT_WS_PORT);

/// Update the actual WebSocket port (called by coordinator after binding)
pub fn set_actual_ws_port(port: u16) {
    ACTUAL_WS_PORT.store(port, Ordering::Relaxed);
}

/// Get the actual WebSocket port
fn get_actual_ws_port() -> u16 {
    ACTUAL_WS_PORT.load(Ordering::Relaxed)
}

/// Start the preview server: scan for the initial document, bind, run.
pub fn serve(config: Arc<PreviewConfig>) -> Result<()> {
    let initial = scan::most_recent_document(&config.root, &config.filters).unwrap_or_default();
    debug!("serve"; "initial document: {}", initial.display());

    let state = Arc::new(PreviewState::new(initial));
    let bound = bind_server(&config)?;
    bound.run(config, state)
}

/// Bound server ready to accept requests
pub struct BoundServer {
    server: Arc<Server>,
    addr: SocketAddr,
    shutdown_rx: channel::Receiver<()>,
}

/// Bind the HTTP server without starting the request loop
fn bind_server(config: &PreviewConfig) -> Result<BoundServer> {
    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);

    let (shutdown_tx, shutdown_rx) = channel::unbounded::<()>();
    lifecycle::register_server_for_shutdown(Arc::clone(&server), shutdown_tx);

    log!("serve"; "http://{}", addr);

    Ok(BoundServer {
        server,
        addr,
        shutdown_rx,
    })
}

impl BoundServer {
    /// Get the bound address.
    #[allow(dead_code)]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Start the actor system and the request loop (blocking).
    pub fn run(self, config: Arc<PreviewConfig>, state: Arc<PreviewState>) -> Result<()> {
        let actor_handle = lifecycle::spawn_actors(
            Arc::clone(&config),
            Arc::clone(&state),
            DEFAULT_WS_PORT,
            self.shutdown_rx,
        );
        run_request_loop(&self.server, &config, &state);
        lifecycle::wait_for_shutdown(actor_handle);
        Ok(())
    }
}

fn run_request_loop(server: &Server, config: &Arc<PreviewConfig>, state: &Arc<PreviewState>) {
    // Use thread pool to handle requests concurrently
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .expect("failed to create thread pool");

    for request in server.incoming_requests() {
        let config = Arc::clone(config);
        let state = Arc::clone(state);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &config, &state) {
                log!("serve"; "request error: {e}");
            }
        });
    }
}

/// Handle a single HTTP request
fn handle_request(
    request: Request,
    config: &PreviewConfig,
    state: &PreviewState,
) -> Result<()> {
    // Early exit if shutdown requested
    if crate::core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    let url = path::normalize_url(request.url());

    if url.is_empty() {
        return response::respond_viewer(request);
    }

    // Embedded assets are served from memory
    if let Some(asset) = url.strip_prefix("assets/") {
        return response::respond_embedded(request, asset, get_actual_ws_port());
    }

    // Images referenced by documents come straight off the disk
    if config.filters.is_resource(Path::new(&url)) {
        return match path::resolve_resource(&url, &config.root) {
            Some(file) => response::respond_file(request, &file),
            None => response::respond_not_found(request),
        };
    }

    // Anything else is viewer navigation: the named document becomes
    // current, and the page the browser loads will sync over the socket.
    // Non-document paths (favicon probes and the like) must not clobber
    // the current-file register.
    let document = resolve_document_path(&config.root, Path::new(&url), &config.filters);
    if config.filters.is_document(&document) {
        debug!("serve"; "navigate: {}", document.display());
        state.set_current(&document);
        return response::respond_viewer(request);
    }

    response::respond_not_found(request)
}
