//! HTTP response handlers.

use crate::embed::serve::{VIEWER_CSS, VIEWER_HTML, VIEWER_JS, ViewerVars};
use crate::utils::mime;
use anyhow::{Context, Result};
use std::{fs, path::Path};
use tiny_http::{Header, Request, Response, StatusCode};

/// Respond with the viewer page shell.
///
/// Never cacheable: every navigation must re-run the sync handshake, and
/// the browser must not replay a stale document list.
pub fn respond_viewer(request: Request) -> Result<()> {
    let response = Response::from_string(VIEWER_HTML)
        .with_header(make_header("Content-Type", mime::types::HTML))
        .with_header(make_header("Cache-Control", "no-cache"));
    request.respond(response)?;
    Ok(())
}

/// Respond with an embedded asset from memory.
pub fn respond_embedded(request: Request, asset: &str, ws_port: u16) -> Result<()> {
    match asset {
        "viewer.css" => send_body(
            request,
            200,
            mime::types::CSS,
            VIEWER_CSS.as_bytes().to_vec(),
        ),
        "viewer.js" => send_body(
            request,
            200,
            mime::types::JAVASCRIPT,
            VIEWER_JS.render(&ViewerVars { ws_port }).into_bytes(),
        ),
        _ => respond_not_found(request),
    }
}

/// Respond with a static file from the serving root.
pub fn respond_file(request: Request, path: &Path) -> Result<()> {
    let content_type = mime::from_path(path);
    let body = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    send_body(request, 200, content_type, body)
}

/// Respond with 404.
pub fn respond_not_found(request: Request) -> Result<()> {
    send_body(
        request,
        404,
        mime::types::PLAIN,
        b"404 Not Found".to_vec(),
    )
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    send_body(
        request,
        503,
        mime::types::PLAIN,
        b"503 Service Unavailable".to_vec(),
    )
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &'static str, value: &'static str) -> Header {
    Header::from_bytes(key, value).unwrap()
}
