use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use colored::Colorize;
use tokio::net::TcpListener;

use super::{HtmlContext, Plugin};

const DEV_PORT: u16 = 5173;

struct DevState {
    plugin: Box<dyn Plugin>,
    root: PathBuf,
}

/// Serves the project root over HTTP: served HTML goes through the
/// plugin's dev-time transform, virtual-module URLs go through
/// resolve/load, everything else comes straight from disk. Runs until
/// the process is terminated.
pub async fn serve(plugin: Box<dyn Plugin>, root: PathBuf, project_name: &str) -> Result<()> {
    let state = Arc::new(DevState { plugin, root });
    let app = Router::new().fallback(handle).with_state(state);

    let listener = TcpListener::bind(("127.0.0.1", DEV_PORT)).await?;
    let local_url = format!("http://{}/", listener.local_addr()?);

    println!(
        "\n🚀 {} dev server running for \"{}\"",
        "react-mpx".green().bold(),
        project_name
    );
    println!("   {}\n", local_url.cyan());

    axum::serve(listener, app).await?;
    Ok(())
}

async fn handle(State(state): State<Arc<DevState>>, uri: Uri) -> Response {
    let path = uri.path();

    if path == "/" || path == "/index.html" {
        return serve_index(&state).await;
    }

    // Virtual module requests injected by the HTML transform.
    if let Some(id) = path.strip_prefix("/@id/__x00__") {
        if let Some(code) = state
            .plugin
            .resolve_id(id)
            .and_then(|resolved| state.plugin.load(&resolved))
        {
            return ([(header::CONTENT_TYPE, "text/javascript")], code).into_response();
        }
        return StatusCode::NOT_FOUND.into_response();
    }

    serve_file(&state, path).await
}

async fn serve_index(state: &DevState) -> Response {
    match tokio::fs::read_to_string(state.root.join("index.html")).await {
        Ok(html) => {
            let ctx = HtmlContext { server: true };
            let html = state
                .plugin
                .transform_index_html(&html, &ctx)
                .unwrap_or(html);
            (
                [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                html,
            )
                .into_response()
        }
        Err(_) => (StatusCode::NOT_FOUND, "index.html not found").into_response(),
    }
}

async fn serve_file(state: &DevState, path: &str) -> Response {
    let relative = path.trim_start_matches('/');
    if relative.split('/').any(|part| part == "..") {
        return StatusCode::FORBIDDEN.into_response();
    }

    let full = state.root.join(relative);
    match tokio::fs::read(&full).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, content_type(&full))], bytes).into_response(),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js" | "jsx" | "ts" | "tsx" | "mjs") => "text/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_types_cover_module_sources() {
        assert_eq!(content_type(Path::new("a/app.tsx")), "text/javascript");
        assert_eq!(content_type(Path::new("style.css")), "text/css");
        assert_eq!(
            content_type(Path::new("index.html")),
            "text/html; charset=utf-8"
        );
        assert_eq!(content_type(Path::new("favicon")), "application/octet-stream");
    }
}
