//! Development server with live reload
//!
//! Serves the theme directory locally:
//! - Static file serving with explicit content types
//! - Per-request asset resolution injected into served HTML
//! - WebSocket-based live reload driven by a file watcher

mod reload;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use colored::Colorize;
use globset::{Glob, GlobSet, GlobSetBuilder};
use notify::RecursiveMode;
use notify_debouncer_mini::new_debouncer;
use once_cell::sync::Lazy;
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;
use tracing::{debug, error, info, warn};

use crate::cli::DevServerOptions;
use crate::config::{default_watch, Config};
use crate::registry::{AssetRegistry, RegistryError};
use crate::resolver::{resolve_assets, DiskFs, Environment};
use crate::utils;

pub use reload::ReloadMessage;

/// Compiled default watch globs, used when the configured ones fail to build.
static DEFAULT_WATCH_SET: Lazy<GlobSet> =
    Lazy::new(|| build_watch_set(&default_watch()).expect("default watch globs are valid"));

/// Shared server state
struct ServerState {
    /// Theme configuration
    config: Arc<Config>,

    /// Environment assets are resolved for
    environment: Environment,

    /// Reload broadcast channel
    reload_tx: broadcast::Sender<ReloadMessage>,

    /// Whether live reload is enabled
    reload_enabled: bool,
}

/// Development server
pub struct DevServer {
    /// Theme configuration
    config: Arc<Config>,

    /// Environment assets are resolved for
    environment: Environment,

    /// Server options
    options: DevServerOptions,
}

impl DevServer {
    /// Create a new development server
    pub fn new(
        config: Arc<Config>,
        environment: Environment,
        options: DevServerOptions,
    ) -> Result<Self> {
        Ok(Self {
            config,
            environment,
            options,
        })
    }

    /// Start the development server
    pub async fn start(&self) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.options.host, self.options.port).parse()?;

        // Create reload broadcast channel
        let (reload_tx, _) = broadcast::channel::<ReloadMessage>(100);

        // Create shared state
        let state = Arc::new(ServerState {
            config: self.config.clone(),
            environment: self.environment,
            reload_tx: reload_tx.clone(),
            reload_enabled: self.options.reload,
        });

        // Set up file watcher
        if self.options.reload {
            self.setup_file_watcher(reload_tx.clone())?;
        }

        // Build router
        let app = Router::new()
            .route("/", get(serve_index))
            .route("/*path", get(serve_file))
            .route("/__thematic_reload", get(reload::reload_websocket))
            .layer(CorsLayer::permissive())
            .with_state(state);

        // Open browser if requested
        if self.options.open {
            let url = format!("http://{}", addr);
            if let Err(e) = webbrowser_open(&url) {
                debug!("Failed to open browser: {}", e);
            }
        }

        // Start server
        info!("Server listening on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Set up file watching for live reload
    fn setup_file_watcher(&self, reload_tx: broadcast::Sender<ReloadMessage>) -> Result<()> {
        let root = self.config.root.clone();
        let watch_set = build_watch_set(&self.config.dev.watch).unwrap_or_else(|e| {
            warn!("Invalid watch glob, using defaults: {}", e);
            DEFAULT_WATCH_SET.clone()
        });

        // Use a debouncer to avoid too many events
        let (tx, rx) = std::sync::mpsc::channel();

        let mut debouncer = new_debouncer(std::time::Duration::from_millis(300), tx)?;

        // Watch the theme directory
        debouncer.watcher().watch(&root, RecursiveMode::Recursive)?;

        // Spawn a thread to handle file change events
        // The debouncer is moved into the thread to keep it alive
        std::thread::spawn(move || {
            // Keep debouncer alive for the duration of the watcher
            let _debouncer = debouncer;

            // Content digests from the previous pass, to skip reloads for
            // writes that did not actually change anything
            let mut digests: HashMap<PathBuf, String> = HashMap::new();

            loop {
                match rx.recv() {
                    Ok(Ok(events)) => {
                        for event in events {
                            handle_file_change(
                                &event.path,
                                &root,
                                &watch_set,
                                &mut digests,
                                &reload_tx,
                            );
                        }
                    }
                    Ok(Err(e)) => {
                        error!("Watch error: {:?}", e);
                    }
                    Err(_) => {
                        // Channel closed, exit
                        break;
                    }
                }
            }
        });

        Ok(())
    }
}

/// Build a glob set from configured watch patterns
fn build_watch_set(globs: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for glob in globs {
        builder.add(Glob::new(glob)?);
    }
    Ok(builder.build()?)
}

/// Handle a file change event
fn handle_file_change(
    path: &Path,
    root: &Path,
    watch_set: &GlobSet,
    digests: &mut HashMap<PathBuf, String>,
    reload_tx: &broadcast::Sender<ReloadMessage>,
) {
    let rel = match utils::relative_path(root, path) {
        Some(rel) => rel,
        None => return,
    };

    if !watch_set.is_match(&rel) {
        return;
    }

    // Editors and watch-mode builds rewrite files without changing them;
    // only a changed content digest triggers a reload
    match std::fs::read(path) {
        Ok(bytes) => {
            let digest = utils::hash_content(&bytes);
            if digests.get(path) == Some(&digest) {
                return;
            }
            digests.insert(path.to_path_buf(), digest);
        }
        Err(_) => {
            // Deleted or unreadable: forget it and reload
            digests.remove(path);
        }
    }

    eprintln!("  {} File changed: {}", "↻".yellow(), rel.dimmed());

    let message = if rel.ends_with(".css") {
        ReloadMessage::CssUpdate { path: rel }
    } else {
        ReloadMessage::FullReload {
            reason: format!("File changed: {}", rel),
        }
    };

    let _ = reload_tx.send(message);
}

/// Resolve assets and render the head/footer tags for one page render.
///
/// Runs fresh per request: a rebuild between two requests changes the
/// next response.
fn rendered_tags(state: &ServerState) -> Result<(String, String), RegistryError> {
    let fs = DiskFs::new(state.config.root.clone());

    let mut registry = AssetRegistry::new();
    registry.seed_base_styles(&state.config.theme)?;

    for registration in resolve_assets(state.environment, &fs) {
        registry.register(registration)?;
    }

    // Tags point back at this server, whatever base_url is configured
    Ok((registry.head_tags("/"), registry.footer_tags("/")))
}

/// Serve the index.html file
async fn serve_index(State(state): State<Arc<ServerState>>) -> Response {
    let index_path = state.config.root.join("index.html");

    let content = if index_path.exists() {
        match std::fs::read_to_string(&index_path) {
            Ok(content) => content,
            Err(e) => {
                error!("Failed to read index.html: {}", e);
                return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read index.html")
                    .into_response();
            }
        }
    } else {
        generate_preview_page(&state.config)
    };

    match page_with_assets(&state, content) {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            error!("Failed to render asset tags: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render asset tags").into_response()
        }
    }
}

/// Inject resolved asset tags (and the reload client) into an HTML page
fn page_with_assets(state: &ServerState, html: String) -> Result<String, RegistryError> {
    let (head, mut footer) = rendered_tags(state)?;

    if state.reload_enabled {
        footer.push_str(reload_client());
    }

    let page = inject_before(&html, "</head>", &head);
    Ok(inject_before(&page, "</body>", &footer))
}

/// Insert content before the last occurrence of a marker, or append
fn inject_before(html: &str, marker: &str, content: &str) -> String {
    if content.is_empty() {
        return html.to_string();
    }

    if let Some(pos) = html.rfind(marker) {
        let mut result = html.to_string();
        result.insert_str(pos, content);
        result
    } else {
        format!("{}{}", html, content)
    }
}

/// Serve static files
async fn serve_file(
    State(state): State<Arc<ServerState>>,
    axum::extract::Path(path): axum::extract::Path<String>,
) -> Response {
    let file_path = state.config.root.join(&path);

    if !file_path.is_file() {
        return (StatusCode::NOT_FOUND, format!("File not found: {}", path)).into_response();
    }

    // Keep requests inside the theme directory
    if !utils::is_subpath(&file_path, &state.config.root) {
        return (StatusCode::NOT_FOUND, format!("File not found: {}", path)).into_response();
    }

    // Served HTML gets the current asset tags too
    if file_path.extension().and_then(|e| e.to_str()) == Some("html") {
        return match std::fs::read_to_string(&file_path) {
            Ok(content) => match page_with_assets(&state, content) {
                Ok(page) => Html(page).into_response(),
                Err(e) => {
                    error!("Failed to render asset tags: {}", e);
                    (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render asset tags")
                        .into_response()
                }
            },
            Err(e) => {
                error!("Failed to read file {}: {}", path, e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read file").into_response()
            }
        };
    }

    // Determine content type
    let content_type = get_content_type(&file_path);

    match std::fs::read(&file_path) {
        Ok(content) => {
            let mut response = content.into_response();
            response
                .headers_mut()
                .insert(header::CONTENT_TYPE, content_type.parse().unwrap());
            response
        }
        Err(e) => {
            error!("Failed to read file {}: {}", path, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read file").into_response()
        }
    }
}

/// Get content type for a file
fn get_content_type(path: &Path) -> &'static str {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match extension {
        "html" | "htm" => "text/html; charset=utf-8",
        "twig" => "text/plain; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" => "application/json; charset=utf-8",
        "map" => "application/json; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "eot" => "application/vnd.ms-fontobject",
        _ => "application/octet-stream",
    }
}

/// Browser-side live reload client
fn reload_client() -> &'static str {
    r#"
<script type="module">
// Thematic live reload client
(function() {
  const ws = new WebSocket(`ws://${location.host}/__thematic_reload`);

  ws.onmessage = function(event) {
    const message = JSON.parse(event.data);

    switch (message.type) {
      case 'full-reload':
        console.log('[thematic] Full reload:', message.reason);
        location.reload();
        break;

      case 'css-update':
        console.log('[thematic] CSS update:', message.path);
        // Refresh stylesheets in place
        const links = document.querySelectorAll('link[rel="stylesheet"]');
        links.forEach(link => {
          const url = new URL(link.href);
          url.searchParams.set('t', Date.now());
          link.href = url.toString();
        });
        break;

      case 'connected':
        console.log('[thematic] Live reload connected');
        break;
    }
  };

  ws.onclose = function() {
    console.log('[thematic] Live reload disconnected, attempting to reconnect...');
    setTimeout(() => location.reload(), 1000);
  };
})();
</script>
"#
}

/// Generate a preview page when the theme has no index.html
fn generate_preview_page(config: &Config) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>{name}</title>
  </head>
  <body>
    <main class="preview">
      <h1>{name}</h1>
      <p>Theme preview - resolved asset tags are injected into this page.</p>
    </main>
  </body>
</html>
"#,
        name = config.theme.name,
    )
}

/// Open URL in browser (simple implementation)
fn webbrowser_open(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()?;
    }

    Ok(())
}
