//! HTTP server for the generated site
//!
//! Serves the public directory as-is. On top of that it renders posts that
//! were not generated ahead of time, answers "load more" requests from the
//! list page, and periodically regenerates the list page.

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::ContentError;
use crate::generator::{is_safe_slug, Generator};
use crate::pages::PostList;

/// Server state
struct ServerState {
    public_dir: PathBuf,
    generator: Generator,
}

impl ServerState {
    fn new(generator: Generator) -> Self {
        Self {
            public_dir: generator.blog().public_dir.clone(),
            generator,
        }
    }
}

/// Query string of `/api/posts/more`
#[derive(Debug, Deserialize)]
struct MoreParams {
    next: String,
}

/// Body returned by `/api/posts/more`
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoreResponse {
    /// Rendered list entries to append
    pub html: String,
    /// Cursor for the following request, `None` once the list is exhausted
    pub next_page: Option<String>,
}

/// Build the router serving `generator`'s site
pub fn app(generator: Generator) -> Router {
    router(Arc::new(ServerState::new(generator)))
}

fn router(state: Arc<ServerState>) -> Router {
    let static_files = ServeDir::new(&state.public_dir).append_index_html_on_directories(true);

    Router::new()
        .route("/post/:slug", get(post_handler))
        .route("/post/:slug/", get(post_handler))
        .route("/api/posts/more", get(load_more_handler))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server; the site is expected to be generated already
pub async fn start(generator: Generator, ip: &str, port: u16, open: bool) -> Result<()> {
    let revalidate = generator.blog().config.revalidate;
    let state = Arc::new(ServerState::new(generator));

    if revalidate > 0 {
        spawn_revalidation(state.clone(), Duration::from_secs(revalidate));
    } else {
        tracing::info!("List page revalidation disabled");
    }

    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Regenerate the list page every `every`
fn spawn_revalidation(state: Arc<ServerState>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately and the site was just generated
        ticker.tick().await;

        loop {
            ticker.tick().await;
            tracing::info!("Revalidating list page...");
            match state.generator.generate_index().await {
                Ok(count) => tracing::info!("List page revalidated ({} posts)", count),
                Err(e) => tracing::error!("List page revalidation failed, keeping old page: {:#}", e),
            }
        }
    })
}

/// Serve a generated post, or render it on demand and keep the result
async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    if !is_safe_slug(&slug) {
        return fallback_response(&state, StatusCode::NOT_FOUND);
    }

    let file_path = state
        .public_dir
        .join("post")
        .join(&slug)
        .join("index.html");
    if let Ok(content) = tokio::fs::read_to_string(&file_path).await {
        return Html(content).into_response();
    }

    match state.generator.generate_post(&slug).await {
        Ok(html) => {
            tracing::info!("Rendered post on demand: {}", slug);
            Html(html).into_response()
        }
        Err(e) => {
            let not_found = e
                .downcast_ref::<ContentError>()
                .is_some_and(ContentError::is_not_found);
            let status = if not_found {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::BAD_GATEWAY
            };
            tracing::warn!("Could not resolve post {}: {:#}", slug, e);
            fallback_response(&state, status)
        }
    }
}

/// Fetch the page behind a list cursor and return its rendered entries
async fn load_more_handler(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<MoreParams>,
) -> Response {
    let mut list = PostList::resume(params.next);

    if let Err(e) = list.load_more(state.generator.source()).await {
        tracing::warn!("Load more failed: {}", e);
        let status = match e {
            ContentError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::BAD_GATEWAY,
        };
        return (status, e.to_string()).into_response();
    }

    match state.generator.renderer().render_entries(list.results()) {
        Ok(html) => Json(MoreResponse {
            html,
            next_page: list.next_page().map(str::to_string),
        })
        .into_response(),
        Err(e) => {
            tracing::error!("Failed to render entries: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Render error").into_response()
        }
    }
}

fn fallback_response(state: &ServerState, status: StatusCode) -> Response {
    match state.generator.render_fallback() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render fallback page: {:#}", e);
            (status, "Not found").into_response()
        }
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    std::process::Command::new("open").arg(url).spawn()?;

    #[cfg(target_os = "linux")]
    std::process::Command::new("xdg-open").arg(url).spawn()?;

    #[cfg(target_os = "windows")]
    std::process::Command::new("cmd")
        .args(["/c", "start", url])
        .spawn()?;

    Ok(())
}
