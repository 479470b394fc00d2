//! HTTP server rendering pages from the content API

mod error;

use anyhow::Result;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        Path, Query, State, WebSocketUpgrade,
    },
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::api::ContentSource;
use crate::config::SiteConfig;
use crate::error::AppError;
use crate::pages::{self, Page};
use crate::search::{SearchCommand, SearchSession, SearchUpdate};
use crate::templates::{self, TemplateRenderer};
use crate::Site;

/// Shared, immutable server state
pub struct AppState {
    config: SiteConfig,
    source: Arc<dyn ContentSource>,
    renderer: TemplateRenderer,
    static_dir: PathBuf,
}

impl AppState {
    pub fn new(
        config: SiteConfig,
        source: Arc<dyn ContentSource>,
        static_dir: PathBuf,
    ) -> tera::Result<Self> {
        Ok(Self {
            config,
            source,
            renderer: TemplateRenderer::new()?,
            static_dir,
        })
    }

    fn source(&self) -> &dyn ContentSource {
        self.source.as_ref()
    }

    /// Render a page, or the matching error page
    async fn respond<T: Serialize>(
        &self,
        template: &str,
        page: Result<Page<T>, AppError>,
    ) -> Response {
        let html = page.and_then(|page| {
            self.renderer
                .render_page(template, &self.config, &page)
                .map_err(AppError::from)
        });

        match html {
            Ok(html) => Html(html).into_response(),
            Err(e) => self.error_response(e).await,
        }
    }

    async fn error_response(&self, err: AppError) -> Response {
        let (template, page) = match &err {
            AppError::NotFound => (templates::NOT_FOUND, pages::not_found_page(self.source()).await),
            AppError::Upstream(e) => {
                tracing::error!("Upstream error: {}", e);
                (
                    templates::ERROR,
                    pages::error_page("The content service is unavailable."),
                )
            }
            AppError::Render(e) => {
                tracing::error!("Render error: {:?}", e);
                (
                    templates::ERROR,
                    pages::error_page("This page could not be displayed."),
                )
            }
        };

        match self.renderer.render_page(template, &self.config, &page) {
            Ok(html) => (err.status_code(), Html(html)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render error page: {:?}", e);
                err.into_response()
            }
        }
    }

    /// Websocket frame for a search update
    fn search_frame(&self, update: SearchUpdate) -> Result<String> {
        let frame = match update {
            SearchUpdate::Loading => SearchFrame::Loading,
            SearchUpdate::Results { query, results } => SearchFrame::Results {
                html: self.renderer.render_search_results(&query, &results)?,
                query,
            },
            SearchUpdate::Closed => SearchFrame::Closed,
            SearchUpdate::Navigate { url } => SearchFrame::Navigate { url },
            SearchUpdate::Menu { open } => SearchFrame::Menu { open },
        };
        Ok(serde_json::to_string(&frame)?)
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum SearchFrame {
    Loading,
    Results { query: String, html: String },
    Closed,
    Navigate { url: String },
    Menu { open: bool },
}

#[derive(Debug, Default, Deserialize)]
struct ListQuery {
    open: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PostQuery {
    expanded: Option<String>,
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/", get(home_handler))
        .route("/category/:category", get(category_handler))
        .route("/category/:category/:subcategory", get(subcategory_handler))
        .route("/posts/:slug", get(post_handler))
        .route("/__search", get(search_handler))
        .nest_service("/static", static_files)
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(site: &Site, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(AppState::new(
        site.config.clone(),
        site.source(),
        site.static_dir.clone(),
    )?);
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    if site.api.is_offline() {
        println!("No content API configured; pages will be empty.");
    }
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn home_handler(State(state): State<Arc<AppState>>) -> Response {
    let page = pages::home_page(state.source(), &state.config, Utc::now()).await;
    state.respond(templates::HOME, page).await
}

async fn category_handler(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    Query(query): Query<ListQuery>,
) -> Response {
    let page = pages::category_page(
        state.source(),
        &state.config,
        Utc::now(),
        &category,
        query.open,
    )
    .await;
    state.respond(templates::CATEGORY, page).await
}

async fn subcategory_handler(
    State(state): State<Arc<AppState>>,
    Path((category, subcategory)): Path<(String, String)>,
    Query(query): Query<ListQuery>,
) -> Response {
    let page = pages::subcategory_page(
        state.source(),
        &state.config,
        Utc::now(),
        &category,
        &subcategory,
        query.open,
    )
    .await;
    state.respond(templates::CATEGORY, page).await
}

async fn post_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(query): Query<PostQuery>,
) -> Response {
    let expanded = query.expanded.as_deref() == Some("true");
    let page = pages::post_page(
        state.source(),
        &state.config,
        Utc::now(),
        &slug,
        expanded,
        StdRng::from_entropy(),
    )
    .await;
    state.respond(templates::POST, page).await
}

async fn fallback_handler(State(state): State<Arc<AppState>>) -> Response {
    state.error_response(AppError::NotFound).await
}

/// WebSocket handler for the header search box
async fn search_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_search_socket(socket, state))
}

/// Run one debounced search session per connection
async fn handle_search_socket(mut socket: WebSocket, state: Arc<AppState>) {
    tracing::debug!("Search client connected");

    let (command_tx, command_rx) = mpsc::channel::<SearchCommand>(16);
    let (update_tx, mut update_rx) = mpsc::channel::<SearchUpdate>(16);
    let session = SearchSession::new(Arc::clone(&state.source));
    tokio::spawn(session.run(command_rx, update_tx));

    loop {
        tokio::select! {
            update = update_rx.recv() => {
                let Some(update) = update else { break };
                match state.search_frame(update) {
                    Ok(frame) => {
                        if socket.send(Message::Text(frame)).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => tracing::warn!("Failed to build search frame: {}", e),
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<SearchCommand>(&text) {
                            Ok(command) => {
                                if command_tx.send(command).await.is_err() {
                                    break;
                                }
                            }
                            Err(e) => tracing::debug!("Ignoring search frame {:?}: {}", text, e),
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    _ => {}
                }
            }
        }
    }

    tracing::debug!("Search client disconnected");
}
