//! HTTP server: renders Markdown requests and serves everything else as-is

use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::State,
    http::{Method, Request, StatusCode},
    response::{Html, IntoResponse, Response},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::{
    resolve, CleanPath, ContentLoader, ContentRoot, IndexResolver, MarkdownRenderer,
    ResolvedTarget, TargetKind,
};
use crate::error::ContentError;
use crate::templates::{PageRenderer, RenderedPage};
use crate::Markdir;

/// Immutable state shared by every request
pub struct AppState {
    root: ContentRoot,
    index: IndexResolver,
    markdown: MarkdownRenderer,
    page: PageRenderer,
    static_files: ServeDir,
}

impl AppState {
    /// Build request state from a resolved configuration
    pub fn new(markdir: &Markdir) -> Result<Self> {
        let markdown = MarkdownRenderer::with_theme(&markdir.config.highlight_theme)?;
        let page = PageRenderer::new(&markdir.template)?;

        Ok(Self {
            root: markdir.root.clone(),
            index: IndexResolver::new(markdir.config.index_names.clone()),
            markdown,
            page,
            static_files: ServeDir::new(markdir.root.path()),
        })
    }
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .fallback(fallback_handler)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Start the server
pub async fn start(markdir: &Markdir) -> Result<()> {
    let state = Arc::new(AppState::new(markdir)?);
    let app = router(state);

    let addr: SocketAddr = markdir
        .config
        .bind
        .parse()
        .with_context(|| format!("invalid bind address {:?}", markdir.config.bind))?;

    tracing::info!("Serving {} on http://{}", markdir.root.path().display(), addr);
    tracing::info!("Page template: {}", markdir.template);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("could not bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Route a request through classification, index probing and rendering,
/// falling back to static files for anything that is not rendered
async fn fallback_handler(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
) -> Response {
    if request.method() != Method::GET {
        return serve_static(&state, request).await;
    }

    let raw = request.uri().path().to_string();
    let Some(path) = CleanPath::parse(&raw) else {
        return ContentError::NotFound(raw).into_response();
    };

    let target = match resolve(&state.root, &state.index, &path).await {
        Ok(target) => target,
        Err(e) => return e.into_response(),
    };

    match target.kind() {
        TargetKind::Markdown => match render_target(&state, &target).await {
            Ok(html) => Html(html).into_response(),
            Err(e) => e.into_response(),
        },
        TargetKind::NotFound => ContentError::NotFound(target.url().to_string()).into_response(),
        TargetKind::Static => serve_static(&state, request).await,
    }
}

/// Load, convert and wrap a Markdown target
async fn render_target(state: &AppState, target: &ResolvedTarget) -> Result<String, ContentError> {
    let source = ContentLoader::new(&state.root).load(target).await?;
    let body_html = state.markdown.render(&source);

    let page = RenderedPage {
        title: target.url().to_string(),
        body_html,
    };
    state.page.render(&page).map_err(|source| ContentError::Render {
        path: target.url().to_string(),
        source,
    })
}

/// Serve static file using tower-http
async fn serve_static(state: &AppState, request: Request<Body>) -> Response {
    let mut service = state.static_files.clone();
    match service.try_call(request).await {
        Ok(response) => response.into_response(),
        Err(e) => {
            tracing::error!("Static file error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}
