//! Read-only JSON server over the catalog and gallery
//!
//! Posts and photos are reloaded from disk on every request, so edits show
//! up without a restart. Anything outside `/api` is served from the public
//! directory, falling back to `index.html` for client-side routes.

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::commands::export::PostIndex;
use crate::content::{Catalog, PostDetail, PostFilter};
use crate::gallery::{Gallery, Photo};
use crate::Folio;

/// Server state
struct ServerState {
    folio: Folio,
}

type SharedState = Arc<ServerState>;

/// Build the application router
pub fn router(folio: Folio) -> Router {
    let public_dir = folio.public_dir.clone();
    let state = Arc::new(ServerState { folio });

    let static_files =
        ServeDir::new(&public_dir).fallback(ServeFile::new(public_dir.join("index.html")));

    Router::new()
        .route("/api/posts", get(list_posts))
        .route("/api/posts/recent", get(recent_posts))
        .route("/api/posts/:slug", get(show_post))
        .route("/api/tags", get(list_tags))
        .route("/api/categories", get(list_categories))
        .route("/api/photos", get(list_photos))
        .route("/api/photos/:id", get(show_photo))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(folio: &Folio, ip: &str, port: u16) -> Result<()> {
    let app = router(folio.clone());

    // "localhost" is not a valid socket address
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Error body for API responses
#[derive(Debug, Serialize)]
struct ApiError {
    error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ApiError {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Run a blocking load off the async workers
async fn blocking<T, F>(state: &SharedState, load: F) -> Result<T, Response>
where
    T: Send + 'static,
    F: FnOnce(&Folio) -> Result<T> + Send + 'static,
{
    let state = Arc::clone(state);
    match tokio::task::spawn_blocking(move || load(&state.folio)).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            tracing::error!("Failed to load content: {:#}", e);
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to load content",
            ))
        }
        Err(e) => {
            tracing::error!("Loader task failed: {}", e);
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to load content",
            ))
        }
    }
}

async fn load_catalog(state: &SharedState) -> Result<Catalog, Response> {
    blocking(state, |folio| folio.load_catalog()).await
}

async fn load_gallery(state: &SharedState) -> Result<Gallery, Response> {
    blocking(state, |folio| folio.load_gallery()).await
}

async fn list_posts(
    State(state): State<SharedState>,
    Query(filter): Query<PostFilter>,
) -> Result<Response, Response> {
    let catalog = load_catalog(&state).await?;
    let index = PostIndex::new(&catalog, catalog.filter(&filter));
    Ok(Json(index).into_response())
}

async fn recent_posts(State(state): State<SharedState>) -> Result<Response, Response> {
    let catalog = load_catalog(&state).await?;
    let recent = catalog.recent(state.folio.config.recent_limit);
    let index = PostIndex::new(&catalog, recent.iter().collect());
    Ok(Json(index).into_response())
}

async fn show_post(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
) -> Result<Response, Response> {
    let detail = blocking(&state, move |folio| {
        let catalog = folio.load_catalog()?;
        Ok(catalog
            .find(&slug)
            .map(|post| PostDetail::new(post, catalog.posts(), &folio.renderer())))
    })
    .await?;

    match detail {
        Some(detail) => Ok(Json(detail).into_response()),
        None => Err(error_response(StatusCode::NOT_FOUND, "Post not found")),
    }
}

#[derive(Debug, Serialize)]
struct Count<'a> {
    name: &'a str,
    count: usize,
}

fn counts(items: Vec<(&str, usize)>) -> Vec<Count<'_>> {
    items
        .into_iter()
        .map(|(name, count)| Count { name, count })
        .collect()
}

async fn list_tags(State(state): State<SharedState>) -> Result<Response, Response> {
    let catalog = load_catalog(&state).await?;
    Ok(Json(counts(catalog.tag_counts())).into_response())
}

async fn list_categories(State(state): State<SharedState>) -> Result<Response, Response> {
    let catalog = load_catalog(&state).await?;
    Ok(Json(counts(catalog.category_counts())).into_response())
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PhotoQuery {
    category: Option<String>,
}

#[derive(Debug, Serialize)]
struct PhotoList<'a> {
    photos: Vec<Photo>,
    categories: Vec<&'a str>,
}

async fn list_photos(
    State(state): State<SharedState>,
    Query(query): Query<PhotoQuery>,
) -> Result<Response, Response> {
    let gallery = load_gallery(&state).await?;
    let category = query.category.as_deref().filter(|c| !c.is_empty());
    let list = PhotoList {
        photos: gallery
            .filter(category)
            .into_iter()
            .map(|p| p.with_rewritten_urls(&state.folio.config.image))
            .collect(),
        categories: gallery.categories(),
    };
    Ok(Json(list).into_response())
}

async fn show_photo(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Response, Response> {
    let gallery = load_gallery(&state).await?;
    match gallery.find(&id) {
        Some(photo) => Ok(Json(photo.with_rewritten_urls(&state.folio.config.image)).into_response()),
        None => Err(error_response(StatusCode::NOT_FOUND, "Photo not found")),
    }
}
