// HTTP request handlers
use crate::application::selection::select_product;
use crate::domain::gallery::SlideRow;
use crate::infrastructure::thumbnailer::ThumbnailError;
use crate::presentation::app_state::AppState;
use crate::presentation::page::{self, GalleryView};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct GalleryQuery {
    pub p: Option<String>,
}

#[derive(Serialize)]
pub struct ProductStatusRow {
    pub code: String,
    pub label: String,
    pub available: bool,
    pub status: String,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Gallery page with the slideshow for the selected product
pub async fn gallery_page(
    Query(query): Query<GalleryQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let base = std::path::Path::new(&state.server.base_dir);
    let snapshot = state.catalog.available_products(base).await;
    let settings = state.catalog.settings();
    let code = select_product(query.p.as_deref(), &snapshot, &settings.default_product);

    let label = match snapshot.label_of(&code) {
        Some(label) => label,
        None => return Html(page::render_unavailable_page()).into_response(),
    };

    let images = state.catalog.image_filenames(&code);
    let slides: Vec<SlideRow> = images
        .iter()
        .map(|name| {
            SlideRow::new(
                format!("/radar/{}", urlencoding::encode(name)),
                name.as_str(),
            )
        })
        .collect();

    let view = GalleryView {
        products: snapshot.available(),
        active_code: &code,
        active_label: label,
        slides: &slides,
        width: settings.image_width,
        height: settings.image_height,
    };

    match page::render_gallery_page(&view) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("failed to render gallery page: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// JSON listing of every product in table order with its current status
pub async fn list_products(State(state): State<Arc<AppState>>) -> Json<Vec<ProductStatusRow>> {
    let base = std::path::Path::new(&state.server.base_dir);
    let snapshot = state.catalog.available_products(base).await;

    let rows = state
        .catalog
        .products()
        .iter()
        .map(|product| ProductStatusRow {
            code: product.code.clone(),
            label: product.label.clone(),
            available: snapshot.is_available(&product.code),
            status: snapshot
                .status(&product.code)
                .unwrap_or_default()
                .to_string(),
        })
        .collect();

    Json(rows)
}

/// Serve a radar image by basename from the image directory
pub async fn radar_image(
    Path(filename): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let name = match basename(&filename) {
        Some(name) => name.to_string(),
        None => return StatusCode::NOT_FOUND.into_response(),
    };
    let path = std::path::Path::new(&state.server.base_dir)
        .join(&state.catalog.settings().image_directory)
        .join(&name);

    serve_image(&path, &name).await
}

/// Serve the thumbnail for a radar image, generating it on first request.
/// The decode/resize/encode work runs on the blocking pool.
pub async fn radar_thumbnail(
    Path(filename): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let dir = std::path::Path::new(&state.server.base_dir)
        .join(&state.catalog.settings().image_directory);

    // The source decides: radar frames are overwritten in place under fixed
    // names, so a cached thumbnail only counts while its source still exists
    // and is no newer than the thumbnail.
    let source_modified = match basename(&filename) {
        Some(name) => match tokio::fs::metadata(dir.join(name)).await {
            Ok(meta) if meta.is_file() => meta.modified().ok(),
            _ => return StatusCode::NOT_FOUND.into_response(),
        },
        None => return StatusCode::NOT_FOUND.into_response(),
    };

    if let Some(thumb_name) = state.thumbnailer.thumbnail_name(&filename) {
        let thumb_path = dir.join(&thumb_name);
        let thumb_modified = match tokio::fs::metadata(&thumb_path).await {
            Ok(meta) if meta.is_file() => meta.modified().ok(),
            _ => None,
        };
        let current = match (thumb_modified, source_modified) {
            (Some(thumb), Some(source)) => thumb >= source,
            _ => false,
        };
        if current {
            return serve_image(&thumb_path, &thumb_name).await;
        }
    }

    let thumbnailer = state.thumbnailer.clone();
    let base = PathBuf::from(&state.server.base_dir);
    let name = filename.clone();
    let width = state.server.thumbnail_width;
    let height = state.server.thumbnail_height;
    let generated =
        tokio::task::spawn_blocking(move || thumbnailer.try_generate(&base, &name, width, height))
            .await;

    match generated {
        Ok(Ok(output)) => {
            let thumb_name = output
                .path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string();
            serve_image(&output.path, &thumb_name).await
        }
        Ok(Err(ThumbnailError::SourceMissing(_))) => StatusCode::NOT_FOUND.into_response(),
        Ok(Err(ThumbnailError::UnsupportedFormat(_))) => {
            StatusCode::UNSUPPORTED_MEDIA_TYPE.into_response()
        }
        Ok(Err(e)) => {
            tracing::error!("thumbnail generation failed for {}: {}", filename, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
        Err(e) => {
            tracing::error!("thumbnail task failed for {}: {}", filename, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn serve_image(path: &std::path::Path, name: &str) -> Response {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return StatusCode::NOT_FOUND.into_response();
        }
        Err(e) => {
            tracing::error!("failed to read {}: {}", path.display(), e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(content_type_for(name)),
    );
    let modified = tokio::fs::metadata(path)
        .await
        .ok()
        .and_then(|m| m.modified().ok());
    if let Some(modified) = modified {
        let stamp: DateTime<Utc> = modified.into();
        let formatted = stamp.format("%a, %d %b %Y %H:%M:%S GMT").to_string();
        if let Ok(value) = HeaderValue::from_str(&formatted) {
            headers.insert(header::LAST_MODIFIED, value);
        }
    }

    (headers, Bytes::from(bytes)).into_response()
}

fn basename(name: &str) -> Option<&str> {
    std::path::Path::new(name).file_name()?.to_str()
}

/// Content type from the extension text after the first dot
fn content_type_for(name: &str) -> &'static str {
    match name.split_once('.').map(|(_, ext)| ext) {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}
