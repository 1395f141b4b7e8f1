use axum::{
    body::Body,
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "static"]
struct Asset;

fn embedded(path: &str) -> Option<Response> {
    let content = Asset::get(path)?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    Some(
        (
            [(header::CONTENT_TYPE, mime.as_ref())],
            Body::from(content.data),
        )
            .into_response(),
    )
}

/// `GET /`
pub async fn index() -> Response {
    embedded("index.html")
        .unwrap_or_else(|| (StatusCode::NOT_FOUND, "404 Not Found").into_response())
}

pub async fn serve_asset(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    if path.is_empty() {
        return index().await;
    }

    match embedded(path) {
        Some(response) => response,
        None => (StatusCode::NOT_FOUND, "404 Not Found").into_response(),
    }
}
