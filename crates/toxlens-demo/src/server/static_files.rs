use axum::{
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use rust_embed::Embed;

#[derive(Embed)]
#[folder = "assets"]
struct WebAssets;

/// Serve the embedded demo UI
pub async fn serve_static(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    // Try exact path first
    if let Some(content) = <WebAssets as Embed>::get(path) {
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        return (
            StatusCode::OK,
            [(header::CONTENT_TYPE, mime.as_ref())],
            content.data.into_owned(),
        )
            .into_response();
    }

    // SPA routing: serve index.html for any unmatched route
    if let Some(content) = <WebAssets as Embed>::get("index.html") {
        return Html(String::from_utf8_lossy(&content.data).to_string()).into_response();
    }

    Html(FALLBACK_HTML.to_string()).into_response()
}

const FALLBACK_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>ToxLens</title>
</head>
<body>
    <h1>ToxLens</h1>
    <p>The UI bundle is missing. The JSON API is still available under <code>/api</code>:</p>
    <ul>
        <li><code>POST /api/predict</code> {"query": "ibuprofen"}</li>
        <li><code>GET /api/explain/global?k=15</code></li>
        <li><code>GET /api/model</code></li>
    </ul>
</body>
</html>
"#;
