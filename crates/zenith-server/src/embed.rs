use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use rust_embed::Embed;

#[derive(Embed)]
#[folder = "site/"]
struct SiteAssets;

fn asset(path: &str) -> Option<Response> {
    let content = <SiteAssets as Embed>::get(path)?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    Some(
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, mime.as_ref())],
            content.data.to_vec(),
        )
            .into_response(),
    )
}

/// GET /admin: the triage page. Mounted behind the admin gate.
pub async fn admin_page() -> Response {
    asset("admin.html").unwrap_or_else(|| (StatusCode::NOT_FOUND, "admin page missing").into_response())
}

/// Serve embedded site assets. Unknown non-API paths fall back to index.html.
pub async fn static_handler(uri: axum::http::Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    if path.starts_with("api/") {
        return (
            StatusCode::NOT_FOUND,
            axum::Json(serde_json::json!({ "error": "Not found" })),
        )
            .into_response();
    }

    if !path.is_empty() && path != "admin.html" {
        if let Some(response) = asset(path) {
            return response;
        }
    }

    asset("index.html").unwrap_or_else(|| (StatusCode::NOT_FOUND, "site not built").into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Uri;

    #[tokio::test]
    async fn root_serves_index_html() {
        let resp = static_handler(Uri::from_static("/")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let ct = resp.headers().get(header::CONTENT_TYPE).unwrap();
        assert!(ct.to_str().unwrap().starts_with("text/html"));
    }

    #[tokio::test]
    async fn unknown_api_path_is_json_404() {
        let resp = static_handler(Uri::from_static("/api/nope")).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn admin_asset_is_not_reachable_around_the_gate() {
        let resp = static_handler(Uri::from_static("/admin.html")).await;
        let bytes = http_body_util::BodyExt::collect(resp.into_body())
            .await
            .unwrap()
            .to_bytes();
        let html = String::from_utf8_lossy(&bytes);
        assert!(!html.contains("zenith-admin"));
    }
}
