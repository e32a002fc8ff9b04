use axum::{
    body::Body,
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::state::AppState;

pub const ADMIN_COOKIE: &str = "zenith_admin";

/// Axum middleware that gates the admin surface behind a shared token.
///
/// Auth flow (evaluated in order):
/// 1. `admin_token` is unset → passthrough
/// 2. `Authorization: Bearer TOKEN` matches → passthrough
/// 3. Cookie `zenith_admin` matches → passthrough
/// 4. Query param `?auth=TOKEN` matches → set session cookie, 302 to same path without param
/// 5. None matched → 401 (JSON for `/api/*`, HTML for everything else)
pub async fn admin_gate(State(app): State<AppState>, req: Request, next: Next) -> Response {
    let Some(token) = app.config.admin_token.as_deref() else {
        return next.run(req).await;
    };

    if bearer(&req) == Some(token) || cookie(&req) == Some(token) {
        return next.run(req).await;
    }

    let uri = req.uri().clone();
    if let Some(query) = uri.query() {
        if extract_auth_param(query) == Some(token) {
            let destination = strip_auth_param(uri.path(), query);
            let cookie = format!("{ADMIN_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/");
            tracing::info!(path = uri.path(), "admin session started");
            return Response::builder()
                .status(302)
                .header(header::LOCATION, destination)
                .header(header::SET_COOKIE, cookie)
                .body(Body::empty())
                .expect("infallible: all header values are valid ASCII");
        }
    }

    tracing::warn!(path = uri.path(), "rejected unauthenticated admin request");
    if uri.path().starts_with("/api/") {
        Response::builder()
            .status(401)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"error":"unauthorized"}"#))
            .expect("infallible: all header values are valid ASCII")
    } else {
        Response::builder()
            .status(401)
            .header(header::CONTENT_TYPE, "text/html; charset=utf-8")
            .body(Body::from(concat!(
                "<!DOCTYPE html><html><head><title>Access Denied</title></head>",
                "<body style=\"font-family:sans-serif;padding:2rem\">",
                "<h1>Access Denied</h1>",
                "<p>Open the admin link that includes your access token.</p>",
                "</body></html>",
            )))
            .expect("infallible: all header values are valid ASCII")
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn bearer(req: &Request) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
}

fn cookie(req: &Request) -> Option<&str> {
    let cookies = req.headers().get(header::COOKIE)?.to_str().ok()?;
    cookies
        .split(';')
        .find_map(|part| part.trim().strip_prefix(ADMIN_COOKIE)?.strip_prefix('='))
}

fn extract_auth_param(query: &str) -> Option<&str> {
    query.split('&').find_map(|kv| kv.strip_prefix("auth="))
}

fn strip_auth_param(path: &str, query: &str) -> String {
    let remaining: Vec<&str> = query
        .split('&')
        .filter(|kv| !kv.starts_with("auth="))
        .collect();
    if remaining.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, remaining.join("&"))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::{middleware, routing::get, Router};
    use tower::ServiceExt;
    use zenith_core::config::SiteConfig;

    async fn ok_handler() -> &'static str {
        "ok"
    }

    fn test_app(token: Option<&str>) -> Router {
        let config = SiteConfig {
            admin_token: token.map(str::to_string),
            ..SiteConfig::default()
        };
        let state = AppState::with_backend(config, None);
        Router::new()
            .route("/admin", get(ok_handler))
            .route("/api/admin/leads", get(ok_handler))
            .layer(middleware::from_fn_with_state(state, admin_gate))
    }

    fn request(uri: &str) -> axum::http::request::Builder {
        axum::http::Request::builder().uri(uri)
    }

    #[tokio::test]
    async fn no_token_passes_through() {
        let resp = test_app(None)
            .oneshot(request("/api/admin/leads").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn bearer_token_passes_through() {
        let resp = test_app(Some("secret"))
            .oneshot(
                request("/api/admin/leads")
                    .header("authorization", "Bearer secret")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn wrong_bearer_token_is_rejected() {
        let resp = test_app(Some("secret"))
            .oneshot(
                request("/api/admin/leads")
                    .header("authorization", "Bearer nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn valid_cookie_passes_through() {
        let resp = test_app(Some("secret"))
            .oneshot(
                request("/admin")
                    .header("cookie", "theme=dark; zenith_admin=secret")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn auth_query_param_sets_cookie_and_redirects() {
        let resp = test_app(Some("secret"))
            .oneshot(request("/admin?auth=secret").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FOUND);
        let location = resp.headers().get("location").unwrap().to_str().unwrap();
        assert_eq!(location, "/admin");
        let cookie = resp.headers().get("set-cookie").unwrap().to_str().unwrap();
        assert!(cookie.contains("zenith_admin=secret"));
        assert!(cookie.contains("HttpOnly"));
    }

    #[tokio::test]
    async fn admin_page_without_token_returns_401_html() {
        let resp = test_app(Some("secret"))
            .oneshot(request("/admin").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let ct = resp
            .headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(ct.contains("text/html"));
    }

    #[tokio::test]
    async fn api_path_without_token_returns_401_json() {
        let resp = test_app(Some("secret"))
            .oneshot(request("/api/admin/leads").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let ct = resp
            .headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(ct.contains("application/json"));
    }

    #[test]
    fn strip_auth_only_param() {
        assert_eq!(strip_auth_param("/admin", "auth=abc"), "/admin");
    }

    #[test]
    fn strip_auth_preserves_other_params() {
        assert_eq!(
            strip_auth_param("/admin", "tab=leads&auth=abc&page=2"),
            "/admin?tab=leads&page=2"
        );
    }

    #[test]
    fn extract_auth_param_found() {
        assert_eq!(extract_auth_param("auth=tok"), Some("tok"));
        assert_eq!(extract_auth_param("x=1&auth=tok"), Some("tok"));
        assert_eq!(extract_auth_param("x=1"), None);
    }
}
