pub mod auth;
pub mod embed;
pub mod error;
pub mod routes;
pub mod state;
pub mod supabase;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue};
use axum::middleware;
use axum::routing::{delete, get, patch, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Admin API plus the triage page, behind the admin gate and never cached.
fn admin_router(app_state: AppState) -> Router<AppState> {
    Router::new()
        // Leads
        .route(
            "/api/admin/leads",
            get(routes::leads::list_leads).delete(routes::leads::delete_leads),
        )
        .route(
            "/api/admin/leads/{id}/status",
            patch(routes::leads::set_lead_status),
        )
        // Applications
        .route(
            "/api/admin/applications",
            get(routes::applications::list_applications)
                .delete(routes::applications::delete_applications),
        )
        .route(
            "/api/admin/applications/{id}/status",
            patch(routes::applications::set_application_status),
        )
        // Posts
        .route(
            "/api/admin/posts",
            get(routes::posts::list_posts).post(routes::posts::create_post),
        )
        .route("/api/admin/posts/{id}", delete(routes::posts::delete_post))
        // Consultations
        .route(
            "/api/admin/consultations",
            get(routes::consultations::list_consultations),
        )
        .route("/api/admin/summary", get(routes::summary::get_summary))
        // Page
        .route("/admin", get(embed::admin_page))
        .route_layer(middleware::from_fn_with_state(app_state, auth::admin_gate))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}

/// Build the axum Router with all API routes and middleware.
/// Used by `serve_on()` and available for integration testing.
pub fn build_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(routes::health::health))
        // Catalog
        .route("/api/services", get(routes::catalog::list_services))
        .route("/api/services/{slug}", get(routes::catalog::get_service))
        .route("/api/jobs", get(routes::catalog::list_jobs))
        .route("/api/jobs/{slug}", get(routes::catalog::get_job))
        .route("/api/case-studies", get(routes::catalog::list_case_studies))
        .route(
            "/api/case-studies/{slug}",
            get(routes::catalog::get_case_study),
        )
        .route("/api/pricing", get(routes::catalog::list_pricing))
        // Blog
        .route("/api/posts", get(routes::posts::list_published))
        .route("/api/posts/{slug}", get(routes::posts::get_published))
        // Forms
        .route("/api/contact", post(routes::contact::submit_contact))
        .route("/api/demo-request", post(routes::contact::demo_request))
        .route(
            "/api/applications",
            post(routes::applications::submit_application).layer(DefaultBodyLimit::max(
                routes::applications::MAX_FORM_BYTES,
            )),
        )
        .merge(admin_router(app_state.clone()))
        .fallback(embed::static_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Start the site server on a pre-bound listener.
///
/// Accepting a bound `TcpListener` lets the caller read the actual port
/// before starting (useful when `port = 0` and the OS picks a free port).
pub async fn serve_on(
    app_state: AppState,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    let gated = app_state.config.admin_token.is_some();
    let backend = app_state.backend_kind();
    let app = build_router(app_state);

    tracing::info!(%addr, backend, admin_gate = gated, "ZenithView site listening");
    if !gated {
        tracing::warn!("no admin token configured; /admin and /api/admin are open");
    }

    if open_browser {
        let url = format!("http://localhost:{}", addr.port());
        if let Err(e) = open::that(&url) {
            tracing::warn!("could not open browser: {e}");
        }
    }

    axum::serve(listener, app).await?;
    Ok(())
}
