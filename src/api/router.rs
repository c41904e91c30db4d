use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{health, lead, seo, sitemap, tenant, vehicle};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Tenants
        .route("/api/tenants", post(tenant::create_tenant))
        .route("/api/tenants/by-subdomain/{subdomain}", get(tenant::get_tenant_by_subdomain))
        .route("/api/tenants/{subdomain}/robots.txt", get(tenant::get_robots))
        .route("/api/tenant/profile", put(tenant::update_tenant))
        .route("/api/tenant/robots", put(tenant::update_robots))

        // SEO resolution
        .route("/api/seo/resolve-path", get(seo::resolve_path))
        .route("/api/seo/urls", post(seo::upsert_url))
        .route("/api/seo/canonical-redirect", get(seo::canonical_redirect))
        .route("/api/seo/preview", get(seo::preview))
        .route("/api/seo/templates", get(seo::templates))
        .route("/api/seo/tenants/{subdomain}/organization", get(tenant::organization))

        // Sitemaps
        .route("/api/super-admin/seo/sitemap", get(sitemap::admin_sitemap).post(sitemap::admin_sitemap))
        .route("/api/seo/sitemap-index", get(sitemap::sitemap_index))
        .route("/api/seo/sitemap-file", get(sitemap::sitemap_file))
        .route("/api/tenant/sitemap/configs", get(sitemap::list_configs).post(sitemap::create_config))
        .route("/api/tenant/sitemap/configs/{id}", get(sitemap::get_config).put(sitemap::update_config).delete(sitemap::delete_config))
        .route("/api/tenant/sitemap/generate", post(sitemap::generate))

        // Inventory
        .route("/api/tenant/vehicles", get(vehicle::list_vehicles).post(vehicle::create_vehicle))
        .route("/api/tenant/vehicles/{id}", get(vehicle::get_vehicle).put(vehicle::update_vehicle).delete(vehicle::delete_vehicle))
        .route("/api/tenant/vehicles/{id}/images", get(vehicle::list_images).post(vehicle::add_image))

        // Leads
        .route("/api/leads", post(lead::create_lead))
        .route("/api/tenant/leads", get(lead::list_leads))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        tenant_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
