mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::TestApp;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        panic!("Response body is empty. Status: {}", status);
    }
    match serde_json::from_slice(&bytes) {
        Ok(v) => v,
        Err(e) => panic!("Failed to parse JSON: {:?}. Status: {}. Body: {:?}", e, status, String::from_utf8_lossy(&bytes))
    }
}

#[tokio::test]
async fn test_upsert_then_resolve_roundtrip() {
    let app = TestApp::new().await;
    let tenant = app.create_tenant("Demo Motors", "demo").await;

    // 1. Upsert a new record -> 201
    let upsert_payload = json!({
        "path": "/comprar-carro/vw-polo-2023-49",
        "url_type": "vehicle_detail",
        "canonical_url": "https://demo.autosite.test/comprar-carro/vw-polo-2023-49",
        "title": "VW Polo 2023",
        "meta_description": "VW Polo 2023 seminovo",
        "sitemap_priority": 0.8,
        "sitemap_changefreq": "daily",
        "breadcrumbs": [
            {"name": "Home", "item": "https://demo.autosite.test/"},
            {"name": "VW Polo", "item": "https://demo.autosite.test/comprar-carro/vw-polo-2023-49"}
        ]
    });

    let create_res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/seo/urls")
            .header("X-Api-Key", &tenant.api_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(upsert_payload.to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(create_res.status(), StatusCode::CREATED);

    // 2. Resolve returns the stored fields, raw
    let resolve_res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/seo/resolve-path?tenant=demo&path=/comprar-carro/vw-polo-2023-49")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(resolve_res.status(), StatusCode::OK);
    let resolved = parse_body(resolve_res).await;

    assert_eq!(resolved["path"], "/comprar-carro/vw-polo-2023-49");
    assert_eq!(resolved["locale"], "pt-BR");
    assert_eq!(resolved["status"], "active");
    assert_eq!(resolved["canonical_url"], "https://demo.autosite.test/comprar-carro/vw-polo-2023-49");
    assert_eq!(resolved["title"], "VW Polo 2023");
    assert_eq!(resolved["meta_description"], "VW Polo 2023 seminovo");
    assert_eq!(resolved["sitemap"]["priority"], 0.8);
    assert_eq!(resolved["sitemap"]["changefreq"], "daily");
    assert_eq!(resolved["breadcrumbs"][0]["name"], "Home");

    // 3. Second upsert of the same key -> 200, last write wins
    let update_payload = json!({
        "path": "/comprar-carro/vw-polo-2023-49",
        "url_type": "vehicle_detail",
        "canonical_url": "https://demo.autosite.test/comprar-carro/vw-polo-2023-49",
        "title": "VW Polo Highline 2023"
    });

    let update_res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/seo/urls")
            .header("X-Api-Key", &tenant.api_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(update_payload.to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(update_res.status(), StatusCode::OK);

    let resolve_res_2 = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/seo/resolve-path?tenant=demo&path=/comprar-carro/vw-polo-2023-49")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let resolved_2 = parse_body(resolve_res_2).await;
    assert_eq!(resolved_2["title"], "VW Polo Highline 2023");
}

#[tokio::test]
async fn test_redirect_record_reduced_payload_and_flags() {
    let app = TestApp::new().await;
    let tenant = app.create_tenant("Demo Motors", "demo").await;

    // A redirect record upserted with indexable flags on: they must be
    // forced off in storage and in resolution output.
    let payload = json!({
        "path": "/carros/polo-antigo",
        "url_type": "vehicle_detail",
        "canonical_url": "https://demo.autosite.test/comprar-carro/vw-polo-2023-49",
        "is_indexable": true,
        "include_in_sitemap": true,
        "redirect_type": "302",
        "redirect_target": "/comprar-carro/vw-polo-2023-49",
        "redirect_reason": "slug_changed",
        "previous_slug": "polo-antigo"
    });

    let create_res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/seo/urls")
            .header("X-Api-Key", &tenant.api_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(create_res.status(), StatusCode::CREATED);
    let stored = parse_body(create_res).await;
    assert_eq!(stored["is_indexable"], false);
    assert_eq!(stored["include_in_sitemap"], false);

    let resolve_res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/seo/resolve-path?tenant=demo&path=/carros/polo-antigo")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(resolve_res.status(), StatusCode::OK);
    let resolved = parse_body(resolve_res).await;

    // Reduced payload: the requested path is echoed back, redirect
    // metadata is present, no canonical_url or aggregated data.
    assert_eq!(resolved["path"], "/carros/polo-antigo");
    assert_eq!(resolved["status"], "redirect_302");
    assert_eq!(resolved["redirect"]["redirect_type"], "302");
    assert_eq!(resolved["redirect"]["redirect_target"], "/comprar-carro/vw-polo-2023-49");
    assert_eq!(resolved["redirect"]["previous_slug"], "polo-antigo");
    assert_eq!(resolved["is_indexable"], false);
    assert_eq!(resolved["include_in_sitemap"], false);
    assert!(resolved.get("canonical_url").is_none());
    assert!(resolved.get("aggregated_data").is_none());
}

#[tokio::test]
async fn test_canonical_redirect_always_reports_301() {
    let app = TestApp::new().await;
    let tenant = app.create_tenant("Demo Motors", "demo").await;

    // Stored as a 302, but the canonical-redirect endpoint reports 301.
    let payload = json!({
        "path": "/carros/uno-antigo",
        "url_type": "vehicle_detail",
        "canonical_url": "https://demo.autosite.test/comprar-carro/fiat-uno-2020-7",
        "redirect_type": "302",
        "redirect_target": "/comprar-carro/fiat-uno-2020-7"
    });

    let create_res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/seo/urls")
            .header("X-Api-Key", &tenant.api_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(create_res.status(), StatusCode::CREATED);

    let canonical_res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/seo/canonical-redirect?tenant=demo&path=/carros/uno-antigo")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(canonical_res.status(), StatusCode::OK);
    let body = parse_body(canonical_res).await;
    assert_eq!(body["canonical_url"], "https://demo.autosite.test/comprar-carro/fiat-uno-2020-7");
    assert_eq!(body["status_code"], 301);

    let missing_res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/seo/canonical-redirect?tenant=demo&path=/nao-existe")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(missing_res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_resolve_not_found_and_validation() {
    let app = TestApp::new().await;
    app.create_tenant("Demo Motors", "demo").await;

    // Unknown path -> 404
    let missing_path = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/seo/resolve-path?tenant=demo&path=/nada")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(missing_path.status(), StatusCode::NOT_FOUND);

    // Unknown tenant -> 404
    let missing_tenant = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/seo/resolve-path?tenant=ghost&path=/nada")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(missing_tenant.status(), StatusCode::NOT_FOUND);

    // Empty path -> 422
    let empty_path = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/seo/resolve-path?tenant=demo&path=")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(empty_path.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Oversized path -> 422
    let long_path = "a".repeat(513);
    let oversized = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri(format!("/api/seo/resolve-path?tenant=demo&path=/{}", long_path))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(oversized.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_resolve_vehicle_detail_aggregated_data() {
    let app = TestApp::new().await;
    let tenant = app.create_tenant("Demo Motors", "demo").await;

    // Seed a vehicle with a known id plus brand/model/image rows.
    let brand = app.state.vehicle_repo.get_or_create_brand("VW").await.unwrap();
    let model = app.state.vehicle_repo.get_or_create_model(brand.id, "Polo").await.unwrap();

    sqlx::query(
        "INSERT INTO vehicles (id, tenant_id, brand_id, model_id, year, price, status, created_at, updated_at) \
         VALUES (49, ?, ?, ?, 2023, 89990.0, 'active', datetime('now'), datetime('now'))"
    )
        .bind(&tenant.tenant_id)
        .bind(brand.id)
        .bind(model.id)
        .execute(&app.pool)
        .await
        .unwrap();

    sqlx::query("INSERT INTO vehicle_images (vehicle_id, path, position, created_at) VALUES (49, 'vehicles/49/front.jpg', 0, datetime('now'))")
        .execute(&app.pool)
        .await
        .unwrap();

    let payload = json!({
        "path": "/comprar-carro/vw-polo-2023-49",
        "url_type": "vehicle_detail",
        "canonical_url": "https://demo.autosite.test/comprar-carro/vw-polo-2023-49",
        "route_params": {"vehicle_id": 49}
    });

    let create_res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/seo/urls")
            .header("X-Api-Key", &tenant.api_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(create_res.status(), StatusCode::CREATED);

    let resolve_res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/seo/resolve-path?tenant=demo&path=/comprar-carro/vw-polo-2023-49")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(resolve_res.status(), StatusCode::OK);
    let resolved = parse_body(resolve_res).await;

    let aggregated = &resolved["aggregated_data"];
    assert_eq!(aggregated["kind"], "vehicle");
    assert_eq!(aggregated["vehicle"]["id"], 49);
    assert_eq!(aggregated["vehicle"]["brand"], "VW");
    assert_eq!(aggregated["vehicle"]["model"], "Polo");
    assert_eq!(aggregated["vehicle"]["year"], 2023);
    assert_eq!(aggregated["vehicle"]["images"][0], "vehicles/49/front.jpg");
}

#[tokio::test]
async fn test_resolve_unbuilt_types_report_not_implemented() {
    let app = TestApp::new().await;
    let tenant = app.create_tenant("Demo Motors", "demo").await;

    let payload = json!({
        "path": "/faq",
        "url_type": "faq",
        "canonical_url": "https://demo.autosite.test/faq"
    });

    let create_res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/seo/urls")
            .header("X-Api-Key", &tenant.api_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(create_res.status(), StatusCode::CREATED);

    let resolve_res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/seo/resolve-path?tenant=demo&path=/faq")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let resolved = parse_body(resolve_res).await;
    assert_eq!(resolved["aggregated_data"]["kind"], "not_implemented");
    assert_eq!(resolved["aggregated_data"]["url_type"], "faq");
}

#[tokio::test]
async fn test_preview_expands_spintax_and_builds_breadcrumbs() {
    let app = TestApp::new().await;
    let tenant = app.create_tenant("Demo Motors", "demo").await;

    let payload = json!({
        "path": "/comprar-carro/vw-polo-2023-49",
        "url_type": "vehicle_detail",
        "canonical_url": "https://demo.autosite.test/comprar-carro/vw-polo-2023-49",
        "title": "{Compre|Garanta} VW Polo 2023",
        "meta_description": "VW Polo 2023 {em oferta|com preço especial}",
        "breadcrumbs": [
            {"name": "Home", "item": "https://demo.autosite.test/"}
        ]
    });

    let create_res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/seo/urls")
            .header("X-Api-Key", &tenant.api_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(create_res.status(), StatusCode::CREATED);

    let preview_res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/seo/preview?tenant=demo&path=/comprar-carro/vw-polo-2023-49")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(preview_res.status(), StatusCode::OK);
    let preview = parse_body(preview_res).await;

    let title = preview["title"].as_str().unwrap();
    assert!(
        title == "Compre VW Polo 2023" || title == "Garanta VW Polo 2023",
        "unexpected title expansion: {}",
        title
    );
    let description = preview["description"].as_str().unwrap();
    assert!(
        description == "VW Polo 2023 em oferta" || description == "VW Polo 2023 com preço especial",
        "unexpected description expansion: {}",
        description
    );
    assert!(!title.contains('{'));

    assert_eq!(preview["canonical_url"], "https://demo.autosite.test/comprar-carro/vw-polo-2023-49");
    assert_eq!(preview["breadcrumbs"]["@type"], "BreadcrumbList");
    assert_eq!(preview["breadcrumbs"]["itemListElement"][0]["position"], 1);
}

#[tokio::test]
async fn test_template_catalog_endpoint() {
    let app = TestApp::new().await;

    let catalog_res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/seo/templates?type=vehicle_detail")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(catalog_res.status(), StatusCode::OK);
    let catalog = parse_body(catalog_res).await;
    assert_eq!(catalog["type"], "vehicle_detail");
    assert!(catalog["titles"].as_array().unwrap().len() >= 2);

    let missing_res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/seo/templates?type=podcast")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(missing_res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upsert_requires_api_key() {
    let app = TestApp::new().await;
    app.create_tenant("Demo Motors", "demo").await;

    let payload = json!({
        "path": "/x",
        "url_type": "static",
        "canonical_url": "https://demo.autosite.test/x"
    });

    let no_key = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/seo/urls")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(no_key.status(), StatusCode::UNAUTHORIZED);

    let bad_key = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/seo/urls")
            .header("X-Api-Key", "wrong-token")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(bad_key.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upsert_rejects_unknown_url_type() {
    let app = TestApp::new().await;
    let tenant = app.create_tenant("Demo Motors", "demo").await;

    let payload = json!({
        "path": "/x",
        "url_type": "landing_page",
        "canonical_url": "https://demo.autosite.test/x"
    });

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/seo/urls")
            .header("X-Api-Key", &tenant.api_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
