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

async fn read_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn create_config(app: &TestApp, api_token: &str, sitemap_type: &str, url: &str) -> Value {
    let payload = json!({
        "type": sitemap_type,
        "url": url
    });
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/tenant/sitemap/configs")
            .header("X-Api-Key", api_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED, "config creation failed for {}", sitemap_type);
    parse_body(res).await
}

async fn create_vehicle(app: &TestApp, api_token: &str, brand: &str, model: &str, year: i32) -> Value {
    let payload = json!({
        "brand": brand,
        "model": model,
        "year": year
    });
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/tenant/vehicles")
            .header("X-Api-Key", api_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    parse_body(res).await
}

#[tokio::test]
async fn test_config_creation_triggers_generation() {
    let app = TestApp::new().await;
    let tenant = app.create_tenant("Demo Motors", "demo").await;

    create_config(&app, &tenant.api_token, "pages", "https://demo.autosite.test/sitemap-pages.xml").await;

    // The pages sitemap and the index were written during creation.
    let pages_path = format!("tenant_{}/sitemap-pages.xml", tenant.tenant_id);
    let index_path = format!("tenant_{}/sitemap.xml", tenant.tenant_id);
    assert!(app.state.sitemap_storage.exists(&pages_path).await.unwrap());
    assert!(app.state.sitemap_storage.exists(&index_path).await.unwrap());

    // Served through the file endpoint as XML.
    let file_res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/seo/sitemap-file?tenant=demo&type=pages")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(file_res.status(), StatusCode::OK);
    assert_eq!(
        file_res.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/xml; charset=utf-8"
    );
    let xml = read_text(file_res).await;

    // All 7 fixed static pages against the tenant's subdomain site.
    assert_eq!(xml.matches("<url>").count(), 7);
    assert!(xml.contains("<loc>https://demo.autosite.test/</loc>"));
    assert!(xml.contains("<loc>https://demo.autosite.test/financiamento</loc>"));
}

#[tokio::test]
async fn test_vehicles_sitemap_with_zero_vehicles_is_empty_urlset() {
    let app = TestApp::new().await;
    let tenant = app.create_tenant("Demo Motors", "demo").await;

    create_config(&app, &tenant.api_token, "vehicles", "https://demo.autosite.test/sitemap-vehicles.xml").await;

    let file_res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/seo/sitemap-file?tenant=demo&type=vehicles")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(file_res.status(), StatusCode::OK);
    let xml = read_text(file_res).await;

    assert!(xml.contains("<urlset"));
    assert!(xml.contains("</urlset>"));
    assert_eq!(xml.matches("<url>").count(), 0);
}

#[tokio::test]
async fn test_vehicles_sitemap_entries_and_force_semantics() {
    let app = TestApp::new().await;
    let tenant = app.create_tenant("Demo Motors", "demo").await;

    let vehicle = create_vehicle(&app, &tenant.api_token, "VW", "Polo", 2023).await;
    let vehicle_id = vehicle["id"].as_i64().unwrap();

    create_config(&app, &tenant.api_token, "vehicles", "https://demo.autosite.test/sitemap-vehicles.xml").await;

    let vehicles_path = format!("tenant_{}/sitemap-vehicles.xml", tenant.tenant_id);
    let first_xml = app.state.sitemap_storage.read(&vehicles_path).await.unwrap().unwrap();

    // One entry per active vehicle with the fixed hints.
    assert_eq!(first_xml.matches("<url>").count(), 1);
    assert!(first_xml.contains(&format!("<loc>https://demo.autosite.test/comprar-carro/vw-polo-2023-{}</loc>", vehicle_id)));
    assert!(first_xml.contains("<changefreq>daily</changefreq>"));
    assert!(first_xml.contains("<priority>0.8</priority>"));

    // New inventory appears only after a forced regeneration.
    create_vehicle(&app, &tenant.api_token, "Fiat", "Uno", 2020).await;

    let skip_res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/tenant/sitemap/generate")
            .header("X-Api-Key", &tenant.api_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"type": "vehicles", "force": false}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(skip_res.status(), StatusCode::OK);
    let skip_body = parse_body(skip_res).await;
    assert_eq!(skip_body["skipped"], true);
    assert!(skip_body["generated_at"].as_str().is_some());

    let unchanged_xml = app.state.sitemap_storage.read(&vehicles_path).await.unwrap().unwrap();
    assert_eq!(unchanged_xml, first_xml, "force=false must not touch an existing file");

    let force_res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/tenant/sitemap/generate")
            .header("X-Api-Key", &tenant.api_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"type": "vehicles", "force": true}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(force_res.status(), StatusCode::OK);
    let force_body = parse_body(force_res).await;
    assert_eq!(force_body["skipped"], false);
    assert_eq!(force_body["url_count"], 2);

    let forced_xml = app.state.sitemap_storage.read(&vehicles_path).await.unwrap().unwrap();
    assert_eq!(forced_xml.matches("<url>").count(), 2);
    assert!(forced_xml.contains("fiat-uno-2020"));
}

#[tokio::test]
async fn test_images_sitemap_uses_asset_host() {
    let app = TestApp::new().await;
    let tenant = app.create_tenant("Demo Motors", "demo").await;

    let vehicle = create_vehicle(&app, &tenant.api_token, "VW", "Polo", 2023).await;
    let vehicle_id = vehicle["id"].as_i64().unwrap();

    let image_res = app.router.clone().oneshot(
        Request::builder().method("POST")
            .uri(format!("/api/tenant/vehicles/{}/images", vehicle_id))
            .header("X-Api-Key", &tenant.api_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"path": "vehicles/1/front.jpg"}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(image_res.status(), StatusCode::CREATED);

    create_config(&app, &tenant.api_token, "images", "https://demo.autosite.test/sitemap-images.xml").await;

    let images_path = format!("tenant_{}/sitemap-images.xml", tenant.tenant_id);
    let xml = app.state.sitemap_storage.read(&images_path).await.unwrap().unwrap();

    // Image entries point at the platform asset host, not the tenant site.
    assert!(xml.contains("<loc>https://api.autosite.test/vehicles/1/front.jpg</loc>"));
}

#[tokio::test]
async fn test_index_omits_missing_files() {
    let app = TestApp::new().await;
    let tenant = app.create_tenant("Demo Motors", "demo").await;

    create_config(&app, &tenant.api_token, "vehicles", "https://demo.autosite.test/sitemap-vehicles.xml").await;
    create_config(&app, &tenant.api_token, "pages", "https://demo.autosite.test/sitemap-pages.xml").await;

    let index_res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/seo/sitemap-index?tenant=demo")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(index_res.status(), StatusCode::OK);
    let xml = read_text(index_res).await;
    assert_eq!(xml.matches("<sitemap>").count(), 2);
    assert!(xml.contains(&format!("tenant_{}/sitemap-vehicles.xml", tenant.tenant_id)));
    assert!(xml.contains(&format!("tenant_{}/sitemap-pages.xml", tenant.tenant_id)));

    // Delete the pages file externally: the next index silently omits it.
    let pages_file = app.sitemap_dir
        .join(format!("tenant_{}", tenant.tenant_id))
        .join("sitemap-pages.xml");
    std::fs::remove_file(pages_file).unwrap();

    let index_res_2 = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/seo/sitemap-index?tenant=demo")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(index_res_2.status(), StatusCode::OK);
    let xml_2 = read_text(index_res_2).await;
    assert_eq!(xml_2.matches("<sitemap>").count(), 1);
    assert!(xml_2.contains("sitemap-vehicles.xml"));
    assert!(!xml_2.contains("sitemap-pages.xml"));
}

#[tokio::test]
async fn test_generate_unknown_type_config_is_not_found() {
    let app = TestApp::new().await;
    let tenant = app.create_tenant("Demo Motors", "demo").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/tenant/sitemap/generate")
            .header("X-Api-Key", &tenant.api_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"type": "vehicles"}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sitemap_file_missing_is_not_found() {
    let app = TestApp::new().await;
    app.create_tenant("Demo Motors", "demo").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/seo/sitemap-file?tenant=demo&type=vehicles")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_sitemap_over_url_records() {
    let app = TestApp::new().await;
    let tenant = app.create_tenant("Demo Motors", "demo").await;

    // One active record and one redirect; only the active one is eligible.
    for (path, redirect) in [("/comprar-carro/vw-polo-2023-49", false), ("/antigo", true)] {
        let mut payload = json!({
            "path": path,
            "url_type": "vehicle_detail",
            "canonical_url": format!("https://demo.autosite.test{}", path)
        });
        if redirect {
            payload["redirect_type"] = json!("301");
            payload["redirect_target"] = json!("/comprar-carro/vw-polo-2023-49");
        }
        let res = app.router.clone().oneshot(
            Request::builder().method("POST").uri("/api/seo/urls")
                .header("X-Api-Key", &tenant.api_token)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string())).unwrap()
        ).await.unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    // Without the admin token -> 401
    let unauthorized = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/super-admin/seo/sitemap?tenant=demo&format=json")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(unauthorized.status(), StatusCode::UNAUTHORIZED);

    let json_res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/super-admin/seo/sitemap?tenant=demo&format=json")
            .header("X-Admin-Token", common::ADMIN_TOKEN)
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(json_res.status(), StatusCode::OK);
    let body = parse_body(json_res).await;
    assert_eq!(body["url_count"], 1);
    assert_eq!(body["urls"][0]["loc"], "https://demo.autosite.test/comprar-carro/vw-polo-2023-49");

    let xml_res = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/super-admin/seo/sitemap?tenant=demo")
            .header("X-Admin-Token", common::ADMIN_TOKEN)
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(xml_res.status(), StatusCode::OK);
    assert_eq!(
        xml_res.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/xml; charset=utf-8"
    );
    let xml = read_text(xml_res).await;
    assert_eq!(xml.matches("<url>").count(), 1);
    assert!(!xml.contains("/antigo"));
}
