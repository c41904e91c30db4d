use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::domain::models::seo_url::{RouteParams, SeoUrlRecord};
use crate::domain::ports::VehicleRepository;
use crate::domain::services::spintax;
use crate::error::AppError;

/// Domain data joined into a resolution response, dispatched on the
/// record's url_type. Branches without an implementation report
/// themselves instead of degrading to null, so callers can tell "no
/// aggregation applies" from "not built yet".
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AggregatedData {
    Vehicle { vehicle: VehicleAggregate },
    NotImplemented { url_type: String },
    None,
}

#[derive(Debug, Clone, Serialize)]
pub struct VehicleAggregate {
    pub id: i64,
    pub brand: String,
    pub model: String,
    pub version: Option<String>,
    pub fuel: Option<String>,
    pub year: Option<i32>,
    pub price: Option<f64>,
    pub status: String,
    pub images: Vec<String>,
}

/// Loads the aggregated-data block for an active record.
pub async fn load_aggregated_data(
    vehicle_repo: &dyn VehicleRepository,
    record: &SeoUrlRecord,
) -> Result<AggregatedData, AppError> {
    match record.url_type.as_str() {
        "vehicle_detail" => match record.route_params() {
            RouteParams::VehicleDetail { vehicle_id } => {
                let Some(vehicle) = vehicle_repo.find_by_id(&record.tenant_id, vehicle_id).await? else {
                    warn!(
                        tenant_id = %record.tenant_id,
                        path = %record.path,
                        vehicle_id,
                        "SEO record points at a missing vehicle"
                    );
                    return Ok(AggregatedData::None);
                };

                let brand = vehicle_repo
                    .find_brand(vehicle.brand_id)
                    .await?
                    .map(|b| b.name)
                    .unwrap_or_default();
                let model = vehicle_repo
                    .find_model(vehicle.model_id)
                    .await?
                    .map(|m| m.name)
                    .unwrap_or_default();
                let images = vehicle_repo
                    .list_images(vehicle.id)
                    .await?
                    .into_iter()
                    .map(|img| img.path)
                    .collect();

                Ok(AggregatedData::Vehicle {
                    vehicle: VehicleAggregate {
                        id: vehicle.id,
                        brand,
                        model,
                        version: vehicle.version,
                        fuel: vehicle.fuel,
                        year: vehicle.year,
                        price: vehicle.price,
                        status: vehicle.status,
                        images,
                    },
                })
            }
            _ => Ok(AggregatedData::None),
        },
        "collection" | "blog_post" | "faq" | "static" => Ok(AggregatedData::NotImplemented {
            url_type: record.url_type.clone(),
        }),
        _ => Ok(AggregatedData::None),
    }
}

/// Reduced payload for a record carrying redirect metadata. The
/// requested path is echoed back, not the canonical one.
pub fn redirect_payload(record: &SeoUrlRecord) -> Value {
    json!({
        "path": record.path,
        "locale": record.locale,
        "type": record.url_type,
        "status": record.status(),
        "redirect": {
            "redirect_type": record.redirect_type,
            "redirect_target": record.redirect_target,
            "redirect_reason": record.redirect_reason,
            "previous_slug": record.previous_slug,
            "redirect_date": record.redirect_date,
        },
        "is_indexable": record.is_indexable,
        "include_in_sitemap": record.include_in_sitemap,
        "title": record.title,
        "meta_description": record.meta_description,
        "og_image": record.og_image,
    })
}

/// Full payload for an active record, including sitemap hints and the
/// aggregated-data block.
pub fn resolved_payload(record: &SeoUrlRecord, aggregated: &AggregatedData) -> Value {
    json!({
        "path": record.path,
        "locale": record.locale,
        "type": record.url_type,
        "status": record.status(),
        "canonical_url": record.canonical_url,
        "is_indexable": record.is_indexable,
        "include_in_sitemap": record.include_in_sitemap,
        "sitemap": {
            "priority": record.sitemap_priority,
            "changefreq": record.sitemap_changefreq,
        },
        "title": record.title,
        "meta_description": record.meta_description,
        "og_image": record.og_image,
        "breadcrumbs": record.breadcrumbs(),
        "structured_data_type": record.structured_data_type,
        "structured_data": record.structured_data(),
        "content_templates": record.content_templates(),
        "content_data": record.content_data(),
        "route_params": record.route_params_json.as_deref().and_then(|raw| serde_json::from_str::<Value>(raw).ok()),
        "lastmod": record.lastmod,
        "aggregated_data": aggregated,
    })
}

/// Preview payload: spintax-expanded title/description plus the
/// structured data and breadcrumb list a page would render.
pub fn preview_payload(record: &SeoUrlRecord) -> Value {
    json!({
        "path": record.path,
        "title": record.title.as_deref().map(spintax::expand),
        "description": record.meta_description.as_deref().map(spintax::expand),
        "canonical_url": record.canonical_url,
        "structured_data": record.structured_data(),
        "breadcrumbs": record.breadcrumb_list(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> SeoUrlRecord {
        SeoUrlRecord::new(
            "t1".into(),
            "pt-BR".into(),
            "/antigo/caminho".into(),
            "vehicle_detail".into(),
            "https://demo.com/comprar-carro/vw-polo-2023-49".into(),
        )
    }

    #[test]
    fn test_redirect_payload_echoes_old_path() {
        let mut rec = record();
        rec.redirect_type = Some("301".into());
        rec.redirect_target = Some("/comprar-carro/vw-polo-2023-49".into());
        rec.enforce_redirect_flags();

        let payload = redirect_payload(&rec);
        assert_eq!(payload["path"], "/antigo/caminho");
        assert_eq!(payload["status"], "redirect_301");
        assert_eq!(payload["redirect"]["redirect_target"], "/comprar-carro/vw-polo-2023-49");
        assert_eq!(payload["is_indexable"], false);
        assert_eq!(payload["include_in_sitemap"], false);
        assert!(payload.get("canonical_url").is_none());
    }

    #[test]
    fn test_resolved_payload_carries_sitemap_hints() {
        let mut rec = record();
        rec.sitemap_priority = 0.8;
        rec.sitemap_changefreq = "daily".into();

        let payload = resolved_payload(&rec, &AggregatedData::None);
        assert_eq!(payload["status"], "active");
        assert_eq!(payload["sitemap"]["priority"], 0.8);
        assert_eq!(payload["sitemap"]["changefreq"], "daily");
        assert_eq!(payload["aggregated_data"]["kind"], "none");
    }

    #[test]
    fn test_aggregated_data_serialization_tags() {
        let not_impl = AggregatedData::NotImplemented { url_type: "faq".into() };
        let value = serde_json::to_value(&not_impl).unwrap();
        assert_eq!(value["kind"], "not_implemented");
        assert_eq!(value["url_type"], "faq");
    }

    #[test]
    fn test_preview_expands_spintax() {
        let mut rec = record();
        rec.title = Some("{Compre|Compre} VW Polo".into());
        let payload = preview_payload(&rec);
        assert_eq!(payload["title"], "Compre VW Polo");
    }
}
