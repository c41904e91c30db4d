use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use tracing::warn;

pub const URL_TYPES: [&str; 5] = ["vehicle_detail", "collection", "blog_post", "faq", "static"];
pub const REDIRECT_TYPES: [&str; 3] = ["301", "302", "canonical"];
pub const CHANGE_FREQUENCIES: [&str; 7] =
    ["always", "hourly", "daily", "weekly", "monthly", "yearly", "never"];

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Breadcrumb {
    pub name: String,
    pub item: String,
}

/// Route parameters stored on a URL record, decoded per url_type.
/// Shapes are only pinned down for the types that actually consume them;
/// everything else stays an opaque bag.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteParams {
    VehicleDetail { vehicle_id: i64 },
    Opaque(Value),
    None,
}

/// A stored mapping from a tenant-scoped public path to its canonical /
/// redirect / meta / structured-data information.
///
/// JSON-shaped attributes are persisted as TEXT columns (`*_json`) and
/// decoded through the typed accessors below.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct SeoUrlRecord {
    pub id: String,
    pub tenant_id: String,
    pub locale: String,
    pub path: String,
    pub url_type: String,
    pub canonical_url: String,
    pub is_indexable: bool,
    pub include_in_sitemap: bool,
    pub sitemap_priority: f64,
    pub sitemap_changefreq: String,
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub og_image: Option<String>,
    pub breadcrumbs_json: Option<String>,
    pub structured_data_type: Option<String>,
    pub structured_data_json: Option<String>,
    pub content_templates_json: Option<String>,
    pub content_data_json: Option<String>,
    pub route_params_json: Option<String>,
    pub redirect_type: Option<String>,
    pub redirect_target: Option<String>,
    pub redirect_reason: Option<String>,
    pub previous_slug: Option<String>,
    pub redirect_date: Option<DateTime<Utc>>,
    pub lastmod: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl SeoUrlRecord {
    pub fn new(tenant_id: String, locale: String, path: String, url_type: String, canonical_url: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            tenant_id,
            locale,
            path,
            url_type,
            canonical_url,
            is_indexable: true,
            include_in_sitemap: true,
            sitemap_priority: 0.5,
            sitemap_changefreq: "weekly".to_string(),
            title: None,
            meta_description: None,
            og_image: None,
            breadcrumbs_json: None,
            structured_data_type: None,
            structured_data_json: None,
            content_templates_json: None,
            content_data_json: None,
            route_params_json: None,
            redirect_type: None,
            redirect_target: None,
            redirect_reason: None,
            previous_slug: None,
            redirect_date: None,
            lastmod: Utc::now(),
            created_at: Utc::now(),
        }
    }

    pub fn is_redirect(&self) -> bool {
        self.redirect_type.is_some() || self.redirect_target.is_some()
    }

    /// Derived status: `active` unless redirect metadata is present.
    pub fn status(&self) -> &'static str {
        match self.redirect_type.as_deref() {
            None if self.redirect_target.is_none() => "active",
            Some("302") => "redirect_302",
            Some("canonical") => "redirect_canonical",
            // Missing/unknown redirect_type with a target defaults to a 301.
            _ => "redirect_301",
        }
    }

    /// A redirect record must never be indexable or listed in sitemaps.
    /// Called before persisting so the stored row already holds the
    /// flags callers will observe.
    pub fn enforce_redirect_flags(&mut self) {
        if self.is_redirect() {
            self.is_indexable = false;
            self.include_in_sitemap = false;
        }
    }

    pub fn route_params(&self) -> RouteParams {
        let Some(raw) = self.route_params_json.as_deref() else {
            return RouteParams::None;
        };
        let value: Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(e) => {
                warn!(path = %self.path, error = %e, "Malformed route_params payload");
                return RouteParams::None;
            }
        };

        if self.url_type == "vehicle_detail" {
            if let Some(vehicle_id) = value.get("vehicle_id").and_then(Value::as_i64) {
                return RouteParams::VehicleDetail { vehicle_id };
            }
            warn!(path = %self.path, "vehicle_detail record without vehicle_id route param");
        }

        RouteParams::Opaque(value)
    }

    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        self.breadcrumbs_json
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default()
    }

    /// schema.org BreadcrumbList built from the stored crumb list.
    pub fn breadcrumb_list(&self) -> Option<Value> {
        let crumbs = self.breadcrumbs();
        if crumbs.is_empty() {
            return None;
        }
        let elements: Vec<Value> = crumbs
            .iter()
            .enumerate()
            .map(|(i, crumb)| {
                json!({
                    "@type": "ListItem",
                    "position": i + 1,
                    "name": crumb.name,
                    "item": crumb.item,
                })
            })
            .collect();
        Some(json!({
            "@context": "https://schema.org",
            "@type": "BreadcrumbList",
            "itemListElement": elements,
        }))
    }

    /// Structured-data document: the stored payload when present, else a
    /// minimal object carrying only the declared type.
    pub fn structured_data(&self) -> Option<Value> {
        if let Some(raw) = self.structured_data_json.as_deref() {
            if let Ok(value) = serde_json::from_str::<Value>(raw) {
                return Some(value);
            }
            warn!(path = %self.path, "Malformed structured_data payload");
        }
        self.structured_data_type.as_ref().map(|t| {
            json!({
                "@context": "https://schema.org",
                "@type": t,
            })
        })
    }

    pub fn content_templates(&self) -> Option<Value> {
        self.content_templates_json
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
    }

    pub fn content_data(&self) -> Option<Value> {
        self.content_data_json
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
    }
}
