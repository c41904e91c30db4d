use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::escape::escape;
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::models::sitemap::TenantSitemapConfig;
use crate::domain::models::tenant::Tenant;
use crate::domain::ports::{SitemapConfigRepository, SitemapStorage, VehicleRepository};
use crate::error::AppError;

/// Static tenant-site pages every `pages` sitemap carries.
pub const STATIC_PAGES: [&str; 7] = [
    "/",
    "/sobre",
    "/contato",
    "/comprar-carro",
    "/marcas",
    "/financiamento",
    "/seguro",
];

#[derive(Debug, Clone, Serialize)]
pub struct SitemapUrl {
    pub loc: String,
    pub lastmod: Option<DateTime<Utc>>,
    pub changefreq: Option<String>,
    pub priority: Option<f64>,
}

pub struct SitemapIndexEntry {
    pub loc: String,
    pub lastmod: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutcome {
    pub sitemap_type: String,
    pub file: String,
    pub url_count: usize,
    pub skipped: bool,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateAllOutcome {
    pub results: BTreeMap<String, GenerationOutcome>,
    pub index: GenerationOutcome,
}

pub fn index_path(tenant_id: &str) -> String {
    format!("tenant_{}/sitemap.xml", tenant_id)
}

pub fn type_path(tenant_id: &str, sitemap_type: &str) -> String {
    format!("tenant_{}/sitemap-{}.xml", tenant_id, sitemap_type)
}

fn format_lastmod(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Renders a `<urlset>` document. An empty slice yields a well-formed
/// document with zero `<url>` entries.
pub fn build_urlset(urls: &[SitemapUrl]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");

    for url in urls {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape(&url.loc)));
        if let Some(lastmod) = url.lastmod {
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", format_lastmod(lastmod)));
        }
        if let Some(changefreq) = &url.changefreq {
            xml.push_str(&format!("    <changefreq>{}</changefreq>\n", escape(changefreq)));
        }
        if let Some(priority) = url.priority {
            xml.push_str(&format!("    <priority>{:.1}</priority>\n", priority));
        }
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Renders a `<sitemapindex>` document over per-type sitemap locations.
pub fn build_sitemap_index(entries: &[SitemapIndexEntry]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<sitemapindex xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");

    for entry in entries {
        xml.push_str("  <sitemap>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape(&entry.loc)));
        xml.push_str(&format!("    <lastmod>{}</lastmod>\n", format_lastmod(entry.lastmod)));
        xml.push_str("  </sitemap>\n");
    }

    xml.push_str("</sitemapindex>\n");
    xml
}

/// Builds and persists tenant sitemap documents from live inventory data.
///
/// Generation runs inline in the request that triggered it; per-type files
/// are skipped when they already exist unless `force` is set, and all
/// writes go through the storage port's atomic write.
pub struct SitemapGenerator {
    vehicle_repo: Arc<dyn VehicleRepository>,
    config_repo: Arc<dyn SitemapConfigRepository>,
    storage: Arc<dyn SitemapStorage>,
    app_url: String,
    base_domain: String,
    asset_host: String,
}

impl SitemapGenerator {
    pub fn new(
        vehicle_repo: Arc<dyn VehicleRepository>,
        config_repo: Arc<dyn SitemapConfigRepository>,
        storage: Arc<dyn SitemapStorage>,
        app_url: String,
        base_domain: String,
        asset_host: String,
    ) -> Self {
        Self {
            vehicle_repo,
            config_repo,
            storage,
            app_url,
            base_domain,
            asset_host,
        }
    }

    pub fn public_storage_url(&self, relative_path: &str) -> String {
        format!("{}/storage/sitemaps/{}", self.app_url.trim_end_matches('/'), relative_path)
    }

    /// Generates the single sitemap declared by `config`.
    pub async fn generate_type(
        &self,
        tenant: &Tenant,
        config: &TenantSitemapConfig,
        force: bool,
    ) -> Result<GenerationOutcome, AppError> {
        let relative_path = type_path(&tenant.id, &config.sitemap_type);

        if !force && self.storage.exists(&relative_path).await? {
            let generated_at = self
                .storage
                .modified_at(&relative_path)
                .await?
                .unwrap_or_else(Utc::now);
            info!(
                tenant_id = %tenant.id,
                sitemap_type = %config.sitemap_type,
                "Sitemap file already exists, skipping generation"
            );
            return Ok(GenerationOutcome {
                sitemap_type: config.sitemap_type.clone(),
                file: relative_path,
                url_count: 0,
                skipped: true,
                generated_at,
            });
        }

        let urls = self.build_urls(tenant, config).await?;
        let xml = build_urlset(&urls);
        self.storage.write(&relative_path, &xml).await?;

        info!(
            tenant_id = %tenant.id,
            sitemap_type = %config.sitemap_type,
            url_count = urls.len(),
            "Sitemap generated"
        );

        Ok(GenerationOutcome {
            sitemap_type: config.sitemap_type.clone(),
            file: relative_path,
            url_count: urls.len(),
            skipped: false,
            generated_at: Utc::now(),
        })
    }

    /// Generates every active non-index sitemap of the tenant, then
    /// rewrites the index over the per-type files present on disk.
    pub async fn generate_all(&self, tenant: &Tenant, force: bool) -> Result<GenerateAllOutcome, AppError> {
        let configs = self.config_repo.list_active(&tenant.id).await?;

        let mut results = BTreeMap::new();
        for config in configs.iter().filter(|c| c.sitemap_type != "index") {
            let outcome = self.generate_type(tenant, config, force).await?;
            results.insert(config.sitemap_type.clone(), outcome);
        }

        let index = self.write_index(tenant).await?;
        Ok(GenerateAllOutcome { results, index })
    }

    /// Index XML over the per-type files that currently exist on disk,
    /// lastmod taken from each file's modification time.
    pub async fn build_index(&self, tenant: &Tenant) -> Result<(String, usize), AppError> {
        let configs = self.config_repo.list_active(&tenant.id).await?;

        let mut entries = Vec::new();
        for config in configs.iter().filter(|c| c.sitemap_type != "index") {
            let relative_path = type_path(&tenant.id, &config.sitemap_type);
            match self.storage.modified_at(&relative_path).await? {
                Some(lastmod) => entries.push(SitemapIndexEntry {
                    loc: self.public_storage_url(&relative_path),
                    lastmod,
                }),
                None => {
                    warn!(
                        tenant_id = %tenant.id,
                        sitemap_type = %config.sitemap_type,
                        "Per-type sitemap file missing, omitting from index"
                    );
                }
            }
        }

        Ok((build_sitemap_index(&entries), entries.len()))
    }

    async fn write_index(&self, tenant: &Tenant) -> Result<GenerationOutcome, AppError> {
        let (xml, count) = self.build_index(tenant).await?;
        let relative_path = index_path(&tenant.id);
        self.storage.write(&relative_path, &xml).await?;

        Ok(GenerationOutcome {
            sitemap_type: "index".to_string(),
            file: relative_path,
            url_count: count,
            skipped: false,
            generated_at: Utc::now(),
        })
    }

    async fn build_urls(
        &self,
        tenant: &Tenant,
        config: &TenantSitemapConfig,
    ) -> Result<Vec<SitemapUrl>, AppError> {
        let site_url = tenant.site_url(&self.base_domain);

        let urls = match config.sitemap_type.as_str() {
            "vehicles" => {
                let rows = self.vehicle_repo.list_active_for_sitemap(&tenant.id).await?;
                rows.iter()
                    .map(|row| SitemapUrl {
                        loc: format!("{}/comprar-carro/{}", site_url, row.detail_slug()),
                        lastmod: Some(row.updated_at),
                        changefreq: Some("daily".to_string()),
                        priority: Some(0.8),
                    })
                    .collect()
            }
            "images" => {
                let images = self.vehicle_repo.list_active_vehicle_images(&tenant.id).await?;
                let asset_host = self.asset_host.trim_end_matches('/');
                images
                    .iter()
                    .map(|image| SitemapUrl {
                        loc: format!("{}/{}", asset_host, image.path.trim_start_matches('/')),
                        lastmod: Some(image.created_at),
                        changefreq: Some(config.change_frequency.clone()),
                        priority: Some(config.priority),
                    })
                    .collect()
            }
            "pages" => STATIC_PAGES
                .iter()
                .map(|page| SitemapUrl {
                    loc: if *page == "/" {
                        format!("{}/", site_url)
                    } else {
                        format!("{}{}", site_url, page)
                    },
                    lastmod: None,
                    changefreq: Some(config.change_frequency.clone()),
                    priority: Some(config.priority),
                })
                .collect(),
            _ => vec![SitemapUrl {
                loc: self.app_url.clone(),
                lastmod: None,
                changefreq: Some(config.change_frequency.clone()),
                priority: Some(config.priority),
            }],
        };

        Ok(urls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use quick_xml::events::Event;
    use quick_xml::Reader;

    fn assert_well_formed(xml: &str) {
        let mut reader = Reader::from_str(xml);
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => panic!("malformed XML: {e}"),
            }
            buf.clear();
        }
    }

    #[test]
    fn test_empty_urlset_is_well_formed() {
        let xml = build_urlset(&[]);
        assert_well_formed(&xml);
        assert!(xml.contains("<urlset"));
        assert!(!xml.contains("<url>"));
    }

    #[test]
    fn test_urlset_entry_fields() {
        let urls = vec![SitemapUrl {
            loc: "https://demo.com/comprar-carro/vw-polo-2023-49".into(),
            lastmod: Some(Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()),
            changefreq: Some("daily".into()),
            priority: Some(0.8),
        }];
        let xml = build_urlset(&urls);
        assert_well_formed(&xml);
        assert!(xml.contains("<loc>https://demo.com/comprar-carro/vw-polo-2023-49</loc>"));
        assert!(xml.contains("<lastmod>2026-03-01T12:00:00Z</lastmod>"));
        assert!(xml.contains("<changefreq>daily</changefreq>"));
        assert!(xml.contains("<priority>0.8</priority>"));
    }

    #[test]
    fn test_urlset_escapes_special_chars() {
        let urls = vec![SitemapUrl {
            loc: "https://demo.com/busca?marca=vw&modelo=polo".into(),
            lastmod: None,
            changefreq: None,
            priority: None,
        }];
        let xml = build_urlset(&urls);
        assert_well_formed(&xml);
        assert!(xml.contains("marca=vw&amp;modelo=polo"));
    }

    #[test]
    fn test_sitemap_index_entries() {
        let entries = vec![SitemapIndexEntry {
            loc: "https://api.demo.com/storage/sitemaps/tenant_1/sitemap-vehicles.xml".into(),
            lastmod: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        }];
        let xml = build_sitemap_index(&entries);
        assert_well_formed(&xml);
        assert!(xml.contains("<sitemapindex"));
        assert!(xml.contains("sitemap-vehicles.xml</loc>"));
        assert!(xml.contains("<lastmod>2026-03-01T12:00:00Z</lastmod>"));
    }

    #[test]
    fn test_static_pages_count() {
        assert_eq!(STATIC_PAGES.len(), 7);
        assert_eq!(STATIC_PAGES[0], "/");
    }
}
