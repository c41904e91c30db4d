use crate::domain::{models::seo_url::SeoUrlRecord, ports::SeoUrlRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

pub struct PostgresSeoUrlRepo {
    pool: PgPool,
}

impl PostgresSeoUrlRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SeoUrlRepository for PostgresSeoUrlRepo {
    async fn upsert(&self, record: &SeoUrlRecord) -> Result<(SeoUrlRecord, bool), AppError> {
        let existing = self.find(&record.tenant_id, &record.locale, &record.path).await?;

        match existing {
            Some(current) => {
                let updated = sqlx::query_as::<_, SeoUrlRecord>(
                    "UPDATE seo_urls SET url_type=$1, canonical_url=$2, is_indexable=$3, include_in_sitemap=$4, \
                     sitemap_priority=$5, sitemap_changefreq=$6, title=$7, meta_description=$8, og_image=$9, \
                     breadcrumbs_json=$10, structured_data_type=$11, structured_data_json=$12, content_templates_json=$13, \
                     content_data_json=$14, route_params_json=$15, redirect_type=$16, redirect_target=$17, redirect_reason=$18, \
                     previous_slug=$19, redirect_date=$20, lastmod=$21 \
                     WHERE id=$22 RETURNING *"
                )
                    .bind(&record.url_type)
                    .bind(&record.canonical_url)
                    .bind(record.is_indexable)
                    .bind(record.include_in_sitemap)
                    .bind(record.sitemap_priority)
                    .bind(&record.sitemap_changefreq)
                    .bind(&record.title)
                    .bind(&record.meta_description)
                    .bind(&record.og_image)
                    .bind(&record.breadcrumbs_json)
                    .bind(&record.structured_data_type)
                    .bind(&record.structured_data_json)
                    .bind(&record.content_templates_json)
                    .bind(&record.content_data_json)
                    .bind(&record.route_params_json)
                    .bind(&record.redirect_type)
                    .bind(&record.redirect_target)
                    .bind(&record.redirect_reason)
                    .bind(&record.previous_slug)
                    .bind(record.redirect_date)
                    .bind(Utc::now())
                    .bind(&current.id)
                    .fetch_one(&self.pool)
                    .await
                    .map_err(AppError::Database)?;
                Ok((updated, false))
            }
            None => {
                let created = sqlx::query_as::<_, SeoUrlRecord>(
                    "INSERT INTO seo_urls (id, tenant_id, locale, path, url_type, canonical_url, is_indexable, \
                     include_in_sitemap, sitemap_priority, sitemap_changefreq, title, meta_description, og_image, \
                     breadcrumbs_json, structured_data_type, structured_data_json, content_templates_json, \
                     content_data_json, route_params_json, redirect_type, redirect_target, redirect_reason, \
                     previous_slug, redirect_date, lastmod, created_at) \
                     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26) RETURNING *"
                )
                    .bind(&record.id)
                    .bind(&record.tenant_id)
                    .bind(&record.locale)
                    .bind(&record.path)
                    .bind(&record.url_type)
                    .bind(&record.canonical_url)
                    .bind(record.is_indexable)
                    .bind(record.include_in_sitemap)
                    .bind(record.sitemap_priority)
                    .bind(&record.sitemap_changefreq)
                    .bind(&record.title)
                    .bind(&record.meta_description)
                    .bind(&record.og_image)
                    .bind(&record.breadcrumbs_json)
                    .bind(&record.structured_data_type)
                    .bind(&record.structured_data_json)
                    .bind(&record.content_templates_json)
                    .bind(&record.content_data_json)
                    .bind(&record.route_params_json)
                    .bind(&record.redirect_type)
                    .bind(&record.redirect_target)
                    .bind(&record.redirect_reason)
                    .bind(&record.previous_slug)
                    .bind(record.redirect_date)
                    .bind(record.lastmod)
                    .bind(record.created_at)
                    .fetch_one(&self.pool)
                    .await
                    .map_err(AppError::Database)?;
                Ok((created, true))
            }
        }
    }

    async fn find(&self, tenant_id: &str, locale: &str, path: &str) -> Result<Option<SeoUrlRecord>, AppError> {
        sqlx::query_as::<_, SeoUrlRecord>(
            "SELECT * FROM seo_urls WHERE tenant_id = $1 AND locale = $2 AND path = $3",
        )
            .bind(tenant_id)
            .bind(locale)
            .bind(path)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_sitemap_entries(&self, tenant_id: &str, url_type: Option<&str>) -> Result<Vec<SeoUrlRecord>, AppError> {
        match url_type {
            Some(url_type) => sqlx::query_as::<_, SeoUrlRecord>(
                "SELECT * FROM seo_urls WHERE tenant_id = $1 AND url_type = $2 AND include_in_sitemap = TRUE \
                 AND redirect_type IS NULL AND redirect_target IS NULL ORDER BY path",
            )
                .bind(tenant_id)
                .bind(url_type)
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::Database),
            None => sqlx::query_as::<_, SeoUrlRecord>(
                "SELECT * FROM seo_urls WHERE tenant_id = $1 AND include_in_sitemap = TRUE \
                 AND redirect_type IS NULL AND redirect_target IS NULL ORDER BY path",
            )
                .bind(tenant_id)
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::Database),
        }
    }
}
