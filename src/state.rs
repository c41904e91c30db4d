use std::sync::Arc;
use crate::domain::ports::{
    TenantRepository, SeoUrlRepository, SitemapConfigRepository,
    VehicleRepository, LeadRepository, SitemapStorage,
};
use crate::domain::services::sitemap::SitemapGenerator;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub tenant_repo: Arc<dyn TenantRepository>,
    pub seo_url_repo: Arc<dyn SeoUrlRepository>,
    pub sitemap_config_repo: Arc<dyn SitemapConfigRepository>,
    pub vehicle_repo: Arc<dyn VehicleRepository>,
    pub lead_repo: Arc<dyn LeadRepository>,
    pub sitemap_storage: Arc<dyn SitemapStorage>,
    pub sitemap_generator: Arc<SitemapGenerator>,
}
