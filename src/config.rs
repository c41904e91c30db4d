use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Public base URL of the API itself; stored sitemap files are
    /// published under it and unknown sitemap types point at it.
    pub app_url: String,
    /// Domain under which tenant subdomain sites live, e.g. "autosite.com.br".
    pub base_domain: String,
    /// Host serving vehicle image assets.
    pub asset_host: String,
    pub admin_api_token: String,
    pub sitemap_storage_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            app_url: env::var("APP_URL").unwrap_or_else(|_| "http://localhost:3000".to_string()),
            base_domain: env::var("BASE_DOMAIN").unwrap_or_else(|_| "autosite.com.br".to_string()),
            asset_host: env::var("ASSET_HOST").unwrap_or_else(|_| "https://api.autosite.com.br".to_string()),
            admin_api_token: env::var("ADMIN_API_TOKEN").expect("ADMIN_API_TOKEN must be set"),
            sitemap_storage_dir: env::var("SITEMAP_STORAGE_DIR").unwrap_or_else(|_| "./storage/sitemaps".to_string()),
        }
    }
}
