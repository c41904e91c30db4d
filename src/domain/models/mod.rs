pub mod tenant;
pub mod seo_url;
pub mod sitemap;
pub mod vehicle;
pub mod lead;
