pub mod fs_sitemap_storage;
