// Configuration loading for the gallery service
use crate::domain::product::{RadarProduct, default_product_table};
use anyhow::Context;
use serde::Deserialize;
use std::collections::HashSet;

#[derive(Debug, Deserialize, Clone)]
pub struct GalleryConfig {
    #[serde(default)]
    pub gallery: GallerySettings,
    #[serde(default)]
    pub server: ServerSettings,
}

/// Radar and image-set settings. Every field has a lenient default so a
/// sparse file still loads; unknown keys in the file are ignored.
#[derive(Debug, Deserialize, Clone)]
pub struct GallerySettings {
    /// NEXRAD site identifier, normalized to lowercase when the catalog is
    /// built (e.g. "kbis").
    #[serde(default)]
    pub radar_name: String,
    /// Product shown when the request names none, or names one that is not
    /// currently available.
    #[serde(default)]
    pub default_product: String,
    /// Directory holding the rendered images, relative to the serving root.
    #[serde(default)]
    pub image_directory: String,
    /// File extension of the rendered images.
    #[serde(default = "default_image_type")]
    pub image_type: String,
    /// How many slides to enumerate per product.
    #[serde(default)]
    pub image_count: u32,
    #[serde(default = "default_image_dimension")]
    pub image_width: u32,
    #[serde(default = "default_image_dimension")]
    pub image_height: u32,
    /// Age threshold for the strict freshness policy.
    #[serde(default = "default_image_expiration")]
    pub image_expiration_secs: u64,
    /// When true, images older than the threshold stop counting as
    /// available. Off by default.
    #[serde(default)]
    pub enforce_expiration: bool,
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self {
            radar_name: String::new(),
            default_product: String::new(),
            image_directory: String::new(),
            image_type: default_image_type(),
            image_count: 0,
            image_width: default_image_dimension(),
            image_height: default_image_dimension(),
            image_expiration_secs: default_image_expiration(),
            enforce_expiration: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Serving root every image path is resolved against. Passed into the
    /// catalog and thumbnailer explicitly; nothing reads it from the
    /// process environment.
    #[serde(default = "default_base_dir")]
    pub base_dir: String,
    #[serde(default = "default_thumbnail_dimension")]
    pub thumbnail_width: u32,
    #[serde(default = "default_thumbnail_dimension")]
    pub thumbnail_height: u32,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            base_dir: default_base_dir(),
            thumbnail_width: default_thumbnail_dimension(),
            thumbnail_height: default_thumbnail_dimension(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
struct ProductsConfig {
    #[serde(default)]
    products: Vec<RadarProduct>,
}

fn default_image_type() -> String {
    "png".to_string()
}

fn default_image_dimension() -> u32 {
    512
}

fn default_image_expiration() -> u64 {
    1200
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_base_dir() -> String {
    ".".to_string()
}

fn default_thumbnail_dimension() -> u32 {
    200
}

pub fn load_gallery_config() -> anyhow::Result<GalleryConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/gallery"))
        .build()
        .context("Failed to read config/gallery")?;

    settings
        .try_deserialize()
        .context("Failed to parse gallery configuration")
}

/// Product table: the bundled default set unless `config/products.toml`
/// replaces it wholesale. Codes key availability lookups, so an override
/// that repeats one is rejected.
pub fn load_product_table() -> anyhow::Result<Vec<RadarProduct>> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/products").required(false))
        .build()
        .context("Failed to read config/products")?;

    let overrides: ProductsConfig = settings
        .try_deserialize()
        .context("Failed to parse product table override")?;
    if overrides.products.is_empty() {
        Ok(default_product_table())
    } else {
        ensure_unique_codes(&overrides.products)?;
        Ok(overrides.products)
    }
}

fn ensure_unique_codes(products: &[RadarProduct]) -> anyhow::Result<()> {
    let mut seen = HashSet::new();
    for product in products {
        if !seen.insert(product.code.as_str()) {
            anyhow::bail!("Duplicate product code {:?} in config/products", product.code);
        }
    }
    Ok(())
}
