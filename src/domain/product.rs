// Radar product reference data and status messages
use serde::Deserialize;

/// Placeholder status for a product that has a current image.
pub const MSG_AVAILABLE: &str = "&nbsp;";

/// Status for a product with no index-0 image on disk.
pub const MSG_NOT_AVAILABLE: &str = "Radar images are not available at this time.";

/// Status for a product whose image is older than the expiration threshold.
pub fn msg_not_current(max_age_secs: u64) -> String {
    format!(
        "Radar image is not current - more than {} seconds old.",
        max_age_secs
    )
}

/// One NEXRAD Level III product: short code plus human label. Deserialized
/// from the optional `config/products.toml` override.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RadarProduct {
    pub code: String,
    pub label: String,
}

impl RadarProduct {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
        }
    }
}

/// The standard GRLevel3 product set, in display order.
pub fn default_product_table() -> Vec<RadarProduct> {
    [
        ("br1", "Base Reflectivity 1"),
        ("br2", "Base Reflectivity 2"),
        ("br3", "Base Reflectivity 3"),
        ("br4", "Base Reflectivity 4"),
        ("br248", "Base Reflectivity 248nm"),
        ("bv1", "Base Velocity 1"),
        ("bv2", "Base Velocity 2"),
        ("bv3", "Base Velocity 3"),
        ("bv4", "Base Velocity 4"),
        ("bv32", "Base Velocity 32nm"),
        ("srv1", "Storm Relative Velocity 1"),
        ("srv2", "Storm Relative Velocity 2"),
        ("srv3", "Storm Relative Velocity 3"),
        ("srv4", "Storm Relative Velocity 4"),
        ("sw", "Spectrum Width"),
        ("sw32", "Spectrum Width 32nm"),
        ("cr", "Composite Reflectivity"),
        ("cr248", "Composite Reflectivity 248nm"),
        ("et", "Echo Tops"),
        ("vil", "Vertically Integrated Liquid"),
        ("ohr", "One Hour Rain"),
        ("thr", "Three Hour Rain"),
        ("str", "Storm Rain"),
        ("dsp", "Digital Total Rainfall"),
    ]
    .into_iter()
    .map(|(code, label)| RadarProduct::new(code, label))
    .collect()
}
