// Product selection from untrusted query input
use crate::application::catalog_service::ProductAvailability;

/// Strip everything but letters, digits and spaces from a requested product
/// code.
pub fn sanitize_product_code(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect()
}

/// Resolve the product to display.
///
/// The requested code is sanitized and then checked against the
/// currently-available set; anything that does not name an available product
/// falls back to the configured default. A client-supplied code is never used
/// beyond this membership check, so it can never reach a filesystem path
/// unvetted.
pub fn select_product(
    requested: Option<&str>,
    availability: &ProductAvailability,
    default_product: &str,
) -> String {
    match requested {
        Some(raw) => {
            let cleaned = sanitize_product_code(raw);
            if availability.is_available(&cleaned) {
                cleaned
            } else {
                default_product.to_string()
            }
        }
        None => default_product.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::catalog_service::CatalogService;
    use crate::application::freshness::AlwaysFresh;
    use crate::application::image_store::ImageStore;
    use crate::domain::product::RadarProduct;
    use crate::infrastructure::config::GallerySettings;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;
    use std::time::SystemTime;

    struct FixedStore {
        present: HashSet<PathBuf>,
    }

    #[async_trait]
    impl ImageStore for FixedStore {
        async fn probe(&self, path: &Path) -> Option<SystemTime> {
            self.present.contains(path).then(SystemTime::now)
        }
    }

    async fn snapshot_with(present: &[&str]) -> ProductAvailability {
        let settings = GallerySettings {
            radar_name: "kbis".to_string(),
            default_product: "br1".to_string(),
            image_directory: "radar_images".to_string(),
            image_type: "png".to_string(),
            image_count: 10,
            image_width: 512,
            image_height: 512,
            image_expiration_secs: 1200,
            enforce_expiration: false,
        };
        let store = FixedStore {
            present: present
                .iter()
                .map(|code| PathBuf::from(format!("/www/radar_images/kbis_{}_0.png", code)))
                .collect(),
        };
        let catalog = CatalogService::new(
            settings,
            vec![
                RadarProduct::new("br1", "Base Reflectivity 1"),
                RadarProduct::new("cr", "Composite Reflectivity"),
            ],
            Arc::new(store),
            Arc::new(AlwaysFresh),
        );
        catalog.available_products(Path::new("/www")).await
    }

    #[test]
    fn test_sanitize_keeps_letters_digits_spaces() {
        assert_eq!(sanitize_product_code("br1"), "br1");
        assert_eq!(sanitize_product_code("br1; rm -rf"), "br1 rm rf");
        assert_eq!(sanitize_product_code("../../etc/passwd"), "etcpasswd");
        assert_eq!(sanitize_product_code("<script>"), "script");
        assert_eq!(sanitize_product_code(""), "");
    }

    #[tokio::test]
    async fn test_valid_available_code_is_kept() {
        let snapshot = snapshot_with(&["br1", "cr"]).await;
        assert_eq!(select_product(Some("cr"), &snapshot, "br1"), "cr");
    }

    #[tokio::test]
    async fn test_injection_attempt_falls_back_to_default() {
        let snapshot = snapshot_with(&["br1", "cr"]).await;
        assert_eq!(select_product(Some("br1; rm -rf"), &snapshot, "br1"), "br1");
    }

    #[tokio::test]
    async fn test_unavailable_code_falls_back_to_default() {
        let snapshot = snapshot_with(&["br1"]).await;
        // "cr" is a known product but has no image right now.
        assert_eq!(select_product(Some("cr"), &snapshot, "br1"), "br1");
    }

    #[tokio::test]
    async fn test_missing_parameter_uses_default() {
        let snapshot = snapshot_with(&["br1", "cr"]).await;
        assert_eq!(select_product(None, &snapshot, "br1"), "br1");
    }
}
