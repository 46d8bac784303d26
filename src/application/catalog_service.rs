// Catalog service - availability snapshots and image-name enumeration
use crate::application::freshness::FreshnessPolicy;
use crate::application::image_store::ImageStore;
use crate::domain::gallery::ImageSet;
use crate::domain::product::{MSG_AVAILABLE, MSG_NOT_AVAILABLE, RadarProduct, msg_not_current};
use crate::infrastructure::config::GallerySettings;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Point-in-time view of which products have a current image on disk.
///
/// Carries the available products in table order plus a status message for
/// every table entry, available or not. Snapshots are never cached; each one
/// reflects the filesystem at the moment it was taken.
#[derive(Debug, Clone)]
pub struct ProductAvailability {
    available: Vec<RadarProduct>,
    statuses: HashMap<String, String>,
}

impl ProductAvailability {
    pub fn available(&self) -> &[RadarProduct] {
        &self.available
    }

    pub fn is_available(&self, code: &str) -> bool {
        self.available.iter().any(|p| p.code == code)
    }

    pub fn label_of(&self, code: &str) -> Option<&str> {
        self.available
            .iter()
            .find(|p| p.code == code)
            .map(|p| p.label.as_str())
    }

    /// Status message for a product code, including unavailable entries.
    pub fn status(&self, code: &str) -> Option<&str> {
        self.statuses.get(code).map(String::as_str)
    }
}

/// Immutable per-process catalog: settings, the product table, and the seams
/// used to answer availability questions.
#[derive(Clone)]
pub struct CatalogService {
    settings: GallerySettings,
    products: Vec<RadarProduct>,
    store: Arc<dyn ImageStore>,
    policy: Arc<dyn FreshnessPolicy>,
}

impl CatalogService {
    pub fn new(
        mut settings: GallerySettings,
        products: Vec<RadarProduct>,
        store: Arc<dyn ImageStore>,
        policy: Arc<dyn FreshnessPolicy>,
    ) -> Self {
        settings.radar_name = settings.radar_name.to_lowercase();
        Self {
            settings,
            products,
            store,
            policy,
        }
    }

    pub fn settings(&self) -> &GallerySettings {
        &self.settings
    }

    /// Full product table in display order, independent of availability.
    pub fn products(&self) -> &[RadarProduct] {
        &self.products
    }

    /// Probe every product's index-0 file under `base` and build a fresh
    /// snapshot. `base` is the serving root the image directory is resolved
    /// against; it always comes from the caller, never from the environment.
    pub async fn available_products(&self, base: &Path) -> ProductAvailability {
        let dir = base.join(&self.settings.image_directory);
        let now = Utc::now();

        let mut available = Vec::new();
        let mut statuses = HashMap::new();

        for product in &self.products {
            let probe_path = dir.join(self.image_filename(&product.code, 0));
            match self.store.probe(&probe_path).await {
                Some(modified) => {
                    let modified: DateTime<Utc> = modified.into();
                    if self.policy.is_fresh(modified, now) {
                        available.push(product.clone());
                        statuses.insert(product.code.clone(), MSG_AVAILABLE.to_string());
                    } else {
                        statuses.insert(
                            product.code.clone(),
                            msg_not_current(self.settings.image_expiration_secs),
                        );
                    }
                }
                None => {
                    statuses.insert(product.code.clone(), MSG_NOT_AVAILABLE.to_string());
                }
            }
        }

        tracing::debug!(
            "{} of {} products have images under {}",
            available.len(),
            self.products.len(),
            dir.display()
        );

        ProductAvailability {
            available,
            statuses,
        }
    }

    /// Filename for slide `index` of a product:
    /// `{radar}_{code}_{index}.{type}`, zero-based, no padding.
    pub fn image_filename(&self, product_code: &str, index: u32) -> String {
        format!(
            "{}_{}_{}.{}",
            self.settings.radar_name, product_code, index, self.settings.image_type
        )
    }

    /// Fresh ordered set of all `image_count` filenames for a product.
    /// Purely generative - nothing here checks that the files exist.
    pub fn image_filenames(&self, product_code: &str) -> ImageSet {
        ImageSet::from_names(
            (0..self.settings.image_count)
                .map(|i| self.image_filename(product_code, i))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::freshness::{AlwaysFresh, MaxAge};
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use std::time::{Duration, SystemTime};

    /// In-memory store standing in for the image directory.
    #[derive(Default)]
    struct FakeStore {
        files: Mutex<HashMap<PathBuf, SystemTime>>,
    }

    impl FakeStore {
        fn insert(&self, path: &str, modified: SystemTime) {
            self.files
                .lock()
                .unwrap()
                .insert(PathBuf::from(path), modified);
        }

        fn remove(&self, path: &str) {
            self.files.lock().unwrap().remove(Path::new(path));
        }
    }

    #[async_trait]
    impl ImageStore for FakeStore {
        async fn probe(&self, path: &Path) -> Option<SystemTime> {
            self.files.lock().unwrap().get(path).copied()
        }
    }

    fn settings() -> GallerySettings {
        GallerySettings {
            radar_name: "kbis".to_string(),
            default_product: "br1".to_string(),
            image_directory: "radar_images".to_string(),
            image_type: "png".to_string(),
            image_count: 10,
            image_width: 800,
            image_height: 600,
            image_expiration_secs: 1200,
            enforce_expiration: false,
        }
    }

    fn two_products() -> Vec<RadarProduct> {
        vec![
            RadarProduct::new("br1", "Base Reflectivity 1"),
            RadarProduct::new("cr", "Composite Reflectivity"),
        ]
    }

    #[test]
    fn test_enumeration_count_and_order() {
        let catalog = CatalogService::new(
            settings(),
            two_products(),
            Arc::new(FakeStore::default()),
            Arc::new(AlwaysFresh),
        );

        let images = catalog.image_filenames("br1");
        assert_eq!(images.len(), 10);
        assert_eq!(images.as_slice()[0], "kbis_br1_0.png");
        assert_eq!(images.as_slice()[9], "kbis_br1_9.png");
        for (i, name) in images.iter().enumerate() {
            assert_eq!(name, &format!("kbis_br1_{}.png", i));
        }
    }

    #[test]
    fn test_enumeration_with_zero_count_is_empty() {
        let mut s = settings();
        s.image_count = 0;
        let catalog = CatalogService::new(
            s,
            two_products(),
            Arc::new(FakeStore::default()),
            Arc::new(AlwaysFresh),
        );

        assert!(catalog.image_filenames("br1").is_empty());
    }

    #[test]
    fn test_radar_name_is_lowercased() {
        let mut s = settings();
        s.radar_name = "KBIS".to_string();
        let catalog = CatalogService::new(
            s,
            two_products(),
            Arc::new(FakeStore::default()),
            Arc::new(AlwaysFresh),
        );

        assert_eq!(catalog.image_filename("br1", 0), "kbis_br1_0.png");
    }

    #[tokio::test]
    async fn test_availability_includes_only_products_with_index_zero_file() {
        let store = Arc::new(FakeStore::default());
        store.insert("/webroot/radar_images/kbis_br1_0.png", SystemTime::now());

        let catalog = CatalogService::new(
            settings(),
            two_products(),
            store,
            Arc::new(AlwaysFresh),
        );
        let snapshot = catalog.available_products(Path::new("/webroot")).await;

        assert!(snapshot.is_available("br1"));
        assert!(!snapshot.is_available("cr"));
        assert_eq!(snapshot.available().len(), 1);
        assert_eq!(snapshot.label_of("br1"), Some("Base Reflectivity 1"));
        assert_eq!(snapshot.status("br1"), Some(MSG_AVAILABLE));
        assert_eq!(snapshot.status("cr"), Some(MSG_NOT_AVAILABLE));
    }

    #[tokio::test]
    async fn test_availability_never_includes_unknown_codes() {
        let store = Arc::new(FakeStore::default());
        // A stray file whose code is not in the table must not surface.
        store.insert("/webroot/radar_images/kbis_xyz_0.png", SystemTime::now());

        let catalog = CatalogService::new(
            settings(),
            two_products(),
            store,
            Arc::new(AlwaysFresh),
        );
        let snapshot = catalog.available_products(Path::new("/webroot")).await;

        assert!(snapshot.available().is_empty());
        assert!(snapshot.status("xyz").is_none());
    }

    #[tokio::test]
    async fn test_snapshot_reflects_filesystem_changes() {
        let store = Arc::new(FakeStore::default());
        let catalog = CatalogService::new(
            settings(),
            two_products(),
            store.clone(),
            Arc::new(AlwaysFresh),
        );

        let first = catalog.available_products(Path::new("/webroot")).await;
        assert!(!first.is_available("cr"));

        store.insert("/webroot/radar_images/kbis_cr_0.png", SystemTime::now());
        let second = catalog.available_products(Path::new("/webroot")).await;
        assert!(second.is_available("cr"));

        store.remove("/webroot/radar_images/kbis_cr_0.png");
        let third = catalog.available_products(Path::new("/webroot")).await;
        assert!(!third.is_available("cr"));
    }

    #[tokio::test]
    async fn test_stale_file_excluded_under_max_age_policy() {
        let store = Arc::new(FakeStore::default());
        let old = SystemTime::now() - Duration::from_secs(7200);
        store.insert("/webroot/radar_images/kbis_br1_0.png", old);

        let catalog = CatalogService::new(
            settings(),
            two_products(),
            store,
            Arc::new(MaxAge::new(1200)),
        );
        let snapshot = catalog.available_products(Path::new("/webroot")).await;

        assert!(!snapshot.is_available("br1"));
        assert_eq!(snapshot.status("br1"), Some(msg_not_current(1200).as_str()));
    }

    #[tokio::test]
    async fn test_stale_file_included_under_default_policy() {
        let store = Arc::new(FakeStore::default());
        let old = SystemTime::now() - Duration::from_secs(7200);
        store.insert("/webroot/radar_images/kbis_br1_0.png", old);

        let catalog = CatalogService::new(
            settings(),
            two_products(),
            store,
            Arc::new(AlwaysFresh),
        );
        let snapshot = catalog.available_products(Path::new("/webroot")).await;

        assert!(snapshot.is_available("br1"));
    }
}
