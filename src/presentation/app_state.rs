// Application state for HTTP handlers
use crate::application::catalog_service::CatalogService;
use crate::infrastructure::config::ServerSettings;
use crate::infrastructure::thumbnailer::Thumbnailer;

#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub thumbnailer: Thumbnailer,
    pub server: ServerSettings,
}
