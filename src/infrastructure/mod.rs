// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod fs_image_store;
pub mod thumbnailer;
