// Application layer - catalog use cases and the seams they depend on
pub mod catalog_service;
pub mod freshness;
pub mod image_store;
pub mod selection;
