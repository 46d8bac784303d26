// Domain layer - radar products and gallery value types
pub mod gallery;
pub mod product;
