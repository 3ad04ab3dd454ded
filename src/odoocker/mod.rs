pub mod builder;
pub mod config;
pub mod context;
pub mod error;
pub mod host;
pub mod inputs;
pub mod interpolate;
pub mod loader;
pub mod manifest;
pub mod metadata;
pub mod packages;
pub mod platform;
pub mod render;
pub mod repos;
pub mod templates;
pub mod utils;
pub mod version;
pub mod wkhtmltopdf;
