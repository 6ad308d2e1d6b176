//! HTTP API handlers for skureg-bulk

pub mod health;
pub mod skus;
pub mod submit;
pub mod template;
pub mod upload;
pub mod vendors;

pub use health::health_routes;
pub use skus::sku_routes;
pub use submit::submit_routes;
pub use template::template_routes;
pub use upload::upload_routes;
pub use vendors::vendor_routes;
