pub mod bundle_editor;
pub mod sku_service;

pub use bundle_editor::*;
pub use sku_service::*;
