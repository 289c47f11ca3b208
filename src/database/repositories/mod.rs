pub mod api_sku_repository;
pub mod mock_sku_repository;
pub mod sku_repository;

pub use api_sku_repository::*;
pub use mock_sku_repository::*;
pub use sku_repository::*;
