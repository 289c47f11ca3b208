pub mod catalog;
pub mod pagination;
pub mod sku;

pub use catalog::*;
pub use pagination::*;
pub use sku::*;
