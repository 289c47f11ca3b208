pub mod calculations;
pub mod config;
pub mod export;
pub mod formatting;
pub mod pagination;

// Re-exports
pub use config::*;
