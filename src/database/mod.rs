pub mod api_client;
pub mod override_store;
pub mod repositories;
pub mod seed;

pub use api_client::*;
pub use override_store::*;
