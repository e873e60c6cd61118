pub mod catalog_client;
pub mod fixture_catalog;
pub mod identity_service;

pub use catalog_client::*;
pub use fixture_catalog::*;
pub use identity_service::*;
