mod catalog_api_client;

pub use catalog_api_client::{CatalogApi, CatalogApiClient};
