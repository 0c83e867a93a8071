//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::pagination::DEFAULT_ITEMS_PER_PAGE;

fn default_max_bulk_ids() -> usize {
    100
}

fn default_items_per_page() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Largest selection accepted by a single bulk request.
    #[serde(default = "default_max_bulk_ids")]
    pub max_bulk_ids: usize,
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,
}
