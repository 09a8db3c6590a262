//! Pagination limits for list endpoints.

use serde::{Deserialize, Serialize};

/// Page sizing applied when a list request omits or overshoots `page_size`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Page size used when the request does not specify one.
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    /// Upper bound on any requested page size.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

fn default_page_size() -> usize {
    50
}

fn default_max_page_size() -> usize {
    1000
}
