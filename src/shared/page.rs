//! Pagination wire types shared by the catalog and order endpoints.

use serde::{Deserialize, Serialize};

/// One page of a paginated listing, as the backend reports it.
///
/// The backend includes more bookkeeping fields than these; only the ones
/// consumed by clients are modeled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub current_page: u32,
    pub data: Vec<T>,
    pub last_page: u32,
    pub per_page: u32,
    pub total: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_url: Option<String>,
}

impl<T> Paginated<T> {
    /// Whether another page can be requested after this one.
    pub fn has_more(&self) -> bool {
        self.current_page < self.last_page
    }
}

/// Page selection for paginated endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PageQuery {
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: None,
        }
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Render as query-string pairs, omitting unset fields.
    pub(crate) fn to_params(self) -> Vec<String> {
        let mut params = Vec::new();
        if let Some(p) = self.page {
            params.push(format!("page={}", p));
        }
        if let Some(pp) = self.per_page {
            params.push(format!("per_page={}", pp));
        }
        params
    }
}
