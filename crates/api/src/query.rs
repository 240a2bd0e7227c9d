//! Shared query parameter types for API handlers.

use serde::Deserialize;
use taproom_core::paging::PageRequest;
use taproom_core::params::blank_as_none;

/// Paging parameters (`?pageNumber=&pageSize=`). Empty values count as
/// absent.
///
/// Raw values are normalized by [`PageRequest::build`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub page_number: Option<i64>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub page_size: Option<i64>,
}

impl PaginationParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::build(self.page_number, self.page_size)
    }
}
