use crate::api::types::{ContactRequest, FilterQuery, PropertyRecord};
use crate::error::Result;
use async_trait::async_trait;

/// Everything the search pipeline needs from the listings backend.
/// Implemented over HTTP by `HttpPropertyApi`; tests swap in fakes.
#[async_trait]
pub trait PropertyApi: Send + Sync {
    /// Fetch the full catalog with all foreign keys attached
    async fn fetch_all_properties(&self) -> Result<Vec<PropertyRecord>>;

    /// Fetch the properties matching `query`; unset fields must not be sent
    async fn fetch_filtered_properties(&self, query: &FilterQuery) -> Result<Vec<PropertyRecord>>;

    async fn fetch_property(&self, id: i64) -> Result<PropertyRecord>;

    async fn submit_contact_request(&self, request: &ContactRequest) -> Result<()>;
}
