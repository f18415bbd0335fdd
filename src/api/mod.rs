pub mod client;
pub mod traits;
pub mod types;

pub use client::HttpPropertyApi;
pub use traits::PropertyApi;
pub use types::{ApiResponse, ContactRequest, FilterQuery, PropertyRecord};
