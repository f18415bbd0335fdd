//! Client-side search pipeline for the Geohogar property listings backend.
//!
//! The backend's filter endpoint only understands numeric foreign keys, so
//! the crate keeps the last fetched catalog in memory and uses it to turn the
//! zone, property-type and operation names a user picks into IDs. Empty
//! searches are retried once with a wider price band so the caller can still
//! offer similar listings.
//!
//! ```no_run
//! use geohogar_scout::{ApiConfig, FilterCriteria, HttpPropertyApi, SearchOrchestrator, SearchOutcome};
//!
//! # async fn run() -> geohogar_scout::Result<()> {
//! let config = ApiConfig::from_env()?;
//! let search = SearchOrchestrator::new(HttpPropertyApi::with_config(&config)?, config);
//!
//! let criteria = FilterCriteria::new()
//!     .neighborhood("Centro")
//!     .sale(true)
//!     .price_between(100_000, 250_000)
//!     .garage(true);
//!
//! match search.search(&criteria).await {
//!     SearchOutcome::Success { results } => println!("{} matches", results.len()),
//!     SearchOutcome::NoResults { suggestion, .. } => println!("{suggestion}"),
//!     SearchOutcome::Error { message } => eprintln!("{message}"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod pricing;
pub mod resolver;
pub mod search;

pub use api::{ContactRequest, FilterQuery, HttpPropertyApi, PropertyApi, PropertyRecord};
pub use catalog::CatalogCache;
pub use config::ApiConfig;
pub use error::{ApiError, Result};
pub use models::{FilterCriteria, Property, TriState};
pub use pricing::{PriceRange, PriceRangeSettings};
pub use resolver::{NameResolver, OperationStatusMapping};
pub use search::{CatalogSnapshot, SearchOrchestrator, SearchOutcome};
