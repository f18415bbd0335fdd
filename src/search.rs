//! Filtered search with a single relaxed-price fallback.
//!
//! A search resolves the user's names to backend IDs, runs the filter query
//! and, if nothing matches, runs it exactly once more with the price band
//! widened. Transport failures end the search with [`SearchOutcome::Error`]
//! instead of propagating.

use crate::api::traits::PropertyApi;
use crate::api::types::{ContactRequest, FilterQuery, PropertyRecord};
use crate::catalog::CatalogCache;
use crate::config::ApiConfig;
use crate::error::Result;
use crate::models::{FilterCriteria, Property};
use crate::pricing::PriceRange;
use crate::resolver::NameResolver;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

pub const DEFAULT_ZONES: [&str; 6] = [
    "Centro",
    "Villa Sarita",
    "Palomar",
    "San Miguel",
    "Itaembé Miní",
    "Villa Urquiza",
];

pub const DEFAULT_PROPERTY_TYPES: [&str; 5] = [
    "Casa",
    "Departamento",
    "Duplex",
    "Local Comercial",
    "Terreno",
];

/// How a search ended
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SearchOutcome {
    Success {
        results: Vec<Property>,
    },
    /// Nothing matched exactly; `alternatives` holds what the relaxed
    /// retry found, possibly nothing
    NoResults {
        message: String,
        suggestion: String,
        alternatives: Vec<Property>,
    },
    Error {
        message: String,
    },
}

/// A freshly fetched catalog together with its slider bounds
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogSnapshot {
    pub properties: Vec<Property>,
    pub price_range: PriceRange,
}

pub struct SearchOrchestrator<A: PropertyApi> {
    api: A,
    cache: CatalogCache,
    config: ApiConfig,
}

impl<A: PropertyApi> SearchOrchestrator<A> {
    pub fn new(api: A, config: ApiConfig) -> Self {
        Self::with_cache(api, config, CatalogCache::new())
    }

    pub fn with_cache(api: A, config: ApiConfig, cache: CatalogCache) -> Self {
        Self { api, cache, config }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn cache(&self) -> &CatalogCache {
        &self.cache
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Fetch the whole catalog, replace the cache and recompute the price range
    pub async fn refresh_catalog(&self) -> Result<CatalogSnapshot> {
        let records = self.api.fetch_all_properties().await?;
        info!("Catalog refreshed with {} properties", records.len());
        self.cache.set(records.clone());

        let properties: Vec<Property> = records.into_iter().map(Property::from).collect();
        let prices: Vec<i64> = properties.iter().map(|p| p.price).collect();
        let price_range = self.config.pricing.compute(&prices);

        Ok(CatalogSnapshot {
            properties,
            price_range,
        })
    }

    /// Populate the cache if nothing has been fetched yet. A failed fetch
    /// leaves the cache empty; callers carry on unconstrained.
    pub async fn ensure_catalog(&self) {
        if self.cache.is_populated() {
            return;
        }
        match self.api.fetch_all_properties().await {
            Ok(records) => {
                debug!("Catalog loaded with {} properties", records.len());
                self.cache.set(records);
            }
            Err(e) => warn!("Could not load catalog, names will not be resolved: {}", e),
        }
    }

    /// Slider bounds for whatever is cached right now
    pub fn price_range(&self) -> PriceRange {
        let prices: Vec<i64> = self
            .cache
            .get()
            .map(|records| records.iter().map(PropertyRecord::parsed_price).collect())
            .unwrap_or_default();
        self.config.pricing.compute(&prices)
    }

    /// Distinct zone names from the catalog, or the built-in list
    pub async fn zone_names(&self) -> Vec<String> {
        self.distinct_names(|r| &r.zone.name, &DEFAULT_ZONES).await
    }

    /// Distinct property-type names from the catalog, or the built-in list
    pub async fn property_type_names(&self) -> Vec<String> {
        self.distinct_names(|r| &r.property_type.name, &DEFAULT_PROPERTY_TYPES)
            .await
    }

    async fn distinct_names(
        &self,
        name: impl Fn(&PropertyRecord) -> &String,
        defaults: &[&str],
    ) -> Vec<String> {
        self.ensure_catalog().await;
        let names: BTreeSet<String> = self
            .cache
            .get()
            .map(|records| records.iter().map(|r| name(r).clone()).collect())
            .unwrap_or_default();

        if names.is_empty() {
            defaults.iter().map(|s| s.to_string()).collect()
        } else {
            names.into_iter().collect()
        }
    }

    pub async fn property_detail(&self, id: i64) -> Result<Property> {
        let record = self.api.fetch_property(id).await?;
        debug!("Loaded detail for property {}: {}", id, record.address);
        Ok(record.into())
    }

    pub async fn submit_contact(&self, request: &ContactRequest) -> Result<()> {
        self.api.submit_contact_request(request).await
    }

    /// Translate criteria into the backend query, resolving names through
    /// the cache
    pub fn build_query(&self, criteria: &FilterCriteria) -> FilterQuery {
        let resolver = NameResolver::new(&self.cache, &self.config.operation);
        let resolved_status =
            resolver.resolve_operation_status_id(criteria.is_rent, criteria.is_sale);

        FilterQuery {
            active: criteria.active.as_option(),
            price_min: criteria.price_min,
            price_max: criteria.price_max,
            zone_id: resolver.resolve_zone_id(criteria.neighborhood.as_deref()),
            property_type_id: resolver.resolve_property_type_id(criteria.property_type.as_deref()),
            room_type_id: criteria.room_type_id,
            status_id: criteria.status_id.or(resolved_status),
            garage: criteria.garage.as_option(),
            balcony: criteria.balcony.as_option(),
            patio: criteria.patio.as_option(),
            accepts_pets: criteria.accepts_pets.as_option(),
        }
    }

    /// Widen both price bounds by the configured percentage. Unset bounds
    /// stay unset; results saturate at the i64 limits.
    pub fn relaxed(&self, query: &FilterQuery) -> FilterQuery {
        let pct = i128::from(self.config.relax_percent);
        let widen = |bound: i64, sign: i128| {
            let bound = i128::from(bound);
            let widened = bound + sign * (bound * pct / 100);
            i64::try_from(widened).unwrap_or(if widened < 0 { i64::MIN } else { i64::MAX })
        };
        FilterQuery {
            price_min: query.price_min.map(|min| widen(min, -1)),
            price_max: query.price_max.map(|max| widen(max, 1)),
            ..query.clone()
        }
    }

    pub async fn search(&self, criteria: &FilterCriteria) -> SearchOutcome {
        info!("Search started:\n{}", criteria.summary());

        self.ensure_catalog().await;
        let query = self.build_query(criteria);
        debug!("Filter query: {:?}", query);

        let results = match self.api.fetch_filtered_properties(&query).await {
            Ok(records) => records,
            Err(e) => {
                warn!("Filtered search failed: {}", e);
                return SearchOutcome::Error {
                    message: e.to_string(),
                };
            }
        };

        if !results.is_empty() {
            info!("Search matched {} properties", results.len());
            return SearchOutcome::Success {
                results: results.into_iter().map(Property::from).collect(),
            };
        }

        let relaxed = self.relaxed(&query);
        info!(
            "No exact matches, retrying with price {:?} - {:?}",
            relaxed.price_min, relaxed.price_max
        );

        match self.api.fetch_filtered_properties(&relaxed).await {
            Ok(records) if !records.is_empty() => {
                info!("Relaxed search found {} alternatives", records.len());
                SearchOutcome::NoResults {
                    message: "No exact matches found".to_string(),
                    suggestion: format!("We found {} similar properties", records.len()),
                    alternatives: records.into_iter().map(Property::from).collect(),
                }
            }
            Ok(_) => SearchOutcome::NoResults {
                message: "No properties match these filters".to_string(),
                suggestion: "Try adjusting your filters".to_string(),
                alternatives: Vec::new(),
            },
            Err(e) => {
                warn!("Relaxed search failed: {}", e);
                SearchOutcome::Error {
                    message: e.to_string(),
                }
            }
        }
    }
}
