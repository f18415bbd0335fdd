//! Translate the names a user picks into the numeric IDs the filter
//! endpoint expects.
//!
//! A name that cannot be mapped is not an error: it resolves to `None`,
//! which the query builder reads as "don't filter on this dimension".

use crate::api::types::PropertyRecord;
use crate::catalog::CatalogCache;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_RENT_KEYWORD: &str = "alquiler";
pub const DEFAULT_SALE_KEYWORD: &str = "venta";

/// How a rent/sale choice becomes a property-status ID
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationStatusMapping {
    /// Pick the first cached status whose label contains the keyword,
    /// ignoring case
    Keywords { rent: String, sale: String },
    /// Fixed IDs injected from configuration; the cache is not consulted
    Explicit { rent: i64, sale: i64 },
}

impl Default for OperationStatusMapping {
    fn default() -> Self {
        OperationStatusMapping::Keywords {
            rent: DEFAULT_RENT_KEYWORD.to_string(),
            sale: DEFAULT_SALE_KEYWORD.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Rent,
    Sale,
}

pub struct NameResolver<'a> {
    cache: &'a CatalogCache,
    operation: &'a OperationStatusMapping,
}

impl<'a> NameResolver<'a> {
    pub fn new(cache: &'a CatalogCache, operation: &'a OperationStatusMapping) -> Self {
        Self { cache, operation }
    }

    fn find_first<T>(&self, select: impl Fn(&PropertyRecord) -> Option<T>) -> Option<T> {
        self.cache.get()?.iter().find_map(select)
    }

    pub fn resolve_zone_id(&self, name: Option<&str>) -> Option<i64> {
        let name = name?;
        let id = self.find_first(|r| (r.zone.name == name).then_some(r.zone.id));
        debug!("Zone '{}' -> ID {:?}", name, id);
        id
    }

    pub fn resolve_property_type_id(&self, name: Option<&str>) -> Option<i64> {
        let name = name?;
        let id = self.find_first(|r| (r.property_type.name == name).then_some(r.property_type.id));
        debug!("Property type '{}' -> ID {:?}", name, id);
        id
    }

    /// Status ID for a rent-only or sale-only search. Both or neither
    /// selected means every operation is wanted.
    pub fn resolve_operation_status_id(&self, is_rent: bool, is_sale: bool) -> Option<i64> {
        let operation = match (is_rent, is_sale) {
            (true, false) => Operation::Rent,
            (false, true) => Operation::Sale,
            _ => {
                debug!("Operation: any -> no status constraint");
                return None;
            }
        };

        let id = match self.operation {
            OperationStatusMapping::Explicit { rent, sale } => match operation {
                Operation::Rent => Some(*rent),
                Operation::Sale => Some(*sale),
            },
            OperationStatusMapping::Keywords { rent, sale } => {
                let keyword = match operation {
                    Operation::Rent => rent,
                    Operation::Sale => sale,
                }
                .to_lowercase();
                self.find_first(|r| {
                    r.status
                        .name
                        .to_lowercase()
                        .contains(&keyword)
                        .then_some(r.status.id)
                })
            }
        };
        debug!("Operation {:?} -> status ID {:?}", operation, id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::fixtures::record;

    fn catalog() -> CatalogCache {
        let cache = CatalogCache::new();
        cache.set(vec![
            record(1, "120000", (3, "Centro"), (1, "Casa"), (2, "Para Venta")),
            record(2, "90000", (5, "Villa Sarita"), (2, "Departamento"), (4, "Para Alquiler")),
            record(3, "150000", (3, "Centro"), (2, "Departamento"), (2, "Para Venta")),
        ]);
        cache
    }

    #[test]
    fn resolves_zone_by_exact_name() {
        let cache = catalog();
        let mapping = OperationStatusMapping::default();
        let resolver = NameResolver::new(&cache, &mapping);

        assert_eq!(resolver.resolve_zone_id(Some("Centro")), Some(3));
        assert_eq!(resolver.resolve_zone_id(Some("Unknown")), None);
        assert_eq!(resolver.resolve_zone_id(None), None);
    }

    #[test]
    fn zone_match_is_case_sensitive() {
        let cache = catalog();
        let mapping = OperationStatusMapping::default();
        let resolver = NameResolver::new(&cache, &mapping);

        assert_eq!(resolver.resolve_zone_id(Some("centro")), None);
    }

    #[test]
    fn resolves_property_type() {
        let cache = catalog();
        let mapping = OperationStatusMapping::default();
        let resolver = NameResolver::new(&cache, &mapping);

        assert_eq!(resolver.resolve_property_type_id(Some("Departamento")), Some(2));
        assert_eq!(resolver.resolve_property_type_id(Some("Terreno")), None);
    }

    #[test]
    fn resolves_operation_by_keyword() {
        let cache = catalog();
        let mapping = OperationStatusMapping::default();
        let resolver = NameResolver::new(&cache, &mapping);

        assert_eq!(resolver.resolve_operation_status_id(true, false), Some(4));
        assert_eq!(resolver.resolve_operation_status_id(false, true), Some(2));
        assert_eq!(resolver.resolve_operation_status_id(true, true), None);
        assert_eq!(resolver.resolve_operation_status_id(false, false), None);
    }

    #[test]
    fn keyword_without_match_is_unconstrained() {
        let cache = catalog();
        let mapping = OperationStatusMapping::Keywords {
            rent: "rent".to_string(),
            sale: "SALE".to_string(),
        };
        let resolver = NameResolver::new(&cache, &mapping);

        assert_eq!(resolver.resolve_operation_status_id(true, false), None);
        assert_eq!(resolver.resolve_operation_status_id(false, true), None);
    }

    #[test]
    fn keywords_ignore_case() {
        let cache = catalog();
        let mapping = OperationStatusMapping::Keywords {
            rent: "ALQUILER".to_string(),
            sale: "Venta".to_string(),
        };
        let resolver = NameResolver::new(&cache, &mapping);

        assert_eq!(resolver.resolve_operation_status_id(true, false), Some(4));
    }

    #[test]
    fn explicit_mapping_skips_cache() {
        let cache = CatalogCache::new();
        let mapping = OperationStatusMapping::Explicit { rent: 10, sale: 20 };
        let resolver = NameResolver::new(&cache, &mapping);

        assert_eq!(resolver.resolve_operation_status_id(true, false), Some(10));
        assert_eq!(resolver.resolve_operation_status_id(false, true), Some(20));
        assert_eq!(resolver.resolve_operation_status_id(true, true), None);
    }

    #[test]
    fn empty_cache_resolves_to_unconstrained() {
        let cache = CatalogCache::new();
        let mapping = OperationStatusMapping::default();
        let resolver = NameResolver::new(&cache, &mapping);

        assert_eq!(resolver.resolve_zone_id(Some("Centro")), None);
        assert_eq!(resolver.resolve_property_type_id(Some("Casa")), None);
        assert_eq!(resolver.resolve_operation_status_id(true, false), None);
    }
}
