use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Location information for a property
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub zone: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Listing agent attached to a property
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Agent {
    pub name: String,
    pub license: String,
}

/// Amenities a listing either has or lacks
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Amenities {
    pub garage: bool,
    pub balcony: bool,
    pub patio: bool,
}

/// Core property data model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
    pub id: i64,
    pub property_type: String,
    /// Asking price in whole currency units, never negative
    pub price: i64,
    pub address: String,
    pub rooms: u32,
    pub bathrooms: u32,
    pub floors: u32,
    pub images: Vec<String>,
    pub accepts_pets: bool,
    pub pet_type: String,
    pub location: Location,
    pub description: String,
    /// Operation label as the backend spells it, e.g. "Para Venta"
    pub operation: String,
    pub amenities: Amenities,
    pub agent: Agent,
    pub listed_at: Option<DateTime<Utc>>,
}

/// An optional boolean filter.
///
/// `Unset` means "do not filter on this dimension"; it is never sent to the
/// backend, whereas `False` is sent as an explicit `false`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TriState {
    #[default]
    Unset,
    True,
    False,
}

impl TriState {
    pub fn as_option(self) -> Option<bool> {
        match self {
            TriState::Unset => None,
            TriState::True => Some(true),
            TriState::False => Some(false),
        }
    }

    pub fn is_unset(self) -> bool {
        self == TriState::Unset
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        if value {
            TriState::True
        } else {
            TriState::False
        }
    }
}

impl From<Option<bool>> for TriState {
    fn from(value: Option<bool>) -> Self {
        value.map_or(TriState::Unset, TriState::from)
    }
}

/// What the user picked on the filter screen.
///
/// Names are kept human-readable here; they are translated to backend IDs
/// only when a search is issued.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterCriteria {
    pub neighborhood: Option<String>,
    pub property_type: Option<String>,
    pub price_min: Option<i64>,
    pub price_max: Option<i64>,
    pub is_rent: bool,
    pub is_sale: bool,
    pub garage: TriState,
    pub balcony: TriState,
    pub patio: TriState,
    pub accepts_pets: TriState,
    /// Listing visibility flag, sent as `estado`
    pub active: TriState,
    pub room_type_id: Option<i64>,
    pub status_id: Option<i64>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn neighborhood(mut self, name: impl Into<String>) -> Self {
        self.neighborhood = Some(name.into());
        self
    }

    pub fn property_type(mut self, name: impl Into<String>) -> Self {
        self.property_type = Some(name.into());
        self
    }

    pub fn price_between(mut self, min: i64, max: i64) -> Self {
        self.price_min = Some(min);
        self.price_max = Some(max);
        self
    }

    pub fn rent(mut self, is_rent: bool) -> Self {
        self.is_rent = is_rent;
        self
    }

    pub fn sale(mut self, is_sale: bool) -> Self {
        self.is_sale = is_sale;
        self
    }

    pub fn garage(mut self, value: impl Into<TriState>) -> Self {
        self.garage = value.into();
        self
    }

    pub fn balcony(mut self, value: impl Into<TriState>) -> Self {
        self.balcony = value.into();
        self
    }

    pub fn patio(mut self, value: impl Into<TriState>) -> Self {
        self.patio = value.into();
        self
    }

    pub fn accepts_pets(mut self, value: impl Into<TriState>) -> Self {
        self.accepts_pets = value.into();
        self
    }

    pub fn active(mut self, value: impl Into<TriState>) -> Self {
        self.active = value.into();
        self
    }

    pub fn room_type_id(mut self, id: i64) -> Self {
        self.room_type_id = Some(id);
        self
    }

    pub fn status_id(mut self, id: i64) -> Self {
        self.status_id = Some(id);
        self
    }

    /// True when no field narrows the search at all.
    pub fn is_unfiltered(&self) -> bool {
        *self == Self::default()
    }

    /// Human-readable summary of the active filters, one per line
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!(
                "Neighborhood: {}",
                self.neighborhood.as_deref().unwrap_or("Any")
            ),
            format!("Type: {}", self.property_type.as_deref().unwrap_or("Any")),
        ];
        lines.push(match (self.price_min, self.price_max) {
            (None, None) => "Price: any".to_string(),
            (min, max) => {
                let fmt = |v: Option<i64>| v.map_or_else(|| "-".to_string(), |v| v.to_string());
                format!("Price: {} - {}", fmt(min), fmt(max))
            }
        });
        if self.is_rent {
            lines.push("For rent".to_string());
        }
        if self.is_sale {
            lines.push("For sale".to_string());
        }
        for (flag, with, without) in [
            (self.garage, "With garage", "Without garage"),
            (self.balcony, "With balcony", "Without balcony"),
            (self.patio, "With patio", "Without patio"),
            (self.accepts_pets, "Accepts pets", "No pets"),
            (self.active, "Active listings only", "Inactive listings only"),
        ] {
            match flag {
                TriState::True => lines.push(with.to_string()),
                TriState::False => lines.push(without.to_string()),
                TriState::Unset => {}
            }
        }
        if let Some(id) = self.room_type_id {
            lines.push(format!("Room type ID: {id}"));
        }
        if let Some(id) = self.status_id {
            lines.push(format!("Property status ID: {id}"));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_criteria_is_unfiltered() {
        assert!(FilterCriteria::new().is_unfiltered());
    }

    #[test]
    fn explicit_false_is_not_unfiltered() {
        let criteria = FilterCriteria::new().garage(false);
        assert!(!criteria.is_unfiltered());
        assert_eq!(criteria.garage.as_option(), Some(false));
    }

    #[test]
    fn explicit_zero_price_is_not_unfiltered() {
        assert!(!FilterCriteria::new().price_between(0, 0).is_unfiltered());
    }

    #[test]
    fn tri_state_from_option() {
        assert_eq!(TriState::from(None), TriState::Unset);
        assert_eq!(TriState::from(Some(true)), TriState::True);
        assert_eq!(TriState::from(Some(false)), TriState::False);
        assert!(TriState::default().is_unset());
    }

    #[test]
    fn summary_lists_only_active_flags() {
        let summary = FilterCriteria::new()
            .neighborhood("Centro")
            .price_between(100_000, 200_000)
            .sale(true)
            .patio(false)
            .summary();

        assert!(summary.contains("Neighborhood: Centro"));
        assert!(summary.contains("Type: Any"));
        assert!(summary.contains("Price: 100000 - 200000"));
        assert!(summary.contains("For sale"));
        assert!(summary.contains("Without patio"));
        assert!(!summary.contains("garage"));
        assert!(!summary.contains("For rent"));
        assert!(!summary.contains("listings"));
        assert!(!summary.ends_with('\n'));
    }

    #[test]
    fn summary_of_empty_criteria() {
        assert_eq!(
            FilterCriteria::new().summary(),
            "Neighborhood: Any\nType: Any\nPrice: any"
        );
    }

    #[test]
    fn active_flag_is_summarized() {
        let summary = FilterCriteria::new().active(true).summary();
        assert!(summary.contains("Active listings only"));
        assert!(!FilterCriteria::new().active(false).is_unfiltered());
    }
}
