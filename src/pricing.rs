use serde::{Deserialize, Serialize};
use tracing::debug;

/// Step sizes tried from largest to smallest
pub const STEP_CANDIDATES: [i64; 11] = [
    50_000, 25_000, 20_000, 10_000, 5_000, 2_500, 1_000, 500, 100, 10, 1,
];

/// Min/max/step for a price slider
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceRange {
    pub min: i64,
    pub max: i64,
    pub step: i64,
    /// Set when no prices were observed and the default range is used
    pub is_fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRangeSettings {
    /// Endpoints are rounded to multiples of this
    pub granularity: i64,
    pub step_candidates: Vec<i64>,
    pub default_min: i64,
    pub default_max: i64,
    pub default_step: i64,
}

impl Default for PriceRangeSettings {
    fn default() -> Self {
        Self {
            granularity: 5_000,
            step_candidates: STEP_CANDIDATES.to_vec(),
            default_min: 0,
            default_max: 1_000_000,
            default_step: 10_000,
        }
    }
}

impl PriceRangeSettings {
    pub fn fallback(&self) -> PriceRange {
        PriceRange {
            min: self.default_min,
            max: self.default_max,
            step: self.default_step,
            is_fallback: true,
        }
    }

    /// Derive slider bounds from the observed prices
    pub fn compute(&self, prices: &[i64]) -> PriceRange {
        let (Some(&raw_min), Some(&raw_max)) = (prices.iter().min(), prices.iter().max()) else {
            debug!("No prices observed, using default range");
            return self.fallback();
        };

        // Prices are never negative.
        let (raw_min, raw_max) = (raw_min.max(0), raw_max.max(0));
        let unit = self.granularity.max(1);
        let mut min = raw_min - raw_min % unit;
        let mut max = ceil_to(raw_max, unit);
        if max == min {
            match max.checked_add(unit) {
                Some(widened) => max = widened,
                None => min -= unit,
            }
        }

        let step = self.step_for(max - min);
        debug!("Price range {} - {} (step {})", min, max, step);

        PriceRange {
            min,
            max,
            step,
            is_fallback: false,
        }
    }

    fn step_for(&self, span: i64) -> i64 {
        self.step_candidates
            .iter()
            .copied()
            .find(|&step| step > 0 && span % step == 0)
            .unwrap_or(1)
    }
}

/// Round a non-negative value up to a multiple of `unit`, or down when the
/// next multiple does not fit in an i64.
fn ceil_to(value: i64, unit: i64) -> i64 {
    let floor = value - value % unit;
    if floor == value {
        value
    } else {
        floor.checked_add(unit).unwrap_or(floor)
    }
}
