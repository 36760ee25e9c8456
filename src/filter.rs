//! POI pool filtering ahead of assembly.
//!
//! Budget and interest filters narrow the pool; accessibility needs never
//! reject a POI, they only attach warning disclaimers.

use tracing::debug;

use crate::error::SourceError;
use crate::model::{BudgetCategory, Poi};
use crate::traits::PoiCatalog;

/// Criteria for narrowing a catalog pool to one traveler.
#[derive(Debug, Clone, Default)]
pub struct PoiFilter {
    /// Rejects only on an explicit mismatch; `Unknown` on either side
    /// passes.
    pub budget: BudgetCategory,
    /// When non-empty, POIs must share at least one tag.
    pub interests: Vec<String>,
    pub with_kids: bool,
    pub with_pets: bool,
    pub with_disabilities: bool,
}

/// Apply `filter` to a pool.
pub fn filter_pois(pool: Vec<Poi>, filter: &PoiFilter) -> Vec<Poi> {
    let mut kept = Vec::with_capacity(pool.len());
    for mut poi in pool {
        if filter.budget != BudgetCategory::Unknown
            && poi.budget_category != BudgetCategory::Unknown
            && poi.budget_category != filter.budget
        {
            continue;
        }
        if !filter.interests.is_empty() && !tags_intersect(&poi.tags, &filter.interests) {
            continue;
        }

        let mut warnings = Vec::new();
        if filter.with_kids && !poi.kid_friendly {
            warnings.push("Not suitable for kids");
        }
        if filter.with_pets && !poi.pet_friendly {
            warnings.push("No pets allowed");
        }
        if filter.with_disabilities && !poi.wheelchair_accessible {
            warnings.push("Not wheelchair accessible");
        }
        if !warnings.is_empty() {
            poi.disclaimer = warnings.join(" | ");
        }

        kept.push(poi);
    }
    kept
}

/// Fetch a region's pool from the catalog and filter it.
pub fn filtered_pois<C: PoiCatalog>(
    catalog: &C,
    region: &str,
    filter: &PoiFilter,
) -> Result<Vec<Poi>, SourceError> {
    let pool = catalog.pois_for(region)?;
    let kept = filter_pois(pool, filter);
    debug!(region, kept = kept.len(), "filtered POI pool");
    Ok(kept)
}

/// Case-insensitive non-empty intersection.
pub(crate) fn tags_intersect(tags: &[String], interests: &[String]) -> bool {
    tags.iter()
        .any(|tag| interests.iter().any(|interest| interest.eq_ignore_ascii_case(tag)))
}
