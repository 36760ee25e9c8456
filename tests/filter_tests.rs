//! POI filter tests
//!
//! Budget mismatch rejection, interest-tag intersection, and
//! accessibility disclaimers.

use trip_planner::error::SourceError;
use trip_planner::filter::{PoiFilter, filter_pois, filtered_pois};
use trip_planner::model::{BudgetCategory, Poi};
use trip_planner::traits::PoiCatalog;

// ============================================================================
// Test Fixtures
// ============================================================================

struct StaticCatalog {
    pool: Vec<Poi>,
}

impl PoiCatalog for StaticCatalog {
    fn pois_for(&self, _region: &str) -> Result<Vec<Poi>, SourceError> {
        Ok(self.pool.clone())
    }
}

struct OfflineCatalog;

impl PoiCatalog for OfflineCatalog {
    fn pois_for(&self, _region: &str) -> Result<Vec<Poi>, SourceError> {
        Err(SourceError::Unavailable("catalog offline".to_string()))
    }
}

fn ids(pois: &[Poi]) -> Vec<&str> {
    pois.iter().map(|p| p.id.as_str()).collect()
}

// ============================================================================
// Budget
// ============================================================================

#[test]
fn test_budget_rejects_only_explicit_mismatch() {
    let pool = vec![
        Poi::new("cheap", "Park").with_budget(BudgetCategory::Low),
        Poi::new("pricey", "Resort").with_budget(BudgetCategory::High),
        Poi::new("unpriced", "Viewpoint"),
    ];
    let filter = PoiFilter {
        budget: BudgetCategory::Low,
        ..PoiFilter::default()
    };

    let kept = filter_pois(pool, &filter);
    assert_eq!(ids(&kept), vec!["cheap", "unpriced"]);
}

#[test]
fn test_unknown_budget_filter_keeps_everything() {
    let pool = vec![
        Poi::new("cheap", "Park").with_budget(BudgetCategory::Low),
        Poi::new("pricey", "Resort").with_budget(BudgetCategory::High),
    ];
    let kept = filter_pois(pool, &PoiFilter::default());
    assert_eq!(kept.len(), 2);
}

// ============================================================================
// Interest tags
// ============================================================================

#[test]
fn test_interest_tags_require_intersection() {
    let pool = vec![
        Poi::new("match", "Hill").with_tags(["trek", "wildlife"]),
        Poi::new("miss", "Mall").with_tags(["shopping"]),
        Poi::new("untagged", "Square"),
    ];
    let filter = PoiFilter {
        interests: vec!["Trek".to_string()],
        ..PoiFilter::default()
    };

    let kept = filter_pois(pool, &filter);
    assert_eq!(ids(&kept), vec!["match"]);
}

#[test]
fn test_no_interests_means_no_tag_filtering() {
    let pool = vec![Poi::new("any", "Anywhere").with_tags(["food"])];
    let kept = filter_pois(pool, &PoiFilter::default());
    assert_eq!(kept.len(), 1);
}

// ============================================================================
// Accessibility disclaimers
// ============================================================================

#[test]
fn test_accessibility_needs_warn_but_never_reject() {
    let pool = vec![Poi::new("rough", "Cliff Trail").with_tags(["trek"])];
    let filter = PoiFilter {
        with_kids: true,
        with_pets: true,
        with_disabilities: true,
        ..PoiFilter::default()
    };

    let kept = filter_pois(pool, &filter);
    assert_eq!(kept.len(), 1);
    assert_eq!(
        kept[0].disclaimer,
        "Not suitable for kids | No pets allowed | Not wheelchair accessible"
    );
}

#[test]
fn test_friendly_poi_keeps_its_own_disclaimer() {
    let mut poi = Poi::new("ok", "Family Park");
    poi.kid_friendly = true;
    poi.pet_friendly = true;
    poi.wheelchair_accessible = true;
    poi.disclaimer = "Closes at dusk".to_string();

    let filter = PoiFilter {
        with_kids: true,
        with_pets: true,
        with_disabilities: true,
        ..PoiFilter::default()
    };
    let kept = filter_pois(vec![poi], &filter);
    assert_eq!(kept[0].disclaimer, "Closes at dusk");
}

// ============================================================================
// Catalog seam
// ============================================================================

#[test]
fn test_filtered_pois_reads_through_the_catalog() {
    let catalog = StaticCatalog {
        pool: vec![
            Poi::new("a", "Fort").with_tags(["culture"]),
            Poi::new("b", "Bar").with_tags(["nightlife"]),
        ],
    };
    let filter = PoiFilter {
        interests: vec!["culture".to_string()],
        ..PoiFilter::default()
    };

    let kept = filtered_pois(&catalog, "Bengaluru", &filter).unwrap();
    assert_eq!(ids(&kept), vec!["a"]);
}

#[test]
fn test_catalog_failure_propagates() {
    let result = filtered_pois(&OfflineCatalog, "Bengaluru", &PoiFilter::default());
    assert!(matches!(result, Err(SourceError::Unavailable(_))));
}
