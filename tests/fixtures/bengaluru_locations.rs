//! Real Bengaluru-area locations for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap. The Mysuru group sits ~130 km
//! southwest, far enough for clustering tests to separate the two cities.

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

// ============================================================================
// Central Bengaluru
// ============================================================================

pub const BENGALURU: &[Location] = &[
    Location::new("Lalbagh Botanical Garden", 12.9507, 77.5848),
    Location::new("Cubbon Park", 12.9763, 77.5929),
    Location::new("Vidhana Soudha", 12.9794, 77.5912),
    Location::new("Bangalore Palace", 12.9987, 77.5920),
    Location::new("Commercial Street", 12.9822, 77.6090),
    Location::new("ISKCON Temple", 13.0108, 77.5511),
];

// ============================================================================
// Mysuru (distinct geographic cluster)
// ============================================================================

pub const MYSURU: &[Location] = &[
    Location::new("Mysore Palace", 12.3052, 76.6552),
    Location::new("Chamundi Hills", 12.2724, 76.6736),
    Location::new("Brindavan Gardens", 12.4216, 76.5717),
];
