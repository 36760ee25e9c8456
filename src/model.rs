//! Domain types and boundary document shapes.
//!
//! POIs and gems are read-only inputs; activities are their placed form
//! inside an itinerary. Document shapes mirror the external store layout,
//! with unknown fields carried through untouched.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AssembleError;

/// A latitude/longitude pair in degrees.
///
/// Accepts both `lat`/`lng` and `latitude`/`longitude` spellings on input
/// and always writes the short form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(alias = "latitude")]
    pub lat: f64,
    #[serde(alias = "longitude")]
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn as_tuple(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

/// Closed budget classification. Unknown strings fold into `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetCategory {
    Low,
    Mid,
    High,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Suggested part of the day for a visit.
///
/// Intentionally broad: the itinerary suggests the general part of the day
/// rather than a strict schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeOfDay {
    Sunrise,
    Morning,
    Afternoon,
    Evening,
    Sunset,
    #[default]
    #[serde(other)]
    Anytime,
}

/// Moderation status of a hidden-gem submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GemStatus {
    Approved,
    Verified,
    #[default]
    #[serde(other)]
    Other,
}

impl GemStatus {
    /// Only moderated entries may surface in an itinerary.
    pub fn is_eligible(self) -> bool {
        matches!(self, GemStatus::Approved | GemStatus::Verified)
    }
}

/// A point of interest as read from the catalog store.
///
/// Never mutated by this core. A POI without coordinates is excluded from
/// proximity optimization but may still appear in an itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    pub id: String,
    pub name: String,
    #[serde(default, alias = "location", skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub budget_category: BudgetCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_time: Option<TimeOfDay>,
    #[serde(default)]
    pub disclaimer: String,
    #[serde(default)]
    pub photo_url: String,
    #[serde(default)]
    pub kid_friendly: bool,
    #[serde(default)]
    pub pet_friendly: bool,
    #[serde(default)]
    pub wheelchair_accessible: bool,
}

impl Poi {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinates: None,
            tags: Vec::new(),
            budget_category: BudgetCategory::Unknown,
            best_time: None,
            disclaimer: String::new(),
            photo_url: String::new(),
            kid_friendly: false,
            pet_friendly: false,
            wheelchair_accessible: false,
        }
    }

    pub fn with_coordinates(mut self, lat: f64, lng: f64) -> Self {
        self.coordinates = Some(Coordinates::new(lat, lng));
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_best_time(mut self, best_time: TimeOfDay) -> Self {
        self.best_time = Some(best_time);
        self
    }

    pub fn with_budget(mut self, budget: BudgetCategory) -> Self {
        self.budget_category = budget;
        self
    }
}

/// A user-submitted hidden gem from the secondary content pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiddenGem {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "location", skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub budget_category: BudgetCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_time: Option<TimeOfDay>,
    #[serde(default)]
    pub photo_url: String,
    #[serde(default)]
    pub status: GemStatus,
}

impl HiddenGem {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            coordinates: None,
            tags: Vec::new(),
            budget_category: BudgetCategory::Unknown,
            best_time: None,
            photo_url: String::new(),
            status: GemStatus::Other,
        }
    }

    pub fn with_status(mut self, status: GemStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_coordinates(mut self, lat: f64, lng: f64) -> Self {
        self.coordinates = Some(Coordinates::new(lat, lng));
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// A POI or gem as placed into a day bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub best_time: TimeOfDay,
    #[serde(default)]
    pub budget_category: BudgetCategory,
    #[serde(default)]
    pub disclaimer: String,
    #[serde(default)]
    pub photo_url: String,
    #[serde(default, alias = "location", skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

/// One labeled day bucket of an itinerary.
#[derive(Debug, Clone, PartialEq)]
pub struct DayPlan {
    pub label: String,
    pub activities: Vec<Activity>,
}

/// A day-bucketed trip plan.
///
/// Day order is semantically meaningful. The external form is a
/// `{"Day N": [...]}` map; deserialization re-derives day order numerically
/// so "Day 10" follows "Day 9" rather than "Day 1".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Itinerary {
    pub days: Vec<DayPlan>,
}

impl Itinerary {
    /// Empty buckets labeled "Day 1" through "Day N".
    pub fn with_day_count(num_days: usize) -> Self {
        let days = (1..=num_days)
            .map(|i| DayPlan {
                label: format!("Day {}", i),
                activities: Vec::new(),
            })
            .collect();
        Self { days }
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Total activities across all days.
    pub fn activity_count(&self) -> usize {
        self.days.iter().map(|d| d.activities.len()).sum()
    }

    /// True when no day holds any activity.
    pub fn is_empty(&self) -> bool {
        self.activity_count() == 0
    }

    pub fn day(&self, label: &str) -> Option<&DayPlan> {
        self.days.iter().find(|d| d.label == label)
    }

    pub fn day_mut(&mut self, label: &str) -> Option<&mut DayPlan> {
        self.days.iter_mut().find(|d| d.label == label)
    }

    /// Activity ids in day-then-visit order.
    pub fn activity_ids(&self) -> Vec<&str> {
        self.days
            .iter()
            .flat_map(|d| d.activities.iter().map(|a| a.id.as_str()))
            .collect()
    }
}

fn day_number(label: &str) -> Option<u32> {
    label.strip_prefix("Day ")?.trim().parse().ok()
}

impl Serialize for Itinerary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.days.len()))?;
        for day in &self.days {
            map.serialize_entry(&day.label, &day.activities)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Itinerary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DayMapVisitor;

        impl<'de> Visitor<'de> for DayMapVisitor {
            type Value = Itinerary;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a map of day labels to activity lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Itinerary, A::Error> {
                let mut days: Vec<DayPlan> = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((label, activities)) = access.next_entry::<String, Vec<Activity>>()? {
                    days.push(DayPlan { label, activities });
                }
                // Stable sort: numbered days in numeric order, unlabeled
                // leftovers after them in encounter order.
                days.sort_by_key(|d| match day_number(&d.label) {
                    Some(n) => (false, n),
                    None => (true, 0),
                });
                Ok(Itinerary { days })
            }
        }

        deserializer.deserialize_map(DayMapVisitor)
    }
}

/// Incoming save request: trip metadata plus the raw itinerary.
///
/// Fields this core does not model (trip name, client settings) ride along
/// in `extra` and are persisted untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItineraryPayload {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub itinerary: Itinerary,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The stored form of a trip's itinerary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryDocument {
    pub trip_id: String,
    pub user_id: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub itinerary: Itinerary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub itinerary_original_backup: Option<Itinerary>,
    #[serde(default)]
    pub poi_count: usize,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// An inclusive trip date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Parse ISO-8601 dates or datetimes; datetimes may carry an offset or
    /// a `Z` suffix. An inverted range fails with `InvalidRange`.
    pub fn parse(start: &str, end: &str) -> Result<Self, AssembleError> {
        let parsed_start = parse_flexible_date(start).ok_or_else(|| AssembleError::InvalidDate {
            value: start.to_string(),
        })?;
        let parsed_end = parse_flexible_date(end).ok_or_else(|| AssembleError::InvalidDate {
            value: end.to_string(),
        })?;
        if parsed_end < parsed_start {
            return Err(AssembleError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self {
            start: parsed_start,
            end: parsed_end,
        })
    }

    /// Inclusive day span, floor 1.
    pub fn day_count(&self) -> usize {
        ((self.end - self.start).num_days() + 1).max(1) as usize
    }

    /// How many POIs a trip of this length needs. Currently one per day.
    pub fn required_poi_count(&self) -> usize {
        self.day_count()
    }
}

fn parse_flexible_date(value: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.date_naive());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}
