//! Itinerary assembly: capacity-bounded day fill plus hidden-gem merge.
//!
//! Pure with respect to storage; persistence belongs to the pipeline.

use tracing::{debug, info, warn};

use crate::error::AssembleError;
use crate::filter::tags_intersect;
use crate::model::{Activity, BudgetCategory, DateRange, HiddenGem, Itinerary, Poi, TimeOfDay};
use crate::traits::HiddenGemSource;

/// Tag-to-timeslot lookup, consulted in the POI's own tag order.
const TAG_BEST_TIMES: &[(&str, TimeOfDay)] = &[
    ("sunset", TimeOfDay::Sunset),
    ("sunrise", TimeOfDay::Sunrise),
    ("trek", TimeOfDay::Morning),
    ("shopping", TimeOfDay::Afternoon),
    ("romantic", TimeOfDay::Evening),
    ("culture", TimeOfDay::Morning),
    ("wildlife", TimeOfDay::Morning),
    ("religious", TimeOfDay::Morning),
    ("adventure", TimeOfDay::Morning),
    ("food", TimeOfDay::Afternoon),
];

/// Longest gem description carried into a display name.
const GEM_NAME_LIMIT: usize = 50;

const GEM_DISCLAIMER: &str = "Hidden gem suggested by locals";
const PLACEHOLDER_ID: &str = "hidden-gem-placeholder";
const PLACEHOLDER_NAME: &str = "Hidden Gem (Coming Soon)";
const PLACEHOLDER_DISCLAIMER: &str =
    "No hidden gems found for your interests in this location yet";

#[derive(Debug, Clone, Copy)]
pub struct AssembleOptions {
    /// Primary POIs per day before overflow to the next day.
    pub capacity_per_day: usize,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self { capacity_per_day: 2 }
    }
}

/// Hidden-gem lookup parameters. Passing `Some` enables augmentation.
pub struct GemQuery<'a> {
    pub source: &'a dyn HiddenGemSource,
    pub region: &'a str,
    pub interests: &'a [String],
}

/// Assemble a day-bucketed itinerary from a filtered POI pool.
///
/// One bucket per day of the inclusive date range. The pool is walked in
/// order, filling each day to `capacity_per_day` before moving on; POIs
/// left over once every day is full are dropped. When a gem query is
/// given, matched gems take one reserved extra slot per day; a lookup
/// that fails or matches nothing yields a single placeholder entry
/// instead of silent absence.
///
/// Malformed or inverted date input fails fast; nothing is persisted
/// here under any outcome.
pub fn assemble(
    pois: &[Poi],
    start_date: &str,
    end_date: &str,
    gems: Option<GemQuery<'_>>,
    options: &AssembleOptions,
) -> Result<Itinerary, AssembleError> {
    let range = DateRange::parse(start_date, end_date)?;
    let num_days = range.day_count();
    let mut itinerary = Itinerary::with_day_count(num_days);

    // Gems are fetched up front: a non-empty match raises the per-day cap
    // by one so gems never compete with primary POIs for slots.
    let matched_gems = match &gems {
        Some(query) => matching_gems(query),
        None => Vec::new(),
    };
    let primary_limit = options.capacity_per_day;
    let effective_limit = if matched_gems.is_empty() {
        primary_limit
    } else {
        primary_limit + 1
    };

    let mut placed = 0;
    let mut day_idx = 0;
    'fill: for poi in pois {
        while itinerary.days[day_idx].activities.len() >= primary_limit {
            day_idx += 1;
            if day_idx >= num_days {
                break 'fill;
            }
        }
        itinerary.days[day_idx].activities.push(poi_activity(poi));
        placed += 1;
    }
    if placed < pois.len() {
        debug!(dropped = pois.len() - placed, "POI pool exceeds trip capacity");
    }

    if gems.is_some() {
        if matched_gems.is_empty() {
            place_placeholder(&mut itinerary, primary_limit + 1);
        } else {
            place_gems(&mut itinerary, matched_gems, effective_limit);
        }
    }

    Ok(itinerary)
}

fn poi_activity(poi: &Poi) -> Activity {
    Activity {
        id: poi.id.clone(),
        name: poi.name.clone(),
        tags: poi.tags.clone(),
        best_time: resolved_best_time(poi.best_time, &poi.tags),
        budget_category: poi.budget_category,
        disclaimer: poi.disclaimer.clone(),
        photo_url: poi.photo_url.clone(),
        coordinates: poi.coordinates,
    }
}

/// An explicit hint wins; otherwise the first tag with a table entry;
/// otherwise `Anytime`. An explicit `Anytime` still defers to the tags.
fn resolved_best_time(hint: Option<TimeOfDay>, tags: &[String]) -> TimeOfDay {
    if let Some(time) = hint {
        if time != TimeOfDay::Anytime {
            return time;
        }
    }
    for tag in tags {
        for (candidate, slot) in TAG_BEST_TIMES {
            if tag.eq_ignore_ascii_case(candidate) {
                return *slot;
            }
        }
    }
    TimeOfDay::Anytime
}

/// Query the gem source, keeping eligible entries that share a tag with
/// the user's interests. A failed lookup degrades to "no gems" so
/// assembly never aborts on a flaky collaborator.
fn matching_gems(query: &GemQuery<'_>) -> Vec<Activity> {
    let fetched = match query.source.gems_for(query.region, query.interests) {
        Ok(gems) => gems,
        Err(err) => {
            warn!(region = query.region, error = %err, "hidden gem lookup failed");
            return Vec::new();
        }
    };

    let total = fetched.len();
    let matched: Vec<Activity> = fetched
        .into_iter()
        .filter(|gem| gem.status.is_eligible())
        .filter(|gem| tags_intersect(&gem.tags, query.interests))
        .map(gem_activity)
        .collect();
    info!(region = query.region, total, matched = matched.len(), "hidden gem lookup");
    matched
}

fn gem_activity(gem: HiddenGem) -> Activity {
    let best_time = resolved_best_time(gem.best_time, &gem.tags);
    let description = if gem.description.is_empty() {
        "Local Discovery"
    } else {
        gem.description.as_str()
    };
    let name = format!("Hidden Gem: {}", truncated(description, GEM_NAME_LIMIT));
    Activity {
        id: gem.id,
        name,
        tags: gem.tags,
        best_time,
        budget_category: gem.budget_category,
        disclaimer: GEM_DISCLAIMER.to_string(),
        photo_url: gem.photo_url,
        coordinates: gem.coordinates,
    }
}

fn truncated(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let cut: String = text.chars().take(limit).collect();
        format!("{}...", cut)
    }
}

/// One gem per day in day order where space remains, then overflow gems
/// to the least-occupied days.
fn place_gems(itinerary: &mut Itinerary, gems: Vec<Activity>, limit: usize) {
    let mut queue = std::collections::VecDeque::from(gems);

    for day in itinerary.days.iter_mut() {
        if queue.is_empty() {
            break;
        }
        if day.activities.len() < limit {
            if let Some(gem) = queue.pop_front() {
                day.activities.push(gem);
            }
        }
    }

    while let Some(gem) = queue.pop_front() {
        let target = itinerary
            .days
            .iter_mut()
            .filter(|day| day.activities.len() < limit)
            .min_by_key(|day| day.activities.len());
        match target {
            Some(day) => day.activities.push(gem),
            None => {
                warn!(dropped = queue.len() + 1, "no day has space left for hidden gems");
                break;
            }
        }
    }
}

/// Append the "no results yet" entry to the last day with room, or the
/// final day outright. Absence is never silent when gems are enabled.
fn place_placeholder(itinerary: &mut Itinerary, limit: usize) {
    let placeholder = Activity {
        id: PLACEHOLDER_ID.to_string(),
        name: PLACEHOLDER_NAME.to_string(),
        tags: vec!["surprise".to_string(), "offbeat".to_string()],
        best_time: TimeOfDay::Anytime,
        budget_category: BudgetCategory::Unknown,
        disclaimer: PLACEHOLDER_DISCLAIMER.to_string(),
        photo_url: String::new(),
        coordinates: None,
    };

    if let Some(day) = itinerary
        .days
        .iter_mut()
        .rev()
        .find(|day| day.activities.len() < limit)
    {
        day.activities.push(placeholder);
    } else if let Some(last) = itinerary.days.last_mut() {
        last.activities.push(placeholder);
    }
}
