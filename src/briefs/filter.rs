//! Brief filter pipeline
//!
//! A closed conjunctive filter: every brief in the output satisfies every
//! active predicate, and no brief satisfying all active predicates is
//! excluded. All dimensions combine with AND, never OR. Predicates run in a
//! canonical order (search, priority, confidence, region, period) to match
//! observable behavior on ties; order does not affect correctness.
//!
//! `now` is an explicit argument so the pipeline stays pure and testable.

use super::types::{Brief, PriorityLevel};
use chrono::{DateTime, Duration, Utc};

/// Priority dimension: sentinel `All` or an exact level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriorityFilter {
    #[default]
    All,
    Exact(PriorityLevel),
}

/// The fixed discrete confidence thresholds offered by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceThreshold {
    Fifty,
    SeventyFive,
    Ninety,
}

impl ConfidenceThreshold {
    /// Minimum score a brief must reach (inclusive)
    pub fn min_score(self) -> u8 {
        match self {
            Self::Fifty => 50,
            Self::SeventyFive => 75,
            Self::Ninety => 90,
        }
    }
}

impl std::str::FromStr for ConfidenceThreshold {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "50" => Ok(Self::Fifty),
            "75" => Ok(Self::SeventyFive),
            "90" => Ok(Self::Ninety),
            other => Err(format!("unknown confidence threshold: {}", other)),
        }
    }
}

/// Confidence dimension: sentinel `All` or a discrete threshold
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfidenceFilter {
    #[default]
    All,
    AtLeast(ConfidenceThreshold),
}

/// Period dimension
///
/// The rolling buckets are windows counted back from `now`, not calendar
/// boundaries: `Today` means "the last 24 hours". Custom bounds are both
/// optional and conjunctive when both present; the end bound is inclusive
/// through 23:59:59.999 of its day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PeriodFilter {
    #[default]
    All,
    Today,
    Last7Days,
    Last30Days,
    Custom {
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    },
}

/// Transient per-page filter state
///
/// `Default` is the documented reset state: every dimension at its sentinel,
/// empty region text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub priority: PriorityFilter,
    pub period: PeriodFilter,
    /// Refine-by-typing region text; empty string is a no-op
    pub region: String,
    pub confidence: ConfidenceFilter,
}

/// Run the full pipeline over a brief collection
pub fn apply_filters(
    briefs: &[Brief],
    search_term: &str,
    filters: &FilterState,
    now: DateTime<Utc>,
) -> Vec<Brief> {
    briefs
        .iter()
        .filter(|brief| matches_search(brief, search_term))
        .filter(|brief| matches_priority(brief, filters.priority))
        .filter(|brief| matches_confidence(brief, filters.confidence))
        .filter(|brief| matches_region(brief, &filters.region))
        .filter(|brief| matches_period(brief, filters.period, now))
        .cloned()
        .collect()
}

/// Case-insensitive substring match on title OR summary.
/// Empty or whitespace-only terms pass everything.
fn matches_search(brief: &Brief, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    brief.brief_title.to_lowercase().contains(&needle)
        || brief.executive_summary.to_lowercase().contains(&needle)
}

fn matches_priority(brief: &Brief, filter: PriorityFilter) -> bool {
    match filter {
        PriorityFilter::All => true,
        PriorityFilter::Exact(level) => brief.priority_level == level,
    }
}

/// `confidence_score >= threshold`, inclusive at the boundary.
/// A brief with no score fails any non-sentinel confidence filter.
fn matches_confidence(brief: &Brief, filter: ConfidenceFilter) -> bool {
    match filter {
        ConfidenceFilter::All => true,
        ConfidenceFilter::AtLeast(threshold) => match brief.confidence_score {
            Some(score) => score >= threshold.min_score(),
            None => false,
        },
    }
}

/// Case-insensitive substring match against ANY region entry.
/// Empty filter text passes everything; a brief with no geographic focus
/// fails any non-empty region filter.
fn matches_region(brief: &Brief, region: &str) -> bool {
    if region.is_empty() {
        return true;
    }
    let needle = region.to_lowercase();
    brief
        .geographic_focus
        .as_ref()
        .map(|focus| {
            focus
                .regions
                .iter()
                .any(|entry| entry.to_lowercase().contains(&needle))
        })
        .unwrap_or(false)
}

fn matches_period(brief: &Brief, filter: PeriodFilter, now: DateTime<Utc>) -> bool {
    match filter {
        PeriodFilter::All => true,
        PeriodFilter::Today => brief.created_date >= now - Duration::days(1),
        PeriodFilter::Last7Days => brief.created_date >= now - Duration::days(7),
        PeriodFilter::Last30Days => brief.created_date >= now - Duration::days(30),
        PeriodFilter::Custom { start, end } => {
            if let Some(start) = start {
                if brief.created_date < start {
                    return false;
                }
            }
            if let Some(end) = end {
                if brief.created_date > end_of_day(end) {
                    return false;
                }
            }
            true
        }
    }
}

/// 23:59:59.999 on the same calendar day, so the end bound is inclusive
/// through its whole day.
fn end_of_day(moment: DateTime<Utc>) -> DateTime<Utc> {
    moment
        .date_naive()
        .and_hms_milli_opt(23, 59, 59, 999)
        .map(|t| t.and_utc())
        .unwrap_or(moment)
}
