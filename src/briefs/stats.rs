//! Summary-stats aggregation for the professional center
//!
//! Stats are a derived view model, recomputed from the raw collections on
//! every render and never persisted. Headline counts are taken from the
//! unfiltered brief collection: they are dashboard totals, independent of
//! the filters driving the visible list.

use super::types::{Brief, RelatedData};
use serde::Serialize;
use std::collections::BTreeMap;

/// Predictions scoring above this count as high-probability (strict `>`)
const HIGH_PROBABILITY_FLOOR: u8 = 70;

/// Fixed-shape summary metrics, plus per-domain extras
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CenterStats {
    pub total_briefs: u64,
    /// Briefs at Critique or Flash priority
    pub critical_briefs: u64,
    pub linked_predictions: u64,
    pub high_prob_predictions: u64,
    pub linked_signals: u64,
    pub linked_trends: u64,
    /// Domain-specific headline metrics keyed by label
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, u64>,
}

impl CenterStats {
    /// Shallow-merge a domain override over these defaults.
    ///
    /// A set override key replaces the default wholesale; nothing is added
    /// together. Extra metrics replace same-named entries.
    pub fn merged(mut self, overrides: StatsOverride) -> Self {
        if let Some(value) = overrides.total_briefs {
            self.total_briefs = value;
        }
        if let Some(value) = overrides.critical_briefs {
            self.critical_briefs = value;
        }
        if let Some(value) = overrides.linked_predictions {
            self.linked_predictions = value;
        }
        if let Some(value) = overrides.high_prob_predictions {
            self.high_prob_predictions = value;
        }
        if let Some(value) = overrides.linked_signals {
            self.linked_signals = value;
        }
        if let Some(value) = overrides.linked_trends {
            self.linked_trends = value;
        }
        self.extra.extend(overrides.extra);
        self
    }
}

/// Partial stats returned by a domain policy; unset keys keep their defaults
#[derive(Debug, Clone, Default)]
pub struct StatsOverride {
    pub total_briefs: Option<u64>,
    pub critical_briefs: Option<u64>,
    pub linked_predictions: Option<u64>,
    pub high_prob_predictions: Option<u64>,
    pub linked_signals: Option<u64>,
    pub linked_trends: Option<u64>,
    pub extra: BTreeMap<String, u64>,
}

impl StatsOverride {
    /// Add a domain-specific headline metric
    pub fn with_extra(mut self, label: impl Into<String>, value: u64) -> Self {
        self.extra.insert(label.into(), value);
        self
    }
}

/// Default stats shape shared by every sector page
pub fn compute_default_stats(briefs: &[Brief], related: &RelatedData) -> CenterStats {
    CenterStats {
        total_briefs: briefs.len() as u64,
        critical_briefs: briefs
            .iter()
            .filter(|brief| brief.priority_level.is_critical())
            .count() as u64,
        linked_predictions: related.predictions.len() as u64,
        high_prob_predictions: related
            .predictions
            .iter()
            .filter(|prediction| {
                prediction
                    .probability_score
                    .map(|score| score > HIGH_PROBABILITY_FLOOR)
                    .unwrap_or(false)
            })
            .count() as u64,
        linked_signals: related.signals.len() as u64,
        linked_trends: related.trends.len() as u64,
        extra: BTreeMap::new(),
    }
}

/// Per-domain stats customization, the template's main extension point
///
/// Each sector page may supply a policy injecting or overriding headline
/// metrics without rewriting the shared controller.
pub trait StatsPolicy: Send + Sync {
    fn compute(&self, briefs: &[Brief], related: &RelatedData) -> StatsOverride;
}

/// Policy that keeps the defaults untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStatsPolicy;

impl StatsPolicy for DefaultStatsPolicy {
    fn compute(&self, _briefs: &[Brief], _related: &RelatedData) -> StatsOverride {
        StatsOverride::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::briefs::types::{Prediction, PriorityLevel, Signal, Trend};
    use chrono::Utc;

    fn brief(priority: PriorityLevel) -> Brief {
        Brief {
            id: uuid::Uuid::new_v4().to_string(),
            domain: "Finance".to_string(),
            brief_title: "Brief".to_string(),
            executive_summary: String::new(),
            priority_level: priority,
            classification: String::new(),
            confidence_score: None,
            geographic_focus: None,
            created_date: Utc::now(),
        }
    }

    fn prediction(probability: Option<u8>) -> Prediction {
        Prediction {
            id: uuid::Uuid::new_v4().to_string(),
            title: "Prévision".to_string(),
            brief_id: None,
            probability_score: probability,
            created_date: Utc::now(),
        }
    }

    #[test]
    fn test_default_stats_counts() {
        let briefs = vec![
            brief(PriorityLevel::Routine),
            brief(PriorityLevel::Critique),
            brief(PriorityLevel::Flash),
        ];
        let related = RelatedData {
            predictions: vec![prediction(Some(90)), prediction(Some(70)), prediction(None)],
            signals: vec![Signal {
                id: "s".to_string(),
                title: "Signal".to_string(),
                signal_type: None,
                created_date: Utc::now(),
            }],
            trends: vec![Trend {
                id: "t".to_string(),
                title: "Tendance".to_string(),
                momentum: None,
                created_date: Utc::now(),
            }],
        };

        let stats = compute_default_stats(&briefs, &related);
        assert_eq!(stats.total_briefs, 3);
        assert_eq!(stats.critical_briefs, 2);
        assert_eq!(stats.linked_predictions, 3);
        // 70 is not > 70; absent score never counts
        assert_eq!(stats.high_prob_predictions, 1);
        assert_eq!(stats.linked_signals, 1);
        assert_eq!(stats.linked_trends, 1);
    }

    #[test]
    fn test_empty_collections_degrade_to_zero() {
        let stats = compute_default_stats(&[], &RelatedData::default());
        assert_eq!(stats, CenterStats::default());
    }

    #[test]
    fn test_merge_is_override_not_additive() {
        let briefs = vec![brief(PriorityLevel::Routine); 4];
        let defaults = compute_default_stats(&briefs, &RelatedData::default());
        assert_eq!(defaults.total_briefs, 4);

        let overrides = StatsOverride {
            total_briefs: Some(999),
            ..Default::default()
        };
        let merged = defaults.merged(overrides);
        assert_eq!(merged.total_briefs, 999);
        // Untouched keys keep their defaults
        assert_eq!(merged.critical_briefs, 0);
    }

    #[test]
    fn test_merge_extras() {
        let defaults = CenterStats::default();
        let merged = defaults.merged(StatsOverride::default().with_extra("flashBriefs", 7));
        assert_eq!(merged.extra.get("flashBriefs"), Some(&7));
    }

    #[test]
    fn test_default_policy_is_identity() {
        let briefs = vec![brief(PriorityLevel::Flash)];
        let related = RelatedData::default();
        let defaults = compute_default_stats(&briefs, &related);
        let merged = defaults
            .clone()
            .merged(DefaultStatsPolicy.compute(&briefs, &related));
        assert_eq!(merged, defaults);
    }
}
