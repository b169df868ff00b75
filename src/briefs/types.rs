//! Brief and related-record types
//!
//! Records come from the hosted entity service as JSON; optional fields
//! (`confidence_score`, `geographic_focus`) may be absent on partial records
//! and every consumer must guard for that rather than assume presence.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Brief priority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriorityLevel {
    Routine,
    Attention,
    Urgent,
    Critique,
    Flash,
}

impl PriorityLevel {
    /// Critical levels counted in the `critical_briefs` headline metric
    pub fn is_critical(self) -> bool {
        matches!(self, Self::Critique | Self::Flash)
    }
}

impl std::fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Routine => write!(f, "Routine"),
            Self::Attention => write!(f, "Attention"),
            Self::Urgent => write!(f, "Urgent"),
            Self::Critique => write!(f, "Critique"),
            Self::Flash => write!(f, "Flash"),
        }
    }
}

impl std::str::FromStr for PriorityLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Routine" => Ok(Self::Routine),
            "Attention" => Ok(Self::Attention),
            "Urgent" => Ok(Self::Urgent),
            "Critique" => Ok(Self::Critique),
            "Flash" => Ok(Self::Flash),
            other => Err(format!("unknown priority level: {}", other)),
        }
    }
}

/// Geographic scope of a brief
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeographicFocus {
    #[serde(default)]
    pub regions: Vec<String>,
}

/// A single intelligence report, scoped to exactly one sector domain
///
/// Immutable once created except through the entity service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brief {
    pub id: String,
    pub domain: String,
    pub brief_title: String,
    #[serde(default)]
    pub executive_summary: String,
    pub priority_level: PriorityLevel,
    #[serde(default)]
    pub classification: String,
    /// Confidence 0-100; absent on some partial records
    #[serde(default)]
    pub confidence_score: Option<u8>,
    #[serde(default)]
    pub geographic_focus: Option<GeographicFocus>,
    pub created_date: DateTime<Utc>,
}

impl Brief {
    /// Decode a brief from an entity-service JSON record
    pub fn from_record(record: serde_json::Value) -> Result<Self> {
        serde_json::from_value(record).map_err(|e| Error::Entity(format!("malformed brief: {}", e)))
    }
}

/// Form payload for creating a brief
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBriefRequest {
    pub brief_title: String,
    #[serde(default)]
    pub executive_summary: String,
    pub priority_level: PriorityLevel,
    #[serde(default)]
    pub classification: String,
    #[serde(default)]
    pub confidence_score: Option<u8>,
    #[serde(default)]
    pub geographic_focus: Option<GeographicFocus>,
}

impl CreateBriefRequest {
    /// Required-field checks performed before submission.
    ///
    /// Runs client-side; a failing request is never sent to the service, so
    /// there is no partial write to roll back.
    pub fn validate(&self) -> Result<()> {
        if self.brief_title.trim().is_empty() {
            return Err(Error::Validation("brief title is required".to_string()));
        }
        if let Some(score) = self.confidence_score {
            if score > 100 {
                return Err(Error::Validation(format!(
                    "confidence score {} out of range 0-100",
                    score
                )));
            }
        }
        Ok(())
    }
}

/// A forecast record, optionally linked to a brief
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub brief_id: Option<String>,
    /// Probability 0-100; absent on some records
    #[serde(default)]
    pub probability_score: Option<u8>,
    pub created_date: DateTime<Utc>,
}

/// A weak-signal record shown in the sidebar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub signal_type: Option<String>,
    pub created_date: DateTime<Utc>,
}

/// A trend record shown in the sidebar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trend {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub momentum: Option<String>,
    pub created_date: DateTime<Utc>,
}

/// The three related analytical collections
///
/// Independently fetched, read-only, never run through the brief filter
/// pipeline.
#[derive(Debug, Clone, Default)]
pub struct RelatedData {
    pub predictions: Vec<Prediction>,
    pub signals: Vec<Signal>,
    pub trends: Vec<Trend>,
}

/// Decode a batch of service records, skipping malformed ones with a warning
/// instead of failing the whole load.
pub fn decode_collection<T: serde::de::DeserializeOwned>(
    records: Vec<serde_json::Value>,
    label: &str,
) -> Vec<T> {
    records
        .into_iter()
        .filter_map(|record| match serde_json::from_value(record) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!("skipping malformed {} record: {}", label, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_priority_round_trip() {
        for level in [
            PriorityLevel::Routine,
            PriorityLevel::Attention,
            PriorityLevel::Urgent,
            PriorityLevel::Critique,
            PriorityLevel::Flash,
        ] {
            let parsed: PriorityLevel = level.to_string().parse().unwrap();
            assert_eq!(parsed, level);
        }
        assert!("Inconnu".parse::<PriorityLevel>().is_err());
    }

    #[test]
    fn test_critical_levels() {
        assert!(PriorityLevel::Critique.is_critical());
        assert!(PriorityLevel::Flash.is_critical());
        assert!(!PriorityLevel::Urgent.is_critical());
        assert!(!PriorityLevel::Routine.is_critical());
    }

    #[test]
    fn test_brief_from_partial_record() {
        // No confidence_score, no geographic_focus, no summary
        let brief = Brief::from_record(json!({
            "id": "b1",
            "domain": "Finance",
            "brief_title": "Tensions bancaires",
            "priority_level": "Urgent",
            "created_date": "2026-08-20T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(brief.confidence_score, None);
        assert_eq!(brief.geographic_focus, None);
        assert_eq!(brief.executive_summary, "");
    }

    #[test]
    fn test_brief_from_malformed_record() {
        let result = Brief::from_record(json!({"id": "b1"}));
        assert!(matches!(result, Err(Error::Entity(_))));
    }

    #[test]
    fn test_create_request_requires_title() {
        let request = CreateBriefRequest {
            brief_title: "   ".to_string(),
            executive_summary: String::new(),
            priority_level: PriorityLevel::Routine,
            classification: String::new(),
            confidence_score: None,
            geographic_focus: None,
        };
        assert!(matches!(request.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_create_request_rejects_out_of_range_confidence() {
        let request = CreateBriefRequest {
            brief_title: "Titre".to_string(),
            executive_summary: String::new(),
            priority_level: PriorityLevel::Routine,
            classification: String::new(),
            confidence_score: Some(101),
            geographic_focus: None,
        };
        assert!(request.validate().is_err());
    }
}
