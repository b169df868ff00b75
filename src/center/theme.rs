//! Priority badge theming
//!
//! Enum-to-enum mapping with an explicit fallback for labels outside the
//! known set, instead of string-keyed lookup tables.

use crate::briefs::PriorityLevel;

/// Visual tone of a priority badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Muted,
    Info,
    Warning,
    Critical,
}

impl BadgeTone {
    /// CSS class suffix used by page shells
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Muted => "badge-muted",
            Self::Info => "badge-info",
            Self::Warning => "badge-warning",
            Self::Critical => "badge-critical",
        }
    }
}

/// Tone for a known priority level
pub fn badge_tone(priority: PriorityLevel) -> BadgeTone {
    match priority {
        PriorityLevel::Routine => BadgeTone::Muted,
        PriorityLevel::Attention => BadgeTone::Info,
        PriorityLevel::Urgent => BadgeTone::Warning,
        PriorityLevel::Critique | PriorityLevel::Flash => BadgeTone::Critical,
    }
}

/// Tone for a free-form label; anything unrecognized falls back to muted
pub fn badge_tone_for_label(label: &str) -> BadgeTone {
    label
        .parse::<PriorityLevel>()
        .map(badge_tone)
        .unwrap_or(BadgeTone::Muted)
}
