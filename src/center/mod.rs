//! Professional-center template
//!
//! One parameterized controller serves every sector vertical: it loads the
//! domain's briefs and related analytical records, applies the filter
//! pipeline, and derives summary stats. Per-domain behavior is injected
//! through [`DomainProfile`] strategy bundles rather than copied pages.

mod controller;
mod domain;
mod theme;

pub use controller::{CenterController, LoadState, Notice, Severity};
pub use domain::{
    builtin_profiles, profile_for, DefaultRelatedLoader, DomainProfile, RelatedDataLoader,
};
pub use theme::{badge_tone, badge_tone_for_label, BadgeTone};
